//! Abstract syntax tree for GraphQL documents.
//!
//! Type-system extensions reuse the definition node shapes; whether a node is
//! a definition or an extension is recorded by the enclosing [`Definition`].

use crate::token::DirectiveLocation;
use dgsgen_core::{Span, Text};

/// A complete document.
#[derive(Debug, Clone)]
pub struct Document<'a> {
    pub definitions: Vec<Definition<'a>>,
    pub span: Span,
}

/// A top-level definition.
#[derive(Debug, Clone)]
pub enum Definition<'a> {
    Schema(SchemaDefinition<'a>),
    SchemaExtension(SchemaDefinition<'a>),
    Type(TypeDefinition<'a>),
    TypeExtension(TypeDefinition<'a>),
    Directive(DirectiveDefinitionNode<'a>),
    Operation(OperationDefinition<'a>),
    Fragment(FragmentDefinition<'a>),
}

/// Schema definition.
#[derive(Debug, Clone)]
pub struct SchemaDefinition<'a> {
    pub description: Option<Description>,
    pub directives: Vec<Directive<'a>>,
    pub operations: Vec<OperationTypeDefinition>,
    pub span: Span,
}

/// Operation type in schema (query/mutation/subscription).
#[derive(Debug, Clone)]
pub struct OperationTypeDefinition {
    pub operation: OperationType,
    pub type_name: Name,
    pub span: Span,
}

/// Type of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationType {
    Query,
    Mutation,
    Subscription,
}

impl OperationType {
    /// The keyword spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// The conventional root type name.
    #[must_use]
    pub const fn default_type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

/// Type definitions.
#[derive(Debug, Clone)]
pub enum TypeDefinition<'a> {
    Object(ObjectTypeDefinition<'a>),
    Interface(InterfaceTypeDefinition<'a>),
    Union(UnionTypeDefinition<'a>),
    Enum(EnumTypeDefinition<'a>),
    Input(InputObjectTypeDefinition<'a>),
    Scalar(ScalarTypeDefinition<'a>),
}

impl TypeDefinition<'_> {
    /// The declared name.
    #[must_use]
    pub fn name(&self) -> Name {
        match self {
            Self::Object(def) => def.name,
            Self::Interface(def) => def.name,
            Self::Union(def) => def.name,
            Self::Enum(def) => def.name,
            Self::Input(def) => def.name,
            Self::Scalar(def) => def.name,
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Object(def) => def.span,
            Self::Interface(def) => def.span,
            Self::Union(def) => def.span,
            Self::Enum(def) => def.span,
            Self::Input(def) => def.span,
            Self::Scalar(def) => def.span,
        }
    }

    /// The SDL keyword that introduces this kind of definition.
    #[must_use]
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Object(_) => "type",
            Self::Interface(_) => "interface",
            Self::Union(_) => "union",
            Self::Enum(_) => "enum",
            Self::Input(_) => "input",
            Self::Scalar(_) => "scalar",
        }
    }

    #[must_use]
    pub fn directives(&self) -> &[Directive<'_>] {
        match self {
            Self::Object(def) => &def.directives,
            Self::Interface(def) => &def.directives,
            Self::Union(def) => &def.directives,
            Self::Enum(def) => &def.directives,
            Self::Input(def) => &def.directives,
            Self::Scalar(def) => &def.directives,
        }
    }
}

/// Object type definition.
#[derive(Debug, Clone)]
pub struct ObjectTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub implements: Vec<Name>,
    pub directives: Vec<Directive<'a>>,
    pub fields: Vec<FieldDefinition<'a>>,
    pub span: Span,
}

/// Interface type definition.
#[derive(Debug, Clone)]
pub struct InterfaceTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub implements: Vec<Name>,
    pub directives: Vec<Directive<'a>>,
    pub fields: Vec<FieldDefinition<'a>>,
    pub span: Span,
}

/// Union type definition.
#[derive(Debug, Clone)]
pub struct UnionTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub members: Vec<Name>,
    pub span: Span,
}

/// Enum type definition.
#[derive(Debug, Clone)]
pub struct EnumTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub values: Vec<EnumValueDefinition<'a>>,
    pub span: Span,
}

/// Enum value definition.
#[derive(Debug, Clone)]
pub struct EnumValueDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Input object type definition.
#[derive(Debug, Clone)]
pub struct InputObjectTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub fields: Vec<InputValueDefinition<'a>>,
    pub span: Span,
}

/// Scalar type definition.
#[derive(Debug, Clone)]
pub struct ScalarTypeDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Field definition.
#[derive(Debug, Clone)]
pub struct FieldDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition<'a>>,
    pub ty: Type,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Input value definition (arguments, input fields).
#[derive(Debug, Clone)]
pub struct InputValueDefinition<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value<'a>>,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Named type: `User`
    Named(NamedType),
    /// List type: `[User]`
    List(Box<Type>, Span),
    /// Non-null type: `User!`
    NonNull(Box<Type>, Span),
}

impl Type {
    /// The innermost named type.
    #[must_use]
    pub fn named_type(&self) -> &NamedType {
        match self {
            Self::Named(named) => named,
            Self::List(inner, _) | Self::NonNull(inner, _) => inner.named_type(),
        }
    }

    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Named(named) => named.span,
            Self::List(_, span) | Self::NonNull(_, span) => *span,
        }
    }
}

/// Named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedType {
    pub name: Text,
    pub span: Span,
}

/// Directive definition.
#[derive(Debug, Clone)]
pub struct DirectiveDefinitionNode<'a> {
    pub description: Option<Description>,
    pub name: Name,
    pub arguments: Vec<InputValueDefinition<'a>>,
    pub repeatable: bool,
    pub locations: Vec<DirectiveLocation>,
    pub span: Span,
}

/// Directive usage.
#[derive(Debug, Clone)]
pub struct Directive<'a> {
    pub name: Name,
    pub arguments: Vec<Argument<'a>>,
    pub span: Span,
}

/// Argument.
#[derive(Debug, Clone)]
pub struct Argument<'a> {
    pub name: Name,
    pub value: Value<'a>,
    pub span: Span,
}

/// Operation definition.
#[derive(Debug, Clone)]
pub struct OperationDefinition<'a> {
    pub operation: OperationType,
    pub name: Option<Name>,
    pub variables: Vec<VariableDefinition<'a>>,
    pub directives: Vec<Directive<'a>>,
    pub selection_set: SelectionSet<'a>,
    pub span: Span,
}

/// Variable definition.
#[derive(Debug, Clone)]
pub struct VariableDefinition<'a> {
    pub name: Name,
    pub ty: Type,
    pub default_value: Option<Value<'a>>,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Fragment definition.
#[derive(Debug, Clone)]
pub struct FragmentDefinition<'a> {
    pub name: Name,
    pub type_condition: Name,
    pub directives: Vec<Directive<'a>>,
    pub selection_set: SelectionSet<'a>,
    pub span: Span,
}

/// Selection set.
#[derive(Debug, Clone)]
pub struct SelectionSet<'a> {
    pub selections: Vec<Selection<'a>>,
    pub span: Span,
}

/// Selection.
#[derive(Debug, Clone)]
pub enum Selection<'a> {
    Field(FieldSelection<'a>),
    FragmentSpread(FragmentSpread<'a>),
    InlineFragment(InlineFragment<'a>),
}

/// Field selection.
#[derive(Debug, Clone)]
pub struct FieldSelection<'a> {
    pub alias: Option<Name>,
    pub name: Name,
    pub arguments: Vec<Argument<'a>>,
    pub directives: Vec<Directive<'a>>,
    pub selection_set: Option<SelectionSet<'a>>,
    pub span: Span,
}

/// Fragment spread.
#[derive(Debug, Clone)]
pub struct FragmentSpread<'a> {
    pub name: Name,
    pub directives: Vec<Directive<'a>>,
    pub span: Span,
}

/// Inline fragment.
#[derive(Debug, Clone)]
pub struct InlineFragment<'a> {
    pub type_condition: Option<Name>,
    pub directives: Vec<Directive<'a>>,
    pub selection_set: SelectionSet<'a>,
    pub span: Span,
}

/// Value.
///
/// Numbers keep their source text so that no precision is lost before the
/// declared type is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Variable(Name),
    Int(&'a str, Span),
    Float(&'a str, Span),
    String(String, Span),
    Boolean(bool, Span),
    Null(Span),
    Enum(Name),
    List(Vec<Value<'a>>, Span),
    Object(Vec<(Name, Value<'a>)>, Span),
}

impl Value<'_> {
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Variable(name) | Self::Enum(name) => name.span,
            Self::Int(_, span)
            | Self::Float(_, span)
            | Self::String(_, span)
            | Self::Boolean(_, span)
            | Self::Null(span)
            | Self::List(_, span)
            | Self::Object(_, span) => *span,
        }
    }
}

/// Name with span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name {
    pub value: Text,
    pub span: Span,
}

impl Name {
    pub fn new(value: Text, span: Span) -> Self {
        Self { value, span }
    }
}

/// Description (documentation string), already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub value: String,
    pub span: Span,
}

impl Description {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        Self {
            value: value.into(),
            span,
        }
    }
}
