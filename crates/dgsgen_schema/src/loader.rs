//! Loading SDL sources into one merged [`SchemaDocument`].
//!
//! Every source is parsed on its own. Base declarations from all sources are
//! registered first; extensions are folded in afterwards in source order, so the
//! relative order of a base and its extensions across documents does not matter.

use crate::types::{TypeKind, TypeRef};
use crate::value::ConstValue;
use dgsgen_core::{CodegenError, Interner, Result, Span};
use dgsgen_syntax::{
    self as syntax, Definition, Directive, EnumValueDefinition, FieldDefinition,
    InputValueDefinition, OperationType, SchemaDefinition, TypeDefinition, Value,
};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// One SDL text with the name used in error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdlSource {
    pub name: String,
    pub text: String,
}

impl SdlSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// All type declarations of a schema with extensions folded in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaDocument {
    /// Declarations keyed by name, in first-declaration order.
    pub types: IndexMap<String, TypeDecl>,
    /// Root operation types from `schema { ... }`, if one was declared.
    pub schema: Option<SchemaDecl>,
}

/// Root operation type names from a `schema` definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDecl {
    pub operations: IndexMap<OperationType, String>,
}

/// A type declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub implements: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub members: Vec<String>,
    pub values: Vec<EnumValueDecl>,
    pub directives: Vec<DirectiveUse>,
}

/// A field of an object, interface or input declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef<String>,
    pub arguments: Vec<InputValueDecl>,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<DirectiveUse>,
}

/// An argument declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct InputValueDecl {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef<String>,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<DirectiveUse>,
}

/// An enum value declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValueDecl {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<DirectiveUse>,
}

/// A directive applied to a declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUse {
    pub name: String,
    pub arguments: Vec<(String, ConstValue)>,
}

impl DirectiveUse {
    /// Looks up an argument by name.
    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ConstValue> {
        self.arguments
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }
}

/// Looks up a directive by name.
#[must_use]
pub fn find_directive<'d>(directives: &'d [DirectiveUse], name: &str) -> Option<&'d DirectiveUse> {
    directives.iter().find(|d| d.name == name)
}

/// Parses and merges the given sources.
pub fn load(sources: &[SdlSource]) -> Result<SchemaDocument> {
    let mut document = SchemaDocument::default();
    let mut extensions = Vec::new();
    let mut schema_extensions = Vec::new();

    for source in sources {
        let parsed = parse_source(source)?;
        for decl in parsed.types {
            document.add_type(decl)?;
        }
        if let Some(schema) = parsed.schema {
            if document.schema.is_some() {
                return Err(CodegenError::merge("schema", "schema is defined more than once"));
            }
            document.schema = Some(schema);
        }
        extensions.extend(parsed.type_extensions);
        schema_extensions.extend(parsed.schema_extensions);
    }

    for extension in extensions {
        document.extend_type(extension)?;
    }
    for extension in schema_extensions {
        document.extend_schema(extension)?;
    }

    Ok(document)
}

impl SchemaDocument {
    /// Looks up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDecl> {
        self.types.get(name)
    }

    fn add_type(&mut self, decl: TypeDecl) -> Result<()> {
        if self.types.contains_key(&decl.name) {
            return Err(CodegenError::merge(
                &decl.name,
                "type is declared more than once",
            ));
        }
        decl.check_unique_members()?;
        self.types.insert(decl.name.clone(), decl);
        Ok(())
    }

    fn extend_type(&mut self, extension: TypeDecl) -> Result<()> {
        let Some(base) = self.types.get_mut(&extension.name) else {
            return Err(CodegenError::merge(
                &extension.name,
                format!(
                    "`extend {}` targets a type that is not declared",
                    extension.kind.keyword()
                ),
            ));
        };
        if base.kind != extension.kind {
            return Err(CodegenError::merge(
                &extension.name,
                format!(
                    "cannot apply `extend {}` to a `{}` declaration",
                    extension.kind.keyword(),
                    base.kind.keyword()
                ),
            ));
        }

        base.implements.extend(extension.implements);
        base.fields.extend(extension.fields);
        base.members.extend(extension.members);
        base.values.extend(extension.values);
        base.directives.extend(extension.directives);
        base.check_unique_members()
    }

    fn extend_schema(&mut self, extension: SchemaDecl) -> Result<()> {
        let schema = self.schema.get_or_insert_with(SchemaDecl::default);
        for (operation, type_name) in extension.operations {
            if schema.operations.contains_key(&operation) {
                return Err(CodegenError::merge(
                    "schema",
                    format!("root `{}` type is defined more than once", operation.as_str()),
                ));
            }
            schema.operations.insert(operation, type_name);
        }
        Ok(())
    }
}

impl TypeDecl {
    fn check_unique_members(&self) -> Result<()> {
        let what = match self.kind {
            TypeKind::Input => "input field",
            _ => "field",
        };
        unique(&self.name, what, self.fields.iter().map(|f| f.name.as_str()))?;
        unique(&self.name, "enum value", self.values.iter().map(|v| v.name.as_str()))?;
        unique(&self.name, "union member", self.members.iter().map(String::as_str))?;
        unique(&self.name, "interface", self.implements.iter().map(String::as_str))?;
        for field in &self.fields {
            unique(
                &format!("{}.{}", self.name, field.name),
                "argument",
                field.arguments.iter().map(|a| a.name.as_str()),
            )?;
        }
        Ok(())
    }
}

fn unique<'n>(owner: &str, what: &str, names: impl Iterator<Item = &'n str>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for name in names {
        if !seen.insert(name) {
            return Err(CodegenError::merge(
                owner,
                format!("duplicate {what} `{name}`"),
            ));
        }
    }
    Ok(())
}

/// The declarations of one source before merging.
struct ParsedSource {
    types: Vec<TypeDecl>,
    type_extensions: Vec<TypeDecl>,
    schema: Option<SchemaDecl>,
    schema_extensions: Vec<SchemaDecl>,
}

fn parse_source(source: &SdlSource) -> Result<ParsedSource> {
    let interner = Interner::new();
    let result = syntax::parse(&source.text, &interner);
    if let Some(error) = result.diagnostics.first_error() {
        return Err(CodegenError::parse(
            &source.name,
            &source.text,
            error.primary_span().unwrap_or(Span::empty(0)),
            error.primary_message(),
        ));
    }

    let lower = Lowering {
        source,
        interner: &interner,
    };
    let mut parsed = ParsedSource {
        types: Vec::new(),
        type_extensions: Vec::new(),
        schema: None,
        schema_extensions: Vec::new(),
    };

    for definition in &result.document.definitions {
        match definition {
            Definition::Type(def) => parsed.types.push(lower.type_decl(def)?),
            Definition::TypeExtension(def) => parsed.type_extensions.push(lower.type_decl(def)?),
            Definition::Schema(def) => {
                if parsed.schema.is_some() {
                    return Err(CodegenError::merge("schema", "schema is defined more than once"));
                }
                parsed.schema = Some(lower.schema_decl(def)?);
            }
            Definition::SchemaExtension(def) => {
                parsed.schema_extensions.push(lower.schema_decl(def)?);
            }
            // Directive definitions and executable definitions do not produce code.
            Definition::Directive(_) | Definition::Operation(_) | Definition::Fragment(_) => {}
        }
    }

    Ok(parsed)
}

/// Converts interned AST nodes into owned declarations.
struct Lowering<'s> {
    source: &'s SdlSource,
    interner: &'s Interner,
}

impl Lowering<'_> {
    fn name(&self, name: &syntax::Name) -> String {
        self.interner.get(name.value)
    }

    fn type_decl(&self, def: &TypeDefinition<'_>) -> Result<TypeDecl> {
        let mut decl = TypeDecl {
            name: self.name(&def.name()),
            kind: TypeKind::Scalar,
            description: None,
            implements: Vec::new(),
            fields: Vec::new(),
            members: Vec::new(),
            values: Vec::new(),
            directives: self.directives(def.directives())?,
        };

        match def {
            TypeDefinition::Object(object) => {
                decl.kind = TypeKind::Object;
                decl.description = object.description.as_ref().map(|d| d.value.clone());
                decl.implements = object.implements.iter().map(|n| self.name(n)).collect();
                decl.fields = self.fields(&object.fields)?;
            }
            TypeDefinition::Interface(interface) => {
                decl.kind = TypeKind::Interface;
                decl.description = interface.description.as_ref().map(|d| d.value.clone());
                decl.implements = interface.implements.iter().map(|n| self.name(n)).collect();
                decl.fields = self.fields(&interface.fields)?;
            }
            TypeDefinition::Union(union) => {
                decl.kind = TypeKind::Union;
                decl.description = union.description.as_ref().map(|d| d.value.clone());
                decl.members = union.members.iter().map(|n| self.name(n)).collect();
            }
            TypeDefinition::Enum(enumeration) => {
                decl.kind = TypeKind::Enum;
                decl.description = enumeration.description.as_ref().map(|d| d.value.clone());
                decl.values = enumeration
                    .values
                    .iter()
                    .map(|v| self.enum_value(v))
                    .collect::<Result<_>>()?;
            }
            TypeDefinition::Input(input) => {
                decl.kind = TypeKind::Input;
                decl.description = input.description.as_ref().map(|d| d.value.clone());
                decl.fields = input
                    .fields
                    .iter()
                    .map(|f| self.input_field(f))
                    .collect::<Result<_>>()?;
            }
            TypeDefinition::Scalar(scalar) => {
                decl.description = scalar.description.as_ref().map(|d| d.value.clone());
            }
        }

        Ok(decl)
    }

    fn schema_decl(&self, def: &SchemaDefinition<'_>) -> Result<SchemaDecl> {
        let mut schema = SchemaDecl::default();
        for operation in &def.operations {
            if schema.operations.contains_key(&operation.operation) {
                return Err(CodegenError::parse(
                    &self.source.name,
                    &self.source.text,
                    operation.span,
                    format!(
                        "root `{}` type is defined more than once",
                        operation.operation.as_str()
                    ),
                ));
            }
            schema
                .operations
                .insert(operation.operation, self.name(&operation.type_name));
        }
        Ok(schema)
    }

    fn fields(&self, fields: &[FieldDefinition<'_>]) -> Result<Vec<FieldDecl>> {
        fields
            .iter()
            .map(|field| {
                Ok(FieldDecl {
                    name: self.name(&field.name),
                    description: field.description.as_ref().map(|d| d.value.clone()),
                    ty: self.type_ref(&field.ty),
                    arguments: field
                        .arguments
                        .iter()
                        .map(|a| self.input_value(a))
                        .collect::<Result<_>>()?,
                    default_value: None,
                    directives: self.directives(&field.directives)?,
                })
            })
            .collect()
    }

    fn input_field(&self, field: &InputValueDefinition<'_>) -> Result<FieldDecl> {
        let value = self.input_value(field)?;
        Ok(FieldDecl {
            name: value.name,
            description: value.description,
            ty: value.ty,
            arguments: Vec::new(),
            default_value: value.default_value,
            directives: value.directives,
        })
    }

    fn input_value(&self, value: &InputValueDefinition<'_>) -> Result<InputValueDecl> {
        Ok(InputValueDecl {
            name: self.name(&value.name),
            description: value.description.as_ref().map(|d| d.value.clone()),
            ty: self.type_ref(&value.ty),
            default_value: value
                .default_value
                .as_ref()
                .map(|v| self.const_value(v))
                .transpose()?,
            directives: self.directives(&value.directives)?,
        })
    }

    fn enum_value(&self, value: &EnumValueDefinition<'_>) -> Result<EnumValueDecl> {
        Ok(EnumValueDecl {
            name: self.name(&value.name),
            description: value.description.as_ref().map(|d| d.value.clone()),
            directives: self.directives(&value.directives)?,
        })
    }

    fn type_ref(&self, ty: &syntax::Type) -> TypeRef<String> {
        match ty {
            syntax::Type::Named(named) => TypeRef::named(self.interner.get(named.name)),
            syntax::Type::List(item, _) => TypeRef::list(self.type_ref(item)),
            syntax::Type::NonNull(inner, _) => self.type_ref(inner).non_null(),
        }
    }

    fn directives(&self, directives: &[Directive<'_>]) -> Result<Vec<DirectiveUse>> {
        directives
            .iter()
            .map(|directive| {
                Ok(DirectiveUse {
                    name: self.name(&directive.name),
                    arguments: directive
                        .arguments
                        .iter()
                        .map(|arg| Ok((self.name(&arg.name), self.const_value(&arg.value)?)))
                        .collect::<Result<_>>()?,
                })
            })
            .collect()
    }

    fn const_value(&self, value: &Value<'_>) -> Result<ConstValue> {
        Ok(match value {
            Value::Variable(name) => {
                return Err(CodegenError::parse(
                    &self.source.name,
                    &self.source.text,
                    name.span,
                    "variables are not allowed in constant values",
                ));
            }
            Value::Int(text, _) => ConstValue::Int((*text).to_string()),
            Value::Float(text, _) => ConstValue::Float((*text).to_string()),
            Value::String(s, _) => ConstValue::String(s.clone()),
            Value::Boolean(b, _) => ConstValue::Boolean(*b),
            Value::Null(_) => ConstValue::Null,
            Value::Enum(name) => ConstValue::Enum(self.name(name)),
            Value::List(items, _) => ConstValue::List(
                items
                    .iter()
                    .map(|item| self.const_value(item))
                    .collect::<Result<_>>()?,
            ),
            Value::Object(fields, _) => ConstValue::Object(
                fields
                    .iter()
                    .map(|(name, value)| Ok((self.name(name), self.const_value(value)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}
