//! Type graph nodes.

use crate::federation::KeyField;
use crate::value::DefaultValue;
use std::fmt;

/// Index of a type in the [`TypeGraph`](crate::TypeGraph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Creates a `TypeId` from a raw value.
    pub const fn from_raw(value: u32) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// Returns the index into the graph's node table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The kind of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Enum,
    Input,
    Scalar,
}

impl TypeKind {
    /// The SDL keyword for this kind.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Object => "type",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Input => "input",
            Self::Scalar => "scalar",
        }
    }

    /// Objects, interfaces and unions: types that are selected with a sub-selection.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }

    /// Interfaces and unions.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }

    /// Types allowed in argument and input field positions.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::Enum | Self::Scalar)
    }
}

/// A type reference such as `[[String!]]!`.
///
/// Declarations carry the base type by name; the graph carries it by [`TypeId`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef<T = TypeId> {
    Named { base: T, nullable: bool },
    List { item: Box<TypeRef<T>>, nullable: bool },
}

impl<T> TypeRef<T> {
    /// A nullable named reference.
    pub fn named(base: T) -> Self {
        Self::Named {
            base,
            nullable: true,
        }
    }

    /// A nullable list of `item`.
    pub fn list(item: TypeRef<T>) -> Self {
        Self::List {
            item: Box::new(item),
            nullable: true,
        }
    }

    /// Marks this reference non-null.
    #[must_use]
    pub fn non_null(self) -> Self {
        match self {
            Self::Named { base, .. } => Self::Named {
                base,
                nullable: false,
            },
            Self::List { item, .. } => Self::List {
                item,
                nullable: false,
            },
        }
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Named { nullable, .. } | Self::List { nullable, .. } => *nullable,
        }
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List { .. })
    }

    /// The innermost named type.
    pub fn base(&self) -> &T {
        match self {
            Self::Named { base, .. } => base,
            Self::List { item, .. } => item.base(),
        }
    }

    /// The element type of a list reference.
    pub fn item(&self) -> Option<&TypeRef<T>> {
        match self {
            Self::List { item, .. } => Some(item),
            Self::Named { .. } => None,
        }
    }

    /// Number of list wrappers.
    pub fn list_depth(&self) -> usize {
        match self {
            Self::Named { .. } => 0,
            Self::List { item, .. } => 1 + item.list_depth(),
        }
    }

    /// Rebuilds the reference with a different base, failing on the first error.
    pub fn try_map<U, E>(&self, f: &mut impl FnMut(&T) -> Result<U, E>) -> Result<TypeRef<U>, E> {
        Ok(match self {
            Self::Named { base, nullable } => TypeRef::Named {
                base: f(base)?,
                nullable: *nullable,
            },
            Self::List { item, nullable } => TypeRef::List {
                item: Box::new(item.try_map(f)?),
                nullable: *nullable,
            },
        })
    }

    /// Renders the reference in SDL syntax using `name` for the base type.
    pub fn render(&self, name: &impl Fn(&T) -> String) -> String {
        let inner = match self {
            Self::Named { base, .. } => name(base),
            Self::List { item, .. } => format!("[{}]", item.render(name)),
        };
        if self.is_nullable() {
            inner
        } else {
            format!("{inner}!")
        }
    }
}

impl fmt::Display for TypeRef<String> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|name: &String| name.clone()))
    }
}

/// A type in the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeNode {
    pub id: TypeId,
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    /// Fields of objects, interfaces and inputs in declaration order.
    pub fields: Vec<FieldNode>,
    /// Directly implemented interfaces.
    pub interfaces: Vec<TypeId>,
    /// Union members.
    pub members: Vec<TypeId>,
    pub enum_values: Vec<EnumValueNode>,
    /// The target-language type this name is mapped to, if any.
    pub mapped: Option<String>,
    /// Built-in scalar (`String`, `Int`, `Float`, `Boolean`, `ID`).
    pub builtin: bool,
    /// Marked `@skipcodegen`.
    pub skip: bool,
    /// Merged `@key` selections of a federated entity; empty otherwise.
    pub keys: Vec<KeyField>,
}

impl TypeNode {
    /// Looks up a field by schema name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_mapped(&self) -> bool {
        self.mapped.is_some()
    }

    /// Whether the type is a federated entity.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        !self.keys.is_empty()
    }
}

/// A field of an object, interface or input type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentNode>,
    pub description: Option<String>,
    /// Default literal, input fields only.
    pub default_value: Option<DefaultValue>,
    pub deprecation: Option<String>,
    pub skip: bool,
}

/// An argument of a field.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentNode {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<DefaultValue>,
    pub description: Option<String>,
}

/// A value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueNode {
    pub name: String,
    pub description: Option<String>,
    pub deprecation: Option<String>,
}
