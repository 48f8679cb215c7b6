//! Constant literals as written in SDL and default values resolved against the graph.

use crate::types::TypeId;
use std::fmt;

/// A constant literal as it appears in SDL, before its declared type is known.
///
/// Numbers keep their source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstValue {
    Null,
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum(String),
    List(Vec<ConstValue>),
    Object(Vec<(String, ConstValue)>),
}

impl ConstValue {
    /// A short description of the literal's shape for error messages.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::String(_) => "a string",
            Self::Boolean(_) => "a boolean",
            Self::Enum(_) => "an enum value",
            Self::List(_) => "a list",
            Self::Object(_) => "an object",
        }
    }
}

/// Writes the literal back in GraphQL syntax.
impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Int(text) | Self::Float(text) | Self::Enum(text) => f.write_str(text),
            Self::String(s) => dgsgen_syntax::strings::write_string(f, s),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// A default literal checked against its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Null,
    Int(String),
    Float(String),
    String(String),
    Boolean(bool),
    Enum {
        enum_type: TypeId,
        value: String,
    },
    List(Vec<DefaultValue>),
    /// An input object literal; only the fields written in the literal are present.
    Object {
        input_type: TypeId,
        fields: Vec<(String, DefaultValue)>,
    },
    /// A literal for a custom or mapped scalar, kept as written.
    Custom {
        scalar: TypeId,
        value: ConstValue,
    },
}

impl DefaultValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}
