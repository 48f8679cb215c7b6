//! The error taxonomy of a generation run.
//!
//! Every variant is terminal: a run either produces a complete artifact set or
//! one of these errors.

use crate::diagnostics::codes;
use crate::span::{LineIndex, Location, Span};
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T, E = CodegenError> = std::result::Result<T, E>;

/// An error that aborts code generation.
#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    /// Malformed SDL.
    #[error("{source_name}:{location}: {message}")]
    #[diagnostic(code(dgsgen::schema_parse))]
    SchemaParse {
        source_name: String,
        location: Location,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    /// An extension or declaration that cannot be folded into the schema.
    #[error("cannot merge `{type_name}`: {message}")]
    #[diagnostic(code(dgsgen::schema_merge))]
    SchemaMerge { type_name: String, message: String },

    /// A type reference that names no declared, built-in or mapped type.
    #[error("unknown type `{type_name}` referenced by `{field_path}`")]
    #[diagnostic(code(dgsgen::unresolved_type))]
    UnresolvedType {
        type_name: String,
        field_path: String,
    },

    /// A default literal whose shape does not match its declared type.
    #[error("invalid default value for `{field_path}`: {message}")]
    #[diagnostic(code(dgsgen::invalid_default_value))]
    InvalidDefaultValue { field_path: String, message: String },

    /// Two schema entities that resolve to the same generated identifier.
    #[error("`{first}` and `{second}` both resolve to the generated identifier `{identifier}`")]
    #[diagnostic(
        code(dgsgen::name_collision),
        help("rename one of them or map it to an existing type")
    )]
    NameCollision {
        identifier: String,
        first: String,
        second: String,
    },
}

impl CodegenError {
    /// Creates a parse error, resolving the span to a line and column.
    pub fn parse(
        source_name: impl Into<String>,
        source_text: &str,
        span: Span,
        message: impl Into<String>,
    ) -> Self {
        let source_name = source_name.into();
        let location = LineIndex::new(source_text).location(span.start);
        Self::SchemaParse {
            src: NamedSource::new(source_name.clone(), source_text.to_string()),
            source_name,
            location,
            message: message.into(),
            span: span.into(),
        }
    }

    /// Creates a merge error.
    pub fn merge(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaMerge {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Creates an unresolved type error.
    pub fn unresolved(type_name: impl Into<String>, field_path: impl Into<String>) -> Self {
        Self::UnresolvedType {
            type_name: type_name.into(),
            field_path: field_path.into(),
        }
    }

    /// Creates an invalid default value error.
    pub fn invalid_default(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDefaultValue {
            field_path: field_path.into(),
            message: message.into(),
        }
    }

    /// Creates a name collision error.
    pub fn collision(
        identifier: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Self {
        Self::NameCollision {
            identifier: identifier.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Returns the diagnostic code shared with the parser's diagnostic bag.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SchemaParse { .. } => codes::INVALID_SYNTAX,
            Self::SchemaMerge { .. } => codes::SCHEMA_MERGE,
            Self::UnresolvedType { .. } => codes::UNRESOLVED_TYPE,
            Self::InvalidDefaultValue { .. } => codes::INVALID_DEFAULT_VALUE,
            Self::NameCollision { .. } => codes::NAME_COLLISION,
        }
    }
}
