//! Schema model for dgsgen.
//!
//! This crate provides:
//! - `loader`: Parsing SDL sources and merging extensions
//! - `types`: Type graph nodes and type references
//! - `value`: Constant literals and resolved default values
//! - `graph`: The linked type graph
//! - `polymorphism`: Implementations, memberships and effective fields
//! - `federation`: Entity keys from `@key` directives

pub mod federation;
pub mod graph;
pub mod loader;
pub mod polymorphism;
pub mod types;
pub mod value;

pub use federation::{KeyField, KEY_DIRECTIVE};
pub use graph::{RootTypes, TypeGraph, TypeMapping, BUILTIN_SCALARS, SKIP_DIRECTIVE};
pub use loader::{load, SchemaDocument, SdlSource};
pub use polymorphism::{EffectiveField, Polymorphism};
pub use types::{ArgumentNode, EnumValueNode, FieldNode, TypeId, TypeKind, TypeNode, TypeRef};
pub use value::{ConstValue, DefaultValue};

use dgsgen_core::Result;

/// A fully resolved schema: the type graph and its polymorphism relations.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub graph: TypeGraph,
    pub polymorphism: Polymorphism,
}

impl Schema {
    /// Loads, merges and resolves the given sources.
    pub fn load(sources: &[SdlSource], mapping: &TypeMapping) -> Result<Self> {
        let document = load(sources)?;
        Self::from_document(&document, mapping)
    }

    /// Resolves an already merged document.
    pub fn from_document(document: &SchemaDocument, mapping: &TypeMapping) -> Result<Self> {
        let graph = TypeGraph::build(document, mapping)?;
        let polymorphism = Polymorphism::resolve(&graph)?;
        Ok(Self {
            graph,
            polymorphism,
        })
    }
}
