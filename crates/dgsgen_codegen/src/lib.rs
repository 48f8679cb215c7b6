//! Java code generation for GraphQL schemas.
//!
//! This crate turns a loaded schema into Java sources for a DGS service:
//! - data classes with builders for object and input types
//! - interfaces, unions and enums
//! - the `DgsConstants` class
//! - request classes and projections for the client API
//! - `_entities` projections and key representations for federated types
//! - datafetcher stubs for query fields
//!
//! # Example
//!
//! ```ignore
//! use dgsgen_codegen::{generate, CodeGenConfig};
//! use dgsgen_schema::SdlSource;
//!
//! let sources = [SdlSource::new("schema.graphqls", "type Query { hello: String }")];
//! let output = generate(&sources, &CodeGenConfig::new("com.example"))?;
//! for file in &output.files {
//!     println!("{}", file.path);
//! }
//! ```

pub mod config;
pub mod defaults;
pub mod emit;
pub mod generator;
pub mod java;
pub mod output;

pub use config::CodeGenConfig;
pub use generator::{generate, CodeGenerator};
pub use output::{CodeGenOutput, FileKind, GeneratedFile};
