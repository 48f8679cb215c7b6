//! Core utilities for dgsgen.
//!
//! This crate provides foundational types used throughout the generator:
//! - `span`: Source location tracking
//! - `text`: String interning
//! - `diagnostics`: Parser diagnostics
//! - `error`: The terminal error taxonomy of a generation run

pub mod diagnostics;
pub mod error;
pub mod span;
pub mod text;

pub use diagnostics::{Diagnostic, DiagnosticBag, DiagnosticSeverity, Label};
pub use error::{CodegenError, Result};
pub use span::{LineIndex, Location, Span};
pub use text::{Interner, Text};
