//! Name resolution for dgsgen.
//!
//! This crate provides:
//! - `casing`: Normalizing schema names to Java casing
//! - `reserved`: Escaping reserved words and undoing the escape
//! - `table`: The collision-checked identifier table emitters read from

pub mod casing;
pub mod reserved;
pub mod table;

pub use casing::{capitalize, decapitalize, lower_camel, shorten_class_name, shouty_snake, upper_camel};
pub use reserved::{desanitize, is_reserved, needs_escape, sanitize, TYPENAME};
pub use table::{class_name, field_names, identifier, resolve, unescape_identifier, FieldNames, NameTable, Scope};
