//! Reserved identifiers and their escaping.
//!
//! Escaping prefixes `_`. A name that starts with `_` and whose remainder
//! would be escaped is escaped as well, so the mapping stays injective and
//! [`desanitize`] can always undo [`sanitize`].

/// Java keywords and literals.
pub const JAVA_RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
    "_",
];

/// Members of the generated projection base classes.
pub const RUNTIME_RESERVED: &[&str] = &["parent", "root"];

/// The introspection field every projection exposes.
pub const TYPENAME: &str = "__typename";

/// Returns true if `name` cannot be used as a generated identifier as is.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name == TYPENAME || JAVA_RESERVED.contains(&name) || RUNTIME_RESERVED.contains(&name)
}

/// Returns true if [`sanitize`] would prefix `name`.
#[must_use]
pub fn needs_escape(name: &str) -> bool {
    is_reserved(name) || name.strip_prefix('_').is_some_and(needs_escape)
}

/// Escapes a name for use as an identifier.
#[must_use]
pub fn sanitize(name: &str) -> String {
    if needs_escape(name) {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Inverse of [`sanitize`].
#[must_use]
pub fn desanitize(identifier: &str) -> &str {
    match identifier.strip_prefix('_') {
        Some(rest) if needs_escape(rest) => rest,
        _ => identifier,
    }
}
