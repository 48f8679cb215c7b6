//! Federation entity keys.
//!
//! A type with one or more `@key(fields: "...")` directives is an entity.
//! Each `fields` argument is a selection such as `id` or
//! `movie { id } actors { name }`; all keys of a type are merged into one
//! [`KeyField`] tree.

use crate::types::{TypeId, TypeKind};
use crate::TypeGraph;
use dgsgen_core::{CodegenError, Result};

/// Directive that marks a federated entity.
pub const KEY_DIRECTIVE: &str = "key";

/// A field named by an entity key, with the key fields selected below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyField {
    pub name: String,
    pub selection: Vec<KeyField>,
}

impl KeyField {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            selection: Vec::new(),
        }
    }
}

/// Parses and merges `@key` field selections. Repeated names merge their sub-selections.
pub fn parse_key_fields<'s>(type_name: &str, sources: impl IntoIterator<Item = &'s str>) -> Result<Vec<KeyField>> {
    let mut root = Vec::new();
    for source in sources {
        let tokens = tokenize(source);
        let mut pos = 0;
        parse_selection(type_name, source, &tokens, &mut pos, &mut root, false)?;
    }
    if root.is_empty() {
        return Err(CodegenError::merge(type_name, "`@key` selects no fields"));
    }
    Ok(root)
}

fn tokenize(source: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in source.char_indices() {
        let separator = c.is_whitespace() || c == ',';
        if separator || c == '{' || c == '}' {
            if let Some(s) = start.take() {
                tokens.push(&source[s..i]);
            }
            if !separator {
                tokens.push(&source[i..i + 1]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(&source[s..]);
    }
    tokens
}

fn parse_selection(
    type_name: &str,
    source: &str,
    tokens: &[&str],
    pos: &mut usize,
    into: &mut Vec<KeyField>,
    nested: bool,
) -> Result<()> {
    let unbalanced = || CodegenError::merge(type_name, format!("unbalanced braces in `@key(fields: \"{source}\")`"));
    while let Some(&token) = tokens.get(*pos) {
        *pos += 1;
        match token {
            "}" if nested => return Ok(()),
            "{" | "}" => return Err(unbalanced()),
            name => {
                let index = match into.iter().position(|field| field.name == name) {
                    Some(index) => index,
                    None => {
                        into.push(KeyField::new(name));
                        into.len() - 1
                    }
                };
                if tokens.get(*pos) == Some(&"{") {
                    *pos += 1;
                    parse_selection(type_name, source, tokens, pos, &mut into[index].selection, true)?;
                }
            }
        }
    }
    if nested {
        return Err(unbalanced());
    }
    Ok(())
}

/// Checks that every key field exists and that composite fields select sub-fields.
pub(crate) fn validate_keys(graph: &TypeGraph, id: TypeId, keys: &[KeyField]) -> Result<()> {
    let node = graph.get(id);
    for key in keys {
        let field = node.field(&key.name).ok_or_else(|| {
            CodegenError::merge(
                &node.name,
                format!("key field `{}` is not a field of `{}`", key.name, node.name),
            )
        })?;
        let target = graph.get(*field.ty.base());
        let composite = matches!(target.kind, TypeKind::Object | TypeKind::Interface);
        match (composite, key.selection.is_empty()) {
            (true, true) => {
                return Err(CodegenError::merge(
                    &node.name,
                    format!("key field `{}` of type `{}` must select its fields", key.name, target.name),
                ))
            }
            (false, false) => {
                return Err(CodegenError::merge(
                    &node.name,
                    format!("key field `{}` is a leaf and cannot select fields", key.name),
                ))
            }
            (true, false) => validate_keys(graph, target.id, &key.selection)?,
            (false, true) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(keys: &[KeyField]) -> Vec<&str> {
        keys.iter().map(|key| key.name.as_str()).collect()
    }

    #[test]
    fn test_simple_and_compound_keys() {
        let keys = parse_key_fields("Movie", ["id", "title, year"]).unwrap();
        assert_eq!(names(&keys), ["id", "title", "year"]);
        assert!(keys.iter().all(|key| key.selection.is_empty()));
    }

    #[test]
    fn test_nested_keys_merge() {
        let keys = parse_key_fields("Cast", ["movie { id } actors { name }", "movie{title}"]).unwrap();
        assert_eq!(names(&keys), ["movie", "actors"]);
        assert_eq!(names(&keys[0].selection), ["id", "title"]);
        assert_eq!(names(&keys[1].selection), ["name"]);
    }

    #[test]
    fn test_malformed_keys() {
        assert!(parse_key_fields("Movie", ["movie { id"]).is_err());
        assert!(parse_key_fields("Movie", ["id }"]).is_err());
        assert!(parse_key_fields("Movie", ["{ id }"]).is_err());
        assert!(parse_key_fields("Movie", [" "]).is_err());
    }
}
