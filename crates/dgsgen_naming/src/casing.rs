//! Casing normalization.
//!
//! Leading underscores are kept as written. Names that are already in the
//! target casing are returned unchanged, so `URLInfo` stays `URLInfo` while
//! `person_info` becomes `PersonInfo`.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};

fn split_leading_underscores(name: &str) -> (&str, &str) {
    let body = name.trim_start_matches('_');
    (&name[..name.len() - body.len()], body)
}

fn needs_word_split(body: &str) -> bool {
    body.contains(['_', '-', ' '])
}

/// Normalizes a type name to UpperCamelCase.
#[must_use]
pub fn upper_camel(name: &str) -> String {
    let (prefix, body) = split_leading_underscores(name);
    if body.is_empty() {
        return name.to_string();
    }
    if needs_word_split(body) {
        return format!("{prefix}{}", body.to_upper_camel_case());
    }
    format!("{prefix}{}", capitalize(body))
}

/// Normalizes a field or argument name to lowerCamelCase.
#[must_use]
pub fn lower_camel(name: &str) -> String {
    let (prefix, body) = split_leading_underscores(name);
    if body.is_empty() {
        return name.to_string();
    }
    if needs_word_split(body) {
        return format!("{prefix}{}", body.to_lower_camel_case());
    }
    format!("{prefix}{}", decapitalize(body))
}

/// Converts a name to SCREAMING_SNAKE_CASE.
#[must_use]
pub fn shouty_snake(name: &str) -> String {
    let (prefix, body) = split_leading_underscores(name);
    format!("{prefix}{}", body.to_shouty_snake_case())
}

/// Upper-cases the first character.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-cases the first character, or the whole leading run of capitals
/// when it is an acronym (`URLPath` → `urlPath`, `ID` → `id`).
#[must_use]
pub fn decapitalize(s: &str) -> String {
    let len = s.chars().count();
    let lower_until = match s.chars().take_while(|c| c.is_uppercase()).count() {
        0 => return s.to_string(),
        1 => 1,
        n if n == len => n,
        // Keep the capital that starts the next word.
        n => n - 1,
    };

    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        if i < lower_until {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Shortens a class name by keeping the first two characters of every
/// camel-case word; underscores are kept as separators.
///
/// `ThisIsATest` becomes `ThIsATe`, `This_Is_A_Test` becomes `Th_Is_A_Te`.
#[must_use]
pub fn shorten_class_name(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut short = String::new();
            let mut taken = 0;
            for c in part.chars() {
                if c.is_uppercase() {
                    taken = 0;
                }
                if taken < 2 {
                    short.push(c);
                    taken += 1;
                }
            }
            short
        })
        .collect::<Vec<_>>()
        .join("_")
}
