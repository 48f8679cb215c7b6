//! Decoding and encoding of quoted and block string literals.

use std::fmt;

/// An escape sequence that does not name a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidEscape {
    /// Byte offset of the backslash within the literal's contents.
    pub offset: usize,
}

/// Decodes the contents of a `"..."` literal (without the quotes).
pub fn decode_string(raw: &str) -> Result<String, InvalidEscape> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let invalid = InvalidEscape { offset };
        let Some((_, escaped)) = chars.next() else {
            return Err(invalid);
        };
        match escaped {
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let code = if chars.peek().is_some_and(|&(_, c)| c == '{') {
                    chars.next();
                    let mut digits = String::new();
                    loop {
                        match chars.next() {
                            Some((_, '}')) => break,
                            Some((_, d)) if d.is_ascii_hexdigit() && digits.len() < 6 => {
                                digits.push(d);
                            }
                            _ => return Err(invalid),
                        }
                    }
                    u32::from_str_radix(&digits, 16).map_err(|_| invalid)?
                } else {
                    let high = read_hex4(&mut chars).ok_or(invalid)?;
                    if (0xD800..0xDC00).contains(&high) {
                        // A leading surrogate must be followed by `\uXXXX` naming the trailing half.
                        let rest: String = chars.clone().take(6).map(|(_, c)| c).collect();
                        if !rest.starts_with("\\u") {
                            return Err(invalid);
                        }
                        chars.next();
                        chars.next();
                        let low = read_hex4(&mut chars).ok_or(invalid)?;
                        if !(0xDC00..0xE000).contains(&low) {
                            return Err(invalid);
                        }
                        0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                    } else {
                        high
                    }
                };
                out.push(char::from_u32(code).ok_or(invalid)?);
            }
            _ => return Err(invalid),
        }
    }

    Ok(out)
}

/// Writes `value` as a quoted GraphQL string literal.
///
/// The output decodes back to `value` with [`decode_string`].
pub fn write_string(out: &mut impl fmt::Write, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            c if c.is_control() => write!(out, "\\u{:04X}", u32::from(c))?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Returns `value` as a quoted GraphQL string literal.
#[must_use]
pub fn encode_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    let _ = write_string(&mut out, value);
    out
}

fn read_hex4(chars: &mut impl Iterator<Item = (usize, char)>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        let (_, c) = chars.next()?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}

/// Computes the value of a `"""..."""` literal's contents (without the quotes).
///
/// Escaped triple quotes are restored, the common indentation of every line
/// after the first is removed, and leading and trailing blank lines are dropped.
pub fn block_string_value(raw: &str) -> String {
    let raw = raw.replace("\\\"\"\"", "\"\"\"");
    let lines: Vec<&str> = raw
        .split("\r\n")
        .flat_map(|chunk| chunk.split(['\n', '\r']))
        .collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let indent = leading_whitespace(line);
            (indent < line.len()).then_some(indent)
        })
        .min();

    let mut dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| match common_indent {
            Some(indent) if i > 0 => line.get(indent..).unwrap_or(""),
            _ => line,
        })
        .collect();

    while dedented.first().is_some_and(|l| is_blank(l)) {
        dedented.remove(0);
    }
    while dedented.last().is_some_and(|l| is_blank(l)) {
        dedented.pop();
    }

    dedented.join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}

fn is_blank(line: &str) -> bool {
    leading_whitespace(line) == line.len()
}
