//! Conversion between [`Value`]s and the strings shown in a property row.
//!
//! Structural values (objects, arrays, patterns) are written as JSON with
//! single-quoted strings so the text can sit inside a double-quoted HTML
//! attribute untouched.

use std::fmt;

use crate::core::value::{BigInt, Value};

pub const NULL_MARKER: &str = "null";
pub const BIGINT_SUFFIX: char = 'n';
pub const STRUCTURAL_QUOTE: char = '\'';

pub fn encode(value: &Value) -> String {
    match value {
        Value::Null | Value::Opaque(_) => NULL_MARKER.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::BigInt(big) => format!("{big}{BIGINT_SUFFIX}"),
        Value::Text(text) => encode_text(text),
        Value::Pattern(_) | Value::List(_) | Value::Object(_) => {
            requote(&value.to_json().to_string(), STRUCTURAL_QUOTE)
        }
    }
}

/// Plain text stays bare unless it would decode as something else; then it
/// is written as a single-quoted string literal.
fn encode_text(text: &str) -> String {
    match decode(text) {
        Ok(Value::Text(decoded)) if decoded == text => text.to_string(),
        _ => requote(&serde_json::Value::from(text).to_string(), STRUCTURAL_QUOTE),
    }
}

/// Decodes a row string. Only a malformed structural literal fails; any
/// other text that matches no literal rule comes back as [`Value::Text`].
pub fn decode(text: &str) -> Result<Value, DecodeError> {
    let value = text.trim();

    if let Some(n) = parse_number(value) {
        return Ok(Value::Number(n));
    }
    if let Some(big) = value.strip_suffix(BIGINT_SUFFIX).and_then(BigInt::parse) {
        return Ok(Value::BigInt(big));
    }
    if value.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if value.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if value.eq_ignore_ascii_case(NULL_MARKER) {
        return Ok(Value::Null);
    }

    if is_structural_literal(value) {
        let json = serde_json::from_str::<serde_json::Value>(&requote(value, '"'))
            .map_err(|err| DecodeError::new(value, err.to_string()))?;
        return Ok(Value::from_json(json));
    }

    if value.starts_with(['"', '\''])
        && let Ok(serde_json::Value::String(inner)) = serde_json::from_str(&requote(value, '"'))
    {
        return Ok(Value::Text(inner));
    }

    Ok(Value::Text(value.to_string()))
}

pub fn is_structural_literal(text: &str) -> bool {
    text.trim_start().starts_with(['{', '['])
}

pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{n}")
}

/// Whole-string decimal literal, `Infinity` or `NaN`.
fn parse_number(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let negative = text.starts_with('-');
    match unsigned {
        "Infinity" => {
            return Some(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            });
        }
        "NaN" if unsigned.len() == text.len() => return Some(f64::NAN),
        _ => {}
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }
    text.parse::<f64>().ok()
}

fn is_decimal_literal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut idx = 0;
    let count_digits = |idx: &mut usize| {
        let start = *idx;
        while bytes.get(*idx).is_some_and(u8::is_ascii_digit) {
            *idx += 1;
        }
        *idx - start
    };

    let int_digits = count_digits(&mut idx);
    let mut frac_digits = 0;
    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        frac_digits = count_digits(&mut idx);
    }
    if int_digits + frac_digits == 0 {
        return false;
    }
    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        if matches!(bytes.get(idx), Some(b'+' | b'-')) {
            idx += 1;
        }
        if count_digits(&mut idx) == 0 {
            return false;
        }
    }
    idx == bytes.len()
}

/// Rewrites every string token so it is delimited by `to`.
///
/// Either quote character opens a string. Inside a string, an escaped quote
/// is unescaped and any raw occurrence of `to` is escaped. Other escape
/// sequences pass through untouched.
pub fn requote(text: &str, to: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    let mut open: Option<char> = None;

    while let Some(ch) = chars.next() {
        let Some(delimiter) = open else {
            if ch == '"' || ch == '\'' {
                open = Some(ch);
                out.push(to);
            } else {
                out.push(ch);
            }
            continue;
        };

        if ch == delimiter {
            open = None;
            out.push(to);
        } else if ch == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\'')) => push_string_char(&mut out, escaped, to),
                Some(escaped) => {
                    out.push('\\');
                    out.push(escaped);
                }
                None => out.push('\\'),
            }
        } else {
            push_string_char(&mut out, ch, to);
        }
    }
    out
}

fn push_string_char(out: &mut String, ch: char, delimiter: char) {
    if ch == delimiter {
        out.push('\\');
    }
    out.push(ch);
}

/// A structural literal that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    input: String,
    message: String,
}

impl DecodeError {
    fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn input(&self) -> &str {
        self.input.as_str()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid structural literal `{}`: {}", self.input, self.message)
    }
}

impl std::error::Error for DecodeError {}
