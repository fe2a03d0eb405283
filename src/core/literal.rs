//! Tokenizer for the add-property input, `key:value`.
//!
//! The key is the leading run of characters that are neither whitespace nor
//! `:`. Optional whitespace, a `:`, then everything after it (trimmed) is the
//! value. Extra colons belong to the value.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLiteral<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> PropertyLiteral<'a> {
    pub fn parse(input: &'a str) -> Result<Self, LiteralError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(LiteralError::Empty);
        }

        let key_end = input
            .find(|ch: char| ch.is_whitespace() || ch == ':')
            .unwrap_or(input.len());
        let key = &input[..key_end];
        if key.is_empty() {
            return Err(LiteralError::MissingKey);
        }

        let rest = input[key_end..].trim_start();
        let Some(value) = rest.strip_prefix(':') else {
            return Err(LiteralError::MissingSeparator);
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(LiteralError::EmptyValue);
        }

        Ok(Self { key, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralError {
    Empty,
    MissingKey,
    MissingSeparator,
    EmptyValue,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("input is empty"),
            Self::MissingKey => f.write_str("property key is missing"),
            Self::MissingSeparator => f.write_str("expected ':' after the property key"),
            Self::EmptyValue => f.write_str("property value is empty"),
        }
    }
}

impl std::error::Error for LiteralError {}
