use std::fmt;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Object key that marks a serialized [`Pattern`].
pub const PATTERN_KEY: &str = "__pattern";
pub const PATTERN_FLAGS_KEY: &str = "flags";

/// Recognised pattern flags, in canonical order.
pub const PATTERN_FLAGS: &str = "dgimsuvy";

/// Largest integer an f64 represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A value held by the edited object.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    BigInt(BigInt),
    Text(String),
    Pattern(Pattern),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
    /// Host values with no editable literal form.
    Opaque(OpaqueKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpaqueKind {
    Undefined,
    Function,
    Symbol,
}

impl Value {
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Opaque(_))
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::Text(_) => "string",
            Self::Pattern(_) => "pattern",
            Self::List(_) => "array",
            Self::Object(_) => "object",
            Self::Opaque(OpaqueKind::Undefined) => "undefined",
            Self::Opaque(OpaqueKind::Function) => "function",
            Self::Opaque(OpaqueKind::Symbol) => "symbol",
        }
    }

    /// Structural JSON form. Opaque values are dropped from objects and
    /// become `null` inside arrays.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Null | Self::Opaque(_) => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => number_to_json(*n),
            Self::BigInt(big) => serde_json::Value::String(format!("{big}n")),
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Pattern(pattern) => {
                let mut map = serde_json::Map::new();
                map.insert(
                    PATTERN_KEY.to_string(),
                    serde_json::Value::String(pattern.source().to_string()),
                );
                map.insert(
                    PATTERN_FLAGS_KEY.to_string(),
                    serde_json::Value::String(pattern.flags().to_string()),
                );
                serde_json::Value::Object(map)
            }
            Self::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Object(map) => serde_json::Value::Object(
                map.iter()
                    .filter(|(_, value)| !value.is_opaque())
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn from_json(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => {
                if let Some(pattern) = pattern_from_json(&map) {
                    return Self::Pattern(pattern);
                }
                Self::Object(
                    map.into_iter()
                        .map(|(key, value)| (key, Value::from_json(value)))
                        .collect(),
                )
            }
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(serde_json::Value::Null, serde_json::Value::Number)
}

fn pattern_from_json(map: &serde_json::Map<String, serde_json::Value>) -> Option<Pattern> {
    let source = map.get(PATTERN_KEY)?.as_str()?;
    let flags = map
        .get(PATTERN_FLAGS_KEY)
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default();
    Pattern::new(source, flags).ok()
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from_json)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Self::BigInt(value)
    }
}

impl From<Pattern> for Value {
    fn from(value: Pattern) -> Self {
        Self::Pattern(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(value: IndexMap<String, Value>) -> Self {
        Self::Object(value)
    }
}

/// Arbitrary-precision signed integer kept as normalized decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    negative: bool,
    digits: String,
}

impl BigInt {
    /// Parses `-?[0-9]+`. Leading zeros are dropped and `-0` becomes `0`.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            negative: negative && digits != "0",
            digits: digits.to_string(),
        })
    }

    pub fn digits(&self) -> &str {
        self.digits.as_str()
    }

    pub fn to_i128(&self) -> Option<i128> {
        self.to_string().parse().ok()
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str(&self.digits)
    }
}

impl From<i64> for BigInt {
    fn from(value: i64) -> Self {
        Self {
            negative: value < 0,
            digits: value.unsigned_abs().to_string(),
        }
    }
}

/// A regular-expression value: source text plus flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    source: String,
    flags: String,
}

impl Pattern {
    /// Flags are validated and stored in canonical order.
    pub fn new(source: impl Into<String>, flags: &str) -> Result<Self, PatternError> {
        let mut seen = Vec::new();
        for ch in flags.chars() {
            if !PATTERN_FLAGS.contains(ch) {
                return Err(PatternError::UnknownFlag(ch));
            }
            if seen.contains(&ch) {
                return Err(PatternError::DuplicateFlag(ch));
            }
            seen.push(ch);
        }
        let flags = PATTERN_FLAGS.chars().filter(|ch| seen.contains(ch)).collect();
        Ok(Self {
            source: source.into(),
            flags,
        })
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn flags(&self) -> &str {
        self.flags.as_str()
    }

    pub fn has_flag(&self, flag: char) -> bool {
        self.flags.contains(flag)
    }

    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        RegexBuilder::new(&self.source)
            .case_insensitive(self.has_flag('i'))
            .multi_line(self.has_flag('m'))
            .dot_matches_new_line(self.has_flag('s'))
            .build()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    UnknownFlag(char),
    DuplicateFlag(char),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFlag(flag) => write!(f, "unknown pattern flag '{flag}'"),
            Self::DuplicateFlag(flag) => write!(f, "duplicate pattern flag '{flag}'"),
        }
    }
}

impl std::error::Error for PatternError {}

#[cfg(test)]
mod tests {
    use super::{BigInt, OpaqueKind, Pattern, PatternError, Value};
    use indexmap::IndexMap;

    #[test]
    fn bigint_parse_normalizes_digits() {
        let big = BigInt::parse("-000123").expect("bigint");
        assert_eq!(big.to_string(), "-123");
        assert_eq!(BigInt::parse("-0").expect("zero").to_string(), "0");
        assert!(BigInt::parse("12a").is_none());
        assert!(BigInt::parse("-").is_none());
    }

    #[test]
    fn bigint_keeps_precision_beyond_i128() {
        let digits = "1234567890123456789012345678901234567890123";
        let big = BigInt::parse(digits).expect("bigint");
        assert_eq!(big.digits(), digits);
        assert!(big.to_i128().is_none());
    }

    #[test]
    fn pattern_flags_are_canonical() {
        let pattern = Pattern::new("a+", "ig").expect("pattern");
        assert_eq!(pattern.flags(), "gi");
        assert_eq!(pattern, Pattern::new("a+", "gi").expect("pattern"));
    }

    #[test]
    fn pattern_rejects_bad_flags() {
        assert_eq!(Pattern::new("a", "x"), Err(PatternError::UnknownFlag('x')));
        assert_eq!(Pattern::new("a", "gg"), Err(PatternError::DuplicateFlag('g')));
    }

    #[test]
    fn pattern_regex_honors_case_flag() {
        let regex = Pattern::new("^ab$", "i")
            .expect("pattern")
            .to_regex()
            .expect("regex");
        assert!(regex.is_match("AB"));
    }

    #[test]
    fn integral_numbers_serialize_without_fraction() {
        assert_eq!(Value::Number(42.0).to_json().to_string(), "42");
        assert_eq!(Value::Number(1.5).to_json().to_string(), "1.5");
        assert_eq!(Value::Number(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn opaque_entries_are_dropped_from_objects() {
        let mut map = IndexMap::new();
        map.insert("a".to_string(), Value::Number(1.0));
        map.insert("f".to_string(), Value::Opaque(OpaqueKind::Function));
        let json = Value::Object(map).to_json();
        assert_eq!(json.to_string(), r#"{"a":1}"#);

        let list = Value::List(vec![Value::Opaque(OpaqueKind::Undefined)]);
        assert_eq!(list.to_json().to_string(), "[null]");
    }

    #[test]
    fn json_pattern_marker_becomes_pattern() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"__pattern":"x+","flags":"g"}"#).expect("json");
        let value = Value::from_json(json);
        assert_eq!(
            value,
            Value::Pattern(Pattern::new("x+", "g").expect("pattern"))
        );
    }

    #[test]
    fn object_order_survives_json() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).expect("json");
        let value = Value::from_json(json);
        let keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }
}
