use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current input values of a running form, keyed by field id.
///
/// A missing key is an *unset* input, which is distinct from an explicit `Value::Null`.
pub type InputValues = AHashMap<String, Value>;

/// Runtime value types carried by inputs, default values and rule literals.
///
/// Comparisons between values follow the loose coercion rules of browser form scripts,
/// see [`loose_eq`], [`Value::to_number`] and the `Display` impl.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Numeric coercion. Unparseable text and structured values become `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Value::Number(n) => *n,
            Value::Text(s) => parse_number(s),
            Value::List(_) => parse_number(&self.to_string()),
            Value::Map(_) => f64::NAN,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Value::List(_) | Value::Map(_))
    }
}

/// True if an input is unset, null, or the empty string.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Text(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Loose (type-coercing) equality. `None` stands for an unset input.
pub fn loose_eq(left: Option<&Value>, right: Option<&Value>) -> bool {
    match (left, right) {
        (None | Some(Value::Null), None | Some(Value::Null)) => true,
        (None | Some(Value::Null), Some(_)) | (Some(_), None | Some(Value::Null)) => false,
        (Some(l), Some(r)) => loose_eq_values(l, r),
    }
}

fn loose_eq_values(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l == r,
        (Value::Text(l), Value::Text(r)) => l == r,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::Number(n), Value::Text(s)) | (Value::Text(s), Value::Number(n)) => {
            *n == parse_number(s)
        }
        (Value::Bool(b), other) | (other, Value::Bool(b)) => {
            loose_eq_values(&Value::Number(if *b { 1.0 } else { 0.0 }), other)
        }
        (l, r) if l.is_structured() && r.is_structured() => l == r,
        (structured, primitive) | (primitive, structured) if structured.is_structured() => {
            loose_eq_values(&Value::Text(structured.to_string()), primitive)
        }
        _ => false,
    }
}

/// Parses text the way a browser's `Number(text)` does.
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let (sign, unsigned) = match trimmed.as_bytes()[0] {
        b'-' => (-1.0, &trimmed[1..]),
        b'+' => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };
    if unsigned == "Infinity" {
        return sign * f64::INFINITY;
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).map_or(f64::NAN, |n| n as f64);
        }
    }

    // Rust accepts "inf" and "nan" spellings which browsers reject.
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-');
    if !unsigned.chars().all(allowed) || !unsigned.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Formats a number the way a browser stringifies it for display.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", format_number(*n)),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                let joined = items
                    .iter()
                    .map(|item| match item {
                        Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .join(",");
                write!(f, "{}", joined)
            }
            Value::Map(_) => write!(f, "[object Object]"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// Deserializes a present key into `Some`, keeping an explicit `null` as `Some(Value::Null)`.
/// Combined with `#[serde(default)]` a missing key stays `None`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
