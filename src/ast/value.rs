//! Literal values

use serde::{Deserialize, Serialize};
use std::fmt;

/// A literal as written in a query.
///
/// Timestamps and addresses keep their source text; interpreting them is left
/// to whoever consumes the tree. `Today`/`Yesterday` are keywords lexically but
/// values grammatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    /// Text between the quotes, e.g. `2023-12-25 14:30:00`
    Timestamp(String),
    IpAddress(String),
    MacAddress(String),
    Today,
    Yesterday,
}

impl Value {
    pub fn string(text: impl Into<String>) -> Self {
        Value::String(text.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text)
            | Value::Timestamp(text)
            | Value::IpAddress(text)
            | Value::MacAddress(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

/// Quote `text` for SRQL output. Single quotes unless the text contains one.
pub fn quote(text: &str) -> String {
    if text.contains('\'') {
        format!("\"{}\"", text)
    } else {
        format!("'{}'", text)
    }
}

/// Strip the surrounding quotes from a string or timestamp lexeme.
pub fn unquote(lexeme: &str) -> &str {
    if lexeme.len() >= 2 {
        &lexeme[1..lexeme.len() - 1]
    } else {
        lexeme
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(text) | Value::Timestamp(text) => f.write_str(&quote(text)),
            Value::Integer(n) => write!(f, "{}", n),
            Value::Float(x) => {
                let text = x.to_string();
                if text.contains('.') || !x.is_finite() {
                    f.write_str(&text)
                } else {
                    write!(f, "{}.0", text)
                }
            }
            Value::Boolean(b) => write!(f, "{}", b),
            Value::IpAddress(text) | Value::MacAddress(text) => f.write_str(text),
            Value::Today => f.write_str("TODAY"),
            Value::Yesterday => f.write_str("YESTERDAY"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_quote_style() {
        assert_eq!(Value::string("abc").to_string(), "'abc'");
        assert_eq!(Value::string("it's").to_string(), "\"it's\"");
    }

    #[test]
    fn test_float_keeps_decimal_point() {
        assert_eq!(Value::Float(2.0).to_string(), "2.0");
        assert_eq!(Value::Float(-0.25).to_string(), "-0.25");
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("'abc'"), "abc");
        assert_eq!(unquote("\"\""), "");
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Value::Integer(5)).unwrap();
        assert_eq!(json, r#"{"type":"integer","value":5}"#);
        let json = serde_json::to_string(&Value::Today).unwrap();
        assert_eq!(json, r#"{"type":"today"}"#);
    }
}
