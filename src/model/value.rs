//! Cell values and ingestion-boundary coercion
//!
//! Everything that lands in a `Table` must survive a trip through plain text
//! or JSON, so readers funnel their native values through the constructors
//! here instead of building `CellValue`s directly.

use std::fmt;

use serde_json::{Number, Value};

/// Largest integer magnitude that survives an f64 round-trip (2^53 - 1)
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// A single table cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Null,
    Number(Number),
    Text(String),
}

impl CellValue {
    /// Text cell from anything string-like
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// Empty text cell, used for inserted rows and columns
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    /// Integer cell; magnitudes beyond `MAX_SAFE_INTEGER` become decimal text
    pub fn from_i64(n: i64) -> Self {
        if n.unsigned_abs() > MAX_SAFE_INTEGER {
            CellValue::Text(n.to_string())
        } else {
            CellValue::Number(Number::from(n))
        }
    }

    /// Unsigned integer cell; magnitudes beyond `MAX_SAFE_INTEGER` become decimal text
    pub fn from_u64(n: u64) -> Self {
        if n > MAX_SAFE_INTEGER {
            CellValue::Text(n.to_string())
        } else {
            CellValue::Number(Number::from(n))
        }
    }

    /// Float cell; NaN and infinities have no JSON form and are kept as text
    pub fn from_f64(f: f64) -> Self {
        match Number::from_f64(f) {
            Some(n) => CellValue::Number(n),
            None => CellValue::Text(f.to_string()),
        }
    }

    /// Coerce a decoded JSON value into a cell.
    ///
    /// Objects and arrays are rendered as compact JSON text, booleans as
    /// `true`/`false`, and integers outside the safe range as decimal text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Text(b.to_string()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::from_i64(i)
                } else if let Some(u) = n.as_u64() {
                    CellValue::from_u64(u)
                } else {
                    CellValue::Number(n.clone())
                }
            }
            Value::String(s) => CellValue::Text(s.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Display form, borrowed when possible
    pub fn as_display(&self) -> std::borrow::Cow<'_, str> {
        match self {
            CellValue::Null => "".into(),
            CellValue::Number(n) => n.to_string().into(),
            CellValue::Text(s) => s.as_str().into(),
        }
    }

    /// Numeric interpretation used by sorting (trimmed text is parsed too)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Null => None,
            CellValue::Number(n) => n.as_f64(),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_big_integers_become_text() {
        assert_eq!(
            CellValue::from_i64(i64::MAX),
            CellValue::text("9223372036854775807")
        );
        assert_eq!(
            CellValue::from_u64(u64::MAX),
            CellValue::text("18446744073709551615")
        );
        assert_eq!(
            CellValue::from_i64(-(MAX_SAFE_INTEGER as i64) - 1),
            CellValue::text("-9007199254740992")
        );
    }

    #[test]
    fn test_safe_integers_stay_numeric() {
        let v = CellValue::from_i64(MAX_SAFE_INTEGER as i64);
        assert!(matches!(v, CellValue::Number(_)));
        assert_eq!(v.to_string(), "9007199254740991");
    }

    #[test]
    fn test_nested_json_rendered_compact() {
        let v = CellValue::from_json(&json!({"a": [1, 2]}));
        assert_eq!(v, CellValue::text(r#"{"a":[1,2]}"#));

        let v = CellValue::from_json(&json!([true, null]));
        assert_eq!(v, CellValue::text("[true,null]"));
    }

    #[test]
    fn test_scalars_from_json() {
        assert_eq!(CellValue::from_json(&json!(null)), CellValue::Null);
        assert_eq!(CellValue::from_json(&json!(false)), CellValue::text("false"));
        assert_eq!(CellValue::from_json(&json!("x")), CellValue::text("x"));
        assert_eq!(CellValue::from_json(&json!(1.5)).to_string(), "1.5");
    }

    #[test]
    fn test_non_finite_float_is_text() {
        assert_eq!(CellValue::from_f64(f64::NAN), CellValue::text("NaN"));
    }

    #[test]
    fn test_as_f64_parses_trimmed_text() {
        assert_eq!(CellValue::text(" 42 ").as_f64(), Some(42.0));
        assert_eq!(CellValue::text("abc").as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
    }

    #[test]
    fn test_null_displays_empty() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Null.as_display(), "");
    }
}
