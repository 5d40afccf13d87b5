//! Row decoder: turns raw CSV cells into typed values.
//!
//! A schema tag is resolved once per column into a [`ColumnType`], which then
//! decodes every cell of that column.
//!
//! | Tag | Decoded as |
//! |-----|------------|
//! | `int` | 64-bit integer, error if invalid |
//! | `float` | float, error if invalid |
//! | `bool` | `true` if the cell is `true`, `1` or `yes` (any case), else `false` |
//! | `array...` | literal list, elements coerced to the inner type; `[]` on any failure |
//! | anything else | the raw string |
//!
//! The inner type of an array tag is found by substring, checked in the order
//! `int`, `float`, `bool`: `array[int64]` holds ints, `array[boolean]` bools,
//! `array[float_or_int]` ints. A tag naming none of them holds strings.

use std::fmt;

use super::literal::{parse_literal, strip_underscores, Literal};
use crate::error::{ArrayError, DecodeError, DecodeResult};
use crate::models::TypedValue;

/// Strings that decode to `true`, compared case-insensitively.
pub const TRUTHY: [&str; 3] = ["true", "1", "yes"];

/// Element type of an array column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Int,
    Float,
    Bool,
    Text,
}

/// Decoding rule for one column, resolved from its schema tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int,
    Float,
    Bool,
    Array(ScalarType),
    Text,
}

impl ScalarType {
    /// Element type named anywhere in an array tag.
    fn from_array_tag(tag: &str) -> Self {
        if tag.contains("int") {
            ScalarType::Int
        } else if tag.contains("float") {
            ScalarType::Float
        } else if tag.contains("bool") {
            ScalarType::Bool
        } else {
            ScalarType::Text
        }
    }

    fn name(self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::Text => "str",
        }
    }

    /// Coerce one parsed array element. `None` if the element does not
    /// convert.
    pub fn coerce(self, element: Literal) -> Option<TypedValue> {
        match self {
            ScalarType::Int => match element {
                Literal::Int(n) => Some(TypedValue::Int(n)),
                Literal::Float(f) => truncate(f).map(TypedValue::Int),
                // Wider than i64
                Literal::BigInt(_) => None,
                Literal::Bool(b) => Some(TypedValue::Int(i64::from(b))),
                Literal::Str(s) => parse_int(&s).ok().map(TypedValue::Int),
                _ => None,
            },
            ScalarType::Float => match element {
                Literal::Int(n) => Some(TypedValue::Float(n as f64)),
                Literal::Float(f) => Some(TypedValue::Float(f)),
                Literal::BigInt(digits) => digits.parse::<f64>().ok().map(TypedValue::Float),
                Literal::Bool(b) => Some(TypedValue::Float(if b { 1.0 } else { 0.0 })),
                Literal::Str(s) => parse_float(&s).ok().map(TypedValue::Float),
                _ => None,
            },
            ScalarType::Bool => Some(TypedValue::Bool(is_truthy(&element.to_display()))),
            ScalarType::Text => Some(TypedValue::Str(element.to_display())),
        }
    }
}

impl ColumnType {
    /// Resolve a schema tag. Unrecognized tags decode as text.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "int" => ColumnType::Int,
            "float" => ColumnType::Float,
            "bool" => ColumnType::Bool,
            _ if tag.starts_with("array") => ColumnType::Array(ScalarType::from_array_tag(tag)),
            _ => ColumnType::Text,
        }
    }

    /// Decode one cell. Array failures decode to `[]`.
    pub fn decode(&self, raw: &str) -> DecodeResult<TypedValue> {
        self.decode_reporting(raw, |_| {})
    }

    /// Decode one cell, handing any swallowed array error to `on_fallback`.
    pub fn decode_reporting(
        &self,
        raw: &str,
        on_fallback: impl FnOnce(ArrayError),
    ) -> DecodeResult<TypedValue> {
        match self {
            ColumnType::Int => parse_int(raw).map(TypedValue::Int),
            ColumnType::Float => parse_float(raw).map(TypedValue::Float),
            ColumnType::Bool => Ok(TypedValue::Bool(is_truthy(raw))),
            ColumnType::Array(inner) => match decode_array(raw, *inner) {
                Ok(items) => Ok(TypedValue::Array(items)),
                Err(err) => {
                    on_fallback(err);
                    Ok(TypedValue::Array(Vec::new()))
                }
            },
            ColumnType::Text => Ok(TypedValue::Str(raw.to_string())),
        }
    }
}

impl From<&str> for ColumnType {
    fn from(tag: &str) -> Self {
        ColumnType::from_tag(tag)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Int => f.write_str("int"),
            ColumnType::Float => f.write_str("float"),
            ColumnType::Bool => f.write_str("bool"),
            ColumnType::Array(inner) => write!(f, "array[{}]", inner.name()),
            ColumnType::Text => f.write_str("str"),
        }
    }
}

/// Resolve every tag of a schema row.
pub fn resolve_schema<S: AsRef<str>>(tags: &[S]) -> Vec<ColumnType> {
    tags.iter().map(|tag| ColumnType::from_tag(tag.as_ref())).collect()
}

/// Decode one raw cell under a schema tag.
///
/// # Example
/// ```
/// use typedcsv::{decode, TypedValue};
///
/// assert_eq!(decode("42", "int").unwrap(), TypedValue::Int(42));
/// assert_eq!(decode("Yes", "bool").unwrap(), TypedValue::Bool(true));
/// assert_eq!(decode("oops", "array[int]").unwrap(), TypedValue::Array(vec![]));
/// ```
pub fn decode(raw: &str, tag: &str) -> DecodeResult<TypedValue> {
    ColumnType::from_tag(tag).decode(raw)
}

/// Case-insensitive membership in [`TRUTHY`].
pub fn is_truthy(raw: &str) -> bool {
    let lower = raw.to_lowercase();
    TRUTHY.contains(&lower.as_str())
}

/// Parse a base-10 integer. Surrounding whitespace, a sign and digit-group
/// underscores are accepted.
pub fn parse_int(raw: &str) -> DecodeResult<i64> {
    let invalid = || DecodeError::InvalidInt(raw.to_string());
    let cleaned = strip_underscores(raw.trim(), 10).ok_or_else(invalid)?;
    cleaned.parse::<i64>().map_err(|_| invalid())
}

/// Parse a decimal or exponential float. Also accepts `inf`, `infinity` and
/// `nan` in any case.
pub fn parse_float(raw: &str) -> DecodeResult<f64> {
    let invalid = || DecodeError::InvalidFloat(raw.to_string());
    let cleaned = strip_underscores(raw.trim(), 10).ok_or_else(invalid)?;
    cleaned.parse::<f64>().map_err(|_| invalid())
}

fn decode_array(raw: &str, inner: ScalarType) -> Result<Vec<TypedValue>, ArrayError> {
    let elements = parse_literal(raw)?.into_elements()?;
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let shown = element.to_display();
            inner.coerce(element).ok_or(ArrayError::Coercion {
                index,
                element: shown,
                target: inner.name(),
            })
        })
        .collect()
}

/// Truncate toward zero, `None` if not finite or out of range.
fn truncate(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    if t.is_finite() && t >= -LIMIT && t < LIMIT {
        Some(t as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> TypedValue {
        TypedValue::Array(values.iter().map(|&n| TypedValue::Int(n)).collect())
    }

    fn bools(values: &[bool]) -> TypedValue {
        TypedValue::Array(values.iter().map(|&b| TypedValue::Bool(b)).collect())
    }

    fn strs(values: &[&str]) -> TypedValue {
        TypedValue::Array(values.iter().map(|&s| TypedValue::from(s)).collect())
    }

    #[test]
    fn test_tag_resolution() {
        assert_eq!(ColumnType::from_tag("int"), ColumnType::Int);
        assert_eq!(ColumnType::from_tag("float"), ColumnType::Float);
        assert_eq!(ColumnType::from_tag("bool"), ColumnType::Bool);
        assert_eq!(ColumnType::from_tag("array[int]"), ColumnType::Array(ScalarType::Int));
        assert_eq!(ColumnType::from_tag("array[ bool ]"), ColumnType::Array(ScalarType::Bool));
        assert_eq!(ColumnType::from_tag("array[str]"), ColumnType::Array(ScalarType::Text));
        assert_eq!(ColumnType::from_tag("array"), ColumnType::Array(ScalarType::Text));
        assert_eq!(ColumnType::from_tag("array[int64]"), ColumnType::Array(ScalarType::Int));
        assert_eq!(ColumnType::from_tag("array[float64]"), ColumnType::Array(ScalarType::Float));
        assert_eq!(ColumnType::from_tag("array[boolean]"), ColumnType::Array(ScalarType::Bool));
        assert_eq!(ColumnType::from_tag("array(int)"), ColumnType::Array(ScalarType::Int));
        assert_eq!(ColumnType::from_tag("array[float_int]"), ColumnType::Array(ScalarType::Int));
        assert_eq!(ColumnType::from_tag("array[string]"), ColumnType::Array(ScalarType::Text));
        assert_eq!(ColumnType::from_tag("Int"), ColumnType::Text);
        assert_eq!(ColumnType::from_tag(""), ColumnType::Text);
        assert_eq!(ColumnType::from_tag("array[float]").to_string(), "array[float]");
    }

    #[test]
    fn test_int_round_trip() {
        for n in [0i64, 7, -42, 1_000_000, i64::MAX, i64::MIN] {
            assert_eq!(decode(&n.to_string(), "int").unwrap(), TypedValue::Int(n));
        }
        assert_eq!(decode(" 12 ", "int").unwrap(), TypedValue::Int(12));
        assert_eq!(decode("+3", "int").unwrap(), TypedValue::Int(3));
        assert_eq!(decode("1_000", "int").unwrap(), TypedValue::Int(1000));
    }

    #[test]
    fn test_int_errors() {
        for raw in ["", "abc", "1.5", "1__0", "_1", "99999999999999999999"] {
            assert_eq!(
                decode(raw, "int"),
                Err(DecodeError::InvalidInt(raw.to_string())),
                "{:?}",
                raw
            );
        }
    }

    #[test]
    fn test_float_round_trip() {
        for f in [0.0, 3.5, -0.25, 1e-7, 6.02e23] {
            assert_eq!(decode(&f.to_string(), "float").unwrap(), TypedValue::Float(f));
        }
        assert_eq!(decode("1e3", "float").unwrap(), TypedValue::Float(1000.0));
        assert_eq!(decode(" 2 ", "float").unwrap(), TypedValue::Float(2.0));
        assert_eq!(decode("-Infinity", "float").unwrap(), TypedValue::Float(f64::NEG_INFINITY));
        assert!(decode("nan", "float").unwrap().as_f64().is_some_and(f64::is_nan));
        assert_eq!(
            decode("3,5", "float"),
            Err(DecodeError::InvalidFloat("3,5".into()))
        );
    }

    #[test]
    fn test_bool_is_total() {
        for raw in ["true", "TRUE", "1", "yes", "Yes"] {
            assert_eq!(decode(raw, "bool").unwrap(), TypedValue::Bool(true), "{:?}", raw);
        }
        for raw in ["false", "0", "no", "", " true", "2", "y", "\u{0}"] {
            assert_eq!(decode(raw, "bool").unwrap(), TypedValue::Bool(false), "{:?}", raw);
        }
    }

    #[test]
    fn test_array_decoding() {
        assert_eq!(decode("[1,2,3]", "array[int]").unwrap(), ints(&[1, 2, 3]));
        assert_eq!(decode("not a list", "array[int]").unwrap(), ints(&[]));
        assert_eq!(decode(r#"["1","2"]"#, "array[bool]").unwrap(), bools(&[true, false]));
        assert_eq!(decode("['a','b']", "array[str]").unwrap(), strs(&["a", "b"]));
        assert_eq!(decode("[]", "array[int]").unwrap(), ints(&[]));
    }

    #[test]
    fn test_array_element_coercion() {
        assert_eq!(decode("[1.9, -1.9, True, '7']", "array[int]").unwrap(), ints(&[1, -1, 1, 7]));
        assert_eq!(
            decode("[1, 2.5, False, '1e2']", "array[float]").unwrap(),
            TypedValue::Array(vec![
                TypedValue::Float(1.0),
                TypedValue::Float(2.5),
                TypedValue::Float(0.0),
                TypedValue::Float(100.0),
            ])
        );
        assert_eq!(
            decode("[True, 1, 1.0, 'YES', None]", "array[bool]").unwrap(),
            bools(&[true, true, false, true, false])
        );
        assert_eq!(
            decode("[1, 2.0, None, [3, 'x']]", "array[str]").unwrap(),
            strs(&["1", "2.0", "None", "[3, 'x']"])
        );
        assert_eq!(decode("'ab'", "array[str]").unwrap(), strs(&["a", "b"]));
        assert_eq!(decode("1, 2", "array[int]").unwrap(), ints(&[1, 2]));
    }

    #[test]
    fn test_loose_array_tags() {
        assert_eq!(decode("[1, 2]", "array[int64]").unwrap(), ints(&[1, 2]));
        assert_eq!(decode("['yes', 'no']", "array[boolean]").unwrap(), bools(&[true, false]));
        assert_eq!(
            decode("[1, 2.5]", "array[float64]").unwrap(),
            TypedValue::Array(vec![TypedValue::Float(1.0), TypedValue::Float(2.5)])
        );
    }

    #[test]
    fn test_array_with_integers_beyond_64_bits() {
        let cell = "[12345678901234567890, 7]";
        assert_eq!(decode(cell, "array[str]").unwrap(), strs(&["12345678901234567890", "7"]));
        assert_eq!(
            decode(cell, "array[float]").unwrap(),
            TypedValue::Array(vec![
                TypedValue::Float(12345678901234567890.0),
                TypedValue::Float(7.0),
            ])
        );
        assert_eq!(decode(cell, "array[bool]").unwrap(), bools(&[false, false]));
        assert_eq!(decode(cell, "array[int]").unwrap(), ints(&[]));
    }

    #[test]
    fn test_deep_nesting_is_empty() {
        assert_eq!(decode(&"[".repeat(100_000), "array[int]").unwrap(), ints(&[]));
        let balanced = format!("{}{}", "[".repeat(50_000), "]".repeat(50_000));
        assert_eq!(decode(&balanced, "array[str]").unwrap(), ints(&[]));
    }

    #[test]
    fn test_array_partial_failure_is_empty() {
        assert_eq!(decode("[1, 'x', 3]", "array[int]").unwrap(), ints(&[]));
        assert_eq!(decode("[1, None]", "array[float]").unwrap(), ints(&[]));
        assert_eq!(decode("[float('inf')]", "array[float]").unwrap(), ints(&[]));
        assert_eq!(decode("5", "array[int]").unwrap(), ints(&[]));
    }

    #[test]
    fn test_fallback_is_reported() {
        let mut reported = None;
        let value = ColumnType::Array(ScalarType::Int)
            .decode_reporting("[1, 'x']", |err| reported = Some(err))
            .unwrap();
        assert_eq!(value, ints(&[]));
        assert_eq!(
            reported,
            Some(ArrayError::Coercion {
                index: 1,
                element: "x".into(),
                target: "int",
            })
        );

        let mut called = false;
        ColumnType::Array(ScalarType::Int)
            .decode_reporting("[]", |_| called = true)
            .unwrap();
        assert!(!called);
    }

    #[test]
    fn test_unknown_tag_passthrough() {
        assert_eq!(decode("hello", "weirdtype").unwrap(), TypedValue::from("hello"));
        assert_eq!(decode(" raw ", "str").unwrap(), TypedValue::from(" raw "));
        assert_eq!(decode("", "").unwrap(), TypedValue::from(""));
    }
}
