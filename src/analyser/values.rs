//! Probing helpers for loosely typed cell values.
//!
//! Query results arrive as JSON, so a "numeric" column may hold numbers,
//! numeric strings, or a mix. These helpers give every stage of the engine the
//! same answer to "is this present", "is this a number" and "what does it
//! display as".

use serde_json::Value;

/// True for any value other than null or a missing key.
pub fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
}

/// Strict numeric test: the whole value must denote a finite number.
///
/// Numbers qualify directly. Strings qualify when, after trimming, they parse
/// completely as a finite float. Empty strings, booleans and nested values
/// never qualify.
pub fn as_finite_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            lexical::parse::<f64, _>(trimmed.as_bytes())
                .ok()
                .filter(|v| v.is_finite())
        }
        _ => None,
    }
}

/// Lenient float parsing for aggregation and chart values.
///
/// Strings contribute their longest numeric prefix (`"12.5 kg"` is 12.5).
/// Anything that yields no finite number is `None`.
pub fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => {
            let bytes = s.trim_start().as_bytes();
            let parsed = match leading_float(bytes) {
                Ok(parsed) => parsed,
                // An exponent marker without digits ends the number: "3eggs" is 3.
                Err(_) => {
                    let mantissa = bytes.split(|b| matches!(b, b'e' | b'E')).next()?;
                    leading_float(mantissa).ok()?
                }
            };
            parsed.filter(|v| v.is_finite())
        }
        _ => None,
    }
}

fn leading_float(bytes: &[u8]) -> Result<Option<f64>, lexical::Error> {
    let (parsed, consumed) = lexical::parse_partial::<f64, _>(bytes)?;
    Ok((consumed > 0).then_some(parsed))
}

/// Display form of a value, used as a frequency key.
///
/// Strings render without quotes and integral numbers without a fraction, so
/// `1` and `"1"` share a key.
pub fn display_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            (None, None, None) => n.to_string(),
        },
        other => other.to_string(),
    }
}

/// Typed identity of a value: `1` and `"1"` are different.
pub fn distinct_key(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence() {
        assert!(!is_present(None));
        assert!(!is_present(Some(&Value::Null)));
        assert!(is_present(Some(&json!(0))));
        assert!(is_present(Some(&json!(""))));
        assert!(is_present(Some(&json!(false))));
    }

    #[test]
    fn test_strict_numeric() {
        assert_eq!(as_finite_number(&json!(42)), Some(42.0));
        assert_eq!(as_finite_number(&json!(-3.5)), Some(-3.5));
        assert_eq!(as_finite_number(&json!(" 17 ")), Some(17.0));
        assert_eq!(as_finite_number(&json!("1e3")), Some(1000.0));
        assert_eq!(as_finite_number(&json!("12abc")), None);
        assert_eq!(as_finite_number(&json!("")), None);
        assert_eq!(as_finite_number(&json!("   ")), None);
        assert_eq!(as_finite_number(&json!("inf")), None);
        assert_eq!(as_finite_number(&json!(true)), None);
        assert_eq!(as_finite_number(&json!("2024-01-01")), None);
    }

    #[test]
    fn test_lenient_parse() {
        assert_eq!(parse_float(&json!("12.5 kg")), Some(12.5));
        assert_eq!(parse_float(&json!("  7")), Some(7.0));
        assert_eq!(parse_float(&json!(3)), Some(3.0));
        assert_eq!(parse_float(&json!("abc")), None);
        assert_eq!(parse_float(&json!(null)), None);
        assert_eq!(parse_float(&json!(true)), None);

        assert_eq!(parse_float(&json!("3eggs")), Some(3.0));
        assert_eq!(parse_float(&json!("2e")), Some(2.0));
        assert_eq!(parse_float(&json!("1.5E+")), Some(1.5));
        assert_eq!(parse_float(&json!("2e3 units")), Some(2000.0));
        assert_eq!(parse_float(&json!("eggs")), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(display_key(&json!("Baku")), "Baku");
        assert_eq!(display_key(&json!(1)), "1");
        assert_eq!(display_key(&json!(1.5)), "1.5");
        assert_eq!(display_key(&json!(true)), "true");
        assert_eq!(display_key(&json!(1)), display_key(&json!("1")));
        assert_ne!(distinct_key(&json!(1)), distinct_key(&json!("1")));
    }
}
