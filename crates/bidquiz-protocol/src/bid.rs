//! Lenient bid parsing.
//!
//! Phones send whatever their number input produced: a JSON integer, a
//! float, or a string such as `"250"` or `" 250 coins"`. The amount is the
//! integer prefix of that value.

use serde_json::Value;

/// Extracts a non-negative integer bid from a raw payload value.
///
/// - integers are taken as is
/// - floats are truncated toward zero
/// - strings skip leading whitespace and read an optional sign followed by
///   at least one ASCII digit; trailing text is ignored
///
/// Returns `None` for negative amounts, empty or non-numeric input, and
/// any other JSON type.
pub fn parse_bid(raw: &Value) -> Option<u64> {
    match raw {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(v)
            } else if n.is_i64() {
                None
            } else {
                let f = n.as_f64()?.trunc();
                (f.is_finite() && f >= 0.0 && f <= u64::MAX as f64)
                    .then_some(f as u64)
            }
        }
        Value::String(s) => parse_integer_prefix(s),
        _ => None,
    }
}

fn parse_integer_prefix(s: &str) -> Option<u64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }
    let value: u64 = digits.parse().ok()?;
    if negative && value != 0 {
        return None;
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_bid() {
        assert_eq!(parse_bid(&json!(100)), Some(100));
        assert_eq!(parse_bid(&json!(0)), Some(0));
    }

    #[test]
    fn test_negative_integer_rejected() {
        assert_eq!(parse_bid(&json!(-1)), None);
    }

    #[test]
    fn test_float_truncates() {
        assert_eq!(parse_bid(&json!(99.9)), Some(99));
        assert_eq!(parse_bid(&json!(-2.5)), None);
    }

    #[test]
    fn test_string_integer_prefix() {
        assert_eq!(parse_bid(&json!("250")), Some(250));
        assert_eq!(parse_bid(&json!("  42abc")), Some(42));
        assert_eq!(parse_bid(&json!("+7")), Some(7));
        assert_eq!(parse_bid(&json!("12.9")), Some(12));
    }

    #[test]
    fn test_string_without_digits_rejected() {
        assert_eq!(parse_bid(&json!("")), None);
        assert_eq!(parse_bid(&json!("abc")), None);
        assert_eq!(parse_bid(&json!("-")), None);
        assert_eq!(parse_bid(&json!("-30")), None);
    }

    #[test]
    fn test_other_types_rejected() {
        assert_eq!(parse_bid(&json!(null)), None);
        assert_eq!(parse_bid(&json!(true)), None);
        assert_eq!(parse_bid(&json!({"bid": 5})), None);
    }
}
