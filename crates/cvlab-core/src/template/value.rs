//! Value semantics shared by helpers and the executor
//!
//! Context values are plain JSON. These functions fix how a value is tested
//! for truthiness, printed, compared and coerced, so every call site renders
//! the same bytes for the same input.

use serde_json::{Number, Value};

/// Truthiness used by `#if` sections
///
/// Falsy: null, `false`, `0`, `NaN`, `""` and empty arrays. Everything else,
/// including an empty object, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Stringify a value for template output (before escaping)
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => display_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn display_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    format_f64(n.as_f64().unwrap_or(f64::NAN))
}

/// Format a float the way the preview host prints numbers
///
/// Shortest round-trip digits. Integral values drop the fractional part,
/// magnitudes from `1e21` up or below `1e-6` switch to exponent form
/// (`1e+21`, `1.5e-7`), non-finite values use the `NaN` / `Infinity`
/// spellings.
pub fn format_f64(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if f == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits as `d.ddde<exp>`
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits = mantissa.replace('.', "");
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        format!("{}.{}", &digits[..n as usize], &digits[n as usize..])
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", lead, sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", lead, rest, sign, (n - 1).abs())
        }
    };

    if f < 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Build a JSON number from a float
///
/// Non-finite results cannot be stored in a JSON number, so they are kept as
/// their printed form.
pub fn number_value(f: f64) -> Value {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15 {
        Value::Number(Number::from(f as i64))
    } else {
        Number::from_f64(f)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(format_f64(f)))
    }
}

/// Escape a string for HTML text and attribute contexts
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            _ => out.push(c),
        }
    }
    out
}

/// Numeric coercion for helper arguments
///
/// Null and empty strings are 0, booleans are 1/0, unparsable input is NaN.
pub fn as_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Integer coercion for positions and lengths (truncates, NaN is 0)
pub fn as_integer(value: &Value) -> i64 {
    let f = as_number(value);
    if f.is_nan() {
        0
    } else {
        f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64
    }
}

/// Strict equality: same kind and same value, numbers compared as floats
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness_follows_falsy_rules() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!(-1)));
    }

    #[test]
    fn test_display_numbers() {
        assert_eq!(display(&json!(60)), "60");
        assert_eq!(display(&json!(60.0)), "60");
        assert_eq!(display(&json!(9.5)), "9.5");
        assert_eq!(display(&json!(-0.0)), "0");
        assert_eq!(format_f64(f64::NAN), "NaN");
        assert_eq!(format_f64(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_display_switches_to_exponent_form() {
        assert_eq!(format_f64(1e21), "1e+21");
        assert_eq!(format_f64(1.5e21), "1.5e+21");
        assert_eq!(format_f64(-2e22), "-2e+22");
        assert_eq!(format_f64(1e20), "100000000000000000000");
        assert_eq!(format_f64(1e-7), "1e-7");
        assert_eq!(format_f64(1.25e-7), "1.25e-7");
        assert_eq!(format_f64(0.000001), "0.000001");
        assert_eq!(format_f64(0.1), "0.1");
        assert_eq!(format_f64(-1.5), "-1.5");
        assert_eq!(format_f64(123.456), "123.456");
        assert_eq!(display(&json!(1e21)), "1e+21");
    }

    #[test]
    fn test_display_compound_values() {
        assert_eq!(display(&json!([1, "a", null])), "1,a,");
        assert_eq!(display(&json!({"a": 1})), "[object Object]");
        assert_eq!(display(&json!(null)), "");
        assert_eq!(display(&json!(true)), "true");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry' = `1`</a>"#),
            "&lt;a href&#x3D;&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27; &#x3D; &#x60;1&#x60;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(as_number(&json!("4")), 4.0);
        assert_eq!(as_number(&json!(null)), 0.0);
        assert!(as_number(&json!("abc")).is_nan());
        assert_eq!(as_integer(&json!("abc")), 0);
        assert_eq!(as_integer(&json!(3.9)), 3);
        assert_eq!(as_integer(&json!(-2.5)), -2);
    }

    #[test]
    fn test_strict_equal() {
        assert!(strict_equal(&json!(1), &json!(1.0)));
        assert!(strict_equal(&json!("expert"), &json!("expert")));
        assert!(!strict_equal(&json!("1"), &json!(1)));
        assert!(!strict_equal(&json!(null), &json!("")));
    }

    #[test]
    fn test_number_value_keeps_integers_integral() {
        assert_eq!(number_value(60.0), json!(60));
        assert_eq!(number_value(12.5), json!(12.5));
        assert_eq!(number_value(f64::NAN), json!("NaN"));
    }
}
