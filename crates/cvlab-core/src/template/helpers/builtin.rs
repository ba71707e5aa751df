//! Built-in helpers
//!
//! Every helper is total: missing or empty input yields an empty string (or
//! `false`) instead of an error. Arity is checked by the executor before the
//! call, so indexing the first `min_arity` arguments is safe.

use serde_json::Value;

use super::HelperValue;
use crate::template::value::{as_integer, as_number, display, is_truthy, number_value, strict_equal};

fn arg(args: &[Value], index: usize) -> &Value {
    args.get(index).unwrap_or(&Value::Null)
}

/// Text of a string-like argument, `None` when it is empty or missing
fn text_arg(args: &[Value], index: usize) -> Option<String> {
    let value = arg(args, index);
    if is_truthy(value) {
        Some(display(value))
    } else {
        None
    }
}

fn plain_str(s: String) -> HelperValue {
    HelperValue::Plain(Value::String(s))
}

/// `percentage level [max=5]` → `level / max * 100`
pub fn percentage(args: &[Value]) -> HelperValue {
    let level = as_number(arg(args, 0));
    let max = match args.get(1) {
        Some(Value::Null) | None => 5.0,
        Some(v) => as_number(v),
    };
    HelperValue::Plain(number_value(level / max * 100.0))
}

/// `hasItems value` → true iff value is a non-empty array
pub fn has_items(args: &[Value]) -> HelperValue {
    let has = matches!(arg(args, 0), Value::Array(items) if !items.is_empty());
    HelperValue::Plain(Value::Bool(has))
}

/// `nl2br text` → newlines replaced with `<br>`, emitted unescaped
pub fn nl2br(args: &[Value]) -> HelperValue {
    match text_arg(args, 0) {
        Some(text) => HelperValue::Safe(text.replace('\n', "<br>")),
        None => plain_str(String::new()),
    }
}

/// `preserveWhitespace text` → text wrapped in a `pre-wrap` span, unescaped
pub fn preserve_whitespace(args: &[Value]) -> HelperValue {
    match text_arg(args, 0) {
        Some(text) => HelperValue::Safe(format!(
            "<span style=\"white-space: pre-wrap;\">{}</span>",
            text
        )),
        None => plain_str(String::new()),
    }
}

/// `substr str start [length]`
///
/// A negative start counts from the end; a missing length runs to the end.
pub fn substr(args: &[Value]) -> HelperValue {
    let Some(text) = text_arg(args, 0) else {
        return plain_str(String::new());
    };
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;

    let mut start = as_integer(arg(args, 1));
    if start < 0 {
        start = len.saturating_add(start).max(0);
    }
    let start = start.min(len);

    let count = match args.get(2) {
        Some(Value::Null) | None => len - start,
        Some(v) => as_integer(v).clamp(0, len - start),
    };

    plain_str(slice_chars(&chars, start, start + count))
}

/// `first str n` → the first `n` characters
pub fn first(args: &[Value]) -> HelperValue {
    let Some(text) = text_arg(args, 0) else {
        return plain_str(String::new());
    };
    let chars: Vec<char> = text.chars().collect();
    let end = as_integer(arg(args, 1));
    plain_str(substring(&chars, 0, end))
}

/// `last str n` → the last `n` characters
pub fn last(args: &[Value]) -> HelperValue {
    let Some(text) = text_arg(args, 0) else {
        return plain_str(String::new());
    };
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len() as i64;
    let start = len.saturating_sub(as_integer(arg(args, 1)));
    plain_str(substring(&chars, start, len))
}

/// `year date` → first run of four digits, or the input unchanged
pub fn year(args: &[Value]) -> HelperValue {
    let Some(text) = text_arg(args, 0) else {
        return plain_str(String::new());
    };
    match find_four_digits(&text) {
        Some(run) => plain_str(run.to_string()),
        None => plain_str(text),
    }
}

/// `equal a b` → strict equality
pub fn equal(args: &[Value]) -> HelperValue {
    HelperValue::Plain(Value::Bool(strict_equal(arg(args, 0), arg(args, 1))))
}

/// Substring with both bounds clamped to the string and swapped when reversed
fn substring(chars: &[char], start: i64, end: i64) -> String {
    let len = chars.len() as i64;
    let a = start.clamp(0, len);
    let b = end.clamp(0, len);
    let (from, to) = if a <= b { (a, b) } else { (b, a) };
    slice_chars(chars, from, to)
}

fn slice_chars(chars: &[char], from: i64, to: i64) -> String {
    chars[from as usize..to as usize].iter().collect()
}

fn find_four_digits(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut run_start = 0;
    let mut run_len = 0;
    for (i, b) in bytes.iter().enumerate() {
        if b.is_ascii_digit() {
            if run_len == 0 {
                run_start = i;
            }
            run_len += 1;
            if run_len == 4 {
                return Some(&text[run_start..run_start + 4]);
            }
        } else {
            run_len = 0;
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn s(value: HelperValue) -> String {
        match value {
            HelperValue::Plain(v) => display(&v),
            HelperValue::Safe(markup) => markup,
        }
    }

    #[test]
    fn test_percentage_default_max() {
        assert_eq!(percentage(&[json!(3)]), HelperValue::Plain(json!(60)));
        assert_eq!(percentage(&[json!(3), json!(4)]), HelperValue::Plain(json!(75)));
        assert_eq!(percentage(&[json!(7)]), HelperValue::Plain(json!(140)));
    }

    #[test]
    fn test_percentage_non_numeric() {
        assert_eq!(s(percentage(&[json!("abc")])), "NaN");
        assert_eq!(s(percentage(&[json!(1), json!(0)])), "Infinity");
    }

    #[test]
    fn test_has_items() {
        assert_eq!(has_items(&[json!([1])]), HelperValue::Plain(json!(true)));
        assert_eq!(has_items(&[json!([])]), HelperValue::Plain(json!(false)));
        assert_eq!(has_items(&[json!("abc")]), HelperValue::Plain(json!(false)));
        assert_eq!(has_items(&[json!(null)]), HelperValue::Plain(json!(false)));
    }

    #[test]
    fn test_nl2br_is_safe() {
        assert_eq!(
            nl2br(&[json!("a\nb\nc")]),
            HelperValue::Safe("a<br>b<br>c".to_string())
        );
        assert_eq!(nl2br(&[json!(null)]), HelperValue::Plain(json!("")));
    }

    #[test]
    fn test_preserve_whitespace() {
        assert_eq!(
            preserve_whitespace(&[json!("a  b")]),
            HelperValue::Safe("<span style=\"white-space: pre-wrap;\">a  b</span>".to_string())
        );
        assert_eq!(preserve_whitespace(&[json!("")]), HelperValue::Plain(json!("")));
    }

    #[test]
    fn test_substr() {
        assert_eq!(s(substr(&[json!("John Doe"), json!(4)])), " Doe");
        assert_eq!(s(substr(&[json!("John Doe"), json!(0), json!(4)])), "John");
        assert_eq!(s(substr(&[json!("John Doe"), json!(-3)])), "Doe");
        assert_eq!(s(substr(&[json!("John"), json!(10)])), "");
        assert_eq!(s(substr(&[json!("John"), json!(1), json!(-1)])), "");
        assert_eq!(s(substr(&[json!(null), json!(1)])), "");
    }

    #[test]
    fn test_first_and_last() {
        assert_eq!(s(first(&[json!("2020-01-15"), json!(4)])), "2020");
        assert_eq!(s(first(&[json!("ab"), json!(10)])), "ab");
        assert_eq!(s(first(&[json!("ab"), json!(-1)])), "");
        assert_eq!(s(last(&[json!("2020-01-15"), json!(2)])), "15");
        assert_eq!(s(last(&[json!("ab"), json!(10)])), "ab");
        assert_eq!(s(last(&[json!(""), json!(2)])), "");
    }

    #[test]
    fn test_extreme_counts_are_clamped() {
        assert_eq!(s(last(&[json!("abc"), json!(-1e30)])), "");
        assert_eq!(s(last(&[json!("abc"), json!(1e30)])), "abc");
        assert_eq!(s(last(&[json!("abc"), json!(i64::MIN)])), "");
        assert_eq!(s(first(&[json!("abc"), json!(1e30)])), "abc");
        assert_eq!(s(first(&[json!("abc"), json!(-1e30)])), "");
        assert_eq!(s(first(&[json!("abc"), json!(u64::MAX)])), "abc");
        assert_eq!(s(substr(&[json!("abc"), json!(-1e30)])), "abc");
        assert_eq!(s(substr(&[json!("abc"), json!(1e30)])), "");
        assert_eq!(s(substr(&[json!("abc"), json!(i64::MIN), json!(i64::MAX)])), "abc");
        assert_eq!(s(substr(&[json!("abc"), json!(1), json!(-1e30)])), "");
    }

    #[test]
    fn test_string_helpers_count_characters() {
        assert_eq!(s(first(&[json!("Éloïse"), json!(3)])), "Élo");
        assert_eq!(s(last(&[json!("Français"), json!(4)])), "çais");
    }

    #[test]
    fn test_string_helpers_stringify_numbers() {
        assert_eq!(s(first(&[json!(20201231), json!(4)])), "2020");
    }

    #[test]
    fn test_year() {
        assert_eq!(s(year(&[json!("2020-01-15")])), "2020");
        assert_eq!(s(year(&[json!("Jan 1999")])), "1999");
        assert_eq!(s(year(&[json!("12345")])), "1234");
        assert_eq!(s(year(&[json!("current")])), "current");
        assert_eq!(s(year(&[json!("")])), "");
        assert_eq!(s(year(&[json!(null)])), "");
    }

    #[test]
    fn test_equal() {
        assert_eq!(equal(&[json!("a"), json!("a")]), HelperValue::Plain(json!(true)));
        assert_eq!(equal(&[json!("1"), json!(1)]), HelperValue::Plain(json!(false)));
    }
}
