//! Lenient extraction of numeric targets from pre-rendered text.
//!
//! These parsers read the longest numeric prefix of a string and ignore any
//! trailing text, so `"3.75 GPA"` yields `3.75` and `"120 credits"` yields
//! `120`. Anything without a leading number yields `None`; callers treat that
//! as "do not animate".

use crate::format::Formatter;

/// Parse the leading decimal number of `text`, including an optional sign,
/// fraction and exponent.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    end += count_digits(&bytes[end..]);
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(&bytes[end + 1..]);
        if fraction > 0 || digits > 0 {
            end += 1 + fraction;
            digits += fraction;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse the leading base-10 integer of `text`.
///
/// Digit runs that do not fit in an `i64` yield `None`.
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let sign_len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = count_digits(&bytes[sign_len..]);
    if digits == 0 {
        return None;
    }
    text[..sign_len + digits].parse().ok()
}

/// Parse a currency amount such as `"$1,234.50"` or `"-$42.00"`.
///
/// The text must start with the formatter's currency symbol (after an
/// optional minus sign). Grouping separators are removed before parsing.
pub fn parse_currency(text: &str, formatter: &Formatter) -> Option<f64> {
    let text = text.trim();
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    };
    let amount = rest.strip_prefix(formatter.currency_symbol.as_str())?;
    let cleaned: String = amount
        .chars()
        .filter(|c| *c != formatter.group_separator)
        .collect();
    let value = parse_decimal(&cleaned)?;
    Some(if negative { -value } else { value })
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal_prefix() {
        assert_eq!(parse_decimal("3.75"), Some(3.75));
        assert_eq!(parse_decimal("  3.75 GPA"), Some(3.75));
        assert_eq!(parse_decimal("-12.5"), Some(-12.5));
        assert_eq!(parse_decimal(".5"), Some(0.5));
        assert_eq!(parse_decimal("4."), Some(4.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("2e"), Some(2.0));
        assert_eq!(parse_decimal("1,234.50"), Some(1.0));
    }

    #[test]
    fn test_parse_decimal_rejects_non_numbers() {
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("$12"), None);
        assert_eq!(parse_decimal("1e999"), None);
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("120"), Some(120));
        assert_eq!(parse_integer(" 45 credits"), Some(45));
        assert_eq!(parse_integer("7.9"), Some(7));
        assert_eq!(parse_integer("-3"), Some(-3));
        assert_eq!(parse_integer("N/A"), None);
        assert_eq!(parse_integer("+"), None);
        assert_eq!(parse_integer("99999999999999999999"), None);
    }

    #[test]
    fn test_parse_currency() {
        let formatter = Formatter::default();
        assert_eq!(parse_currency("$1,234.50", &formatter), Some(1234.5));
        assert_eq!(parse_currency(" $12,345,678.00 ", &formatter), Some(12_345_678.0));
        assert_eq!(parse_currency("-$42.00", &formatter), Some(-42.0));
        assert_eq!(parse_currency("$-42.00", &formatter), Some(-42.0));
        assert_eq!(parse_currency("$0.00", &formatter), Some(0.0));
    }

    #[test]
    fn test_parse_currency_requires_symbol() {
        let formatter = Formatter::default();
        assert_eq!(parse_currency("1234.50", &formatter), None);
        assert_eq!(parse_currency("$N/A", &formatter), None);
        assert_eq!(parse_currency("N/A", &formatter), None);
    }
}
