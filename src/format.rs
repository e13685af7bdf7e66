//! Number formatting for count-up surfaces.
//!
//! Three display modes are supported:
//!
//! - [`NumberFormat::Integer`] - rounded to a whole number (`"7"`)
//! - [`NumberFormat::Decimal2`] - two fixed decimal places (`"3.75"`)
//! - [`NumberFormat::Currency`] - two fixed places, a currency symbol and
//!   thousands grouping (`"$12,345.68"`)
//!
//! Negative values put the minus sign before the currency symbol
//! (`"-$42.00"`). A value is rendered with a sign only when it is strictly
//! negative, so `-0.0` renders as `"$0.00"`.

/// How a numeric value is rendered into text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    /// Whole number, no grouping
    Integer,
    /// Fixed two decimal places, no grouping
    Decimal2,
    /// Fixed two decimal places with currency symbol and thousands grouping
    #[default]
    Currency,
}

/// Currency symbol and grouping separator used by [`NumberFormat::Currency`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formatter {
    pub currency_symbol: String,
    pub group_separator: char,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            group_separator: ',',
        }
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn group_separator(mut self, separator: char) -> Self {
        self.group_separator = separator;
        self
    }

    /// Render `value` according to `format`
    pub fn format(&self, value: f64, format: NumberFormat) -> String {
        let magnitude = value.abs();
        let body = match format {
            NumberFormat::Integer => format!("{:.0}", round_half_up(magnitude, 0)),
            NumberFormat::Decimal2 => format!("{:.2}", round_half_up(magnitude, 2)),
            NumberFormat::Currency => {
                let fixed = format!("{:.2}", round_half_up(magnitude, 2));
                let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
                format!(
                    "{}{}.{}",
                    self.currency_symbol,
                    group_thousands(whole, self.group_separator),
                    fraction
                )
            }
        };

        if value < 0.0 {
            format!("-{body}")
        } else {
            body
        }
    }
}

/// Round a non-negative value to `places` decimals with ties going up, so an
/// exact `0.125` becomes `0.13` rather than the even `0.12` that `{:.2}`
/// alone would produce.
fn round_half_up(magnitude: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = magnitude * factor;
    if scaled.is_finite() {
        scaled.round() / factor
    } else {
        magnitude
    }
}

/// Insert `separator` every three digits, counting leftward from the end.
/// Expects only the integer digits of a number.
pub fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn currency(value: f64) -> String {
        Formatter::default().format(value, NumberFormat::Currency)
    }

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(currency(1234.5), "$1,234.50");
        assert_eq!(currency(12345.678), "$12,345.68");
        assert_eq!(currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(currency(999.999), "$1,000.00");
    }

    #[test]
    fn test_currency_small_values() {
        assert_eq!(currency(0.0), "$0.00");
        assert_eq!(currency(5.0), "$5.00");
        assert_eq!(currency(123.4), "$123.40");
    }

    #[test]
    fn test_currency_negative_sign_precedes_symbol() {
        assert_eq!(currency(-42.0), "-$42.00");
        assert_eq!(currency(-1234.5), "-$1,234.50");
    }

    #[test]
    fn test_negative_zero_is_unsigned() {
        assert_eq!(currency(-0.0), "$0.00");
        assert_eq!(Formatter::default().format(-0.0, NumberFormat::Integer), "0");
    }

    #[test]
    fn test_fraction_is_never_grouped() {
        let formatter = Formatter::default();
        assert_eq!(formatter.format(1234.5678, NumberFormat::Decimal2), "1234.57");
        assert_eq!(currency(1234.5678), "$1,234.57");
    }

    #[test]
    fn test_integer_and_decimal() {
        let formatter = Formatter::default();
        assert_eq!(formatter.format(7.0, NumberFormat::Integer), "7");
        assert_eq!(formatter.format(12345.0, NumberFormat::Integer), "12345");
        assert_eq!(formatter.format(3.7, NumberFormat::Decimal2), "3.70");
        assert_eq!(formatter.format(-2.5, NumberFormat::Decimal2), "-2.50");
    }

    #[test]
    fn test_custom_symbol_and_separator() {
        let formatter = Formatter::new().currency_symbol("€").group_separator('.');
        assert_eq!(formatter.format(98765.4, NumberFormat::Currency), "€98.765.40");
    }

    #[test]
    fn test_ties_round_up() {
        let formatter = Formatter::default();
        assert_eq!(currency(0.125), "$0.13");
        assert_eq!(currency(-0.125), "-$0.13");
        assert_eq!(formatter.format(3.125, NumberFormat::Decimal2), "3.13");
        assert_eq!(formatter.format(2.5, NumberFormat::Integer), "3");
        assert_eq!(formatter.format(0.5, NumberFormat::Integer), "1");
        assert_eq!(currency(1_000_000.125), "$1,000,000.13");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1", ','), "1");
        assert_eq!(group_thousands("123", ','), "123");
        assert_eq!(group_thousands("1234", ','), "1,234");
        assert_eq!(group_thousands("123456", ','), "123,456");
        assert_eq!(group_thousands("1234567", ','), "1,234,567");
    }
}
