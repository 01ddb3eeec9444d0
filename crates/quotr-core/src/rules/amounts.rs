//! Amount parsing, formatting and derivation.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::patterns::AMOUNT_TEXT;

/// Parse amount text, returning `None` when it is not numeric.
///
/// Thousands separators (commas, spaces, non-breaking spaces) are ignored and
/// a single currency symbol or three-letter code may precede or follow the
/// number.
pub fn try_parse_amount(s: &str) -> Option<Decimal> {
    let caps = AMOUNT_TEXT.captures(s.trim())?;

    let cleaned: String = caps[1]
        .chars()
        .filter(|c| !(*c == ',' || c.is_whitespace()))
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    Decimal::from_str(cleaned).ok()
}

/// Parse amount text, treating anything non-numeric as zero.
pub fn parse_amount(s: &str) -> Decimal {
    try_parse_amount(s).unwrap_or(Decimal::ZERO)
}

/// Format an amount with comma grouping and exactly two fraction digits,
/// e.g. `1,234.50`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };

    let plain = format!("{:.2}", rounded.abs());
    let (integer, fraction) = plain.split_once('.').unwrap_or((&plain, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

/// Derive the total amount text from quantity and unit cost text.
///
/// Returns an empty string unless the product is strictly positive.
pub fn compute_total(quantity: &str, unit_cost: &str) -> String {
    let product = parse_amount(quantity).checked_mul(parse_amount(unit_cost));

    match product {
        Some(total) if total > Decimal::ZERO => format_amount(total),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("1234.5"), Decimal::new(12345, 1));
        assert_eq!(parse_amount("42"), Decimal::from(42));
        assert_eq!(parse_amount("0.75"), Decimal::new(75, 2));
    }

    #[test]
    fn test_parse_amount_separators() {
        assert_eq!(parse_amount("1,234.50"), Decimal::new(123450, 2));
        assert_eq!(parse_amount("1 200"), Decimal::from(1200));
        assert_eq!(parse_amount("12\u{00a0}500.00"), Decimal::new(1250000, 2));
    }

    #[test]
    fn test_parse_amount_currency_markers() {
        assert_eq!(parse_amount("$1,500"), Decimal::from(1500));
        assert_eq!(parse_amount("AED 2,750.25"), Decimal::new(275025, 2));
        assert_eq!(parse_amount("980.00 USD"), Decimal::from(980));
        assert_eq!(parse_amount("€ 12"), Decimal::from(12));
    }

    #[test]
    fn test_parse_amount_invalid_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("not-a-number"), Decimal::ZERO);
        assert_eq!(parse_amount("1.2.3"), Decimal::ZERO);
        assert_eq!(parse_amount("USD"), Decimal::ZERO);
        assert_eq!(try_parse_amount("n/a"), None);
    }

    #[test]
    fn test_parse_amount_negative() {
        assert_eq!(parse_amount("-50"), Decimal::from(-50));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(12345, 1)), "1,234.50");
        assert_eq!(format_amount(Decimal::from(300)), "300.00");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::from(1_000_000)), "1,000,000.00");
        assert_eq!(format_amount(Decimal::new(-98765, 1)), "-9,876.50");
    }

    #[test]
    fn test_parse_reads_back_formatted_amounts() {
        for amount in [
            Decimal::new(12345, 1),
            Decimal::ZERO,
            Decimal::new(-98765, 1),
            Decimal::new(-5, 2),
            Decimal::new(123456789, 2),
            Decimal::from(-1_000_000),
            Decimal::new(98765432101, 2),
        ] {
            let formatted = format_amount(amount);
            assert_eq!(parse_amount(&formatted), amount, "{formatted}");
        }
    }

    #[test]
    fn test_format_amount_rounding() {
        assert_eq!(format_amount(Decimal::new(10005, 3)), "10.01");
        assert_eq!(format_amount(Decimal::new(-4, 3)), "0.00");
    }

    #[test]
    fn test_compute_total() {
        assert_eq!(compute_total("10", "25.5"), "255.00");
        assert_eq!(compute_total("1,000", "12.345"), "12,345.00");
        assert_eq!(compute_total("3", "$19.99"), "59.97");
    }

    #[test]
    fn test_compute_total_non_positive_is_empty() {
        assert_eq!(compute_total("", "25"), "");
        assert_eq!(compute_total("10", "abc"), "");
        assert_eq!(compute_total("0", "25"), "");
        assert_eq!(compute_total("-2", "25"), "");
    }
}
