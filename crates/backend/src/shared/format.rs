/// Philippine peso sign
pub const PESO_SIGN: char = '₱';

/// Groups digits by three with commas: "1234567" -> "1,234,567"
fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Formats a count with comma thousands separators
///
/// # Examples
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    group_thousands(&n.to_string())
}

/// Formats an amount as en-PH peso currency.
///
/// Up to two fraction digits, trailing zeros dropped, so whole amounts have
/// no decimals. A missing or NaN amount formats as zero.
///
/// # Examples
/// ```
/// use backend::shared::format::format_currency;
/// assert_eq!(format_currency(Some(1234.0)), "₱1,234");
/// assert_eq!(format_currency(Some(99.5)), "₱99.5");
/// assert_eq!(format_currency(None), "₱0");
/// ```
pub fn format_currency(value: Option<f64>) -> String {
    let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    let rounded = format!("{:.2}", value.abs());
    let (integer_part, fraction_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let fraction = fraction_part.trim_end_matches('0');

    // -0.001 rounds to zero and is shown without a sign
    let negative = value < 0.0 && (integer_part != "0" || !fraction.is_empty());

    let mut result = String::new();
    if negative {
        result.push('-');
    }
    result.push(PESO_SIGN);
    result.push_str(&group_thousands(integer_part));
    if !fraction.is_empty() {
        result.push('.');
        result.push_str(fraction);
    }
    result
}
