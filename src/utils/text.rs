/// Render a price in the display currency.
///
/// Rupiah follows the Indonesian locale (`Rp 1.234.567,89`); every other
/// currency gets its upper-cased code and English grouping (`USD 1,234.57`).
pub fn format_price(value: Option<f64>, currency: &str) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "-".to_string();
    };

    let rounded = format!("{:.2}", value.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let negative = value < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let sign = if negative { "-" } else { "" };

    let code = currency.trim().to_ascii_uppercase();
    if code == "IDR" {
        format!("{}Rp {},{}", sign, group_thousands(whole, '.'), fraction)
    } else {
        format!("{}{} {}.{}", sign, code, group_thousands(whole, ','), fraction)
    }
}

/// 24h change with two decimals, `-` when the API sent nothing.
pub fn format_change(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(change) => format!("{:.2}%", change),
        None => "-".to_string(),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_uses_dot_grouping_and_comma_decimals() {
        assert_eq!(format_price(Some(1_234_567.891), "idr"), "Rp 1.234.567,89");
        assert_eq!(format_price(Some(950.0), "IDR"), "Rp 950,00");
        assert_eq!(format_price(Some(1000.0), "idr"), "Rp 1.000,00");
    }

    #[test]
    fn other_currencies_use_code_prefix() {
        assert_eq!(format_price(Some(64_123.456), "usd"), "USD 64,123.46");
        assert_eq!(format_price(Some(0.5), "eur"), "EUR 0.50");
    }

    #[test]
    fn negative_and_missing_prices() {
        assert_eq!(format_price(Some(-1234.5), "idr"), "-Rp 1.234,50");
        assert_eq!(format_price(Some(-0.001), "usd"), "USD 0.00");
        assert_eq!(format_price(None, "idr"), "-");
        assert_eq!(format_price(Some(f64::NAN), "idr"), "-");
    }

    #[test]
    fn change_keeps_sign_and_two_decimals() {
        assert_eq!(format_change(Some(3.14159)), "3.14%");
        assert_eq!(format_change(Some(-0.5)), "-0.50%");
        assert_eq!(format_change(None), "-");
    }
}
