//! Price Formatting
//!
//! Prices are stored as plain numbers; the currency symbol and grouping
//! separators are presentation only.

use num_format::{Buffer, Locale};

/// Currency symbol shown next to every price.
pub const CURRENCY_SYMBOL: &str = "₦";

/// Format a price with grouping separators. Two decimals are shown only
/// when the stored number is fractional.
pub fn format_price(price: f64) -> String {
    let cents = (price * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut buffer = Buffer::default();
    buffer.write_formatted(&whole, &Locale::en);

    if fraction == 0 {
        format!("{CURRENCY_SYMBOL}{}", buffer.as_str())
    } else {
        format!("{CURRENCY_SYMBOL}{}.{fraction:02}", buffer.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_prices_get_grouped() {
        assert_eq!(format_price(1500.0), "₦1,500");
        assert_eq!(format_price(1234567.0), "₦1,234,567");
    }

    #[test]
    fn test_small_prices_have_no_separator() {
        assert_eq!(format_price(0.0), "₦0");
        assert_eq!(format_price(950.0), "₦950");
    }

    #[test]
    fn test_fractional_prices_keep_two_decimals() {
        assert_eq!(format_price(12.5), "₦12.50");
        assert_eq!(format_price(1999.99), "₦1,999.99");
    }
}
