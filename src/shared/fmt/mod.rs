//! Display formatting for prices, percentages and market-wide totals.
//!
//! Everything the presentation layer shows as text goes through here so that
//! missing values consistently render as [`NOT_AVAILABLE`].

pub mod decimal;

pub use decimal::{abbr_number, abbr_usd, amount, display, fixed, percent, signed_percent, usd};

/// Placeholder for values the upstream API did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Adds thousands separators to a plain formatted number (`"-1234.5"` →
/// `"-1,234.5"`). The fractional part is left untouched.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Trims trailing zeros of a fractional part and then groups thousands.
pub fn display_formatted_string(formatted: String) -> String {
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    group_thousands(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567.891"), "1,234,567.891");
        assert_eq!(group_thousands("-1234.56"), "-1,234.56");
        assert_eq!(group_thousands("-100"), "-100");
    }

    #[test]
    fn test_display_formatted_string_trims() {
        assert_eq!(display_formatted_string("1.500".into()), "1.5");
        assert_eq!(display_formatted_string("1000.00".into()), "1,000");
        assert_eq!(display_formatted_string("1200".into()), "1,200");
    }
}
