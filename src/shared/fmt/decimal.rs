//! `Decimal` formatting: currency, percentages, K/M/B/T abbreviations.

use super::{display_formatted_string, group_thousands, NOT_AVAILABLE};
use rust_decimal::prelude::*;

fn round_half_up(value: &Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Exactly `dp` decimals, half rounded away from zero (`1.005`, 2 → `"1.01"`).
pub fn fixed(value: &Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_half_up(value, dp))
}

/// Decimal places for a price: 2 at or above one unit, otherwise enough to
/// show two significant digits (capped at 8).
fn price_decimal_places(value: &Decimal) -> u32 {
    let abs = value.abs();
    if abs.is_zero() || abs >= Decimal::ONE {
        return 2;
    }
    let mut places = 0u32;
    let mut scaled = abs;
    while scaled < Decimal::ONE && places < 8 {
        scaled *= Decimal::TEN;
        places += 1;
    }
    (places + 1).min(8)
}

/// Format a price for display with auto-detected decimal places and trailing
/// zeros trimmed (`1234.5` → `"1,234.5"`, `0.000012345` → `"0.000012"`).
pub fn display(value: &Decimal) -> String {
    display_formatted_string(fixed(value, price_decimal_places(value)))
}

/// US-dollar amount with exactly two decimals (`-12.5` → `"-$12.50"`).
pub fn usd(value: &Decimal) -> String {
    let body = group_thousands(&fixed(&value.abs(), 2));
    if value.is_sign_negative() && !round_half_up(value, 2).is_zero() {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

/// Percentage with two decimals, `"N/A"` when missing.
pub fn percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{}%", fixed(&v, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Percentage with an explicit sign for non-negative values (`"+1.20%"`).
pub fn signed_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) if !v.is_sign_negative() || round_half_up(&v, 2).is_zero() => {
            format!("+{}%", fixed(&v.abs(), 2))
        }
        other => percent(other),
    }
}

/// Holding quantity with eight decimals.
pub fn amount(value: &Decimal) -> String {
    fixed(value, 8)
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr_number(amount: &Decimal, digits: Option<u32>, show_sign: Option<bool>) -> String {
    let digits = digits.unwrap_or(2);
    let show_sign = show_sign.unwrap_or(true);
    let sign = if show_sign && amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let abs_amount = amount.abs();

    let units = [
        (Decimal::from(1_000_000_000_000i64), "T"),
        (Decimal::from(1_000_000_000i64), "B"),
        (Decimal::from(1_000_000i64), "M"),
        (Decimal::from(1_000i64), "K"),
    ];
    for (unit, suffix) in units {
        if abs_amount >= unit {
            return format!("{}{}{}", sign, fixed(&(abs_amount / unit), digits), suffix);
        }
    }
    format!("{}{}", sign, fixed(&abs_amount, digits))
}

/// Dollar total abbreviated for stat cards (`2.45e12` → `"$2.45T"`), `"N/A"`
/// when zero (the upstream omits unknown market caps).
pub fn abbr_usd(value: &Decimal) -> String {
    if value.is_zero() {
        return NOT_AVAILABLE.to_string();
    }
    let abbr = abbr_number(value, Some(2), Some(true));
    match abbr.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", abbr),
    }
}
