//! Amount parsing and display formatting
//!
//! Amounts, share counts and NAV values are carried as `rust_decimal::Decimal`
//! throughout the system. This module owns the two boundary concerns around
//! them: turning user-entered text into a number, and rendering numbers with
//! fixed rules so that calculation logs are reproducible.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Decimal places used when rendering currency amounts
pub const CURRENCY_PRECISION: u32 = 2;

/// Decimal places used when rendering share counts and NAV per share
pub const SHARE_PRECISION: u32 = 4;

/// Absolute tolerance for share and NAV comparisons
pub const AMOUNT_TOLERANCE: Decimal = dec!(0.0001);

/// Relative tolerance for the `total_nav == shares * nav_per_share` invariant
pub const RELATIVE_TOLERANCE: Decimal = dec!(0.000001);

/// Parses a user-entered amount leniently
///
/// Thousands separators, dollar signs and surrounding whitespace are stripped.
/// Empty or unparseable input yields zero rather than an error, so a form can
/// always be recalculated.
///
/// # Example
///
/// ```rust
/// use core_kernel::parse_amount;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(parse_amount("$1,250.50"), dec!(1250.50));
/// assert_eq!(parse_amount("n/a"), dec!(0));
/// ```
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '$')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Formats a number with thousands separators and a fixed number of decimals
///
/// Rounding is half away from zero. Negative zero renders without a sign.
pub fn format_number(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.prec$}", rounded.abs(), prec = dp as usize);

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats a currency amount, e.g. `$1,234.56` or `-$50.00`
pub fn format_currency(value: Decimal, dp: u32) -> String {
    let body = format_number(value, dp);
    match body.strip_prefix('-') {
        Some(unsigned) => format!("-${}", unsigned),
        None => format!("${}", body),
    }
}

/// Returns true if two values differ by no more than `tolerance`
pub fn approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

/// Returns true if two values agree within `tolerance` relative to the larger magnitude
///
/// Values near zero fall back to an absolute comparison against `tolerance`.
pub fn relative_approx_eq(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    let scale = a.abs().max(b.abs()).max(Decimal::ONE);
    (a - b).abs() <= tolerance * scale
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
