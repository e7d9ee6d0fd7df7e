//! Display helpers for monetary amounts and percentages.
//!
//! CRITICAL: Rounding happens here and only here. Stored and aggregated
//! amounts keep their full `Decimal` precision.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount as US dollars with two decimals and thousands grouping.
///
/// `1234.5` becomes `"$1,234.50"`, `-3` becomes `"-$3.00"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let fixed = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{frac_part}", group_thousands(int_part))
}

/// Formats a percentage with one decimal, e.g. `"142.3%"`.
#[must_use]
pub fn format_percent(percent: Decimal) -> String {
    let rounded = percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
