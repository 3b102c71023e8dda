//! INR formatting for documents and exports.

use rust_decimal::RoundingStrategy;

use crate::types::Money;

/// Round to paise, halves away from zero.
pub fn round_paise(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount as `INR 1,23,456.00` (Indian digit grouping, 2 places).
pub fn format_inr(amount: Money) -> String {
    format!("INR {}", format_amount(amount))
}

/// [`format_inr`] without the currency code, for table cells.
pub fn format_amount(amount: Money) -> String {
    let rounded = round_paise(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let text = magnitude.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    format!("{sign}{}.{fraction}", group_indian(whole))
}

/// Insert separators: the last three digits, then groups of two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
