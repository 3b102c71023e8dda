//! Human-readable quotation and order numbers.
//!
//! Numbers look like `Q-AKP-26-0001`: a fixed prefix, the two-digit year, and
//! a zero-padded sequence that restarts every year. The next number is one
//! past the highest existing sequence for the current year's prefix.

use chrono::Datelike;

pub const QUOTATION_PREFIX: &str = "Q-AKP";
pub const ORDER_PREFIX: &str = "ORD-AKP";

/// Minimum digits in the sequence part.
pub const SEQUENCE_WIDTH: usize = 4;

/// Attempts to insert a freshly numbered row before falling back to a
/// randomised number.
pub const MAX_NUMBERING_ATTEMPTS: u32 = 3;

/// Prefix for the given date's year, including the trailing dash:
/// `Q-AKP-26-`.
pub fn year_prefix(base: &str, date: chrono::NaiveDate) -> String {
    format!("{base}-{:02}-", date.year().rem_euclid(100))
}

/// Parse the sequence part of `number` if it carries `prefix`.
pub fn parse_sequence(prefix: &str, number: &str) -> Option<u32> {
    let rest = number.strip_prefix(prefix)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Next number after the highest sequence among `existing` for `prefix`.
pub fn next_number<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let max = existing
        .into_iter()
        .filter_map(|n| parse_sequence(prefix, n))
        .max()
        .unwrap_or(0);
    format_number(prefix, max.saturating_add(1))
}

pub fn format_number(prefix: &str, sequence: u32) -> String {
    format!("{prefix}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Disambiguate a number that keeps colliding under concurrent creation.
pub fn with_collision_suffix(number: &str, suffix: u16) -> String {
    format!("{number}-{suffix:04X}")
}
