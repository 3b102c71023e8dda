//! Field-level validation shared by the create/update handlers.

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Money;

/// Minimum characters in a phone number.
pub const MIN_PHONE_LEN: usize = 10;
/// Maximum characters in short text fields (names, cost heads, locations).
pub const MAX_SHORT_TEXT_LEN: usize = 200;

/// Require a non-blank value of bounded length.
pub fn validate_required(value: &str, field: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > MAX_SHORT_TEXT_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_SHORT_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// A phone number needs at least [`MIN_PHONE_LEN`] characters, digits and
/// the usual separators only.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let trimmed = phone.trim();
    if trimmed.chars().count() < MIN_PHONE_LEN {
        return Err(CoreError::Validation(
            "Valid mobile number is required".into(),
        ));
    }
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')');
    if !trimmed.chars().all(allowed) {
        return Err(CoreError::Validation(format!(
            "Phone number contains invalid characters: {trimmed}"
        )));
    }
    Ok(())
}

/// Optional email: blank is treated as absent, anything else must parse.
pub fn validate_optional_email(email: Option<&str>) -> Result<(), CoreError> {
    match email.map(str::trim) {
        None | Some("") => Ok(()),
        Some(value) if value.to_string().validate_email() => Ok(()),
        Some(value) => Err(CoreError::Validation(format!(
            "Invalid email address: {value}"
        ))),
    }
}

/// Ledger amounts must be zero or positive.
pub fn validate_amount(amount: Money, field: &str) -> Result<(), CoreError> {
    if amount < Money::ZERO {
        return Err(CoreError::Validation(format!(
            "{field} must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// An event may span several days but cannot end before it starts.
pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), CoreError> {
    if let Some(end) = end {
        if end < start {
            return Err(CoreError::Validation(format!(
                "Event end date {end} is before start date {start}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_matches!(validate_required("  ", "name"), Err(CoreError::Validation(msg)) if msg == "name is required");
        assert!(validate_required("Anu", "name").is_ok());
    }

    #[test]
    fn required_rejects_overlong() {
        let long = "a".repeat(MAX_SHORT_TEXT_LEN + 1);
        assert!(validate_required(&long, "name").is_err());
    }

    #[test]
    fn phone_length_and_charset() {
        assert!(validate_phone("98765 43210").is_ok());
        assert!(validate_phone("+91 98765-43210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("98765abcde1").is_err());
    }

    #[test]
    fn email_optional_but_checked() {
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("")).is_ok());
        assert!(validate_optional_email(Some("studio@example.com")).is_ok());
        assert!(validate_optional_email(Some("not-an-email")).is_err());
    }

    #[test]
    fn negative_amount_rejected() {
        assert!(validate_amount(Money::from(-1), "amount").is_err());
        assert!(validate_amount(Money::ZERO, "amount").is_ok());
    }

    #[test]
    fn date_range_order() {
        let d = |day| NaiveDate::from_ymd_opt(2026, 2, day).unwrap();
        assert!(validate_date_range(d(10), Some(d(12))).is_ok());
        assert!(validate_date_range(d(10), Some(d(10))).is_ok());
        assert!(validate_date_range(d(10), None).is_ok());
        assert!(validate_date_range(d(12), Some(d(10))).is_err());
    }
}
