//! Phone number normalization.
//!
//! Turns whatever a visitor or an operator typed into the canonical international
//! form `+<10..15 digits>`. Every adapter that needs a phone number goes through
//! [`normalize`] and then strips the `+` (or the country code) as its own wire
//! format requires.

/// Region used when the caller does not pick one.
pub const DEFAULT_REGION: &str = "IN";

const MIN_DIGITS: usize = 10;
const MAX_DIGITS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneError {
    #[error("phone number is empty")]
    Empty,
    #[error("phone number has {0} digits, expected 10 to 15")]
    InvalidLength(usize),
}

/// Normalize `raw` to `+<digits>`.
///
/// - A leading `+` keeps everything after it as-is (digits only) if 10–15 digits remain.
/// - Otherwise non-digits and leading zeros are dropped; for region `IN` a bare
///   10-digit number gets `+91` and a 12-digit number starting with `91` gets `+`.
/// - Anything else with 10–15 digits is assumed to already carry a country code.
///
/// ```
/// use frontdesk_domain::phone::normalize;
///
/// assert_eq!(normalize("98765 43210", "IN").unwrap(), "+919876543210");
/// assert_eq!(normalize("+1 (415) 555-0100", "IN").unwrap(), "+14155550100");
/// assert!(normalize("12345", "IN").is_err());
/// ```
pub fn normalize(raw: &str, default_region: &str) -> Result<String, PhoneError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PhoneError::Empty);
    }

    if let Some(rest) = trimmed.strip_prefix('+') {
        let digits = digits_of(rest);
        return if (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
            Ok(format!("+{digits}"))
        } else {
            Err(PhoneError::InvalidLength(digits.len()))
        };
    }

    let digits = digits_of(trimmed);
    if digits.is_empty() {
        return Err(PhoneError::Empty);
    }
    let digits = match digits.trim_start_matches('0') {
        "" => "0",
        rest => rest,
    };

    if default_region.eq_ignore_ascii_case("IN") {
        if digits.len() == 10 {
            return Ok(format!("+91{digits}"));
        }
        if digits.len() == 12 && digits.starts_with("91") {
            return Ok(format!("+{digits}"));
        }
    }

    if (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        Ok(format!("+{digits}"))
    } else {
        Err(PhoneError::InvalidLength(digits.len()))
    }
}

fn digits_of(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}
