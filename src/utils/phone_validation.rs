//! Phone number validation for transfer targets
//!
//! Transfers go to PSTN numbers, which the call-control service expects in
//! E.164 form. Configured numbers are normalized once at start-up.

use thiserror::Error;

/// E.164 allows at most 15 digits; shorter than 7 is not a dialable number.
const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhoneValidationError {
    #[error("Phone number is empty")]
    Empty,

    #[error("Phone number contains invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("Phone number must have between 7 and 15 digits, got {0}")]
    InvalidLength(usize),
}

/// Validate and normalize a phone number
///
/// Accepts an optional `tel:` prefix, an optional leading `+`, and the usual
/// visual separators (spaces, dashes, dots, parentheses). Returns the number
/// with separators and prefix removed, e.g. `tel:+1 (555) 010-2000` becomes
/// `+15550102000`.
pub fn validate_phone_number(raw: &str) -> Result<String, PhoneValidationError> {
    let trimmed = raw.trim();
    let without_scheme = match trimmed.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tel:") => &trimmed[4..],
        _ => trimmed,
    };

    if without_scheme.is_empty() {
        return Err(PhoneValidationError::Empty);
    }

    let (plus, rest) = match without_scheme.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", without_scheme),
    };

    let mut digits = String::with_capacity(rest.len());
    for c in rest.chars() {
        match c {
            '0'..='9' => digits.push(c),
            ' ' | '-' | '.' | '(' | ')' => {}
            other => return Err(PhoneValidationError::InvalidCharacter(other)),
        }
    }

    if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits.len()) {
        return Err(PhoneValidationError::InvalidLength(digits.len()));
    }

    Ok(format!("{plus}{digits}"))
}
