//! Input sanitization for the seconds field.

use thiserror::Error;

/// Message shown when the seconds input cannot be used.
pub const INVALID_SECONDS_MESSAGE: &str = "Please enter a valid non-negative number.";

/// Error raised when the raw input is not a non-negative number of seconds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please enter a valid non-negative number.")]
pub struct ValidationError;

impl ValidationError {
    /// Returns the user-facing message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        INVALID_SECONDS_MESSAGE
    }
}

/// Parses raw user text into whole seconds.
///
/// The text is trimmed, parsed as a decimal number and floored. Blank text
/// counts as zero. Anything that is not a finite number, is negative after
/// flooring, or does not fit in `u32` is rejected.
///
/// # Errors
///
/// Returns [`ValidationError`] when the text cannot be used as a duration.
///
/// # Example
///
/// ```
/// use countdown::types::sanitize_seconds;
///
/// assert_eq!(sanitize_seconds("60"), Ok(60));
/// assert_eq!(sanitize_seconds("2.9"), Ok(2));
/// assert!(sanitize_seconds("-3").is_err());
/// assert!(sanitize_seconds("abc").is_err());
/// assert_eq!(sanitize_seconds(""), Ok(0));
/// ```
pub fn sanitize_seconds(text: &str) -> Result<u32, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    let value: f64 = trimmed.parse().map_err(|_| ValidationError)?;
    if !value.is_finite() {
        return Err(ValidationError);
    }

    let floored = value.floor();
    // -0.0 floors to -0.0, which compares equal to zero and is accepted
    if floored < 0.0 || floored > f64::from(u32::MAX) {
        return Err(ValidationError);
    }

    Ok(floored as u32)
}
