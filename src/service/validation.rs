//! Field checks shared by the create payloads.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$";
const HTTP_URL_PATTERN: &str = r"(?i)^https?://[^\s/?#@]+(?:[/?#][^\s]*)?$";

fn email_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

fn http_url_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HTTP_URL_PATTERN).ok()).as_ref()
}

fn is_match(re: Option<&Regex>, field: &str, value: &str) -> Result<bool, AppError> {
    re.map(|r| r.is_match(value))
        .ok_or_else(|| AppError::Validation(format!("invalid pattern for {}", field)))
}

/// Inclusive range check; absent values pass.
pub fn check_range(field: &str, value: Option<i64>, min: i64, max: i64) -> Result<(), AppError> {
    match value {
        Some(v) if v < min => Err(AppError::Validation(format!(
            "{} must be at least {}",
            field, min
        ))),
        Some(v) if v > max => Err(AppError::Validation(format!(
            "{} must be at most {}",
            field, max
        ))),
        _ => Ok(()),
    }
}

pub fn check_email(field: &str, value: &str) -> Result<(), AppError> {
    if is_match(email_re(), field, value)? {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{} must be a valid email", field)))
    }
}

/// Absolute http(s) URL; absent values pass.
pub fn check_http_url(field: &str, value: Option<&str>) -> Result<(), AppError> {
    let Some(v) = value else { return Ok(()) };
    if is_match(http_url_re(), field, v)? {
        Ok(())
    } else {
        Err(AppError::Validation(format!("{} must be an http or https URL", field)))
    }
}
