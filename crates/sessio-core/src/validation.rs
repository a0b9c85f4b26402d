//! Local input validation.
//!
//! Everything here runs before a request leaves the process, so a rejected
//! input never has a remote side effect.

use crate::Result;
use crate::error::InvalidInputError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Fail if `value` is empty or whitespace only.
pub fn required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(InvalidInputError::field(field, "is required").into());
    }
    Ok(())
}

/// Check a signup password against the identity provider's policy.
pub fn password_policy(password: &str) -> Result<()> {
    required("password", password)?;

    let reason = if password.chars().count() < MIN_PASSWORD_LENGTH {
        Some(format!("must be at least {} characters", MIN_PASSWORD_LENGTH))
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        Some("must contain at least one uppercase letter".to_string())
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        Some("must contain at least one lowercase letter".to_string())
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("must contain at least one number".to_string())
    } else if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some("must contain at least one special character (e.g., ! @ # $ % ^ & * _ -)".to_string())
    } else {
        None
    };

    match reason {
        Some(reason) => Err(InvalidInputError::field("password", reason).into()),
        None => Ok(()),
    }
}

/// Check that a request path is relative to the API base URL.
///
/// Absolute URLs are refused so tokens are only ever sent to the origin
/// they were issued for.
pub fn request_path(path: &str) -> Result<()> {
    if !path.starts_with('/') || path.starts_with("//") {
        return Err(InvalidInputError::Path {
            value: path.to_string(),
            reason: "must be an absolute path starting with '/'".to_string(),
        }
        .into());
    }
    if path.contains("://") {
        return Err(InvalidInputError::Path {
            value: path.to_string(),
            reason: "must not contain a URL scheme".to_string(),
        }
        .into());
    }
    Ok(())
}
