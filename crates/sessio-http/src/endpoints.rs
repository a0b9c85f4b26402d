//! Endpoint paths and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Account registration.
pub const SIGN_UP: &str = "/signup";

/// Password sign-in.
pub const SIGN_IN: &str = "/signin";

/// Token refresh.
pub const REFRESH_TOKEN: &str = "/refresh-token";

/// The caller's profile (GET and PUT).
pub const PROFILE: &str = "/profile";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for sign-in.
///
/// Not `Debug`: it carries the password.
#[derive(Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from sign-in.
///
/// Token fields are optional here so a short response is reported as an
/// invalid response rather than a decoding failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SignInResponse {
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from token refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RefreshTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Error body sent with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
