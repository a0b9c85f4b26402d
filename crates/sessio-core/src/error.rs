//! Error types for sessio.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, storage, and input validation errors.

use std::fmt;
use thiserror::Error;

/// Message used when a collaborator rejects a request without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "API request failed";

/// The unified error type for sessio operations.
///
/// Every failure carries a human-readable message. Callers that need to react
/// to a specific case (an expired session, a missing refresh token) match on
/// the variant instead of inspecting the text.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (missing refresh token, terminated session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-2xx responses, unexpected bodies).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors, detected before any remote call.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Credential storage is unavailable or corrupt.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns true if this error means the caller must log in again.
    pub fn is_session_terminated(&self) -> bool {
        matches!(
            self,
            Error::Auth(
                AuthError::SessionTerminated { .. }
                    | AuthError::NoRefreshToken
                    | AuthError::RefreshRejected(_)
            )
        )
    }

    /// Returns true if the collaborator answered with HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Error::Protocol(err) => err.is_unauthorized(),
            Error::Auth(AuthError::SessionTerminated { .. }) => true,
            _ => false,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No refresh token is stored, so the session cannot be renewed.
    #[error("no refresh token available")]
    NoRefreshToken,

    /// No complete credential set is stored.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The identity provider refused to renew an expired access token.
    #[error(transparent)]
    RefreshRejected(ProtocolError),

    /// The collaborator kept rejecting the credentials after a refresh.
    /// Stored credentials have been cleared.
    #[error("session terminated: {message}")]
    SessionTerminated { message: String },
}

/// Protocol-level errors from collaborator responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Machine-readable error code (if present).
    pub error: Option<String>,
    /// Error message from the collaborator.
    pub message: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref error) = self.error {
            write!(f, " [{}]", error)?;
        }
        write!(f, ": {}", self.message())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, error: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            error,
            message,
        }
    }

    /// A successful response whose body did not have the expected shape.
    pub fn invalid_response(status: u16, reason: impl Into<String>) -> Self {
        Self::new(
            status,
            Some("InvalidResponse".to_string()),
            Some(reason.into()),
        )
    }

    /// The collaborator's message, or a generic one if it sent none.
    pub fn message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(GENERIC_FAILURE_MESSAGE)
    }

    /// Check if this is an authorization failure.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// A required field is missing or malformed.
    #[error("{field}: {reason}")]
    Field { field: &'static str, reason: String },

    /// Invalid API URL format.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid request path.
    #[error("invalid request path '{value}': {reason}")]
    Path { value: String, reason: String },
}

impl InvalidInputError {
    /// Shorthand for a field-level validation failure.
    pub fn field(field: &'static str, reason: impl Into<String>) -> Self {
        InvalidInputError::Field {
            field,
            reason: reason.into(),
        }
    }
}

/// Credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing storage could not be read or written.
    #[error("credential storage unavailable: {message}")]
    Unavailable { message: String },

    /// The stored data could not be decoded.
    #[error("credential storage corrupt: {message}")]
    Corrupt { message: String },
}
