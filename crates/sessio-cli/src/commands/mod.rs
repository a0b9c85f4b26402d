//! Command implementations.

pub mod auth;
pub mod profile;

use anyhow::Result;

use sessio_core::Error;

use crate::output;
use crate::session::CliSession;

/// Force a logout after the API refused to renew the session.
///
/// Returns the original error with a hint to log in again.
pub(crate) fn end_session(session: &CliSession, err: Error) -> anyhow::Error {
    if let Err(clear_err) = session.session().logout() {
        tracing::warn!(error = %clear_err, "Failed to clear credentials");
    }
    output::warning("Your session has ended. Run 'sessio auth login' to sign in again.");
    anyhow::Error::new(err).context("Session expired")
}

/// Map a library error, ending the session when it can no longer be renewed.
pub(crate) fn check<T>(session: &CliSession, result: sessio_core::Result<T>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(err) if err.is_session_terminated() => Err(end_session(session, err)),
        Err(err) => Err(err.into()),
    }
}
