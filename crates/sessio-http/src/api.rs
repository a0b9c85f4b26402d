//! Authenticated API client with one-shot token renewal.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use sessio_core::error::AuthError;
use sessio_core::{ApiUrl, Profile, ProfileUpdate, Result, validation};

use crate::client::{HttpClient, decode};
use crate::endpoints::PROFILE;
use crate::session::Session;

/// Whether a request is on its first try or its single retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    Initial,
    Retried,
}

/// Client for endpoints that require the session's access token.
///
/// A request rejected with HTTP 401 triggers one token refresh followed by
/// one retry of the same request. A second 401 ends the session: the stored
/// credentials are cleared and [`AuthError::SessionTerminated`] is returned.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sessio_core::{ApiUrl, MemoryStore};
/// use sessio_http::{ApiClient, Session};
///
/// # async fn example() -> Result<(), sessio_core::Error> {
/// let api = ApiUrl::new("https://api.example.com/prod")?;
/// let session = Session::connect(api.clone(), Arc::new(MemoryStore::new()))?;
/// let client = ApiClient::new(api, session)?;
/// let profile = client.get_profile().await?;
/// println!("{}", profile.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    session: Session,
}

impl ApiClient {
    /// Create a client for `api` that authenticates through `session`.
    pub fn new(api: ApiUrl, session: Session) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(api)?,
            session,
        })
    }

    /// Returns the session used for authentication.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send an authenticated request and return the parsed body.
    ///
    /// `path` must be a path on the configured API, such as `/profile`.
    /// Bodies that are empty or not JSON come back as an empty object.
    ///
    /// # Errors
    ///
    /// - [`InvalidInputError::Path`](sessio_core::error::InvalidInputError)
    ///   for an absolute URL or a path without a leading `/`.
    /// - [`AuthError::SessionTerminated`] if the request is still rejected
    ///   after a refresh.
    /// - [`AuthError::RefreshRejected`] carrying the identity provider's
    ///   error if it refuses to renew the tokens. Transport failures during
    ///   renewal come back as they are.
    /// - A protocol error carrying the server's message for any other
    ///   non-2xx status.
    #[instrument(skip(self, body), fields(api = %self.http.api()))]
    pub async fn request(&self, path: &str, method: Method, body: Option<&Value>) -> Result<Value> {
        validation::request_path(path)?;

        let mut attempt = Attempt::Initial;
        loop {
            let tokens = self.session.tokens()?;
            let access = tokens.as_ref().map(|t| &t.access_token);

            let response = self
                .http
                .send(method.clone(), path, body, access.map(|t| t.as_str()))
                .await?;

            if response.is_success() {
                return Ok(response.body);
            }

            if !response.is_unauthorized() {
                return Err(response.into_error().into());
            }

            match (attempt, access) {
                (Attempt::Initial, Some(rejected)) => {
                    debug!("Access token rejected, renewing");
                    self.session.renew_after_rejection(rejected).await?;
                    attempt = Attempt::Retried;
                }
                (Attempt::Retried, Some(_)) => {
                    let message = response.into_error().message().to_string();
                    warn!(%message, "Request rejected after renewal");
                    self.session.terminate()?;
                    return Err(AuthError::SessionTerminated { message }.into());
                }
                (_, None) => return Err(response.into_error().into()),
            }
        }
    }

    /// Fetch the caller's profile.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<Profile> {
        let body = self.request(PROFILE, Method::GET, None).await?;
        decode(reqwest::StatusCode::OK, body)
    }

    /// Update the caller's name and email.
    ///
    /// Blank fields are rejected before any request is sent.
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        update.validate()?;

        let body = serde_json::json!({
            "name": update.name,
            "email": update.email,
        });
        let body = self.request(PROFILE, Method::PUT, Some(&body)).await?;
        decode(reqwest::StatusCode::OK, body)
    }
}
