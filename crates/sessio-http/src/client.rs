//! HTTP client implementation.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use sessio_core::error::{Error, ProtocolError, StorageError, TransportError};
use sessio_core::{ApiUrl, Result};

use crate::endpoints::ErrorResponse;

/// Map a reqwest failure onto the transport error taxonomy.
pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

/// Decode a parsed body into a typed response.
pub(crate) fn decode<R: DeserializeOwned>(status: StatusCode, body: Value) -> Result<R> {
    serde_json::from_value(body).map_err(|e| {
        ProtocolError::invalid_response(status.as_u16(), format!("unexpected response body: {}", e))
            .into()
    })
}

/// A response with its body already parsed.
///
/// Bodies that are empty or not JSON are represented as an empty object.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl RawResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true for HTTP 401.
    pub fn is_unauthorized(&self) -> bool {
        self.status == StatusCode::UNAUTHORIZED
    }

    /// Build the protocol error for a rejected request.
    pub fn into_error(self) -> ProtocolError {
        let status = self.status.as_u16();
        match serde_json::from_value::<ErrorResponse>(self.body) {
            Ok(body) => ProtocolError::new(status, body.error, body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }

    /// Return the body of a successful response, or the protocol error.
    pub fn into_result(self) -> Result<Value> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::Protocol(self.into_error()))
        }
    }
}

/// HTTP client for the profile/identity API.
///
/// Performs exactly one request per call. Retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl HttpClient {
    /// Create a new client for the given API.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sessio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, api })
    }

    /// Returns the API URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// Send one request, optionally with a bearer token and a JSON body.
    #[instrument(skip(self, body, token), fields(api = %self.api, authed = token.is_some()))]
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<RawResponse> {
        let url = self.api.endpoint(path);
        debug!(%method, path, "HTTP request");

        let mut request = self.client.request(method, &url);
        if let Some(token) = token {
            request = request.headers(Self::auth_headers(token)?);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_reqwest)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest)?;
        trace!(status = %status, len = bytes.len(), "HTTP response");

        Ok(RawResponse {
            status,
            body: Self::parse_body(&bytes),
        })
    }

    /// Make an unauthenticated POST and decode a successful response.
    #[instrument(skip(self, body), fields(api = %self.api))]
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| TransportError::Http {
            message: format!("failed to encode request body: {}", e),
        })?;

        let response = self.send(Method::POST, path, Some(&body), None).await?;
        let status = response.status;
        let body = response.into_result()?;
        decode(status, body)
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        // The token was read from the credential store.
        let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            StorageError::Corrupt {
                message: "stored access token is not a valid header value".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Parse a response body as JSON, falling back to an empty object.
    fn parse_body(bytes: &[u8]) -> Value {
        match serde_json::from_slice(bytes) {
            Ok(value) => value,
            Err(_) => {
                if !bytes.is_empty() {
                    trace!("response body is not JSON, treating as empty");
                }
                Value::Object(serde_json::Map::new())
            }
        }
    }
}
