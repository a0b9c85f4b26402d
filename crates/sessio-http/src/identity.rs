//! HTTP-backed identity provider.

use async_trait::async_trait;
use tracing::{debug, instrument};

use sessio_core::error::ProtocolError;
use sessio_core::{
    AccessToken, AccountCreated, ApiUrl, Credentials, IdToken, IdentityProvider, NewAccount,
    RefreshToken, RefreshedTokens, Result, TokenSet,
};

use crate::client::HttpClient;
use crate::endpoints::{
    REFRESH_TOKEN, RefreshTokenRequest, RefreshTokenResponse, SIGN_IN, SIGN_UP, SignInRequest,
    SignInResponse,
};

/// Identity collaborator reached over HTTP.
///
/// Identity calls never carry an authorization header and are never retried.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: HttpClient,
}

impl IdentityClient {
    /// Create a new identity client for the given API.
    pub fn new(api: ApiUrl) -> Result<Self> {
        Ok(Self::from_http(HttpClient::new(api)?))
    }

    /// Wrap an existing HTTP client, sharing its connection pool.
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Returns the API URL for this client.
    pub fn api(&self) -> &ApiUrl {
        self.http.api()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[async_trait]
impl IdentityProvider for IdentityClient {
    #[instrument(skip(self, credentials), fields(api = %self.http.api(), username = %credentials.username()))]
    async fn sign_in(&self, credentials: &Credentials) -> Result<TokenSet> {
        let request = SignInRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        let response: SignInResponse = self.http.post(SIGN_IN, &request).await?;
        debug!(
            expires_in = ?response.expires_in,
            token_type = ?response.token_type,
            "Sign-in accepted"
        );

        TokenSet::from_parts(
            response.access_token,
            response.id_token,
            response.refresh_token,
        )
        .ok_or_else(|| {
            ProtocolError::invalid_response(200, "sign-in response is missing tokens").into()
        })
    }

    #[instrument(skip(self, refresh_token), fields(api = %self.http.api()))]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens> {
        let request = RefreshTokenRequest {
            refresh_token: refresh_token.as_str(),
        };

        let response: RefreshTokenResponse = self.http.post(REFRESH_TOKEN, &request).await?;
        debug!(
            expires_in = ?response.expires_in,
            rotated_refresh = response.refresh_token.is_some(),
            "Refresh accepted"
        );

        let access_token = non_empty(response.access_token).ok_or_else(|| {
            ProtocolError::invalid_response(200, "refresh response is missing the access token")
        })?;

        Ok(RefreshedTokens {
            access_token: AccessToken::new(access_token),
            id_token: non_empty(response.id_token).map(IdToken::new),
            refresh_token: non_empty(response.refresh_token).map(RefreshToken::new),
        })
    }

    #[instrument(skip(self, account), fields(api = %self.http.api(), username = %account.username))]
    async fn sign_up(&self, account: &NewAccount) -> Result<AccountCreated> {
        let created: AccountCreated = self.http.post(SIGN_UP, account).await?;
        debug!(user_id = %created.user_id, "Account created");
        Ok(created)
    }
}
