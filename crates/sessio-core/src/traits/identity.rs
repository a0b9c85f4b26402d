//! Identity provider trait.

use async_trait::async_trait;

use crate::{AccountCreated, Credentials, NewAccount, RefreshToken, RefreshedTokens, Result, TokenSet};

/// The remote identity collaborator.
///
/// Implementations perform exactly one remote call per method and never
/// retry; renewal policy lives with the caller.
#[async_trait]
pub trait IdentityProvider: Send + Sync + std::fmt::Debug {
    /// Exchange a username and password for a complete credential set.
    async fn sign_in(&self, credentials: &Credentials) -> Result<TokenSet>;

    /// Mint new tokens from a refresh token.
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens>;

    /// Register a new account.
    async fn sign_up(&self, account: &NewAccount) -> Result<AccountCreated>;
}
