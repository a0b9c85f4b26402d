//! Token types for bearer authentication.

use std::fmt;

/// An access token for authenticated profile requests.
///
/// Access tokens are short-lived bearer credentials.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// An identity token carrying user claims.
///
/// Not used for authorization; kept so the credential set stays complete.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(String);

impl IdToken {
    /// Create a new identity token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token for obtaining new access tokens.
///
/// Refresh tokens are longer-lived and used only to mint a new credential set.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Create a new refresh token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in refresh requests.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// Names of the three stored tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Id,
    Refresh,
}

impl TokenKind {
    /// All kinds, in storage order.
    pub const ALL: [TokenKind; 3] = [TokenKind::Access, TokenKind::Id, TokenKind::Refresh];

    /// The storage name of this token.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "accessToken",
            TokenKind::Id => "idToken",
            TokenKind::Refresh => "refreshToken",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A complete credential set.
///
/// All three tokens are present together; a partial set is never constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet {
    pub access_token: AccessToken,
    pub id_token: IdToken,
    pub refresh_token: RefreshToken,
}

impl TokenSet {
    /// Build a set from raw values, returning `None` unless all three are
    /// present and non-empty.
    pub fn from_parts(
        access_token: Option<String>,
        id_token: Option<String>,
        refresh_token: Option<String>,
    ) -> Option<Self> {
        let present = |t: Option<String>| t.filter(|t| !t.is_empty());
        Some(Self {
            access_token: AccessToken::new(present(access_token)?),
            id_token: IdToken::new(present(id_token)?),
            refresh_token: RefreshToken::new(present(refresh_token)?),
        })
    }

    /// Returns the stored value for a token kind.
    pub fn get(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => self.access_token.as_str(),
            TokenKind::Id => self.id_token.as_str(),
            TokenKind::Refresh => self.refresh_token.as_str(),
        }
    }

    /// Apply a refresh result, keeping tokens the identity provider did not rotate.
    pub fn rotate(self, refreshed: RefreshedTokens) -> Self {
        Self {
            access_token: refreshed.access_token,
            id_token: refreshed.id_token.unwrap_or(self.id_token),
            refresh_token: refreshed.refresh_token.unwrap_or(self.refresh_token),
        }
    }
}

/// Tokens returned by a refresh.
///
/// The access token is always rotated. Identity providers may or may not
/// return new identity and refresh tokens.
#[derive(Debug, Clone)]
pub struct RefreshedTokens {
    pub access_token: AccessToken,
    pub id_token: Option<IdToken>,
    pub refresh_token: Option<RefreshToken>,
}
