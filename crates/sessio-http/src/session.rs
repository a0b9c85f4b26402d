//! Session management for authenticated profile operations.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use sessio_core::error::{AuthError, Error};
use sessio_core::{
    AccessToken, AccountCreated, ApiUrl, CredentialStore, Credentials, IdentityProvider,
    NewAccount, Result, TokenSet,
};

use crate::identity::IdentityClient;

/// Authentication state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

/// A session owning the credential set for one API.
///
/// The session is the only writer of its [`CredentialStore`]: login stores a
/// fresh set, refresh rotates it, logout clears it. Request clients are
/// handed a session instead of reading ambient storage.
///
/// # Thread Safety
///
/// Sessions are cheap to clone (they use internal `Arc`) and are safe to
/// share across tasks. Token refresh is serialized so the read-refresh-write
/// of the credential set never interleaves.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sessio_core::{ApiUrl, Credentials, MemoryStore};
/// use sessio_http::Session;
///
/// # async fn example() -> Result<(), sessio_core::Error> {
/// let api = ApiUrl::new("https://api.example.com/prod")?;
/// let session = Session::connect(api, Arc::new(MemoryStore::new()))?;
/// session.login(Credentials::new("alice", "correct")).await?;
/// assert!(session.is_authenticated());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    identity: Arc<dyn IdentityProvider>,
    store: Arc<dyn CredentialStore>,
    state: RwLock<SessionState>,
    refresh_lock: Mutex<()>,
}

impl Session {
    /// Create a session over an identity provider and a credential store.
    ///
    /// The initial state is read from the store: a complete credential set
    /// means the session starts authenticated.
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        store: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let state = if store.load()?.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        };
        debug!(?state, "Session opened");

        Ok(Self {
            inner: Arc::new(SessionInner {
                identity,
                store,
                state: RwLock::new(state),
                refresh_lock: Mutex::new(()),
            }),
        })
    }

    /// Create a session talking to the identity endpoints of `api`.
    pub fn connect(api: ApiUrl, store: Arc<dyn CredentialStore>) -> Result<Self> {
        Self::new(Arc::new(IdentityClient::new(api)?), store)
    }

    /// Returns the current authentication state.
    pub fn state(&self) -> SessionState {
        *self
            .inner
            .state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns true if the session holds a credential set.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Read the current credential set, if complete.
    pub fn tokens(&self) -> Result<Option<TokenSet>> {
        self.inner.store.load()
    }

    fn set_state(&self, state: SessionState) {
        let mut current = self
            .inner
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *current = state;
    }

    /// Sign in and store the issued credential set.
    ///
    /// # Errors
    ///
    /// Returns a validation error without any network call if a field is
    /// blank. Collaborator errors (such as invalid credentials) propagate
    /// unchanged and are not retried.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Result<()> {
        credentials.validate()?;
        info!("Signing in");

        let tokens = self.inner.identity.sign_in(&credentials).await?;
        self.inner.store.save(&tokens)?;
        self.set_state(SessionState::Authenticated);

        debug!("Signed in successfully");
        Ok(())
    }

    /// Clear the credential set and mark the session unauthenticated.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.inner.store.clear_all()?;
        self.set_state(SessionState::Unauthenticated);
        info!("Signed out");
        Ok(())
    }

    /// Refresh the session tokens.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoRefreshToken`] without any network call if no
    /// credential set is stored. Collaborator errors propagate unchanged and
    /// leave the session state as it was.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        let tokens = self
            .inner
            .store
            .load()?
            .ok_or(AuthError::NoRefreshToken)?;
        self.rotate(tokens).await
    }

    /// Register a new account. Does not change the session state.
    #[instrument(skip(self, account), fields(username = %account.username))]
    pub async fn sign_up(&self, account: &NewAccount) -> Result<AccountCreated> {
        account.validate()?;
        info!("Creating account");
        self.inner.identity.sign_up(account).await
    }

    /// Renew the credentials after `rejected` was refused with a 401.
    ///
    /// If another task rotated the access token while this one waited for
    /// the refresh lock, the new token is used as is.
    pub(crate) async fn renew_after_rejection(&self, rejected: &AccessToken) -> Result<()> {
        let _guard = self.inner.refresh_lock.lock().await;
        let tokens = self
            .inner
            .store
            .load()?
            .ok_or(AuthError::NoRefreshToken)?;

        if &tokens.access_token != rejected {
            debug!("Access token already rotated by another request");
            return Ok(());
        }

        // A refusal from the identity provider means the session cannot be
        // renewed; transport failures pass through untouched.
        self.rotate(tokens).await.map_err(|err| match err {
            Error::Protocol(refused) => AuthError::RefreshRejected(refused).into(),
            other => other,
        })
    }

    /// Drop the credentials after the API kept refusing them.
    pub(crate) fn terminate(&self) -> Result<()> {
        warn!("Credentials rejected after refresh, clearing session");
        self.inner.store.clear_all()?;
        self.set_state(SessionState::Unauthenticated);
        Ok(())
    }

    // Caller holds the refresh lock.
    async fn rotate(&self, tokens: TokenSet) -> Result<()> {
        info!("Refreshing session");

        let refreshed = self.inner.identity.refresh(&tokens.refresh_token).await?;
        let rotated = tokens.rotate(refreshed);
        self.inner.store.save(&rotated)?;
        self.set_state(SessionState::Authenticated);

        debug!("Session refreshed successfully");
        Ok(())
    }
}

// Custom Debug impl that hides sensitive data
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state())
            .field("identity", &self.inner.identity)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
