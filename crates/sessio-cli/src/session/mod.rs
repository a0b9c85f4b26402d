//! CLI session wiring: file-backed credentials plus the HTTP clients.

pub mod storage;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Duration;

use sessio_core::ApiUrl;
use sessio_core::error::{AuthError, Error};
use sessio_file::FileCredentialStore;
use sessio_http::{ApiClient, Session};

use crate::cli::GlobalConfig;

/// Session state for one API, opened from the command line options.
#[derive(Debug)]
pub struct CliSession {
    api: ApiUrl,
    store: Arc<FileCredentialStore>,
    session: Session,
}

impl CliSession {
    /// Open the session for the configured API.
    pub fn open(config: &GlobalConfig) -> Result<Self> {
        let api = config.api_url()?;
        let path = storage::credentials_path(&api)?;
        let max_age = Duration::try_hours(config.credential_ttl_hours)
            .context("Credential TTL is too large")?;
        let store = Arc::new(FileCredentialStore::new(path).with_max_age(max_age));

        let session =
            Session::connect(api.clone(), store.clone()).context("Failed to open session")?;

        Ok(Self {
            api,
            store,
            session,
        })
    }

    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Path of the credential file backing this session.
    pub fn credentials_path(&self) -> &Path {
        self.store.path()
    }

    /// Build a client for authenticated profile calls.
    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::new(self.api.clone(), self.session.clone()).context("Failed to create API client")
    }

    /// Fail early with a hint when nobody is logged in.
    pub fn require_login(&self) -> Result<()> {
        if !self.session.is_authenticated() {
            return Err(anyhow::Error::new(Error::from(AuthError::NotAuthenticated))
                .context("Not logged in. Run 'sessio auth login' first."));
        }
        Ok(())
    }
}
