//! Filesystem storage for session credentials.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use sessio_core::error::{Error, StorageError};
use sessio_core::{CredentialStore, Result, TokenKind, TokenSet};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// Default credential lifetime: the identity provider's default refresh-token
/// validity of 30 days.
pub const DEFAULT_MAX_AGE_HOURS: i64 = 30 * 24;

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::Unavailable {
        message: format!("IO error: {}", err),
    })
}

/// On-disk credential document.
///
/// Not `Debug`: it carries the raw tokens.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CredentialFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
    stored_at: DateTime<Utc>,
}

impl CredentialFile {
    fn empty() -> Self {
        Self {
            access_token: None,
            id_token: None,
            refresh_token: None,
            stored_at: Utc::now(),
        }
    }

    fn slot(&mut self, kind: TokenKind) -> &mut Option<String> {
        match kind {
            TokenKind::Access => &mut self.access_token,
            TokenKind::Id => &mut self.id_token,
            TokenKind::Refresh => &mut self.refresh_token,
        }
    }

    fn get(&self, kind: TokenKind) -> Option<&String> {
        match kind {
            TokenKind::Access => self.access_token.as_ref(),
            TokenKind::Id => self.id_token.as_ref(),
            TokenKind::Refresh => self.refresh_token.as_ref(),
        }
    }

    fn is_empty(&self) -> bool {
        TokenKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }
}

/// Credential store persisting one JSON file per API.
///
/// Files are readable by their owner only. Every access takes an exclusive
/// lock on a sibling `.lock` file, so separate processes sharing the file
/// never observe half of a rotation.
///
/// Credentials older than the store's maximum age are deleted on the next
/// access and read as absent.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    max_age: Duration,
}

impl FileCredentialStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file and its parent directories are created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_age: Duration::hours(DEFAULT_MAX_AGE_HOURS),
        }
    }

    /// Set how long stored credentials stay valid.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Get the credential file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configured maximum credential age.
    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Run `f` while holding the exclusive file lock.
    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T>) -> Result<T> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }

        let lock_file = Self::open_private(&self.lock_path(), false)?;
        lock_file.lock_exclusive().map_err(map_io)?;

        let result = f();

        lock_file.unlock().map_err(map_io)?;
        result
    }

    fn open_private(path: &Path, truncate: bool) -> Result<File> {
        let mut options = OpenOptions::new();
        options.create(true).write(true).truncate(truncate);
        #[cfg(unix)]
        options.mode(0o600);
        options.open(path).map_err(map_io)
    }

    /// Read the document, discarding it if it has expired. Caller holds the lock.
    fn read(&self) -> Result<Option<CredentialFile>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(e)),
        };

        let document: CredentialFile = serde_json::from_str(&content).map_err(|e| {
            StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            }
        })?;

        let expired = document
            .stored_at
            .checked_add_signed(self.max_age)
            .is_some_and(|expires_at| expires_at <= Utc::now());

        if expired {
            warn!(path = %self.path.display(), stored_at = %document.stored_at, "Stored credentials expired");
            self.remove()?;
            return Ok(None);
        }

        Ok(Some(document))
    }

    /// Replace the document atomically. Caller holds the lock.
    fn write(&self, document: &CredentialFile) -> Result<()> {
        let content = serde_json::to_vec_pretty(document).map_err(|e| StorageError::Corrupt {
            message: format!("failed to encode credentials: {}", e),
        })?;

        let temp_path = self.temp_path();
        let mut file = Self::open_private(&temp_path, true)?;
        file.write_all(&content).map_err(map_io)?;
        file.sync_all().map_err(map_io)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(map_io)?;

        #[cfg(unix)]
        fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(map_io)?;

        Ok(())
    }

    /// Delete the document if present. Caller holds the lock.
    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io(e)),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>> {
        self.with_lock(|| Ok(self.read()?.and_then(|doc| doc.get(kind).cloned())))
    }

    #[instrument(skip(self, token), fields(path = %self.path.display()))]
    fn set(&self, kind: TokenKind, token: &str) -> Result<()> {
        self.with_lock(|| {
            let mut document = self.read()?.unwrap_or_else(CredentialFile::empty);
            *document.slot(kind) = Some(token.to_string());
            document.stored_at = Utc::now();
            self.write(&document)
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear(&self, kind: TokenKind) -> Result<()> {
        self.with_lock(|| {
            let Some(mut document) = self.read()? else {
                return Ok(());
            };
            *document.slot(kind) = None;
            if document.is_empty() {
                self.remove()
            } else {
                self.write(&document)
            }
        })
    }

    fn load(&self) -> Result<Option<TokenSet>> {
        self.with_lock(|| {
            Ok(self.read()?.and_then(|doc| {
                TokenSet::from_parts(doc.access_token, doc.id_token, doc.refresh_token)
            }))
        })
    }

    #[instrument(skip(self, tokens), fields(path = %self.path.display()))]
    fn save(&self, tokens: &TokenSet) -> Result<()> {
        let document = CredentialFile {
            access_token: Some(tokens.access_token.as_str().to_string()),
            id_token: Some(tokens.id_token.as_str().to_string()),
            refresh_token: Some(tokens.refresh_token.as_str().to_string()),
            stored_at: Utc::now(),
        };

        self.with_lock(|| self.write(&document))?;
        debug!("Credentials saved");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn clear_all(&self) -> Result<()> {
        self.with_lock(|| self.remove())?;
        debug!("Credentials cleared");
        Ok(())
    }
}
