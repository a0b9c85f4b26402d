//! Credential storage.
//!
//! A [`CredentialStore`] keeps the three session tokens for one API origin.
//! Per-token access mirrors how the tokens are addressed individually; the
//! provided whole-set methods are what session code uses so the triple is
//! always written and cleared together.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::Result;
use crate::error::StorageError;
use crate::tokens::{TokenKind, TokenSet};

/// Storage for the access, identity and refresh tokens.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Read one token.
    fn get(&self, kind: TokenKind) -> Result<Option<String>>;

    /// Write one token.
    fn set(&self, kind: TokenKind, token: &str) -> Result<()>;

    /// Remove one token.
    fn clear(&self, kind: TokenKind) -> Result<()>;

    /// Read the complete credential set.
    ///
    /// Returns `None` if any of the three tokens is missing or empty.
    fn load(&self) -> Result<Option<TokenSet>> {
        Ok(TokenSet::from_parts(
            self.get(TokenKind::Access)?,
            self.get(TokenKind::Id)?,
            self.get(TokenKind::Refresh)?,
        ))
    }

    /// Write the complete credential set.
    fn save(&self, tokens: &TokenSet) -> Result<()> {
        for kind in TokenKind::ALL {
            self.set(kind, tokens.get(kind))?;
        }
        Ok(())
    }

    /// Remove all three tokens.
    fn clear_all(&self) -> Result<()> {
        for kind in TokenKind::ALL {
            self.clear(kind)?;
        }
        Ok(())
    }
}

/// In-process credential store.
///
/// Useful for tests and for short-lived programs that never persist a session.
#[derive(Default)]
pub struct MemoryStore {
    tokens: RwLock<HashMap<TokenKind, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a credential set.
    pub fn with_tokens(tokens: &TokenSet) -> Self {
        let map = TokenKind::ALL
            .into_iter()
            .map(|kind| (kind, tokens.get(kind).to_string()))
            .collect();
        Self {
            tokens: RwLock::new(map),
        }
    }
}

fn poisoned() -> StorageError {
    StorageError::Unavailable {
        message: "credential lock poisoned".to_string(),
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, kind: TokenKind) -> Result<Option<String>> {
        let tokens = self.tokens.read().map_err(|_| poisoned())?;
        Ok(tokens.get(&kind).cloned())
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;
        tokens.insert(kind, token.to_string());
        Ok(())
    }

    fn clear(&self, kind: TokenKind) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;
        tokens.remove(&kind);
        Ok(())
    }

    fn load(&self) -> Result<Option<TokenSet>> {
        let tokens = self.tokens.read().map_err(|_| poisoned())?;
        Ok(TokenSet::from_parts(
            tokens.get(&TokenKind::Access).cloned(),
            tokens.get(&TokenKind::Id).cloned(),
            tokens.get(&TokenKind::Refresh).cloned(),
        ))
    }

    fn save(&self, set: &TokenSet) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;
        for kind in TokenKind::ALL {
            tokens.insert(kind, set.get(kind).to_string());
        }
        Ok(())
    }

    fn clear_all(&self) -> Result<()> {
        let mut tokens = self.tokens.write().map_err(|_| poisoned())?;
        tokens.clear();
        Ok(())
    }
}

// Hide token values in Debug output
impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stored: Vec<&'static str> = match self.tokens.read() {
            Ok(tokens) => TokenKind::ALL
                .into_iter()
                .filter(|kind| tokens.contains_key(kind))
                .map(|kind| kind.as_str())
                .collect(),
            Err(_) => Vec::new(),
        };
        f.debug_struct("MemoryStore")
            .field("stored", &stored)
            .finish()
    }
}
