//! sessio-core - Core session types and traits.

pub mod credentials;
pub mod error;
pub mod profile;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;
pub mod validation;

pub use credentials::Credentials;
pub use error::Error;
pub use profile::{AccountCreated, NewAccount, Profile, ProfileUpdate};
pub use store::{CredentialStore, MemoryStore};
pub use tokens::{AccessToken, IdToken, RefreshToken, RefreshedTokens, TokenKind, TokenSet};
pub use traits::IdentityProvider;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
