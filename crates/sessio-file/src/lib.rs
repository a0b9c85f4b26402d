//! sessio-file - File-backed credential store.

mod store;

pub use store::{DEFAULT_MAX_AGE_HOURS, FileCredentialStore};
