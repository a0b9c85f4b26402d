//! Core traits for collaborator seams.

mod identity;

pub use identity::IdentityProvider;
