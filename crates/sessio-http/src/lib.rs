//! sessio-http - HTTP identity provider and self-renewing API client.

mod api;
mod client;
pub mod endpoints;
mod identity;
mod session;

pub use api::ApiClient;
pub use client::{HttpClient, RawResponse};
pub use identity::IdentityClient;
pub use reqwest::Method;
pub use session::{Session, SessionState};
