//! Mock API tests for the sessio-http client.
//!
//! These tests use wiremock to simulate the profile/identity API and check
//! the renewal flow without requiring network access or real credentials.

use std::sync::Arc;

use serde_json::json;
use sessio_core::error::{AuthError, Error, InvalidInputError};
use sessio_core::{
    ApiUrl, CredentialStore, Credentials, MemoryStore, NewAccount, ProfileUpdate, TokenKind,
    TokenSet,
};
use sessio_http::{ApiClient, Method, Session, SessionState};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Helper to create an API URL from a mock server.
fn mock_api_url(server: &MockServer) -> ApiUrl {
    ApiUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap()
}

fn stored_tokens() -> TokenSet {
    TokenSet::from_parts(
        Some("A".to_string()),
        Some("I".to_string()),
        Some("R".to_string()),
    )
    .unwrap()
}

fn profile_json(name: &str, email: &str) -> serde_json::Value {
    json!({
        "userId": "sub-123",
        "username": "alice",
        "name": name,
        "email": email,
        "createdAt": "2025-01-01T00:00:00.000Z"
    })
}

/// Build a client whose session starts from `store`.
fn client_for(server: &MockServer, store: Arc<MemoryStore>) -> ApiClient {
    let api = mock_api_url(server);
    let session = Session::connect(api.clone(), store).unwrap();
    ApiClient::new(api, session).unwrap()
}

fn without_auth_header(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_login_stores_all_three_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .and(body_json(json!({"username": "alice", "password": "correct"})))
        .and(without_auth_header)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "idToken": "I",
            "accessToken": "A",
            "refreshToken": "R",
            "expiresIn": 3600,
            "tokenType": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    session
        .login(Credentials::new("alice", "correct"))
        .await
        .unwrap();

    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(store.load().unwrap(), Some(stored_tokens()));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Incorrect username or password."
        })))
        .expect(1)
        .mount(&server)
        .await;

    // No refresh may follow a failed sign-in.
    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    let result = session.login(Credentials::new("alice", "wrong")).await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("401"));
    assert!(err.contains("Incorrect username or password."));
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_sign_in_response_missing_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A"
        })))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    let err = session
        .login(Credentials::new("alice", "correct"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("missing tokens"));
    assert!(!session.is_authenticated());
    assert!(store.get(TokenKind::Access).unwrap().is_none());
}

#[tokio::test]
async fn test_logout_clears_store() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    assert!(session.is_authenticated());

    session.logout().unwrap();

    assert!(!session.is_authenticated());
    for kind in TokenKind::ALL {
        assert!(store.get(kind).unwrap().is_none());
    }
}

#[tokio::test]
async fn test_refresh_without_token_makes_no_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = Session::connect(mock_api_url(&server), Arc::new(MemoryStore::new())).unwrap();
    let err = session.refresh().await.unwrap_err();

    assert!(matches!(err, Error::Auth(AuthError::NoRefreshToken)));
}

#[tokio::test]
async fn test_explicit_refresh_rotates_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .and(body_json(json!({"refreshToken": "R"})))
        .and(without_auth_header)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A2",
            "idToken": "I2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    session.refresh().await.unwrap();

    let tokens = store.load().unwrap().unwrap();
    assert_eq!(tokens.access_token.as_str(), "A2");
    assert_eq!(tokens.id_token.as_str(), "I2");
    assert_eq!(tokens.refresh_token.as_str(), "R");
}

// ============================================================================
// Authenticated Request Tests
// ============================================================================

#[tokio::test]
async fn test_get_profile_sends_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json("Alice", "alice@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStore::with_tokens(&stored_tokens())));
    let profile = client.get_profile().await.unwrap();

    assert_eq!(profile.user_id, "sub-123");
    assert_eq!(profile.name, "Alice");
    assert!(profile.updated_at.is_none());
}

#[tokio::test]
async fn test_expired_token_refreshes_and_retries_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "The incoming token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .and(body_json(json!({"refreshToken": "R"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A2",
            "refreshToken": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json("Alice", "alice@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let client = client_for(&server, store.clone());
    let profile = client.get_profile().await.unwrap();

    assert_eq!(profile.email, "alice@example.com");
    let tokens = store.load().unwrap().unwrap();
    assert_eq!(tokens.access_token.as_str(), "A2");
    assert_eq!(tokens.id_token.as_str(), "I");
    assert_eq!(tokens.refresh_token.as_str(), "R2");
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn test_retry_repeats_method_and_body() {
    let server = MockServer::start().await;
    let update = json!({"name": "Alice B", "email": "ab@example.com"});

    Mock::given(method("PUT"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A"))
        .and(body_json(update.clone()))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A2",
            "idToken": "I2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut updated = profile_json("Alice B", "ab@example.com");
    updated["updatedAt"] = json!("2025-02-01T10:00:00.000Z");
    Mock::given(method("PUT"))
        .and(path("/profile"))
        .and(header("authorization", "Bearer A2"))
        .and(body_json(update))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStore::with_tokens(&stored_tokens())));
    let profile = client
        .update_profile(&ProfileUpdate::new("Alice B", "ab@example.com"))
        .await
        .unwrap();

    assert_eq!(profile.name, "Alice B");
    assert!(profile.updated_at.is_some());
}

#[tokio::test]
async fn test_second_rejection_terminates_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "A2",
            "idToken": "I2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let client = client_for(&server, store.clone());
    let err = client.get_profile().await.unwrap_err();

    assert!(err.is_session_terminated());
    assert!(err.is_unauthorized());
    assert!(err.to_string().contains("API request failed"));
    assert_eq!(client.session().state(), SessionState::Unauthenticated);
    for kind in TokenKind::ALL {
        assert!(store.get(kind).unwrap().is_none());
    }
}

#[tokio::test]
async fn test_unauthenticated_request_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .and(without_auth_header)
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStore::new()));
    let err = client.get_profile().await.unwrap_err();

    assert!(matches!(&err, Error::Protocol(e) if e.status == 401));
    assert!(err.to_string().contains("Unauthorized"));
}

#[tokio::test]
async fn test_refused_refresh_ends_session_with_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "message": "Refresh Token has expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let client = client_for(&server, store.clone());
    let err = client.get_profile().await.unwrap_err();

    assert!(matches!(&err, Error::Auth(AuthError::RefreshRejected(e)) if e.status == 500));
    assert!(err.is_session_terminated());
    assert!(err.to_string().contains("Refresh Token has expired"));
    // The caller decides whether to log out.
    assert_eq!(store.load().unwrap(), Some(stored_tokens()));
}

#[tokio::test]
async fn test_non_401_failure_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Profile not found"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::with_tokens(&stored_tokens()));
    let client = client_for(&server, store.clone());
    let err = client.get_profile().await.unwrap_err();

    assert!(matches!(&err, Error::Protocol(e) if e.status == 404));
    assert!(err.to_string().contains("API request failed"));
    assert!(store.load().unwrap().is_some());
}

#[tokio::test]
async fn test_raw_request_returns_empty_object_for_empty_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(MemoryStore::with_tokens(&stored_tokens())));
    let body = client
        .request("/profile", Method::DELETE, None)
        .await
        .unwrap();

    assert_eq!(body, json!({}));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_input_never_reaches_network() {
    let server = MockServer::start().await;
    let client = client_for(&server, Arc::new(MemoryStore::with_tokens(&stored_tokens())));

    let err = client
        .update_profile(&ProfileUpdate::new("", "a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidInput(InvalidInputError::Field { field: "name", .. })
    ));

    let err = client
        .request("https://evil.example.com/profile", Method::GET, None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(InvalidInputError::Path { .. })));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

// ============================================================================
// Signup Tests
// ============================================================================

fn new_account(password: &str) -> NewAccount {
    NewAccount {
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: password.to_string(),
        name: "Alice".to_string(),
    }
}

#[tokio::test]
async fn test_sign_up_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/signup"))
        .and(body_json(json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "Str0ng!pass",
            "name": "Alice"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "userId": "sub-123",
            "username": "alice",
            "email": "alice@example.com",
            "name": "Alice",
            "createdAt": "2025-01-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let session = Session::connect(mock_api_url(&server), store.clone()).unwrap();
    let created = session.sign_up(&new_account("Str0ng!pass")).await.unwrap();

    assert_eq!(created.user_id, "sub-123");
    assert!(!session.is_authenticated());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_sign_up_weak_password_rejected_locally() {
    let server = MockServer::start().await;
    let session = Session::connect(mock_api_url(&server), Arc::new(MemoryStore::new())).unwrap();

    let err = session.sign_up(&new_account("weak")).await.unwrap_err();

    assert!(err.to_string().contains("at least 8 characters"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
