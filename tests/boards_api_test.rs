//! Typed API surface integration tests using wiremock
//!
//! Exercises the auth and board operations of `ApiClient` end to end over a
//! mock backend: request shapes (JSON bodies, query parameters, multipart
//! parts), response parsing, and error translation (403 to login-required,
//! signup field errors to a single message).

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{
    body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boardctl::api::types::{BoardDraft, SignupRequest};
use boardctl::api::ApiClient;
use boardctl::client::credentials::{CredentialPair, CredentialStore, MemoryStore};
use boardctl::client::gateway::{FileAttachment, Gateway};
use boardctl::error::BoardctlError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn pair(access: &str, refresh: &str) -> CredentialPair {
    CredentialPair {
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

/// Builds an API client against the mock server with a signed-in store.
fn make_client(server: &MockServer, store: Arc<MemoryStore>) -> ApiClient {
    let gateway = Gateway::new(
        url::Url::parse(&server.uri()).expect("valid mock server URL"),
        Duration::from_secs(5),
        store,
    );
    ApiClient::new(Arc::new(gateway))
}

fn signed_in_client(server: &MockServer) -> ApiClient {
    make_client(server, Arc::new(MemoryStore::with_pair(pair("acc", "ref"))))
}

fn board_detail_body(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "hello",
        "content": "first post",
        "boardCategory": "FREE",
        "imageUrl": "/files/7.png",
        "createdAt": "2024-05-01T09:30:00Z",
    })
}

// ---------------------------------------------------------------------------
// Auth: sign-in
// ---------------------------------------------------------------------------

/// Signing in POSTs the credentials and persists the returned pair; the
/// next request carries the new access token.
#[tokio::test]
async fn test_sign_in_stores_pair_and_authenticates_next_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .and(body_string_contains("\"username\":\"a@b.com\""))
        .and(body_string_contains("\"password\":\"Abc123!@\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessToken": "fresh_access",
            "refreshToken": "fresh_refresh",
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards"))
        .and(header("Authorization", "Bearer fresh_access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"content": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::default());
    let api = make_client(&server, Arc::clone(&store));

    api.sign_in("a@b.com", "Abc123!@").await.expect("sign in");
    assert_eq!(
        store.get().unwrap(),
        Some(pair("fresh_access", "fresh_refresh")),
    );

    let posts = api.boards(0, 100).await.expect("list boards");
    assert!(posts.is_empty());
}

/// Rejected credentials surface the backend's status and body.
#[tokio::test]
async fn test_sign_in_rejection_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let api = make_client(&server, Arc::new(MemoryStore::default()));
    let error = api
        .sign_in("a@b.com", "wrong")
        .await
        .expect_err("sign in must fail");

    match error.downcast_ref::<BoardctlError>() {
        Some(BoardctlError::Api { status, message }) => {
            assert_eq!(*status, 400);
            assert_eq!(message, "bad credentials");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

/// Invalid input fails before any network call.
#[tokio::test]
async fn test_sign_in_validates_username_without_calling_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = make_client(&server, Arc::new(MemoryStore::default()));
    let error = api
        .sign_in("not-an-email", "Abc123!@")
        .await
        .expect_err("invalid username must be rejected");
    assert!(matches!(
        error.downcast_ref::<BoardctlError>(),
        Some(BoardctlError::Validation(_)),
    ));
}

// ---------------------------------------------------------------------------
// Auth: sign-up
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_up_sends_camel_case_confirm_password() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .and(body_string_contains("\"confirmPassword\":\"Abc123!&\""))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let api = make_client(&server, Arc::new(MemoryStore::default()));
    api.sign_up(SignupRequest {
        username: "new@user.com".to_string(),
        name: "New User".to_string(),
        password: "Abc123!&".to_string(),
        confirm_password: "Abc123!&".to_string(),
    })
    .await
    .expect("sign up");
}

/// A field-error body is collapsed to its first message, username first.
#[tokio::test]
async fn test_sign_up_field_errors_become_a_single_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "username": ["already registered"],
            "password": ["too weak"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = make_client(&server, Arc::new(MemoryStore::default()));
    let error = api
        .sign_up(SignupRequest {
            username: "dup@user.com".to_string(),
            name: "Dup".to_string(),
            password: "Abc123!&".to_string(),
            confirm_password: "Abc123!&".to_string(),
        })
        .await
        .expect_err("duplicate signup must fail");

    match error.downcast_ref::<BoardctlError>() {
        Some(BoardctlError::Api { status, message }) => {
            assert_eq!(*status, 400);
            assert_eq!(message, "already registered");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_sign_up_mismatched_passwords_fail_before_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = make_client(&server, Arc::new(MemoryStore::default()));
    let error = api
        .sign_up(SignupRequest {
            username: "a@b.com".to_string(),
            name: "A".to_string(),
            password: "Abc123!&".to_string(),
            confirm_password: "Abc123!#".to_string(),
        })
        .await
        .expect_err("mismatch must be rejected");
    assert!(matches!(
        error.downcast_ref::<BoardctlError>(),
        Some(BoardctlError::Validation(_)),
    ));
}

// ---------------------------------------------------------------------------
// Auth: sign-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_sign_out_clears_the_store() {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with_pair(pair("acc", "ref")));
    let api = make_client(&server, Arc::clone(&store));

    api.sign_out().expect("sign out");
    assert!(store.get().unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Boards: read operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_categories_parse_into_key_label_map() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/categories"))
        .and(header("Authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "FREE": "자유",
            "NOTICE": "공지",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let categories = api.categories().await.expect("categories");
    assert_eq!(categories.get("FREE").map(String::as_str), Some("자유"));
    assert_eq!(categories.get("NOTICE").map(String::as_str), Some("공지"));
}

#[tokio::test]
async fn test_boards_sends_pagination_query_and_parses_rows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards"))
        .and(query_param("page", "2"))
        .and(query_param("size", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": [
                {"id": 7, "title": "hello", "category": "FREE", "createdAt": "2024-05-01T09:30:00Z"},
                {"id": 8, "title": "notice", "category": "NOTICE", "createdAt": "2024-05-02T10:00:00Z"},
            ],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let posts = api.boards(2, 25).await.expect("list boards");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, 7);
    assert_eq!(posts[1].category, "NOTICE");
}

#[tokio::test]
async fn test_board_detail_parses_full_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_detail_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let detail = api.board(7).await.expect("board detail");
    assert_eq!(detail.id, 7);
    assert_eq!(detail.board_category, "FREE");
    assert_eq!(detail.image_url.as_deref(), Some("/files/7.png"));
}

// ---------------------------------------------------------------------------
// Boards: write operations
// ---------------------------------------------------------------------------

/// Create sends a multipart body whose `request` part carries the draft.
#[tokio::test]
async fn test_create_board_sends_multipart_request_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/boards"))
        .and(header("Authorization", "Bearer acc"))
        .and(body_string_contains("name=\"request\""))
        .and(body_string_contains("\"title\":\"hello\""))
        .and(body_string_contains("\"category\":\"FREE\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(board_detail_body(42)))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let draft = BoardDraft {
        title: "hello".to_string(),
        content: "first post".to_string(),
        category: "FREE".to_string(),
    };
    let created = api.create_board(&draft, None).await.expect("create");
    assert_eq!(created.map(|detail| detail.id), Some(42));
}

/// An attachment travels as a named `file` part alongside the draft.
#[tokio::test]
async fn test_create_board_with_attachment_sends_file_part() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/boards"))
        .and(body_string_contains("name=\"request\""))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"photo.png\""))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let draft = BoardDraft {
        title: "with file".to_string(),
        content: "see attachment".to_string(),
        category: "FREE".to_string(),
    };
    let attachment = FileAttachment {
        file_name: "photo.png".to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
    };

    // An empty/unparseable success body is fine for writes.
    let created = api
        .create_board(&draft, Some(attachment))
        .await
        .expect("create");
    assert!(created.is_none());
}

#[tokio::test]
async fn test_update_board_patches_with_multipart_draft() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/boards/7"))
        .and(body_string_contains("name=\"request\""))
        .and(body_string_contains("\"title\":\"renamed\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(board_detail_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let draft = BoardDraft {
        title: "renamed".to_string(),
        content: "first post".to_string(),
        category: "FREE".to_string(),
    };
    api.update_board(7, &draft, None).await.expect("update");
}

#[tokio::test]
async fn test_delete_board_accepts_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/boards/7"))
        .and(header("Authorization", "Bearer acc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    api.delete_board(7).await.expect("delete");
}

// ---------------------------------------------------------------------------
// Error translation
// ---------------------------------------------------------------------------

/// A 403 means the backend wants a fresh sign-in, surfaced as a distinct
/// error so the command layer can clear the store and tell the user.
#[tokio::test]
async fn test_403_becomes_login_required() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/boards/7"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let error = api.delete_board(7).await.expect_err("403 must be an error");
    assert!(matches!(
        error.downcast_ref::<BoardctlError>(),
        Some(BoardctlError::LoginRequired(_)),
    ));
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boards/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let api = signed_in_client(&server);
    let error = api.board(7).await.expect_err("500 must be an error");
    match error.downcast_ref::<BoardctlError>() {
        Some(BoardctlError::Api { status, message }) => {
            assert_eq!(*status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}
