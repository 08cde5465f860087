use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use peez_lobby::model::player_path;
use peez_lobby::model::players_path;
use peez_lobby::server::{create_router, AppState, PageData, StatusPage, Template};
use peez_lobby::store::{MemoryStore, RemoteStore, StoreError, StorePath, MAX_KEY_BYTES};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

const JOIN_ALICE: &str = r#"{"roomId":"abc","user":{"id":"p1","name":"Alice"}}"#;

fn page_data() -> PageData {
    PageData {
        service: "lobby".to_string(),
        revision: "lobby-00007".to_string(),
    }
}

fn status_page() -> StatusPage {
    let template =
        Template::parse("<h1>{{.Service}}</h1><p>{{.Revision}}</p>").unwrap();
    StatusPage::new(template, page_data())
}

fn app(store: Arc<dyn RemoteStore>) -> Router {
    create_router(AppState::new(store, status_page()), "does-not-exist")
}

async fn send(app: Router, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[tokio::test]
async fn join_then_leave() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    let (status, body) = send(app.clone(), "POST", "/join", JOIN_ALICE).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(&body),
        json!({ "roomId": "abc", "playerId": "p1", "status": "joined" })
    );
    assert_eq!(
        store.get_value(&players_path("abc").unwrap()).await,
        Some(json!({ "p1": { "id": "p1", "name": "Alice" } }))
    );

    let (status, body) = send(
        app,
        "POST",
        "/leave",
        r#"{"roomId":"abc","user":{"id":"p1"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "left");
    assert_eq!(store.get_value(&player_path("abc", "p1").unwrap()).await, None);
}

#[tokio::test]
async fn join_keys_players_by_id() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    send(app.clone(), "POST", "/join", JOIN_ALICE).await;
    let (status, _) = send(
        app,
        "POST",
        "/join",
        r#"{"roomId":"abc","user":{"id":"p2","name":"Bob"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        store.get_value(&players_path("abc").unwrap()).await,
        Some(json!({
            "p1": { "id": "p1", "name": "Alice" },
            "p2": { "id": "p2", "name": "Bob" }
        }))
    );
}

#[tokio::test]
async fn leave_before_join_is_noop() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    let (status, _) = send(
        app,
        "POST",
        "/leave",
        r#"{"roomId":"abc","user":{"id":"ghost"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(store.get_value(&StorePath::root()).await, None);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    for uri in ["/join", "/leave"] {
        let (status, body) = send(app.clone(), "POST", uri, r#"{"roomId":"abc""#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json_body(&body)["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }
    assert_eq!(store.get_value(&StorePath::root()).await, None);
}

#[tokio::test]
async fn invalid_key_is_bad_request() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    let (status, _) = send(
        app,
        "POST",
        "/join",
        r#"{"roomId":"abc/../public","user":{"id":"p1"}}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.get_value(&StorePath::root()).await, None);
}

#[tokio::test]
async fn oversized_key_is_bad_request() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    let body = json!({ "roomId": "r".repeat(MAX_KEY_BYTES + 1), "user": { "id": "p1" } });
    let (status, body) = send(app, "POST", "/join", &body.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json_body(&body)["error"]
        .as_str()
        .unwrap()
        .contains("bytes long"));
    assert_eq!(store.get_value(&StorePath::root()).await, None);
}

#[tokio::test]
async fn join_accepts_any_method() {
    let store = MemoryStore::new();
    let app = app(Arc::new(store.clone()));

    let (status, _) = send(app, "PUT", "/join", JOIN_ALICE).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.get_value(&player_path("abc", "p1").unwrap()).await.is_some());
}

struct FailingStore;

#[async_trait::async_trait]
impl RemoteStore for FailingStore {
    async fn set_value(&self, _path: &StorePath, _value: &Value) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            status: 401,
            body: "Permission denied".to_string(),
        })
    }

    async fn delete_value(&self, _path: &StorePath) -> Result<(), StoreError> {
        Err(StoreError::Rejected {
            status: 503,
            body: "Service Unavailable".to_string(),
        })
    }
}

#[tokio::test]
async fn store_failure_is_bad_gateway() {
    let app = app(Arc::new(FailingStore));

    let (status, body) = send(app.clone(), "POST", "/join", JOIN_ALICE).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json_body(&body)["error"]
        .as_str()
        .unwrap()
        .contains("Permission denied"));

    let (status, _) = send(app, "POST", "/leave", JOIN_ALICE).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn status_page_renders_metadata() {
    let app = app(Arc::new(MemoryStore::new()));

    let (status, body) = send(app, "GET", "/", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body).unwrap(),
        "<h1>lobby</h1><p>lobby-00007</p>"
    );
}

#[tokio::test]
async fn status_page_ignores_method() {
    let app = app(Arc::new(MemoryStore::new()));

    for method in ["POST", "PUT", "DELETE"] {
        let (status, body) = send(app.clone(), method, "/", "").await;
        assert_eq!(status, StatusCode::OK, "{method} /");
        assert_eq!(
            String::from_utf8(body).unwrap(),
            "<h1>lobby</h1><p>lobby-00007</p>"
        );
    }
}

#[tokio::test]
async fn missing_template_is_internal_error() {
    let page = StatusPage::load("does-not-exist/index.html", page_data());
    let app = create_router(AppState::new(Arc::new(MemoryStore::new()), page), "does-not-exist");

    let (status, body) = send(app, "GET", "/", "").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(String::from_utf8(body).unwrap(), "Internal Server Error");
}

#[tokio::test]
async fn serves_assets() {
    let dir: PathBuf =
        std::env::temp_dir().join(format!("peez-lobby-assets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("lobby.css"), "body { margin: 0; }").unwrap();

    let app = create_router(AppState::new(Arc::new(MemoryStore::new()), status_page()), &dir);

    let (status, body) = send(app.clone(), "GET", "/assets/lobby.css", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"body { margin: 0; }");

    let (status, _) = send(app, "GET", "/assets/missing.js", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).unwrap();
}
