use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Json;
use axum::routing::{delete, get};
use tokio::sync::Mutex;
use whiteboard::point::Point;
use whiteboard::stroke::Shape;

use super::*;

fn client(base: &str) -> HttpStrokeLog {
    HttpStrokeLog::new(base, "user-1", vec!["org-1".into(), "org-2".into()]).unwrap()
}

fn key() -> BoardKey {
    BoardKey::new("board-1", "org-1")
}

#[test]
fn strokes_url_is_tenant_scoped() {
    let url = client("http://localhost:3000").strokes_url(&key(), false).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/api/tenants/org-1/boards/board-1/strokes");
}

#[test]
fn latest_url_appends_segment() {
    let url = client("http://localhost:3000").strokes_url(&key(), true).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/api/tenants/org-1/boards/board-1/strokes/latest");
}

#[test]
fn base_path_is_kept() {
    let url = client("http://localhost:3000/sketch/").strokes_url(&key(), false).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/sketch/api/tenants/org-1/boards/board-1/strokes");
}

#[test]
fn ids_are_percent_encoded() {
    let board = BoardKey::new("my board/1", "org-1");
    let url = client("http://localhost:3000").strokes_url(&board, false).unwrap();
    assert_eq!(url.as_str(), "http://localhost:3000/api/tenants/org-1/boards/my%20board%2F1/strokes");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = HttpStrokeLog::new("not a url", "user-1", Vec::new()).unwrap_err();
    assert!(matches!(err, SyncError::InvalidBaseUrl(_)));
    let err = HttpStrokeLog::new("mailto:someone@example.com", "user-1", Vec::new()).unwrap_err();
    assert!(matches!(err, SyncError::InvalidBaseUrl(_)));
}

#[test]
fn auth_statuses_map_to_unauthorized() {
    assert!(check_status(StatusCode::UNAUTHORIZED, &key()).unwrap_err().is_unauthorized());
    assert!(check_status(StatusCode::FORBIDDEN, &key()).unwrap_err().is_unauthorized());
}

#[test]
fn other_failures_keep_status_code() {
    assert!(matches!(check_status(StatusCode::BAD_REQUEST, &key()), Err(SyncError::Status(400))));
    assert!(matches!(check_status(StatusCode::INTERNAL_SERVER_ERROR, &key()), Err(SyncError::Status(500))));
}

#[test]
fn success_statuses_pass() {
    assert!(check_status(StatusCode::OK, &key()).is_ok());
    assert!(check_status(StatusCode::CREATED, &key()).is_ok());
    assert!(check_status(StatusCode::NO_CONTENT, &key()).is_ok());
}

#[test]
fn from_config_uses_base_url() {
    let config = SyncConfig { base_url: "http://example.test:8080".into(), queue_capacity: 4 };
    let log = HttpStrokeLog::from_config(&config, "user-1", vec!["org-1".into()]).unwrap();
    let url = log.strokes_url(&key(), false).unwrap();
    assert_eq!(url.host_str(), Some("example.test"));
    assert_eq!(url.port(), Some(8080));
}

// =============================================================
// Round trip against a local service
// =============================================================

#[derive(Clone, Default)]
struct Served {
    strokes: Arc<Mutex<Vec<Stroke>>>,
    users: Arc<Mutex<Vec<String>>>,
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers.get(name).and_then(|v| v.to_str().ok()).unwrap_or_default()
}

async fn authorize(served: &Served, headers: &HeaderMap, tenant: &str) -> Result<(), StatusCode> {
    served.users.lock().await.push(header(headers, USER_HEADER).to_owned());
    if header(headers, TENANTS_HEADER).split(',').any(|t| t == tenant) {
        Ok(())
    } else {
        Err(StatusCode::FORBIDDEN)
    }
}

async fn list_handler(
    State(served): State<Served>,
    headers: HeaderMap,
    Path((tenant, board)): Path<(String, String)>,
) -> Result<Json<Vec<Stroke>>, StatusCode> {
    authorize(&served, &headers, &tenant).await?;
    let key = BoardKey::new(board, tenant);
    let strokes = served.strokes.lock().await.iter().filter(|s| s.board == key).cloned().collect();
    Ok(Json(strokes))
}

async fn append_handler(
    State(served): State<Served>,
    headers: HeaderMap,
    Path((tenant, _board)): Path<(String, String)>,
    Json(stroke): Json<Stroke>,
) -> Result<StatusCode, StatusCode> {
    authorize(&served, &headers, &tenant).await?;
    served.strokes.lock().await.push(stroke);
    Ok(StatusCode::CREATED)
}

async fn latest_handler(
    State(served): State<Served>,
    headers: HeaderMap,
    Path((tenant, board)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    authorize(&served, &headers, &tenant).await?;
    let key = BoardKey::new(board, tenant);
    let mut strokes = served.strokes.lock().await;
    if let Some(i) = strokes.iter().rposition(|s| s.board == key) {
        strokes.remove(i);
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn clear_handler(
    State(served): State<Served>,
    headers: HeaderMap,
    Path((tenant, board)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    authorize(&served, &headers, &tenant).await?;
    let key = BoardKey::new(board, tenant);
    served.strokes.lock().await.retain(|s| s.board != key);
    Ok(StatusCode::NO_CONTENT)
}

async fn serve(served: Served) -> String {
    let app = Router::new()
        .route(
            "/api/tenants/{tenant}/boards/{board}/strokes",
            get(list_handler).post(append_handler).delete(clear_handler),
        )
        .route("/api/tenants/{tenant}/boards/{board}/strokes/latest", delete(latest_handler))
        .with_state(served);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
}

fn pen(board: BoardKey, x: f64) -> Stroke {
    Stroke {
        shape: Shape::Pen { points: vec![Point::new(x, x), Point::new(x + 1.0, x)] },
        color: "#000000".into(),
        width: 3.0,
        created_by: "user-1".into(),
        created_at: 1_700_000_000_000,
        board,
    }
}

#[tokio::test]
async fn append_and_list_round_trip() {
    let served = Served::default();
    let log = client(&serve(served.clone()).await);
    let other = BoardKey::new("board-2", "org-1");

    log.append(&pen(key(), 1.0)).await.unwrap();
    log.append(&pen(other.clone(), 5.0)).await.unwrap();
    log.append(&pen(key(), 2.0)).await.unwrap();

    assert_eq!(log.list(&key()).await.unwrap(), vec![pen(key(), 1.0), pen(key(), 2.0)]);
    assert_eq!(log.list(&other).await.unwrap(), vec![pen(other, 5.0)]);
    assert!(served.users.lock().await.iter().all(|u| u == "user-1"));
}

#[tokio::test]
async fn delete_most_recent_removes_last_stroke() {
    let log = client(&serve(Served::default()).await);

    log.append(&pen(key(), 1.0)).await.unwrap();
    log.append(&pen(key(), 2.0)).await.unwrap();
    log.delete_most_recent(&key()).await.unwrap();

    assert_eq!(log.list(&key()).await.unwrap(), vec![pen(key(), 1.0)]);
}

#[tokio::test]
async fn delete_all_clears_only_that_board() {
    let log = client(&serve(Served::default()).await);
    let other = BoardKey::new("board-2", "org-1");

    log.append(&pen(key(), 1.0)).await.unwrap();
    log.append(&pen(other.clone(), 2.0)).await.unwrap();
    log.delete_all(&key()).await.unwrap();

    assert!(log.list(&key()).await.unwrap().is_empty());
    assert_eq!(log.list(&other).await.unwrap().len(), 1);
}

#[tokio::test]
async fn forbidden_tenant_maps_to_unauthorized() {
    let base = serve(Served::default()).await;
    let outsider = HttpStrokeLog::new(&base, "user-2", vec!["org-9".into()]).unwrap();

    assert!(outsider.list(&key()).await.unwrap_err().is_unauthorized());
    assert!(outsider.append(&pen(key(), 1.0)).await.unwrap_err().is_unauthorized());
    assert!(outsider.delete_most_recent(&key()).await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn identity_headers_are_forwarded() {
    let served = Served::default();
    let base = serve(served.clone()).await;
    let log = HttpStrokeLog::new(&base, "user-7", vec!["org-2".into(), "org-1".into()]).unwrap();

    log.append(&pen(key(), 1.0)).await.unwrap();
    log.delete_all(&key()).await.unwrap();

    assert_eq!(*served.users.lock().await, ["user-7", "user-7"]);
}

#[tokio::test]
async fn server_error_keeps_status_code() {
    let app = Router::new().fallback(|| async { StatusCode::INTERNAL_SERVER_ERROR });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    let log = client(&format!("http://{addr}"));

    assert!(matches!(log.list(&key()).await, Err(SyncError::Status(500))));
    assert!(matches!(log.append(&pen(key(), 1.0)).await, Err(SyncError::Status(500))));
    assert!(matches!(log.delete_most_recent(&key()).await, Err(SyncError::Status(500))));
    assert!(matches!(log.delete_all(&key()).await, Err(SyncError::Status(500))));
}
