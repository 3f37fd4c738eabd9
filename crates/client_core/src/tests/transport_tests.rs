use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::COOKIE, header::SET_COOKIE, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use shared::{domain::Side, domain::Square, notation::Position};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct BackendState {
    move_bodies: Arc<Mutex<Vec<serde_json::Value>>>,
    move_cookies: Arc<Mutex<Vec<Option<String>>>>,
    resets: Arc<Mutex<u32>>,
}

async fn handle_reset(State(state): State<BackendState>) -> impl axum::response::IntoResponse {
    *state.resets.lock().await += 1;
    ([(SET_COOKIE, "game=session-1; Path=/")], StatusCode::OK)
}

async fn handle_move(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    state.move_cookies.lock().await.push(
        headers
            .get(COOKIE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    );
    let valid = body["to"] != "e5";
    state.move_bodies.lock().await.push(body);
    if !valid {
        return Json(serde_json::json!({ "validMove": false }));
    }
    Json(serde_json::json!({
        "validMove": true,
        "fen": "RNBQKBNR\nPPPPPPPP\n........\n........\n....p...\n........\npppp.ppp\nrnbqkbnr\n",
        "currentTurn": "BLACK",
        "status": false,
        "lastMoveFrom": "e2",
        "lastMoveTo": "e4",
        "whiteScore": 38.0,
        "blackScore": 38.0,
    }))
}

async fn spawn_backend(app: Router) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/")).expect("url")
}

async fn spawn_chess_backend() -> (Url, BackendState) {
    let state = BackendState::default();
    let app = Router::new()
        .route("/api/chess", post(handle_reset))
        .route("/api/chess/move", post(handle_move))
        .with_state(state.clone());
    (spawn_backend(app).await, state)
}

fn opening_request(to: &str) -> MoveRequest {
    MoveRequest {
        from: Square::from("e2"),
        to: Square::from(to),
        current_position: Position::start(),
        current_turn: Side::White,
    }
}

#[test]
fn endpoints_join_onto_base_path() {
    let base = Url::parse("https://play.example.com/backend/").expect("url");
    let backend = HttpChessBackend::new(&base, None).expect("backend");
    assert_eq!(
        backend.move_url().as_str(),
        "https://play.example.com/backend/api/chess/move"
    );
}

#[tokio::test]
async fn submit_move_posts_documented_body() {
    let (base, state) = spawn_chess_backend().await;
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    let response = backend
        .submit_move(&opening_request("e4"))
        .await
        .expect("move");
    assert!(response.valid_move);
    assert_eq!(response.current_turn.as_deref(), Some("BLACK"));

    let bodies = state.move_bodies.lock().await;
    assert_eq!(
        bodies[0],
        serde_json::json!({
            "from": "e2",
            "to": "e4",
            "currentPosition": "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "currentTurn": "white",
        })
    );
}

#[tokio::test]
async fn invalid_move_is_returned_as_decoded_payload() {
    let (base, _state) = spawn_chess_backend().await;
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    let response = backend
        .submit_move(&opening_request("e5"))
        .await
        .expect("move");
    assert!(!response.valid_move);
}

#[tokio::test]
async fn session_cookie_from_reset_is_sent_with_moves() {
    let (base, state) = spawn_chess_backend().await;
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    backend.reset().await.expect("reset");
    backend
        .submit_move(&opening_request("e4"))
        .await
        .expect("move");

    assert_eq!(*state.resets.lock().await, 1);
    let cookies = state.move_cookies.lock().await;
    assert_eq!(cookies[0].as_deref(), Some("game=session-1"));
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let app = Router::new()
        .route(
            "/api/chess",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "warming up") }),
        )
        .route(
            "/api/chess/move",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
    let base = spawn_backend(app).await;
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    match backend.reset().await {
        Err(ClientError::Status { status, body }) => {
            assert_eq!(status, reqwest::StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body, "warming up");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    let err = backend
        .submit_move(&opening_request("e4"))
        .await
        .expect_err("move should fail");
    assert!(matches!(err, ClientError::Status { .. }));
}

#[tokio::test]
async fn malformed_json_maps_to_decode_error() {
    let app = Router::new().route("/api/chess/move", post(|| async { "not json" }));
    let base = spawn_backend(app).await;
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    let err = backend
        .submit_move(&opening_request("e4"))
        .await
        .expect_err("decode");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let base = Url::parse(&format!("http://{addr}/")).expect("url");
    let backend = HttpChessBackend::new(&base, None).expect("backend");

    let err = backend.reset().await.expect_err("no listener");
    assert!(matches!(err, ClientError::Transport(_)));
}
