use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chroma::{
    render::{Outcome, TimerDisplay},
    ClientError, Config, Coordinator, GameApi, HttpGameApi, SettlePolicy, Update,
};
use chroma_api::prelude::*;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::mpsc};

const SESSION_COOKIE: &str = "session=abc123";

#[derive(Default)]
struct Mock {
    logged_out: AtomicBool,
    status_calls: AtomicUsize,
    run_round_calls: AtomicUsize,
    last_wager: Mutex<Option<Value>>,
}

impl Mock {
    fn authorized(&self, headers: &HeaderMap) -> bool {
        !self.logged_out.load(Ordering::SeqCst)
            && headers
                .get(header::COOKIE)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.contains(SESSION_COOKIE))
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Unauthorized access. Please log in."})),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        (
            [(header::SET_COOKIE, format!("{SESSION_COOKIE}; Path=/; HttpOnly"))],
            Json(json!({"success": true, "message": "Login successful.", "username": body["username"]})),
        )
            .into_response()
    } else {
        Json(json!({"success": false, "message": "Invalid username or password."})).into_response()
    }
}

async fn logout(State(mock): State<Arc<Mock>>) -> Json<Value> {
    mock.logged_out.store(true, Ordering::SeqCst);
    Json(json!({"success": true, "message": "Logged out successfully."}))
}

async fn session(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Json<Value> {
    let logged_in = mock.authorized(&headers);
    let username = if logged_in { "akshu" } else { "Guest" };
    Json(json!({"isLoggedIn": logged_in, "username": username}))
}

async fn game_status(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let calls = mock.status_calls.fetch_add(1, Ordering::SeqCst);
    let body = if calls == 0 {
        json!({"success": true, "current_round_id": 42, "time_remaining": 2,
               "past_results": [{"round_id": 41, "color": "red"}]})
    } else {
        json!({"success": true, "current_round_id": 43, "time_remaining": 60,
               "past_results": [{"round_id": 42, "color": "violet"}, {"round_id": 41, "color": "red"}]})
    };
    Json(body).into_response()
}

async fn run_round(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    mock.run_round_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({"success": true, "message": "Game Round 42 completed.", "winning_color": "violet"}))
        .into_response()
}

async fn predict(State(mock): State<Arc<Mock>>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    let amount = body["amount"].as_u64().unwrap_or(0);
    *mock.last_wager.lock().unwrap() = Some(body);
    if amount > 1_000 {
        return (
            StatusCode::PAYMENT_REQUIRED,
            Json(json!({"success": false, "message": "Insufficient Akshu Tokens."})),
        )
            .into_response();
    }
    Json(json!({"success": true, "new_balance": 1_000 - amount})).into_response()
}

async fn balance(State(mock): State<Arc<Mock>>, headers: HeaderMap) -> Response {
    if !mock.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({"success": true, "balance": 1_000})).into_response()
}

async fn spawn_server() -> (Config, Arc<Mock>) {
    let mock = Arc::new(Mock::default());
    let app = Router::new()
        .route(LOGIN_PATH, post(login))
        .route(LOGOUT_PATH, post(logout))
        .route(SESSION_PATH, get(session))
        .route(GAME_STATUS_PATH, get(game_status))
        .route(RUN_ROUND_PATH, post(run_round))
        .route(PREDICT_PATH, post(predict))
        .route(BALANCE_PATH, get(balance))
        .with_state(Arc::clone(&mock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = Config::default().with_server_url(format!("http://{address}/"));
    (config, mock)
}

async fn logged_in() -> (HttpGameApi, Arc<Mock>, Config) {
    let (config, mock) = spawn_server().await;
    let api = HttpGameApi::new(&config).unwrap();
    assert_eq!(api.login("akshu", "secret").await.unwrap(), "akshu");
    (api, mock, config)
}

#[tokio::test]
async fn test_game_endpoints_require_session() {
    let (config, _mock) = spawn_server().await;
    let api = HttpGameApi::new(&config).unwrap();

    assert!(!api.base_url().ends_with('/'));
    assert!(matches!(api.status().await, Err(ClientError::Unauthorized)));
    assert!(matches!(api.balance().await, Err(ClientError::Unauthorized)));
    assert!(!api.session().await.unwrap().logged_in);
}

#[tokio::test]
async fn test_bad_login_is_rejected_with_server_message() {
    let (config, _mock) = spawn_server().await;
    let api = HttpGameApi::new(&config).unwrap();

    match api.login("akshu", "wrong").await {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Invalid username or password."),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_session_cookie_carries_over() {
    let (api, _mock, _config) = logged_in().await;

    let session = api.session().await.unwrap();
    assert!(session.logged_in);
    assert_eq!(session.username.as_deref(), Some("akshu"));

    let status = api.status().await.unwrap();
    assert_eq!(status.current_round_id, 42);
    assert_eq!(status.time_remaining, 2);
    assert_eq!(status.past_results, vec![PastResult { round_id: 41, color: Color::Red }]);
    assert_eq!(api.balance().await.unwrap(), 1_000);
    assert_eq!(api.run_round().await.unwrap(), Color::Violet);

    assert_eq!(api.logout().await.unwrap(), "Logged out successfully.");
    assert!(!api.session().await.unwrap().logged_in);
    assert!(matches!(api.status().await, Err(ClientError::Unauthorized)));
}

#[tokio::test]
async fn test_predict_wire_format_and_rejection() {
    let (api, mock, _config) = logged_in().await;

    let placement = api
        .predict(Wager { prediction: Color::Red, amount: 50 })
        .await
        .unwrap();
    assert_eq!(placement.new_balance, 950);
    assert_eq!(
        mock.last_wager.lock().unwrap().clone(),
        Some(json!({"prediction": "red", "amount": 50}))
    );

    // 402 still carries the envelope; the message comes through verbatim.
    match api.predict(Wager { prediction: Color::Violet, amount: 5_000 }).await {
        Err(ClientError::Rejected(message)) => assert_eq!(message, "Insufficient Akshu Tokens."),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn test_coordinator_over_http() {
    let (api, mock, config) = logged_in().await;
    let config = Config {
        tick: Duration::from_millis(10),
        settle_grace: Duration::from_millis(10),
        ..config
    }
    .with_settle_policy(SettlePolicy::until_advanced(3, Duration::from_millis(10)));

    let mut coordinator = Coordinator::new(Arc::new(api), Vec::new(), &config);
    let (tx, rx) = mpsc::channel(4);
    let driver = async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        drop(tx);
    };
    let (result, ()) = tokio::join!(coordinator.run(rx), driver);
    result.unwrap();

    let updates = coordinator.renderer();
    assert_eq!(mock.run_round_calls.load(Ordering::SeqCst), 1);
    assert!(updates.contains(&Update::Round(42)));
    assert!(updates.contains(&Update::Timer(TimerDisplay::Processing)));
    assert!(updates.contains(&Update::Outcome(Outcome::Winner {
        round_id: Some(42),
        color: Color::Violet
    })));
    assert!(updates.contains(&Update::Round(43)));
    assert_eq!(coordinator.round().map(|r| r.id), Some(43));
}
