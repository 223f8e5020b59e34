// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use strava_relay::config::Config;
use strava_relay::routes::create_router;
use strava_relay::AppState;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ATHLETE_ID: u64 = 77;
pub const ACTIVITY_ID: u64 = 123;

/// Create a test app whose outbound traffic all goes to `server`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(&server.uri()))
}

#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    (create_router(state.clone()), state)
}

/// POST a JSON event to /webhook and return status and body text.
#[allow(dead_code)]
pub async fn post_event(app: axum::Router, event: Value) -> (StatusCode, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/webhook")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&event).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[allow(dead_code)]
pub fn create_event() -> Value {
    json!({
        "aspect_type": "create",
        "event_time": 1_700_000_000,
        "object_id": ACTIVITY_ID,
        "object_type": "activity",
        "owner_id": ATHLETE_ID,
        "subscription_id": 12345
    })
}

/// Stored refresh token, provider exchange and token write-back, each
/// expected exactly once.
#[allow(dead_code)]
pub async fn mount_token_flow(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/runaway/refresh-tokens/{ATHLETE_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"user_id": ATHLETE_ID, "refresh_token": "stored-refresh"})),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token_type": "Bearer",
            "access_token": "fresh-access",
            "refresh_token": "fresh-refresh",
            "expires_at": 1_700_021_600,
            "expires_in": 21600
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/runaway/tokens"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(server)
        .await;
}

/// The three Strava reads, each expected exactly once.
#[allow(dead_code)]
pub async fn mount_strava_reads(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v3/activities/{ACTIVITY_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ACTIVITY_ID,
            "name": "Morning Run",
            "type": "Run",
            "distance": 10012.4,
            "moving_time": 3020,
            "elapsed_time": 3110,
            "start_date": "2024-05-01T14:00:00Z",
            "map": {"id": "a123", "polyline": "_p~iF~ps|U", "summary_polyline": "_p~iF"}
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": ATHLETE_ID,
            "firstname": "Ada",
            "lastname": "Runner",
            "profile": "https://img/large.jpg"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v3/athletes/{ATHLETE_ID}/stats")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "all_run_totals": {"count": 40, "distance": 400000.0}
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// One Runaway ingestion endpoint answering with `status`, expected once.
#[allow(dead_code)]
pub async fn mount_runaway_write(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/runaway{endpoint}")))
        .respond_with(ResponseTemplate::new(status).set_body_string(format!("{endpoint} said {status}")))
        .expect(1)
        .mount(server)
        .await;
}

/// All four Runaway ingestion endpoints answering 200.
#[allow(dead_code)]
pub async fn mount_runaway_writes(server: &MockServer) {
    for endpoint in runaway_endpoints() {
        mount_runaway_write(server, &endpoint, 200).await;
    }
}

#[allow(dead_code)]
pub fn runaway_endpoints() -> [String; 4] {
    [
        "/activities".to_string(),
        format!("/athletes/{ATHLETE_ID}"),
        format!("/athletes/{ATHLETE_ID}/stats"),
        "/maps".to_string(),
    ]
}
