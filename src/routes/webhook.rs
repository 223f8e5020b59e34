// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook routes for Strava events.

use crate::error::AppError;
use crate::models::WebhookEvent;
use crate::services::DispatchOutcome;
use crate::AppState;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Body sent back once an event has been fully relayed.
pub const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

/// Webhook routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/webhook", get(verify).post(handle_event))
}

/// Strava webhook verification query params.
#[derive(Deserialize)]
struct VerifyParams {
    #[serde(rename = "hub.mode")]
    mode: Option<String>,
    #[serde(rename = "hub.challenge")]
    challenge: Option<String>,
    #[serde(rename = "hub.verify_token")]
    verify_token: Option<String>,
}

/// Verification response.
#[derive(Serialize)]
struct VerifyResponse {
    #[serde(rename = "hub.challenge")]
    challenge: String,
}

/// Verify webhook subscription (GET).
async fn verify(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let (Some(mode), Some(verify_token)) = (params.mode, params.verify_token) else {
        tracing::warn!("Webhook verification missing hub.mode or hub.verify_token");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let token_matches: bool = verify_token
        .as_bytes()
        .ct_eq(state.config.webhook_verify_token.as_bytes())
        .into();

    if mode == "subscribe" && token_matches {
        tracing::info!("Webhook subscription verified");
        (
            StatusCode::OK,
            Json(VerifyResponse {
                challenge: params.challenge.unwrap_or_default(),
            }),
        )
            .into_response()
    } else {
        tracing::warn!(mode = %mode, "Webhook verification failed: invalid token");
        StatusCode::FORBIDDEN.into_response()
    }
}

/// Handle incoming webhook events (POST).
async fn handle_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Response, AppError> {
    tracing::info!(payload = %payload, "Webhook event received (raw)");

    let event: WebhookEvent = match serde_json::from_value(payload) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse webhook event");
            return Ok(StatusCode::OK.into_response()); // Not actionable; avoid Strava retries
        }
    };

    match state.dispatcher.handle_event(&event).await {
        Ok(DispatchOutcome::Dispatched) => Ok((StatusCode::OK, EVENT_RECEIVED).into_response()),
        Ok(DispatchOutcome::Ignored) => Ok(StatusCode::OK.into_response()),
        Err(e) => {
            tracing::error!(
                error = %e,
                activity_id = ?event.object_id,
                athlete_id = ?event.owner_id,
                "Error processing webhook"
            );
            Err(e)
        }
    }
}
