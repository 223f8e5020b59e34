// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Which of the three Strava reads failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Activity,
    Athlete,
    AthleteStats,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Activity => "activity",
            Resource::Athlete => "athlete",
            Resource::AthleteStats => "athlete_stats",
        })
    }
}

/// A single failed write to the destination service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteFailure {
    /// Which write failed ("activity", "athlete", "athlete_stats", "map").
    pub target: &'static str,
    /// HTTP status, if the destination answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for WriteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {}): {}", self.target, status, self.message),
            None => write!(f, "{}: {}", self.target, self.message),
        }
    }
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No athlete ID available for token refresh")]
    MissingIdentifier,

    #[error("{0}")]
    MissingField(&'static str),

    #[error("No refresh token stored for athlete {0}")]
    NoStoredCredentials(u64),

    #[error("Strava token refresh failed: {message}")]
    ProviderAuth { status: u16, message: String },

    #[error("Failed to fetch {resource}: {message}")]
    UpstreamFetch {
        resource: Resource,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to save data to Runaway: {}", join_failures(.0))]
    PartialWriteFailure(Vec<WriteFailure>),

    #[error("Upstream service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn join_failures(failures: &[WriteFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Message shown to the caller when Strava rejects our credentials.
    pub const REAUTHENTICATE: &'static str =
        "Authentication expired. Please login again at the home page.";

    /// True when Strava answered 401, either on token exchange or on a read.
    pub fn is_strava_unauthorized(&self) -> bool {
        matches!(
            self,
            AppError::ProviderAuth { status: 401, .. }
                | AppError::UpstreamFetch {
                    status: Some(401),
                    ..
                }
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_strava_unauthorized() {
            tracing::warn!(error = %self, "Strava rejected credentials");
            let body = ErrorResponse {
                error: "reauthentication_required".to_string(),
                details: Some(Self::REAUTHENTICATE.to_string()),
            };
            return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        }

        let details = Some(format!("Error: {}", self));
        let (status, error, details) = match &self {
            AppError::MissingIdentifier | AppError::MissingField(_) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(self.to_string()))
            }
            AppError::NoStoredCredentials(_) => {
                (StatusCode::NOT_FOUND, "no_stored_credentials", details)
            }
            AppError::ProviderAuth { .. } => (StatusCode::BAD_GATEWAY, "strava_auth_error", details),
            AppError::UpstreamFetch { .. } => (StatusCode::BAD_GATEWAY, "strava_error", details),
            AppError::PartialWriteFailure(_) => {
                (StatusCode::BAD_GATEWAY, "partial_write_failure", details)
            }
            AppError::UpstreamUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable", details)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
