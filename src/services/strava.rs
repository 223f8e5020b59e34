// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Refresh-token exchange against the OAuth endpoint
//! - Activity, athlete and athlete-stats reads

use crate::config::Config;
use crate::error::{AppError, Resource};
use crate::models::{StravaActivity, StravaAthlete, StravaAthleteStats, TokenRefreshResponse};
use serde::Deserialize;

/// Strava API client.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    oauth_url: String,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl StravaClient {
    /// Create a new Strava client with OAuth credentials.
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            oauth_url: config.strava_oauth_url.clone(),
            base_url: config.strava_api_url.clone(),
            client_id: config.strava_client_id.clone(),
            client_secret: config.strava_client_secret.clone(),
        }
    }

    /// Exchange a refresh token for a new access/refresh token pair.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<TokenRefreshResponse, AppError> {
        let response = self
            .http
            .post(&self.oauth_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", refresh_token),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::UpstreamUnavailable(format!("Token refresh request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Strava token refresh rejected");
            return Err(AppError::ProviderAuth {
                status: status.as_u16(),
                message: provider_message(&body, status),
            });
        }

        response.json().await.map_err(|e| AppError::ProviderAuth {
            status: 200,
            message: format!("Failed to parse token response: {}", e),
        })
    }

    /// Get a detailed activity by ID.
    pub async fn get_activity(
        &self,
        access_token: &str,
        activity_id: u64,
    ) -> Result<StravaActivity, AppError> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);
        self.get_json(&url, access_token, Resource::Activity).await
    }

    /// Get authenticated athlete profile.
    pub async fn get_athlete(&self, access_token: &str) -> Result<StravaAthlete, AppError> {
        let url = format!("{}/athlete", self.base_url);
        self.get_json(&url, access_token, Resource::Athlete).await
    }

    /// Get the athlete's activity totals.
    pub async fn get_athlete_stats(
        &self,
        access_token: &str,
        athlete_id: u64,
    ) -> Result<StravaAthleteStats, AppError> {
        let url = format!("{}/athletes/{}/stats", self.base_url, athlete_id);
        self.get_json(&url, access_token, Resource::AthleteStats)
            .await
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        access_token: &str,
        resource: Resource,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::UpstreamFetch {
                resource,
                status: None,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!(%resource, "Strava rate limit hit (429)");
            }

            return Err(AppError::UpstreamFetch {
                resource,
                status: Some(status.as_u16()),
                message: provider_message(&body, status),
            });
        }

        response.json().await.map_err(|e| AppError::UpstreamFetch {
            resource,
            status: None,
            message: format!("JSON parse error: {}", e),
        })
    }
}

/// Strava error body: `{"message": "...", "errors": [...]}`.
#[derive(Deserialize)]
struct StravaFault {
    message: Option<String>,
}

/// Prefer Strava's own `message`, then the raw body, then the status line.
fn provider_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(StravaFault {
        message: Some(message),
    }) = serde_json::from_str::<StravaFault>(body)
    {
        return message;
    }
    let body = body.trim();
    if body.is_empty() {
        format!("HTTP {}", status)
    } else {
        body.to_string()
    }
}
