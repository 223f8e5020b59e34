// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for the Runaway token store.
//!
//! The store is the only authority for an athlete's refresh token. Reads are
//! strict; writes are best-effort.

use crate::config::Config;
use crate::error::AppError;
use crate::models::credentials::{PersistTokensRequest, StoredRefreshToken};
use crate::models::AthleteCredentials;
use reqwest::StatusCode;

/// Credential store client.
#[derive(Clone)]
pub struct CredentialStore {
    http: reqwest::Client,
    base_url: String,
}

impl CredentialStore {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.runaway_url.clone(),
        }
    }

    /// Fetch the stored refresh token for an athlete.
    ///
    /// A 404 or a record without a token is `NoStoredCredentials`; anything
    /// else that goes wrong is `UpstreamUnavailable`.
    pub async fn fetch_stored_refresh_token(&self, athlete_id: u64) -> Result<String, AppError> {
        let url = format!("{}/refresh-tokens/{}", self.base_url, athlete_id);

        let response = self.http.get(&url).send().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Failed to fetch from runaway service: {}", e))
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NoStoredCredentials(athlete_id));
        }
        if !status.is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "Failed to fetch from runaway service: HTTP {}",
                status
            )));
        }

        let stored: StoredRefreshToken = response.json().await.map_err(|e| {
            AppError::UpstreamUnavailable(format!("Invalid runaway token response: {}", e))
        })?;

        match stored.refresh_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(AppError::NoStoredCredentials(athlete_id)),
        }
    }

    /// Write refreshed tokens back to the store. Failures are logged only.
    pub async fn persist_tokens(&self, credentials: &AthleteCredentials) {
        let url = format!("{}/tokens", self.base_url);
        let body = PersistTokensRequest::from(credentials);

        let result = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status);

        match result {
            Ok(_) => tracing::debug!(
                athlete_id = credentials.athlete_id,
                expires_at = %credentials.expires_at,
                "Stored refreshed tokens"
            ),
            Err(e) => tracing::warn!(
                athlete_id = credentials.athlete_id,
                error = %e,
                "Failed to update runaway token store, continuing anyway"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> CredentialStore {
        CredentialStore::new(reqwest::Client::new(), &Config::test_default(&server.uri()))
    }

    #[tokio::test]
    async fn test_fetch_stored_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/runaway/refresh-tokens/77"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"user_id": 77, "refresh_token": "r-77"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let token = store_for(&server).fetch_stored_refresh_token(77).await.unwrap();
        assert_eq!(token, "r-77");
    }

    #[tokio::test]
    async fn test_not_found_is_no_stored_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/runaway/refresh-tokens/5"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = store_for(&server).fetch_stored_refresh_token(5).await.unwrap_err();
        assert!(matches!(err, AppError::NoStoredCredentials(5)));
    }

    #[tokio::test]
    async fn test_empty_token_is_no_stored_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/runaway/refresh-tokens/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"refresh_token": ""})))
            .mount(&server)
            .await;

        let err = store_for(&server).fetch_stored_refresh_token(5).await.unwrap_err();
        assert!(matches!(err, AppError::NoStoredCredentials(5)));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = store_for(&server).fetch_stored_refresh_token(5).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_persist_tokens_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/runaway/tokens"))
            .and(body_json(json!({
                "user_id": 77,
                "access_token": "a",
                "refresh_token": "r",
                "expires_at": 1_700_000_000
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let creds = AthleteCredentials {
            athlete_id: 77,
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        store_for(&server).persist_tokens(&creds).await;
    }

    #[tokio::test]
    async fn test_persist_failure_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/runaway/tokens"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let creds = AthleteCredentials {
            athlete_id: 77,
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            expires_at: DateTime::from_timestamp(0, 0).unwrap(),
        };
        // Returns unit; nothing to unwrap.
        store_for(&server).persist_tokens(&creds).await;
    }
}
