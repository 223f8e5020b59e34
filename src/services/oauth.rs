// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth refresh orchestration.
//!
//! Every call refreshes unconditionally:
//! 1. Read the stored refresh token from the credential store
//! 2. Exchange it with Strava (grant_type=refresh_token)
//! 3. Write the new pair back to the store (best-effort)
//! 4. Hand the new access token to the caller
//!
//! Nothing is cached between calls; the store stays the source of truth.

use crate::error::AppError;
use crate::models::{AthleteCredentials, RefreshResult};
use crate::services::{CredentialStore, StravaClient};
use chrono::{DateTime, Utc};

/// Produces a fresh access token for an athlete.
#[derive(Clone)]
pub struct TokenRefresher {
    store: CredentialStore,
    strava: StravaClient,
}

impl TokenRefresher {
    pub fn new(store: CredentialStore, strava: StravaClient) -> Self {
        Self { store, strava }
    }

    /// Refresh the athlete's access token.
    ///
    /// Fails without calling Strava if no refresh token is stored. A failed
    /// write-back does not fail the refresh.
    pub async fn refresh_access_token(
        &self,
        athlete_id: Option<u64>,
    ) -> Result<RefreshResult, AppError> {
        let athlete_id = athlete_id
            .filter(|&id| id != 0)
            .ok_or(AppError::MissingIdentifier)?;

        let result = self.refresh(athlete_id).await;
        if let Err(e) = &result {
            tracing::error!(athlete_id, error = %e, "Token refresh failed");
        }
        result
    }

    async fn refresh(&self, athlete_id: u64) -> Result<RefreshResult, AppError> {
        let stored_refresh_token = self.store.fetch_stored_refresh_token(athlete_id).await?;

        let tokens = self.strava.refresh_token(&stored_refresh_token).await?;

        let expires_at = DateTime::<Utc>::from_timestamp(tokens.expires_at, 0).ok_or_else(|| {
            AppError::ProviderAuth {
                status: 200,
                message: format!("Invalid expires_at in token response: {}", tokens.expires_at),
            }
        })?;

        let credentials = AthleteCredentials {
            athlete_id,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at,
        };

        self.store.persist_tokens(&credentials).await;

        tracing::info!(athlete_id, expires_at = %credentials.expires_at, "Token refreshed");
        Ok(RefreshResult {
            access_token: credentials.access_token,
        })
    }
}
