// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth credentials as exchanged with the Runaway token store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transient copy of an athlete's tokens, held for one refresh.
#[derive(Debug, Clone)]
pub struct AthleteCredentials {
    pub athlete_id: u64,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
}

/// What the store returns from `GET /refresh-tokens/{athlete_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredRefreshToken {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Body of `POST /tokens`.
#[derive(Debug, Clone, Serialize)]
pub struct PersistTokensRequest<'a> {
    pub user_id: u64,
    pub access_token: &'a str,
    pub refresh_token: &'a str,
    /// Unix timestamp (seconds), as Strava hands it to us.
    pub expires_at: i64,
}

impl<'a> From<&'a AthleteCredentials> for PersistTokensRequest<'a> {
    fn from(creds: &'a AthleteCredentials) -> Self {
        Self {
            user_id: creds.athlete_id,
            access_token: &creds.access_token,
            refresh_token: &creds.refresh_token,
            expires_at: creds.expires_at.timestamp(),
        }
    }
}

/// Result of a successful refresh, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshResult {
    pub access_token: String,
}
