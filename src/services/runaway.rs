// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runaway ingestion client.

use crate::config::Config;
use crate::error::WriteFailure;
use crate::models::{ActivityPayload, AthletePayload, AthleteStatsPayload, MapPayload};
use serde::Serialize;

/// Writes relayed data to the Runaway service.
#[derive(Clone)]
pub struct RunawayClient {
    http: reqwest::Client,
    base_url: String,
}

impl RunawayClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.runaway_url.clone(),
        }
    }

    pub async fn create_activity(&self, payload: &ActivityPayload) -> Result<(), WriteFailure> {
        let url = format!("{}/activities", self.base_url);
        self.post("activity", &url, payload).await
    }

    pub async fn upsert_athlete(
        &self,
        athlete_id: u64,
        payload: &AthletePayload,
    ) -> Result<(), WriteFailure> {
        let url = format!("{}/athletes/{}", self.base_url, athlete_id);
        self.post("athlete", &url, payload).await
    }

    pub async fn upsert_athlete_stats(
        &self,
        athlete_id: u64,
        payload: &AthleteStatsPayload,
    ) -> Result<(), WriteFailure> {
        let url = format!("{}/athletes/{}/stats", self.base_url, athlete_id);
        self.post("athlete_stats", &url, payload).await
    }

    pub async fn create_map(&self, payload: &MapPayload) -> Result<(), WriteFailure> {
        let url = format!("{}/maps", self.base_url);
        self.post("map", &url, payload).await
    }

    async fn post<T: Serialize>(
        &self,
        target: &'static str,
        url: &str,
        payload: &T,
    ) -> Result<(), WriteFailure> {
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| WriteFailure {
                target,
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(write = target, "Runaway write succeeded");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = match body.trim() {
            "" => format!("HTTP {}", status),
            text => text.to_string(),
        };
        tracing::warn!(write = target, status = %status, "Runaway write failed");
        Err(WriteFailure {
            target,
            status: Some(status.as_u16()),
            message,
        })
    }
}
