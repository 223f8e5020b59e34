// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Strava-Relay: forward new Strava activities to Runaway
//!
//! This crate receives Strava webhook events, refreshes the athlete's OAuth
//! token, re-fetches the activity, athlete and stats from Strava, and posts
//! them to the Runaway service in its own schema.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use anyhow::Context;
use config::Config;
use error::AppError;
use services::{CredentialStore, Dispatcher, RunawayClient, StravaClient, TokenRefresher};

/// Shared application state.
///
/// Immutable after startup: configuration and HTTP clients only, no tokens.
pub struct AppState {
    pub config: Config,
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Wire up all services over a single pooled HTTP client.
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("strava-relay/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let strava = StravaClient::new(http.clone(), &config);
        let store = CredentialStore::new(http.clone(), &config);
        let refresher = TokenRefresher::new(store, strava.clone());
        let runaway = RunawayClient::new(http, &config);
        let dispatcher = Dispatcher::new(refresher, strava, runaway, config.dispatch_policy);

        Ok(Self { config, dispatcher })
    }
}
