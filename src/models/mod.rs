// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod credentials;
pub mod event;
pub mod runaway;
pub mod strava;

pub use credentials::{AthleteCredentials, RefreshResult};
pub use event::{AspectType, CreateEvent, WebhookEvent};
pub use runaway::{ActivityPayload, AthletePayload, AthleteStatsPayload, MapPayload, RunawayBundle};
pub use strava::{StravaActivity, StravaAthlete, StravaAthleteStats, TokenRefreshResponse};
