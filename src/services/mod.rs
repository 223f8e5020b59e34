// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod credentials;
pub mod dispatch;
pub mod oauth;
pub mod runaway;
pub mod strava;

pub use credentials::CredentialStore;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use oauth::TokenRefresher;
pub use runaway::RunawayClient;
pub use strava::StravaClient;
