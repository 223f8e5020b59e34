// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook dispatch.
//!
//! Handles the core workflow for an activity `create` event:
//! 1. Validate the event
//! 2. Refresh the owner's access token
//! 3. Fetch activity, athlete and athlete stats from Strava (in order)
//! 4. Reshape them into Runaway payloads
//! 5. Post all four payloads to Runaway concurrently
//!
//! Any failure up to step 4 aborts the pipeline. Writes that succeeded in
//! step 5 are never rolled back when a sibling write fails.

use crate::config::DispatchPolicy;
use crate::error::{AppError, Result, WriteFailure};
use crate::models::{CreateEvent, RunawayBundle, WebhookEvent};
use crate::services::{RunawayClient, StravaClient, TokenRefresher};

/// What happened to an inbound event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not an activity creation; nothing was done.
    Ignored,
    /// All four writes landed.
    Dispatched,
}

/// Drives one webhook event through refresh, fetch and fan-out.
#[derive(Clone)]
pub struct Dispatcher {
    refresher: TokenRefresher,
    strava: StravaClient,
    runaway: RunawayClient,
    policy: DispatchPolicy,
}

impl Dispatcher {
    pub fn new(
        refresher: TokenRefresher,
        strava: StravaClient,
        runaway: RunawayClient,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            refresher,
            strava,
            runaway,
            policy,
        }
    }

    /// Process an inbound event.
    pub async fn handle_event(&self, event: &WebhookEvent) -> Result<DispatchOutcome> {
        let Some(CreateEvent {
            activity_id,
            athlete_id,
        }) = validate(event)?
        else {
            tracing::debug!(
                aspect_type = ?event.aspect_type,
                object_type = ?event.object_type(),
                "Ignoring non-create event"
            );
            return Ok(DispatchOutcome::Ignored);
        };

        tracing::info!(athlete_id, activity_id, "Processing activity");

        let token = self
            .refresher
            .refresh_access_token(Some(athlete_id))
            .await?
            .access_token;

        let activity = self.strava.get_activity(&token, activity_id).await?;
        let athlete = self.strava.get_athlete(&token).await?;
        let stats = self.strava.get_athlete_stats(&token, athlete_id).await?;
        tracing::debug!(athlete_id, activity_id, "Fetched activity, athlete and stats");

        let bundle = RunawayBundle::build(athlete_id, &activity, &athlete, &stats);
        self.dispatch(athlete_id, &bundle).await?;

        tracing::info!(athlete_id, activity_id, "Activity relayed to Runaway");
        Ok(DispatchOutcome::Dispatched)
    }

    /// Post all four payloads at once and join according to the policy.
    async fn dispatch(&self, athlete_id: u64, bundle: &RunawayBundle) -> Result<()> {
        let activity = self.runaway.create_activity(&bundle.activity);
        let athlete = self.runaway.upsert_athlete(athlete_id, &bundle.athlete);
        let stats = self.runaway.upsert_athlete_stats(athlete_id, &bundle.stats);
        let map = self.runaway.create_map(&bundle.map);

        let failures: Vec<WriteFailure> = match self.policy {
            DispatchPolicy::WaitAll => {
                let (activity, athlete, stats, map) = tokio::join!(activity, athlete, stats, map);
                [activity, athlete, stats, map]
                    .into_iter()
                    .filter_map(|r| r.err())
                    .collect()
            }
            // Dropping the remaining futures cancels their requests.
            DispatchPolicy::FailFast => match tokio::try_join!(activity, athlete, stats, map) {
                Ok(_) => Vec::new(),
                Err(failure) => vec![failure],
            },
        };

        if failures.is_empty() {
            return Ok(());
        }

        tracing::error!(
            athlete_id,
            policy = ?self.policy,
            failed = failures.len(),
            "Failed to save data to Runaway"
        );
        Err(AppError::PartialWriteFailure(failures))
    }
}

/// Returns the identifiers of a `create` event, `None` for any other aspect
/// type, or `MissingField` when a `create` event lacks an identifier.
pub fn validate(event: &WebhookEvent) -> Result<Option<CreateEvent>> {
    if !event.is_create() {
        return Ok(None);
    }

    let activity_id = event
        .object_id
        .ok_or(AppError::MissingField("No activity ID found"))?;
    let athlete_id = event
        .owner_id
        .ok_or(AppError::MissingField("No athlete ID found"))?;

    Ok(Some(CreateEvent {
        activity_id,
        athlete_id,
    }))
}
