// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API resources as we read them.
//!
//! Every field is optional: Strava omits fields depending on privacy
//! settings and activity type, and we pass through whatever we get.

use serde::Deserialize;

/// Detailed activity (`GET /activities/{id}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaActivity {
    pub id: Option<u64>,
    pub upload_id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub distance: Option<f64>,
    pub moving_time: Option<u64>,
    pub elapsed_time: Option<u64>,
    pub elev_high: Option<f64>,
    pub elev_low: Option<f64>,
    pub total_elevation_gain: Option<f64>,
    pub start_date: Option<String>,
    pub start_date_local: Option<String>,
    pub timezone: Option<String>,
    pub achievement_count: Option<u32>,
    pub kudos_count: Option<u32>,
    pub comment_count: Option<u32>,
    pub athlete_count: Option<u32>,
    pub photo_count: Option<u32>,
    pub total_photo_count: Option<u32>,
    pub trainer: Option<bool>,
    pub commute: Option<bool>,
    pub manual: Option<bool>,
    pub private: Option<bool>,
    pub flagged: Option<bool>,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub calories: Option<f64>,
    pub has_kudoed: Option<bool>,
    pub kilojoules: Option<f64>,
    pub average_watts: Option<f64>,
    pub max_watts: Option<f64>,
    pub device_watts: Option<bool>,
    pub has_heartrate: Option<bool>,
    pub average_heartrate: Option<f64>,
    pub max_heartrate: Option<f64>,
    pub map: Option<StravaMap>,
}

impl StravaActivity {
    pub fn map_id(&self) -> Option<&str> {
        self.map.as_ref().and_then(|m| m.id.as_deref())
    }

    /// Get the detailed polyline, falling back to summary if not available.
    pub fn get_polyline(&self) -> Option<&str> {
        let map = self.map.as_ref()?;
        map.polyline
            .as_deref()
            .or(map.summary_polyline.as_deref())
    }
}

/// Activity map data with polylines.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaMap {
    pub id: Option<String>,
    pub polyline: Option<String>,
    pub summary_polyline: Option<String>,
}

/// Authenticated athlete profile (`GET /athlete`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaAthlete {
    pub id: Option<u64>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub profile_medium: Option<String>,
    pub profile: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub premium: Option<bool>,
    pub created_at: Option<String>,
    pub friend_count: Option<u32>,
    pub follower_count: Option<u32>,
    pub mutual_friend_count: Option<u32>,
    pub date_preference: Option<String>,
    pub ftp: Option<f64>,
    pub weight: Option<f64>,
}

/// Athlete statistics (`GET /athletes/{id}/stats`). Only run totals are relayed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaAthleteStats {
    pub all_run_totals: Option<ActivityTotals>,
}

/// A roll-up of activity metrics.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityTotals {
    pub count: Option<u64>,
    pub distance: Option<f64>,
    pub moving_time: Option<u64>,
    pub elapsed_time: Option<u64>,
    pub elevation_gain: Option<f64>,
    pub achievement_count: Option<u64>,
}

/// Token refresh response from Strava.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp (seconds)
    pub expires_at: i64,
}
