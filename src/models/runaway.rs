// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Runaway ingestion payloads and the mappings from Strava resources.
//!
//! Absent Strava fields serialize as JSON `null`; Runaway expects every key.

use crate::models::strava::{StravaActivity, StravaAthlete, StravaAthleteStats};
use serde::Serialize;

/// Body of `POST /activities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityPayload {
    pub external_id: Option<String>,
    pub upload_id: Option<u64>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    pub detail: Option<String>,
    pub distance: Option<f64>,
    pub moving_time: Option<u64>,
    pub elapsed_time: Option<u64>,
    pub high_elevation: Option<f64>,
    pub low_elevation: Option<f64>,
    pub total_elevation_gain: Option<f64>,
    pub start_date: Option<String>,
    pub start_date_local: Option<String>,
    pub time_zone: Option<String>,
    pub achievement_count: u32,
    pub kudos_count: u32,
    pub comment_count: u32,
    pub athlete_count: u32,
    pub photo_count: u32,
    pub total_photo_count: u32,
    pub trainer: bool,
    pub commute: bool,
    pub manual: bool,
    pub private: bool,
    pub flagged: bool,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub calories: Option<f64>,
    pub has_kudoed: bool,
    pub kilo_joules: Option<f64>,
    pub average_power: Option<f64>,
    pub max_power: Option<f64>,
    pub device_watts: bool,
    pub has_heart_rate: bool,
    pub average_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub user_id: u64,
    pub map_id: Option<String>,
}

/// Body of `POST /athletes/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthletePayload {
    pub user_id: u64,
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
    /// Highest resolution profile picture
    pub avatar_url: Option<String>,
}

/// Body of `POST /athletes/{id}/stats`. All-time run totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteStatsPayload {
    pub user_id: u64,
    pub count: Option<u64>,
    pub distance: Option<f64>,
    pub moving_time: Option<u64>,
    pub elapsed_time: Option<u64>,
    pub elevation_gain: Option<f64>,
    pub achievement_count: Option<u64>,
}

/// Body of `POST /maps`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPayload {
    pub map_id: Option<String>,
    pub summary_polyline: Option<String>,
}

/// Strava reports strength sessions as "WeightTraining"; Runaway wants words.
fn runaway_activity_type(strava_type: Option<&str>) -> Option<String> {
    strava_type.map(|t| match t {
        "WeightTraining" => "Weight Training".to_string(),
        other => other.to_string(),
    })
}

impl ActivityPayload {
    pub fn from_strava(athlete_id: u64, a: &StravaActivity) -> Self {
        Self {
            external_id: a.id.map(|id| id.to_string()),
            upload_id: a.upload_id,
            name: a.name.clone(),
            activity_type: runaway_activity_type(a.activity_type.as_deref()),
            detail: a.description.clone(),
            distance: a.distance,
            moving_time: a.moving_time,
            elapsed_time: a.elapsed_time,
            high_elevation: a.elev_high,
            low_elevation: a.elev_low,
            total_elevation_gain: a.total_elevation_gain,
            start_date: a.start_date.clone(),
            start_date_local: a.start_date_local.clone(),
            time_zone: a.timezone.clone(),
            achievement_count: a.achievement_count.unwrap_or(0),
            kudos_count: a.kudos_count.unwrap_or(0),
            comment_count: a.comment_count.unwrap_or(0),
            athlete_count: a.athlete_count.unwrap_or(1),
            photo_count: a.photo_count.unwrap_or(0),
            total_photo_count: a.total_photo_count.unwrap_or(0),
            trainer: a.trainer.unwrap_or(false),
            commute: a.commute.unwrap_or(false),
            manual: a.manual.unwrap_or(false),
            private: a.private.unwrap_or(false),
            flagged: a.flagged.unwrap_or(false),
            average_speed: a.average_speed,
            max_speed: a.max_speed,
            calories: a.calories,
            has_kudoed: a.has_kudoed.unwrap_or(false),
            kilo_joules: a.kilojoules,
            average_power: a.average_watts,
            max_power: a.max_watts,
            device_watts: a.device_watts.unwrap_or(false),
            has_heart_rate: a.has_heartrate.unwrap_or(false),
            average_heart_rate: a.average_heartrate,
            max_heart_rate: a.max_heartrate,
            user_id: athlete_id,
            map_id: a.map_id().map(str::to_string),
        }
    }
}

impl AthletePayload {
    pub fn from_strava(athlete_id: u64, a: &StravaAthlete) -> Self {
        Self {
            user_id: athlete_id,
            firstname: a.firstname.clone(),
            lastname: a.lastname.clone(),
            profile_medium: a.profile_medium.clone(),
            profile: a.profile.clone(),
            city: a.city.clone(),
            state: a.state.clone(),
            country: a.country.clone(),
            premium: a.premium,
            created_at: a.created_at.clone(),
            friend_count: a.friend_count,
            follower_count: a.follower_count,
            mutual_friend_count: a.mutual_friend_count,
            date_preference: a.date_preference.clone(),
            ftp: a.ftp,
            weight: a.weight,
            avatar_url: a.profile.clone(),
        }
    }
}

impl AthleteStatsPayload {
    pub fn from_strava(athlete_id: u64, stats: &StravaAthleteStats) -> Self {
        let totals = stats.all_run_totals.clone().unwrap_or_default();
        Self {
            user_id: athlete_id,
            count: totals.count,
            distance: totals.distance,
            moving_time: totals.moving_time,
            elapsed_time: totals.elapsed_time,
            elevation_gain: totals.elevation_gain,
            achievement_count: totals.achievement_count,
        }
    }
}

impl MapPayload {
    pub fn from_strava(a: &StravaActivity) -> Self {
        Self {
            map_id: a.map_id().map(str::to_string),
            summary_polyline: a.get_polyline().map(str::to_string),
        }
    }
}

/// The four payloads for one activity, built together before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RunawayBundle {
    pub activity: ActivityPayload,
    pub athlete: AthletePayload,
    pub stats: AthleteStatsPayload,
    pub map: MapPayload,
}

impl RunawayBundle {
    pub fn build(
        athlete_id: u64,
        activity: &StravaActivity,
        athlete: &StravaAthlete,
        stats: &StravaAthleteStats,
    ) -> Self {
        Self {
            activity: ActivityPayload::from_strava(athlete_id, activity),
            athlete: AthletePayload::from_strava(athlete_id, athlete),
            stats: AthleteStatsPayload::from_strava(athlete_id, stats),
            map: MapPayload::from_strava(activity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn activity(value: serde_json::Value) -> StravaActivity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_activity_fields_are_renamed() {
        let a = activity(json!({
            "id": 123,
            "name": "Morning Ride",
            "type": "Ride",
            "description": "Windy",
            "elev_high": 410.2,
            "elev_low": 12.0,
            "timezone": "(GMT-08:00) America/Los_Angeles",
            "kilojoules": 640.5,
            "average_watts": 180.0,
            "max_watts": 612.0,
            "has_heartrate": true,
            "average_heartrate": 141.3,
            "map": {"id": "a123", "summary_polyline": "abc"}
        }));

        let payload = ActivityPayload::from_strava(77, &a);
        assert_eq!(payload.external_id.as_deref(), Some("123"));
        assert_eq!(payload.detail.as_deref(), Some("Windy"));
        assert_eq!(payload.high_elevation, Some(410.2));
        assert_eq!(payload.low_elevation, Some(12.0));
        assert_eq!(payload.kilo_joules, Some(640.5));
        assert_eq!(payload.average_power, Some(180.0));
        assert_eq!(payload.max_power, Some(612.0));
        assert!(payload.has_heart_rate);
        assert_eq!(payload.user_id, 77);
        assert_eq!(payload.map_id.as_deref(), Some("a123"));
    }

    #[test]
    fn test_weight_training_type() {
        let payload =
            ActivityPayload::from_strava(1, &activity(json!({"type": "WeightTraining"})));
        assert_eq!(payload.activity_type.as_deref(), Some("Weight Training"));

        let payload = ActivityPayload::from_strava(1, &activity(json!({"type": "Run"})));
        assert_eq!(payload.activity_type.as_deref(), Some("Run"));
    }

    #[test]
    fn test_activity_defaults_and_nulls() {
        let payload = ActivityPayload::from_strava(9, &activity(json!({})));
        let body = serde_json::to_value(&payload).unwrap();

        assert_eq!(body["athlete_count"], 1);
        assert_eq!(body["kudos_count"], 0);
        assert_eq!(body["trainer"], false);
        assert_eq!(body["device_watts"], false);
        assert!(body["calories"].is_null());
        assert!(body["map_id"].is_null());
        assert!(body.as_object().unwrap().contains_key("start_date"));
        assert_eq!(body["type"], serde_json::Value::Null);
    }

    #[test]
    fn test_athlete_avatar_is_profile() {
        let athlete: StravaAthlete = serde_json::from_value(json!({
            "firstname": "Ada",
            "profile_medium": "https://img/medium.jpg",
            "profile": "https://img/large.jpg",
            "weight": 61.5
        }))
        .unwrap();

        let payload = AthletePayload::from_strava(77, &athlete);
        assert_eq!(payload.avatar_url.as_deref(), Some("https://img/large.jpg"));
        assert_eq!(payload.profile_medium.as_deref(), Some("https://img/medium.jpg"));
        assert_eq!(payload.weight, Some(61.5));
        assert!(payload.city.is_none());
    }

    #[test]
    fn test_stats_use_all_run_totals() {
        let stats: StravaAthleteStats = serde_json::from_value(json!({
            "all_ride_totals": {"count": 99},
            "all_run_totals": {
                "count": 12,
                "distance": 104000.5,
                "moving_time": 36000,
                "elapsed_time": 39000,
                "elevation_gain": 870.0,
                "achievement_count": 4
            }
        }))
        .unwrap();

        let payload = AthleteStatsPayload::from_strava(77, &stats);
        assert_eq!(payload.count, Some(12));
        assert_eq!(payload.distance, Some(104000.5));
        assert_eq!(payload.achievement_count, Some(4));
    }

    #[test]
    fn test_stats_without_run_totals() {
        let payload = AthleteStatsPayload::from_strava(77, &StravaAthleteStats::default());
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body["user_id"], 77);
        assert!(body["count"].is_null());
        assert!(body["distance"].is_null());
    }

    #[test]
    fn test_map_payload() {
        let a = activity(json!({"map": {"id": "a9", "polyline": "full", "summary_polyline": "s"}}));
        assert_eq!(
            serde_json::to_value(MapPayload::from_strava(&a)).unwrap(),
            json!({"map_id": "a9", "summary_polyline": "full"})
        );
    }
}
