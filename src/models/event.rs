// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava webhook event payload.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashMap;

/// Strava `aspect_type`. Anything we do not know lands in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Create,
    Update,
    Delete,
    #[serde(other)]
    Other,
}

/// Inbound webhook event.
///
/// Identifiers are lenient: JSON numbers and numeric strings are accepted,
/// while `null`, `0` and anything else read as absent.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub aspect_type: Option<AspectType>,
    /// Activity ID
    #[serde(default, deserialize_with = "lenient_id")]
    pub object_id: Option<u64>,
    /// Athlete ID
    #[serde(default, deserialize_with = "lenient_id")]
    pub owner_id: Option<u64>,
    /// Everything else Strava sends (object_type, event_time, updates, ...).
    #[serde(flatten)]
    pub raw: HashMap<String, Value>,
}

/// Identifiers of an event that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateEvent {
    pub activity_id: u64,
    pub athlete_id: u64,
}

impl WebhookEvent {
    pub fn is_create(&self) -> bool {
        self.aspect_type == Some(AspectType::Create)
    }

    pub fn object_type(&self) -> Option<&str> {
        self.raw.get("object_type").and_then(Value::as_str)
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let id = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(id.filter(|&id| id != 0))
}
