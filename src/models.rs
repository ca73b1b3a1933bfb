// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Calendar events, completed activities and nutrition logs as they arrive from
//! the training platform and the diet-tracking integration.
//!
//! ## Design Principles
//!
//! - **Source Shaped**: Field names follow the training platform's JSON, with
//!   aliases for the Strava-style snake_case payloads
//! - **Sparse**: Every metric is optional; absence is never an error
//! - **Decorated Once**: Completion status is computed a single time per event
//!
//! ## Core Models
//!
//! - [`WorkoutEvent`]: A planned workout or completed activity on the calendar
//! - [`ActivityDetail`]: The detailed activity fetched on demand
//! - [`CompletionData`]: Actual execution metrics derived from an [`ActivityDetail`]
//! - [`IntakeLog`]: One day of logged nutrition

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Where a timeline entry came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    /// Scheduled on the training calendar
    #[default]
    Planned,
    /// Recorded activity from a device or upload
    Completed,
}

/// Completion flags attached to an event by the completion detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStatus {
    pub is_completed: bool,
    pub is_past_date: bool,
    pub needs_completion_data: bool,
}

/// A calendar event: either a planned workout or a completed activity
///
/// # Examples
///
/// ```rust
/// use training_fuel::models::WorkoutEvent;
///
/// let event: WorkoutEvent = serde_json::from_value(serde_json::json!({
///     "id": 4217,
///     "startDateLocal": "2025-03-08T07:00:00",
///     "name": "Tempo 3x10",
///     "type": "Ride",
///     "durationSeconds": 3600
/// })).unwrap();
///
/// assert_eq!(event.id.as_deref(), Some("4217"));
/// assert_eq!(event.duration_minutes(), 60);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEvent {
    /// Platform identifier; numeric ids are kept as their decimal text
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    /// Local start time, the canonical ordering key
    #[serde(default, alias = "start_date_local")]
    pub start_date_local: Option<NaiveDateTime>,
    /// UTC start time, used when no local time was supplied
    #[serde(default, alias = "start_date")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub workout_type: Option<String>,
    /// Scheduled length of a planned workout
    #[serde(default)]
    pub duration_seconds: Option<u64>,
    #[serde(default, alias = "moving_time")]
    pub moving_time: Option<u64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default, alias = "average_heartrate", alias = "avgHeartRate")]
    pub avg_heartrate: Option<f64>,
    #[serde(default, alias = "average_watts", alias = "avgPower")]
    pub avg_watts: Option<f64>,
    #[serde(default)]
    pub kilojoules: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default, alias = "total_elevation_gain")]
    pub total_elevation_gain: Option<f64>,
    /// Free-form tag; `RACE_A`, `RACE_B` and `RACE_C` mark race priorities
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub source: EventSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CompletionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_data: Option<CompletionData>,
}

impl WorkoutEvent {
    /// Start time used for ordering and day bucketing
    pub fn effective_start(&self) -> Option<NaiveDateTime> {
        self.start_date_local
            .or_else(|| self.start_date.map(|d| d.naive_utc()))
    }

    /// Calendar day the event belongs to
    pub fn local_date(&self) -> Option<NaiveDate> {
        self.effective_start().map(|start| start.date())
    }

    /// Whether any field only a recorded activity carries is present
    pub fn has_actual_metrics(&self) -> bool {
        self.moving_time.is_some()
            || self.distance.is_some()
            || self.avg_heartrate.is_some()
            || self.avg_watts.is_some()
            || self.kilojoules.is_some()
            || self.calories.is_some()
    }

    /// Workout length in whole minutes (moving time first, then scheduled duration)
    pub fn duration_minutes(&self) -> u32 {
        let seconds = self.moving_time.or(self.duration_seconds).unwrap_or(0);
        (seconds as f64 / 60.0).round() as u32
    }

    /// Whether the category tag marks a race of any priority
    pub fn is_race(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.starts_with("RACE_"))
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_some_and(|s| s.is_completed)
    }

    pub fn needs_completion_data(&self) -> bool {
        self.status.is_some_and(|s| s.needs_completion_data) && self.completion_data.is_none()
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.workout_type.as_deref())
            .unwrap_or("Workout")
    }
}

/// Detailed activity as returned by the training platform's activity endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, alias = "moving_time")]
    pub moving_time: Option<u64>,
    #[serde(default, alias = "elapsed_time")]
    pub elapsed_time: Option<u64>,
    #[serde(default, alias = "average_heartrate")]
    pub avg_heartrate: Option<f64>,
    #[serde(default, alias = "max_heartrate")]
    pub max_heartrate: Option<f64>,
    #[serde(default, alias = "average_watts", alias = "icu_average_watts")]
    pub avg_watts: Option<f64>,
    #[serde(default, alias = "max_watts")]
    pub max_watts: Option<f64>,
    #[serde(default, alias = "average_cadence")]
    pub avg_cadence: Option<f64>,
    #[serde(default, alias = "total_elevation_gain")]
    pub total_elevation_gain: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default, alias = "average_speed")]
    pub avg_speed: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default, alias = "icu_training_load")]
    pub training_load: Option<f64>,
    #[serde(default, alias = "perceived_exertion", alias = "icu_rpe")]
    pub perceived_exertion: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub workout_code: Option<String>,
}

/// How a workout was actually executed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionData {
    pub actual_duration_minutes: u32,
    pub avg_heart_rate: Option<f64>,
    pub max_heart_rate: Option<f64>,
    pub avg_power: Option<f64>,
    pub max_power: Option<f64>,
    pub avg_cadence: Option<f64>,
    pub elevation_gain: Option<f64>,
    pub distance: Option<f64>,
    pub avg_speed: Option<f64>,
    pub calories_burned: Option<f64>,
    pub training_stress_score: Option<f64>,
    /// Rating of perceived exertion, 1-10
    pub perceived_effort: Option<f64>,
    pub description: Option<String>,
    pub workout_code: Option<String>,
}

impl CompletionData {
    /// Build completion data from a fetched activity detail
    pub fn from_detail(detail: &ActivityDetail) -> Self {
        let seconds = detail.moving_time.or(detail.elapsed_time).unwrap_or(0);
        Self {
            actual_duration_minutes: (seconds as f64 / 60.0).round() as u32,
            avg_heart_rate: detail.avg_heartrate,
            max_heart_rate: detail.max_heartrate,
            avg_power: detail.avg_watts,
            max_power: detail.max_watts,
            avg_cadence: detail.avg_cadence,
            elevation_gain: detail.total_elevation_gain,
            distance: detail.distance,
            avg_speed: detail.avg_speed,
            calories_burned: detail.calories,
            training_stress_score: detail.training_load,
            perceived_effort: detail.perceived_exertion,
            description: detail.description.clone(),
            workout_code: detail.workout_code.clone(),
        }
    }
}

/// A daily nutrition summary from the diet-tracking integration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeLog {
    pub date: NaiveDate,
    /// Calories (kcal)
    pub calories: Option<f64>,
    /// Protein (g)
    pub protein: Option<f64>,
    /// Carbs (g)
    pub carbs: Option<f64>,
    /// Fat (g)
    pub fat: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_accepts_numeric_and_string_ids() {
        let numeric: WorkoutEvent = serde_json::from_value(json!({ "id": 42 })).unwrap();
        let text: WorkoutEvent = serde_json::from_value(json!({ "id": "i42" })).unwrap();
        let missing: WorkoutEvent = serde_json::from_value(json!({ "name": "Ride" })).unwrap();

        assert_eq!(numeric.id.as_deref(), Some("42"));
        assert_eq!(text.id.as_deref(), Some("i42"));
        assert_eq!(missing.id, None);
    }

    #[test]
    fn test_event_accepts_strava_field_names() {
        let event: WorkoutEvent = serde_json::from_value(json!({
            "id": 1,
            "start_date_local": "2025-03-08T07:00:00",
            "moving_time": 5400,
            "average_heartrate": 141.5,
            "average_watts": 212.0
        }))
        .unwrap();

        assert!(event.has_actual_metrics());
        assert_eq!(event.duration_minutes(), 90);
        assert_eq!(event.avg_heartrate, Some(141.5));
        assert_eq!(event.local_date(), NaiveDate::from_ymd_opt(2025, 3, 8));
    }

    #[test]
    fn test_effective_start_falls_back_to_utc_start() {
        let event: WorkoutEvent = serde_json::from_value(json!({
            "startDate": "2025-03-08T06:30:00Z"
        }))
        .unwrap();

        let start = event.effective_start().unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
    }

    #[test]
    fn test_race_category_detection() {
        let mut event = WorkoutEvent {
            category: Some("RACE_A".to_string()),
            ..Default::default()
        };
        assert!(event.is_race());

        event.category = Some("WORKOUT".to_string());
        assert!(!event.is_race());
    }

    #[test]
    fn test_completion_data_prefers_moving_time() {
        let detail = ActivityDetail {
            moving_time: Some(4470),
            elapsed_time: Some(5000),
            perceived_exertion: Some(7.0),
            ..Default::default()
        };
        let data = CompletionData::from_detail(&detail);
        assert_eq!(data.actual_duration_minutes, 75);
        assert_eq!(data.perceived_effort, Some(7.0));

        let elapsed_only = ActivityDetail {
            elapsed_time: Some(1800),
            ..Default::default()
        };
        assert_eq!(CompletionData::from_detail(&elapsed_only).actual_duration_minutes, 30);
    }

    #[test]
    fn test_detail_ignores_structured_workout_doc() {
        let detail: ActivityDetail = serde_json::from_value(json!({
            "id": "i80",
            "moving_time": 6000,
            "workout_doc": { "steps": [{ "duration": 600, "power": { "value": 60 } }] },
            "icu_rpe": 6
        }))
        .unwrap();

        assert_eq!(detail.workout_code, None);
        assert_eq!(detail.moving_time, Some(6000));
        assert_eq!(detail.perceived_exertion, Some(6.0));
    }
}
