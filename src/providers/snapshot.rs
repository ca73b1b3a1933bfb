// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Data source backed by a JSON snapshot of previously fetched payloads
//!
//! ```json
//! {
//!   "events":     [ { "id": 1, "startDateLocal": "...", "name": "...", ... } ],
//!   "activities": [ { "id": "i77", "startDateLocal": "...", "movingTime": 3600, ... } ],
//!   "details":    { "i77": { "movingTime": 3720, "avgHeartrate": 151, ... } },
//!   "intake":     [ { "date": "2025-03-08", "calories": 2900, ... } ]
//! }
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use super::{SourceError, TrainingDataSource};
use crate::models::{ActivityDetail, IntakeLog, WorkoutEvent};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<WorkoutEvent>,
    #[serde(default)]
    pub activities: Vec<WorkoutEvent>,
    #[serde(default)]
    pub details: HashMap<String, ActivityDetail>,
    #[serde(default)]
    pub intake: Vec<IntakeLog>,
}

/// Snapshot-backed source; used by the CLI and for offline planning
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    snapshot: Snapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot file: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse snapshot file: {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(content).map_err(|e| SourceError::Snapshot(e.to_string()))?;
        debug!(
            snapshot.events = snapshot.events.len(),
            snapshot.activities = snapshot.activities.len(),
            snapshot.details = snapshot.details.len(),
            "Snapshot loaded"
        );
        Ok(Self::new(snapshot))
    }
}

fn within(event: &WorkoutEvent, oldest: NaiveDate, newest: NaiveDate) -> bool {
    event
        .local_date()
        .is_some_and(|date| date >= oldest && date <= newest)
}

#[async_trait]
impl TrainingDataSource for SnapshotSource {
    async fn get_planned_events(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>> {
        Ok(self
            .snapshot
            .events
            .iter()
            .filter(|event| within(event, oldest, newest))
            .cloned()
            .collect())
    }

    async fn get_activities(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>> {
        Ok(self
            .snapshot
            .activities
            .iter()
            .filter(|activity| within(activity, oldest, newest))
            .cloned()
            .collect())
    }

    async fn get_activity_detail(&self, id: &str) -> Result<ActivityDetail> {
        self.snapshot
            .details
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::ActivityNotFound(id.to_string()).into())
    }

    async fn get_intake_log(&self, date: NaiveDate) -> Result<Option<IntakeLog>> {
        Ok(self.snapshot.intake.iter().find(|log| log.date == date).cloned())
    }

    fn source_name(&self) -> &'static str {
        "snapshot"
    }
}
