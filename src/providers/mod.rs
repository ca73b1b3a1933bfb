// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sources of calendar, activity and intake data
//!
//! The planner only talks to [`TrainingDataSource`]. Live HTTP clients for the
//! training platform and the diet tracker implement the same trait outside
//! this crate.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::Path;

use crate::models::{ActivityDetail, IntakeLog, WorkoutEvent};

pub mod snapshot;

pub use snapshot::SnapshotSource;

#[async_trait]
pub trait TrainingDataSource: Send + Sync {
    /// Planned calendar events between two dates, inclusive
    async fn get_planned_events(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>>;

    /// Recorded activities between two dates, inclusive
    async fn get_activities(
        &self,
        oldest: NaiveDate,
        newest: NaiveDate,
    ) -> Result<Vec<WorkoutEvent>>;

    /// Detailed activity used to build completion data
    async fn get_activity_detail(&self, id: &str) -> Result<ActivityDetail>;

    /// Logged nutrition for a day, if the diet tracker has any
    async fn get_intake_log(&self, date: NaiveDate) -> Result<Option<IntakeLog>>;

    fn source_name(&self) -> &'static str;
}

/// Typed failures of the bundled sources
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("Invalid snapshot: {0}")]
    Snapshot(String),
}

pub fn create_source(source_type: &str, location: &Path) -> Result<Box<dyn TrainingDataSource>> {
    match source_type.to_lowercase().as_str() {
        "snapshot" => Ok(Box::new(SnapshotSource::load(location)?)),
        _ => Err(anyhow::anyhow!(
            "Unknown data source: {}. Currently supported: snapshot",
            source_type
        )),
    }
}
