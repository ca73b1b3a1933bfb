// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Timeline merging and day bucketing

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use super::DayFlags;
use crate::models::{EventSource, WorkoutEvent};

const COMPLETED_FALLBACK_NAME: &str = "Completed Activity";
const UNKNOWN_TYPE: &str = "Unknown";

/// Merge planned events and completed activities into one ordered timeline
///
/// Completed activities are de-duplicated by id (first occurrence wins);
/// planned events are never dropped. The sort is stable, so entries sharing a
/// start time keep their input order with planned events first.
pub fn merge_timeline(
    planned_events: Vec<WorkoutEvent>,
    completed_activities: Vec<WorkoutEvent>,
) -> Vec<WorkoutEvent> {
    let mut timeline = Vec::with_capacity(planned_events.len() + completed_activities.len());

    timeline.extend(planned_events.into_iter().map(|mut event| {
        event.source = EventSource::Planned;
        event
    }));

    let mut seen_ids = HashSet::new();
    for activity in completed_activities {
        if let Some(id) = &activity.id {
            if !seen_ids.insert(id.clone()) {
                continue;
            }
        }
        timeline.push(backfill_completed(activity));
    }

    timeline.sort_by_key(WorkoutEvent::effective_start);
    timeline
}

fn backfill_completed(mut activity: WorkoutEvent) -> WorkoutEvent {
    activity.source = EventSource::Completed;
    if activity.start_date_local.is_none() {
        activity.start_date_local = activity.start_date.map(|d| d.naive_utc());
    }
    if activity.name.is_none() {
        activity.name = Some(
            activity
                .workout_type
                .clone()
                .unwrap_or_else(|| COMPLETED_FALLBACK_NAME.to_string()),
        );
    }
    if activity.workout_type.is_none() {
        activity.workout_type = Some(UNKNOWN_TYPE.to_string());
    }
    activity
}

/// Events that fall on `date`
pub fn events_on(timeline: &[WorkoutEvent], date: NaiveDate) -> Vec<&WorkoutEvent> {
    timeline
        .iter()
        .filter(|event| event.local_date() == Some(date))
        .collect()
}

impl DayFlags {
    /// Derive race, post-race and carb-loading flags from the calendar
    ///
    /// Carb loading applies when an A-priority race is 1 to
    /// `carb_loading_days` days ahead.
    pub fn derive(date: NaiveDate, events: &[WorkoutEvent], carb_loading_days: u32) -> Self {
        let race_on = |day: NaiveDate| {
            events
                .iter()
                .any(|event| event.is_race() && event.local_date() == Some(day))
        };
        let a_race_on = |day: NaiveDate| {
            events.iter().any(|event| {
                event.category.as_deref() == Some("RACE_A") && event.local_date() == Some(day)
            })
        };

        Self {
            is_race_day: race_on(date),
            is_post_race: race_on(date - Duration::days(1)),
            is_carb_loading: (1..=i64::from(carb_loading_days))
                .any(|offset| a_race_on(date + Duration::days(offset))),
        }
    }
}
