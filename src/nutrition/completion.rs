// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Planned versus completed detection for calendar events

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::models::{CompletionStatus, WorkoutEvent};

/// Whether an event date lies before `today`
///
/// The event is pinned to local noon on its own date so a UTC offset can
/// never push it across a day boundary.
pub fn is_past_date(event_date: NaiveDate, today: NaiveDate) -> bool {
    let event_noon = event_date.and_time(NaiveTime::MIN) + Duration::hours(12);
    let start_of_today = today.and_time(NaiveTime::MIN);
    event_noon < start_of_today
}

/// Decide whether an event is a completed activity or a planned workout
pub fn is_completed(event: &WorkoutEvent, is_past_date: bool) -> bool {
    if !is_past_date {
        return false;
    }

    let has_actual_metrics = event.has_actual_metrics();
    let has_id = event.id.is_some();

    if has_actual_metrics && has_id {
        return true;
    }

    let looks_planned = event.name.is_some()
        && (event.duration_seconds.is_some() || event.moving_time.is_some())
        && !has_actual_metrics;
    if looks_planned {
        return false;
    }

    // Past, identified and nothing decisive either way: treat as done.
    has_id
}

/// Completion status of an event relative to `today`
pub fn detect_completion(event: &WorkoutEvent, today: NaiveDate) -> CompletionStatus {
    let is_past_date = event
        .local_date()
        .is_some_and(|date| is_past_date(date, today));
    let is_completed = is_completed(event, is_past_date);

    CompletionStatus {
        is_completed,
        is_past_date,
        needs_completion_data: is_completed
            && event.id.is_some()
            && event.completion_data.is_none(),
    }
}

impl WorkoutEvent {
    /// Attach completion status; an already decorated event keeps its status
    pub fn decorate(mut self, today: NaiveDate) -> Self {
        if self.status.is_none() {
            self.status = Some(detect_completion(&self, today));
        }
        self
    }
}
