// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Day planner: runs the full pipeline for one calendar day
//!
//! fetch -> completion detection -> timeline merge -> day flags ->
//! classification -> baseline target -> completion analysis -> one combined
//! adjustment -> intake reconciliation

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cache::CompletionCache;
use crate::config::{AthleteProfile, NutritionConfig};
use crate::logging::PlannerLogger;
use crate::models::{CompletionData, EventSource, WorkoutEvent};
use crate::nutrition::timeline::events_on;
use crate::nutrition::{
    apply_adjustment, classify_workout, compute_nutrition_target, day_adjustment,
    dominant_intensity, merge_timeline, reconcile_intake, CompletionAnalysis, CompletionAnalyzer,
    DayFlags, IntakeReconciliation, NutritionTarget, RankTable, WorkoutIntensity,
};
use crate::providers::TrainingDataSource;

/// Everything the presentation layer needs for one day
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: NaiveDate,
    pub flags: DayFlags,
    pub intensity: WorkoutIntensity,
    pub duration_minutes: u32,
    pub events: Vec<WorkoutEvent>,
    pub target: NutritionTarget,
    pub analyses: Vec<CompletionAnalysis>,
    /// Workouts whose detail fetch failed and were left out of the adjustment
    pub skipped_workouts: Vec<String>,
    pub intake: Option<IntakeReconciliation>,
}

pub struct DayPlanner {
    source: Arc<dyn TrainingDataSource>,
    cache: Arc<dyn CompletionCache>,
    profile: AthleteProfile,
    config: NutritionConfig,
    analyzer: CompletionAnalyzer,
}

impl DayPlanner {
    pub fn new(
        source: Arc<dyn TrainingDataSource>,
        cache: Arc<dyn CompletionCache>,
        profile: AthleteProfile,
        config: NutritionConfig,
    ) -> Self {
        let analyzer = CompletionAnalyzer::with_thresholds(config.completion.clone());
        Self {
            source,
            cache,
            profile,
            config,
            analyzer,
        }
    }

    /// Plan `date` as seen from `today`
    pub async fn plan_day(&self, date: NaiveDate, today: NaiveDate) -> Result<DayPlan> {
        let carb_loading_days = self.config.planning.carb_loading_days;
        let oldest = date - Duration::days(1);
        let newest = date + Duration::days(i64::from(carb_loading_days));

        let planned = self
            .source
            .get_planned_events(oldest, newest)
            .await
            .with_context(|| format!("Failed to fetch planned events for {}", date))?;
        let activities = self
            .source
            .get_activities(date, date)
            .await
            .with_context(|| format!("Failed to fetch activities for {}", date))?;
        debug!(
            source = self.source.source_name(),
            planned.count = planned.len(),
            activities.count = activities.len(),
            "Fetched calendar data"
        );

        let decorate = |events: Vec<WorkoutEvent>| -> Vec<WorkoutEvent> {
            events.into_iter().map(|event| event.decorate(today)).collect()
        };
        let timeline = merge_timeline(decorate(planned), decorate(activities));

        let flags = DayFlags::derive(date, &timeline, carb_loading_days);
        let mut events: Vec<WorkoutEvent> =
            events_on(&timeline, date).into_iter().cloned().collect();

        let (intensity, duration_minutes) = day_workload(&events, flags);
        let baseline = compute_nutrition_target(
            self.profile.body_weight().kilograms(),
            self.profile.goal,
            &intensity,
            duration_minutes,
            flags,
        );

        let mut analyses = Vec::new();
        let mut applied_ids = Vec::new();
        let mut skipped_workouts = Vec::new();
        for (completed, planned) in pair_with_plans(&events) {
            let Some(id) = events[completed].id.clone() else {
                continue;
            };
            match self.completion_for(date, &id, &events[completed]).await {
                Ok(data) => {
                    if let Some(analysis) = self.analyzer.analyze(&events[planned], Some(&data)) {
                        PlannerLogger::log_adjustment_decision(&id, &analysis);
                        if analysis.adjustment.is_some() {
                            applied_ids.push(id.clone());
                        }
                        analyses.push(analysis);
                    }
                    events[completed].completion_data = Some(data);
                }
                Err(e) => {
                    PlannerLogger::log_detail_fetch_failure(&id, date, &e);
                    skipped_workouts.push(id);
                }
            }
        }

        let adjustment = day_adjustment(&analyses);
        let target = apply_adjustment(&baseline, adjustment.as_ref());
        for id in &applied_ids {
            self.cache.mark_applied(date, id).await;
        }

        let intake = match self.source.get_intake_log(date).await {
            Ok(Some(log)) => Some(reconcile_intake(
                &target,
                &log,
                self.config.planning.intake_tolerance_percent,
            )),
            Ok(None) => None,
            Err(e) => {
                PlannerLogger::log_intake_fetch_failure(date, &e);
                None
            }
        };

        let plan = DayPlan {
            date,
            flags,
            intensity,
            duration_minutes,
            events,
            target,
            analyses,
            skipped_workouts,
            intake,
        };
        PlannerLogger::log_day_plan(&plan);
        Ok(plan)
    }

    /// Cached completion data, fetching and caching it on a miss
    async fn completion_for(
        &self,
        date: NaiveDate,
        id: &str,
        event: &WorkoutEvent,
    ) -> Result<CompletionData> {
        if let Some(data) = &event.completion_data {
            return Ok(data.clone());
        }
        if let Some(cached) = self.cache.get(date, id).await {
            debug!(workout.id = %id, "Completion data served from cache");
            return Ok(cached.data);
        }

        let detail = self.source.get_activity_detail(id).await?;
        let data = CompletionData::from_detail(&detail);
        self.cache.store(date, id, data.clone()).await;
        info!(workout.id = %id, date = %date, "Completion data fetched");
        Ok(data)
    }
}

/// Pair each completed workout of a day with the planned event it fulfilled
///
/// Returns `(completed, planned)` index pairs into `events`. Completed
/// workouts are taken in timeline order and each claims the nearest unclaimed
/// planned event of a compatible type. A workout with no such plan is its own
/// plan.
pub fn pair_with_plans(events: &[WorkoutEvent]) -> Vec<(usize, usize)> {
    let mut claimed = HashSet::new();

    events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.is_completed() && event.id.is_some())
        .map(|(completed, activity)| {
            let planned = events
                .iter()
                .enumerate()
                .filter(|(index, plan)| {
                    plan.source == EventSource::Planned
                        && !plan.is_completed()
                        && !claimed.contains(index)
                        && types_compatible(activity, plan)
                })
                .min_by_key(|(_, plan)| start_gap_minutes(activity, plan))
                .map(|(index, _)| index);

            match planned {
                Some(index) => {
                    claimed.insert(index);
                    (completed, index)
                }
                None => (completed, completed),
            }
        })
        .collect()
}

/// Unknown or missing types match anything; otherwise one must contain the
/// other ("Ride" matches "VirtualRide")
fn types_compatible(a: &WorkoutEvent, b: &WorkoutEvent) -> bool {
    let normalized = |event: &WorkoutEvent| {
        event
            .workout_type
            .as_deref()
            .map(str::to_lowercase)
            .filter(|t| !t.is_empty() && t != "unknown")
    };

    match (normalized(a), normalized(b)) {
        (Some(a), Some(b)) => a.contains(&b) || b.contains(&a),
        _ => true,
    }
}

fn start_gap_minutes(a: &WorkoutEvent, b: &WorkoutEvent) -> i64 {
    match (a.effective_start(), b.effective_start()) {
        (Some(a), Some(b)) => (a - b).num_minutes().abs(),
        _ => i64::MAX,
    }
}

/// Dominant intensity and total minutes of a day's workouts
///
/// Planned events describe the day when there are any; otherwise the
/// recorded activities do. Race days combine sessions with the session rank.
pub fn day_workload(events: &[WorkoutEvent], flags: DayFlags) -> (WorkoutIntensity, u32) {
    let planned: Vec<&WorkoutEvent> = events
        .iter()
        .filter(|e| e.source == EventSource::Planned)
        .collect();
    let workouts: Vec<&WorkoutEvent> = if planned.is_empty() {
        events.iter().collect()
    } else {
        planned
    };

    let categories: Vec<_> = workouts.iter().map(|w| classify_workout(w)).collect();
    let table = if flags.is_race_day {
        RankTable::Session
    } else {
        RankTable::Calendar
    };
    let duration = workouts.iter().map(|w| w.duration_minutes()).sum();

    (dominant_intensity(&categories, table), duration)
}
