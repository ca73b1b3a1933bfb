// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Behavioural tests for the nutrition engine through the public API

use chrono::NaiveDate;
use serde_json::json;
use training_fuel::config::CompletionThresholds;
use training_fuel::models::{ActivityDetail, CompletionData, EventSource, WorkoutEvent};
use training_fuel::nutrition::classifier::classify_text;
use training_fuel::nutrition::{
    analyze_completion, apply_adjustment, compute_macros, compute_nutrition_target,
    day_adjustment, detect_completion, merge_timeline, BodyWeight, CompletionAnalyzer, DayFlags,
    Goal, IntensityCategory, WorkoutIntensity,
};

fn event(value: serde_json::Value) -> WorkoutEvent {
    serde_json::from_value(value).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
}

fn completion(minutes: u64) -> CompletionData {
    CompletionData::from_detail(&ActivityDetail {
        moving_time: Some(minutes * 60),
        ..Default::default()
    })
}

#[test]
fn strength_endurance_is_fuelled_as_intervals() {
    assert_eq!(
        classify_text(Some("Strength Endurance Intervals"), None),
        IntensityCategory::Intervals
    );
    assert_eq!(
        classify_text(Some("Low Cadence Climbs"), Some("Ride")),
        IntensityCategory::Intervals
    );
    assert_eq!(
        classify_text(Some("Core"), Some("WeightTraining strength")),
        IntensityCategory::Strength
    );
    assert_eq!(classify_text(None, None), IntensityCategory::Endurance);
}

#[test]
fn future_events_are_never_completed() {
    let ride = event(json!({
        "id": "i1",
        "startDateLocal": "2025-03-12T08:00:00",
        "movingTime": 3600,
        "avgHeartrate": 150.0
    }));

    let status = detect_completion(&ride, day(10));
    assert!(!status.is_completed);
    assert!(!status.is_past_date);
    assert!(!status.needs_completion_data);

    let today = detect_completion(&ride, day(12));
    assert!(!today.is_completed);

    let later = detect_completion(&ride, day(13));
    assert!(later.is_completed);
    assert!(later.needs_completion_data);
}

#[test]
fn merge_dedups_and_orders_the_timeline() {
    let planned = vec![
        event(json!({ "id": 1, "startDateLocal": "2025-03-08T09:00:00", "name": "Tempo" })),
        event(json!({ "id": 2, "startDateLocal": "2025-03-07T09:00:00", "name": "Easy" })),
    ];
    let completed = vec![
        event(json!({ "id": "a", "startDateLocal": "2025-03-08T09:00:00", "type": "Ride" })),
        event(json!({ "id": "a", "startDateLocal": "2025-03-08T10:00:00", "type": "Ride" })),
        event(json!({ "id": "b", "startDate": "2025-03-06T18:00:00Z" })),
    ];

    let timeline = merge_timeline(planned, completed);
    let names: Vec<_> = timeline.iter().map(|e| e.display_name()).collect();
    assert_eq!(names, vec!["Completed Activity", "Easy", "Tempo", "Ride"]);
    assert_eq!(timeline.iter().filter(|e| e.id.as_deref() == Some("a")).count(), 1);
    assert_eq!(timeline[3].source, EventSource::Completed);
    assert_eq!(timeline[0].workout_type.as_deref(), Some("Unknown"));

    let starts: Vec<_> = timeline.iter().map(|e| e.effective_start()).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn calories_follow_rounded_macros() {
    let intensities = [
        WorkoutIntensity::None,
        WorkoutIntensity::Easy,
        WorkoutIntensity::Endurance,
        WorkoutIntensity::Intervals,
        WorkoutIntensity::Strength,
    ];
    for intensity in &intensities {
        for duration in [0, 45, 150] {
            let target = compute_nutrition_target(
                63.4,
                Goal::WeightLoss,
                intensity,
                duration,
                DayFlags::default(),
            );
            assert_eq!(target.calories, target.protein * 4 + target.carbs * 4 + target.fat * 9);
        }
    }
}

#[test]
fn race_day_wins_over_post_race_and_ignores_goal() {
    let both = DayFlags {
        is_race_day: true,
        is_post_race: true,
        is_carb_loading: true,
    };

    let race = compute_macros(80.0, &WorkoutIntensity::Easy, 30, both, Goal::WeightLoss);
    assert_eq!((race.protein, race.fat, race.carbs), (176, 136, 688));

    let performance =
        compute_macros(80.0, &WorkoutIntensity::Intervals, 200, both, Goal::Performance);
    assert_eq!(race, performance);
}

#[test]
fn pounds_scenario_for_performance_athlete() {
    let weight = BodyWeight::from_pounds(192.0);
    let target = compute_nutrition_target(
        weight.kilograms(),
        Goal::Performance,
        &WorkoutIntensity::Endurance,
        60,
        DayFlags::default(),
    );

    assert_eq!((target.protein, target.fat, target.carbs), (174, 96, 505));
    assert_eq!(target.calories, 3580);
    assert_eq!(target.fueling.during_workout_carbs_per_hour, 40);
}

#[test]
fn longer_than_planned_adds_duration_calories() {
    let planned = event(json!({
        "id": 7,
        "startDateLocal": "2025-03-08T07:00:00",
        "name": "Endurance ride",
        "durationSeconds": 3600
    }));

    let analysis = analyze_completion(&planned, Some(&completion(80))).unwrap();
    assert_eq!(analysis.comparison.duration_difference_minutes, 20);

    // Only the base and duration signals are present, so the gate rejects it
    assert!(analysis.confidence < 0.6);
    assert!(analysis.adjustment.is_none());

    let lenient = CompletionAnalyzer::with_thresholds(CompletionThresholds {
        min_confidence: 0.0,
        ..Default::default()
    });
    let adjustment = lenient
        .analyze(&planned, Some(&completion(80)))
        .and_then(|a| a.adjustment)
        .unwrap();
    assert_eq!((adjustment.calories, adjustment.carbs), (240, 36));
}

#[test]
fn missing_completion_data_gives_no_analysis() {
    let planned = event(json!({ "name": "Tempo", "durationSeconds": 3600 }));
    assert!(analyze_completion(&planned, None).is_none());
}

#[test]
fn day_adjustments_fold_into_one_applied_target() {
    let lenient = CompletionAnalyzer::with_thresholds(CompletionThresholds {
        min_confidence: 0.0,
        ..Default::default()
    });
    let ride = event(json!({ "id": 1, "name": "Endurance", "durationSeconds": 3600 }));
    let run = event(json!({ "id": 2, "name": "Endurance run", "durationSeconds": 3600 }));

    let analyses: Vec<_> = [(&ride, 80), (&run, 90)]
        .into_iter()
        .filter_map(|(planned, minutes)| lenient.analyze(planned, Some(&completion(minutes))))
        .collect();
    let total = day_adjustment(&analyses).unwrap();
    assert_eq!(total.calories, 240 + 360);
    assert_eq!(total.reasoning.len(), 2);

    let baseline = compute_nutrition_target(
        70.0,
        Goal::Maintenance,
        &WorkoutIntensity::Endurance,
        60,
        DayFlags::default(),
    );
    let adjusted = apply_adjustment(&baseline, Some(&total));
    assert!(adjusted.adjustment_applied);
    assert_eq!(adjusted.calories, baseline.calories + 600);
    assert_eq!(adjusted.adjustment_details.unwrap().original_plan, baseline.snapshot());
    assert!(!baseline.adjustment_applied);
}
