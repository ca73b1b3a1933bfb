// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Completion analyzer: compares a planned workout with how it was executed
//! and sizes the nutrition adjustment the difference calls for

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{classifier::classify_workout, round_half_up, IntensityCategory, NutritionAdjustment};
use crate::config::nutrition_config::CompletionThresholds;
use crate::constants::adjustment as rates;
use crate::models::{CompletionData, WorkoutEvent};

const MSG_RECOVERY_MEAL: &str = "Eat a recovery meal within 30 minutes";
const MSG_EXTRA_PROTEIN: &str = "Add 20-30g of extra protein to support repair";
const MSG_MONITOR_FATIGUE: &str = "Monitor fatigue and sleep over the next 24 hours";
const MSG_CARBS_WITHIN_2H: &str = "Take in carbohydrates within 2 hours";
const MSG_ELECTROLYTES: &str = "Replace electrolytes lost through sweat";

/// What the calendar said the workout would be
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedMetrics {
    pub duration_minutes: u32,
    pub intensity_category: IntensityCategory,
    /// 1 (easy) to 5 (intervals)
    pub intensity_level: u8,
    pub name: String,
    pub category: Option<String>,
}

/// Planned versus actual execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionComparison {
    /// actual / planned duration; absent when no duration was planned
    pub duration_ratio: Option<f64>,
    pub duration_difference_minutes: i32,
    pub avg_heart_rate: Option<f64>,
    pub estimated_intensity_from_hr: Option<IntensityCategory>,
    pub perceived_effort: Option<f64>,
    /// Reported RPE minus the RPE expected for the planned category
    pub effort_vs_planned: Option<f64>,
}

/// Result of analysing one completed workout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionAnalysis {
    pub workout_id: Option<String>,
    pub planned_metrics: PlannedMetrics,
    pub comparison: ExecutionComparison,
    /// Present only when the adjustment passed the magnitude and confidence gate
    pub adjustment: Option<NutritionAdjustment>,
    /// 0.0 to 1.0
    pub confidence: f64,
}

/// Analyzer for planned-versus-completed workouts
#[derive(Debug, Clone, Default)]
pub struct CompletionAnalyzer {
    thresholds: CompletionThresholds,
}

impl CompletionAnalyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom thresholds
    pub fn with_thresholds(thresholds: CompletionThresholds) -> Self {
        Self { thresholds }
    }

    /// Analyze a planned workout against its completion data
    ///
    /// Returns `None` when there is no completion data to compare with.
    pub fn analyze(
        &self,
        planned: &WorkoutEvent,
        completion: Option<&CompletionData>,
    ) -> Option<CompletionAnalysis> {
        let completion = completion?;

        let category = classify_workout(planned);
        let planned_metrics = PlannedMetrics {
            duration_minutes: planned.duration_minutes(),
            intensity_category: category,
            intensity_level: category.intensity_level(),
            name: planned.display_name().to_string(),
            category: planned.category.clone(),
        };

        let comparison = self.compare(&planned_metrics, completion);
        let confidence = confidence_score(&comparison, completion);

        let adjustment = [
            duration_adjustment(&comparison),
            effort_adjustment(&comparison, completion.actual_duration_minutes),
            self.heart_rate_adjustment(&comparison, completion.actual_duration_minutes),
        ]
        .into_iter()
        .sum::<NutritionAdjustment>();

        let accepted = self.accepts(&adjustment, confidence);
        debug!(
            workout.id = planned.id.as_deref().unwrap_or("unknown"),
            adjustment.magnitude = adjustment.magnitude(),
            analysis.confidence = confidence,
            adjustment.accepted = accepted,
            "Completion analysed"
        );

        Some(CompletionAnalysis {
            workout_id: planned.id.clone(),
            planned_metrics,
            comparison,
            adjustment: accepted.then_some(adjustment),
            confidence,
        })
    }

    /// Whether an adjustment is material and well-founded enough to apply
    pub fn accepts(&self, adjustment: &NutritionAdjustment, confidence: f64) -> bool {
        adjustment.magnitude() >= self.thresholds.min_adjustment_magnitude
            && confidence >= self.thresholds.min_confidence
    }

    /// Intensity implied by an average heart rate
    pub fn intensity_from_heart_rate(&self, avg_hr: f64) -> IntensityCategory {
        let bands = &self.thresholds.hr_bands;
        match avg_hr {
            hr if hr < bands.easy_max => IntensityCategory::Easy,
            hr if hr < bands.endurance_max => IntensityCategory::Endurance,
            hr if hr < bands.tempo_max => IntensityCategory::Tempo,
            hr if hr < bands.threshold_max => IntensityCategory::Threshold,
            _ => IntensityCategory::Intervals,
        }
    }

    fn compare(
        &self,
        planned: &PlannedMetrics,
        completion: &CompletionData,
    ) -> ExecutionComparison {
        let actual = completion.actual_duration_minutes;
        let duration_ratio = (planned.duration_minutes > 0)
            .then(|| f64::from(actual) / f64::from(planned.duration_minutes));

        ExecutionComparison {
            duration_ratio,
            duration_difference_minutes: actual as i32 - planned.duration_minutes as i32,
            avg_heart_rate: completion.avg_heart_rate,
            estimated_intensity_from_hr: completion
                .avg_heart_rate
                .map(|hr| self.intensity_from_heart_rate(hr)),
            perceived_effort: completion.perceived_effort,
            effort_vs_planned: completion
                .perceived_effort
                .map(|rpe| rpe - planned.intensity_category.expected_rpe()),
        }
    }

    fn heart_rate_adjustment(
        &self,
        comparison: &ExecutionComparison,
        actual_minutes: u32,
    ) -> NutritionAdjustment {
        let Some(avg_hr) = comparison.avg_heart_rate else {
            return NutritionAdjustment::default();
        };

        if avg_hr > self.thresholds.high_hr_bpm {
            let calories =
                round_half_up(f64::from(actual_minutes) * rates::HIGH_HR_KCAL_PER_MINUTE);
            NutritionAdjustment {
                calories,
                carbs: grams_of(calories, rates::HIGH_HR_CARB_SHARE),
                reasoning: vec![format!(
                    "High average heart rate ({:.0} bpm) means elevated energy expenditure",
                    avg_hr
                )],
                timing: vec![MSG_CARBS_WITHIN_2H.to_string(), MSG_ELECTROLYTES.to_string()],
                ..Default::default()
            }
        } else if avg_hr < self.thresholds.low_hr_bpm {
            NutritionAdjustment {
                reasoning: vec![format!(
                    "Low average heart rate ({:.0} bpm); the session stayed aerobic",
                    avg_hr
                )],
                ..Default::default()
            }
        } else {
            NutritionAdjustment::default()
        }
    }
}

/// Analyze with default thresholds
pub fn analyze_completion(
    planned: &WorkoutEvent,
    completion: Option<&CompletionData>,
) -> Option<CompletionAnalysis> {
    CompletionAnalyzer::new().analyze(planned, completion)
}

/// Confidence grows with every independent signal the completion carries
fn confidence_score(comparison: &ExecutionComparison, completion: &CompletionData) -> f64 {
    let mut points = rates::CONFIDENCE_BASE;
    if completion.perceived_effort.is_some() {
        points += rates::CONFIDENCE_RPE;
    }
    if completion.avg_heart_rate.is_some() {
        points += rates::CONFIDENCE_HEART_RATE;
    }
    if completion.avg_power.is_some() {
        points += rates::CONFIDENCE_POWER;
    }
    if comparison.duration_difference_minutes.abs() > rates::CONFIDENCE_DURATION_MINUTES {
        points += rates::CONFIDENCE_DURATION;
    }
    f64::from(points.min(100)) / 100.0
}

fn duration_adjustment(comparison: &ExecutionComparison) -> NutritionAdjustment {
    let difference = comparison.duration_difference_minutes;
    if difference.abs() <= rates::DURATION_TRIGGER_MINUTES {
        return NutritionAdjustment::default();
    }

    let calories = round_half_up(f64::from(difference) * rates::DURATION_KCAL_PER_MINUTE);
    let direction = if difference > 0 { "longer" } else { "shorter" };

    NutritionAdjustment {
        calories,
        carbs: grams_of(calories, rates::DURATION_CARB_SHARE),
        reasoning: vec![format!(
            "Workout ran {} minutes {} than planned",
            difference.abs(),
            direction
        )],
        ..Default::default()
    }
}

fn effort_adjustment(comparison: &ExecutionComparison, actual_minutes: u32) -> NutritionAdjustment {
    let Some(rpe_difference) = comparison.effort_vs_planned else {
        return NutritionAdjustment::default();
    };
    let minutes = f64::from(actual_minutes);

    if rpe_difference >= rates::RPE_TRIGGER {
        let calories = round_half_up(minutes * rates::HARDER_KCAL_PER_MINUTE);
        NutritionAdjustment {
            calories,
            carbs: grams_of(calories, rates::HARDER_CARB_SHARE),
            protein: grams_of(calories, rates::HARDER_PROTEIN_SHARE),
            reasoning: vec![format!(
                "Workout felt harder than planned (RPE +{:.0})",
                rpe_difference
            )],
            recovery: vec![
                MSG_RECOVERY_MEAL.to_string(),
                MSG_EXTRA_PROTEIN.to_string(),
                MSG_MONITOR_FATIGUE.to_string(),
            ],
            ..Default::default()
        }
    } else if rpe_difference <= -rates::RPE_TRIGGER {
        let calories = round_half_up(minutes * rates::EASIER_KCAL_PER_MINUTE);
        NutritionAdjustment {
            calories,
            carbs: grams_of(calories, rates::EASIER_CARB_SHARE),
            reasoning: vec![format!(
                "Workout felt easier than planned (RPE {:.0})",
                rpe_difference
            )],
            ..Default::default()
        }
    } else {
        NutritionAdjustment::default()
    }
}

/// Grams of a 4 kcal/g macro covering `share` of `calories`, keeping the sign
fn grams_of(calories: i32, share: f64) -> i32 {
    let grams = round_half_up(f64::from(calories.unsigned_abs()) * share / 4.0);
    if calories < 0 {
        -grams
    } else {
        grams
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planned(name: &str, minutes: u64) -> WorkoutEvent {
        WorkoutEvent {
            id: Some("w1".to_string()),
            name: Some(name.to_string()),
            workout_type: Some("Ride".to_string()),
            duration_seconds: Some(minutes * 60),
            ..Default::default()
        }
    }

    fn completion(minutes: u32) -> CompletionData {
        CompletionData {
            actual_duration_minutes: minutes,
            avg_heart_rate: None,
            max_heart_rate: None,
            avg_power: None,
            max_power: None,
            avg_cadence: None,
            elevation_gain: None,
            distance: None,
            avg_speed: None,
            calories_burned: None,
            training_stress_score: None,
            perceived_effort: None,
            description: None,
            workout_code: None,
        }
    }

    #[test]
    fn test_no_completion_data_gives_no_analysis() {
        assert!(analyze_completion(&planned("Endurance", 60), None).is_none());
    }

    #[test]
    fn test_duration_adjustment_for_longer_session() {
        let comparison = ExecutionComparison {
            duration_ratio: Some(80.0 / 60.0),
            duration_difference_minutes: 20,
            avg_heart_rate: None,
            estimated_intensity_from_hr: None,
            perceived_effort: None,
            effort_vs_planned: None,
        };
        let adjustment = duration_adjustment(&comparison);
        assert_eq!(adjustment.calories, 240);
        assert_eq!(adjustment.carbs, 36);
        assert_eq!(adjustment.protein, 0);
    }

    #[test]
    fn test_duration_below_trigger_contributes_nothing() {
        let analysis =
            analyze_completion(&planned("Endurance", 60), Some(&completion(75))).unwrap();
        assert_eq!(analysis.comparison.duration_difference_minutes, 15);
        // Only the base confidence plus the >10 minute bonus
        assert_eq!(analysis.confidence, 0.5);
        assert!(analysis.adjustment.is_none());
    }

    #[test]
    fn test_longer_session_with_rpe_is_accepted() {
        let mut data = completion(80);
        data.perceived_effort = Some(5.0);

        let analysis = analyze_completion(&planned("Endurance Ride", 60), Some(&data)).unwrap();
        assert_eq!(analysis.confidence, 0.8);
        assert_eq!(analysis.comparison.duration_ratio, Some(80.0 / 60.0));
        assert_eq!(analysis.comparison.effort_vs_planned, Some(0.0));

        let adjustment = analysis.adjustment.expect("adjustment should pass the gate");
        assert_eq!(adjustment.calories, 240);
        assert_eq!(adjustment.carbs, 36);
    }

    #[test]
    fn test_harder_than_planned() {
        let mut data = completion(60);
        data.perceived_effort = Some(8.0);
        data.avg_heart_rate = Some(155.0);

        let analysis = analyze_completion(&planned("Endurance", 60), Some(&data)).unwrap();
        assert_eq!(analysis.comparison.effort_vs_planned, Some(3.0));
        assert_eq!(
            analysis.comparison.estimated_intensity_from_hr,
            Some(IntensityCategory::Tempo)
        );

        let adjustment = analysis.adjustment.unwrap();
        assert_eq!(adjustment.calories, 480);
        assert_eq!(adjustment.carbs, 60);
        assert_eq!(adjustment.protein, 30);
        assert_eq!(adjustment.recovery.len(), 3);
    }

    #[test]
    fn test_easier_than_planned_reduces_carbs() {
        let mut data = completion(60);
        data.perceived_effort = Some(6.0);
        data.avg_power = Some(190.0);

        let analysis = analyze_completion(&planned("VO2 Intervals", 60), Some(&data)).unwrap();
        let adjustment = analysis.adjustment.unwrap();
        assert_eq!(adjustment.calories, -240);
        assert_eq!(adjustment.carbs, -24);
        assert_eq!(adjustment.protein, 0);
        assert!(adjustment.recovery.is_empty());
    }

    #[test]
    fn test_high_heart_rate_adds_fuel() {
        let mut data = completion(60);
        data.avg_heart_rate = Some(172.0);
        data.perceived_effort = Some(9.0);

        let analysis = analyze_completion(&planned("Threshold", 60), Some(&data)).unwrap();
        let adjustment = analysis.adjustment.unwrap();
        // RPE +1 is under the effort trigger; only heart rate contributes
        assert_eq!(adjustment.calories, 300);
        assert_eq!(adjustment.carbs, 53);
        assert_eq!(adjustment.timing.len(), 2);
    }

    #[test]
    fn test_low_heart_rate_is_informational() {
        let analyzer = CompletionAnalyzer::new();
        let comparison = ExecutionComparison {
            duration_ratio: Some(1.0),
            duration_difference_minutes: 0,
            avg_heart_rate: Some(118.0),
            estimated_intensity_from_hr: Some(IntensityCategory::Easy),
            perceived_effort: None,
            effort_vs_planned: None,
        };
        let adjustment = analyzer.heart_rate_adjustment(&comparison, 90);
        assert_eq!(adjustment.magnitude(), 0);
        assert_eq!(adjustment.reasoning.len(), 1);
    }

    #[test]
    fn test_gate_rejects_low_confidence() {
        let analyzer = CompletionAnalyzer::new();
        let adjustment = NutritionAdjustment {
            calories: 150,
            carbs: 40,
            protein: 10,
            ..Default::default()
        };
        assert_eq!(adjustment.magnitude(), 200);
        assert!(!analyzer.accepts(&adjustment, 0.5));
        assert!(analyzer.accepts(&adjustment, 0.6));

        let tiny = NutritionAdjustment {
            calories: 40,
            carbs: 9,
            ..Default::default()
        };
        assert!(!analyzer.accepts(&tiny, 1.0));
    }

    #[test]
    fn test_confidence_is_capped() {
        let mut data = completion(120);
        data.perceived_effort = Some(5.0);
        data.avg_heart_rate = Some(140.0);
        data.avg_power = Some(200.0);

        let analysis = analyze_completion(&planned("Endurance", 60), Some(&data)).unwrap();
        assert_eq!(analysis.confidence, 1.0);
    }

    #[test]
    fn test_heart_rate_bands() {
        let analyzer = CompletionAnalyzer::new();
        assert_eq!(analyzer.intensity_from_heart_rate(129.0), IntensityCategory::Easy);
        assert_eq!(analyzer.intensity_from_heart_rate(130.0), IntensityCategory::Endurance);
        assert_eq!(analyzer.intensity_from_heart_rate(164.9), IntensityCategory::Tempo);
        assert_eq!(analyzer.intensity_from_heart_rate(174.0), IntensityCategory::Threshold);
        assert_eq!(analyzer.intensity_from_heart_rate(175.0), IntensityCategory::Intervals);
    }

    #[test]
    fn test_zero_planned_duration_has_no_ratio() {
        let analysis = analyze_completion(&planned("Ride", 0), Some(&completion(45))).unwrap();
        assert_eq!(analysis.comparison.duration_ratio, None);
        assert_eq!(analysis.comparison.duration_difference_minutes, 45);
    }
}
