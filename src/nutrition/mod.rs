// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Nutrition Module
//!
//! The decision logic of the planner. Everything here is synchronous and pure:
//! the same inputs and reference date always give the same answer.
//!
//! This module includes:
//! - Workout intensity classification and same-day aggregation
//! - Planned versus completed detection for calendar events
//! - Timeline merging of planned events and completed activities
//! - Baseline macro targets and in-session fueling
//! - Completion analysis and nutrition adjustments
//! - Reconciliation against logged intake

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::constants::energy::KG_PER_POUND;

pub mod adjustment;
pub mod analyzer;
pub mod classifier;
pub mod completion;
pub mod intake;
pub mod macros;
pub mod timeline;

pub use adjustment::{apply_adjustment, day_adjustment};
pub use analyzer::{analyze_completion, CompletionAnalysis, CompletionAnalyzer};
pub use classifier::{classify_workout, dominant_intensity, RankTable};
pub use completion::{detect_completion, is_past_date};
pub use intake::{reconcile_intake, IntakeReconciliation, IntakeStatus};
pub use macros::{compute_fueling, compute_macros, compute_nutrition_target, MacroTargets};
pub use timeline::merge_timeline;

/// Intensity category assigned to a single workout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityCategory {
    Easy,
    Endurance,
    Tempo,
    Threshold,
    Intervals,
    Strength,
}

impl IntensityCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntensityCategory::Easy => "easy",
            IntensityCategory::Endurance => "endurance",
            IntensityCategory::Tempo => "tempo",
            IntensityCategory::Threshold => "threshold",
            IntensityCategory::Intervals => "intervals",
            IntensityCategory::Strength => "strength",
        }
    }

    /// Numeric load level on a 1-5 scale
    pub fn intensity_level(&self) -> u8 {
        match self {
            IntensityCategory::Easy => 1,
            IntensityCategory::Endurance | IntensityCategory::Strength => 2,
            IntensityCategory::Tempo => 3,
            IntensityCategory::Threshold => 4,
            IntensityCategory::Intervals => 5,
        }
    }

    /// RPE an athlete should report when executing this category as planned
    pub fn expected_rpe(&self) -> f64 {
        match self {
            IntensityCategory::Easy => 3.0,
            IntensityCategory::Endurance => 5.0,
            IntensityCategory::Strength => 6.0,
            IntensityCategory::Tempo => 7.0,
            IntensityCategory::Threshold => 8.0,
            IntensityCategory::Intervals => 9.0,
        }
    }

    pub fn is_high_intensity(&self) -> bool {
        matches!(
            self,
            IntensityCategory::Tempo | IntensityCategory::Threshold | IntensityCategory::Intervals
        )
    }
}

impl fmt::Display for IntensityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workout load for a whole day, as the macro engine sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutIntensity {
    /// Rest day
    None,
    Easy,
    Endurance,
    Tempo,
    Threshold,
    Intervals,
    Strength,
    /// A type name the engine has no row for
    Unrecognized(String),
}

impl WorkoutIntensity {
    /// Parse a type name, keeping unknown names rather than guessing
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "" | "none" | "rest" => WorkoutIntensity::None,
            "easy" => WorkoutIntensity::Easy,
            "endurance" => WorkoutIntensity::Endurance,
            "tempo" => WorkoutIntensity::Tempo,
            "threshold" => WorkoutIntensity::Threshold,
            "intervals" => WorkoutIntensity::Intervals,
            "strength" => WorkoutIntensity::Strength,
            other => WorkoutIntensity::Unrecognized(other.to_string()),
        }
    }

    pub fn category(&self) -> Option<IntensityCategory> {
        match self {
            WorkoutIntensity::Easy => Some(IntensityCategory::Easy),
            WorkoutIntensity::Endurance => Some(IntensityCategory::Endurance),
            WorkoutIntensity::Tempo => Some(IntensityCategory::Tempo),
            WorkoutIntensity::Threshold => Some(IntensityCategory::Threshold),
            WorkoutIntensity::Intervals => Some(IntensityCategory::Intervals),
            WorkoutIntensity::Strength => Some(IntensityCategory::Strength),
            WorkoutIntensity::None | WorkoutIntensity::Unrecognized(_) => None,
        }
    }
}

impl From<IntensityCategory> for WorkoutIntensity {
    fn from(category: IntensityCategory) -> Self {
        match category {
            IntensityCategory::Easy => WorkoutIntensity::Easy,
            IntensityCategory::Endurance => WorkoutIntensity::Endurance,
            IntensityCategory::Tempo => WorkoutIntensity::Tempo,
            IntensityCategory::Threshold => WorkoutIntensity::Threshold,
            IntensityCategory::Intervals => WorkoutIntensity::Intervals,
            IntensityCategory::Strength => WorkoutIntensity::Strength,
        }
    }
}

/// Dietary goal selected by the athlete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    #[default]
    Maintenance,
    Performance,
    /// Unknown goals leave the multipliers untouched
    #[serde(other)]
    Unrecognized,
}

impl Goal {
    pub fn parse(goal: &str) -> Self {
        match goal.trim().to_lowercase().replace('_', "-").as_str() {
            "weight-loss" => Goal::WeightLoss,
            "maintenance" => Goal::Maintenance,
            "performance" => Goal::Performance,
            _ => Goal::Unrecognized,
        }
    }
}

/// Unit a body weight was entered in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilograms" => Some(WeightUnit::Kg),
            "lb" | "lbs" | "pounds" => Some(WeightUnit::Lb),
            _ => None,
        }
    }
}

/// Athlete body weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyWeight {
    pub value: f64,
    pub unit: WeightUnit,
}

impl BodyWeight {
    pub fn from_kilograms(value: f64) -> Self {
        Self { value, unit: WeightUnit::Kg }
    }

    pub fn from_pounds(value: f64) -> Self {
        Self { value, unit: WeightUnit::Lb }
    }

    pub fn kilograms(&self) -> f64 {
        match self.unit {
            WeightUnit::Kg => self.value,
            WeightUnit::Lb => self.value * KG_PER_POUND,
        }
    }
}

/// Special day types that override the regular-day multipliers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayFlags {
    pub is_race_day: bool,
    pub is_post_race: bool,
    pub is_carb_loading: bool,
}

impl DayFlags {
    pub fn is_regular(&self) -> bool {
        !(self.is_race_day || self.is_post_race || self.is_carb_loading)
    }
}

/// In-session fueling guidance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fueling {
    pub during_workout_carbs_per_hour: u32,
    pub fluid_ml_per_hour: u32,
    pub tips: Vec<String>,
}

/// Macro snapshot kept for audit when a target is adjusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSnapshot {
    pub calories: u32,
    pub carbs: u32,
    pub protein: u32,
    pub fat: u32,
}

/// Why and how a target was adjusted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentDetails {
    pub reason: String,
    pub timing: Vec<String>,
    pub recovery: Vec<String>,
    pub original_plan: MacroSnapshot,
}

/// Daily nutrition target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTarget {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fueling: Fueling,
    pub adjustment_applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_details: Option<AdjustmentDetails>,
}

impl NutritionTarget {
    pub fn snapshot(&self) -> MacroSnapshot {
        MacroSnapshot {
            calories: self.calories,
            carbs: self.carbs,
            protein: self.protein,
            fat: self.fat,
        }
    }
}

/// Signed change to a nutrition target, with the reasoning behind it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionAdjustment {
    pub calories: i32,
    pub carbs: i32,
    pub protein: i32,
    pub fat: i32,
    pub reasoning: Vec<String>,
    pub timing: Vec<String>,
    pub recovery: Vec<String>,
}

impl NutritionAdjustment {
    /// Sum of absolute calorie, carb and protein deltas
    pub fn magnitude(&self) -> u32 {
        self.calories.unsigned_abs() + self.carbs.unsigned_abs() + self.protein.unsigned_abs()
    }

    pub fn is_empty(&self) -> bool {
        self.calories == 0
            && self.carbs == 0
            && self.protein == 0
            && self.fat == 0
            && self.reasoning.is_empty()
    }
}

impl Add for NutritionAdjustment {
    type Output = NutritionAdjustment;

    fn add(mut self, other: NutritionAdjustment) -> NutritionAdjustment {
        self.calories += other.calories;
        self.carbs += other.carbs;
        self.protein += other.protein;
        self.fat += other.fat;
        self.reasoning.extend(other.reasoning);
        self.timing.extend(other.timing);
        self.recovery.extend(other.recovery);
        self
    }
}

impl Sum for NutritionAdjustment {
    fn sum<I: Iterator<Item = NutritionAdjustment>>(iter: I) -> Self {
        iter.fold(NutritionAdjustment::default(), Add::add)
    }
}

/// Round halves toward positive infinity (`2.5` -> 3, `-2.5` -> -2)
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
    }

    #[test]
    fn test_pounds_to_kilograms() {
        let weight = BodyWeight::from_pounds(192.0);
        assert!((weight.kilograms() - 87.09).abs() < 0.01);
        assert_eq!(BodyWeight::from_kilograms(70.0).kilograms(), 70.0);
    }

    #[test]
    fn test_goal_parsing() {
        assert_eq!(Goal::parse("weight-loss"), Goal::WeightLoss);
        assert_eq!(Goal::parse("Weight_Loss"), Goal::WeightLoss);
        assert_eq!(Goal::parse("performance"), Goal::Performance);
        assert_eq!(Goal::parse("bulk"), Goal::Unrecognized);

        let goal: Goal = serde_json::from_str("\"bulk\"").unwrap();
        assert_eq!(goal, Goal::Unrecognized);
    }

    #[test]
    fn test_workout_intensity_parsing() {
        assert_eq!(WorkoutIntensity::parse("Tempo"), WorkoutIntensity::Tempo);
        assert_eq!(WorkoutIntensity::parse(""), WorkoutIntensity::None);
        assert_eq!(
            WorkoutIntensity::parse("yoga"),
            WorkoutIntensity::Unrecognized("yoga".to_string())
        );
    }

    #[test]
    fn test_intensity_levels_and_expected_rpe() {
        assert_eq!(IntensityCategory::Strength.intensity_level(), 2);
        assert_eq!(IntensityCategory::Intervals.intensity_level(), 5);
        assert_eq!(IntensityCategory::Strength.expected_rpe(), 6.0);
        assert_eq!(IntensityCategory::Easy.expected_rpe(), 3.0);
    }

    #[test]
    fn test_adjustments_sum_into_one() {
        let first = NutritionAdjustment {
            calories: 240,
            carbs: 36,
            reasoning: vec!["Longer than planned".to_string()],
            ..Default::default()
        };
        let second = NutritionAdjustment {
            calories: -120,
            carbs: -12,
            reasoning: vec!["Easier than planned".to_string()],
            ..Default::default()
        };

        let total: NutritionAdjustment = vec![first, second].into_iter().sum();
        assert_eq!(total.calories, 120);
        assert_eq!(total.carbs, 24);
        assert_eq!(total.reasoning.len(), 2);
        assert_eq!(total.magnitude(), 144);
    }
}
