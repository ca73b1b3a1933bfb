// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Baseline macro targets and in-session fueling guidance

use serde::{Deserialize, Serialize};

use super::{round_half_up, DayFlags, Fueling, Goal, NutritionTarget, WorkoutIntensity};
use crate::constants::{energy, fueling, multipliers};

/// Daily macro-nutrient targets in grams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTargets {
    pub protein: u32,
    pub fat: u32,
    pub carbs: u32,
}

impl MacroTargets {
    /// Calories implied by the rounded gram targets
    pub fn calories(&self) -> u32 {
        let kcal = f64::from(self.protein) * energy::KCAL_PER_GRAM_PROTEIN
            + f64::from(self.carbs) * energy::KCAL_PER_GRAM_CARBS
            + f64::from(self.fat) * energy::KCAL_PER_GRAM_FAT;
        round_half_up(kcal).max(0) as u32
    }
}

/// Grams per kilogram of body weight for each macro
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroMultipliers {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl From<(f64, f64, f64)> for MacroMultipliers {
    fn from((protein, fat, carbs): (f64, f64, f64)) -> Self {
        Self { protein, fat, carbs }
    }
}

/// Select multipliers for a day
///
/// Day types take priority in the order race day, post-race, carb loading.
/// Only regular days are shaped by the goal.
pub fn select_multipliers(
    intensity: &WorkoutIntensity,
    duration_minutes: u32,
    flags: DayFlags,
    goal: Goal,
) -> MacroMultipliers {
    if flags.is_race_day {
        return multipliers::RACE_DAY.into();
    }
    if flags.is_post_race {
        return multipliers::POST_RACE.into();
    }
    if flags.is_carb_loading {
        return multipliers::CARB_LOADING.into();
    }

    let mut base: MacroMultipliers = match intensity {
        WorkoutIntensity::None | WorkoutIntensity::Easy => multipliers::REST_OR_EASY.into(),
        WorkoutIntensity::Endurance => {
            let mut m: MacroMultipliers = multipliers::ENDURANCE.into();
            if duration_minutes > multipliers::LONG_ENDURANCE_MINUTES {
                m.carbs += multipliers::LONG_ENDURANCE_CARB_BONUS;
            }
            m
        }
        WorkoutIntensity::Tempo | WorkoutIntensity::Threshold | WorkoutIntensity::Intervals => {
            multipliers::HIGH_INTENSITY.into()
        }
        WorkoutIntensity::Strength => multipliers::STRENGTH.into(),
        WorkoutIntensity::Unrecognized(_) => multipliers::UNRECOGNIZED.into(),
    };

    match goal {
        Goal::WeightLoss => {
            if matches!(intensity, WorkoutIntensity::None | WorkoutIntensity::Easy) {
                base = multipliers::WEIGHT_LOSS_LIGHT_DAY.into();
            } else {
                base.fat = (base.fat - multipliers::WEIGHT_LOSS_FAT_REDUCTION)
                    .max(multipliers::WEIGHT_LOSS_FAT_FLOOR);
                base.carbs = (base.carbs - multipliers::WEIGHT_LOSS_CARB_REDUCTION)
                    .max(multipliers::WEIGHT_LOSS_CARB_FLOOR);
            }
        }
        Goal::Performance => {
            base.protein += multipliers::PERFORMANCE_PROTEIN_BONUS;
            base.carbs += multipliers::PERFORMANCE_CARB_BONUS;
        }
        Goal::Maintenance | Goal::Unrecognized => {}
    }

    base
}

/// Compute daily macro targets; each macro is rounded on its own
pub fn compute_macros(
    body_weight_kg: f64,
    intensity: &WorkoutIntensity,
    duration_minutes: u32,
    flags: DayFlags,
    goal: Goal,
) -> MacroTargets {
    let m = select_multipliers(intensity, duration_minutes, flags, goal);
    let grams = |per_kg: f64| round_half_up(per_kg * body_weight_kg).max(0) as u32;

    MacroTargets {
        protein: grams(m.protein),
        fat: grams(m.fat),
        carbs: grams(m.carbs),
    }
}

/// In-session fueling guidance for a day's training
pub fn compute_fueling(
    intensity: &WorkoutIntensity,
    duration_minutes: u32,
    is_race_day: bool,
) -> Fueling {
    let (carbs_per_hour, tip) = if is_race_day {
        (fueling::RACE_CARBS_PER_HOUR, fueling::TIP_RACE)
    } else if (fueling::MEDIUM_SESSION_MIN_MINUTES..=fueling::MEDIUM_SESSION_MAX_MINUTES)
        .contains(&duration_minutes)
    {
        (fueling::MEDIUM_SESSION_CARBS_PER_HOUR, fueling::TIP_MEDIUM)
    } else if duration_minutes > fueling::MEDIUM_SESSION_MAX_MINUTES {
        let hard = intensity.category().is_some_and(|c| c.is_high_intensity());
        let rate = if hard {
            fueling::LONG_HARD_SESSION_CARBS_PER_HOUR
        } else {
            fueling::LONG_SESSION_CARBS_PER_HOUR
        };
        (rate, fueling::TIP_LONG)
    } else {
        (0, fueling::TIP_SHORT)
    };

    Fueling {
        during_workout_carbs_per_hour: carbs_per_hour,
        fluid_ml_per_hour: fueling::FLUID_ML_PER_HOUR,
        tips: vec![tip.to_string()],
    }
}

/// Full baseline nutrition target for a day
pub fn compute_nutrition_target(
    body_weight_kg: f64,
    goal: Goal,
    intensity: &WorkoutIntensity,
    duration_minutes: u32,
    flags: DayFlags,
) -> NutritionTarget {
    let macros = compute_macros(body_weight_kg, intensity, duration_minutes, flags, goal);

    NutritionTarget {
        calories: macros.calories(),
        protein: macros.protein,
        carbs: macros.carbs,
        fat: macros.fat,
        fueling: compute_fueling(intensity, duration_minutes, flags.is_race_day),
        adjustment_applied: false,
        adjustment_details: None,
    }
}
