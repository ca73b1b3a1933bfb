// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reconciliation of a day's target against logged intake

use serde::{Deserialize, Serialize};

use super::{round_half_up, NutritionTarget};
use crate::models::IntakeLog;

/// Where logged calories landed relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    Under,
    OnTarget,
    Over,
}

/// Logged intake compared with the target (deltas are actual - target)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReconciliation {
    pub calories_delta: i32,
    pub protein_delta: i32,
    pub carbs_delta: i32,
    pub fat_delta: i32,
    /// Logged calories as a percentage of target, one decimal
    pub calorie_adherence_percent: f64,
    pub status: IntakeStatus,
}

/// Compare a target with what was actually eaten
pub fn reconcile_intake(
    target: &NutritionTarget,
    log: &IntakeLog,
    tolerance_percent: f64,
) -> IntakeReconciliation {
    let delta = |actual: Option<f64>, planned: u32| {
        round_half_up(actual.unwrap_or(0.0) - f64::from(planned))
    };
    let logged_calories = log.calories.unwrap_or(0.0);

    let calorie_adherence_percent = if target.calories == 0 {
        0.0
    } else {
        (logged_calories / f64::from(target.calories) * 1000.0).round() / 10.0
    };

    let status = if calorie_adherence_percent < 100.0 - tolerance_percent {
        IntakeStatus::Under
    } else if calorie_adherence_percent > 100.0 + tolerance_percent {
        IntakeStatus::Over
    } else {
        IntakeStatus::OnTarget
    };

    IntakeReconciliation {
        calories_delta: delta(log.calories, target.calories),
        protein_delta: delta(log.protein, target.protein),
        carbs_delta: delta(log.carbs, target.carbs),
        fat_delta: delta(log.fat, target.fat),
        calorie_adherence_percent,
        status,
    }
}
