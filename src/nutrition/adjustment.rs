// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Folding completion adjustments into a baseline target

use super::{AdjustmentDetails, CompletionAnalysis, NutritionAdjustment, NutritionTarget};

/// Apply an adjustment to a baseline target
///
/// The baseline is left untouched; the returned target records the baseline
/// macros under `original_plan`. Gram and calorie fields never go below zero.
pub fn apply_adjustment(
    baseline: &NutritionTarget,
    adjustment: Option<&NutritionAdjustment>,
) -> NutritionTarget {
    let Some(adjustment) = adjustment else {
        return baseline.clone();
    };

    let shift = |value: u32, delta: i32| (i64::from(value) + i64::from(delta)).max(0) as u32;

    NutritionTarget {
        calories: shift(baseline.calories, adjustment.calories),
        protein: shift(baseline.protein, adjustment.protein),
        carbs: shift(baseline.carbs, adjustment.carbs),
        fat: shift(baseline.fat, adjustment.fat),
        fueling: baseline.fueling.clone(),
        adjustment_applied: true,
        adjustment_details: Some(AdjustmentDetails {
            reason: adjustment.reasoning.join(". "),
            timing: adjustment.timing.clone(),
            recovery: adjustment.recovery.clone(),
            original_plan: baseline.snapshot(),
        }),
    }
}

/// Sum the accepted adjustments of a day's analyses
///
/// Returns `None` when no analysis carried an accepted adjustment.
pub fn day_adjustment<'a, I>(analyses: I) -> Option<NutritionAdjustment>
where
    I: IntoIterator<Item = &'a CompletionAnalysis>,
{
    analyses
        .into_iter()
        .filter_map(|analysis| analysis.adjustment.clone())
        .reduce(|total, next| total + next)
}
