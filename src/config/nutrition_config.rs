// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Nutrition-specific configuration for completion analysis and day planning

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main nutrition configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    #[serde(default)]
    pub completion: CompletionThresholds,
    #[serde(default)]
    pub planning: PlanningConfig,
}

/// Thresholds used when comparing a planned workout with its execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionThresholds {
    /// Heart rate bands for estimating intensity from average HR (bpm)
    pub hr_bands: HeartRateBands,
    /// Average HR above which extra fueling is recommended
    pub high_hr_bpm: f64,
    /// Average HR below which the session is flagged as very easy
    pub low_hr_bpm: f64,
    /// Minimum |calories| + |carbs| + |protein| for an adjustment to count
    pub min_adjustment_magnitude: u32,
    /// Minimum analysis confidence for an adjustment to count
    pub min_confidence: f64,
}

/// Upper bounds (exclusive) of each HR-estimated intensity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartRateBands {
    pub easy_max: f64,
    pub endurance_max: f64,
    pub tempo_max: f64,
    pub threshold_max: f64,
    // >= threshold_max = intervals
}

/// Day planning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// Days before an A race that count as carb loading
    pub carb_loading_days: u32,
    /// Calorie band (percent of target) treated as on target
    pub intake_tolerance_percent: f64,
}

impl NutritionConfig {
    /// Load a standalone thresholds file (the `[nutrition]` table of the
    /// main config, without the prefix)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| {
            format!("Failed to read nutrition config file: {}", path.display())
        })?;

        let config: NutritionConfig = toml::from_str(&content).with_context(|| {
            format!("Failed to parse nutrition config file: {}", path.display())
        })?;

        Ok(config)
    }
}

impl Default for CompletionThresholds {
    fn default() -> Self {
        Self {
            hr_bands: HeartRateBands::default(),
            high_hr_bpm: 170.0,
            low_hr_bpm: 130.0,
            min_adjustment_magnitude: 50,
            min_confidence: 0.6,
        }
    }
}

impl Default for HeartRateBands {
    fn default() -> Self {
        Self {
            easy_max: 130.0,
            endurance_max: 150.0,
            tempo_max: 165.0,
            threshold_max: 175.0,
        }
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            carb_loading_days: 2,
            intake_tolerance_percent: 10.0,
        }
    }
}
