// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Nutrition model constants and environment-based configuration values.
//! The multiplier tables are grams per kilogram of body weight.

/// Energy content of each macro-nutrient (kcal per gram)
pub mod energy {
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

    /// Pounds to kilograms
    pub const KG_PER_POUND: f64 = 0.453_592_37;
}

/// Baseline macro multipliers, as (protein, fat, carbs) grams per kg
pub mod multipliers {
    pub const RACE_DAY: (f64, f64, f64) = (2.2, 1.7, 8.6);
    pub const POST_RACE: (f64, f64, f64) = (1.7, 1.0, 5.2);
    pub const CARB_LOADING: (f64, f64, f64) = (1.7, 1.0, 8.2);

    pub const REST_OR_EASY: (f64, f64, f64) = (1.8, 1.0, 2.5);
    pub const ENDURANCE: (f64, f64, f64) = (1.8, 1.1, 4.3);
    pub const HIGH_INTENSITY: (f64, f64, f64) = (1.7, 1.0, 6.4);
    pub const STRENGTH: (f64, f64, f64) = (1.9, 1.1, 3.5);
    pub const UNRECOGNIZED: (f64, f64, f64) = (1.7, 1.0, 2.5);

    /// Extra carbs for endurance sessions longer than [`LONG_ENDURANCE_MINUTES`]
    pub const LONG_ENDURANCE_CARB_BONUS: f64 = 1.0;
    pub const LONG_ENDURANCE_MINUTES: u32 = 120;

    /// Weight-loss override on rest and easy days
    pub const WEIGHT_LOSS_LIGHT_DAY: (f64, f64, f64) = (1.72, 0.92, 1.95);
    pub const WEIGHT_LOSS_FAT_REDUCTION: f64 = 0.2;
    pub const WEIGHT_LOSS_FAT_FLOOR: f64 = 0.8;
    pub const WEIGHT_LOSS_CARB_REDUCTION: f64 = 1.0;
    pub const WEIGHT_LOSS_CARB_FLOOR: f64 = 2.0;

    pub const PERFORMANCE_PROTEIN_BONUS: f64 = 0.2;
    pub const PERFORMANCE_CARB_BONUS: f64 = 1.5;
}

/// In-session fueling guidance
pub mod fueling {
    pub const RACE_CARBS_PER_HOUR: u32 = 90;
    pub const MEDIUM_SESSION_CARBS_PER_HOUR: u32 = 40;
    pub const LONG_SESSION_CARBS_PER_HOUR: u32 = 60;
    pub const LONG_HARD_SESSION_CARBS_PER_HOUR: u32 = 80;
    pub const FLUID_ML_PER_HOUR: u32 = 750;

    pub const MEDIUM_SESSION_MIN_MINUTES: u32 = 60;
    pub const MEDIUM_SESSION_MAX_MINUTES: u32 = 90;

    pub const TIP_RACE: &str = "RACE FUEL: Aim for 90-120g carbs/hr.";
    pub const TIP_MEDIUM: &str = "Start fueling within the first 15 minutes and keep sipping steadily.";
    pub const TIP_LONG: &str = "Fuel early and often: take carbs every 15-20 minutes from the start.";
    pub const TIP_SHORT: &str = "No in-session fueling needed; water is enough.";
}

/// Completion-analysis rates used to size nutrition adjustments
pub mod adjustment {
    /// Calories per minute of extra or missing duration
    pub const DURATION_KCAL_PER_MINUTE: f64 = 12.0;
    pub const DURATION_CARB_SHARE: f64 = 0.6;
    /// Minimum |actual - planned| minutes before duration counts
    pub const DURATION_TRIGGER_MINUTES: i32 = 15;

    pub const HARDER_KCAL_PER_MINUTE: f64 = 8.0;
    pub const HARDER_CARB_SHARE: f64 = 0.5;
    pub const HARDER_PROTEIN_SHARE: f64 = 0.25;
    pub const EASIER_KCAL_PER_MINUTE: f64 = -4.0;
    pub const EASIER_CARB_SHARE: f64 = 0.4;
    /// Minimum |actual RPE - expected RPE| before effort counts
    pub const RPE_TRIGGER: f64 = 2.0;

    pub const HIGH_HR_KCAL_PER_MINUTE: f64 = 5.0;
    pub const HIGH_HR_CARB_SHARE: f64 = 0.7;

    /// Confidence contributions, in hundredths
    pub const CONFIDENCE_BASE: u32 = 30;
    pub const CONFIDENCE_RPE: u32 = 30;
    pub const CONFIDENCE_HEART_RATE: u32 = 20;
    pub const CONFIDENCE_POWER: u32 = 20;
    pub const CONFIDENCE_DURATION: u32 = 20;
    pub const CONFIDENCE_DURATION_MINUTES: i32 = 10;
}

/// Environment-based configuration
pub mod env_config {
    use std::env;

    /// Get configuration file path from environment
    pub fn config_path() -> Option<String> {
        env::var("TRAINING_FUEL_CONFIG").ok()
    }

    /// Get athlete body weight from environment
    pub fn athlete_weight() -> Option<f64> {
        env::var("ATHLETE_WEIGHT").ok().and_then(|w| w.parse().ok())
    }

    /// Get body weight unit from environment or default
    pub fn athlete_weight_unit() -> String {
        env::var("ATHLETE_WEIGHT_UNIT").unwrap_or_else(|_| "kg".to_string())
    }

    /// Get nutrition goal from environment or default
    pub fn nutrition_goal() -> String {
        env::var("NUTRITION_GOAL").unwrap_or_else(|_| "maintenance".to_string())
    }

    /// Get log level from environment or default
    pub fn log_level() -> String {
        env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    }
}
