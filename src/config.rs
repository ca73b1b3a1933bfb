// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the nutrition planner

pub mod nutrition_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::env_config;
use crate::nutrition::{BodyWeight, Goal, WeightUnit};

pub use nutrition_config::{CompletionThresholds, HeartRateBands, NutritionConfig, PlanningConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No athlete weight configured (set ATHLETE_WEIGHT or pass --weight)")]
    MissingAthleteWeight,

    #[error("Body weight must be a positive number, got {0}")]
    InvalidWeight(f64),

    #[error("Unknown weight unit: {0} (expected kg or lb)")]
    InvalidUnit(String),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub athlete: Option<AthleteProfile>,
    #[serde(default)]
    pub nutrition: NutritionConfig,
}

/// Who the plan is computed for
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AthleteProfile {
    pub weight: f64,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub goal: Goal,
}

impl AthleteProfile {
    pub fn body_weight(&self) -> BodyWeight {
        BodyWeight {
            value: self.weight,
            unit: self.weight_unit,
        }
    }
}

fn default_config_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("training-fuel/config.toml"))
        .unwrap_or_else(|| "config.toml".into())
        .to_string_lossy()
        .to_string()
}

impl Config {
    /// Load from an explicit path, `TRAINING_FUEL_CONFIG`, or the user config
    /// dir; fall back to the environment when no file exists
    pub fn load(path: Option<String>) -> Result<Self> {
        let config_path = path
            .or_else(env_config::config_path)
            .unwrap_or_else(default_config_path);

        if Path::new(&config_path).exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {}", config_path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", config_path))
        } else {
            dotenv::dotenv().ok();
            Self::from_env()
        }
    }

    /// Athlete settings from `ATHLETE_WEIGHT`, `ATHLETE_WEIGHT_UNIT` and `NUTRITION_GOAL`
    pub fn from_env() -> Result<Self> {
        let athlete = match env_config::athlete_weight() {
            Some(weight) => {
                let unit = env_config::athlete_weight_unit();
                Some(AthleteProfile {
                    weight,
                    weight_unit: WeightUnit::parse(&unit).ok_or(ConfigError::InvalidUnit(unit))?,
                    goal: Goal::parse(&env_config::nutrition_goal()),
                })
            }
            None => None,
        };

        Ok(Config {
            athlete,
            nutrition: NutritionConfig::default(),
        })
    }

    /// Apply command-line overrides on top of the loaded settings
    pub fn with_overrides(
        mut self,
        weight: Option<f64>,
        unit: Option<&str>,
        goal: Option<&str>,
    ) -> Result<Self> {
        let unit = unit
            .map(|u| WeightUnit::parse(u).ok_or_else(|| ConfigError::InvalidUnit(u.to_string())))
            .transpose()?;

        let athlete = match (self.athlete, weight) {
            (Some(mut athlete), weight) => {
                if let Some(weight) = weight {
                    athlete.weight = weight;
                }
                Some(athlete)
            }
            (None, Some(weight)) => Some(AthleteProfile {
                weight,
                weight_unit: WeightUnit::default(),
                goal: Goal::default(),
            }),
            (None, None) => None,
        };

        self.athlete = athlete.map(|mut athlete| {
            if let Some(unit) = unit {
                athlete.weight_unit = unit;
            }
            if let Some(goal) = goal {
                athlete.goal = Goal::parse(goal);
            }
            athlete
        });
        Ok(self)
    }

    /// The configured athlete, validated
    pub fn athlete(&self) -> Result<AthleteProfile> {
        let athlete = self.athlete.ok_or(ConfigError::MissingAthleteWeight)?;
        if !athlete.weight.is_finite() || athlete.weight <= 0.0 {
            return Err(ConfigError::InvalidWeight(athlete.weight).into());
        }
        Ok(athlete)
    }

    pub fn save(&self, path: Option<String>) -> Result<()> {
        let config_path = path.unwrap_or_else(default_config_path);

        let parent = Path::new(&config_path).parent().context("Invalid config path")?;
        fs::create_dir_all(parent)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path))?;

        Ok(())
    }
}
