// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Training Fuel
//!
//! A nutrition planner for endurance athletes. It reads a training calendar,
//! works out which workouts were planned and which were actually done, and
//! turns that into daily macro targets and in-session fueling guidance.
//!
//! ## Features
//!
//! - **Workout classification**: intensity from free-text workout names
//! - **Completion detection**: planned versus completed calendar events
//! - **Macro targets**: grams per kg by day type, intensity, duration and goal
//! - **Completion adjustments**: confidence-scored corrections from actual execution
//! - **Intake reconciliation**: compare targets with what was logged
//!
//! ## Architecture
//!
//! - **Nutrition**: the pure decision logic
//! - **Models**: calendar events, activity details and intake logs
//! - **Providers**: data sources for calendar, activity and intake data
//! - **Cache**: completion data cache used by the planner
//! - **Planner**: orchestration of one day's plan
//! - **Config**: athlete profile and tunable thresholds
//!
//! ## Example Usage
//!
//! ```rust
//! use training_fuel::nutrition::{
//!     compute_nutrition_target, BodyWeight, DayFlags, Goal, WorkoutIntensity,
//! };
//!
//! let weight = BodyWeight::from_pounds(192.0);
//! let target = compute_nutrition_target(
//!     weight.kilograms(),
//!     Goal::Performance,
//!     &WorkoutIntensity::Endurance,
//!     60,
//!     DayFlags::default(),
//! );
//!
//! assert_eq!((target.protein, target.fat, target.carbs), (174, 96, 505));
//! assert_eq!(target.calories, 3580);
//! ```

/// Data sources for calendar, activity and intake data
pub mod providers;

/// Common data models for training and nutrition data
pub mod models;

/// Configuration management and persistence
pub mod config;

/// Nutrition constants and environment helpers
pub mod constants;

/// Classification, targets and completion adjustments
pub mod nutrition;

/// Completion data cache
pub mod cache;

/// Day plan orchestration
pub mod planner;

/// Structured logging
pub mod logging;
