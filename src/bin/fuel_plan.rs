// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use training_fuel::cache::InMemoryCompletionCache;
use training_fuel::config::{Config, NutritionConfig};
use training_fuel::logging;
use training_fuel::planner::DayPlanner;
use training_fuel::providers::create_source;

/// Compute a day's nutrition plan from a training calendar snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON snapshot of calendar events, activities, details and intake
    #[arg(short, long)]
    snapshot: PathBuf,

    /// Day to plan (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Reference "today" for completion detection, defaults to the local date
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// TOML file of analysis thresholds, replaces the config's [nutrition] table
    #[arg(long)]
    thresholds: Option<PathBuf>,

    /// Body weight, overrides the configured value
    #[arg(short, long)]
    weight: Option<f64>,

    /// Unit of --weight (kg or lb)
    #[arg(short, long)]
    unit: Option<String>,

    /// Nutrition goal (weight-loss, maintenance, performance)
    #[arg(short, long)]
    goal: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();

    let mut config = Config::load(args.config)?.with_overrides(
        args.weight,
        args.unit.as_deref(),
        args.goal.as_deref(),
    )?;
    if let Some(path) = &args.thresholds {
        config.nutrition = NutritionConfig::load_from_file(path)?;
    }
    let athlete = config.athlete()?;

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let date = args.date.unwrap_or(today);

    let source = create_source("snapshot", &args.snapshot)?;
    info!(
        source = source.source_name(),
        plan.date = %date,
        plan.today = %today,
        "Planning day"
    );

    let planner = DayPlanner::new(
        Arc::from(source),
        Arc::new(InMemoryCompletionCache::new()),
        athlete,
        config.nutrition,
    );
    let plan = planner.plan_day(date, today).await?;

    let output = serde_json::to_string_pretty(&plan).context("Failed to serialize day plan")?;
    println!("{}", output);

    Ok(())
}
