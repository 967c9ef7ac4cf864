//! Command-line interface for quirksim
//!
//! Runs a headless quirk scenario from a JSON file.

use clap::Parser;
use std::path::PathBuf;

use crate::quirk::config::DEFAULT_CONFIG_PATH;

/// Overhaul quirk scenario runner
#[derive(Parser, Debug)]
#[command(name = "quirksim")]
#[command(about = "Overhaul quirk scenario runner")]
#[command(version)]
pub struct Args {
    /// JSON scenario to run
    #[arg(long, value_name = "SCENARIO_FILE")]
    pub scenario: PathBuf,

    /// Output path for the quirk log
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Quirk tuning and action prototypes (RON)
    #[arg(long, value_name = "CONFIG_FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Maximum scenario duration in seconds (overrides the scenario file)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}
