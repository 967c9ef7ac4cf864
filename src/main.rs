//! quirksim - Overhaul quirk scenario runner
//!
//! Loads the quirk config and a JSON scenario, runs it headless and prints
//! a summary of what the quirk did.

use std::process::ExitCode;

use quirksim::cli::parse_args;
use quirksim::headless::{run_scenario, ScenarioConfig};
use quirksim::quirk::{load_quirk_config, QuirkConfigFile};

fn main() -> ExitCode {
    let args = parse_args();

    let quirk = if args.config.exists() {
        match load_quirk_config(&args.config) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        eprintln!(
            "Config {} not found, using built-in defaults",
            args.config.display()
        );
        QuirkConfigFile::default()
    };

    let scenario = ScenarioConfig::load_from_file(&args.scenario).and_then(|config| {
        match args.max_duration {
            Some(max) => config.with_max_duration(max),
            None => Ok(config),
        }
    });
    let scenario = match scenario {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let output = args.output.as_ref().map(|p| p.to_string_lossy().into_owned());

    match run_scenario(scenario, quirk, output.as_deref()) {
        Ok(result) => {
            println!("Elapsed: {:.2}s ({} steps)", result.elapsed_secs, result.steps_fired);
            println!("Structures: {}", result.structures.len());
            for (prototype, position) in &result.structures {
                println!("  {} at ({:.2}, {:.2})", prototype, position.x, position.y);
            }
            match (result.queued_charges, result.has_buff) {
                (Some(charges), Some(buff)) => {
                    println!("Queued charges: {}, buff active: {}", charges, buff)
                }
                _ => println!("Quirk no longer attached"),
            }
            if let Some(health) = result.actor_health {
                println!("Actor health: {:.0}", health);
            }
            if result.diagnostics > 0 {
                println!("Diagnostics: {}", result.diagnostics);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
