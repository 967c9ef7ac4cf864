//! Headless mode for scripted scenarios
//!
//! Runs the quirk engine without any window, driven by a JSON scenario.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release -- --scenario scenarios/corpse_wall.json --output quirk.log
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "random_seed": 42,
//!   "actor": { "position": [0.0, 0.0], "facing_degrees": 0.0 },
//!   "bodies": [ { "name": "corpse", "position": [1.0, 0.0], "dead": true } ],
//!   "steps": [
//!     { "at_secs": 0.0, "action": "Interact", "target": "corpse" },
//!     { "at_secs": 5.0, "action": "ActivateOnSelf" }
//!   ]
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{ScenarioConfig, ScenarioStep, StepAction};
pub use runner::{run_scenario, ScenarioResult};
