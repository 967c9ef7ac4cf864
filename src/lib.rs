//! quirksim - Overhaul quirk ability engine
//!
//! A cooldown-gated, context-sensitive ability that clones terrain, strikes or
//! mends bodies, eats corpses for a buff and banked charges, and deploys those
//! charges as a line of structures. Ships with a headless scenario runner.
//!
//! This library exposes the engine for testing and reuse.

pub mod cli;
pub mod combat;
pub mod error;
pub mod headless;
pub mod log;
pub mod map;
pub mod quirk;

// Re-export commonly used types
pub use error::QuirkError;
pub use headless::{ScenarioConfig, ScenarioResult};
pub use log::{QuirkLog, QuirkLogEventType};
pub use quirk::{QuirkConfig, QuirkPlugin, QuirkState};
