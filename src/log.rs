//! Quirk diagnostics log
//!
//! Records every accepted invocation, effect, lifecycle change and
//! diagnostic for inspection by tests and the headless runner.

use bevy::prelude::*;
use std::fs;
use std::path::Path;

/// A single entry in the quirk log
#[derive(Debug, Clone)]
pub struct QuirkLogEntry {
    /// Timestamp in simulation time (seconds since start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: QuirkLogEventType,
    /// Human-readable description of the event
    pub message: String,
}

/// Types of quirk log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuirkLogEventType {
    /// An invocation passed the cooldown gate
    AbilityUsed,
    /// An invocation was rejected by the cooldown gate
    CooldownRejected,
    /// Damage dealt
    Damage,
    /// Healing done
    Healing,
    /// A body died
    Death,
    /// A structure was spawned
    StructureSpawned,
    /// An entity was removed by an effect
    EntityRemoved,
    /// Buff marker applied
    BuffApplied,
    /// Buff marker expired
    BuffExpired,
    /// Action object granted to an actor
    ActionBound,
    /// Action object torn down
    ActionUnbound,
    /// Aborted operation or fallback path
    Diagnostic,
}

/// The diagnostics sink storing all events
#[derive(Resource, Default)]
pub struct QuirkLog {
    /// All log entries in chronological order
    pub entries: Vec<QuirkLogEntry>,
    /// Current simulation time
    pub match_time: f32,
}

impl QuirkLog {
    /// Clear the log for a new run
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: QuirkLogEventType, message: String) {
        self.entries.push(QuirkLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
        });
    }

    /// Record an aborted operation. Also goes to the warn channel.
    pub fn diagnostic(&mut self, message: String) {
        warn!("{}", message);
        self.log(QuirkLogEventType::Diagnostic, message);
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: QuirkLogEventType) -> Vec<&QuirkLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn count(&self, event_type: QuirkLogEventType) -> usize {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .count()
    }

    /// Get only diagnostic entries
    pub fn diagnostics(&self) -> Vec<&QuirkLogEntry> {
        self.filter_by_type(QuirkLogEventType::Diagnostic)
    }

    /// Render the log as plain text, one entry per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "[{:>8.2}s] {:?}: {}\n",
                entry.timestamp, entry.event_type, entry.message
            ));
        }
        out
    }

    /// Save the log to `path`, creating parent directories as needed
    pub fn save_to_file(&self, path: &str) -> Result<(), String> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }

        fs::write(path, self.render())
            .map_err(|e| format!("Failed to write log file {}: {}", path, e))
    }
}
