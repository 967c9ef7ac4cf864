//! JSON configuration parsing for headless scenarios
//!
//! A scenario places one quirk bearer, some bodies and surfaces on a map,
//! then fires timed interactions and actions at them.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Headless scenario configuration loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Random seed for deterministic effect selection
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Hard stop, in simulation seconds (default: 120)
    #[serde(default = "default_max_duration")]
    pub max_duration_secs: f32,
    /// Custom output path for the quirk log (optional)
    #[serde(default)]
    pub output_path: Option<String>,
    /// The quirk bearer
    pub actor: ActorSpec,
    /// Creatures, alive or dead
    #[serde(default)]
    pub bodies: Vec<BodySpec>,
    /// Terrain entities without a body
    #[serde(default)]
    pub surfaces: Vec<SurfaceSpec>,
    /// Timed inputs
    pub steps: Vec<ScenarioStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorSpec {
    #[serde(default = "default_actor_name")]
    pub name: String,
    pub position: [f32; 2],
    /// Facing, counter-clockwise from +Y
    #[serde(default)]
    pub facing_degrees: f32,
    #[serde(default = "default_map")]
    pub map: u32,
    #[serde(default = "default_health")]
    pub max_health: f32,
    /// Starting health (defaults to max)
    #[serde(default)]
    pub health: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    pub position: [f32; 2],
    #[serde(default)]
    pub dead: bool,
    #[serde(default = "default_health")]
    pub max_health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpec {
    pub name: String,
    pub position: [f32; 2],
}

/// One timed input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioStep {
    pub at_secs: f32,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum StepAction {
    /// Generic interaction with a named entity
    Interact { target: String },
    /// Bound action on the actor itself
    ActivateOnSelf,
    /// Bound action on a named entity
    ActivateOnEntity { target: String },
    /// Bound action on an empty point
    ActivateAtPoint { position: [f32; 2] },
    /// Remove the quirk from the actor
    DetachQuirk,
    /// Destroy the actor
    DespawnActor,
}

fn default_actor_name() -> String {
    "Actor".to_string()
}

fn default_map() -> u32 {
    1
}

fn default_health() -> f32 {
    100.0
}

fn default_max_duration() -> f32 {
    120.0
}

impl ScenarioConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scenario file: {}", e))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self, String> {
        let config: ScenarioConfig =
            serde_json::from_str(contents).map_err(|e| format!("Failed to parse JSON: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.max_duration_secs.is_finite() || self.max_duration_secs <= 0.0 {
            return Err("max_duration_secs must be positive".to_string());
        }

        validate_max_health(&self.actor.name, self.actor.max_health)?;
        if let Some(health) = self.actor.health {
            if !health.is_finite() || health < 0.0 {
                return Err(format!(
                    "Actor '{}' has invalid starting health {}",
                    self.actor.name, health
                ));
            }
        }
        for body in &self.bodies {
            validate_max_health(&body.name, body.max_health)?;
        }

        let mut names = HashSet::new();
        names.insert(self.actor.name.as_str());
        for name in self
            .bodies
            .iter()
            .map(|b| b.name.as_str())
            .chain(self.surfaces.iter().map(|s| s.name.as_str()))
        {
            if !names.insert(name) {
                return Err(format!("Duplicate entity name: '{}'", name));
            }
        }

        for (i, step) in self.steps.iter().enumerate() {
            if !step.at_secs.is_finite() || step.at_secs < 0.0 {
                return Err(format!("Step {} has negative or non-finite at_secs", i));
            }
            if step.at_secs > self.max_duration_secs {
                return Err(format!(
                    "Step {} at {:.1}s is past max_duration_secs ({:.1}s)",
                    i, step.at_secs, self.max_duration_secs
                ));
            }
            match &step.action {
                StepAction::Interact { target } | StepAction::ActivateOnEntity { target } => {
                    if !names.contains(target.as_str()) {
                        return Err(format!("Step {} targets unknown entity '{}'", i, target));
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Override the hard stop (e.g. from the command line) and re-check the config
    pub fn with_max_duration(mut self, secs: f32) -> Result<Self, String> {
        self.max_duration_secs = secs;
        self.validate()?;
        Ok(self)
    }

    /// Steps ordered by time (stable for equal times)
    pub fn sorted_steps(&self) -> Vec<ScenarioStep> {
        let mut steps = self.steps.clone();
        steps.sort_by(|a, b| a.at_secs.total_cmp(&b.at_secs));
        steps
    }
}

fn validate_max_health(name: &str, max_health: f32) -> Result<(), String> {
    if !max_health.is_finite() || max_health <= 0.0 {
        return Err(format!(
            "'{}' has invalid max_health {} (must be positive)",
            name, max_health
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"{
        "random_seed": 42,
        "actor": { "position": [0.0, 0.0] },
        "bodies": [
            { "name": "corpse", "position": [1.0, 0.0], "dead": true },
            { "name": "goblin", "position": [-1.0, 0.0] }
        ],
        "surfaces": [ { "name": "floor", "position": [0.0, -1.0] } ],
        "steps": [
            { "at_secs": 5.0, "action": "ActivateOnSelf" },
            { "at_secs": 0.0, "action": "Interact", "target": "corpse" },
            { "at_secs": 10.0, "action": "ActivateAtPoint", "position": [3.0, 3.0] }
        ]
    }"#;

    #[test]
    fn test_parses_and_defaults() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.max_duration_secs, 120.0);
        assert_eq!(config.actor.name, "Actor");
        assert_eq!(config.actor.map, 1);
        assert!(config.bodies[0].dead);
        assert!(!config.bodies[1].dead);
        assert_eq!(
            config.steps[1].action,
            StepAction::Interact {
                target: "corpse".to_string()
            }
        );
    }

    #[test]
    fn test_sorted_steps() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        let times: Vec<f32> = config.sorted_steps().iter().map(|s| s.at_secs).collect();
        assert_eq!(times, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_rejects_unknown_target() {
        let json = r#"{
            "actor": { "position": [0.0, 0.0] },
            "steps": [ { "at_secs": 0.0, "action": "Interact", "target": "ghost" } ]
        }"#;
        let err = ScenarioConfig::from_json(json).unwrap_err();
        assert!(err.contains("ghost"));
    }

    #[test]
    fn test_rejects_bad_health() {
        let negative_max = r#"{
            "actor": { "position": [0.0, 0.0], "max_health": -10.0, "health": 5.0 },
            "steps": []
        }"#;
        let err = ScenarioConfig::from_json(negative_max).unwrap_err();
        assert!(err.contains("max_health"));

        let negative_current = r#"{
            "actor": { "position": [0.0, 0.0], "health": -1.0 },
            "steps": []
        }"#;
        assert!(ScenarioConfig::from_json(negative_current).is_err());

        let zero_body = r#"{
            "actor": { "position": [0.0, 0.0] },
            "bodies": [ { "name": "corpse", "position": [1.0, 0.0], "dead": true, "max_health": 0.0 } ],
            "steps": []
        }"#;
        let err = ScenarioConfig::from_json(zero_body).unwrap_err();
        assert!(err.contains("corpse"));
    }

    #[test]
    fn test_max_duration_override_is_validated() {
        let config = ScenarioConfig::from_json(SCENARIO).unwrap();
        assert!(config.clone().with_max_duration(0.0).is_err());
        assert!(config.clone().with_max_duration(-5.0).is_err());
        assert!(config.clone().with_max_duration(f32::NAN).is_err());
        // Steps run until 10s, so the limit cannot be shorter
        assert!(config.clone().with_max_duration(5.0).is_err());

        let config = config.with_max_duration(60.0).unwrap();
        assert_eq!(config.max_duration_secs, 60.0);
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let json = r#"{
            "actor": { "name": "wall", "position": [0.0, 0.0] },
            "surfaces": [ { "name": "wall", "position": [1.0, 0.0] } ],
            "steps": []
        }"#;
        assert!(ScenarioConfig::from_json(json).is_err());
    }
}
