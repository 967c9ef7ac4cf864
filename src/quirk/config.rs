//! Data-Driven Quirk Configuration
//!
//! Tuning values and action prototypes are loaded from
//! `assets/config/quirk.ron`. Missing fields fall back to the defaults in
//! `constants`.
//!
//! ## Usage
//! ```ignore
//! fn my_system(config: Res<QuirkConfig>) {
//!     println!("Cooldown: {:?}", config.cooldown());
//! }
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::actions::{ActionPrototype, ActionPrototypes};
use super::constants::*;
use crate::combat::{DamageSpecifier, DamageType};
use crate::error::QuirkError;

/// Default location of the quirk config file
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/quirk.ron";

fn default_cooldown_secs() -> f32 {
    ABILITY_COOLDOWN_SECS
}
fn default_effect_probability() -> f32 {
    EFFECT_PROBABILITY
}
fn default_damage_blunt() -> f32 {
    DAMAGE_BLUNT
}
fn default_damage_piercing() -> f32 {
    DAMAGE_PIERCING
}
fn default_heal_amount() -> f32 {
    HEAL_AMOUNT
}
fn default_corpse_heal_amount() -> f32 {
    CORPSE_HEAL_AMOUNT
}
fn default_self_heal_amount() -> f32 {
    SELF_HEAL_AMOUNT
}
fn default_buff_duration_secs() -> f32 {
    BUFF_DURATION_SECS
}
fn default_deploy_spacing() -> f32 {
    DEPLOY_SPACING
}
fn default_primary_structure() -> String {
    PRIMARY_STRUCTURE.to_string()
}
fn default_secondary_structure() -> String {
    SECONDARY_STRUCTURE.to_string()
}
fn default_action_prototype() -> String {
    ACTION_PROTOTYPE.to_string()
}

/// Tuning for the Overhaul quirk
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct QuirkConfig {
    // === Timing ===
    /// Cooldown between accepted invocations, in seconds
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f32,
    /// Corpse buff duration, in seconds
    #[serde(default = "default_buff_duration_secs")]
    pub buff_duration_secs: f32,

    // === Selection ===
    /// Probability of the first option of every 50/50 pair
    #[serde(default = "default_effect_probability")]
    pub effect_probability: f32,

    // === Amounts ===
    #[serde(default = "default_damage_blunt")]
    pub damage_blunt: f32,
    #[serde(default = "default_damage_piercing")]
    pub damage_piercing: f32,
    #[serde(default = "default_heal_amount")]
    pub heal_amount: f32,
    #[serde(default = "default_corpse_heal_amount")]
    pub corpse_heal_amount: f32,
    #[serde(default = "default_self_heal_amount")]
    pub self_heal_amount: f32,

    // === Deployment ===
    #[serde(default = "default_deploy_spacing")]
    pub deploy_spacing: f32,
    /// Structure kind A
    #[serde(default = "default_primary_structure")]
    pub primary_structure: String,
    /// Structure kind B
    #[serde(default = "default_secondary_structure")]
    pub secondary_structure: String,

    /// Prototype id of the bound action
    #[serde(default = "default_action_prototype")]
    pub action_prototype: String,
}

impl Default for QuirkConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: ABILITY_COOLDOWN_SECS,
            buff_duration_secs: BUFF_DURATION_SECS,
            effect_probability: EFFECT_PROBABILITY,
            damage_blunt: DAMAGE_BLUNT,
            damage_piercing: DAMAGE_PIERCING,
            heal_amount: HEAL_AMOUNT,
            corpse_heal_amount: CORPSE_HEAL_AMOUNT,
            self_heal_amount: SELF_HEAL_AMOUNT,
            deploy_spacing: DEPLOY_SPACING,
            primary_structure: default_primary_structure(),
            secondary_structure: default_secondary_structure(),
            action_prototype: default_action_prototype(),
        }
    }
}

impl QuirkConfig {
    /// Cooldown as a `Duration`. Unrepresentable values read as the default.
    pub fn cooldown(&self) -> Duration {
        Duration::try_from_secs_f32(self.cooldown_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(ABILITY_COOLDOWN_SECS))
    }

    /// Buff duration as a `Duration`. Unrepresentable values read as the default.
    pub fn buff_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.buff_duration_secs)
            .unwrap_or_else(|_| Duration::from_secs_f32(BUFF_DURATION_SECS))
    }

    /// Damage dealt to a living target
    pub fn target_damage(&self) -> DamageSpecifier {
        DamageSpecifier::new()
            .with(DamageType::Blunt, self.damage_blunt)
            .with(DamageType::Piercing, self.damage_piercing)
    }

    /// Healing applied to a living target
    pub fn target_heal(&self) -> DamageSpecifier {
        DamageSpecifier::new().with(DamageType::Healing, self.heal_amount)
    }

    pub fn corpse_heal(&self) -> DamageSpecifier {
        DamageSpecifier::new().with(DamageType::Healing, self.corpse_heal_amount)
    }

    pub fn self_heal(&self) -> DamageSpecifier {
        DamageSpecifier::new().with(DamageType::Healing, self.self_heal_amount)
    }

    /// Check ranges and prototype names
    pub fn validate(&self) -> Result<(), QuirkError> {
        if !(0.0..=1.0).contains(&self.effect_probability) {
            return Err(QuirkError::InvalidConfig(format!(
                "effect_probability must be within [0, 1], got {}",
                self.effect_probability
            )));
        }
        for (field, secs) in [
            ("cooldown_secs", self.cooldown_secs),
            ("buff_duration_secs", self.buff_duration_secs),
        ] {
            Duration::try_from_secs_f32(secs).map_err(|e| {
                QuirkError::InvalidConfig(format!("{} = {} is not a valid duration: {}", field, secs, e))
            })?;
        }
        if self.buff_duration_secs <= 0.0 {
            return Err(QuirkError::InvalidConfig(
                "buff_duration_secs must be positive".to_string(),
            ));
        }
        if !self.deploy_spacing.is_finite() || self.deploy_spacing <= 0.0 {
            return Err(QuirkError::InvalidConfig(
                "deploy_spacing must be positive".to_string(),
            ));
        }
        let amounts = [
            self.damage_blunt,
            self.damage_piercing,
            self.heal_amount,
            self.corpse_heal_amount,
            self.self_heal_amount,
        ];
        if amounts.iter().any(|a| !a.is_finite() || *a < 0.0) {
            return Err(QuirkError::InvalidConfig(
                "damage and healing amounts must be finite and not negative".to_string(),
            ));
        }
        for (field, value) in [
            ("primary_structure", &self.primary_structure),
            ("secondary_structure", &self.secondary_structure),
            ("action_prototype", &self.action_prototype),
        ] {
            if value.is_empty() {
                return Err(QuirkError::InvalidConfig(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

/// Top-level layout of `quirk.ron`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuirkConfigFile {
    #[serde(default)]
    pub quirk: QuirkConfig,
    #[serde(default)]
    pub actions: Vec<ActionPrototype>,
}

impl Default for QuirkConfigFile {
    fn default() -> Self {
        Self {
            quirk: QuirkConfig::default(),
            actions: vec![ActionPrototype::overhaul()],
        }
    }
}

impl QuirkConfigFile {
    /// Parse and validate RON text
    pub fn from_ron(contents: &str) -> Result<Self, String> {
        let file: QuirkConfigFile =
            ron::from_str(contents).map_err(|e| format!("Failed to parse quirk config: {}", e))?;
        file.quirk.validate().map_err(|e| e.to_string())?;
        Ok(file)
    }

    pub fn prototypes(&self) -> ActionPrototypes {
        ActionPrototypes::from_list(self.actions.clone())
    }
}

/// Load the quirk config from a RON file
pub fn load_quirk_config(path: &Path) -> Result<QuirkConfigFile, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let file = QuirkConfigFile::from_ron(&contents)?;

    info!(
        "Loaded quirk config from {} ({} action prototypes)",
        path.display(),
        file.actions.len()
    );

    Ok(file)
}
