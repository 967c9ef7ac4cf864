//! Combat events

use bevy::prelude::*;

use super::damage::DamageSpecifier;

/// Event fired when an entity's damage should change (damage or healing)
#[derive(Event, Debug, Clone)]
pub struct DamageChangeEvent {
    /// Entity causing the change
    pub source: Entity,
    /// Entity receiving the change
    pub target: Entity,
    /// Typed amounts. `Healing` entries restore health.
    pub damage: DamageSpecifier,
    /// Name of the effect that caused it
    pub ability_name: String,
}
