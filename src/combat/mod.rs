//! Damage and healing primitives
//!
//! Implements the host-side half of the quirk's combat interactions:
//! - Body capability (alive or dead) and health pools
//! - Damage specifiers keyed by damage type
//! - Applying damage/healing events and flipping bodies to dead at 0 HP
//!
//! The quirk engine never mutates `Health` itself. It writes
//! [`DamageChangeEvent`]s and lets the systems here apply them.

use bevy::prelude::*;

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;

pub use components::{Body, BodyCapability, Health, LifeState};
pub use damage::{DamageSpecifier, DamageType};
pub use events::DamageChangeEvent;

use systems::*;

/// Systems that apply queued damage and healing.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombatSystems;

/// Plugin for the damage/healing primitives
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageChangeEvent>().add_systems(
            Update,
            (process_damage_changes, update_life_states)
                .chain()
                .in_set(CombatSystems),
        );
    }
}
