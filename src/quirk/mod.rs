//! Overhaul quirk
//!
//! A cooldown-gated, context-sensitive ability:
//! - Interacting with terrain clones or replaces it with a wall
//! - Interacting with a living body damages or heals it
//! - Interacting with a corpse heals the bearer, buffs them and banks a charge
//! - The bound action deploys banked charges as a line of structures,
//!   heals, hits a clicked entity, or drops a structure on a clicked point
//!
//! Host-facing surface: the two entry events, and attaching/detaching
//! `QuirkState` (observed by the action binder).

use bevy::prelude::*;

pub mod actions;
pub mod buffs;
pub mod components;
pub mod config;
pub mod constants;
pub mod cooldown;
pub mod deployment;
pub mod effects;
pub mod events;
pub mod systems;
pub mod targeting;

pub use actions::{ActionContainer, ActionEntity, ActionPrototype, ActionPrototypes};
pub use components::{BuffExpiry, BuffMarker, GameRng, QuirkState};
pub use config::{load_quirk_config, QuirkConfig, QuirkConfigFile};
pub use events::{InteractUsingEvent, QuirkActionEvent};

use crate::combat::{CombatPlugin, CombatSystems};
use crate::log::QuirkLog;

/// Ordering of the quirk's work within a tick
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuirkSystemPhase {
    /// Deferred buff expiry. Runs first so a grant on the expiry tick sees the buff as gone.
    Expiry,
    /// Entry events: cooldown, targeting, effect selection
    Dispatch,
}

/// Plugin wiring the quirk engine into an app
pub struct QuirkPlugin {
    pub config: QuirkConfig,
    pub prototypes: ActionPrototypes,
    /// Seed for `GameRng`; entropy when None
    pub seed: Option<u64>,
}

impl Default for QuirkPlugin {
    fn default() -> Self {
        Self::from_file(QuirkConfigFile::default())
    }
}

impl QuirkPlugin {
    pub fn from_file(file: QuirkConfigFile) -> Self {
        Self {
            prototypes: file.prototypes(),
            config: file.quirk,
            seed: None,
        }
    }

    /// Replace the tuning. Checked when the plugin is built; invalid values fall back to defaults.
    pub fn with_config(mut self, config: QuirkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Plugin for QuirkPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<CombatPlugin>() {
            app.add_plugins(CombatPlugin);
        }

        let rng = match self.seed {
            Some(seed) => GameRng::from_seed(seed),
            None => GameRng::from_entropy(),
        };

        app
            // Manual clock unless TimePlugin already provides one
            .init_resource::<Time>()
            .init_resource::<QuirkLog>();

        // An invalid config never reaches the systems
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(e) => {
                app.world_mut()
                    .resource_mut::<QuirkLog>()
                    .diagnostic(format!("{}; using default tuning", e));
                QuirkConfig::default()
            }
        };

        if self.prototypes.is_empty() {
            warn!("No action prototypes registered; quirk actions will be spawned directly");
        } else {
            info!("Quirk plugin ready ({} action prototypes)", self.prototypes.len());
        }

        app.insert_resource(config)
            .insert_resource(self.prototypes.clone())
            .insert_resource(rng)
            // Entry events
            .add_event::<InteractUsingEvent>()
            .add_event::<QuirkActionEvent>()
            // Attach/detach hooks
            .add_observer(actions::bind_quirk_action)
            .add_observer(actions::unbind_quirk_action)
            .configure_sets(
                Update,
                (
                    QuirkSystemPhase::Expiry,
                    QuirkSystemPhase::Dispatch,
                    CombatSystems,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    systems::sync_log_time.before(QuirkSystemPhase::Expiry),
                    buffs::expire_buffs.in_set(QuirkSystemPhase::Expiry),
                    (systems::handle_interact_using, systems::handle_quirk_action)
                        .chain()
                        .in_set(QuirkSystemPhase::Dispatch),
                ),
            );
    }
}
