//! Component Definitions for the Overhaul quirk
//!
//! This module contains the per-actor quirk state, the buff marker and its
//! deferred expiry task, and the simulation RNG.

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::time::Duration;

// ============================================================================
// Resources
// ============================================================================

/// Seeded random number generator for deterministic simulation.
///
/// When a seed is provided (e.g., via scenario config), the same seed will
/// always produce the same effect choices. Without a seed, uses system entropy.
#[derive(Resource)]
pub struct GameRng {
    rng: StdRng,
    /// The seed used to initialize this RNG (if deterministic)
    pub seed: Option<u64>,
}

impl GameRng {
    /// Create a new GameRng with a specific seed for deterministic behavior
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Create a new GameRng with random entropy (non-deterministic)
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Generate a random f32 in the range [0.0, 1.0)
    pub fn random_f32(&mut self) -> f32 {
        self.rng.gen()
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

// ============================================================================
// Actor State
// ============================================================================

/// Per-actor state of the Overhaul quirk.
///
/// Adding this component is "attaching the trait"; removing it (or despawning
/// the actor) detaches it. The bound action is created and destroyed by the
/// observers in `actions`.
#[derive(Component, Debug, Default)]
pub struct QuirkState {
    /// True while the corpse buff marker is active
    pub has_buff: bool,
    /// Structures banked for the next self-targeted activation
    pub queued_charges: u32,
    /// Simulation time of the last accepted invocation (None = never used)
    pub last_use_at: Option<Duration>,
    /// Action object granted to this actor. Owned exclusively by this state.
    pub bound_action: Option<Entity>,
}

impl QuirkState {
    /// Record an accepted invocation
    pub fn mark_used(&mut self, now: Duration) {
        self.last_use_at = Some(now);
    }
}

// ============================================================================
// Buff
// ============================================================================

/// Transient marker present while the corpse buff is active
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct BuffMarker;

/// Deferred buff-expiry task.
///
/// Lives on its own entity and carries the actor id rather than a reference,
/// so an actor destroyed in the meantime just turns the task into a no-op.
#[derive(Component, Debug, Clone, Copy)]
pub struct BuffExpiry {
    pub actor: Entity,
    pub fires_at: Duration,
}
