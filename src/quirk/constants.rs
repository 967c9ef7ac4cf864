//! Quirk Constants
//!
//! Default tuning for the Overhaul quirk. Every value here can be overridden
//! through `assets/config/quirk.ron`.

// ============================================================================
// Timing
// ============================================================================

/// Minimum time between two accepted invocations, in seconds.
/// Shared by the interaction path and the bound action.
pub const ABILITY_COOLDOWN_SECS: f32 = 5.0;

/// How long the corpse buff lasts, in seconds.
pub const BUFF_DURATION_SECS: f32 = 30.0;

// ============================================================================
// Effect Selection
// ============================================================================

/// Probability of picking the first effect of every 50/50 pair
/// (clone over replace, damage over heal, structure A over B).
pub const EFFECT_PROBABILITY: f32 = 0.5;

// ============================================================================
// Amounts
// ============================================================================

/// Blunt part of the damage dealt to a living target.
pub const DAMAGE_BLUNT: f32 = 20.0;

/// Piercing part of the damage dealt to a living target.
pub const DAMAGE_PIERCING: f32 = 15.0;

/// Healing applied to a living target.
pub const HEAL_AMOUNT: f32 = 30.0;

/// Healing the performer receives from consuming a corpse.
pub const CORPSE_HEAL_AMOUNT: f32 = 50.0;

/// Healing the performer receives when self-targeting with no charges.
pub const SELF_HEAL_AMOUNT: f32 = 30.0;

// ============================================================================
// Deployment
// ============================================================================

/// Distance between consecutive deployed structures, in world units.
pub const DEPLOY_SPACING: f32 = 1.5;

// ============================================================================
// Prototypes
// ============================================================================

/// Structure kind A: odd deployment slots, surface clone/replace.
pub const PRIMARY_STRUCTURE: &str = "WallSolid";

/// Structure kind B: even deployment slots.
pub const SECONDARY_STRUCTURE: &str = "KitchenSpike";

/// Display name of the ability and its granted action.
pub const ABILITY_NAME: &str = "Overhaul";

/// Action prototype granted to quirk bearers.
pub const ACTION_PROTOTYPE: &str = "OverhaulQuirkAction";
