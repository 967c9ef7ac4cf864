//! Interaction Effect Selector
//!
//! Selection is pure: a target classification and one uniform roll map to
//! exactly one `QuirkEffect`. Execution (`apply_effect`) is separate so the
//! selection table can be tested without a world.
//!
//! | Target | Effect |
//! |---|---|
//! | ambient surface | clone (roll < p) or replace |
//! | living body | damage (roll < p) or heal |
//! | dead body | consume corpse: self-heal, buff, +1 charge |
//! | performer, charges > 0 | deploy all charges |
//! | performer, no charges | self-heal |
//! | other entity (action) | deterministic: damage / consume corpse / clone |
//! | world point | structure A (roll < p) or B |

use bevy::prelude::*;

use super::buffs::{grant_buff, BuffGrant};
use super::components::QuirkState;
use super::constants::ABILITY_NAME;
use super::deployment::{deploy, log_spawn, resolve_pose, StructureKind};
use super::systems::QuirkContext;
use super::targeting::{ActionTarget, InteractionTarget};
use crate::combat::{BodyCapability, DamageChangeEvent, DamageSpecifier, LifeState};
use crate::error::QuirkError;
use crate::log::QuirkLogEventType;
use crate::map::{spawn_structure, MapCoordinates};

/// One resolved effect of an admitted invocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuirkEffect {
    /// Spawn kind A on the surface, keep the surface
    CloneSurface { surface: Entity },
    /// Delete the surface, spawn kind A where it was
    ReplaceSurface { surface: Entity },
    DamageTarget { target: Entity },
    HealTarget { target: Entity },
    /// Self-heal, buff, and bank one charge
    ConsumeCorpse { corpse: Entity },
    DeployCharges { count: u32 },
    HealSelf,
    SpawnStructure { at: MapCoordinates, kind: StructureKind },
}

/// Pick the effect of a generic interaction
pub fn select_interaction(target: &InteractionTarget, roll: f32, probability: f32) -> QuirkEffect {
    let first = roll < probability;
    match *target {
        InteractionTarget::AmbientSurface(surface) => {
            if first {
                QuirkEffect::CloneSurface { surface }
            } else {
                QuirkEffect::ReplaceSurface { surface }
            }
        }
        InteractionTarget::Body {
            entity,
            life: LifeState::Alive,
        } => {
            if first {
                QuirkEffect::DamageTarget { target: entity }
            } else {
                QuirkEffect::HealTarget { target: entity }
            }
        }
        InteractionTarget::Body {
            entity,
            life: LifeState::Dead,
        } => QuirkEffect::ConsumeCorpse { corpse: entity },
    }
}

/// Pick the effect of the bound action
pub fn select_action(
    target: &ActionTarget,
    queued_charges: u32,
    roll: f32,
    probability: f32,
) -> QuirkEffect {
    match *target {
        ActionTarget::Performer if queued_charges > 0 => QuirkEffect::DeployCharges {
            count: queued_charges,
        },
        ActionTarget::Performer => QuirkEffect::HealSelf,
        ActionTarget::Entity { entity, capability } => match capability {
            BodyCapability::HasBody(LifeState::Alive) => QuirkEffect::DamageTarget { target: entity },
            BodyCapability::HasBody(LifeState::Dead) => QuirkEffect::ConsumeCorpse { corpse: entity },
            BodyCapability::NoBody => QuirkEffect::CloneSurface { surface: entity },
        },
        ActionTarget::WorldPoint(at) => QuirkEffect::SpawnStructure {
            at,
            kind: if roll < probability {
                StructureKind::Primary
            } else {
                StructureKind::Secondary
            },
        },
    }
}

fn send_change(ctx: &mut QuirkContext, source: Entity, target: Entity, damage: DamageSpecifier) {
    ctx.damage.send(DamageChangeEvent {
        source,
        target,
        damage,
        ability_name: ABILITY_NAME.to_string(),
    });
}

/// Execute one effect for `performer`.
///
/// Errors abort only this effect; the cooldown has already been consumed.
pub fn apply_effect(
    effect: QuirkEffect,
    performer: Entity,
    state: &mut QuirkState,
    ctx: &mut QuirkContext,
) -> Result<(), QuirkError> {
    match effect {
        QuirkEffect::CloneSurface { surface } => {
            let coordinates = ctx.coordinates_of(surface)?;
            let prototype = ctx.config.primary_structure.clone();
            spawn_structure(&mut ctx.commands, &prototype, coordinates);
            log_spawn(&mut ctx.log, &prototype, coordinates);
        }
        QuirkEffect::ReplaceSurface { surface } => {
            let coordinates = ctx.coordinates_of(surface)?;
            ctx.commands.entity(surface).despawn();
            ctx.log.log(
                QuirkLogEventType::EntityRemoved,
                format!("Removed surface {}", surface),
            );
            let prototype = ctx.config.primary_structure.clone();
            spawn_structure(&mut ctx.commands, &prototype, coordinates);
            log_spawn(&mut ctx.log, &prototype, coordinates);
        }
        QuirkEffect::DamageTarget { target } => {
            let damage = ctx.config.target_damage();
            send_change(ctx, performer, target, damage);
        }
        QuirkEffect::HealTarget { target } => {
            let heal = ctx.config.target_heal();
            send_change(ctx, performer, target, heal);
        }
        QuirkEffect::ConsumeCorpse { corpse } => {
            let heal = ctx.config.corpse_heal();
            send_change(ctx, performer, performer, heal);

            state.queued_charges += 1;
            let has_marker = ctx.buff_markers.contains(performer);
            let now = ctx.now();
            let duration = ctx.config.buff_duration();
            let grant = grant_buff(
                &mut ctx.commands,
                performer,
                state,
                has_marker,
                now,
                duration,
                &mut ctx.log,
            );
            match grant {
                BuffGrant::Granted => info!(
                    "{} consumed corpse {} ({} charges queued, buff started)",
                    performer, corpse, state.queued_charges
                ),
                BuffGrant::AlreadyActive => info!(
                    "{} consumed corpse {} ({} charges queued, buff already running)",
                    performer, corpse, state.queued_charges
                ),
            }
        }
        QuirkEffect::DeployCharges { count } => {
            let pose = resolve_pose(performer, &ctx.poses)?;
            let spawned = deploy(&mut ctx.commands, &pose, count, &ctx.config, &mut ctx.log);
            info!("{} deployed {} structures", performer, spawned);
            state.queued_charges = 0;
        }
        QuirkEffect::HealSelf => {
            let heal = ctx.config.self_heal();
            send_change(ctx, performer, performer, heal);
        }
        QuirkEffect::SpawnStructure { at, kind } => {
            let prototype = kind.prototype(&ctx.config).to_string();
            spawn_structure(&mut ctx.commands, &prototype, at);
            log_spawn(&mut ctx.log, &prototype, at);
        }
    }
    Ok(())
}
