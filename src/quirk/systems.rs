//! Quirk dispatch systems
//!
//! One system per entry event. Each invocation goes through the same steps:
//! 1. Look up the performer's `QuirkState` (events for non-bearers are ignored)
//! 2. Cooldown gate; the use is recorded before anything else runs
//! 3. Classify the target
//! 4. Select and apply exactly one effect

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use std::time::Duration;

use super::components::{BuffMarker, GameRng, QuirkState};
use super::config::QuirkConfig;
use super::cooldown::CooldownGate;
use super::effects::{apply_effect, select_action, select_interaction};
use super::events::{InteractUsingEvent, QuirkActionEvent};
use super::targeting::{classify_action, classify_interaction};
use crate::combat::{Body, DamageChangeEvent};
use crate::error::QuirkError;
use crate::log::{QuirkLog, QuirkLogEventType};
use crate::map::{MapCoordinates, OnMap};

/// Everything an effect may touch, bundled for the dispatch systems
#[derive(SystemParam)]
pub struct QuirkContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub time: Res<'w, Time>,
    pub rng: ResMut<'w, GameRng>,
    pub config: Res<'w, QuirkConfig>,
    pub log: ResMut<'w, QuirkLog>,
    pub damage: EventWriter<'w, DamageChangeEvent>,
    pub poses: Query<'w, 's, (&'static Transform, Option<&'static OnMap>)>,
    pub bodies: Query<'w, 's, Option<&'static Body>>,
    pub buff_markers: Query<'w, 's, (), With<BuffMarker>>,
}

impl QuirkContext<'_, '_> {
    pub fn now(&self) -> Duration {
        self.time.elapsed()
    }

    /// Map coordinates of an entity, if it has a transform and a map
    pub fn coordinates_of(&self, entity: Entity) -> Result<MapCoordinates, QuirkError> {
        match self.poses.get(entity) {
            Ok((transform, Some(on_map))) => Ok(MapCoordinates::of(transform, on_map)),
            _ => Err(QuirkError::MissingPose(entity)),
        }
    }

    /// Run the cooldown gate for `performer`, logging the outcome
    fn consume_cooldown(&mut self, performer: Entity, state: &mut QuirkState, source: &str) -> bool {
        let gate = CooldownGate::new(self.config.cooldown());
        let now = self.now();

        if gate.try_consume(state, now) {
            self.log.log(
                QuirkLogEventType::AbilityUsed,
                format!("{} uses Overhaul ({})", performer, source),
            );
            true
        } else {
            self.log.log(
                QuirkLogEventType::CooldownRejected,
                format!(
                    "{}'s Overhaul is cooling down ({:.1}s remaining)",
                    performer,
                    gate.remaining(state, now).as_secs_f32()
                ),
            );
            false
        }
    }
}

/// Keep log timestamps in step with the simulation clock
pub fn sync_log_time(time: Res<Time>, mut log: ResMut<QuirkLog>) {
    log.match_time = time.elapsed_secs();
}

/// Handle the generic interaction entry point
pub fn handle_interact_using(
    mut events: EventReader<InteractUsingEvent>,
    mut quirks: Query<&mut QuirkState>,
    mut ctx: QuirkContext,
) {
    for event in events.read() {
        let Ok(mut state) = quirks.get_mut(event.user) else {
            continue;
        };
        info!("Overhaul interaction by {} on {}", event.user, event.target);

        if !ctx.consume_cooldown(event.user, &mut state, "interaction") {
            continue;
        }

        let target = match classify_interaction(event.target, &ctx.bodies) {
            Ok(target) => target,
            Err(e) => {
                ctx.log.diagnostic(format!("Interaction aborted: {}", e));
                continue;
            }
        };

        let roll = ctx.rng.random_f32();
        let effect = select_interaction(&target, roll, ctx.config.effect_probability);
        if let Err(e) = apply_effect(effect, event.user, &mut state, &mut ctx) {
            ctx.log.diagnostic(format!("{:?} aborted: {}", effect, e));
        }
    }
}

/// Handle the bound action entry point
pub fn handle_quirk_action(
    mut events: EventReader<QuirkActionEvent>,
    mut quirks: Query<&mut QuirkState>,
    mut ctx: QuirkContext,
) {
    for event in events.read() {
        let Ok(mut state) = quirks.get_mut(event.performer) else {
            continue;
        };
        info!("Overhaul action triggered by {}", event.performer);

        if !ctx.consume_cooldown(event.performer, &mut state, "action") {
            continue;
        }

        let target = classify_action(event, &ctx.bodies);
        let roll = ctx.rng.random_f32();
        let effect = select_action(
            &target,
            state.queued_charges,
            roll,
            ctx.config.effect_probability,
        );
        if let Err(e) = apply_effect(effect, event.performer, &mut state, &mut ctx) {
            ctx.log.diagnostic(format!("{:?} aborted: {}", effect, e));
        }
    }
}
