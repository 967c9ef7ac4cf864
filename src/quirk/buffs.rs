//! Buff lifecycle
//!
//! Consuming a corpse grants a temporary `BuffMarker`. Each grant while the
//! buff is inactive schedules one `BuffExpiry` task; re-grants while active
//! only touch the state flag.

use bevy::prelude::*;
use std::time::Duration;

use super::components::{BuffExpiry, BuffMarker, QuirkState};
use crate::log::{QuirkLog, QuirkLogEventType};

/// Outcome of a buff grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuffGrant {
    /// Marker attached and expiry scheduled
    Granted,
    /// Buff was already running; nothing scheduled
    AlreadyActive,
}

/// Grant the buff to `actor`. `has_marker` is whether the actor currently carries `BuffMarker`.
pub fn grant_buff(
    commands: &mut Commands,
    actor: Entity,
    state: &mut QuirkState,
    has_marker: bool,
    now: Duration,
    duration: Duration,
    log: &mut QuirkLog,
) -> BuffGrant {
    // The flag covers grants queued earlier in the same tick, before the marker insert is applied
    if has_marker || state.has_buff {
        state.has_buff = true;
        return BuffGrant::AlreadyActive;
    }

    state.has_buff = true;
    commands.entity(actor).insert(BuffMarker);
    commands.spawn((
        BuffExpiry {
            actor,
            fires_at: now.saturating_add(duration),
        },
        Name::new("BuffExpiry"),
    ));

    log.log(
        QuirkLogEventType::BuffApplied,
        format!("{} gains the Overhaul buff for {:.0}s", actor, duration.as_secs_f32()),
    );
    BuffGrant::Granted
}

/// Run due buff-expiry tasks.
///
/// A task whose actor no longer exists is dropped without touching anything.
pub fn expire_buffs(
    mut commands: Commands,
    time: Res<Time>,
    tasks: Query<(Entity, &BuffExpiry)>,
    mut actors: Query<Option<&mut QuirkState>, Without<BuffExpiry>>,
    mut log: ResMut<QuirkLog>,
) {
    let now = time.elapsed();

    for (task_entity, task) in tasks.iter() {
        if now < task.fires_at {
            continue;
        }
        commands.entity(task_entity).despawn();

        let Ok(state) = actors.get_mut(task.actor) else {
            debug!("Buff expiry for {} skipped: actor no longer exists", task.actor);
            continue;
        };

        commands.entity(task.actor).remove::<BuffMarker>();
        if let Some(mut state) = state {
            state.has_buff = false;
        }
        log.log(
            QuirkLogEventType::BuffExpired,
            format!("{}'s Overhaul buff fades", task.actor),
        );
    }
}
