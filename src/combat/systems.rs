//! Combat systems
//!
//! ECS systems that apply damage changes to health pools.

use bevy::prelude::*;

use super::components::*;
use super::events::*;
use crate::log::{QuirkLog, QuirkLogEventType};

/// Display name for log messages
pub fn display_name(names: &Query<&Name>, entity: Entity) -> String {
    names
        .get(entity)
        .map(|n| n.as_str().to_string())
        .unwrap_or_else(|_| format!("{}", entity))
}

/// Process damage change events and apply them to targets
pub fn process_damage_changes(
    mut events: EventReader<DamageChangeEvent>,
    mut health_query: Query<&mut Health>,
    names: Query<&Name>,
    mut log: ResMut<QuirkLog>,
) {
    for event in events.read() {
        let source_name = display_name(&names, event.source);
        let target_name = display_name(&names, event.target);

        // Targets without a health pool still get the log entry
        let (dealt, healed) = match health_query.get_mut(event.target) {
            Ok(mut health) => {
                let dealt = health.apply_damage(event.damage.total_damage());
                let healed = health.apply_healing(event.damage.total_healing());
                (dealt, healed)
            }
            Err(_) => (0.0, 0.0),
        };

        if event.damage.total_damage() > 0.0 {
            log.log(
                QuirkLogEventType::Damage,
                format!(
                    "{}'s {} hits {} for {:.0} damage ({})",
                    source_name,
                    event.ability_name,
                    target_name,
                    dealt,
                    event.damage.describe()
                ),
            );
        }
        if event.damage.total_healing() > 0.0 {
            log.log(
                QuirkLogEventType::Healing,
                format!(
                    "{}'s {} heals {} for {:.0}",
                    source_name, event.ability_name, target_name, healed
                ),
            );
        }
    }
}

/// Mark bodies whose health reached zero as dead
pub fn update_life_states(
    mut bodies: Query<(Entity, &Health, &mut Body), Changed<Health>>,
    names: Query<&Name>,
    mut log: ResMut<QuirkLog>,
) {
    for (entity, health, mut body) in bodies.iter_mut() {
        if health.is_dead() && body.life == LifeState::Alive {
            body.life = LifeState::Dead;
            let name = display_name(&names, entity);
            info!("{} has died", name);
            log.log(QuirkLogEventType::Death, format!("{} has died", name));
        }
    }
}
