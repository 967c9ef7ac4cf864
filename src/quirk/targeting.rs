//! Target resolution
//!
//! Classifies an invocation's target once, up front. The effect selector only
//! ever sees these classifications.

use bevy::prelude::*;

use super::events::QuirkActionEvent;
use crate::combat::{Body, BodyCapability, LifeState};
use crate::error::QuirkError;
use crate::map::MapCoordinates;

/// Target of the generic interaction path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    /// Non-body entity (terrain, wall, prop)
    AmbientSurface(Entity),
    /// Body-bearing entity
    Body { entity: Entity, life: LifeState },
}

/// Target of the bound action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionTarget {
    /// The performer clicked itself
    Performer,
    /// Another entity, with its capability resolved
    Entity {
        entity: Entity,
        capability: BodyCapability,
    },
    /// Empty world point
    WorldPoint(MapCoordinates),
}

/// Classify the target of an interaction.
///
/// `bodies` must match every entity (`Option<&Body>`), so a lookup failure
/// means the entity no longer exists.
pub fn classify_interaction(
    target: Entity,
    bodies: &Query<Option<&Body>>,
) -> Result<InteractionTarget, QuirkError> {
    let body = bodies
        .get(target)
        .map_err(|_| QuirkError::MissingTarget(target))?;

    Ok(match BodyCapability::resolve(body) {
        BodyCapability::NoBody => InteractionTarget::AmbientSurface(target),
        BodyCapability::HasBody(life) => InteractionTarget::Body {
            entity: target,
            life,
        },
    })
}

/// Classify the target of the bound action.
///
/// A stale entity handle is treated as if nothing was under the cursor.
pub fn classify_action(event: &QuirkActionEvent, bodies: &Query<Option<&Body>>) -> ActionTarget {
    match event.entity {
        Some(entity) if entity == event.performer => ActionTarget::Performer,
        Some(entity) => match bodies.get(entity) {
            Ok(body) => ActionTarget::Entity {
                entity,
                capability: BodyCapability::resolve(body),
            },
            Err(_) => {
                debug!("Action target {} no longer exists, using world point", entity);
                ActionTarget::WorldPoint(event.target)
            }
        },
        None => ActionTarget::WorldPoint(event.target),
    }
}
