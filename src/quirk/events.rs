//! Quirk entry-point events
//!
//! The host fires these; the dispatch systems in `systems` consume them.

use bevy::prelude::*;

use crate::map::MapCoordinates;

/// Generic "interact with item/world" event
#[derive(Event, Debug, Clone)]
pub struct InteractUsingEvent {
    /// Entity performing the interaction (the quirk bearer)
    pub user: Entity,
    /// Entity being interacted with
    pub target: Entity,
}

/// Bound quirk action performed
#[derive(Event, Debug, Clone)]
pub struct QuirkActionEvent {
    /// Entity performing the action (the quirk bearer)
    pub performer: Entity,
    /// Entity under the cursor, if any
    pub entity: Option<Entity>,
    /// Clicked world point
    pub target: MapCoordinates,
}
