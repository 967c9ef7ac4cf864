//! Map coordinates and structure spawning
//!
//! The world is planar: positions are `Vec2` on a numbered map, and an
//! entity's pose is its `Transform` plus the `OnMap` it sits on.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Identifier of a map/plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MapId(pub u32);

/// Which map an entity lives on
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnMap(pub MapId);

/// A point on a specific map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCoordinates {
    pub map: MapId,
    pub position: Vec2,
}

impl MapCoordinates {
    pub fn new(map: MapId, position: Vec2) -> Self {
        Self { map, position }
    }

    /// Coordinates of an entity with a transform on a map
    pub fn of(transform: &Transform, on_map: &OnMap) -> Self {
        Self {
            map: on_map.0,
            position: transform.translation.truncate(),
        }
    }
}

/// A spawned structure, tagged with the prototype it came from
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    pub prototype: String,
}

/// Spawn a structure of `prototype` at `coordinates`
pub fn spawn_structure(
    commands: &mut Commands,
    prototype: &str,
    coordinates: MapCoordinates,
) -> Entity {
    commands
        .spawn((
            Structure {
                prototype: prototype.to_string(),
            },
            Name::new(prototype.to_string()),
            Transform::from_translation(coordinates.position.extend(0.0)),
            OnMap(coordinates.map),
        ))
        .id()
}
