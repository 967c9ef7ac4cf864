//! Deployment sequencer
//!
//! Spends banked charges by spawning a line of alternating structures in
//! front of the actor: kind A on odd slots, kind B on even slots.

use bevy::prelude::*;

use super::config::QuirkConfig;
use crate::error::QuirkError;
use crate::log::{QuirkLog, QuirkLogEventType};
use crate::map::{spawn_structure, MapCoordinates, MapId, OnMap};

/// Which of the two structure prototypes to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    /// Kind A (`primary_structure`)
    Primary,
    /// Kind B (`secondary_structure`)
    Secondary,
}

impl StructureKind {
    /// Kind for the 1-based deployment slot `index`
    pub fn for_slot(index: u32) -> Self {
        if index % 2 == 1 {
            StructureKind::Primary
        } else {
            StructureKind::Secondary
        }
    }

    pub fn prototype<'a>(&self, config: &'a QuirkConfig) -> &'a str {
        match self {
            StructureKind::Primary => &config.primary_structure,
            StructureKind::Secondary => &config.secondary_structure,
        }
    }
}

/// World position and facing of an actor on its map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub map: MapId,
    pub position: Vec2,
    /// Unit vector the actor is facing
    pub forward: Vec2,
}

impl ActorPose {
    /// Top-down pose: forward is the transform's local +Y projected onto the plane
    pub fn from_transform(transform: &Transform, on_map: &OnMap) -> Self {
        Self {
            map: on_map.0,
            position: transform.translation.truncate(),
            forward: transform.up().truncate().normalize_or_zero(),
        }
    }
}

/// Resolve an actor's pose. Fails when the transform or map is missing.
pub fn resolve_pose(
    actor: Entity,
    poses: &Query<(&Transform, Option<&OnMap>)>,
) -> Result<ActorPose, QuirkError> {
    match poses.get(actor) {
        Ok((transform, Some(on_map))) => Ok(ActorPose::from_transform(transform, on_map)),
        _ => Err(QuirkError::MissingPose(actor)),
    }
}

/// One planned spawn of a deployment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeploymentSlot {
    /// 1-based slot index
    pub index: u32,
    pub kind: StructureKind,
    pub coordinates: MapCoordinates,
}

/// Plan `count` spawns at `position + forward * (spacing * i)` for i in 1..=count
pub fn deployment_positions(pose: &ActorPose, count: u32, spacing: f32) -> Vec<DeploymentSlot> {
    (1..=count)
        .map(|index| DeploymentSlot {
            index,
            kind: StructureKind::for_slot(index),
            coordinates: MapCoordinates::new(
                pose.map,
                pose.position + pose.forward * (spacing * index as f32),
            ),
        })
        .collect()
}

/// Spawn the whole line. The pose is resolved before anything spawns, so a
/// deployment either happens completely or not at all.
pub fn deploy(
    commands: &mut Commands,
    pose: &ActorPose,
    count: u32,
    config: &QuirkConfig,
    log: &mut QuirkLog,
) -> usize {
    let slots = deployment_positions(pose, count, config.deploy_spacing);
    for slot in &slots {
        let prototype = slot.kind.prototype(config);
        spawn_structure(commands, prototype, slot.coordinates);
        log_spawn(log, prototype, slot.coordinates);
    }
    slots.len()
}

/// Log a structure spawn in the shared format
pub fn log_spawn(log: &mut QuirkLog, prototype: &str, coordinates: MapCoordinates) {
    let message = format!(
        "Spawned {} at ({:.2}, {:.2})",
        prototype, coordinates.position.x, coordinates.position.y
    );
    info!("{}", message);
    log.log(QuirkLogEventType::StructureSpawned, message);
}
