//! Error types raised by the quirk engine.
//!
//! None of these reach the host. Handlers turn them into a warning and a
//! `Diagnostic` entry in the quirk log.

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuirkError {
    #[error("entity {0} has no resolvable pose (transform and map)")]
    MissingPose(Entity),

    #[error("target entity {0} no longer exists")]
    MissingTarget(Entity),

    #[error("unknown action prototype: {0}")]
    UnknownActionPrototype(String),

    #[error("invalid quirk config: {0}")]
    InvalidConfig(String),
}
