//! Body and health components
//!
//! `Body` is the "living body" capability. Entities without it are ambient
//! surfaces (walls, floor tiles, props) as far as the quirk is concerned.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a body is still alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    Dead,
}

/// Living-body capability. Its presence is what separates creatures from terrain.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Body {
    pub life: LifeState,
}

impl Body {
    pub fn alive() -> Self {
        Self {
            life: LifeState::Alive,
        }
    }

    pub fn dead() -> Self {
        Self {
            life: LifeState::Dead,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life == LifeState::Dead
    }
}

/// Capability of a target entity, resolved once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyCapability {
    /// No living-body capability (ambient surface)
    NoBody,
    /// Has a body in the given life state
    HasBody(LifeState),
}

impl BodyCapability {
    pub fn resolve(body: Option<&Body>) -> Self {
        match body {
            Some(body) => BodyCapability::HasBody(body.life),
            None => BodyCapability::NoBody,
        }
    }
}

/// Health pool for anything that can take damage
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(maximum: f32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Subtract damage, flooring at zero. Returns the amount actually removed.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        before - self.current
    }

    /// Add healing, capped at maximum. Returns the amount actually restored.
    pub fn apply_healing(&mut self, amount: f32) -> f32 {
        let actual = (self.current + amount).min(self.maximum) - self.current;
        self.current += actual;
        actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_resolution() {
        assert_eq!(BodyCapability::resolve(None), BodyCapability::NoBody);
        assert_eq!(
            BodyCapability::resolve(Some(&Body::alive())),
            BodyCapability::HasBody(LifeState::Alive)
        );
        assert_eq!(
            BodyCapability::resolve(Some(&Body::dead())),
            BodyCapability::HasBody(LifeState::Dead)
        );
    }

    #[test]
    fn test_health_clamps() {
        let mut health = Health::new(100.0);
        assert_eq!(health.apply_damage(35.0), 35.0);
        assert_eq!(health.apply_healing(50.0), 35.0);
        assert_eq!(health.current, 100.0);
        assert_eq!(health.apply_damage(250.0), 100.0);
        assert!(health.is_dead());
    }
}
