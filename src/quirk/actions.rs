//! Action Lifecycle Binder
//!
//! Grants the quirk's action object when `QuirkState` is attached and tears
//! it down when the state is removed or the actor is despawned.
//!
//! The primary path resolves the action through the prototype registry. When
//! that fails, the action is spawned directly from its id; both paths end in
//! the same attachment.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

use super::components::QuirkState;
use super::config::QuirkConfig;
use super::constants::{ABILITY_NAME, ACTION_PROTOTYPE};
use crate::error::QuirkError;
use crate::log::{QuirkLog, QuirkLogEventType};

/// Definition of an action that can be granted to an actor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionPrototype {
    pub id: String,
    /// Display name
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ActionPrototype {
    /// Built-in prototype for the Overhaul action
    pub fn overhaul() -> Self {
        Self {
            id: ACTION_PROTOTYPE.to_string(),
            name: ABILITY_NAME.to_string(),
            description: "Reshape whatever you touch. Corpses bank walls for later.".to_string(),
            icon: None,
        }
    }
}

/// Registry of known action prototypes
#[derive(Resource, Clone, Debug, Default)]
pub struct ActionPrototypes {
    prototypes: HashMap<String, ActionPrototype>,
}

impl ActionPrototypes {
    pub fn from_list(list: Vec<ActionPrototype>) -> Self {
        Self {
            prototypes: list.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ActionPrototype> {
        self.prototypes.get(id)
    }

    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}

/// An action object living in some actor's action bar
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActionEntity {
    pub prototype: String,
    pub name: String,
    /// Actor this action is granted to
    pub attached_to: Option<Entity>,
}

/// Actions granted to an actor
#[derive(Component, Debug, Clone, Default)]
pub struct ActionContainer {
    pub actions: SmallVec<[Entity; 4]>,
}

impl ActionContainer {
    pub fn with(action: Entity) -> Self {
        let mut container = Self::default();
        container.push(action);
        container
    }

    pub fn contains(&self, action: Entity) -> bool {
        self.actions.contains(&action)
    }

    pub fn push(&mut self, action: Entity) {
        if !self.contains(action) {
            self.actions.push(action);
        }
    }

    pub fn remove(&mut self, action: Entity) {
        self.actions.retain(|a| *a != action);
    }
}

/// Create an action object from a registered prototype
pub fn ensure_action(
    commands: &mut Commands,
    prototypes: &ActionPrototypes,
    owner: Entity,
    prototype_id: &str,
) -> Result<Entity, QuirkError> {
    let prototype = prototypes
        .get(prototype_id)
        .ok_or_else(|| QuirkError::UnknownActionPrototype(prototype_id.to_string()))?;

    Ok(commands
        .spawn((
            ActionEntity {
                prototype: prototype.id.clone(),
                name: prototype.name.clone(),
                attached_to: Some(owner),
            },
            Name::new(prototype.name.clone()),
        ))
        .id())
}

/// Fallback: instantiate the action object without a registered prototype.
/// The result matches what `ensure_action` produces for the built-in prototype.
pub fn spawn_action_directly(commands: &mut Commands, owner: Entity, prototype_id: &str) -> Entity {
    commands
        .spawn((
            ActionEntity {
                prototype: prototype_id.to_string(),
                name: ABILITY_NAME.to_string(),
                attached_to: Some(owner),
            },
            Name::new(ABILITY_NAME),
        ))
        .id()
}

/// Put `action` into the owner's action container, creating the container if needed
pub fn attach_action(
    commands: &mut Commands,
    containers: &mut Query<&mut ActionContainer>,
    owner: Entity,
    action: Entity,
) {
    match containers.get_mut(owner) {
        Ok(mut container) => container.push(action),
        Err(_) => {
            commands.entity(owner).insert(ActionContainer::with(action));
        }
    }
}

/// Observer: grant the action when the quirk is attached
pub fn bind_quirk_action(
    trigger: Trigger<OnAdd, QuirkState>,
    mut commands: Commands,
    mut quirks: Query<&mut QuirkState>,
    mut containers: Query<&mut ActionContainer>,
    prototypes: Res<ActionPrototypes>,
    config: Res<QuirkConfig>,
    mut log: ResMut<QuirkLog>,
) {
    let owner = trigger.entity();
    let Ok(mut state) = quirks.get_mut(owner) else {
        return;
    };
    if state.bound_action.is_some() {
        return;
    }

    let action = match ensure_action(&mut commands, &prototypes, owner, &config.action_prototype) {
        Ok(action) => action,
        Err(e) => {
            log.diagnostic(format!("{}; spawning action for {} directly", e, owner));
            spawn_action_directly(&mut commands, owner, &config.action_prototype)
        }
    };

    attach_action(&mut commands, &mut containers, owner, action);
    state.bound_action = Some(action);

    log.log(
        QuirkLogEventType::ActionBound,
        format!("{} granted to {}", config.action_prototype, owner),
    );
}

/// Observer: destroy the action when the quirk is removed (including actor despawn)
pub fn unbind_quirk_action(
    trigger: Trigger<OnRemove, QuirkState>,
    mut commands: Commands,
    mut quirks: Query<&mut QuirkState>,
    mut containers: Query<&mut ActionContainer>,
    actions: Query<(), With<ActionEntity>>,
    mut log: ResMut<QuirkLog>,
) {
    let owner = trigger.entity();
    let Ok(mut state) = quirks.get_mut(owner) else {
        return;
    };
    let Some(action) = state.bound_action.take() else {
        return;
    };

    if let Ok(mut container) = containers.get_mut(owner) {
        container.remove(action);
    }

    if actions.contains(action) {
        commands.entity(action).despawn();
        log.log(
            QuirkLogEventType::ActionUnbound,
            format!("Action {} removed from {}", action, owner),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_push_is_unique() {
        let action = Entity::from_raw(7);
        let mut container = ActionContainer::with(action);
        container.push(action);
        assert_eq!(container.actions.len(), 1);
        container.remove(action);
        assert!(!container.contains(action));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ActionPrototypes::from_list(vec![ActionPrototype::overhaul()]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(ACTION_PROTOTYPE).map(|p| p.name.as_str()), Some("Overhaul"));
        assert!(registry.get("Missing").is_none());
    }
}
