//! Shared harness for the integration tests
//!
//! Builds a bare `App` with the quirk plugin and drives its clock by hand.

#![allow(dead_code)]

use bevy::prelude::*;
use std::time::Duration;

use quirksim::combat::{Body, Health};
use quirksim::map::{MapCoordinates, MapId, OnMap, Structure};
use quirksim::quirk::{InteractUsingEvent, QuirkActionEvent, QuirkConfig, QuirkPlugin, QuirkState};

pub const MAP: MapId = MapId(1);

pub fn app_with_config(config: QuirkConfig) -> App {
    let mut app = App::new();
    app.add_plugins(QuirkPlugin::default().with_config(config).with_seed(7));
    app
}

pub fn default_app() -> App {
    app_with_config(QuirkConfig::default())
}

/// Config where every 50/50 choice takes the first option (or the second if `first` is false)
pub fn forced_config(first: bool) -> QuirkConfig {
    QuirkConfig {
        effect_probability: if first { 1.0 } else { 0.0 },
        ..default()
    }
}

/// Advance the clock by `millis` and run one update
pub fn tick_ms(app: &mut App, millis: u64) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(millis));
    app.update();
}

pub fn tick_secs(app: &mut App, secs: u64) {
    tick_ms(app, secs * 1000);
}

pub fn spawn_actor(app: &mut App, position: Vec2, facing_degrees: f32) -> Entity {
    let actor = app
        .world_mut()
        .spawn((
            Name::new("Actor"),
            Transform::from_translation(position.extend(0.0))
                .with_rotation(Quat::from_rotation_z(facing_degrees.to_radians())),
            OnMap(MAP),
            Body::alive(),
            Health::new(100.0),
            QuirkState::default(),
        ))
        .id();
    // Apply the action binder's queued commands
    app.world_mut().flush();
    actor
}

pub fn spawn_body(app: &mut App, name: &str, position: Vec2, dead: bool) -> Entity {
    app.world_mut()
        .spawn((
            Name::new(name.to_string()),
            Transform::from_translation(position.extend(0.0)),
            OnMap(MAP),
            if dead { Body::dead() } else { Body::alive() },
            Health::new(100.0),
        ))
        .id()
}

pub fn spawn_surface(app: &mut App, position: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Name::new("Floor"),
            Transform::from_translation(position.extend(0.0)),
            OnMap(MAP),
        ))
        .id()
}

pub fn interact(app: &mut App, user: Entity, target: Entity) {
    app.world_mut().send_event(InteractUsingEvent { user, target });
}

pub fn activate(app: &mut App, performer: Entity, entity: Option<Entity>, point: Vec2) {
    app.world_mut().send_event(QuirkActionEvent {
        performer,
        entity,
        target: MapCoordinates::new(MAP, point),
    });
}

pub fn quirk_state(app: &App, actor: Entity) -> &QuirkState {
    app.world()
        .get::<QuirkState>(actor)
        .expect("actor should carry QuirkState")
}

pub fn health_of(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<Health>(entity)
        .expect("entity should have Health")
        .current
}

pub fn set_health(app: &mut App, entity: Entity, current: f32) {
    app.world_mut()
        .get_mut::<Health>(entity)
        .expect("entity should have Health")
        .current = current;
}

/// All structures, sorted by spawn position (y, then x)
pub fn structures(app: &mut App) -> Vec<(String, Vec2)> {
    let world = app.world_mut();
    let mut found: Vec<(String, Vec2)> = world
        .query::<(&Structure, &Transform)>()
        .iter(world)
        .map(|(s, t)| (s.prototype.clone(), t.translation.truncate()))
        .collect();
    found.sort_by(|a, b| {
        a.1.y
            .total_cmp(&b.1.y)
            .then(a.1.x.total_cmp(&b.1.x))
    });
    found
}

pub fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query::<&C>().iter(world).count()
}

pub fn approx(a: Vec2, b: Vec2) -> bool {
    a.distance(b) < 1e-4
}
