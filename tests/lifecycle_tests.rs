//! Integration tests for the buff lifecycle and action binder
//!
//! These tests verify that:
//! - Repeated buff grants schedule a single expiry
//! - Expiry clears the marker, and is a no-op once the actor is gone
//! - Attaching the quirk grants exactly one action, detaching removes it
//! - The fallback path grants an action when the prototype is unknown

mod common;

use bevy::prelude::*;
use common::*;

use quirksim::log::{QuirkLog, QuirkLogEventType};
use quirksim::quirk::{
    ActionContainer, ActionEntity, ActionPrototypes, BuffExpiry, BuffMarker, QuirkConfig,
    QuirkConfigFile, QuirkPlugin, QuirkState,
};

fn log_count(app: &App, event_type: QuirkLogEventType) -> usize {
    app.world().resource::<QuirkLog>().count(event_type)
}

// =============================================================================
// Buff lifecycle
// =============================================================================

#[test]
fn test_repeat_corpse_grants_schedule_one_expiry() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);
    tick_secs(&mut app, 5);
    interact(&mut app, actor, corpse);
    tick_ms(&mut app, 0);

    assert_eq!(quirk_state(&app, actor).queued_charges, 2);
    assert_eq!(count::<BuffExpiry>(&mut app), 1);
    assert_eq!(log_count(&app, QuirkLogEventType::BuffApplied), 1);
}

#[test]
fn test_buff_expires_after_duration() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);

    tick_secs(&mut app, 29);
    assert!(quirk_state(&app, actor).has_buff, "Still active before 30s");
    assert!(app.world().get::<BuffMarker>(actor).is_some());

    tick_secs(&mut app, 1);
    assert!(!quirk_state(&app, actor).has_buff);
    assert!(app.world().get::<BuffMarker>(actor).is_none());
    assert_eq!(count::<BuffExpiry>(&mut app), 0);
    assert_eq!(log_count(&app, QuirkLogEventType::BuffExpired), 1);
    assert_eq!(quirk_state(&app, actor).queued_charges, 1, "Charges outlive the buff");
}

#[test]
fn test_regrant_after_expiry_schedules_again() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);
    tick_secs(&mut app, 31);
    assert!(!quirk_state(&app, actor).has_buff);

    interact(&mut app, actor, corpse);
    tick_ms(&mut app, 0);

    assert!(quirk_state(&app, actor).has_buff);
    assert_eq!(count::<BuffExpiry>(&mut app), 1);
    assert_eq!(log_count(&app, QuirkLogEventType::BuffApplied), 2);
}

#[test]
fn test_corpse_on_expiry_tick_starts_fresh_buff() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);

    // Second corpse lands on the tick the first buff is due to expire (t = 31s)
    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 30);

    let state = quirk_state(&app, actor);
    assert_eq!(state.queued_charges, 2);
    assert!(state.has_buff);
    assert!(app.world().get::<BuffMarker>(actor).is_some());
    assert_eq!(count::<BuffExpiry>(&mut app), 1, "A new expiry is scheduled");
    assert_eq!(log_count(&app, QuirkLogEventType::BuffExpired), 1);
    assert_eq!(log_count(&app, QuirkLogEventType::BuffApplied), 2);

    tick_secs(&mut app, 30);
    assert!(!quirk_state(&app, actor).has_buff);
    assert!(app.world().get::<BuffMarker>(actor).is_none());
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let mut app = app_with_config(QuirkConfig {
        cooldown_secs: f32::INFINITY,
        ..default()
    });
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    assert_eq!(app.world().resource::<QuirkConfig>().cooldown_secs, 5.0);
    assert_eq!(app.world().resource::<QuirkLog>().diagnostics().len(), 1);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);
    assert_eq!(quirk_state(&app, actor).queued_charges, 1);
}

#[test]
fn test_expiry_after_actor_despawn_is_noop() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);
    app.world_mut().despawn(actor);

    tick_secs(&mut app, 40);

    assert_eq!(count::<BuffExpiry>(&mut app), 0);
    assert_eq!(log_count(&app, QuirkLogEventType::BuffExpired), 0);
}

#[test]
fn test_expiry_after_detach_still_clears_marker() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let corpse = spawn_body(&mut app, "Corpse", Vec2::new(1.0, 0.0), true);

    interact(&mut app, actor, corpse);
    tick_secs(&mut app, 1);
    app.world_mut().entity_mut(actor).remove::<QuirkState>();

    tick_secs(&mut app, 30);

    assert!(app.world().get::<BuffMarker>(actor).is_none());
    assert_eq!(log_count(&app, QuirkLogEventType::BuffExpired), 1);
}

// =============================================================================
// Action binder
// =============================================================================

#[test]
fn test_attach_grants_one_action() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);

    let action = quirk_state(&app, actor)
        .bound_action
        .expect("action should be bound on attach");
    let container = app
        .world()
        .get::<ActionContainer>(actor)
        .expect("actor should get an action container");
    assert!(container.contains(action));

    let entity = app
        .world()
        .get::<ActionEntity>(action)
        .expect("bound handle should be an action");
    assert_eq!(entity.prototype, "OverhaulQuirkAction");
    assert_eq!(entity.name, "Overhaul");
    assert_eq!(entity.attached_to, Some(actor));
    assert_eq!(count::<ActionEntity>(&mut app), 1);
    assert_eq!(log_count(&app, QuirkLogEventType::ActionBound), 1);
}

#[test]
fn test_detach_removes_action() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);

    app.world_mut().entity_mut(actor).remove::<QuirkState>();
    app.update();

    assert_eq!(count::<ActionEntity>(&mut app), 0);
    let container = app
        .world()
        .get::<ActionContainer>(actor)
        .expect("container stays on the actor");
    assert!(container.actions.is_empty());
    assert_eq!(log_count(&app, QuirkLogEventType::ActionUnbound), 1);
}

#[test]
fn test_attach_detach_cycles_leave_nothing_behind() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    app.world_mut().entity_mut(actor).remove::<QuirkState>();

    for _ in 0..3 {
        app.world_mut()
            .entity_mut(actor)
            .insert(QuirkState::default());
        app.update();
        assert_eq!(count::<ActionEntity>(&mut app), 1);

        app.world_mut().entity_mut(actor).remove::<QuirkState>();
        app.update();
    }

    assert_eq!(count::<ActionEntity>(&mut app), 0);
    assert_eq!(count::<QuirkState>(&mut app), 0);
}

#[test]
fn test_actor_despawn_removes_action() {
    let mut app = default_app();
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);
    let other = spawn_actor(&mut app, Vec2::new(5.0, 0.0), 0.0);
    assert_eq!(count::<ActionEntity>(&mut app), 2);

    app.world_mut().despawn(actor);
    app.update();

    assert_eq!(count::<ActionEntity>(&mut app), 1);
    assert!(quirk_state(&app, other).bound_action.is_some());
}

#[test]
fn test_unknown_prototype_falls_back_to_direct_spawn() {
    let mut app = App::new();
    app.add_plugins(QuirkPlugin {
        prototypes: ActionPrototypes::default(),
        ..QuirkPlugin::from_file(QuirkConfigFile::default())
    });
    let actor = spawn_actor(&mut app, Vec2::ZERO, 0.0);

    let action = quirk_state(&app, actor)
        .bound_action
        .expect("fallback should still bind an action");
    let entity = app
        .world()
        .get::<ActionEntity>(action)
        .expect("fallback handle should be an action");
    assert_eq!(entity.prototype, "OverhaulQuirkAction");
    assert_eq!(entity.name, "Overhaul", "Same display name as the registry path");
    assert_eq!(entity.attached_to, Some(actor));
    assert_eq!(
        app.world().get::<Name>(action).map(|n| n.as_str()),
        Some("Overhaul")
    );

    let log = app.world().resource::<QuirkLog>();
    assert_eq!(log.diagnostics().len(), 1);
    assert!(log.diagnostics()[0].message.contains("OverhaulQuirkAction"));

    app.world_mut().entity_mut(actor).remove::<QuirkState>();
    app.update();
    assert_eq!(count::<ActionEntity>(&mut app), 0);
}
