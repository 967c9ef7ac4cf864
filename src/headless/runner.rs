//! Headless scenario execution
//!
//! Runs a scenario on a bare `App` with a fixed simulation step, so results
//! are reproducible and independent of wall-clock speed.

use bevy::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::combat::{Body, CombatSystems, Health};
use crate::log::QuirkLog;
use crate::map::{MapCoordinates, MapId, OnMap, Structure};
use crate::quirk::{
    InteractUsingEvent, QuirkActionEvent, QuirkConfigFile, QuirkPlugin, QuirkState,
    QuirkSystemPhase,
};

use super::config::{ScenarioConfig, ScenarioStep, StepAction};

/// Simulation step used by the runner (60 Hz)
pub const TICK: Duration = Duration::from_nanos(16_666_667);

/// Result of a completed scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    /// Simulation time when the run stopped
    pub elapsed_secs: f32,
    /// Number of steps that were fired
    pub steps_fired: usize,
    /// Every structure in the world at the end: (prototype, position)
    pub structures: Vec<(String, Vec2)>,
    /// Actor's queued charges (None if the quirk is gone)
    pub queued_charges: Option<u32>,
    /// Actor's buff flag (None if the quirk is gone)
    pub has_buff: Option<bool>,
    /// Actor's health (None if the actor is gone)
    pub actor_health: Option<f32>,
    /// Number of diagnostics emitted
    pub diagnostics: usize,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

/// Resource tracking scenario progress
#[derive(Resource)]
pub struct ScenarioState {
    pub config: ScenarioConfig,
    steps: Vec<ScenarioStep>,
    next_step: usize,
    /// Named entities spawned at setup
    pub entities: HashMap<String, Entity>,
    /// The quirk bearer, until it is despawned
    pub actor: Option<Entity>,
    /// Run continues this long after the last step (lets a buff expire)
    pub tail_secs: f32,
    pub complete: bool,
}

impl ScenarioState {
    pub fn new(config: ScenarioConfig, tail_secs: f32) -> Self {
        Self {
            steps: config.sorted_steps(),
            config,
            next_step: 0,
            entities: HashMap::new(),
            actor: None,
            tail_secs,
            complete: false,
        }
    }

    fn last_step_at(&self) -> f32 {
        self.steps.last().map(|s| s.at_secs).unwrap_or(0.0)
    }
}

fn to_vec2(position: [f32; 2]) -> Vec2 {
    Vec2::new(position[0], position[1])
}

/// Spawn the actor, bodies and surfaces
fn setup_scenario(
    mut commands: Commands,
    mut state: ResMut<ScenarioState>,
    mut log: ResMut<QuirkLog>,
) {
    log.clear();

    let map = MapId(state.config.actor.map);
    let actor_spec = state.config.actor.clone();
    let mut health = Health::new(actor_spec.max_health);
    if let Some(current) = actor_spec.health {
        health.current = current.clamp(0.0, actor_spec.max_health);
    }

    let actor = commands
        .spawn((
            Name::new(actor_spec.name.clone()),
            Transform::from_translation(to_vec2(actor_spec.position).extend(0.0))
                .with_rotation(Quat::from_rotation_z(actor_spec.facing_degrees.to_radians())),
            OnMap(map),
            Body::alive(),
            health,
            QuirkState::default(),
        ))
        .id();
    state.actor = Some(actor);
    state.entities.insert(actor_spec.name.clone(), actor);

    for body in state.config.bodies.clone() {
        let entity = commands
            .spawn((
                Name::new(body.name.clone()),
                Transform::from_translation(to_vec2(body.position).extend(0.0)),
                OnMap(map),
                if body.dead { Body::dead() } else { Body::alive() },
                Health::new(body.max_health),
            ))
            .id();
        state.entities.insert(body.name, entity);
    }

    for surface in state.config.surfaces.clone() {
        let entity = commands
            .spawn((
                Name::new(surface.name.clone()),
                Transform::from_translation(to_vec2(surface.position).extend(0.0)),
                OnMap(map),
            ))
            .id();
        state.entities.insert(surface.name, entity);
    }

    info!(
        "Scenario setup complete: {} bodies, {} surfaces, {} steps",
        state.config.bodies.len(),
        state.config.surfaces.len(),
        state.steps.len()
    );
}

/// Fire every step whose time has come
fn fire_due_steps(
    mut commands: Commands,
    time: Res<Time>,
    mut state: ResMut<ScenarioState>,
    mut interactions: EventWriter<InteractUsingEvent>,
    mut actions: EventWriter<QuirkActionEvent>,
) {
    let now = time.elapsed_secs();
    let map = MapId(state.config.actor.map);

    while state.next_step < state.steps.len() && state.steps[state.next_step].at_secs <= now {
        let step = state.steps[state.next_step].clone();
        state.next_step += 1;

        let Some(actor) = state.actor else {
            debug!("Skipping step at {:.2}s: actor is gone", step.at_secs);
            continue;
        };
        match step.action {
            StepAction::Interact { target } => {
                if let Some(&target) = state.entities.get(&target) {
                    interactions.send(InteractUsingEvent { user: actor, target });
                }
            }
            StepAction::ActivateOnSelf => {
                actions.send(QuirkActionEvent {
                    performer: actor,
                    entity: Some(actor),
                    target: MapCoordinates::new(map, Vec2::ZERO),
                });
            }
            StepAction::ActivateOnEntity { target } => {
                if let Some(&target) = state.entities.get(&target) {
                    actions.send(QuirkActionEvent {
                        performer: actor,
                        entity: Some(target),
                        target: MapCoordinates::new(map, Vec2::ZERO),
                    });
                }
            }
            StepAction::ActivateAtPoint { position } => {
                actions.send(QuirkActionEvent {
                    performer: actor,
                    entity: None,
                    target: MapCoordinates::new(map, to_vec2(position)),
                });
            }
            StepAction::DetachQuirk => {
                commands.entity(actor).remove::<QuirkState>();
            }
            StepAction::DespawnActor => {
                commands.entity(actor).despawn();
                state.actor = None;
            }
        }
    }
}

/// Stop once all steps ran and the tail elapsed, or at the hard limit
fn check_scenario_end(time: Res<Time>, mut state: ResMut<ScenarioState>) {
    if state.complete {
        return;
    }
    let now = time.elapsed_secs();
    let steps_done = state.next_step >= state.steps.len();

    if now >= state.config.max_duration_secs {
        info!("Scenario hit max duration after {:.1}s", now);
        state.complete = true;
    } else if steps_done && now >= state.last_step_at() + state.tail_secs {
        info!("Scenario finished after {:.1}s", now);
        state.complete = true;
    }
}

/// Build the app for a scenario without running it
pub fn build_scenario_app(config: ScenarioConfig, quirk: QuirkConfigFile) -> App {
    let tail_secs = quirk.quirk.buff_duration_secs + 1.0;
    let mut plugin = QuirkPlugin::from_file(quirk);
    plugin.seed = config.random_seed;

    let mut app = App::new();
    app.add_plugins(plugin)
        .insert_resource(ScenarioState::new(config, tail_secs))
        .add_systems(Startup, setup_scenario)
        .add_systems(
            Update,
            (
                fire_due_steps.before(QuirkSystemPhase::Dispatch),
                check_scenario_end.after(CombatSystems),
            ),
        );
    app
}

/// Collect the result from a finished world
fn collect_result(world: &mut World) -> ScenarioResult {
    let structures = world
        .query::<(&Structure, &Transform)>()
        .iter(world)
        .map(|(s, t)| (s.prototype.clone(), t.translation.truncate()))
        .collect();

    let state = world.resource::<ScenarioState>();
    let actor = state.actor;
    let steps_fired = state.next_step;
    let random_seed = state.config.random_seed;

    let (queued_charges, has_buff) = actor
        .and_then(|a| world.get::<QuirkState>(a))
        .map(|q| (Some(q.queued_charges), Some(q.has_buff)))
        .unwrap_or((None, None));
    let actor_health = actor
        .and_then(|a| world.get::<Health>(a))
        .map(|h| h.current);

    ScenarioResult {
        elapsed_secs: world.resource::<Time>().elapsed_secs(),
        steps_fired,
        structures,
        queued_charges,
        has_buff,
        actor_health,
        diagnostics: world.resource::<QuirkLog>().diagnostics().len(),
        random_seed,
    }
}

/// Run a scenario to completion and return its result.
///
/// The quirk log is written to `output` (or the scenario's `output_path`) when one is given.
pub fn run_scenario(
    config: ScenarioConfig,
    quirk: QuirkConfigFile,
    output: Option<&str>,
) -> Result<ScenarioResult, String> {
    config.validate()?;
    let output_path = output.map(str::to_string).or(config.output_path.clone());
    let mut app = build_scenario_app(config, quirk);

    // The first update runs at t = 0 so steps scheduled at 0s fire on time
    loop {
        app.update();
        if app.world().resource::<ScenarioState>().complete {
            break;
        }
        app.world_mut().resource_mut::<Time>().advance_by(TICK);
    }

    let result = collect_result(app.world_mut());

    if let Some(path) = output_path {
        app.world().resource::<QuirkLog>().save_to_file(&path)?;
        println!("Scenario complete. Log saved to: {}", path);
    }

    Ok(result)
}
