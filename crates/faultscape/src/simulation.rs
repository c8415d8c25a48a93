use std::time::Duration;

use bevy::prelude::*;
use fault_formation::{ConfigError, TerrainModel};
use leafwing_input_manager::prelude::*;

use crate::action::TerrainAction;
use crate::state::FaultingState;

/// Period of the simulation tick.
pub const TICK: Duration = Duration::from_millis(16);

pub const SMALL_FAULT_BATCH: usize = 100;
pub const LARGE_FAULT_BATCH: usize = 800;
pub const HUGE_FAULT_BATCH: usize = 2000;

#[derive(Deref, DerefMut, Resource)]
pub struct Simulation(pub TerrainModel);

/// Number of faults applied before the first frame.
#[derive(Debug, Resource)]
pub struct InitialFaults(pub usize);

/// Sent when the terrain is flattened, so that the camera and lights can
/// return to their starting places too.
#[derive(Copy, Clone, Debug, Event)]
pub struct TerrainReset;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, SystemSet)]
pub struct SimulationTickSet;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, SystemSet)]
pub struct SimulationCommandSet;

pub struct SimulationPlugin;

impl Simulation {
    pub fn new(config: fault_formation::Config) -> Result<Self, ConfigError> {
        TerrainModel::new(config).map(Self)
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<TerrainAction>::default())
            .init_resource::<ActionState<TerrainAction>>()
            .insert_resource(TerrainAction::input_map())
            .insert_resource(Time::<Fixed>::from_duration(TICK))
            .init_state::<FaultingState>()
            .add_event::<TerrainReset>()
            .add_systems(Startup, apply_initial_faults)
            .add_systems(
                FixedUpdate,
                (
                    refresh_normals,
                    fault_continuously.run_if(in_state(FaultingState::Continuous)),
                )
                    .chain()
                    .in_set(SimulationTickSet),
            )
            .add_systems(
                Update,
                (handle_fault_actions, handle_normal_actions).in_set(SimulationCommandSet),
            );
    }
}

pub fn apply_initial_faults(
    mut simulation: ResMut<Simulation>,
    initial_faults: Option<Res<InitialFaults>>,
) {
    info!(
        seed = simulation.seed(),
        config = ?simulation.config(),
        "terrain simulation"
    );

    let Some(initial_faults) = initial_faults else {
        return;
    };
    if initial_faults.0 > 0 {
        info!(times = initial_faults.0, "applying initial faults");
        simulation.fault(initial_faults.0);
    }
}

/// Brings the normal caches up to date once per tick.
pub fn refresh_normals(mut simulation: ResMut<Simulation>) {
    simulation.refresh_normals();
}

pub fn fault_continuously(mut simulation: ResMut<Simulation>) {
    simulation.fault(1);
}

/// Handles fault batches, continuous faulting, fault kind and reset.
pub fn handle_fault_actions(
    action_state: Res<ActionState<TerrainAction>>,
    mut simulation: ResMut<Simulation>,
    faulting_state: Res<State<FaultingState>>,
    mut next_faulting_state: ResMut<NextState<FaultingState>>,
    mut terrain_reset_events: EventWriter<TerrainReset>,
) {
    for (action, times) in [
        (TerrainAction::FaultSmallBatch, SMALL_FAULT_BATCH),
        (TerrainAction::FaultLargeBatch, LARGE_FAULT_BATCH),
        (TerrainAction::FaultHugeBatch, HUGE_FAULT_BATCH),
    ] {
        if action_state.just_pressed(&action) {
            info!(times, kind = %simulation.fault_kind(), "faulting terrain");
            simulation.fault(times);
        }
    }

    if action_state.just_pressed(&TerrainAction::ToggleContinuousFaulting) {
        let faulting = faulting_state.get().toggled();
        info!(?faulting, "continuous faulting toggled");
        next_faulting_state.set(faulting);
    }

    if action_state.just_pressed(&TerrainAction::ToggleFaultKind) {
        let fault_kind = simulation.fault_kind().toggled();
        info!(%fault_kind, "fault kind switched");
        simulation.set_fault_kind(fault_kind);
    }

    if action_state.just_pressed(&TerrainAction::Reset) {
        simulation.reset();
        terrain_reset_events.send(TerrainReset);
    }
}

/// Handles the shading toggle and forced normal regeneration.
pub fn handle_normal_actions(
    action_state: Res<ActionState<TerrainAction>>,
    mut simulation: ResMut<Simulation>,
) {
    if action_state.just_pressed(&TerrainAction::ToggleShading) {
        let shading = simulation.shading().toggled();
        info!(%shading, "shading switched");
        simulation.set_shading(shading);
    }

    if action_state.just_pressed(&TerrainAction::RegenerateNormals) {
        debug!("regenerating normals");
        simulation.invalidate_normals();
    }
}
