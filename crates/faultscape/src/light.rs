use bevy::prelude::*;
use bon::bon;
use fault_formation::Config;
use leafwing_input_manager::prelude::*;

use crate::action::{LightAction, TerrainAction};
use crate::simulation::{Simulation, SimulationTickSet, TerrainReset};
use crate::state::LightingState;
use crate::terrain::TerrainHandles;

pub const LIGHT_COLORS: [Color; 2] = [
    Color::srgb(0.804, 1.0, 0.98),
    Color::srgb(0.0, 1.0, 0.4),
];

pub const LIGHT_INTENSITY: f32 = 2_000_000_000.0;
pub const LIGHT_RANGE: f32 = 500.0;

/// Units a light moves per tick while its key is held.
pub const LIGHT_STEP: f32 = 2.0;

/// Index of one of the scene lights.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Component)]
pub struct TerrainLight(pub usize);

/// The light that the movement keys act on.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Resource)]
pub struct SelectedLight(pub usize);

#[derive(Bundle)]
pub struct TerrainLightBundle {
    light: TerrainLight,
    point_light_bundle: PointLightBundle,
}

pub struct TerrainLightPlugin;

#[bon]
impl TerrainLightBundle {
    #[builder]
    pub fn new(
        light: TerrainLight,
        position: Vec3,
        color: Color,
        intensity: Option<f32>,
        visibility: Option<Visibility>,
    ) -> Self {
        Self {
            light,
            point_light_bundle: PointLightBundle {
                point_light: PointLight {
                    color,
                    intensity: intensity.unwrap_or(LIGHT_INTENSITY),
                    range: LIGHT_RANGE,
                    ..Default::default()
                },
                transform: Transform::from_translation(position),
                visibility: visibility.unwrap_or_default(),
                ..Default::default()
            },
        }
    }
}

impl SelectedLight {
    pub fn next(self) -> Self {
        Self((self.0 + 1) % LIGHT_COLORS.len())
    }
}

impl Plugin for TerrainLightPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<LightAction>::default())
            .init_resource::<ActionState<LightAction>>()
            .insert_resource(LightAction::input_map())
            .init_state::<LightingState>()
            .init_resource::<SelectedLight>()
            .add_systems(Startup, spawn_lights)
            .add_systems(FixedUpdate, move_selected_light.before(SimulationTickSet))
            .add_systems(
                Update,
                (
                    handle_lighting_action,
                    select_light,
                    reset_lights,
                    apply_lighting.run_if(state_changed::<LightingState>),
                ),
            );
    }
}

/// Starting light positions, above opposite corners of the centered terrain.
pub fn default_light_positions(config: &Config) -> [Vec3; 2] {
    let half_width = config.width as f32 / 2.0;
    let half_length = config.length as f32 / 2.0;
    let height = config.max_height + 1.0;
    [
        Vec3::new(half_width, height, half_length),
        Vec3::new(-half_width, height, -half_length),
    ]
}

pub fn spawn_lights(mut commands: Commands, simulation: Res<Simulation>) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
    });

    for (index, (position, color)) in default_light_positions(simulation.config())
        .into_iter()
        .zip(LIGHT_COLORS)
        .enumerate()
    {
        commands.spawn(
            TerrainLightBundle::builder()
                .light(TerrainLight(index))
                .position(position)
                .color(color)
                .visibility(Visibility::Hidden)
                .build(),
        );
    }
}

pub fn handle_lighting_action(
    action_state: Res<ActionState<TerrainAction>>,
    lighting_state: Res<State<LightingState>>,
    mut next_lighting_state: ResMut<NextState<LightingState>>,
) {
    if action_state.just_pressed(&TerrainAction::ToggleLighting) {
        let lighting = lighting_state.get().toggled();
        info!(?lighting, "lighting toggled");
        next_lighting_state.set(lighting);
    }
}

/// Switches the terrain material between lit and unlit, and shows the
/// lights only while lighting is on.
pub fn apply_lighting(
    lighting_state: Res<State<LightingState>>,
    terrain_handles: Option<Res<TerrainHandles>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut light_query: Query<(&mut Visibility,), With<TerrainLight>>,
) {
    let lit = *lighting_state.get() == LightingState::Enabled;

    if let Some(terrain_handles) = terrain_handles {
        if let Some(material) = materials.get_mut(&terrain_handles.surface_material) {
            material.unlit = !lit;
        }
    }

    for (mut visibility,) in light_query.iter_mut() {
        *visibility = if lit {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub fn select_light(
    action_state: Res<ActionState<LightAction>>,
    mut selected_light: ResMut<SelectedLight>,
) {
    if action_state.just_pressed(&LightAction::SelectNextLight) {
        let next = selected_light.next();
        info!(light = next.0, "light selected");
        *selected_light = next;
    }
}

pub fn move_selected_light(
    action_state: Res<ActionState<LightAction>>,
    selected_light: Res<SelectedLight>,
    mut light_query: Query<(&TerrainLight, &mut Transform)>,
) {
    let mut offset = Vec3::ZERO;
    for (action, direction) in [
        (LightAction::MoveNorth, Vec3::NEG_Z),
        (LightAction::MoveSouth, Vec3::Z),
        (LightAction::MoveWest, Vec3::NEG_X),
        (LightAction::MoveEast, Vec3::X),
        (LightAction::Raise, Vec3::Y),
        (LightAction::Lower, Vec3::NEG_Y),
    ] {
        if action_state.pressed(&action) {
            offset += direction * LIGHT_STEP;
        }
    }
    if offset == Vec3::ZERO {
        return;
    }

    for (light, mut transform) in light_query.iter_mut() {
        if light.0 == selected_light.0 {
            transform.translation += offset;
        }
    }
}

pub fn reset_lights(
    mut terrain_reset_events: EventReader<TerrainReset>,
    simulation: Res<Simulation>,
    mut light_query: Query<(&TerrainLight, &mut Transform)>,
) {
    if terrain_reset_events.read().last().is_none() {
        return;
    }

    let positions = default_light_positions(simulation.config());
    for (light, mut transform) in light_query.iter_mut() {
        if let Some(&position) = positions.get(light.0) {
            transform.translation = position;
        }
    }
}
