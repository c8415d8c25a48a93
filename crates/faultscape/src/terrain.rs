use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;
use fault_formation::{
    topographic_color, HeightField, ShadingMode, TerrainModel, WIRE_OVERLAY_COLOR,
};
use itertools::iproduct;
use leafwing_input_manager::prelude::*;

use crate::action::TerrainAction;
use crate::simulation::{apply_initial_faults, Simulation, SimulationCommandSet, TerrainReset};
use crate::state::PolygonMode;

/// Degrees the terrain turns per rotate key press.
pub const ROTATION_STEP: u16 = 10;

/// Largest terrain angle before wrapping back to zero.
pub const MAX_ANGLE: u16 = 350;

/// Lifts the outline slightly above the surface so both can be drawn.
const WIRE_LIFT: f32 = 0.05;

// Corners of a quad as `(dz, dx)`, counter-clockwise seen from above.
const QUAD_CORNERS: [(usize, usize); 4] = [(0, 0), (1, 0), (1, 1), (0, 1)];

const QUAD_TRIANGLES: [u32; 6] = [0, 1, 2, 0, 2, 3];

#[derive(Component)]
pub struct TerrainSurface;

#[derive(Component)]
pub struct TerrainWire;

#[derive(Resource)]
pub struct TerrainHandles {
    pub surface_mesh: Handle<Mesh>,
    pub wire_mesh: Handle<Mesh>,
    pub surface_material: Handle<StandardMaterial>,
}

/// Rotation of the terrain around the vertical axis, in degrees.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Resource)]
pub struct TerrainAngle(pub u16);

pub struct TerrainPlugin;

impl TerrainAngle {
    pub fn turned_left(self) -> Self {
        if self.0 >= MAX_ANGLE {
            Self(0)
        } else {
            Self(self.0 + ROTATION_STEP)
        }
    }

    pub fn turned_right(self) -> Self {
        if self.0 == 0 {
            Self(MAX_ANGLE)
        } else {
            Self(self.0 - ROTATION_STEP)
        }
    }

    pub fn rotation(self) -> Quat {
        Quat::from_rotation_y(f32::from(self.0).to_radians())
    }
}

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PolygonMode>()
            .init_resource::<TerrainAngle>()
            .add_systems(Startup, spawn_terrain.after(apply_initial_faults))
            .add_systems(
                Update,
                (
                    handle_polygon_mode_action,
                    handle_rotation_actions,
                    reset_terrain_angle,
                    apply_polygon_mode.run_if(state_changed::<PolygonMode>),
                    apply_terrain_angle.run_if(resource_changed::<TerrainAngle>),
                ),
            )
            .add_systems(Update, sync_terrain_meshes.after(SimulationCommandSet));
    }
}

/// Maps a height field cell to its position in the world, with the terrain
/// centered on the origin.
pub fn grid_to_world(field: &HeightField, z: usize, x: usize, height: f32) -> Vec3 {
    let half_width = (field.width() - 1) as f32 / 2.0;
    let half_length = (field.length() - 1) as f32 / 2.0;
    Vec3::new(x as f32 - half_width, height, z as f32 - half_length)
}

/// Builds the filled surface: one quad of four vertices per cell, colored by
/// elevation and lit according to the shading mode.
///
/// In smooth mode the outer ring of vertices has no averaged normal, so
/// those corners fall back to their face normal.
pub fn build_surface_mesh(model: &TerrainModel) -> Mesh {
    let heights = model.heights();
    let faces = model.face_normals();
    let vertex_normals = model.vertex_normals();
    let max_height = model.config().max_height;

    let quads = faces.width() * faces.length();
    let mut positions = Vec::with_capacity(quads * 4);
    let mut normals = Vec::with_capacity(quads * 4);
    let mut colors = Vec::with_capacity(quads * 4);
    let mut indices = Vec::with_capacity(quads * QUAD_TRIANGLES.len());

    for (z, x) in iproduct!(0..faces.length(), 0..faces.width()) {
        let face_normal = faces.get(z, x);
        let first = u32::try_from(positions.len()).expect("terrain mesh should fit u32 indices");

        for (dz, dx) in QUAD_CORNERS {
            let (corner_z, corner_x) = (z + dz, x + dx);
            let height = heights.get(corner_z, corner_x);
            let normal = match model.shading() {
                ShadingMode::Flat => face_normal,
                ShadingMode::Smooth => {
                    let vertex_normal = vertex_normals.get(corner_z, corner_x);
                    if vertex_normal.length_squared() > 0.0 {
                        vertex_normal
                    } else {
                        face_normal
                    }
                },
            };
            let [r, g, b] = topographic_color(height, max_height);

            positions.push(grid_to_world(heights, corner_z, corner_x, height).to_array());
            normals.push(normal.to_array());
            colors.push([r, g, b, 1.0]);
        }

        indices.extend(QUAD_TRIANGLES.map(|i| first + i));
    }

    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

/// Builds the quad outlines as a line list. With `overlay` set the lines
/// are drawn in a single highlight color, otherwise they take the
/// elevation colors.
pub fn build_wire_mesh(model: &TerrainModel, overlay: bool) -> Mesh {
    let heights = model.heights();
    let (width, length) = (heights.width(), heights.length());
    let max_height = model.config().max_height;

    let mut positions = Vec::with_capacity(width * length);
    let mut colors = Vec::with_capacity(width * length);
    for (z, x) in iproduct!(0..length, 0..width) {
        let height = heights.get(z, x);
        let [r, g, b] = if overlay {
            WIRE_OVERLAY_COLOR
        } else {
            topographic_color(height, max_height)
        };
        positions.push(grid_to_world(heights, z, x, height + WIRE_LIFT).to_array());
        colors.push([r, g, b, 1.0]);
    }
    let normals = vec![[0.0, 1.0, 0.0]; positions.len()];

    let vertex = |z: usize, x: usize| {
        u32::try_from(z * width + x).expect("terrain mesh should fit u32 indices")
    };
    let mut indices = Vec::with_capacity(4 * width * length);
    for (z, x) in iproduct!(0..length, 0..width) {
        if x + 1 < width {
            indices.extend([vertex(z, x), vertex(z, x + 1)]);
        }
        if z + 1 < length {
            indices.extend([vertex(z, x), vertex(z + 1, x)]);
        }
    }

    Mesh::new(PrimitiveTopology::LineList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors)
        .with_inserted_indices(Indices::U32(indices))
}

pub fn spawn_terrain(
    mut commands: Commands,
    simulation: Res<Simulation>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let surface_mesh = meshes.add(build_surface_mesh(&simulation));
    let wire_mesh = meshes.add(build_wire_mesh(&simulation, false));
    let surface_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.6,
        reflectance: 0.4,
        unlit: true,
        ..Default::default()
    });
    let wire_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..Default::default()
    });

    commands.spawn((
        PbrBundle {
            mesh: surface_mesh.clone(),
            material: surface_material.clone(),
            ..Default::default()
        },
        TerrainSurface,
    ));
    commands.spawn((
        PbrBundle {
            mesh: wire_mesh.clone(),
            material: wire_material,
            visibility: Visibility::Hidden,
            ..Default::default()
        },
        TerrainWire,
    ));

    commands.insert_resource(TerrainHandles {
        surface_mesh,
        wire_mesh,
        surface_material,
    });
}

/// Rebuilds the meshes whenever the simulation or the polygon mode has
/// moved on since the last rebuild. Normals left dirty by faults applied
/// since the last tick are brought up to date first.
pub fn sync_terrain_meshes(
    mut simulation: ResMut<Simulation>,
    polygon_mode: Res<State<PolygonMode>>,
    terrain_handles: Option<Res<TerrainHandles>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut synced: Local<Option<(u64, PolygonMode)>>,
) {
    let Some(terrain_handles) = terrain_handles else {
        return;
    };
    simulation.refresh_normals();

    let polygon_mode = *polygon_mode.get();
    let key = (simulation.revision(), polygon_mode);
    if *synced == Some(key) {
        return;
    }

    if polygon_mode.shows_surface() {
        if let Some(mesh) = meshes.get_mut(&terrain_handles.surface_mesh) {
            *mesh = build_surface_mesh(&simulation);
        }
    }
    if polygon_mode.shows_wire() {
        if let Some(mesh) = meshes.get_mut(&terrain_handles.wire_mesh) {
            *mesh = build_wire_mesh(&simulation, polygon_mode == PolygonMode::FilledWire);
        }
    }

    *synced = Some(key);
    debug!(revision = key.0, ?polygon_mode, "terrain meshes rebuilt");
}

pub fn handle_polygon_mode_action(
    action_state: Res<ActionState<TerrainAction>>,
    polygon_mode: Res<State<PolygonMode>>,
    mut next_polygon_mode: ResMut<NextState<PolygonMode>>,
) {
    if action_state.just_pressed(&TerrainAction::CyclePolygonMode) {
        let polygon_mode = polygon_mode.get().next();
        info!(?polygon_mode, "polygon mode switched");
        next_polygon_mode.set(polygon_mode);
    }
}

pub fn apply_polygon_mode(
    polygon_mode: Res<State<PolygonMode>>,
    mut surface_query: Query<(&mut Visibility,), (With<TerrainSurface>, Without<TerrainWire>)>,
    mut wire_query: Query<(&mut Visibility,), (With<TerrainWire>, Without<TerrainSurface>)>,
) {
    let visibility = |shown: bool| {
        if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        }
    };

    for (mut surface_visibility,) in surface_query.iter_mut() {
        *surface_visibility = visibility(polygon_mode.shows_surface());
    }
    for (mut wire_visibility,) in wire_query.iter_mut() {
        *wire_visibility = visibility(polygon_mode.shows_wire());
    }
}

pub fn handle_rotation_actions(
    action_state: Res<ActionState<TerrainAction>>,
    mut terrain_angle: ResMut<TerrainAngle>,
) {
    let mut angle = *terrain_angle;
    if action_state.just_pressed(&TerrainAction::RotateLeft) {
        angle = angle.turned_left();
    }
    if action_state.just_pressed(&TerrainAction::RotateRight) {
        angle = angle.turned_right();
    }
    terrain_angle.set_if_neq(angle);
}

pub fn reset_terrain_angle(
    mut terrain_reset_events: EventReader<TerrainReset>,
    mut terrain_angle: ResMut<TerrainAngle>,
) {
    if terrain_reset_events.read().last().is_some() {
        terrain_angle.set_if_neq(TerrainAngle::default());
    }
}

pub fn apply_terrain_angle(
    terrain_angle: Res<TerrainAngle>,
    mut terrain_query: Query<(&mut Transform,), Or<(With<TerrainSurface>, With<TerrainWire>)>>,
) {
    for (mut transform,) in terrain_query.iter_mut() {
        transform.rotation = terrain_angle.rotation();
    }
}
