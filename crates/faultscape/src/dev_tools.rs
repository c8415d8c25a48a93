use bevy::color::palettes;
use bevy::prelude::*;
use fault_formation::ShadingMode;
use itertools::iproduct;
use leafwing_input_manager::common_conditions::action_toggle_active;
use leafwing_input_manager::prelude::*;

use crate::action::DebugAction;
use crate::simulation::Simulation;
use crate::terrain::{grid_to_world, TerrainAngle};

const NORMAL_GIZMO_LENGTH: f32 = 1.5;

pub struct NormalGizmoPlugin;

impl Plugin for NormalGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DebugAction>::default())
            .init_resource::<ActionState<DebugAction>>()
            .insert_resource(DebugAction::input_map())
            .add_systems(
                Update,
                draw_normal_gizmos
                    .run_if(action_toggle_active(false, DebugAction::ShowVertexNormals)),
            );
    }
}

/// Draws the normals the surface is currently lit with: vertex normals in
/// smooth mode, face normals from the quad centers in flat mode.
fn draw_normal_gizmos(
    simulation: Res<Simulation>,
    terrain_angle: Res<TerrainAngle>,
    mut gizmos: Gizmos,
) {
    let rotation = terrain_angle.rotation();
    let heights = simulation.heights();

    match simulation.shading() {
        ShadingMode::Smooth => {
            let normals = simulation.vertex_normals();
            for (z, x) in iproduct!(0..normals.length(), 0..normals.width()) {
                let normal = Vec3::from_array(normals.get(z, x).to_array());
                if normal == Vec3::ZERO {
                    continue;
                }
                let start = rotation * grid_to_world(heights, z, x, heights.get(z, x));
                let end = start + rotation * normal * NORMAL_GIZMO_LENGTH;
                gizmos.line(start, end, palettes::css::AQUA);
            }
        },
        ShadingMode::Flat => {
            let normals = simulation.face_normals();
            for (z, x) in iproduct!(0..normals.length(), 0..normals.width()) {
                let normal = Vec3::from_array(normals.get(z, x).to_array());
                let corners = [(z, x), (z + 1, x), (z + 1, x + 1), (z, x + 1)]
                    .map(|(z, x)| grid_to_world(heights, z, x, heights.get(z, x)));
                let center = corners.into_iter().sum::<Vec3>() / 4.0;
                let start = rotation * center;
                let end = start + rotation * normal * NORMAL_GIZMO_LENGTH;
                gizmos.line(start, end, palettes::css::ORANGE);
            }
        },
    }
}
