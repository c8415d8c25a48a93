use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

use crate::action::CameraAction;
use crate::simulation::{SimulationTickSet, TerrainReset};

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 106.0, 79.3);
pub const DEFAULT_HEADING: f32 = 300.0;
pub const DEFAULT_TARGET_HEIGHT: f32 = -249.0;

/// Horizontal distance from the camera to its look-at target.
pub const TARGET_DISTANCE: f32 = 300.0;
/// Keyboard look only moves the target while it is within this height.
pub const LOOK_LIMIT: f32 = 300.0;

pub const MOVE_STEP: f32 = 2.0;
pub const LOOK_STEP: f32 = 10.0;
pub const TURN_STEP: f32 = 0.1;

/// A camera that moves along its line of sight and turns around the
/// vertical axis.
#[derive(Copy, Clone, PartialEq, Debug, Component)]
pub struct FlyCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Radians.
    pub heading: f32,
}

pub struct FlyCameraPlugin;

impl Default for FlyCamera {
    fn default() -> Self {
        let mut camera = Self {
            position: DEFAULT_POSITION,
            target: Vec3::new(0.0, DEFAULT_TARGET_HEIGHT, 0.0),
            heading: DEFAULT_HEADING,
        };
        camera.aim_at_heading();
        camera
    }
}

impl FlyCamera {
    /// Moves the camera `distance` units towards its target. The target
    /// stays put.
    pub fn advance(&mut self, distance: f32) {
        let direction = (self.target - self.position).normalize_or_zero();
        self.position += direction * distance;
    }

    /// Raises (or lowers, for negative `amount`) the look-at target, as long
    /// as it is still within [`LOOK_LIMIT`] in that direction.
    pub fn raise_target(&mut self, amount: f32) {
        if amount > 0.0 && self.target.y <= LOOK_LIMIT {
            self.target.y += amount;
        } else if amount < 0.0 && self.target.y >= -LOOK_LIMIT {
            self.target.y += amount;
        }
    }

    /// Turns the heading by `angle` radians, swinging the target around the
    /// camera position.
    pub fn turn(&mut self, angle: f32) {
        self.heading += angle;
        self.aim_at_heading();
    }

    /// Mouse drag, unclamped.
    pub fn drag(&mut self, amount: f32) {
        self.target.y += amount;
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, Vec3::Y)
    }

    fn aim_at_heading(&mut self) {
        let (sin, cos) = self.heading.sin_cos();
        self.target.x = TARGET_DISTANCE * cos + self.position.x;
        self.target.z = TARGET_DISTANCE * sin + self.position.z;
    }
}

impl Plugin for FlyCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<CameraAction>::default())
            .init_resource::<ActionState<CameraAction>>()
            .insert_resource(CameraAction::input_map())
            .add_systems(Startup, spawn_camera)
            .add_systems(FixedUpdate, steer_camera.before(SimulationTickSet))
            .add_systems(Update, (drag_camera, reset_camera, sync_camera_transform).chain());
    }
}

pub fn spawn_camera(mut commands: Commands) {
    let camera = FlyCamera::default();
    commands.spawn((
        Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: 60_f32.to_radians(),
                near: 1.0,
                far: 500.0,
                ..Default::default()
            }),
            transform: camera.transform(),
            ..Default::default()
        },
        camera,
    ));
}

pub fn steer_camera(
    action_state: Res<ActionState<CameraAction>>,
    mut camera_query: Query<(&mut FlyCamera,)>,
) {
    let (mut camera,) = camera_query.get_single_mut().unwrap();

    let mut steered = *camera;
    if action_state.pressed(&CameraAction::Forward) {
        steered.advance(MOVE_STEP);
    }
    if action_state.pressed(&CameraAction::Backward) {
        steered.advance(-MOVE_STEP);
    }
    if action_state.pressed(&CameraAction::LookUp) {
        steered.raise_target(LOOK_STEP);
    }
    if action_state.pressed(&CameraAction::LookDown) {
        steered.raise_target(-LOOK_STEP);
    }
    if action_state.pressed(&CameraAction::TurnLeft) {
        steered.turn(-TURN_STEP);
    }
    if action_state.pressed(&CameraAction::TurnRight) {
        steered.turn(TURN_STEP);
    }

    camera.set_if_neq(steered);
}

/// Vertical drag distance in window pixels across `cursor_ys`, positive when
/// the cursor moves up. `last_y` carries the previous position between
/// frames.
pub fn cursor_drag(last_y: &mut Option<f32>, cursor_ys: impl IntoIterator<Item = f32>) -> f32 {
    let mut drag = 0.0;
    for y in cursor_ys {
        // Window y grows downwards.
        if let Some(last) = *last_y {
            drag += last - y;
        }
        *last_y = Some(y);
    }
    drag
}

pub fn drag_camera(
    action_state: Res<ActionState<CameraAction>>,
    mut cursor_moved_events: EventReader<CursorMoved>,
    mut last_cursor_y: Local<Option<f32>>,
    mut camera_query: Query<(&mut FlyCamera,)>,
) {
    let cursor_ys = cursor_moved_events
        .read()
        .map(|cursor_moved| cursor_moved.position.y);
    let drag = cursor_drag(&mut last_cursor_y, cursor_ys);
    if !action_state.pressed(&CameraAction::Drag) || drag == 0.0 {
        return;
    }

    let (mut camera,) = camera_query.get_single_mut().unwrap();
    camera.drag(drag);
}

pub fn reset_camera(
    mut terrain_reset_events: EventReader<TerrainReset>,
    mut camera_query: Query<(&mut FlyCamera,)>,
) {
    if terrain_reset_events.read().last().is_none() {
        return;
    }

    let (mut camera,) = camera_query.get_single_mut().unwrap();
    *camera = FlyCamera::default();
}

pub fn sync_camera_transform(
    mut camera_query: Query<(&FlyCamera, &mut Transform), Changed<FlyCamera>>,
) {
    for (camera, mut transform) in camera_query.iter_mut() {
        *transform = camera.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn default_target_follows_heading() {
        let camera = FlyCamera::default();
        assert_eq!(camera.position, DEFAULT_POSITION);
        assert!((camera.target.x - 300.0 * 300_f32.cos()).abs() < EPSILON);
        assert!((camera.target.z - (300.0 * 300_f32.sin() + 79.3)).abs() < EPSILON);
        assert_eq!(camera.target.y, DEFAULT_TARGET_HEIGHT);
    }

    #[test]
    fn advance_moves_towards_target() {
        let mut camera = FlyCamera::default();
        let before = camera.position.distance(camera.target);
        camera.advance(MOVE_STEP);
        let after = camera.position.distance(camera.target);
        assert!((before - after - MOVE_STEP).abs() < EPSILON);

        camera.advance(-MOVE_STEP);
        assert!((camera.position - DEFAULT_POSITION).length() < EPSILON);
    }

    #[test]
    fn keyboard_look_stops_past_the_limit() {
        let mut camera = FlyCamera::default();
        for _ in 0..100 {
            camera.raise_target(LOOK_STEP);
        }
        assert_eq!(camera.target.y, 301.0);

        for _ in 0..100 {
            camera.raise_target(-LOOK_STEP);
        }
        assert_eq!(camera.target.y, -309.0);
    }

    #[test]
    fn drag_is_not_limited() {
        let mut camera = FlyCamera::default();
        camera.drag(1000.0);
        assert_eq!(camera.target.y, DEFAULT_TARGET_HEIGHT + 1000.0);
    }

    #[test]
    fn cursor_drag_follows_window_pixels() {
        let mut last_y = None;
        assert_eq!(cursor_drag(&mut last_y, [400.0]), 0.0);
        assert_eq!(cursor_drag(&mut last_y, [390.0, 370.0]), 30.0);
        assert_eq!(cursor_drag(&mut last_y, [385.0]), -15.0);
        assert_eq!(cursor_drag(&mut last_y, Vec::new()), 0.0);
        assert_eq!(last_y, Some(385.0));
    }

    #[test]
    fn turn_keeps_target_distance() {
        let mut camera = FlyCamera::default();
        camera.turn(TURN_STEP);
        assert!((camera.heading - (DEFAULT_HEADING + TURN_STEP)).abs() < EPSILON);

        let horizontal = (camera.target - camera.position).with_y(0.0).length();
        assert!((horizontal - TARGET_DISTANCE).abs() < EPSILON);
    }

    #[test]
    fn reset_event_restores_defaults() {
        let mut app = App::new();
        app.add_event::<TerrainReset>()
            .add_systems(Update, reset_camera);
        let mut camera = FlyCamera::default();
        camera.advance(40.0);
        camera.turn(1.0);
        let entity = app.world_mut().spawn(camera).id();

        app.world_mut().send_event(TerrainReset);
        app.update();

        assert_eq!(
            app.world().get::<FlyCamera>(entity),
            Some(&FlyCamera::default())
        );
    }
}
