pub use self::camera_action::CameraAction;
#[cfg(debug_assertions)]
pub use self::debug_action::DebugAction;
pub use self::light_action::LightAction;
pub use self::terrain_action::TerrainAction;

mod camera_action;
#[cfg(debug_assertions)]
mod debug_action;
mod light_action;
mod terrain_action;
