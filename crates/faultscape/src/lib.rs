pub mod action;
pub mod camera;
#[cfg(debug_assertions)]
pub mod dev_tools;
pub mod light;
pub mod prompt;
pub mod settings;
pub mod simulation;
pub mod state;
pub mod terrain;
