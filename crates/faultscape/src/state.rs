pub use self::faulting_state::FaultingState;
pub use self::lighting_state::LightingState;
pub use self::polygon_mode::PolygonMode;

mod faulting_state;
mod lighting_state;
mod polygon_mode;
