//! Height-field terrain built up by repeated random faulting, with the face
//! and vertex normals needed to light it.

pub use glam::Vec3;

pub use self::config::{Config, MAX_GRID_SIDE, MIN_GRID_SIDE};
pub use self::error::ConfigError;
pub use self::fault::{CircleFault, Fault, FaultKind, LineFault};
pub use self::height_field::HeightField;
pub use self::model::{ShadingMode, TerrainModel};
pub use self::normals::{compute_face_normals, compute_vertex_normals, NormalGrid};
pub use self::topography::{topographic_color, WIRE_OVERLAY_COLOR};

mod config;
mod error;
mod fault;
mod height_field;
mod model;
mod normals;
mod topography;
