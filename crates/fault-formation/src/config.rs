use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fault::FaultKind;
use crate::model::ShadingMode;

/// Smallest grid side that still has two cells for a fault line to split.
pub const MIN_GRID_SIDE: usize = 2;

/// Largest grid side. Keeps the cell count and the mesh built from it
/// within memory and `u32` vertex indices.
pub const MAX_GRID_SIDE: usize = 1024;

#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Number of grid columns (x axis).
    pub width: usize,

    /// Number of grid rows (z axis).
    pub length: usize,

    /// Height added to (or removed from) a cell by a single fault.
    pub displacement: f32,

    /// Lowest elevation a cell can be pushed down to.
    pub min_height: f32,

    /// Highest elevation a cell can be pushed up to.
    pub max_height: f32,

    /// Elevation of every cell on creation and after a reset.
    pub initial_height: f32,

    /// Which displacement operation faulting applies.
    pub fault_kind: FaultKind,

    /// Shading model the normals are first computed for.
    pub shading: ShadingMode,

    /// (circle faults) Smallest radius of a bump, in cells.
    pub circle_radius_min: f32,

    /// (circle faults) Largest radius of a bump, in cells.
    pub circle_radius_max: f32,

    /// Seed of the fault generator. A fresh seed is drawn when unset.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 200,
            length: 200,
            displacement: 0.5,
            min_height: 0.0,
            max_height: 50.0,
            initial_height: 0.5,
            fault_kind: FaultKind::Line,
            shading: ShadingMode::Flat,
            circle_radius_min: 5.0,
            circle_radius_max: 30.0,
            seed: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID_SIDE || self.length < MIN_GRID_SIDE {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                length: self.length,
                min_side: MIN_GRID_SIDE,
            });
        }
        if self.width > MAX_GRID_SIDE || self.length > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                length: self.length,
                max_side: MAX_GRID_SIDE,
            });
        }
        if !self.min_height.is_finite()
            || !self.max_height.is_finite()
            || self.min_height >= self.max_height
        {
            return Err(ConfigError::InvalidHeightBounds {
                min: self.min_height,
                max: self.max_height,
            });
        }
        if !(self.min_height..=self.max_height).contains(&self.initial_height) {
            return Err(ConfigError::InitialHeightOutOfBounds {
                initial: self.initial_height,
                min: self.min_height,
                max: self.max_height,
            });
        }
        if !self.displacement.is_finite() || self.displacement <= 0.0 {
            return Err(ConfigError::InvalidDisplacement {
                displacement: self.displacement,
            });
        }
        if !self.circle_radius_min.is_finite()
            || !self.circle_radius_max.is_finite()
            || self.circle_radius_min <= 0.0
            || self.circle_radius_min > self.circle_radius_max
        {
            return Err(ConfigError::InvalidCircleRadius {
                min: self.circle_radius_min,
                max: self.circle_radius_max,
            });
        }
        Ok(())
    }
}
