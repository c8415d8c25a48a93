use std::f32::consts::PI;
use std::f64::consts::TAU;

use derive_more::Display;
use fastrand_contrib::RngExt as _;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::config::Config;
use crate::height_field::HeightField;

#[derive(
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Debug,
    Default,
    Display,
    Deserialize,
    Serialize,
    VariantArray,
)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Splits the grid with a straight line, raising one side and lowering
    /// the other.
    #[default]
    Line,
    /// Raises a smooth cosine bump inside a circle.
    Circle,
}

/// A straight fault line `a*z + b*x - c = 0`, with `z` and `x` measured from
/// the grid center.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct LineFault {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CircleFault {
    pub center_z: f32,
    pub center_x: f32,
    pub radius: f32,
}

/// One randomly sampled fault, ready to be applied to a height field.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Fault {
    Line(LineFault),
    Circle(CircleFault),
}

impl FaultKind {
    /// The other fault kind.
    pub fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Circle,
            Self::Circle => Self::Line,
        }
    }
}

impl LineFault {
    /// Draws a line that always crosses the grid, so that both of its sides
    /// hold at least one cell.
    pub fn sample(rng: &mut fastrand::Rng, width: usize, length: usize) -> Self {
        let angle = rng.f64() * TAU;
        let (a, b) = angle.sin_cos();
        // Largest value of `a*z + b*x` over the grid, reached at a corner.
        let reach = a.abs() * half_span(length) + b.abs() * half_span(width);
        let c = (rng.f64() * 2.0 - 1.0) * reach;
        Self { a, b, c }
    }

    /// Signed side of the line the cell at `(z, x)` lies on.
    pub fn side(&self, z: usize, x: usize, width: usize, length: usize) -> f64 {
        let dz = z as f64 - half_span(length);
        let dx = x as f64 - half_span(width);
        self.a * dz + self.b * dx - self.c
    }

    pub fn apply(&self, field: &mut HeightField, config: &Config) {
        let (width, length) = (field.width(), field.length());
        let step = config.displacement;
        field.for_each_mut(|z, x, height| {
            *height = if self.side(z, x, width, length) > 0.0 {
                (*height + step).min(config.max_height)
            } else {
                (*height - step).max(config.min_height)
            };
        });
    }
}

impl CircleFault {
    pub fn sample(rng: &mut fastrand::Rng, config: &Config) -> Self {
        Self {
            center_z: rng.usize(..config.length) as f32,
            center_x: rng.usize(..config.width) as f32,
            radius: rng.f32_range(config.circle_radius_min..=config.circle_radius_max),
        }
    }

    /// Height added at `(z, x)`, before clamping.
    pub fn bump(&self, z: usize, x: usize, displacement: f32) -> f32 {
        let distance = (z as f32 - self.center_z).hypot(x as f32 - self.center_x);
        if distance >= self.radius {
            return 0.0;
        }
        let ratio = 1.0 - distance / self.radius;
        displacement / 2.0 * (1.0 - (ratio * PI).cos())
    }

    pub fn apply(&self, field: &mut HeightField, config: &Config) {
        field.for_each_mut(|z, x, height| {
            let bump = self.bump(z, x, config.displacement);
            if bump > 0.0 {
                *height = (*height + bump).min(config.max_height);
            }
        });
    }
}

impl Fault {
    pub fn sample(kind: FaultKind, rng: &mut fastrand::Rng, config: &Config) -> Self {
        match kind {
            FaultKind::Line => Self::Line(LineFault::sample(rng, config.width, config.length)),
            FaultKind::Circle => Self::Circle(CircleFault::sample(rng, config)),
        }
    }

    pub fn apply(&self, field: &mut HeightField, config: &Config) {
        match self {
            Self::Line(line) => line.apply(field, config),
            Self::Circle(circle) => circle.apply(field, config),
        }
    }
}

fn half_span(cells: usize) -> f64 {
    (cells as f64 - 1.0) / 2.0
}
