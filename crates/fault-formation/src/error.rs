use derive_more::{Display, Error};

/// Reasons a [`Config`](crate::Config) cannot produce a terrain.
#[derive(Clone, PartialEq, Debug, Display, Error)]
pub enum ConfigError {
    #[display("terrain grid must be at least {min_side}x{min_side} cells, got {width}x{length}")]
    GridTooSmall {
        width: usize,
        length: usize,
        min_side: usize,
    },
    #[display("terrain grid must be at most {max_side}x{max_side} cells, got {width}x{length}")]
    GridTooLarge {
        width: usize,
        length: usize,
        max_side: usize,
    },
    #[display("height bounds must be finite with min < max, got [{min}, {max}]")]
    InvalidHeightBounds { min: f32, max: f32 },
    #[display("initial height {initial} is outside [{min}, {max}]")]
    InitialHeightOutOfBounds { initial: f32, min: f32, max: f32 },
    #[display("displacement must be positive and finite, got {displacement}")]
    InvalidDisplacement { displacement: f32 },
    #[display("circle radius range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidCircleRadius { min: f32, max: f32 },
}
