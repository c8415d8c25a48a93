/// Color of the quad outlines when they are drawn over filled polygons.
pub const WIRE_OVERLAY_COLOR: [f32; 3] = [1.0, 0.0, 1.0];

const BANDS: [(f32, [f32; 3]); 4] = [
    (0.2, [0.0, 0.7, 0.0]),
    (0.4, [1.0, 0.8, 0.0]),
    (0.6, [1.0, 0.6, 0.0]),
    (0.8, [1.0, 0.0, 0.0]),
];

const SUMMIT: [f32; 3] = [0.5, 0.5, 0.5];

/// Height-banded "topographic map" color: green lowlands through yellow,
/// orange and red to grey summits.
pub fn topographic_color(height: f32, max_height: f32) -> [f32; 3] {
    BANDS
        .iter()
        .find(|(fraction, _color)| height < max_height * fraction)
        .map_or(SUMMIT, |&(_fraction, color)| color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_follow_elevation() {
        assert_eq!(topographic_color(0.5, 50.0), [0.0, 0.7, 0.0]);
        assert_eq!(topographic_color(10.0, 50.0), [1.0, 0.8, 0.0]);
        assert_eq!(topographic_color(25.0, 50.0), [1.0, 0.6, 0.0]);
        assert_eq!(topographic_color(39.9, 50.0), [1.0, 0.0, 0.0]);
        assert_eq!(topographic_color(40.0, 50.0), SUMMIT);
        assert_eq!(topographic_color(50.0, 50.0), SUMMIT);
    }
}
