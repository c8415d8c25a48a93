use glam::Vec3;
use itertools::iproduct;

use crate::height_field::HeightField;

/// Row-major grid of normals, indexed by `(z, x)`. Starts out zeroed.
#[derive(Clone, PartialEq, Debug)]
pub struct NormalGrid {
    width: usize,
    length: usize,
    normals: Vec<Vec3>,
}

impl NormalGrid {
    pub fn new(width: usize, length: usize) -> Self {
        Self {
            width,
            length,
            normals: vec![Vec3::ZERO; width * length],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn get(&self, z: usize, x: usize) -> Vec3 {
        self.normals[z * self.width + x]
    }

    fn set(&mut self, z: usize, x: usize, normal: Vec3) {
        self.normals[z * self.width + x] = normal;
    }
}

/// The four corners of the quad whose first corner is `(z, x)`, in
/// counter-clockwise order seen from above.
pub(crate) fn quad_corners(field: &HeightField, z: usize, x: usize) -> [Vec3; 4] {
    let (zf, xf) = (z as f32, x as f32);
    [
        Vec3::new(xf, field.get(z, x), zf),
        Vec3::new(xf, field.get(z + 1, x), zf + 1.0),
        Vec3::new(xf + 1.0, field.get(z + 1, x + 1), zf + 1.0),
        Vec3::new(xf + 1.0, field.get(z, x + 1), zf),
    ]
}

/// Computes one normal per quad into `faces`, which must be one cell smaller
/// than `field` in both directions.
///
/// The normal is the average of the cross products of consecutive corners
/// (Newell's method), so it stays well defined for non-planar quads.
pub fn compute_face_normals(field: &HeightField, faces: &mut NormalGrid) {
    debug_assert_eq!(faces.width() + 1, field.width());
    debug_assert_eq!(faces.length() + 1, field.length());

    for (z, x) in iproduct!(0..faces.length(), 0..faces.width()) {
        let quad = quad_corners(field, z, x);
        let sum = (0..4)
            .map(|i| quad[i].cross(quad[(i + 1) % 4]))
            .fold(Vec3::ZERO, |acc, v| acc + v);
        faces.set(z, x, (sum / 4.0).normalize_or_zero());
    }
}

/// Computes a normal for every interior vertex from its four surrounding
/// faces. The outer ring of `vertices` is left untouched.
pub fn compute_vertex_normals(faces: &NormalGrid, vertices: &mut NormalGrid) {
    debug_assert_eq!(faces.width() + 1, vertices.width());
    debug_assert_eq!(faces.length() + 1, vertices.length());

    let interior_z = 1..vertices.length().saturating_sub(1);
    let interior_x = 1..vertices.width().saturating_sub(1);
    for (z, x) in iproduct!(interior_z, interior_x) {
        let sum = faces.get(z - 1, x - 1)
            + faces.get(z, x - 1)
            + faces.get(z, x)
            + faces.get(z - 1, x);
        vertices.set(z, x, (sum / 4.0).normalize_or_zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn ramp(width: usize, length: usize) -> HeightField {
        let mut field = HeightField::new(width, length, 0.0);
        field.for_each_mut(|_z, x, h| *h = x as f32);
        field
    }

    #[test]
    fn flat_quads_point_up() {
        let field = HeightField::new(3, 3, 0.5);
        let mut faces = NormalGrid::new(2, 2);
        compute_face_normals(&field, &mut faces);
        for (z, x) in iproduct!(0..2, 0..2) {
            assert!((faces.get(z, x) - Vec3::Y).length() < EPSILON);
        }
    }

    #[test]
    fn sloped_quad_leans_downhill() {
        // Height rises by one per column, a 45 degree slope along +x.
        let field = ramp(2, 2);
        let mut faces = NormalGrid::new(1, 1);
        compute_face_normals(&field, &mut faces);
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((faces.get(0, 0) - expected).length() < EPSILON);
    }

    #[test]
    fn face_normal_ignores_grid_position() {
        let field = ramp(6, 6);
        let mut faces = NormalGrid::new(5, 5);
        compute_face_normals(&field, &mut faces);
        assert!((faces.get(0, 0) - faces.get(4, 3)).length() < EPSILON);
    }

    #[test]
    fn vertex_normals_skip_the_perimeter() {
        let mut field = HeightField::new(5, 4, 0.0);
        field.set(2, 2, 3.0);
        let mut faces = NormalGrid::new(4, 3);
        let mut vertices = NormalGrid::new(5, 4);
        compute_face_normals(&field, &mut faces);
        compute_vertex_normals(&faces, &mut vertices);

        for (z, x) in iproduct!(0..4, 0..5) {
            let normal = vertices.get(z, x);
            if z == 0 || x == 0 || z == 3 || x == 4 {
                assert_eq!(normal, Vec3::ZERO, "({z}, {x})");
            } else {
                assert!((normal.length() - 1.0).abs() < EPSILON, "({z}, {x})");
            }
        }
    }

    #[test]
    fn peak_vertex_points_straight_up() {
        let mut field = HeightField::new(3, 3, 0.0);
        field.set(1, 1, 2.0);
        let mut faces = NormalGrid::new(2, 2);
        let mut vertices = NormalGrid::new(3, 3);
        compute_face_normals(&field, &mut faces);
        compute_vertex_normals(&faces, &mut vertices);
        assert!((vertices.get(1, 1) - Vec3::Y).length() < EPSILON);
    }
}
