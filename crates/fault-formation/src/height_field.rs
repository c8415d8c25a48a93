/// Row-major grid of elevations, indexed by `(z, x)`.
#[derive(Clone, PartialEq, Debug)]
pub struct HeightField {
    width: usize,
    length: usize,
    cells: Vec<f32>,
}

impl HeightField {
    pub fn new(width: usize, length: usize, initial_height: f32) -> Self {
        Self {
            width,
            length,
            cells: vec![initial_height; width * length],
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn get(&self, z: usize, x: usize) -> f32 {
        self.cells[self.index(z, x)]
    }

    pub fn set(&mut self, z: usize, x: usize, height: f32) {
        let i = self.index(z, x);
        self.cells[i] = height;
    }

    /// Overwrites every cell with `height`.
    pub fn fill(&mut self, height: f32) {
        self.cells.fill(height);
    }

    pub fn row(&self, z: usize) -> &[f32] {
        let start = z * self.width;
        &self.cells[start..start + self.width]
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Visits every cell along with its `(z, x)` position.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(usize, usize, &mut f32)) {
        let width = self.width;
        for (i, height) in self.cells.iter_mut().enumerate() {
            f(i / width, i % width, height);
        }
    }

    #[inline]
    fn index(&self, z: usize, x: usize) -> usize {
        debug_assert!(z < self.length && x < self.width, "({z}, {x}) out of bounds");
        z * self.width + x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_field_is_flat() {
        let field = HeightField::new(4, 3, 0.5);
        assert_eq!(field.width(), 4);
        assert_eq!(field.length(), 3);
        assert!(field.cells().iter().all(|&h| h == 0.5));
    }

    #[test]
    fn rows_are_width_long() {
        let mut field = HeightField::new(3, 2, 0.0);
        field.set(1, 2, 7.0);
        assert_eq!(field.row(0), &[0.0, 0.0, 0.0]);
        assert_eq!(field.row(1), &[0.0, 0.0, 7.0]);
        assert_eq!(field.get(1, 2), 7.0);
    }

    #[test]
    fn for_each_mut_reports_positions() {
        let mut field = HeightField::new(3, 2, 0.0);
        field.for_each_mut(|z, x, h| *h = (z * 10 + x) as f32);
        assert_eq!(field.get(0, 2), 2.0);
        assert_eq!(field.get(1, 0), 10.0);
        assert_eq!(field.get(1, 1), 11.0);
    }

    #[test]
    fn fill_overwrites_everything() {
        let mut field = HeightField::new(2, 2, 0.0);
        field.set(0, 1, 3.0);
        field.fill(0.5);
        assert!(field.cells().iter().all(|&h| h == 0.5));
    }
}
