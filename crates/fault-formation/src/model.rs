use derive_more::Display;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::config::Config;
use crate::error::ConfigError;
use crate::fault::{Fault, FaultKind};
use crate::height_field::HeightField;
use crate::normals::{compute_face_normals, compute_vertex_normals, NormalGrid};

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
pub enum ShadingMode {
    /// One normal per quad.
    #[default]
    Flat,
    /// One normal per vertex, averaged from the surrounding quads.
    Smooth,
}

/// The terrain simulation: the height field, its cached normals, and the
/// random source that drives faulting.
///
/// Normals are recomputed lazily. Anything that changes the heights marks
/// them dirty, and [`TerrainModel::refresh_normals`] brings them up to date.
/// Vertex normals are only ever computed while smooth shading is active.
#[derive(Debug)]
pub struct TerrainModel {
    config: Config,
    seed: u64,
    rng: fastrand::Rng,
    heights: HeightField,
    face_normals: NormalGrid,
    vertex_normals: NormalGrid,
    fault_kind: FaultKind,
    shading: ShadingMode,
    face_normals_dirty: bool,
    vertex_normals_dirty: bool,
    // Heights changed since the vertex normals were last computed.
    vertex_normals_stale: bool,
    revision: u64,
}

impl ShadingMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Smooth,
            Self::Smooth => Self::Flat,
        }
    }
}

impl TerrainModel {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        info!("terrain seed: {seed}");

        let (width, length) = (config.width, config.length);
        Ok(Self {
            seed,
            rng: fastrand::Rng::with_seed(seed),
            heights: HeightField::new(width, length, config.initial_height),
            face_normals: NormalGrid::new(width - 1, length - 1),
            vertex_normals: NormalGrid::new(width, length),
            fault_kind: config.fault_kind,
            shading: config.shading,
            face_normals_dirty: true,
            vertex_normals_dirty: config.shading == ShadingMode::Smooth,
            vertex_normals_stale: true,
            revision: 0,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn heights(&self) -> &HeightField {
        &self.heights
    }

    pub fn face_normals(&self) -> &NormalGrid {
        &self.face_normals
    }

    pub fn vertex_normals(&self) -> &NormalGrid {
        &self.vertex_normals
    }

    pub fn fault_kind(&self) -> FaultKind {
        self.fault_kind
    }

    pub fn set_fault_kind(&mut self, fault_kind: FaultKind) {
        self.fault_kind = fault_kind;
    }

    pub fn shading(&self) -> ShadingMode {
        self.shading
    }

    /// Bumped whenever heights, normals or shading change, so that consumers
    /// can tell when their copy of the surface is out of date.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies `times` faults of the current kind.
    pub fn fault(&mut self, times: usize) {
        self.fault_with(self.fault_kind, times);
    }

    /// Applies `times` faults of `kind`, each with freshly sampled
    /// parameters.
    pub fn fault_with(&mut self, kind: FaultKind, times: usize) {
        for _ in 0..times {
            let fault = Fault::sample(kind, &mut self.rng, &self.config);
            fault.apply(&mut self.heights, &self.config);
        }
        debug!("applied {times} {kind} faults");
        self.heights_changed();
    }

    /// Flattens the terrain back to its initial height.
    pub fn reset(&mut self) {
        self.heights.fill(self.config.initial_height);
        debug!("terrain reset to {}", self.config.initial_height);
        self.heights_changed();
    }

    pub fn set_shading(&mut self, shading: ShadingMode) {
        if shading == self.shading {
            return;
        }
        self.shading = shading;
        if shading == ShadingMode::Smooth && self.vertex_normals_stale {
            self.vertex_normals_dirty = true;
        }
        self.revision += 1;
    }

    /// Forces both normal grids to be recomputed on the next refresh.
    pub fn invalidate_normals(&mut self) {
        self.face_normals_dirty = true;
        self.vertex_normals_dirty = true;
        self.vertex_normals_stale = true;
    }

    /// Whether [`TerrainModel::refresh_normals`] has work to do.
    pub fn normals_dirty(&self) -> bool {
        self.face_normals_dirty || self.vertex_normals_pending()
    }

    pub fn face_normals_dirty(&self) -> bool {
        self.face_normals_dirty
    }

    pub fn vertex_normals_dirty(&self) -> bool {
        self.vertex_normals_dirty
    }

    /// Recomputes whichever normals are dirty. Returns `true` if anything
    /// was recomputed.
    pub fn refresh_normals(&mut self) -> bool {
        if !self.normals_dirty() {
            return false;
        }
        if self.face_normals_dirty {
            compute_face_normals(&self.heights, &mut self.face_normals);
            self.face_normals_dirty = false;
        }
        if self.vertex_normals_pending() {
            compute_vertex_normals(&self.face_normals, &mut self.vertex_normals);
            self.vertex_normals_dirty = false;
            self.vertex_normals_stale = false;
        }
        self.revision += 1;
        true
    }

    fn vertex_normals_pending(&self) -> bool {
        self.vertex_normals_dirty && self.shading == ShadingMode::Smooth
    }

    fn heights_changed(&mut self) {
        self.face_normals_dirty = true;
        self.vertex_normals_stale = true;
        if self.shading == ShadingMode::Smooth {
            self.vertex_normals_dirty = true;
        }
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use proptest::prelude::*;

    use super::*;

    const EPSILON: f32 = 1e-4;

    fn model(config: Config) -> TerrainModel {
        TerrainModel::new(Config {
            seed: Some(42),
            ..config
        })
        .unwrap()
    }

    fn small() -> Config {
        Config {
            width: 24,
            length: 18,
            ..Default::default()
        }
    }

    fn assert_within_bounds(model: &TerrainModel) {
        let config = model.config();
        for &height in model.heights().cells() {
            assert!(
                (config.min_height..=config.max_height).contains(&height),
                "{height} outside [{}, {}]",
                config.min_height,
                config.max_height
            );
        }
    }

    fn assert_interior_unit(model: &TerrainModel) {
        let normals = model.vertex_normals();
        for (z, x) in iproduct!(1..normals.length() - 1, 1..normals.width() - 1) {
            let length = normals.get(z, x).length();
            assert!((length - 1.0).abs() < EPSILON, "({z}, {x}) has length {length}");
        }
    }

    #[test]
    fn invalid_config_is_rejected() {
        let result = TerrainModel::new(Config {
            width: 0,
            ..Default::default()
        });
        assert!(matches!(result, Err(ConfigError::GridTooSmall { .. })));
    }

    #[test]
    fn starts_flat() {
        let model = model(small());
        assert!(model.heights().cells().iter().all(|&h| h == 0.5));
        assert!(model.face_normals_dirty());
    }

    #[test]
    fn many_faults_stay_within_documented_bounds() {
        for &kind in FaultKind::VARIANTS {
            let mut model = model(Config {
                width: 64,
                length: 64,
                ..Default::default()
            });
            model.fault_with(kind, 800);
            assert_within_bounds(&model);
        }
    }

    #[test]
    fn reset_restores_initial_height() {
        let mut model = model(small());
        model.fault_with(FaultKind::Line, 50);
        model.fault_with(FaultKind::Circle, 50);
        model.reset();
        assert!(model.heights().cells().iter().all(|&h| h == 0.5));
        assert!(model.face_normals_dirty());
    }

    #[test]
    fn zero_faults_leave_heights_unchanged() {
        let mut model = model(small());
        model.fault(10);
        let before = model.heights().clone();
        model.refresh_normals();
        model.fault(0);
        assert_eq!(model.heights(), &before);
        assert!(model.face_normals_dirty());
    }

    #[test]
    fn one_line_fault_moves_cells_both_ways() {
        let mut model = model(small());
        model.fault_with(FaultKind::Line, 1);
        let cells = model.heights().cells();
        assert!(cells.iter().any(|&h| h > 0.5));
        assert!(cells.iter().any(|&h| h < 0.5));
    }

    #[test]
    fn same_seed_same_terrain() {
        let mut a = model(small());
        let mut b = model(small());
        a.fault(300);
        b.fault(300);
        assert_eq!(a.heights(), b.heights());
    }

    #[test]
    fn flat_shading_never_computes_vertex_normals() {
        let mut model = model(small());
        model.fault(20);
        assert!(model.refresh_normals());
        assert!(!model.normals_dirty());
        assert_eq!(model.vertex_normals().get(1, 1), glam::Vec3::ZERO);

        let faces = model.face_normals();
        for (z, x) in iproduct!(0..faces.length(), 0..faces.width()) {
            assert!((faces.get(z, x).length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn switching_to_smooth_after_fault_computes_vertex_normals() {
        let mut model = model(small());
        model.fault(20);
        model.refresh_normals();
        assert!(!model.vertex_normals_dirty());

        model.set_shading(ShadingMode::Smooth);
        assert!(model.vertex_normals_dirty());
        assert!(model.normals_dirty());
        assert!(model.refresh_normals());
        assert!(!model.normals_dirty());
        assert_interior_unit(&model);
        assert_eq!(model.vertex_normals().get(0, 0), glam::Vec3::ZERO);
    }

    #[test]
    fn toggling_shading_without_faults_does_not_recompute() {
        let mut model = model(Config {
            shading: ShadingMode::Smooth,
            ..small()
        });
        model.fault(5);
        model.refresh_normals();
        model.set_shading(ShadingMode::Flat);
        model.set_shading(ShadingMode::Smooth);
        assert!(!model.normals_dirty());
        assert!(!model.refresh_normals());
    }

    #[test]
    fn faulting_while_smooth_refreshes_both_grids() {
        let mut model = model(Config {
            shading: ShadingMode::Smooth,
            ..small()
        });
        model.fault(30);
        assert!(model.face_normals_dirty());
        assert!(model.vertex_normals_dirty());
        model.refresh_normals();
        assert_interior_unit(&model);
    }

    #[test]
    fn invalidate_normals_forces_recomputation() {
        let mut model = model(small());
        model.refresh_normals();
        assert!(!model.normals_dirty());
        model.invalidate_normals();
        assert!(model.refresh_normals());
    }

    #[test]
    fn revision_tracks_visible_changes() {
        let mut model = model(small());
        let start = model.revision();
        model.fault(1);
        assert!(model.revision() > start);
        let after_fault = model.revision();
        model.refresh_normals();
        assert!(model.revision() > after_fault);
        let after_refresh = model.revision();
        model.set_shading(ShadingMode::Flat);
        assert_eq!(model.revision(), after_refresh);
    }

    proptest! {
        #[test]
        fn heights_stay_within_bounds(
            seed in any::<u64>(),
            width in 2usize..24,
            length in 2usize..24,
            displacement in 0.05f32..5.0,
            faults in prop::collection::vec((any::<bool>(), 0usize..40), 1..8),
        ) {
            let mut model = TerrainModel::new(Config {
                width,
                length,
                displacement,
                max_height: 6.0,
                circle_radius_min: 1.0,
                circle_radius_max: 8.0,
                seed: Some(seed),
                ..Default::default()
            })
            .unwrap();
            for (circle, times) in faults {
                let kind = if circle { FaultKind::Circle } else { FaultKind::Line };
                model.fault_with(kind, times);
                for &height in model.heights().cells() {
                    prop_assert!((0.0..=6.0).contains(&height));
                }
            }
        }
    }
}
