use bevy::prelude::*;
use strum::VariantArray;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, States, VariantArray)]
pub enum PolygonMode {
    #[default]
    Fill,
    Wireframe,
    FilledWire,
}

impl PolygonMode {
    /// Fill, then wireframe, then both, then back to fill.
    pub fn next(self) -> Self {
        match self {
            Self::Fill => Self::Wireframe,
            Self::Wireframe => Self::FilledWire,
            Self::FilledWire => Self::Fill,
        }
    }

    pub fn shows_surface(self) -> bool {
        matches!(self, Self::Fill | Self::FilledWire)
    }

    pub fn shows_wire(self) -> bool {
        matches!(self, Self::Wireframe | Self::FilledWire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_all_modes() {
        let mode = PolygonMode::default();
        assert_eq!(mode, PolygonMode::Fill);
        assert_eq!(mode.next(), PolygonMode::Wireframe);
        assert_eq!(mode.next().next(), PolygonMode::FilledWire);
        assert_eq!(mode.next().next().next(), PolygonMode::Fill);
    }

    #[test]
    fn every_mode_shows_something() {
        for &mode in PolygonMode::VARIANTS {
            assert!(mode.shows_surface() || mode.shows_wire(), "{mode:?}");
        }
    }

    #[test]
    fn wire_overlays_only_in_wire_modes() {
        assert!(PolygonMode::Fill.shows_surface() && !PolygonMode::Fill.shows_wire());
        assert!(!PolygonMode::Wireframe.shows_surface() && PolygonMode::Wireframe.shows_wire());
        assert!(PolygonMode::FilledWire.shows_surface() && PolygonMode::FilledWire.shows_wire());
    }
}
