use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Actionlike, Reflect)]
pub enum TerrainAction {
    ToggleContinuousFaulting,
    FaultSmallBatch,
    FaultLargeBatch,
    FaultHugeBatch,
    ToggleFaultKind,
    CyclePolygonMode,
    ToggleLighting,
    ToggleShading,
    RegenerateNormals,
    Reset,
    RotateLeft,
    RotateRight,
    Quit,
}

impl TerrainAction {
    pub fn input_map() -> InputMap<Self> {
        let mut input_map = InputMap::default();
        input_map.insert(Self::ToggleContinuousFaulting, KeyCode::KeyP);
        input_map.insert(Self::FaultSmallBatch, KeyCode::Space);
        input_map.insert(Self::FaultLargeBatch, KeyCode::KeyF);
        input_map.insert(Self::FaultHugeBatch, KeyCode::KeyB);
        input_map.insert(Self::ToggleFaultKind, KeyCode::KeyC);
        input_map.insert(Self::CyclePolygonMode, KeyCode::KeyW);
        input_map.insert(Self::ToggleLighting, KeyCode::KeyT);
        input_map.insert(Self::ToggleShading, KeyCode::KeyY);
        input_map.insert(Self::RegenerateNormals, KeyCode::KeyG);
        input_map.insert(Self::Reset, KeyCode::KeyR);
        input_map.insert(Self::RotateLeft, KeyCode::ArrowLeft);
        input_map.insert(Self::RotateRight, KeyCode::ArrowRight);
        input_map.insert(Self::Quit, KeyCode::KeyQ);
        input_map.insert(Self::Quit, KeyCode::Escape);
        input_map
    }
}
