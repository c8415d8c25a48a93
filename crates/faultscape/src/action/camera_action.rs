use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Actionlike, Reflect)]
pub enum CameraAction {
    Forward,
    Backward,
    LookUp,
    LookDown,
    TurnLeft,
    TurnRight,
    Drag,
}

impl CameraAction {
    pub fn input_map() -> InputMap<Self> {
        let mut input_map = InputMap::default();
        input_map.insert(Self::Forward, KeyCode::KeyH);
        input_map.insert(Self::Forward, KeyCode::ArrowUp);
        input_map.insert(Self::Backward, KeyCode::KeyN);
        input_map.insert(Self::Backward, KeyCode::ArrowDown);
        input_map.insert(Self::LookUp, KeyCode::KeyI);
        input_map.insert(Self::LookDown, KeyCode::KeyK);
        input_map.insert(Self::TurnLeft, KeyCode::KeyJ);
        input_map.insert(Self::TurnRight, KeyCode::KeyL);
        input_map.insert(Self::Drag, MouseButton::Left);
        input_map
    }
}
