use bevy::prelude::*;
use leafwing_input_manager::prelude::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Actionlike, Reflect)]
pub enum LightAction {
    SelectNextLight,
    MoveNorth,
    MoveSouth,
    MoveWest,
    MoveEast,
    Raise,
    Lower,
}

impl LightAction {
    pub fn input_map() -> InputMap<Self> {
        let mut input_map = InputMap::default();
        input_map.insert(Self::SelectNextLight, KeyCode::Numpad5);
        input_map.insert(Self::MoveNorth, KeyCode::Numpad8);
        input_map.insert(Self::MoveSouth, KeyCode::Numpad2);
        input_map.insert(Self::MoveWest, KeyCode::Numpad4);
        input_map.insert(Self::MoveEast, KeyCode::Numpad6);
        input_map.insert(Self::Raise, KeyCode::Numpad9);
        input_map.insert(Self::Lower, KeyCode::Numpad3);
        input_map
    }
}
