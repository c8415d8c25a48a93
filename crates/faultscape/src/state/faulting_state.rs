use bevy::prelude::*;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, States)]
pub enum FaultingState {
    #[default]
    Idle,
    Continuous,
}

impl FaultingState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Idle => Self::Continuous,
            Self::Continuous => Self::Idle,
        }
    }
}
