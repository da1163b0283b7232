use bevy_ecs::prelude::Component;

/// Draw order. Lower values are drawn first; entities without one draw at 0.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
