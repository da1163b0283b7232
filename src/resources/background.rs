use bevy_ecs::prelude::Resource;

/// Clear colour of the active scene as RGBA bytes.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Background(pub [u8; 4]);

impl Background {
    pub const WHITE: Background = Background([255, 255, 255, 255]);
    pub const BLACK: Background = Background([0, 0, 0, 255]);
}

impl Default for Background {
    fn default() -> Self {
        Self::BLACK
    }
}
