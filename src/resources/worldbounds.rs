//! World bounds resource.
//!
//! The rectangle `[0, width] x [0, height]` that controlled entities are kept
//! inside. Scenes set it during setup (canvas size or tile-map size) and it is
//! read-only while the scene runs.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct WorldBounds {
    pub width: f32,
    pub height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
