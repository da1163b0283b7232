use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Drawable reference consumed by the renderer.
///
/// `tex_key` names a sprite sheet in [`AssetStore`](crate::resources::assets::AssetStore)
/// and `cell` selects a cell of its grid (left-to-right, top-to-bottom). The
/// animation system rewrites `cell` every frame for animated entities.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Renderable {
    pub tex_key: String,
    pub cell: usize,
    pub scale: Vec2,
}

impl Renderable {
    pub fn new(tex_key: impl Into<String>, cell: usize) -> Self {
        Self {
            tex_key: tex_key.into(),
            cell,
            scale: Vec2::ONE,
        }
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }
}
