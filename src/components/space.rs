//! Spatial fragment.
//!
//! [`Space`] holds the top-left position and the fixed size of an entity in
//! world units. The renderer draws at `position`; the control system is the
//! only writer of `position` for player entities, tiles never move.

use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Position and size of an entity in world units.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Space {
    /// Top-left corner.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Space {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            width,
            height,
        }
    }

    /// Returns (min, max) corners of the occupied rectangle.
    pub fn aabb(&self) -> (Vec2, Vec2) {
        let max = self.position + Vec2::new(self.width, self.height);
        (self.position, max)
    }

    /// AABB overlap test. Touching edges do not count as overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (min_a, max_a) = self.aabb();
        let (min_b, max_b) = other.aabb();
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Keep the rectangle inside `[0, bounds]` on both axes.
    ///
    /// The upper bound is applied first, so an entity larger than the bounds
    /// ends up resting at 0.
    pub fn clamp_to(&mut self, bounds_width: f32, bounds_height: f32) {
        let limit_x = bounds_width - self.width;
        let limit_y = bounds_height - self.height;
        self.position.x = self.position.x.min(limit_x).max(0.0);
        self.position.y = self.position.y.min(limit_y).max(0.0);
    }
}
