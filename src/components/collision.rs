//! Collision fragment.
//!
//! Marks entities taking part in overlap detection. Solid entities (tiles on
//! a solid layer) block; main entities (the player) are the ones checked
//! against them by [`collision_system`](crate::systems::collision::collision_system).

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collision {
    /// Blocks main entities.
    pub solid: bool,
    /// The entity is the player.
    pub main: bool,
}

impl Collision {
    pub fn solid() -> Self {
        Self {
            solid: true,
            main: false,
        }
    }

    pub fn main() -> Self {
        Self {
            solid: false,
            main: true,
        }
    }
}
