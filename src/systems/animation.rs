//! Animation playback system.
//!
//! [`animation_system`] advances the [`Animation`] of every entity registered
//! with [`AnimationSystem`] by the frame delta and writes the resulting frame
//! into its [`Renderable`] cell. Clip selection happens earlier in the frame,
//! in [`control_system`](crate::systems::control::control_system).
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::renderable::Renderable;
use crate::resources::registry::{RegisteredSystem, SystemRegistry};
use crate::resources::worldtime::WorldTime;

/// Entities whose sprite cell follows an animation.
pub struct AnimationSystem;

impl RegisteredSystem for AnimationSystem {
    const KEY: &'static str = "animation";
    type Requires = (With<Animation>, With<Renderable>);
}

pub fn animation_system(
    registry: Res<SystemRegistry>,
    time: Res<WorldTime>,
    mut query: Query<(&mut Animation, &mut Renderable)>,
) {
    for &entity in registry.entities_of::<AnimationSystem>() {
        let Ok((mut animation, mut renderable)) = query.get_mut(entity) else {
            continue;
        };
        animation.advance(time.delta);
        if let Some(cell) = animation.frame()
            && renderable.cell != cell
        {
            renderable.cell = cell;
        }
    }
}
