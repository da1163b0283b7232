//! Overlap detection between the player and solid scenery.
//!
//! Only `main` colliders are tested, and only against `solid` ones; tile
//! against tile pairs are never checked. Every overlapping pair triggers a
//! [`CollisionEvent`].
use bevy_ecs::prelude::*;

use crate::components::collision::Collision;
use crate::components::space::Space;
use crate::events::collision::CollisionEvent;
use crate::resources::registry::{RegisteredSystem, SystemRegistry};

/// Entities taking part in overlap tests.
pub struct CollisionSystem;

impl RegisteredSystem for CollisionSystem {
    const KEY: &'static str = "collision";
    type Requires = (With<Space>, With<Collision>);
}

pub fn collision_system(
    registry: Res<SystemRegistry>,
    query: Query<(&Space, &Collision)>,
    mut commands: Commands,
) {
    let members = registry.entities_of::<CollisionSystem>();

    let mut actors: Vec<(Entity, &Space)> = Vec::new();
    let mut solids: Vec<(Entity, &Space)> = Vec::new();
    for &entity in members {
        let Ok((space, collision)) = query.get(entity) else {
            continue;
        };
        if collision.main {
            actors.push((entity, space));
        }
        if collision.solid {
            solids.push((entity, space));
        }
    }

    for &(actor, actor_space) in &actors {
        for &(other, other_space) in &solids {
            if actor != other && actor_space.overlaps(other_space) {
                commands.trigger(CollisionEvent { actor, other });
            }
        }
    }
}
