//! Collision event and its logging observer.
//!
//! [`collision_system`](crate::systems::collision::collision_system) triggers
//! a [`CollisionEvent`] for every main collider overlapping a solid one.
//! Movement is not blocked; observers decide what a contact means.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::group::Group;

/// A main collider (`actor`) overlaps a solid collider (`other`).
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionEvent {
    pub actor: Entity,
    pub other: Entity,
}

/// Global observer that logs contacts at debug level.
pub fn observe_collision(trigger: On<CollisionEvent>, groups: Query<&Group>) {
    let event = trigger.event();
    let group_of = |entity: Entity| groups.get(entity).map(|g| g.name()).unwrap_or("-");
    debug!(
        "Collision: {:?} ({}) touches {:?} ({})",
        event.actor,
        group_of(event.actor),
        event.other,
        group_of(event.other)
    );
}
