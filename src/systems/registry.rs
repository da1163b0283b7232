//! Registry maintenance.
//!
//! - [`sync_registry`] is added at the head of a scene schedule once per
//!   system type the scene runs; it keeps that system's list in
//!   [`SystemRegistry`] equal to the entities matching its requirements.
//! - [`register_qualified`] does the same registration from exclusive code,
//!   so scene setup can wire entities immediately.
use bevy_ecs::prelude::*;
use crate::resources::registry::{RegisteredSystem, SystemRegistry};

/// Bring the entity list of `S` up to date.
///
/// Entities that no longer match `S::Requires` (fragment removed, entity
/// despawned) are dropped; newly matching entities are appended in entity
/// order unless they were explicitly removed. Surviving entries keep their
/// relative order.
pub fn sync_registry<S: RegisteredSystem>(
    qualified: Query<Entity, S::Requires>,
    mut registry: ResMut<SystemRegistry>,
) {
    registry.sync(S::KEY, |entity| qualified.contains(entity), qualified.iter());
}

/// Register every entity currently matching `S::Requires` with `S`.
///
/// Entities explicitly removed from `S` are skipped. Returns the number of
/// entities newly registered.
pub fn register_qualified<S: RegisteredSystem>(world: &mut World) -> usize {
    let mut fresh: Vec<Entity> = world
        .query_filtered::<Entity, S::Requires>()
        .iter(world)
        .collect();
    fresh.sort();
    let mut registry = world.resource_mut::<SystemRegistry>();
    fresh
        .into_iter()
        .filter(|entity| !registry.is_excluded(S::KEY, *entity) && registry.add(S::KEY, *entity))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Component)]
    struct A;

    #[derive(Component)]
    struct B;

    struct NeedsAB;

    impl RegisteredSystem for NeedsAB {
        const KEY: &'static str = "needs_ab";
        type Requires = (With<A>, With<B>);
    }

    fn tick(world: &mut World) {
        let mut schedule = Schedule::default();
        schedule.add_systems(sync_registry::<NeedsAB>);
        schedule.run(world);
    }

    #[test]
    fn registers_only_qualified_entities() {
        let mut world = World::new();
        world.insert_resource(SystemRegistry::new());
        let both = world.spawn((A, B)).id();
        let _only_a = world.spawn(A).id();

        tick(&mut world);

        assert_eq!(
            world.resource::<SystemRegistry>().entities_of::<NeedsAB>(),
            &[both]
        );
    }

    #[test]
    fn adding_fragment_qualifies_entity() {
        let mut world = World::new();
        world.insert_resource(SystemRegistry::new());
        let first = world.spawn((A, B)).id();
        let later = world.spawn(A).id();
        tick(&mut world);

        world.entity_mut(later).insert(B);
        tick(&mut world);

        assert_eq!(
            world.resource::<SystemRegistry>().entities_of::<NeedsAB>(),
            &[first, later]
        );
    }

    #[test]
    fn removing_fragment_or_despawning_disqualifies() {
        let mut world = World::new();
        world.insert_resource(SystemRegistry::new());
        let a = world.spawn((A, B)).id();
        let b = world.spawn((A, B)).id();
        let c = world.spawn((A, B)).id();
        tick(&mut world);

        world.entity_mut(a).remove::<B>();
        world.despawn(c);
        tick(&mut world);

        assert_eq!(
            world.resource::<SystemRegistry>().entities_of::<NeedsAB>(),
            &[b]
        );
    }

    #[test]
    fn explicit_removal_survives_sync() {
        let mut world = World::new();
        world.insert_resource(SystemRegistry::new());
        let kept = world.spawn((A, B)).id();
        let removed = world.spawn((A, B)).id();
        tick(&mut world);

        world
            .resource_mut::<SystemRegistry>()
            .remove(NeedsAB::KEY, removed);
        tick(&mut world);
        assert_eq!(register_qualified::<NeedsAB>(&mut world), 0);

        assert_eq!(
            world.resource::<SystemRegistry>().entities_of::<NeedsAB>(),
            &[kept]
        );
    }

    #[test]
    fn register_qualified_is_idempotent() {
        let mut world = World::new();
        world.insert_resource(SystemRegistry::new());
        world.spawn((A, B));
        world.spawn((A, B));

        assert_eq!(register_qualified::<NeedsAB>(&mut world), 2);
        assert_eq!(register_qualified::<NeedsAB>(&mut world), 0);
        assert_eq!(
            world
                .resource::<SystemRegistry>()
                .entities_of::<NeedsAB>()
                .len(),
            2
        );
    }
}
