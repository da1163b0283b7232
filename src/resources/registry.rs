//! Entity-to-system registry.
//!
//! Each system that processes entities declares the fragments it needs by
//! implementing [`RegisteredSystem`]. [`SystemRegistry`] keeps, per system,
//! the ordered list of entities registered with it. Systems iterate that list
//! and look the fragments up by entity identity.
//!
//! # How It Works
//!
//! 1. A system type states its requirements: `type Requires = (With<Space>, With<Control>)`
//! 2. [`sync_registry`](crate::systems::registry::sync_registry) runs at the
//!    head of the scene schedule and appends every entity that newly matches
//!    the filter, and drops entities that stopped matching
//! 3. Scenes can also call [`SystemRegistry::add`] / [`SystemRegistry::remove`]
//!    directly. An explicit removal excludes the entity from that system until
//!    it is added again, so the next sync does not bring it back
//!
//! Registration order is preserved, so systems visit entities in the order
//! they were registered.

use bevy_ecs::prelude::*;
use bevy_ecs::query::QueryFilter;
use rustc_hash::{FxHashMap, FxHashSet};

/// A system that processes entities carrying a fixed set of fragments.
pub trait RegisteredSystem: Send + Sync + 'static {
    /// Registry key.
    const KEY: &'static str;
    /// Filter an entity must satisfy to be registered.
    type Requires: QueryFilter + 'static;
}

/// Ordered entity lists keyed by system.
#[derive(Resource, Debug, Default, Clone)]
pub struct SystemRegistry {
    members: FxHashMap<&'static str, Vec<Entity>>,
    excluded: FxHashMap<&'static str, FxHashSet<Entity>>,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entity` with the system `key`. Returns `false` if it was
    /// already registered.
    pub fn add(&mut self, key: &'static str, entity: Entity) -> bool {
        if let Some(excluded) = self.excluded.get_mut(key) {
            excluded.remove(&entity);
        }
        let list = self.members.entry(key).or_default();
        if list.contains(&entity) {
            return false;
        }
        list.push(entity);
        true
    }

    /// Deregister `entity` from the system `key`, keeping the order of the
    /// remaining entities. Returns `false` if it was not registered.
    ///
    /// The entity stays out of `key` until the next [`SystemRegistry::add`],
    /// even while it still carries the required fragments.
    pub fn remove(&mut self, key: &'static str, entity: Entity) -> bool {
        self.excluded.entry(key).or_default().insert(entity);
        let Some(list) = self.members.get_mut(key) else {
            return false;
        };
        match list.iter().position(|e| *e == entity) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn entities(&self, key: &str) -> &[Entity] {
        self.members.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str, entity: Entity) -> bool {
        self.entities(key).contains(&entity)
    }

    /// Whether `entity` was explicitly removed from `key` and not added back.
    pub fn is_excluded(&self, key: &str, entity: Entity) -> bool {
        self.excluded
            .get(key)
            .is_some_and(|excluded| excluded.contains(&entity))
    }

    /// Typed shorthand for [`SystemRegistry::entities`].
    pub fn entities_of<S: RegisteredSystem>(&self) -> &[Entity] {
        self.entities(S::KEY)
    }

    /// Keep the entries of `key` that are still `qualified`, then append
    /// `candidates` that are neither listed nor excluded.
    pub(crate) fn sync(
        &mut self,
        key: &'static str,
        qualified: impl Fn(Entity) -> bool,
        candidates: impl IntoIterator<Item = Entity>,
    ) {
        let list = self.members.entry(key).or_default();
        list.retain(|entity| qualified(*entity));

        let excluded = self.excluded.get(key);
        let known: FxHashSet<Entity> = list.iter().copied().collect();
        let mut fresh: Vec<Entity> = candidates
            .into_iter()
            .filter(|e| !known.contains(e))
            .filter(|e| excluded.is_none_or(|set| !set.contains(e)))
            .collect();
        fresh.sort();
        list.extend(fresh);
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.excluded.clear();
    }
}
