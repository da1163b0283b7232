//! Registry of scenes addressable by name.
//!
//! Scenes are registered once at startup and looked up by name when a switch
//! is applied. Entries are reference counted so a scene can be run against
//! the world that stores it.

use std::sync::Arc;

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::scenes::Scene;

/// Map of scene names to scenes.
#[derive(Resource, Default)]
pub struct SceneStore {
    pub map: FxHashMap<String, Arc<dyn Scene>>,
}

impl SceneStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a scene under its own name, replacing any previous entry.
    pub fn insert(&mut self, scene: impl Scene) {
        self.map.insert(scene.name().to_string(), Arc::new(scene));
    }

    /// Retrieve a scene by name, if present.
    pub fn get(&self, name: impl AsRef<str>) -> Option<Arc<dyn Scene>> {
        self.map.get(name.as_ref()).cloned()
    }

    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        self.map.contains_key(name.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }
}
