//! Active scene and pending scene-switch request.
//!
//! These resources track the authoritative current scene and any switch
//! requested by systems during the frame. See
//! [`apply_pending_scene`](crate::systems::scene::apply_pending_scene) for
//! how a request is carried out.

use bevy_ecs::prelude::Resource;

/// Name of the scene currently running.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SceneState {
    current: Option<String>,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Update the current scene immediately.
    ///
    /// Prefer requesting switches via [`NextScene`] so teardown, preload and
    /// setup run.
    pub fn set(&mut self, name: impl Into<String>) {
        self.current = Some(name.into());
    }

    /// Forget the current scene, e.g. after a failed switch.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

/// A requested switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneRequest {
    pub name: String,
    /// Drop cached assets and input state as well as entities.
    pub force_recreate: bool,
}

/// Intent to switch to another scene at the end of the frame.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct NextScene {
    pending: Option<SceneRequest>,
}

impl NextScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a switch. A later request in the same frame replaces an
    /// earlier one.
    pub fn set(&mut self, name: impl Into<String>, force_recreate: bool) {
        self.pending = Some(SceneRequest {
            name: name.into(),
            force_recreate,
        });
    }

    pub fn get(&self) -> Option<&SceneRequest> {
        self.pending.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the pending request, leaving none.
    pub fn take(&mut self) -> Option<SceneRequest> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_request() {
        let mut next = NextScene::new();
        next.set("WorldScene", false);
        assert!(next.is_pending());
        let request = next.take().unwrap();
        assert_eq!(request.name, "WorldScene");
        assert!(!request.force_recreate);
        assert!(!next.is_pending());
    }

    #[test]
    fn later_request_wins() {
        let mut next = NextScene::new();
        next.set("WorldScene", false);
        next.set("MenuScene", true);
        assert_eq!(next.get().unwrap().name, "MenuScene");
    }
}
