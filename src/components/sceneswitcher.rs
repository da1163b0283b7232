//! Scene switch timer component.
//!
//! A [`SceneSwitcher`] lives on an entity spawned by a scene during setup.
//! [`scene_switch_system`](crate::systems::sceneswitch::scene_switch_system)
//! accumulates frame time on it and requests `next_scene` once `wait_time`
//! has passed. Teardown despawns the entity, so a switcher fires once per
//! scene instance.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq)]
pub struct SceneSwitcher {
    pub next_scene: String,
    /// Seconds to wait before switching.
    pub wait_time: f32,
    pub seconds_waited: f32,
    /// Also drop cached assets and input state on switch.
    pub force_recreate: bool,
}

impl SceneSwitcher {
    pub fn new(next_scene: impl Into<String>, wait_time: f32) -> Self {
        Self {
            next_scene: next_scene.into(),
            wait_time,
            seconds_waited: 0.0,
            force_recreate: false,
        }
    }

    pub fn with_force_recreate(mut self, force_recreate: bool) -> Self {
        self.force_recreate = force_recreate;
        self
    }

    /// Accumulate `dt`; returns `true` on the frame the wait is exceeded.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.seconds_waited += dt;
        if self.seconds_waited > self.wait_time {
            self.seconds_waited = 0.0;
            return true;
        }
        false
    }
}
