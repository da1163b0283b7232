//! Scene switch timer system.
//!
//! Each frame [`scene_switch_system`] adds the frame delta to every
//! [`SceneSwitcher`]. A switcher whose wait is exceeded resets its counter and
//! requests its next scene through [`NextScene`]; the switch itself happens
//! after the schedule finishes (see
//! [`apply_pending_scene`](crate::systems::scene::apply_pending_scene)).
use bevy_ecs::prelude::*;
use log::info;

use crate::components::sceneswitcher::SceneSwitcher;
use crate::resources::scenestate::NextScene;
use crate::resources::worldtime::WorldTime;

pub fn scene_switch_system(
    time: Res<WorldTime>,
    mut query: Query<&mut SceneSwitcher>,
    mut next_scene: ResMut<NextScene>,
) {
    for mut switcher in query.iter_mut() {
        if switcher.tick(time.delta) {
            next_scene.set(switcher.next_scene.clone(), switcher.force_recreate);
            info!("Switched to {}", switcher.next_scene);
        }
    }
}
