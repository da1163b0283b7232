//! World assembly and the frame loop shared by every frontend.
//!
//! [`build_world`] inserts the long-lived resources, the scene store and the
//! global observers. A frontend then calls [`start`] once and [`run_frame`]
//! every frame:
//!
//! 1. advance [`WorldTime`]
//! 2. sample the key backend into [`InputState`]
//! 3. run the active scene's schedule
//! 4. apply any scene switch requested during the frame
//!
//! Drawing happens after `run_frame` returns, from
//! [`draw_list`](crate::systems::render::draw_list).
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::persistent::Persistent;
use crate::events::collision::observe_collision;
use crate::events::scene::observe_scene_switched;
use crate::resources::assets::{AssetSource, AssetStore};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::registry::SystemRegistry;
use crate::resources::scenestate::{NextScene, SceneState};
use crate::resources::scenestore::SceneStore;
use crate::resources::worldtime::WorldTime;
use crate::scenes::SceneError;
use crate::scenes::menu::MenuScene;
use crate::scenes::world::WorldScene;
use crate::systems::input::{HeldKeys, KeySource, update_input_state};
use crate::systems::scene::{apply_pending_scene, run_scene_systems, switch_scene};
use crate::systems::time::update_world_time;

/// Build a world with every scene registered and no scene running.
pub fn build_world(config: GameConfig, source: impl AssetSource + 'static) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(InputState::default());
    world.insert_resource(SystemRegistry::new());
    world.insert_resource(SceneState::new());
    world.insert_resource(NextScene::new());
    world.insert_resource(AssetStore::new(source));

    let mut scenes = SceneStore::new();
    scenes.insert(MenuScene::from_config(&config));
    scenes.insert(WorldScene::from_config(&config));
    world.insert_resource(scenes);
    world.insert_resource(config);

    world.spawn((Observer::new(observe_scene_switched), Persistent));
    world.spawn((Observer::new(observe_collision), Persistent));
    // Observers must be registered before anything triggers.
    world.flush();
    world
}

/// Enter the first scene.
pub fn start(world: &mut World, scene: &str) -> Result<(), SceneError> {
    switch_scene(world, scene, false)
}

/// Advance the game by one frame of `dt` seconds.
///
/// Returns whether the frame ended with a scene switch.
pub fn run_frame(world: &mut World, dt: f32, keys: &dyn KeySource) -> Result<bool, SceneError> {
    update_world_time(world, dt);
    update_input_state(world, keys);
    run_scene_systems(world);
    world.clear_trackers();
    apply_pending_scene(world)
}

/// Run `frames` fixed-step frames with no keys held.
pub fn run_headless(world: &mut World, frames: u64, dt: f32) -> Result<(), SceneError> {
    let keys = HeldKeys::new();
    for _ in 0..frames {
        run_frame(world, dt, &keys)?;
    }
    let time = world.resource::<WorldTime>();
    info!(
        "Headless run finished: {} frames, {:.2}s simulated, scene {}",
        time.frame_count,
        time.elapsed,
        world
            .resource::<SceneState>()
            .current()
            .unwrap_or("<none>")
    );
    Ok(())
}
