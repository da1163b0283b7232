//! Scene lifecycle: requesting, tearing down and switching scenes.
//!
//! A switch is requested with [`set_scene`] (or by writing
//! [`NextScene`] from a system) and performed by [`apply_pending_scene`]
//! after the frame's schedule has run, so no system ever observes a half
//! built scene.
//!
//! Switch order:
//! 1. look the scene up in [`SceneStore`] (unknown names are fatal and leave
//!    the running scene untouched)
//! 2. [`teardown_scene`]
//! 3. [`Scene::preload`], then [`Scene::setup`]; on failure the partial scene
//!    is torn down again and the error returned
//! 4. update [`SceneState`] and trigger [`SceneSwitchedEvent`]
use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{ExecutorKind, ScheduleLabel, Schedules};
use log::{debug, info};

use crate::components::persistent::Persistent;
use crate::events::scene::SceneSwitchedEvent;
use crate::resources::assets::AssetStore;
use crate::resources::background::Background;
use crate::resources::controlsettings::ControlSettings;
use crate::resources::input::{InputBindings, InputState};
use crate::resources::registry::SystemRegistry;
use crate::resources::scenestate::{NextScene, SceneState};
use crate::resources::scenestore::SceneStore;
use crate::resources::worldbounds::WorldBounds;
use crate::scenes::SceneError;

/// Label of the active scene's per-frame schedule.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SceneUpdate;

/// A fresh, single threaded scene schedule. Systems added to it should be
/// `.chain()`ed so they run in registration order.
pub fn new_scene_schedule() -> Schedule {
    let mut schedule = Schedule::new(SceneUpdate);
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule
}

/// Install `schedule` as the active scene schedule, replacing any previous
/// one.
pub fn install_scene_schedule(world: &mut World, schedule: Schedule) {
    world.add_schedule(schedule);
}

/// Request a switch to `name`, applied at the end of the frame.
pub fn set_scene(world: &mut World, name: impl Into<String>, force_recreate: bool) {
    world.resource_mut::<NextScene>().set(name, force_recreate);
}

/// Run the active scene's schedule once. Returns `false` when no scene is
/// installed.
pub fn run_scene_systems(world: &mut World) -> bool {
    world.try_run_schedule(SceneUpdate).is_ok()
}

/// Discard the running scene.
///
/// Despawns every entity not marked [`Persistent`], empties the
/// [`SystemRegistry`], removes the scene schedule and the scene resources.
/// With `force_recreate` the asset cache and input state are cleared too.
pub fn teardown_scene(world: &mut World, force_recreate: bool) {
    let doomed: Vec<Entity> = world
        .query_filtered::<Entity, Without<Persistent>>()
        .iter(world)
        .collect();
    let count = doomed.len();
    for entity in doomed {
        let _ = world.despawn(entity);
    }

    if let Some(mut registry) = world.get_resource_mut::<SystemRegistry>() {
        registry.clear();
    }
    if let Some(mut schedules) = world.get_resource_mut::<Schedules>() {
        let _ = schedules.remove(SceneUpdate);
    }
    world.remove_resource::<WorldBounds>();
    world.remove_resource::<ControlSettings>();
    world.remove_resource::<InputBindings>();
    world.remove_resource::<Background>();

    if force_recreate {
        if let Some(mut assets) = world.get_resource_mut::<AssetStore>() {
            assets.clear();
        }
        if let Some(mut input) = world.get_resource_mut::<InputState>() {
            input.clear();
        }
    }
    debug!(
        "Tore down scene: {} entities despawned (force_recreate: {})",
        count, force_recreate
    );
}

/// Switch to `name` now.
pub fn switch_scene(
    world: &mut World,
    name: &str,
    force_recreate: bool,
) -> Result<(), SceneError> {
    let scene = world
        .resource::<SceneStore>()
        .get(name)
        .ok_or_else(|| SceneError::UnknownScene(name.to_string()))?;

    let from = world.resource::<SceneState>().current().map(str::to_string);
    info!(
        "Transitioning from {} to {}",
        from.as_deref().unwrap_or("<none>"),
        name
    );

    teardown_scene(world, force_recreate);

    let built = world
        .resource_scope(|_, mut assets: Mut<AssetStore>| scene.preload(&mut assets))
        .map_err(SceneError::from)
        .and_then(|()| scene.setup(world));
    if let Err(err) = built {
        teardown_scene(world, false);
        world.resource_mut::<SceneState>().clear();
        return Err(err);
    }

    world.resource_mut::<SceneState>().set(name);
    world.trigger(SceneSwitchedEvent {
        from,
        to: name.to_string(),
    });
    Ok(())
}

/// Carry out the pending [`NextScene`] request, if any.
///
/// Returns whether a switch happened.
pub fn apply_pending_scene(world: &mut World) -> Result<bool, SceneError> {
    let Some(request) = world.resource_mut::<NextScene>().take() else {
        return Ok(false);
    };
    switch_scene(world, &request.name, request.force_recreate)?;
    Ok(true)
}
