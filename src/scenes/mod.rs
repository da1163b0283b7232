//! Scenes: self-contained simulation contexts.
//!
//! A [`Scene`] loads what it needs in [`Scene::preload`] and builds its
//! entities, resources and schedule in [`Scene::setup`]. Scenes are stored by
//! name in [`SceneStore`](crate::resources::scenestore::SceneStore) and
//! switched through [`NextScene`](crate::resources::scenestate::NextScene).
//!
//! Two scenes ship with the crate:
//! - [`menu::MenuScene`]: an icon on a white background that moves on after a
//!   timer.
//! - [`world::WorldScene`]: the player walking on a canvas or a tile-map level.

use bevy_ecs::prelude::*;
use thiserror::Error;

use crate::resources::assets::{AssetError, AssetStore};

pub mod menu;
pub mod world;

/// Fatal failure while switching scenes.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("unknown scene '{0}'")]
    UnknownScene(String),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("asset '{0}' was not preloaded")]
    MissingAsset(String),
    #[error("animation clip '{0}' is not in the library")]
    MissingClip(String),
}

/// A scene that can be switched to by name.
pub trait Scene: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Load every asset the scene needs. Called before [`Scene::setup`].
    fn preload(&self, assets: &mut AssetStore) -> Result<(), AssetError>;

    /// Spawn entities, insert scene resources and install the scene schedule.
    fn setup(&self, world: &mut World) -> Result<(), SceneError>;
}
