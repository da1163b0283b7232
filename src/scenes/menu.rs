//! Opening menu: the game icon on a white background.
//!
//! The scene draws a single scaled icon and holds a [`SceneSwitcher`] that
//! moves on to the configured next scene once its wait time has passed.
use bevy_ecs::prelude::*;
use log::info;

use crate::components::group::Group;
use crate::components::renderable::Renderable;
use crate::components::sceneswitcher::SceneSwitcher;
use crate::components::space::Space;
use crate::components::zindex::ZIndex;
use crate::resources::assets::{AssetError, AssetStore};
use crate::resources::background::Background;
use crate::resources::gameconfig::GameConfig;
use crate::scenes::{Scene, SceneError};
use crate::systems::registry::{register_qualified, sync_registry};
use crate::systems::render::RenderSystem;
use crate::systems::scene::{install_scene_schedule, new_scene_schedule};
use crate::systems::sceneswitch::scene_switch_system;

/// Texture key of the menu icon.
pub const ICON_KEY: &str = "icon";

#[derive(Debug, Clone, PartialEq)]
pub struct MenuScene {
    pub icon: String,
    pub icon_scale: f32,
    pub next_scene: String,
    /// Seconds before switching.
    pub wait_time: f32,
    pub force_recreate: bool,
}

impl MenuScene {
    pub const NAME: &'static str = "MenuScene";

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            icon: config.menu_icon.clone(),
            icon_scale: config.menu_icon_scale,
            next_scene: config.menu_next_scene.clone(),
            wait_time: config.menu_wait_time,
            force_recreate: false,
        }
    }
}

impl Default for MenuScene {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Scene for MenuScene {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn preload(&self, assets: &mut AssetStore) -> Result<(), AssetError> {
        assets.load_image(ICON_KEY, &self.icon)?;
        Ok(())
    }

    fn setup(&self, world: &mut World) -> Result<(), SceneError> {
        world.insert_resource(Background::WHITE);

        let (width, height) = {
            let assets = world.resource::<AssetStore>();
            let sheet = assets
                .sheet(ICON_KEY)
                .ok_or_else(|| SceneError::MissingAsset(ICON_KEY.to_string()))?;
            (sheet.width as f32, sheet.height as f32)
        };

        world.spawn((
            Space::new(0.0, 0.0, width * self.icon_scale, height * self.icon_scale),
            Renderable::new(ICON_KEY, 0).with_scale(self.icon_scale, self.icon_scale),
            ZIndex(0),
            Group::new("icon"),
        ));
        world.spawn((
            SceneSwitcher::new(self.next_scene.clone(), self.wait_time)
                .with_force_recreate(self.force_recreate),
            Group::new("switcher"),
        ));

        let mut schedule = new_scene_schedule();
        schedule.add_systems((sync_registry::<RenderSystem>, scene_switch_system).chain());
        install_scene_schedule(world, schedule);

        let drawn = register_qualified::<RenderSystem>(world);
        info!(
            "{} ready: {} renderable, next '{}' in {}s",
            Self::NAME,
            drawn,
            self.next_scene,
            self.wait_time
        );
        Ok(())
    }
}
