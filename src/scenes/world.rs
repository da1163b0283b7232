//! The playable scene: a hero walking around a canvas or a tile-map level.
//!
//! Setup order:
//! 1. world bounds from the terrain (canvas size or level rectangle)
//! 2. level tiles and image placements, when the terrain is a level
//! 3. the player with its clip library
//! 4. control settings and input bindings
//! 5. the schedule: registry syncs, then control, animation and collision
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::animation::{Animation, Clip, ClipLibrary};
use crate::components::collision::Collision;
use crate::components::control::{Control, Direction};
use crate::components::group::Group;
use crate::components::renderable::Renderable;
use crate::components::space::Space;
use crate::components::zindex::ZIndex;
use crate::resources::assets::{AssetError, AssetStore};
use crate::resources::background::Background;
use crate::resources::controlsettings::{ControlSettings, ReleaseMode};
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputBindings;
use crate::resources::tilemap::Tilemap;
use crate::resources::worldbounds::WorldBounds;
use crate::scenes::{Scene, SceneError};
use crate::systems::animation::{AnimationSystem, animation_system};
use crate::systems::collision::{CollisionSystem, collision_system};
use crate::systems::control::{ControlSystem, control_system};
use crate::systems::registry::{register_qualified, sync_registry};
use crate::systems::render::RenderSystem;
use crate::systems::scene::{install_scene_schedule, new_scene_schedule};

/// Texture key of the player sprite sheet.
pub const PLAYER_KEY: &str = "player";
/// Asset key of the loaded level.
pub const LEVEL_KEY: &str = "level";

const PLAYER_Z: i32 = 10;

/// What the player walks on.
#[derive(Debug, Clone, PartialEq)]
pub enum Terrain {
    /// Empty rectangle of the given size.
    Canvas { width: f32, height: f32 },
    /// Tile-map level at this path.
    Level(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorldScene {
    pub terrain: Terrain,
    pub player_sheet: String,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Seconds per animation frame.
    pub frame_interval: f32,
    pub settings: ControlSettings,
}

impl WorldScene {
    pub const NAME: &'static str = "WorldScene";

    pub fn from_config(config: &GameConfig) -> Self {
        let terrain = match &config.level {
            Some(path) => Terrain::Level(path.clone()),
            None => Terrain::Canvas {
                width: config.window_width as f32,
                height: config.window_height as f32,
            },
        };
        Self {
            terrain,
            player_sheet: config.player_sheet.clone(),
            cell_width: config.cell_width,
            cell_height: config.cell_height,
            frame_interval: config.frame_interval,
            settings: ControlSettings::new(config.speed_offset, config.release),
        }
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_settings(mut self, settings: ControlSettings) -> Self {
        self.settings = settings;
        self
    }
}

impl Default for WorldScene {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

/// Clip library of the four-row hero sheet.
///
/// Rows are down, left, right, up, four frames each. Every direction has a
/// looping walk clip and a single-frame stop clip on the row's first frame;
/// `"stop"` is the direction-agnostic idle clip.
pub fn hero_clips() -> ClipLibrary {
    let rows = [
        (Direction::Down, 0),
        (Direction::Left, 4),
        (Direction::Right, 8),
        (Direction::Up, 12),
    ];
    let mut library = ClipLibrary::new();
    for (direction, first) in rows {
        let walk: Vec<usize> = (first..first + 4).collect();
        library.insert(Clip::new(direction.walk_clip(), &walk, true));
        library.insert(Clip::new(direction.stop_clip(), &[first], true));
    }
    library.insert(Clip::new(ReleaseMode::UNIVERSAL_STOP, &[0], true));
    library
}

/// Clip the player starts in.
pub fn initial_clip(release: ReleaseMode) -> &'static str {
    match release {
        ReleaseMode::PerDirection => Direction::Down.stop_clip(),
        ReleaseMode::Universal => ReleaseMode::UNIVERSAL_STOP,
    }
}

fn spawn_level(world: &mut World, tilemap: &Tilemap) -> Result<usize, SceneError> {
    let tile = tilemap.tile_size as f32;
    let layers = tilemap.layers.len() as i32;
    let mut spawned = 0;

    for (index, layer) in tilemap.layers.iter().enumerate() {
        let z = ZIndex(-(layers - index as i32));
        for position in &layer.positions {
            let mut entity = world.spawn((
                Space::new(position.x as f32 * tile, position.y as f32 * tile, tile, tile),
                Renderable::new(tilemap.tileset.clone(), position.id as usize),
                z,
                Group::new("tiles"),
            ));
            if layer.solid {
                entity.insert(Collision::solid());
            }
            spawned += 1;
        }
        debug!(
            "Layer '{}': {} tiles at z {} (solid: {})",
            layer.name,
            layer.positions.len(),
            z.0,
            layer.solid
        );
    }

    for placement in &tilemap.images {
        let (width, height) = {
            let assets = world.resource::<AssetStore>();
            let sheet = assets
                .sheet(&placement.image)
                .ok_or_else(|| SceneError::MissingAsset(placement.image.clone()))?;
            (sheet.width as f32, sheet.height as f32)
        };
        world.spawn((
            Space::new(placement.x, placement.y, width, height),
            Renderable::new(placement.image.clone(), 0),
            ZIndex(0),
            Group::new("images"),
        ));
        spawned += 1;
    }
    Ok(spawned)
}

impl Scene for WorldScene {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn preload(&self, assets: &mut AssetStore) -> Result<(), AssetError> {
        assets.load_sprite_sheet(
            PLAYER_KEY,
            &self.player_sheet,
            self.cell_width,
            self.cell_height,
        )?;
        if let Terrain::Level(path) = &self.terrain {
            assets.load_level(LEVEL_KEY, path)?;
        }
        Ok(())
    }

    fn setup(&self, world: &mut World) -> Result<(), SceneError> {
        world.insert_resource(Background::BLACK);

        let bounds = match &self.terrain {
            Terrain::Canvas { width, height } => WorldBounds::new(*width, *height),
            Terrain::Level(_) => {
                let tilemap = world
                    .resource::<AssetStore>()
                    .level(LEVEL_KEY)
                    .cloned()
                    .ok_or_else(|| SceneError::MissingAsset(LEVEL_KEY.to_string()))?;
                let spawned = spawn_level(world, &tilemap)?;
                info!("Spawned {} level entities", spawned);
                let (width, height) = tilemap.bounds();
                WorldBounds::new(width, height)
            }
        };
        world.insert_resource(bounds);

        if world.resource::<AssetStore>().sheet(PLAYER_KEY).is_none() {
            return Err(SceneError::MissingAsset(PLAYER_KEY.to_string()));
        }
        let initial = initial_clip(self.settings.release);
        let animation = Animation::new(Arc::new(hero_clips()), initial, self.frame_interval)
            .ok_or_else(|| SceneError::MissingClip(initial.to_string()))?;

        let width = self.cell_width as f32;
        let height = self.cell_height as f32;
        let start = Space::new(
            ((bounds.width - width) / 2.0).max(0.0),
            ((bounds.height - height) / 2.0).max(0.0),
            width,
            height,
        );
        let player = world
            .spawn((
                start,
                Renderable::new(PLAYER_KEY, 0),
                animation,
                Control::default(),
                Collision::main(),
                Group::new("player"),
                ZIndex(PLAYER_Z),
            ))
            .id();

        world.insert_resource(self.settings);
        world.insert_resource(InputBindings::directional());

        let mut schedule = new_scene_schedule();
        schedule.add_systems(
            (
                sync_registry::<ControlSystem>,
                sync_registry::<AnimationSystem>,
                sync_registry::<CollisionSystem>,
                sync_registry::<RenderSystem>,
                control_system,
                animation_system,
                collision_system,
            )
                .chain(),
        );
        install_scene_schedule(world, schedule);

        register_qualified::<ControlSystem>(world);
        register_qualified::<AnimationSystem>(world);
        register_qualified::<CollisionSystem>(world);
        let drawn = register_qualified::<RenderSystem>(world);

        info!(
            "{} ready: player {:?} at ({}, {}) in {}x{}, {} renderable",
            Self::NAME,
            player,
            start.position.x,
            start.position.y,
            bounds.width,
            bounds.height,
            drawn
        );
        Ok(())
    }
}
