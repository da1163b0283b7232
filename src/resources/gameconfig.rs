//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! title = Ivo
//! width = 500
//! height = 500
//! target_fps = 60
//!
//! [assets]
//! root = ./assets
//!
//! [menu]
//! wait_time = 3.0
//! next_scene = WorldScene
//! icon = icon.png
//! icon_scale = 8
//!
//! [world]
//! speed_offset = 0
//! release = per_direction
//! level =
//! player_sheet = hero.png
//! cell_width = 52
//! cell_height = 72
//! frame_interval = 0.1
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::resources::controlsettings::ReleaseMode;

/// Default safe values for startup
const DEFAULT_TITLE: &str = "Ivo";
const DEFAULT_WINDOW_WIDTH: u32 = 500;
const DEFAULT_WINDOW_HEIGHT: u32 = 500;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_ASSETS_ROOT: &str = "./assets";
const DEFAULT_WAIT_TIME: f32 = 3.0;
const DEFAULT_NEXT_SCENE: &str = "WorldScene";
const DEFAULT_ICON: &str = "icon.png";
const DEFAULT_ICON_SCALE: f32 = 8.0;
const DEFAULT_SPEED_OFFSET: f32 = 0.0;
const DEFAULT_PLAYER_SHEET: &str = "hero.png";
const DEFAULT_CELL_WIDTH: u32 = 52;
const DEFAULT_CELL_HEIGHT: u32 = 72;
const DEFAULT_FRAME_INTERVAL: f32 = 0.1;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Game configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window title.
    pub title: String,
    /// Window (and canvas world) width in pixels.
    pub window_width: u32,
    /// Window (and canvas world) height in pixels.
    pub window_height: u32,
    /// Target frames per second; also the headless fixed timestep.
    pub target_fps: u32,
    /// Directory asset paths are relative to.
    pub assets_root: PathBuf,
    /// Seconds the menu stays up.
    pub menu_wait_time: f32,
    /// Scene the menu switches to.
    pub menu_next_scene: String,
    pub menu_icon: String,
    pub menu_icon_scale: f32,
    /// Subtracted from the per-frame player speed.
    pub speed_offset: f32,
    pub release: ReleaseMode,
    /// Level JSON path; `None` plays on the bare canvas.
    pub level: Option<String>,
    pub player_sheet: String,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Seconds per animation frame.
    pub frame_interval: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            assets_root: PathBuf::from(DEFAULT_ASSETS_ROOT),
            menu_wait_time: DEFAULT_WAIT_TIME,
            menu_next_scene: DEFAULT_NEXT_SCENE.to_string(),
            menu_icon: DEFAULT_ICON.to_string(),
            menu_icon_scale: DEFAULT_ICON_SCALE,
            speed_offset: DEFAULT_SPEED_OFFSET,
            release: ReleaseMode::PerDirection,
            level: None,
            player_sheet: DEFAULT_PLAYER_SHEET.to_string(),
            cell_width: DEFAULT_CELL_WIDTH,
            cell_height: DEFAULT_CELL_HEIGHT,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);

        info!(
            "Loaded config: '{}' {}x{} fps={}, assets={:?}, speed_offset={}, release={}, level={:?}",
            self.title,
            self.window_width,
            self.window_height,
            self.target_fps,
            self.assets_root,
            self.speed_offset,
            self.release.as_str(),
            self.level
        );

        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [window] section
        if let Some(title) = config.get("window", "title") {
            self.title = title;
        }
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = (fps as u32).max(1);
        }

        // [assets] section
        if let Some(root) = config.get("assets", "root") {
            self.assets_root = PathBuf::from(root);
        }

        // [menu] section
        if let Some(wait) = config.getfloat("menu", "wait_time").ok().flatten() {
            self.menu_wait_time = wait as f32;
        }
        if let Some(next) = config.get("menu", "next_scene") {
            self.menu_next_scene = next;
        }
        if let Some(icon) = config.get("menu", "icon") {
            self.menu_icon = icon;
        }
        if let Some(scale) = config.getfloat("menu", "icon_scale").ok().flatten() {
            self.menu_icon_scale = scale as f32;
        }

        // [world] section
        if let Some(offset) = config.getfloat("world", "speed_offset").ok().flatten() {
            self.speed_offset = offset as f32;
        }
        if let Some(release) = config.get("world", "release") {
            match ReleaseMode::parse(&release) {
                Some(mode) => self.release = mode,
                None => warn!("Unknown release mode '{}', keeping {}", release, self.release.as_str()),
            }
        }
        if let Some(level) = config.get("world", "level") {
            let level = level.trim().to_string();
            self.level = if level.is_empty() { None } else { Some(level) };
        }
        if let Some(sheet) = config.get("world", "player_sheet") {
            self.player_sheet = sheet;
        }
        if let Some(w) = config.getuint("world", "cell_width").ok().flatten() {
            self.cell_width = w as u32;
        }
        if let Some(h) = config.getuint("world", "cell_height").ok().flatten() {
            self.cell_height = h as u32;
        }
        if let Some(interval) = config.getfloat("world", "frame_interval").ok().flatten() {
            self.frame_interval = interval as f32;
        }
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("window", "title", Some(self.title.clone()));
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config.set(
            "assets",
            "root",
            Some(self.assets_root.to_string_lossy().into_owned()),
        );

        config.set("menu", "wait_time", Some(self.menu_wait_time.to_string()));
        config.set("menu", "next_scene", Some(self.menu_next_scene.clone()));
        config.set("menu", "icon", Some(self.menu_icon.clone()));
        config.set("menu", "icon_scale", Some(self.menu_icon_scale.to_string()));

        config.set("world", "speed_offset", Some(self.speed_offset.to_string()));
        config.set("world", "release", Some(self.release.as_str().to_string()));
        config.set("world", "level", Some(self.level.clone().unwrap_or_default()));
        config.set("world", "player_sheet", Some(self.player_sheet.clone()));
        config.set("world", "cell_width", Some(self.cell_width.to_string()));
        config.set("world", "cell_height", Some(self.cell_height.to_string()));
        config.set(
            "world",
            "frame_interval",
            Some(self.frame_interval.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Fixed timestep matching the target frame rate.
    pub fn frame_time(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }
}
