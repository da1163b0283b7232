//! Ivo main entry point.
//!
//! A 2D character-control demo using:
//! - **bevy_ecs** for the entity-component-system architecture
//! - **raylib** (feature `raylib`) for the window, input and drawing
//!
//! The game opens on a menu showing the icon, switches to the world scene
//! after a few seconds, and lets the player walk the hero around a canvas or
//! a tile-map level with the arrow keys or WASD.
//!
//! # Running
//!
//! ```sh
//! cargo run --release --features raylib
//! cargo run -- --headless --frames 600
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use ivo::game;
use ivo::resources::assets::FsAssetSource;
use ivo::resources::gameconfig::GameConfig;
use ivo::resources::scenestore::SceneStore;
use ivo::scenes::menu::MenuScene;
use log::{error, info, warn};

/// Ivo 2D character-control demo
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Scene to start in.
    #[arg(long, value_name = "NAME", default_value = MenuScene::NAME)]
    scene: String,

    /// Run without a window.
    #[arg(long)]
    headless: bool,

    /// Number of frames to simulate when headless.
    #[arg(long, value_name = "N", default_value_t = 600)]
    frames: u64,

    /// Asset directory, overriding `[assets] root`.
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if let Some(assets) = cli.assets {
        config.assets_root = assets;
    }
    let frame_time = config.frame_time();
    let source = FsAssetSource::new(config.assets_root.clone());

    let mut world = game::build_world(config, source);
    let scenes = world.resource::<SceneStore>();
    if !scenes.contains(&cli.scene) {
        let mut known: Vec<&str> = scenes.names().collect();
        known.sort_unstable();
        error!("Unknown scene '{}', expected one of: {}", cli.scene, known.join(", "));
        std::process::exit(2);
    }
    if let Err(e) = game::start(&mut world, &cli.scene) {
        error!("Failed to start scene '{}': {}", cli.scene, e);
        std::process::exit(1);
    }

    let headless = cli.headless || cfg!(not(feature = "raylib"));
    let result = if headless {
        info!("Running headless for {} frames", cli.frames);
        game::run_headless(&mut world, cli.frames, frame_time)
    } else {
        #[cfg(feature = "raylib")]
        {
            ivo::frontend::run(&mut world)
        }
        #[cfg(not(feature = "raylib"))]
        {
            Ok(())
        }
    };
    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
