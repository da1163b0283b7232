//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, asset caches,
//! scene bookkeeping and configuration. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `assets` – asset sources and the sprite-sheet/level cache
//! - `background` – clear colour of the active scene
//! - `controlsettings` – per-scene speed offset and release behaviour
//! - `gameconfig` – settings loaded from `config.ini`
//! - `input` – logical bindings and per-frame sampled input
//! - `registry` – per-system ordered entity lists
//! - `scenestate` – active scene and pending switch request
//! - `scenestore` – scenes addressable by name
//! - `tilemap` – tile-map level layout
//! - `worldbounds` – rectangle controlled entities are kept inside
//! - `worldtime` – simulation time and delta
pub mod assets;
pub mod background;
pub mod controlsettings;
pub mod gameconfig;
pub mod input;
pub mod registry;
pub mod scenestate;
pub mod scenestore;
pub mod tilemap;
pub mod worldbounds;
pub mod worldtime;
