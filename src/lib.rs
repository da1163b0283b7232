//! Ivo: a small 2D character-control demo built on `bevy_ecs`.
//!
//! This module exposes the fragments, resources, systems, events and scenes
//! for use by the binary, integration tests, and other frontends.

pub mod components;
pub mod events;
#[cfg(feature = "raylib")]
pub mod frontend;
pub mod game;
pub mod resources;
pub mod scenes;
pub mod systems;
