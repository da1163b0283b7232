//! Engine systems.
//!
//! This module groups the ECS systems that advance the simulation and the
//! exclusive helpers that drive the frame and the scene lifecycle.
//!
//! Submodules overview
//! - [`animation`] – advance animation clips and write the frame to the renderable
//! - [`collision`] – detect main actors overlapping solid scenery
//! - [`control`] – input-driven movement, clip selection and clamping
//! - [`input`] – sample a key backend into [`crate::resources::input::InputState`]
//! - [`registry`] – keep per-system entity lists in step with the world
//! - [`render`] – build the backend-independent draw list
//! - [`scene`] – scene schedule, teardown and switching
//! - [`sceneswitch`] – timed requests for the next scene
//! - [`time`] – update simulation time and delta

pub mod animation;
pub mod collision;
pub mod control;
pub mod input;
pub mod registry;
pub mod render;
pub mod scene;
pub mod sceneswitch;
pub mod time;
