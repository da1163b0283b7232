//! ECS components (fragments) for entities.
//!
//! Fragments are data only; systems in [`crate::systems`] give them behavior.
//!
//! Submodules overview:
//! - [`animation`] – clips, clip libraries and per-entity playback state
//! - [`collision`] – solid/main flags for overlap detection
//! - [`control`] – binding of an entity to logical input axes
//! - [`group`] – name tag for entity kinds
//! - [`persistent`] – marker for entities that persist across scene changes
//! - [`renderable`] – sprite-sheet cell and scale consumed by the renderer
//! - [`sceneswitcher`] – timer that requests the next scene
//! - [`space`] – position and size in world units
//! - [`zindex`] – draw order hint for the renderer

pub mod animation;
pub mod collision;
pub mod control;
pub mod group;
pub mod persistent;
pub mod renderable;
pub mod sceneswitcher;
pub mod space;
pub mod zindex;
