//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component are not despawned when the
//! active scene is torn down. The engine uses it for its global observers.

use bevy_ecs::prelude::Component;

/// Tag component for entities that outlive scene switches.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
