//! Scene transition notification.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::info;

/// Triggered after a scene finished setup and became current.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct SceneSwitchedEvent {
    /// Scene that was running before, if any.
    pub from: Option<String>,
    pub to: String,
}

/// Global observer that logs every completed switch.
pub fn observe_scene_switched(trigger: On<SceneSwitchedEvent>) {
    let event = trigger.event();
    match &event.from {
        Some(from) => info!("Switched from {} to {}", from, event.to),
        None => info!("Started in {}", event.to),
    }
}
