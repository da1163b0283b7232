//! Per-scene tuning of the control system.
//!
//! Inserted by the scene that runs
//! [`control_system`](crate::systems::control::control_system). Values come
//! from the `[world]` section of the game configuration.

use bevy_ecs::prelude::Resource;

/// Clip chosen when a direction button is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleaseMode {
    /// The released direction's own idle clip (`"upstop"`, `"leftstop"`...).
    #[default]
    PerDirection,
    /// A single `"stop"` clip whatever the direction.
    Universal,
}

impl ReleaseMode {
    pub const UNIVERSAL_STOP: &'static str = "stop";

    /// Parse a configuration value; accepts `per_direction` and `universal`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "per_direction" | "perdirection" => Some(ReleaseMode::PerDirection),
            "universal" => Some(ReleaseMode::Universal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseMode::PerDirection => "per_direction",
            ReleaseMode::Universal => "universal",
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlSettings {
    /// Subtracted from `world_width * delta` to get the per-frame speed.
    pub speed_offset: f32,
    pub release: ReleaseMode,
}

impl ControlSettings {
    pub fn new(speed_offset: f32, release: ReleaseMode) -> Self {
        Self {
            speed_offset,
            release,
        }
    }

    /// Distance covered this frame at full axis deflection. Never negative.
    pub fn speed(&self, world_width: f32, delta: f32) -> f32 {
        (world_width * delta - self.speed_offset).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_applies_offset() {
        let settings = ControlSettings::new(15.0, ReleaseMode::PerDirection);
        assert!((settings.speed(500.0, 0.1) - 35.0).abs() < 1e-4);
    }

    #[test]
    fn speed_never_negative() {
        let settings = ControlSettings::new(15.0, ReleaseMode::PerDirection);
        assert_eq!(settings.speed(500.0, 0.01), 0.0);
    }

    #[test]
    fn parse_release_mode() {
        assert_eq!(ReleaseMode::parse("universal"), Some(ReleaseMode::Universal));
        assert_eq!(
            ReleaseMode::parse(" Per_Direction "),
            Some(ReleaseMode::PerDirection)
        );
        assert_eq!(ReleaseMode::parse("sideways"), None);
    }
}
