//! Input-controlled movement fragment.
//!
//! [`Control`] binds an entity to two logical input axes. The names refer to
//! axes declared in [`InputBindings`](crate::resources::input::InputBindings),
//! never to physical keys, so the same entity works with any backend.
//!
//! [`Direction`] lists the four logical direction buttons the control system
//! watches to pick walk and stop animation clips.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub vertical: String,
    pub horizontal: String,
}

impl Control {
    pub fn new(vertical: impl Into<String>, horizontal: impl Into<String>) -> Self {
        Self {
            vertical: vertical.into(),
            horizontal: horizontal.into(),
        }
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new("vertical", "horizontal")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Logical button name, also the name of the walk clip.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    pub fn walk_clip(self) -> &'static str {
        self.name()
    }

    /// Idle clip facing this direction.
    pub fn stop_clip(self) -> &'static str {
        match self {
            Direction::Up => "upstop",
            Direction::Down => "downstop",
            Direction::Left => "leftstop",
            Direction::Right => "rightstop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_standard_axes() {
        let control = Control::default();
        assert_eq!(control.vertical, "vertical");
        assert_eq!(control.horizontal, "horizontal");
    }

    #[test]
    fn direction_clip_names() {
        assert_eq!(Direction::Left.walk_clip(), "left");
        assert_eq!(Direction::Left.stop_clip(), "leftstop");
        assert_eq!(Direction::ALL.len(), 4);
    }
}
