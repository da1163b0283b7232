//! Player control system.
//!
//! [`control_system`] turns the sampled [`InputState`] and the frame delta into
//! movement and animation changes for every entity registered with
//! [`ControlSystem`]:
//!
//! 1. Directional button edges pick the animation clip. Releases are applied
//!    before presses, so pressing a new direction in the same frame wins.
//! 2. `speed = world_width * delta - speed_offset` (see [`ControlSettings`]).
//! 3. Axis values move the entity: `y += speed * vertical`,
//!    `x += speed * horizontal`. Diagonals are not normalized.
//! 4. An entity that moved is clamped inside [`WorldBounds`]. Without axis
//!    input the position is left untouched, wherever it is.
//!
//! Registered entities missing a fragment are skipped.
use bevy_ecs::prelude::*;

use crate::components::animation::Animation;
use crate::components::control::{Control, Direction};
use crate::components::space::Space;
use crate::resources::controlsettings::{ControlSettings, ReleaseMode};
use crate::resources::input::InputState;
use crate::resources::registry::{RegisteredSystem, SystemRegistry};
use crate::resources::worldbounds::WorldBounds;
use crate::resources::worldtime::WorldTime;

/// Entities moved and animated by player input.
pub struct ControlSystem;

impl RegisteredSystem for ControlSystem {
    const KEY: &'static str = "control";
    type Requires = (With<Space>, With<Animation>, With<Control>);
}

/// Apply directional button edges to the animation state machine.
pub fn select_clip(animation: &mut Animation, input: &InputState, release: ReleaseMode) {
    for direction in Direction::ALL {
        if input.just_released(direction.name()) {
            let clip = match release {
                ReleaseMode::PerDirection => direction.stop_clip(),
                ReleaseMode::Universal => ReleaseMode::UNIVERSAL_STOP,
            };
            animation.select(clip);
        }
    }
    for direction in Direction::ALL {
        if input.just_pressed(direction.name()) {
            animation.select(direction.walk_clip());
        }
    }
}

pub fn control_system(
    registry: Res<SystemRegistry>,
    input: Res<InputState>,
    time: Res<WorldTime>,
    bounds: Option<Res<WorldBounds>>,
    settings: Option<Res<ControlSettings>>,
    mut query: Query<(&mut Space, &mut Animation, &Control)>,
) {
    let Some(bounds) = bounds else {
        return;
    };
    let settings = settings.as_deref().copied().unwrap_or_default();
    let speed = settings.speed(bounds.width, time.delta);

    for &entity in registry.entities_of::<ControlSystem>() {
        let Ok((mut space, mut animation, control)) = query.get_mut(entity) else {
            continue;
        };

        select_clip(&mut animation, &input, settings.release);

        let vertical = input.axis(&control.vertical);
        let horizontal = input.axis(&control.horizontal);
        if vertical != 0.0 || horizontal != 0.0 {
            space.position.y += speed * vertical;
            space.position.x += speed * horizontal;
            space.clamp_to(bounds.width, bounds.height);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::components::animation::{Clip, ClipLibrary};
    use crate::resources::input::ButtonState;

    fn animation() -> Animation {
        let library = ClipLibrary::new()
            .with_clip(Clip::new("up", &[12, 13], true))
            .with_clip(Clip::new("left", &[4, 5], true))
            .with_clip(Clip::new("upstop", &[12], true))
            .with_clip(Clip::new("leftstop", &[4], true))
            .with_clip(Clip::new("downstop", &[0], true))
            .with_clip(Clip::new("stop", &[0], true));
        Animation::new(Arc::new(library), "downstop", 0.1).unwrap()
    }

    #[test]
    fn press_selects_walk_clip() {
        let mut anim = animation();
        let mut input = InputState::default();
        input.set_button("up", ButtonState::pressed());
        select_clip(&mut anim, &input, ReleaseMode::PerDirection);
        assert_eq!(anim.current(), "up");
    }

    #[test]
    fn release_selects_direction_stop_clip() {
        let mut anim = animation();
        anim.select("left");
        let mut input = InputState::default();
        input.set_button("left", ButtonState::released());
        select_clip(&mut anim, &input, ReleaseMode::PerDirection);
        assert_eq!(anim.current(), "leftstop");
    }

    #[test]
    fn release_selects_universal_stop_clip() {
        let mut anim = animation();
        anim.select("left");
        let mut input = InputState::default();
        input.set_button("left", ButtonState::released());
        select_clip(&mut anim, &input, ReleaseMode::Universal);
        assert_eq!(anim.current(), "stop");
    }

    #[test]
    fn press_wins_over_release_in_same_frame() {
        let mut anim = animation();
        anim.select("left");
        let mut input = InputState::default();
        input.set_button("left", ButtonState::released());
        input.set_button("up", ButtonState::pressed());
        select_clip(&mut anim, &input, ReleaseMode::PerDirection);
        assert_eq!(anim.current(), "up");
    }

    #[test]
    fn held_button_does_not_reselect() {
        let mut anim = animation();
        anim.select("up");
        anim.elapsed = 0.3;
        let mut input = InputState::default();
        input.set_button("up", ButtonState::default().sample(true).sample(true));
        select_clip(&mut anim, &input, ReleaseMode::PerDirection);
        assert_eq!(anim.elapsed, 0.3);
    }
}
