//! Input sampling.
//!
//! - [`KeySource`] is the seam to the windowing backend: anything that can
//!   tell whether a [`Key`] is held.
//! - [`sample_input`] turns one poll of a `KeySource` into the per-frame
//!   [`InputState`] through the active [`InputBindings`]. Edges are computed
//!   against the previous sample, so it must run exactly once per frame.
//! - [`HeldKeys`] is a plain set of held keys for headless runs and tests.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashSet;

use crate::resources::input::{AxisBinding, InputBindings, InputState, Key};

/// Backend that reports physical key state.
pub trait KeySource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Keys currently held, set by hand.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys(pub FxHashSet<Key>);

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.0.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.0.remove(&key);
    }
}

impl KeySource for HeldKeys {
    fn is_key_down(&self, key: Key) -> bool {
        self.0.contains(&key)
    }
}

fn axis_value(keys: &dyn KeySource, binding: &AxisBinding) -> f32 {
    let mut value = 0.0;
    if keys.is_key_down(binding.negative) {
        value -= 1.0;
    }
    if keys.is_key_down(binding.positive) {
        value += 1.0;
    }
    value
}

/// Sample every bound button and axis.
pub fn sample_input(bindings: &InputBindings, keys: &dyn KeySource, input: &mut InputState) {
    for (name, bound) in &bindings.buttons {
        let down = bound.iter().any(|key| keys.is_key_down(*key));
        let previous = input.button(name).unwrap_or_default();
        input.set_button(name.clone(), previous.sample(down));
    }
    for (name, pairs) in &bindings.axes {
        let value: f32 = pairs.iter().map(|pair| axis_value(keys, pair)).sum();
        input.set_axis(name.clone(), value);
    }
}

/// Poll `keys` into the world's [`InputState`] using the scene's bindings.
///
/// Does nothing while no scene has installed [`InputBindings`].
pub fn update_input_state(world: &mut World, keys: &dyn KeySource) {
    world.resource_scope(|world, mut input: Mut<InputState>| {
        if let Some(bindings) = world.get_resource::<InputBindings>() {
            sample_input(bindings, keys, &mut input);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> InputBindings {
        InputBindings::new()
            .with_button("up", Key::Up)
            .with_button("up", Key::W)
            .with_axis("vertical", Key::Up, Key::Down)
    }

    #[test]
    fn press_hold_release_sequence() {
        let bindings = bindings();
        let mut input = InputState::default();
        let mut keys = HeldKeys::new();

        keys.press(Key::W);
        sample_input(&bindings, &keys, &mut input);
        assert!(input.just_pressed("up"));

        sample_input(&bindings, &keys, &mut input);
        assert!(input.is_down("up"));
        assert!(!input.just_pressed("up"));

        keys.release(Key::W);
        sample_input(&bindings, &keys, &mut input);
        assert!(input.just_released("up"));
        assert!(!input.is_down("up"));
    }

    #[test]
    fn axis_from_key_pair() {
        let bindings = bindings();
        let mut input = InputState::default();
        let mut keys = HeldKeys::new();

        keys.press(Key::Up);
        sample_input(&bindings, &keys, &mut input);
        assert_eq!(input.axis("vertical"), -1.0);

        keys.press(Key::Down);
        sample_input(&bindings, &keys, &mut input);
        assert_eq!(input.axis("vertical"), 0.0);

        keys.release(Key::Up);
        sample_input(&bindings, &keys, &mut input);
        assert_eq!(input.axis("vertical"), 1.0);
    }

    #[test]
    fn doubled_axis_keys_stay_in_range() {
        let bindings = InputBindings::directional();
        let mut input = InputState::default();
        let mut keys = HeldKeys::new();
        keys.press(Key::Right);
        keys.press(Key::D);
        sample_input(&bindings, &keys, &mut input);
        assert_eq!(input.axis("horizontal"), 1.0);
    }

    #[test]
    fn update_without_bindings_is_noop() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        let mut keys = HeldKeys::new();
        keys.press(Key::Up);
        update_input_state(&mut world, &keys);
        assert_eq!(world.resource::<InputState>().button("up"), None);
    }

    #[test]
    fn update_uses_world_bindings() {
        let mut world = World::new();
        world.insert_resource(InputState::default());
        world.insert_resource(bindings());
        let mut keys = HeldKeys::new();
        keys.press(Key::Up);
        update_input_state(&mut world, &keys);
        let input = world.resource::<InputState>();
        assert!(input.just_pressed("up"));
        assert_eq!(input.axis("vertical"), -1.0);
    }
}
