//! Per-frame input resources.
//!
//! Input is split in two layers so gameplay never sees physical keys:
//! - [`InputBindings`] maps logical button and axis names to backend-agnostic
//!   [`Key`]s. Scenes install their bindings during setup.
//! - [`InputState`] holds the sampled result for the current frame: a
//!   [`ButtonState`] per button name and a value in `[-1, 1]` per axis name.
//!
//! Reads of names that were never bound are not errors: buttons report
//! `None` and axes read as `0.0`.
use bevy_ecs::prelude::*;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Physical keys the engine knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
}

/// Boolean button state with its edges relative to the previous sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Whether the button is held this frame.
    pub active: bool,
    /// Whether the button went down this frame.
    pub just_pressed: bool,
    /// Whether the button went up this frame.
    pub just_released: bool,
}

impl ButtonState {
    /// Next state given whether the button is held in the new sample.
    pub fn sample(self, down: bool) -> Self {
        Self {
            active: down,
            just_pressed: down && !self.active,
            just_released: !down && self.active,
        }
    }

    /// A button that went down this frame.
    pub fn pressed() -> Self {
        Self {
            active: true,
            just_pressed: true,
            just_released: false,
        }
    }

    /// A button that went up this frame.
    pub fn released() -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: true,
        }
    }
}

/// Key pair producing an axis value: `negative` gives -1, `positive` gives +1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisBinding {
    pub negative: Key,
    pub positive: Key,
}

impl AxisBinding {
    pub fn new(negative: Key, positive: Key) -> Self {
        Self { negative, positive }
    }
}

/// Logical name to physical key bindings for the active scene.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputBindings {
    pub buttons: FxHashMap<String, SmallVec<[Key; 2]>>,
    pub axes: FxHashMap<String, SmallVec<[AxisBinding; 2]>>,
}

impl InputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: bind `key` to button `name`. A button can have several keys.
    pub fn with_button(mut self, name: impl Into<String>, key: Key) -> Self {
        self.buttons.entry(name.into()).or_default().push(key);
        self
    }

    /// Builder method: bind a key pair to axis `name`.
    pub fn with_axis(mut self, name: impl Into<String>, negative: Key, positive: Key) -> Self {
        self.axes
            .entry(name.into())
            .or_default()
            .push(AxisBinding::new(negative, positive));
        self
    }

    /// Standard four-direction layout: arrow keys and WASD for the `up`,
    /// `down`, `left` and `right` buttons and the `vertical`/`horizontal`
    /// axes. Screen y grows downwards, so `up` is the negative vertical key.
    pub fn directional() -> Self {
        Self::new()
            .with_button("up", Key::Up)
            .with_button("up", Key::W)
            .with_button("down", Key::Down)
            .with_button("down", Key::S)
            .with_button("left", Key::Left)
            .with_button("left", Key::A)
            .with_button("right", Key::Right)
            .with_button("right", Key::D)
            .with_axis("vertical", Key::Up, Key::Down)
            .with_axis("vertical", Key::W, Key::S)
            .with_axis("horizontal", Key::Left, Key::Right)
            .with_axis("horizontal", Key::A, Key::D)
    }
}

/// Sampled input for the current frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    buttons: FxHashMap<String, ButtonState>,
    axes: FxHashMap<String, f32>,
}

impl InputState {
    pub fn button(&self, name: &str) -> Option<ButtonState> {
        self.buttons.get(name).copied()
    }

    pub fn is_down(&self, name: &str) -> bool {
        self.button(name).is_some_and(|b| b.active)
    }

    pub fn just_pressed(&self, name: &str) -> bool {
        self.button(name).is_some_and(|b| b.just_pressed)
    }

    pub fn just_released(&self, name: &str) -> bool {
        self.button(name).is_some_and(|b| b.just_released)
    }

    /// Axis value, `0.0` for unbound axes.
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    pub fn set_button(&mut self, name: impl Into<String>, state: ButtonState) {
        self.buttons.insert(name.into(), state);
    }

    /// Set an axis value, clamped to `[-1, 1]`.
    pub fn set_axis(&mut self, name: impl Into<String>, value: f32) {
        self.axes.insert(name.into(), value.clamp(-1.0, 1.0));
    }

    pub fn clear(&mut self) {
        self.buttons.clear();
        self.axes.clear();
    }
}
