//! Animation fragment and clip tables.
//!
//! A [`Clip`] is a named, ordered list of sprite-sheet cells with a loop flag.
//! Clips are grouped in a [`ClipLibrary`] built once per scene and shared by
//! the entities using it. The per-entity [`Animation`] tracks which clip is
//! playing and how long it has been playing.
//!
//! Switching clips goes through [`Animation::select`], which is idempotent:
//! re-selecting the playing clip keeps its elapsed time.

use std::sync::Arc;

use bevy_ecs::prelude::Component;
use log::warn;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Cell indices of one clip.
pub type Frames = SmallVec<[usize; 8]>;

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub name: String,
    pub frames: Frames,
    pub looped: bool,
}

impl Clip {
    pub fn new(name: impl Into<String>, frames: &[usize], looped: bool) -> Self {
        Self {
            name: name.into(),
            frames: Frames::from_slice(frames),
            looped,
        }
    }

    /// Frame (cell index) shown after `elapsed` seconds at `interval` seconds per frame.
    ///
    /// Looping clips wrap around; one-shot clips hold their last frame.
    /// Returns `None` for a clip without frames.
    pub fn frame_at(&self, elapsed: f32, interval: f32) -> Option<usize> {
        let len = self.frames.len();
        if len == 0 {
            return None;
        }
        let step = if interval > 0.0 {
            (elapsed.max(0.0) / interval).floor() as usize
        } else {
            0
        };
        let index = if self.looped {
            step % len
        } else {
            step.min(len - 1)
        };
        Some(self.frames[index])
    }

    /// Total play time of one pass through the clip.
    pub fn duration(&self, interval: f32) -> f32 {
        self.frames.len() as f32 * interval
    }
}

/// Clips available to an entity, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ClipLibrary {
    clips: FxHashMap<String, Clip>,
}

impl ClipLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: add a clip, replacing one with the same name.
    pub fn with_clip(mut self, clip: Clip) -> Self {
        self.insert(clip);
        self
    }

    pub fn insert(&mut self, clip: Clip) {
        self.clips.insert(clip.name.clone(), clip);
    }

    pub fn get(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }
}

/// Per-entity animation state.
#[derive(Component, Debug, Clone)]
pub struct Animation {
    library: Arc<ClipLibrary>,
    current: String,
    /// Seconds spent in the current clip.
    pub elapsed: f32,
    /// Seconds per frame.
    pub frame_interval: f32,
}

impl Animation {
    /// Create an animation starting on `initial`.
    ///
    /// Returns `None` when `initial` is not part of `library`, so the current
    /// clip is always a library member.
    pub fn new(
        library: Arc<ClipLibrary>,
        initial: impl Into<String>,
        frame_interval: f32,
    ) -> Option<Self> {
        let initial = initial.into();
        if !library.contains(&initial) {
            return None;
        }
        Some(Self {
            library,
            current: initial,
            elapsed: 0.0,
            frame_interval,
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn current_clip(&self) -> Option<&Clip> {
        self.library.get(&self.current)
    }

    /// Switch to clip `name`.
    ///
    /// Returns `true` when the clip actually changed; the elapsed time is then
    /// reset. Selecting the current clip, or a clip missing from the library,
    /// leaves the state untouched.
    pub fn select(&mut self, name: &str) -> bool {
        if self.current == name {
            return false;
        }
        if !self.library.contains(name) {
            warn!("Animation clip '{}' not found, keeping '{}'", name, self.current);
            return false;
        }
        self.current = name.to_string();
        self.elapsed = 0.0;
        true
    }

    /// Advance the accumulator by `dt` seconds.
    ///
    /// Looping clips keep the accumulator within one pass; the visible frame
    /// is the same as with an unbounded accumulator.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        if let Some(clip) = self.library.get(&self.current) {
            let duration = clip.duration(self.frame_interval);
            if clip.looped && duration > 0.0 && self.elapsed >= duration {
                self.elapsed %= duration;
            }
        }
    }

    /// Cell index to draw for the current clip and elapsed time.
    pub fn frame(&self) -> Option<usize> {
        self.current_clip()
            .and_then(|clip| clip.frame_at(self.elapsed, self.frame_interval))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Arc<ClipLibrary> {
        Arc::new(
            ClipLibrary::new()
                .with_clip(Clip::new("down", &[0, 1, 2, 3], true))
                .with_clip(Clip::new("up", &[12, 13, 14, 15], true))
                .with_clip(Clip::new("wave", &[20, 21, 22], false))
                .with_clip(Clip::new("downstop", &[0], true)),
        )
    }

    #[test]
    fn new_rejects_unknown_initial_clip() {
        assert!(Animation::new(library(), "sideways", 0.1).is_none());
        assert!(Animation::new(library(), "downstop", 0.1).is_some());
    }

    #[test]
    fn select_same_clip_keeps_elapsed() {
        let mut anim = Animation::new(library(), "down", 0.1).unwrap();
        anim.elapsed = 0.25;
        assert!(!anim.select("down"));
        assert_eq!(anim.elapsed, 0.25);
    }

    #[test]
    fn select_new_clip_resets_elapsed() {
        let mut anim = Animation::new(library(), "down", 0.1).unwrap();
        anim.elapsed = 0.25;
        assert!(anim.select("up"));
        assert_eq!(anim.current(), "up");
        assert_eq!(anim.elapsed, 0.0);
    }

    #[test]
    fn select_unknown_clip_is_noop() {
        let mut anim = Animation::new(library(), "down", 0.1).unwrap();
        anim.elapsed = 0.25;
        assert!(!anim.select("jump"));
        assert_eq!(anim.current(), "down");
        assert_eq!(anim.elapsed, 0.25);
    }

    #[test]
    fn looping_clip_wraps() {
        let clip = Clip::new("down", &[0, 1, 2, 3], true);
        assert_eq!(clip.frame_at(0.0, 0.1), Some(0));
        assert_eq!(clip.frame_at(0.15, 0.1), Some(1));
        assert_eq!(clip.frame_at(0.45, 0.1), Some(0));
    }

    #[test]
    fn one_shot_clip_holds_last_frame() {
        let clip = Clip::new("wave", &[20, 21, 22], false);
        assert_eq!(clip.frame_at(0.15, 0.1), Some(21));
        assert_eq!(clip.frame_at(5.0, 0.1), Some(22));
    }

    #[test]
    fn empty_clip_has_no_frame() {
        let clip = Clip::new("empty", &[], true);
        assert_eq!(clip.frame_at(1.0, 0.1), None);
    }

    #[test]
    fn advance_wraps_looping_accumulator() {
        let mut anim = Animation::new(library(), "up", 0.5).unwrap();
        anim.advance(2.25);
        assert!(anim.elapsed < 2.0);
        assert_eq!(anim.frame(), Some(12));
    }

    #[test]
    fn advance_keeps_one_shot_accumulator() {
        let mut anim = Animation::new(library(), "wave", 0.1).unwrap();
        anim.advance(3.0);
        assert_eq!(anim.elapsed, 3.0);
        assert_eq!(anim.frame(), Some(22));
    }
}
