//! Timeline orchestration for multiple tweens
//!
//! Tweens are placed at start times computed from a [`Position`] when they
//! are added. A timeline is either played in time (frame ticks) or driven
//! directly through its progress by a scroll trigger.

use std::str::FromStr;

use folio_core::{ElementId, VisualTree};
use slotmap::{new_key_type, SlotMap};

use crate::easing::Easing;
use crate::error::AnimationError;
use crate::tween::Tween;

new_key_type! {
    pub struct TimelineEntryId;
}

/// Where a tween is placed in a timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// Absolute time in seconds
    At(f32),
    /// Relative to the end of the previously added tween (`"+=0.2"`, `"-=0.1"`)
    AfterPrevious(f32),
    /// Relative to the start of the previously added tween (`"<"`, `"<0.1"`)
    WithPrevious(f32),
}

impl Default for Position {
    fn default() -> Self {
        Position::AfterPrevious(0.0)
    }
}

impl FromStr for Position {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnimationError::InvalidPosition(s.to_string());
        let token = s.trim();
        let number = |v: &str| -> Result<f32, AnimationError> {
            if v.is_empty() {
                Ok(0.0)
            } else {
                v.trim().parse::<f32>().map_err(|_| invalid())
            }
        };

        if let Some(rest) = token.strip_prefix("+=") {
            Ok(Position::AfterPrevious(number(rest)?))
        } else if let Some(rest) = token.strip_prefix("-=") {
            Ok(Position::AfterPrevious(-number(rest)?))
        } else if let Some(rest) = token.strip_prefix('<') {
            Ok(Position::WithPrevious(number(rest)?))
        } else if token.is_empty() {
            Err(invalid())
        } else {
            Ok(Position::At(number(token)?))
        }
    }
}

/// An entry in a timeline
#[derive(Clone, Debug)]
struct TimelineEntry {
    /// Start time in seconds from timeline start
    start: f32,
    tween: Tween,
}

/// Time-driven playback state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Paused,
    Forward,
    Reverse,
}

/// A timeline that orchestrates multiple tweens
#[derive(Clone, Debug)]
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    order: Vec<TimelineEntryId>,
    default_ease: Easing,
    duration: f32,
    time: f32,
    playback: Playback,
    reversed: bool,
    last_start: f32,
    last_end: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
            default_ease: Easing::EaseOutQuad,
            duration: 0.0,
            time: 0.0,
            playback: Playback::Paused,
            reversed: false,
            last_start: 0.0,
            last_end: 0.0,
        }
    }

    /// Builder: easing for tweens added without one
    pub fn default_ease(mut self, ease: Easing) -> Self {
        self.default_ease = ease;
        self
    }

    /// Add a tween at a position
    pub fn add(&mut self, tween: Tween, position: Position) -> TimelineEntryId {
        let start = match position {
            Position::At(t) => t,
            Position::AfterPrevious(d) => self.last_end + d,
            Position::WithPrevious(d) => self.last_start + d,
        }
        .max(0.0);
        let end = start + tween.total_duration();

        self.last_start = start;
        self.last_end = end;
        self.duration = self.duration.max(end);

        let id = self.entries.insert(TimelineEntry { start, tween });
        self.order.push(id);
        id
    }

    /// Builder form of [`Timeline::add`]
    pub fn with(mut self, tween: Tween, position: Position) -> Self {
        self.add(tween, position);
        self
    }

    /// Start time of an entry
    pub fn start_of(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id).map(|e| e.start)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback != Playback::Paused
    }

    /// Normalized position in the timeline
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return if self.time > 0.0 { 1.0 } else { 0.0 };
        }
        (self.time / self.duration).clamp(0.0, 1.0)
    }

    pub fn seek(&mut self, time: f32) {
        self.time = time.clamp(0.0, self.duration);
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.seek(progress.clamp(0.0, 1.0) * self.duration);
    }

    pub fn play(&mut self) {
        self.playback = Playback::Forward;
        self.reversed = false;
    }

    pub fn reverse(&mut self) {
        self.playback = Playback::Reverse;
        self.reversed = true;
    }

    /// Continue in the direction last played, unless already at that end
    pub fn resume(&mut self) {
        self.playback = match self.reversed {
            true if self.time > 0.0 => Playback::Reverse,
            false if self.time < self.duration => Playback::Forward,
            _ => Playback::Paused,
        };
    }

    pub fn pause(&mut self) {
        self.playback = Playback::Paused;
    }

    pub fn restart(&mut self) {
        self.time = 0.0;
        self.play();
    }

    /// Back to the start, paused
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.playback = Playback::Paused;
    }

    /// Jump to the end, paused
    pub fn complete(&mut self) {
        self.time = self.duration;
        self.playback = Playback::Paused;
    }

    /// Advance playback by `dt_secs`. Returns true if time moved.
    pub fn tick(&mut self, dt_secs: f32) -> bool {
        let before = self.time;
        match self.playback {
            Playback::Paused => return false,
            Playback::Forward => {
                self.time = (self.time + dt_secs).min(self.duration);
                if self.time >= self.duration {
                    self.playback = Playback::Paused;
                }
            }
            Playback::Reverse => {
                self.time = (self.time - dt_secs).max(0.0);
                if self.time <= 0.0 {
                    self.playback = Playback::Paused;
                }
            }
        }
        self.time != before
    }

    /// Resolve every tween against the tree, dropping tweens with no targets.
    ///
    /// Returns the number of tweens that remain.
    pub fn bind(&mut self, tree: &VisualTree) -> usize {
        let default_ease = self.default_ease;
        let entries = &mut self.entries;
        self.order.retain(|id| {
            let keep = entries
                .get_mut(*id)
                .map(|entry| entry.tween.bind(tree, default_ease) > 0)
                .unwrap_or(false);
            if !keep {
                entries.remove(*id);
            }
            keep
        });
        self.order.len()
    }

    /// Every element any tween in the timeline writes to
    pub fn targets(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(*id))
            .flat_map(|entry| entry.tween.targets().iter().copied())
    }

    /// Write the state at the current time, in insertion order
    pub fn render(&self, tree: &mut VisualTree) {
        for id in &self.order {
            if let Some(entry) = self.entries.get(*id) {
                entry.tween.render(self.time - entry.start, tree);
            }
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}
