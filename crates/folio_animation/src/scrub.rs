//! Scrub smoothing
//!
//! With a smoothed scrub the rendered progress does not jump to the scroll
//! progress; it catches up over `lag` seconds of frame time along an
//! ease-out cubic curve. Every new target restarts the catch-up from the
//! currently rendered value, so the rendered progress is continuous.

use crate::easing::Easing;

/// How rendered progress follows scroll progress
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScrubMode {
    /// Rendered progress equals scroll progress on every scroll event
    Immediate,
    /// Rendered progress catches up over the given number of seconds
    Smoothed(f32),
}

impl ScrubMode {
    pub fn from_lag(lag_secs: f32) -> Self {
        if lag_secs > 0.0 {
            ScrubMode::Smoothed(lag_secs)
        } else {
            ScrubMode::Immediate
        }
    }
}

/// Tracks rendered progress for one scrubbed timeline
#[derive(Clone, Debug)]
pub struct Scrubber {
    mode: ScrubMode,
    current: f32,
    from: f32,
    target: f32,
    elapsed: f32,
}

impl Scrubber {
    pub fn new(mode: ScrubMode, initial: f32) -> Self {
        Self {
            mode,
            current: initial,
            from: initial,
            target: initial,
            elapsed: 0.0,
        }
    }

    pub fn mode(&self) -> ScrubMode {
        self.mode
    }

    /// Rendered progress
    pub fn value(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() <= f32::EPSILON
    }

    /// Point the scrubber at a new scroll progress
    pub fn set_target(&mut self, progress: f32) {
        match self.mode {
            ScrubMode::Immediate => {
                self.current = progress;
                self.from = progress;
                self.target = progress;
            }
            ScrubMode::Smoothed(_) => {
                if (progress - self.target).abs() > f32::EPSILON {
                    self.from = self.current;
                    self.target = progress;
                    self.elapsed = 0.0;
                }
            }
        }
    }

    /// Jump straight to the target
    pub fn snap(&mut self) {
        self.current = self.target;
        self.from = self.target;
    }

    /// Advance the catch-up by `dt_secs`. Returns true if the value moved.
    pub fn tick(&mut self, dt_secs: f32) -> bool {
        let ScrubMode::Smoothed(lag) = self.mode else {
            return false;
        };
        if self.is_settled() {
            return false;
        }

        self.elapsed += dt_secs;
        let t = (self.elapsed / lag).min(1.0);
        self.current = if t >= 1.0 {
            self.target
        } else {
            self.from + (self.target - self.from) * Easing::EaseOutCubic.apply(t)
        };
        true
    }
}
