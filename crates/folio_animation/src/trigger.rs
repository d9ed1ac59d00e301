//! Scroll triggers
//!
//! A trigger window is described by two points, each pairing an edge of the
//! trigger element with an edge of the viewport (`"top 75%"` means "when the
//! element's top reaches 75% down the viewport"). The scroll offset at which
//! a point is reached is `element_top + element_edge - viewport_edge`.

use std::str::FromStr;

use folio_core::{ElementId, Rect, VisualTree};

use crate::error::AnimationError;
use crate::scrub::ScrubMode;

/// A position along an element or the viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
    /// Fraction of the extent (0.75 = 75%)
    Fraction(f32),
    Pixels(f32),
}

impl Edge {
    /// Offset from the leading edge for a box of `extent` pixels
    pub fn offset(&self, extent: f32) -> f32 {
        match self {
            Edge::Top => 0.0,
            Edge::Center => extent * 0.5,
            Edge::Bottom => extent,
            Edge::Fraction(f) => extent * f,
            Edge::Pixels(px) => *px,
        }
    }
}

impl FromStr for Edge {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnimationError::InvalidTriggerPoint(s.to_string());
        let token = s.trim();
        match token {
            "top" => Ok(Edge::Top),
            "center" => Ok(Edge::Center),
            "bottom" => Ok(Edge::Bottom),
            _ => {
                if let Some(pct) = token.strip_suffix('%') {
                    let value = pct.parse::<f32>().map_err(|_| invalid())?;
                    Ok(Edge::Fraction(value / 100.0))
                } else if let Some(px) = token.strip_suffix("px") {
                    Ok(Edge::Pixels(px.parse::<f32>().map_err(|_| invalid())?))
                } else {
                    Ok(Edge::Pixels(token.parse::<f32>().map_err(|_| invalid())?))
                }
            }
        }
    }
}

/// Element edge paired with a viewport edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    pub element: Edge,
    pub viewport: Edge,
}

impl TriggerPoint {
    pub fn new(element: Edge, viewport: Edge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this point is reached
    pub fn scroll_offset(&self, rect: Rect, viewport_height: f32) -> f32 {
        rect.y + self.element.offset(rect.height) - self.viewport.offset(viewport_height)
    }
}

impl FromStr for TriggerPoint {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(element), Some(viewport), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(AnimationError::InvalidTriggerPoint(s.to_string()));
        };
        let wrap = |_| AnimationError::InvalidTriggerPoint(s.to_string());
        Ok(Self {
            element: element.parse().map_err(wrap)?,
            viewport: viewport.parse().map_err(wrap)?,
        })
    }
}

/// Where the scroll position sits relative to a trigger window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Region {
    Before,
    Active,
    After,
}

/// Resolved scroll range of a trigger
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerWindow {
    pub start: f32,
    pub end: f32,
}

impl TriggerWindow {
    /// Normalized progress through the window, clamped to 0..=1
    pub fn progress(&self, scroll: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll >= self.start { 1.0 } else { 0.0 };
        }
        ((scroll - self.start) / span).clamp(0.0, 1.0)
    }

    pub fn region(&self, scroll: f32) -> Region {
        if scroll < self.start {
            Region::Before
        } else if scroll > self.end {
            Region::After
        } else {
            Region::Active
        }
    }
}

/// What a toggle trigger does to its timeline on a boundary crossing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToggleAction {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    #[default]
    None,
}

impl FromStr for ToggleAction {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "play" => ToggleAction::Play,
            "pause" => ToggleAction::Pause,
            "resume" => ToggleAction::Resume,
            "reverse" => ToggleAction::Reverse,
            "restart" => ToggleAction::Restart,
            "reset" => ToggleAction::Reset,
            "complete" => ToggleAction::Complete,
            "none" => ToggleAction::None,
            _ => return Err(AnimationError::InvalidToggleActions(s.to_string())),
        })
    }
}

/// Actions for onEnter, onLeave, onEnterBack and onLeaveBack
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: ToggleAction,
    pub on_leave: ToggleAction,
    pub on_enter_back: ToggleAction,
    pub on_leave_back: ToggleAction,
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self {
            on_enter: ToggleAction::Play,
            on_leave: ToggleAction::None,
            on_enter_back: ToggleAction::None,
            on_leave_back: ToggleAction::None,
        }
    }
}

impl ToggleActions {
    /// Actions fired when moving from region `from` to region `to`, in order
    pub fn transition(&self, from: Region, to: Region) -> Vec<ToggleAction> {
        match (from, to) {
            (Region::Before, Region::Active) => vec![self.on_enter],
            (Region::Active, Region::After) => vec![self.on_leave],
            (Region::After, Region::Active) => vec![self.on_enter_back],
            (Region::Active, Region::Before) => vec![self.on_leave_back],
            (Region::Before, Region::After) => vec![self.on_enter, self.on_leave],
            (Region::After, Region::Before) => vec![self.on_enter_back, self.on_leave_back],
            _ => Vec::new(),
        }
    }
}

impl FromStr for ToggleActions {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actions = s
            .split_whitespace()
            .map(|a| a.parse::<ToggleAction>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| AnimationError::InvalidToggleActions(s.to_string()))?;
        let [on_enter, on_leave, on_enter_back, on_leave_back] = actions.as_slice() else {
            return Err(AnimationError::InvalidToggleActions(s.to_string()));
        };
        Ok(Self {
            on_enter: *on_enter,
            on_leave: *on_leave,
            on_enter_back: *on_enter_back,
            on_leave_back: *on_leave_back,
        })
    }
}

/// How a trigger drives its timeline
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerAction {
    /// Progress follows scroll position
    Scrub(ScrubMode),
    /// Boundary crossings play, reverse, ... a time-driven timeline
    Toggle(ToggleActions),
}

/// Binds a timeline to a scroll range of a trigger element
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollTrigger {
    pub trigger: ElementId,
    pub start: TriggerPoint,
    pub end: TriggerPoint,
    pub action: TriggerAction,
}

impl ScrollTrigger {
    /// Scrubbed trigger with immediate progress
    pub fn new(trigger: ElementId, start: TriggerPoint, end: TriggerPoint) -> Self {
        Self {
            trigger,
            start,
            end,
            action: TriggerAction::Scrub(ScrubMode::Immediate),
        }
    }

    /// Parse the start and end points from strings
    pub fn parse(trigger: ElementId, start: &str, end: &str) -> Result<Self, AnimationError> {
        Ok(Self::new(trigger, start.parse()?, end.parse()?))
    }

    /// Builder: scrub with `lag_secs` of smoothing (0 = immediate)
    pub fn scrub(mut self, lag_secs: f32) -> Self {
        self.action = TriggerAction::Scrub(ScrubMode::from_lag(lag_secs));
        self
    }

    /// Builder: toggle actions instead of scrubbing
    pub fn toggle_actions(mut self, actions: ToggleActions) -> Self {
        self.action = TriggerAction::Toggle(actions);
        self
    }

    /// Scroll range for the trigger element's current layout
    pub fn window(&self, tree: &VisualTree, viewport_height: f32) -> Option<TriggerWindow> {
        let rect = tree.rect(self.trigger)?;
        Some(TriggerWindow {
            start: self.start.scroll_offset(rect, viewport_height),
            end: self.end.scroll_offset(rect, viewport_height),
        })
    }
}
