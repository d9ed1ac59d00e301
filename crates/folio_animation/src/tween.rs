//! Tweens: one animation applied to an ordered group of targets
//!
//! A tween interpolates style properties (or, for the typing variant, the
//! revealed prefix of a label) over `duration` seconds. With a stagger each
//! successive target starts `stagger` seconds after the previous one.

use folio_core::{ElementId, StyleProps, VisualTree};
use smallvec::SmallVec;

use crate::easing::Easing;
use crate::text::typed_prefix;

/// What a tween writes
#[derive(Clone, Debug)]
enum TweenKind {
    Style {
        from: Option<StyleProps>,
        to: StyleProps,
    },
    Typing {
        text: String,
        initial: String,
    },
}

/// An animation over a group of targets
#[derive(Clone, Debug)]
pub struct Tween {
    targets: SmallVec<[ElementId; 4]>,
    kind: TweenKind,
    duration: f32,
    ease: Option<Easing>,
    stagger: f32,
    /// Resolved start props per target, filled on bind
    starts: Vec<StyleProps>,
}

impl Tween {
    /// Animate from each target's current style to `to`
    pub fn to(targets: impl IntoIterator<Item = ElementId>, to: StyleProps) -> Self {
        Self::with_kind(targets, TweenKind::Style { from: None, to })
    }

    /// Animate from explicit start props to `to`
    pub fn from_to(
        targets: impl IntoIterator<Item = ElementId>,
        from: StyleProps,
        to: StyleProps,
    ) -> Self {
        Self::with_kind(
            targets,
            TweenKind::Style {
                from: Some(from),
                to,
            },
        )
    }

    /// Reveal `text` character by character on a single target
    pub fn typing(target: ElementId, text: impl Into<String>) -> Self {
        Self::with_kind(
            [target],
            TweenKind::Typing {
                text: text.into(),
                initial: String::new(),
            },
        )
    }

    fn with_kind(targets: impl IntoIterator<Item = ElementId>, kind: TweenKind) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            kind,
            duration: 0.5,
            ease: None,
            stagger: 0.0,
            starts: Vec::new(),
        }
    }

    /// Builder: duration in seconds
    pub fn duration(mut self, secs: f32) -> Self {
        self.duration = secs.max(0.0);
        self
    }

    /// Builder: easing (falls back to the timeline default when unset)
    pub fn ease(mut self, ease: Easing) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Builder: delay in seconds between successive targets
    pub fn stagger(mut self, secs: f32) -> Self {
        self.stagger = secs.max(0.0);
        self
    }

    /// Builder: text shown before typing starts
    pub fn initial_text(mut self, initial: impl Into<String>) -> Self {
        if let TweenKind::Typing { initial: slot, .. } = &mut self.kind {
            *slot = initial.into();
        }
        self
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.kind, TweenKind::Typing { .. })
    }

    /// Length including the stagger of the last target
    pub fn total_duration(&self) -> f32 {
        let extra = self.targets.len().saturating_sub(1) as f32 * self.stagger;
        self.duration + extra
    }

    /// Resolve targets and start values against the tree.
    ///
    /// Targets no longer present are dropped. Returns the number that remain.
    pub(crate) fn bind(&mut self, tree: &VisualTree, default_ease: Easing) -> usize {
        self.targets.retain(|t| tree.contains(*t));
        if self.ease.is_none() {
            self.ease = Some(default_ease);
        }
        if let TweenKind::Style { from, to } = &self.kind {
            self.starts = self
                .targets
                .iter()
                .map(|t| match from {
                    Some(from) => from.clone(),
                    None => tree
                        .style(*t)
                        .map(|current| current.capture(to))
                        .unwrap_or_default(),
                })
                .collect();
        }
        self.targets.len()
    }

    /// Eased progress of target `index` at `local_time` seconds into the tween
    pub fn progress_of(&self, index: usize, local_time: f32) -> f32 {
        let offset = index as f32 * self.stagger;
        let raw = if self.duration <= 0.0 {
            if local_time >= offset {
                1.0
            } else {
                0.0
            }
        } else {
            ((local_time - offset) / self.duration).clamp(0.0, 1.0)
        };
        self.ease.unwrap_or_default().apply(raw)
    }

    /// Write every target's state at `local_time` seconds into the tween
    pub fn render(&self, local_time: f32, tree: &mut VisualTree) {
        match &self.kind {
            TweenKind::Style { to, .. } => {
                for (index, (target, start)) in
                    self.targets.iter().zip(self.starts.iter()).enumerate()
                {
                    let eased = self.progress_of(index, local_time);
                    tree.apply_style(*target, &start.lerp(to, eased));
                }
            }
            TweenKind::Typing { text, initial } => {
                for (index, target) in self.targets.iter().enumerate() {
                    let eased = self.progress_of(index, local_time);
                    let shown = typed_prefix(text, eased);
                    let shown = if shown.is_empty() {
                        initial.clone()
                    } else {
                        shown
                    };
                    if tree.text(*target) != Some(shown.as_str()) {
                        tree.set_text(*target, Some(shown));
                    }
                }
            }
        }
    }
}
