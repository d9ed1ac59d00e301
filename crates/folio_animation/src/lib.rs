//! Folio Animation System
//!
//! Scroll-linked choreography on top of the Folio visual tree.
//!
//! # Features
//!
//! - **Easing**: Named easing curves (`power3.out`, `back.out(1.7)`, ...)
//! - **Tweens**: Property and typing animations with per-target stagger
//! - **Timelines**: Sequence tweens with absolute and relative offsets
//! - **Scroll Triggers**: Map a trigger window to progress, scrubbed or toggled
//! - **Scoped Contexts**: Bind on mount, revert everything on unmount

pub mod context;
pub mod easing;
pub mod error;
pub mod scope;
pub mod scrub;
pub mod text;
pub mod timeline;
pub mod trigger;
pub mod tween;

pub use context::{AnimationContext, BindingId};
pub use easing::Easing;
pub use error::AnimationError;
pub use scope::{ContextHandle, SharedContext};
pub use scrub::{ScrubMode, Scrubber};
pub use text::{rejoin_words, split_words, typed_prefix, SplitText};
pub use timeline::{Playback, Position, Timeline, TimelineEntryId};
pub use trigger::{
    Edge, Region, ScrollTrigger, ToggleAction, ToggleActions, TriggerAction, TriggerPoint,
    TriggerWindow,
};
pub use tween::Tween;
