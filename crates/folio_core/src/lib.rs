//! Folio Core Runtime
//!
//! Foundational primitives for the Folio page host:
//!
//! - **Visual Tree**: A retained element tree with class selectors, text and
//!   animatable style properties, laid out with Taffy
//! - **Style Properties**: Optional per-field render properties that
//!   animations interpolate and write back
//! - **Event Dispatch**: Scroll, resize and frame events delivered to
//!   removable listeners
//!
//! # Example
//!
//! ```rust
//! use folio_core::{LayoutBox, StyleProps, VisualTree};
//!
//! let mut tree = VisualTree::new(1280.0, 720.0);
//! let root = tree.root();
//! let hero = tree.append(root, "section", &["hero"], LayoutBox::height(720.0)).unwrap();
//! tree.apply_style(hero, &StyleProps::opacity(0.5));
//!
//! assert_eq!(tree.style(hero).and_then(|s| s.opacity), Some(0.5));
//! ```

pub mod error;
pub mod events;
pub mod layout;
pub mod style;
pub mod tree;

pub use error::{CoreError, Result};
pub use events::{
    event_types, Event, EventData, EventDispatcher, EventType, ListenerId, ListenerReaper,
    Viewport,
};
pub use layout::{LayoutBox, LayoutNodeId, LayoutTree, Rect};
pub use style::{Property, Rgba, StyleProps};
pub use tree::{Element, ElementId, VisualTree};
