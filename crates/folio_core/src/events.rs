//! Event dispatch system
//!
//! The host feeds scroll, resize and frame events through an
//! [`EventDispatcher`]. Listeners receive the event together with mutable
//! access to the visual tree and can be removed individually, which is how
//! animation scopes release everything they registered. Owners that cannot
//! reach the dispatcher when they go away queue removals through a
//! [`ListenerReaper`] instead.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::tree::VisualTree;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const SCROLL: EventType = 30;
    pub const RESIZE: EventType = 40;
    /// Animation frame (display refresh)
    pub const FRAME: EventType = 45;
}

/// Scroll offset and viewport dimensions at the time of an event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

/// A host event with associated data
#[derive(Clone, Debug)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug)]
pub enum EventData {
    Scroll { viewport: Viewport, delta_y: f32 },
    Resize { viewport: Viewport },
    Frame { dt_ms: f32, viewport: Viewport },
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData, timestamp: u64) -> Self {
        Self {
            event_type,
            data,
            timestamp,
        }
    }
}

new_key_type! {
    /// Handle for removing a registered listener
    pub struct ListenerId;
}

/// Shared queue of listeners to drop on the dispatcher's next pass
#[derive(Clone, Debug, Default)]
pub struct ListenerReaper {
    pending: Rc<RefCell<Vec<ListenerId>>>,
}

impl ListenerReaper {
    /// Queue listeners for removal
    pub fn schedule(&self, ids: impl IntoIterator<Item = ListenerId>) {
        self.pending.borrow_mut().extend(ids);
    }

    fn is_pending(&self, id: ListenerId) -> bool {
        self.pending.borrow().contains(&id)
    }

    fn take(&self) -> Vec<ListenerId> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }
}

/// Event handler function type
pub type EventHandler = Box<dyn FnMut(&Event, &mut VisualTree)>;

struct Listener {
    event_type: EventType,
    handler: EventHandler,
}

/// Dispatches events to registered handlers
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
    by_type: FxHashMap<EventType, SmallVec<[ListenerId; 4]>>,
    reaper: ListenerReaper,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            by_type: FxHashMap::default(),
            reaper: ListenerReaper::default(),
        }
    }

    /// Handle for queueing removals without borrowing the dispatcher
    pub fn reaper(&self) -> ListenerReaper {
        self.reaper.clone()
    }

    /// Register an event handler for an event type
    pub fn register<F>(&mut self, event_type: EventType, handler: F) -> ListenerId
    where
        F: FnMut(&Event, &mut VisualTree) + 'static,
    {
        self.reap();
        let id = self.listeners.insert(Listener {
            event_type,
            handler: Box::new(handler),
        });
        self.by_type.entry(event_type).or_default().push(id);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(listener) = self.listeners.remove(id) else {
            return false;
        };
        if let Some(ids) = self.by_type.get_mut(&listener.event_type) {
            ids.retain(|l| *l != id);
        }
        true
    }

    /// Dispatch an event to all handlers of its type, in registration order
    pub fn dispatch(&mut self, event: &mut Event, tree: &mut VisualTree) {
        self.reap();
        let Some(ids) = self.by_type.get(&event.event_type) else {
            return;
        };
        let ids = ids.clone();
        for id in ids {
            // A handler may have queued later listeners for removal.
            if self.reaper.is_pending(id) {
                continue;
            }
            if let Some(listener) = self.listeners.get_mut(id) {
                (listener.handler)(event, tree);
            }
        }
        self.reap();
    }

    /// Drop every listener queued through the reaper
    pub fn reap(&mut self) -> usize {
        self.reaper
            .take()
            .into_iter()
            .filter(|id| self.unregister(*id))
            .count()
    }

    /// Total number of live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners
            .keys()
            .filter(|id| !self.reaper.is_pending(*id))
            .count()
    }

    /// Number of live listeners registered for one event type
    pub fn listeners_for(&self, event_type: EventType) -> usize {
        self.by_type.get(&event_type).map_or(0, |ids| {
            ids.iter().filter(|id| !self.reaper.is_pending(**id)).count()
        })
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
