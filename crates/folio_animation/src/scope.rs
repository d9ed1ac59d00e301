//! Context lifetime management
//!
//! A [`ContextHandle`] connects an [`AnimationContext`] to the host's
//! [`EventDispatcher`]. Releasing the handle unregisters every listener it
//! installed and reverts the context, after which no update from this scope
//! reaches the tree again. A handle dropped without `release` queues its
//! listeners on the dispatcher's reaper, so they never outlive it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use folio_core::{
    event_types, Event, EventData, EventDispatcher, ListenerId, ListenerReaper, VisualTree,
};
use smallvec::SmallVec;
use tracing::debug;

use crate::context::AnimationContext;

/// Context shared between its handle and the listeners it registered
pub type SharedContext = Rc<RefCell<AnimationContext>>;

/// Owns the listeners of one mounted context
pub struct ContextHandle {
    context: SharedContext,
    listeners: SmallVec<[ListenerId; 3]>,
    alive: Rc<Cell<bool>>,
    reaper: ListenerReaper,
}

impl ContextHandle {
    /// Register scroll, resize and frame listeners for `context`
    pub fn attach(context: AnimationContext, dispatcher: &mut EventDispatcher) -> Self {
        let context: SharedContext = Rc::new(RefCell::new(context));
        let alive = Rc::new(Cell::new(true));
        let mut listeners = SmallVec::new();

        for event_type in [event_types::SCROLL, event_types::RESIZE, event_types::FRAME] {
            let context = Rc::clone(&context);
            let alive = Rc::clone(&alive);
            let id = dispatcher.register(event_type, move |event: &Event, tree: &mut VisualTree| {
                if !alive.get() {
                    return;
                }
                let Ok(mut ctx) = context.try_borrow_mut() else {
                    return;
                };
                match event.data {
                    EventData::Scroll { viewport, .. } | EventData::Resize { viewport } => {
                        ctx.on_scroll(tree, viewport);
                    }
                    EventData::Frame { dt_ms, .. } => {
                        ctx.on_frame(tree, dt_ms / 1000.0);
                    }
                    EventData::None => {}
                }
            });
            listeners.push(id);
        }

        debug!(
            context = %context.borrow().name(),
            listeners = listeners.len(),
            "attached animation context"
        );
        Self {
            context,
            listeners,
            alive,
            reaper: dispatcher.reaper(),
        }
    }

    pub fn context(&self) -> &SharedContext {
        &self.context
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    /// Unregister every listener and revert all effects of the context
    pub fn release(mut self, dispatcher: &mut EventDispatcher, tree: &mut VisualTree) {
        self.alive.set(false);
        for id in self.listeners.drain(..) {
            dispatcher.unregister(id);
        }
        let mut ctx = self.context.borrow_mut();
        ctx.revert(tree);
        debug!(context = %ctx.name(), "released animation context");
    }
}

impl Drop for ContextHandle {
    fn drop(&mut self) {
        self.alive.set(false);
        if !self.listeners.is_empty() {
            debug!(listeners = self.listeners.len(), "context dropped without release");
            self.reaper.schedule(self.listeners.drain(..));
        }
    }
}
