//! Headless page host
//!
//! [`Page`] owns the visual tree, the event dispatcher and the scroll
//! position. Sections are built once, detached; mounting a section attaches
//! it to the layout and binds its animation context, unmounting releases the
//! context and detaches the section again.

use anyhow::{Context, Result};
use folio_animation::{AnimationContext, ContextHandle};
use folio_core::{
    event_types, ElementId, Event, EventData, EventDispatcher, EventType, Property, StyleProps,
    Viewport, VisualTree,
};
use tracing::{debug, info};

use crate::config::FolioConfig;
use crate::sections::SectionKind;

struct SectionSlot {
    kind: SectionKind,
    root: ElementId,
    handle: Option<ContextHandle>,
}

/// The portfolio page
pub struct Page {
    tree: VisualTree,
    dispatcher: EventDispatcher,
    sections: Vec<SectionSlot>,
    scroll_y: f32,
    timestamp: u64,
}

impl Page {
    /// Build every section's markup; nothing is mounted yet
    pub fn new(config: &FolioConfig) -> Result<Self> {
        config.validate()?;
        let mut tree = VisualTree::new(config.viewport.width, config.viewport.height);
        let body = tree.root();

        let mut sections = Vec::with_capacity(SectionKind::ALL.len());
        for kind in SectionKind::ALL {
            let root = kind
                .section()
                .build(&mut tree, body, config)
                .with_context(|| format!("failed to build {kind} section"))?;
            tree.set_attached(root, false);
            sections.push(SectionSlot {
                kind,
                root,
                handle: None,
            });
        }
        tree.compute_layout();

        Ok(Self {
            tree,
            dispatcher: EventDispatcher::new(),
            sections,
            scroll_y: 0.0,
            timestamp: 0,
        })
    }

    /// Mount every section in page order
    pub fn mount_all(&mut self) -> Result<()> {
        for kind in SectionKind::ALL {
            self.mount(kind)?;
        }
        Ok(())
    }

    /// Attach a section and bind its animations. Mounting twice is a no-op.
    pub fn mount(&mut self, kind: SectionKind) -> Result<()> {
        let Some(index) = self.slot_index(kind) else {
            return Ok(());
        };
        if self.sections[index].handle.is_some() {
            debug!(section = %kind, "already mounted");
            return Ok(());
        }

        let root = self.sections[index].root;
        self.tree.set_attached(root, true);

        let mut ctx = AnimationContext::new(kind.name(), root);
        if let Err(err) = kind.section().choreograph(&mut ctx, &mut self.tree) {
            ctx.revert(&mut self.tree);
            self.tree.set_attached(root, false);
            return Err(err.context(format!("failed to choreograph {kind} section")));
        }
        let bindings = ctx.binding_count();
        self.sections[index].handle = Some(ContextHandle::attach(ctx, &mut self.dispatcher));

        info!(section = %kind, bindings, "mounted");
        self.refresh();
        Ok(())
    }

    /// Release a section's animations, revert its elements and detach it
    pub fn unmount(&mut self, kind: SectionKind) {
        let Some(index) = self.slot_index(kind) else {
            return;
        };
        let Some(handle) = self.sections[index].handle.take() else {
            return;
        };
        handle.release(&mut self.dispatcher, &mut self.tree);
        self.tree.set_attached(self.sections[index].root, false);

        info!(section = %kind, "unmounted");
        self.refresh();
    }

    pub fn is_mounted(&self, kind: SectionKind) -> bool {
        self.slot_index(kind)
            .is_some_and(|i| self.sections[i].handle.is_some())
    }

    /// Scroll to an absolute offset, clamped to the document
    pub fn scroll_to(&mut self, y: f32) {
        let target = y.clamp(0.0, self.max_scroll());
        let delta_y = target - self.scroll_y;
        self.scroll_y = target;
        self.emit(
            event_types::SCROLL,
            EventData::Scroll {
                viewport: self.viewport(),
                delta_y,
            },
        );
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.scroll_y + dy);
    }

    /// Advance one frame of `dt_ms` milliseconds
    pub fn tick(&mut self, dt_ms: f32) {
        self.emit(
            event_types::FRAME,
            EventData::Frame {
                dt_ms,
                viewport: self.viewport(),
            },
        );
    }

    /// Resize the viewport, re-layout and re-evaluate every trigger
    pub fn resize(&mut self, width: f32, height: f32) {
        self.tree.resize(width, height);
        debug!(width, height, "resized");
        self.refresh();
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.tree.viewport_size();
        Viewport {
            scroll_y: self.scroll_y,
            width,
            height,
        }
    }

    pub fn max_scroll(&self) -> f32 {
        let (_, height) = self.tree.viewport_size();
        (self.tree.document_height() - height).max(0.0)
    }

    pub fn tree(&self) -> &VisualTree {
        &self.tree
    }

    pub fn section_root(&self, kind: SectionKind) -> Option<ElementId> {
        self.slot_index(kind).map(|i| self.sections[i].root)
    }

    /// Elements carrying `class`, in document order
    pub fn query(&self, class: &str) -> Vec<ElementId> {
        self.tree.query(self.tree.root(), class)
    }

    /// Style of the `index`th element carrying `class`
    pub fn style_of(&self, class: &str, index: usize) -> Option<&StyleProps> {
        let id = *self.query(class).get(index)?;
        self.tree.style(id)
    }

    /// Resolved value of one property of the `index`th element carrying `class`
    pub fn property_of(&self, class: &str, index: usize, property: Property) -> Option<f32> {
        self.style_of(class, index).map(|s| s.resolved(property))
    }

    /// Text of the `index`th element carrying `class`
    pub fn text_of(&self, class: &str, index: usize) -> Option<&str> {
        let id = *self.query(class).get(index)?;
        self.tree.text(id)
    }

    fn slot_index(&self, kind: SectionKind) -> Option<usize> {
        self.sections.iter().position(|s| s.kind == kind)
    }

    /// Clamp the scroll offset to the current layout and re-evaluate triggers
    fn refresh(&mut self) {
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
        self.emit(
            event_types::RESIZE,
            EventData::Resize {
                viewport: self.viewport(),
            },
        );
    }

    fn emit(&mut self, event_type: EventType, data: EventData) {
        self.timestamp += 1;
        let mut event = Event::new(event_type, data, self.timestamp);
        self.dispatcher.dispatch(&mut event, &mut self.tree);
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for slot in &mut self.sections {
            if let Some(handle) = slot.handle.take() {
                handle.release(&mut self.dispatcher, &mut self.tree);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Page {
        Page::new(&FolioConfig::default()).unwrap()
    }

    #[test]
    fn test_new_page_is_unmounted() {
        let page = page();
        assert!(SectionKind::ALL.iter().all(|k| !page.is_mounted(*k)));
        assert_eq!(page.max_scroll(), 0.0);
        assert_eq!(page.text_of("hero-name", 0), Some("MAHADEVAN REJI"));
    }

    #[test]
    fn test_mount_grows_document_and_clamps_scroll() {
        let mut page = page();
        page.mount(SectionKind::Hero).unwrap();
        page.mount(SectionKind::About).unwrap();
        assert_eq!(page.max_scroll(), 800.0 + 1400.0 - 800.0);

        page.scroll_to(10_000.0);
        assert_eq!(page.scroll_y(), page.max_scroll());
        page.scroll_by(-500.0);
        assert_eq!(page.scroll_y(), 900.0);

        page.unmount(SectionKind::About);
        assert_eq!(page.scroll_y(), 0.0);
    }

    #[test]
    fn test_mount_twice_is_noop() {
        let mut page = page();
        page.mount(SectionKind::About).unwrap();
        let words = page.query("word").len();
        page.mount(SectionKind::About).unwrap();
        assert_eq!(page.query("word").len(), words);
    }

    #[test]
    fn test_hero_load_plays_on_frames() {
        let mut page = page();
        page.mount(SectionKind::Hero).unwrap();
        assert_eq!(page.property_of("hero-name", 0, Property::X), Some(-100.0));
        assert_eq!(page.property_of("hero-name", 0, Property::Opacity), Some(0.0));

        for _ in 0..200 {
            page.tick(16.0);
        }
        assert_eq!(page.property_of("hero-name", 0, Property::X), Some(0.0));
        assert_eq!(page.property_of("hero-name", 0, Property::Opacity), Some(1.0));
        assert_eq!(page.property_of("hero-image", 0, Property::ClipRight), Some(0.0));
        assert_eq!(page.text_of("scroll-text", 0), Some("SCROLL"));
    }

    #[test]
    fn test_unmount_restores_markup() {
        let mut page = page();
        page.mount(SectionKind::Hero).unwrap();
        page.tick(500.0);
        page.unmount(SectionKind::Hero);

        assert!(page.style_of("hero-name", 0).unwrap().is_empty());
        assert_eq!(
            page.style_of("hero-image", 0).unwrap().clip_inset,
            Some([0.0, 100.0, 0.0, 0.0])
        );
        assert_eq!(page.text_of("scroll-text", 0), Some("SCROLL"));
    }
}
