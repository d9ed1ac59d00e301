//! Retained visual tree
//!
//! The tree stands in for the page DOM: elements carry a tag, class names,
//! optional text and animatable style properties. Block layout is delegated
//! to [`LayoutTree`], and absolute rectangles are derived from it on demand.
//!
//! Every style or text write bumps a mutation counter so hosts can observe
//! whether anything touched the tree during an event.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use taffy::prelude::{AvailableSpace, Size};

use crate::error::{CoreError, Result};
use crate::layout::{LayoutBox, LayoutNodeId, LayoutTree, Rect};
use crate::style::StyleProps;

new_key_type! {
    /// Unique identifier for an element in the visual tree
    pub struct ElementId;
}

/// A node in the visual tree
pub struct Element {
    pub tag: String,
    classes: SmallVec<[String; 2]>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: Option<String>,
    style: StyleProps,
    layout_box: LayoutBox,
    layout_node: LayoutNodeId,
    attached: bool,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn style(&self) -> &StyleProps {
        &self.style
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The page's element tree
pub struct VisualTree {
    elements: SlotMap<ElementId, Element>,
    root: ElementId,
    layout: LayoutTree,
    width: f32,
    height: f32,
    mutations: u64,
}

impl VisualTree {
    /// Create a tree with an empty `body` root sized to the viewport
    pub fn new(width: f32, height: f32) -> Self {
        let mut layout = LayoutTree::new();
        let mut elements = SlotMap::with_key();

        let root_box = LayoutBox::auto();
        let mut root_style = root_box.to_style(true);
        root_style.size.width = taffy::prelude::Dimension::Length(width);
        // A fresh taffy tree cannot fail to allocate a leaf.
        let layout_node = layout
            .create_node(root_style)
            .unwrap_or_else(|_| LayoutNodeId::default());

        let root = elements.insert(Element {
            tag: "body".to_string(),
            classes: SmallVec::new(),
            parent: None,
            children: Vec::new(),
            text: None,
            style: StyleProps::default(),
            layout_box: root_box,
            layout_node,
            attached: true,
        });

        let mut tree = Self {
            elements,
            root,
            layout,
            width,
            height,
            mutations: 0,
        };
        tree.compute_layout();
        tree
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Create an element and append it under `parent`
    pub fn append(
        &mut self,
        parent: ElementId,
        tag: &str,
        classes: &[&str],
        layout_box: LayoutBox,
    ) -> Result<ElementId> {
        if !self.elements.contains_key(parent) {
            return Err(CoreError::UnknownElement(parent));
        }

        let layout_node = self.layout.create_node(layout_box.to_style(true))?;
        let id = self.elements.insert(Element {
            tag: tag.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            parent: Some(parent),
            children: Vec::new(),
            text: None,
            style: StyleProps::default(),
            layout_box,
            layout_node,
            attached: true,
        });

        let parent_node = self.elements[parent].layout_node;
        self.layout.add_child(parent_node, layout_node);
        self.elements[parent].children.push(id);
        Ok(id)
    }

    /// Create a text-bearing element under `parent`
    pub fn append_text(
        &mut self,
        parent: ElementId,
        tag: &str,
        classes: &[&str],
        layout_box: LayoutBox,
        text: &str,
    ) -> Result<ElementId> {
        let id = self.append(parent, tag, classes, layout_box)?;
        self.elements[id].text = Some(text.to_string());
        Ok(id)
    }

    /// Remove an element and its whole subtree
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        let Some(element) = self.elements.remove(id) else {
            return;
        };
        if let Some(parent) = element.parent.and_then(|p| self.elements.get_mut(p)) {
            parent.children.retain(|c| *c != id);
        }
        for child in element.children {
            self.remove(child);
        }
        self.layout.remove_node(element.layout_node);
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(|e| e.parent)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.text.as_deref())
    }

    /// Replace an element's text content
    pub fn set_text(&mut self, id: ElementId, text: Option<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text;
            self.mutations += 1;
        }
    }

    pub fn style(&self, id: ElementId) -> Option<&StyleProps> {
        self.elements.get(id).map(|e| &e.style)
    }

    /// Overlay the set fields of `props` onto an element's style
    pub fn apply_style(&mut self, id: ElementId, props: &StyleProps) {
        if let Some(element) = self.elements.get_mut(id) {
            element.style.merge(props);
            self.mutations += 1;
        }
    }

    /// Replace an element's style wholesale
    pub fn replace_style(&mut self, id: ElementId, props: StyleProps) {
        if let Some(element) = self.elements.get_mut(id) {
            element.style = props;
            self.mutations += 1;
        }
    }

    /// Number of style and text writes since the tree was created
    pub fn mutation_count(&self) -> u64 {
        self.mutations
    }

    /// True if `id` is `ancestor` or lies beneath it
    pub fn is_within(&self, ancestor: ElementId, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Descendants of `scope` (excluding `scope`) carrying `class`, in document order
    pub fn query(&self, scope: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(element) = self.elements.get(id) else {
                continue;
            };
            if element.has_class(class) {
                found.push(id);
            }
            stack.extend(element.children.iter().rev().copied());
        }
        found
    }

    /// First descendant of `scope` carrying `class`
    pub fn query_first(&self, scope: ElementId, class: &str) -> Option<ElementId> {
        self.query(scope, class).into_iter().next()
    }

    /// Attach or detach an element from the rendered tree.
    ///
    /// Detached elements keep their state but take no space in layout.
    pub fn set_attached(&mut self, id: ElementId, attached: bool) {
        let Some(element) = self.elements.get_mut(id) else {
            return;
        };
        if element.attached == attached {
            return;
        }
        element.attached = attached;
        tracing::trace!(?id, attached, "attachment changed");
        let style = element.layout_box.to_style(attached);
        let node = element.layout_node;
        self.layout.set_style(node, style);
        self.compute_layout();
    }

    /// True if the element and every ancestor up to the root are attached
    pub fn is_visible(&self, id: ElementId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            match self.elements.get(node) {
                Some(element) if element.attached => current = element.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn viewport_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Resize the viewport and recompute layout
    pub fn resize(&mut self, width: f32, height: f32) {
        tracing::debug!(width, height, "viewport resized");
        self.width = width;
        self.height = height;
        let root = &self.elements[self.root];
        let mut style = root.layout_box.to_style(true);
        style.size.width = taffy::prelude::Dimension::Length(width);
        let node = root.layout_node;
        self.layout.set_style(node, style);
        self.compute_layout();
    }

    /// Recompute layout for the whole tree
    pub fn compute_layout(&mut self) {
        let root_node = self.elements[self.root].layout_node;
        self.layout.compute_layout(
            root_node,
            Size {
                width: AvailableSpace::Definite(self.width),
                height: AvailableSpace::MaxContent,
            },
        );
    }

    /// Absolute document rectangle of an element
    pub fn rect(&self, id: ElementId) -> Option<Rect> {
        let element = self.elements.get(id)?;
        let layout = self.layout.get_layout(element.layout_node)?;
        let mut rect = Rect {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
        };

        let mut parent = element.parent;
        while let Some(p) = parent {
            let parent_el = self.elements.get(p)?;
            if let Some(parent_layout) = self.layout.get_layout(parent_el.layout_node) {
                rect.x += parent_layout.location.x;
                rect.y += parent_layout.location.y;
            }
            parent = parent_el.parent;
        }
        Some(rect)
    }

    /// Total laid-out document height
    pub fn document_height(&self) -> f32 {
        self.rect(self.root).map(|r| r.height).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (VisualTree, ElementId, ElementId) {
        let mut tree = VisualTree::new(800.0, 600.0);
        let root = tree.root();
        let first = tree
            .append(root, "section", &["hero"], LayoutBox::height(600.0))
            .unwrap();
        let second = tree
            .append(root, "section", &["about"], LayoutBox::auto().padded(20.0))
            .unwrap();
        tree.append_text(second, "p", &["paragraph"], LayoutBox::height(100.0), "Hello")
            .unwrap();
        tree.append_text(second, "p", &["paragraph"], LayoutBox::height(50.0), "World")
            .unwrap();
        tree.compute_layout();
        (tree, first, second)
    }

    #[test]
    fn test_block_layout_stacks_vertically() {
        let (tree, first, second) = sample_tree();

        assert_eq!(tree.rect(first).unwrap().y, 0.0);
        let about = tree.rect(second).unwrap();
        assert_eq!(about.y, 600.0);
        assert_eq!(about.height, 190.0);

        let paragraphs = tree.query(second, "paragraph");
        assert_eq!(tree.rect(paragraphs[1]).unwrap().y, 600.0 + 20.0 + 100.0);
        assert_eq!(tree.document_height(), 790.0);
    }

    #[test]
    fn test_query_is_scoped_and_ordered() {
        let (tree, first, second) = sample_tree();

        let paragraphs = tree.query(second, "paragraph");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(tree.text(paragraphs[0]), Some("Hello"));
        assert_eq!(tree.text(paragraphs[1]), Some("World"));
        assert!(tree.query(first, "paragraph").is_empty());
    }

    #[test]
    fn test_detached_subtree_is_invisible_and_collapses() {
        let (mut tree, first, second) = sample_tree();
        let paragraph = tree.query_first(second, "paragraph").unwrap();

        tree.set_attached(first, false);
        assert!(!tree.is_visible(first));
        assert!(tree.is_visible(paragraph));
        assert_eq!(tree.rect(second).unwrap().y, 0.0);

        tree.set_attached(second, false);
        assert!(!tree.is_visible(paragraph));
    }

    #[test]
    fn test_mutations_are_counted() {
        let (mut tree, first, _) = sample_tree();
        let before = tree.mutation_count();

        tree.apply_style(first, &StyleProps::opacity(0.5));
        tree.set_text(first, Some("x".into()));
        assert_eq!(tree.mutation_count(), before + 2);
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, _, second) = sample_tree();
        let paragraphs = tree.query(second, "paragraph");

        tree.remove(second);
        assert!(!tree.contains(second));
        assert!(paragraphs.iter().all(|p| !tree.contains(*p)));
        assert_eq!(tree.children(tree.root()).len(), 1);
    }
}
