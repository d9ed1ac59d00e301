//! Layout tree management

use slotmap::{new_key_type, SlotMap};
use taffy::prelude::*;

use crate::error::{CoreError, Result};

new_key_type! {
    pub struct LayoutNodeId;
}

/// Axis-aligned rectangle in document coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Block sizing for a visual element.
///
/// Elements stack vertically; an element without a fixed height grows to fit
/// its children.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub height: Option<f32>,
    pub padding_y: f32,
}

impl LayoutBox {
    /// Height determined by children
    pub fn auto() -> Self {
        Self::default()
    }

    /// Fixed height in pixels
    pub fn height(px: f32) -> Self {
        Self {
            height: Some(px),
            padding_y: 0.0,
        }
    }

    /// Builder: vertical padding on both edges
    pub fn padded(mut self, px: f32) -> Self {
        self.padding_y = px;
        self
    }

    pub(crate) fn to_style(self, visible: bool) -> Style {
        let pad = LengthPercentage::Length(self.padding_y);
        let zero = LengthPercentage::Length(0.0);
        Style {
            display: if visible { Display::Flex } else { Display::None },
            flex_direction: FlexDirection::Column,
            flex_shrink: 0.0,
            size: Size {
                width: Dimension::Percent(1.0),
                height: self.height.map_or(Dimension::Auto, Dimension::Length),
            },
            padding: taffy::geometry::Rect {
                left: zero,
                right: zero,
                top: pad,
                bottom: pad,
            },
            ..Default::default()
        }
    }
}

/// Maps between Folio node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: TaffyTree,
    node_map: SlotMap<LayoutNodeId, NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: Style) -> Result<LayoutNodeId> {
        let taffy_node = self
            .taffy
            .new_leaf(style)
            .map_err(|e| CoreError::Layout(e.to_string()))?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Set the style for a node
    pub fn set_style(&mut self, id: LayoutNodeId, style: Style) {
        if let Some(&taffy_node) = self.node_map.get(id) {
            let _ = self.taffy.set_style(taffy_node, style);
        }
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) {
        if let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        {
            let _ = self.taffy.add_child(parent_node, child_node);
        }
    }

    /// Compute layout for a tree rooted at the given node
    pub fn compute_layout(&mut self, root: LayoutNodeId, available_space: Size<AvailableSpace>) {
        if let Some(&taffy_node) = self.node_map.get(root) {
            if let Err(err) = self.taffy.compute_layout(taffy_node, available_space) {
                tracing::warn!(%err, "layout computation failed");
            }
        }
    }

    /// Get the computed layout for a node (location relative to its parent)
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            let _ = self.taffy.remove(taffy_node);
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}
