#![forbid(unsafe_code)]

//! A single-row terminal layout surface.
//!
//! [`CellSurface`] lays a rendered node sequence out left to right in cells,
//! the way a non-wrapping flex row would: every node takes its natural width,
//! regardless of how much room the container has. Nodes past the right edge
//! are laid out but clipped when drawn.
//!
//! # Invariants
//!
//! - `display: none` nodes take no space and report no natural width.
//! - `visibility: hidden` nodes take space but draw blanks and never hit-test.
//! - A node's natural width depends only on its title and the padding.

use omenu_core::width::grapheme_widths;
use omenu_core::{EventKey, Rect, TextWidthProbe};

use crate::measure::{LayoutSurface, NodeRole};
use crate::reconciler::RenderNode;

/// One node after layout.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Placed {
    role: NodeRole,
    event_key: EventKey,
    title: String,
    area: Rect,
    visible: bool,
}

/// In-memory row of terminal cells.
#[derive(Debug, Clone)]
pub struct CellSurface {
    width: u16,
    attached: bool,
    probe: TextWidthProbe,
    placed: Vec<Placed>,
}

impl CellSurface {
    /// An attached surface `width` cells wide.
    pub fn new(width: u16) -> Self {
        Self {
            width,
            attached: true,
            probe: TextWidthProbe::default(),
            placed: Vec::new(),
        }
    }

    /// Use a different horizontal padding around titles.
    #[must_use]
    pub fn with_padding(mut self, padding: u16) -> Self {
        self.probe = TextWidthProbe::new(padding);
        self
    }

    /// Container width in cells.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Change the container width. Existing layout is kept.
    pub fn set_width(&mut self, width: u16) {
        self.width = width;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Detach the surface. Measurements fail until it is attached again.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Lay `nodes` out from the left edge, replacing the previous layout.
    pub fn layout(&mut self, nodes: &[RenderNode]) {
        let mut x = 0u16;
        self.placed = nodes
            .iter()
            .filter(|node| node.item.style.is_laid_out())
            .map(|node| {
                let width = self.probe.measure(&node.item.title);
                let area = Rect::new(x, 0, width, 1);
                x = x.saturating_add(width);
                Placed {
                    role: node.role,
                    event_key: node.item.event_key.clone(),
                    title: node.item.title.clone(),
                    area,
                    visible: node.is_visible(),
                }
            })
            .collect();
    }

    /// Area occupied by the node with `role`, before clipping.
    pub fn node_area(&self, role: NodeRole) -> Option<Rect> {
        self.find(role).map(|p| p.area)
    }

    /// Sum of the natural widths of everything laid out.
    pub fn content_width(&self) -> u32 {
        self.placed.iter().map(|p| u32::from(p.area.width)).sum()
    }

    /// Draw the visible nodes into a string exactly `width` cells wide.
    ///
    /// Wide graphemes that would straddle a node's edge or the container's
    /// edge are dropped rather than split.
    pub fn render_line(&self) -> String {
        let width = usize::from(self.width);
        let mut cells: Vec<&str> = vec![" "; width];
        let padding = usize::from(self.probe.padding());

        for node in self.placed.iter().filter(|p| p.visible) {
            let end = usize::from(node.area.right()).min(width);
            let mut col = usize::from(node.area.x) + padding;
            for (grapheme, w) in grapheme_widths(&node.title) {
                if col + w > end {
                    break;
                }
                cells[col] = grapheme;
                for cell in &mut cells[col + 1..col + w] {
                    *cell = "";
                }
                col += w;
            }
        }

        cells.concat()
    }

    /// Event key of the visible node under column `x`.
    pub fn hit_test(&self, x: u16) -> Option<&EventKey> {
        if !Rect::row(self.width).contains(x, 0) {
            return None;
        }
        self.placed
            .iter()
            .find(|p| p.visible && p.area.contains(x, 0))
            .map(|p| &p.event_key)
    }

    fn find(&self, role: NodeRole) -> Option<&Placed> {
        self.placed.iter().find(|p| p.role == role)
    }
}

impl LayoutSurface for CellSurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn container_width(&self) -> Option<u16> {
        self.attached.then_some(self.width)
    }

    fn natural_width(&self, role: NodeRole) -> Option<u16> {
        self.find(role).map(|p| p.area.width)
    }
}
