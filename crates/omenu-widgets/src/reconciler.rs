#![forbid(unsafe_code)]

//! Render reconciliation.
//!
//! Turns the caller's items plus a resolved [`OverflowState`] into the node
//! sequence the container actually lays out. In an overflowing row:
//!
//! ```text
//! [item 0] [item 1] [indicator ···] [item 2 hidden] [item 3 hidden] [placeholder]
//! ```
//!
//! Overflowed items stay mounted so their widths remain measurable; they are
//! hidden and their event keys aliased so menu state ignores them. The
//! placeholder is always last and always invisible.

use crate::config::MenuBarConfig;
use crate::indicator::{IndicatorRole, build_indicator};
use crate::item::MenuItem;
use crate::measure::NodeRole;
use crate::resolver::{Boundary, OverflowState};

/// One node of the rendered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderNode {
    pub role: NodeRole,
    pub item: MenuItem,
}

impl RenderNode {
    fn new(role: NodeRole, item: MenuItem) -> Self {
        Self { role, item }
    }

    /// Whether the node is painted and interactive.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.item.style.is_visible()
    }
}

/// The copy of an overflowed item that stays in the row.
fn hidden_copy(item: &MenuItem) -> MenuItem {
    MenuItem {
        event_key: item.event_key.hidden(),
        style: item.style.clone().hidden(),
        ..item.clone()
    }
}

/// Produce the rendered node sequence.
///
/// `state` is `None` before the first resolution; nothing is hidden then, and
/// the live indicator sits empty at the end of the row.
pub fn reconcile(
    items: &[MenuItem],
    state: Option<&OverflowState>,
    config: &MenuBarConfig,
) -> Vec<RenderNode> {
    let passthrough = items
        .iter()
        .enumerate()
        .map(|(i, item)| RenderNode::new(NodeRole::Item(i), item.clone()));

    if !config.mode.is_overflow_sensitive() {
        return passthrough.collect();
    }

    let state = state.filter(|_| config.applies_overflow());
    let boundary = state.map_or(Boundary::Unconstrained, OverflowState::boundary);
    let overflowed = state.map_or(&[][..], OverflowState::overflowed);

    let live = build_indicator(items, config, overflowed, IndicatorRole::Live);
    let live_at = match boundary {
        Boundary::Constrained { visible } => visible.min(items.len()),
        Boundary::Unconstrained => items.len(),
    };

    let mut nodes = Vec::with_capacity(items.len() + 2);
    let mut live = live.map(|item| RenderNode::new(NodeRole::Indicator, item));
    for (i, item) in items.iter().enumerate() {
        if i == live_at {
            nodes.extend(live.take());
        }
        let rendered = if boundary.is_overflowed(i) {
            hidden_copy(item)
        } else {
            item.clone()
        };
        nodes.push(RenderNode::new(NodeRole::Item(i), rendered));
    }
    nodes.extend(live);

    if let Some(placeholder) = build_indicator(items, config, &[], IndicatorRole::Placeholder) {
        nodes.push(RenderNode::new(NodeRole::Placeholder, placeholder));
    }

    nodes
}
