//! Measurement cache for the natural widths of a menu row.
//!
//! This module provides [`MeasurementCache`], which captures a
//! [`MeasurementSnapshot`] of every item's natural width, plus the width of the
//! overflow indicator, from a laid-out [`LayoutSurface`].
//!
//! # Overview
//!
//! Item widths do not depend on the container width, only on the items
//! themselves. They are captured once after the row is laid out and reused by
//! every resize until the item set changes.
//!
//! Nodes are located by [`NodeRole`] rather than by position in the rendered
//! sequence, so the order in which the reconciler interleaves the indicator
//! and placeholder with real items never affects which width is read.
//!
//! # Invalidation
//!
//! Call [`MeasurementCache::invalidate`] when the item set or indicator title
//! changes. The snapshot is dropped and the generation bumps, so a state
//! resolved from the old snapshot can be recognized as stale.
//!
//! ```ignore
//! match msg {
//!     Msg::ItemsChanged(items) => {
//!         self.items = items;
//!         self.cache.invalidate();
//!     }
//!     Msg::Resize(_) => {
//!         // Widths are cached; only the container width changed.
//!     }
//! }
//! ```

#![forbid(unsafe_code)]

use std::fmt;

use omenu_core::MenuMode;

/// Identifies a rendered node for measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The caller's item at this index.
    Item(usize),
    /// The live overflow indicator.
    Indicator,
    /// The invisible indicator copy rendered only to be measured.
    Placeholder,
}

/// A surface that has laid out a rendered node sequence.
pub trait LayoutSurface {
    /// Whether the surface has a resolvable box model.
    fn is_attached(&self) -> bool;

    /// Current width of the container.
    fn container_width(&self) -> Option<u16>;

    /// Natural (unconstrained) width of the node with this role.
    ///
    /// `None` when no such node was laid out, or it is `display: none`.
    fn natural_width(&self, role: NodeRole) -> Option<u16>;
}

/// Natural widths of one item set.
///
/// Immutable once captured; replaced wholesale on the next capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasurementSnapshot {
    child_widths: Vec<u16>,
    indicator_width: u16,
    total_width: u32,
    generation: u64,
}

impl MeasurementSnapshot {
    /// Build a snapshot from known widths.
    pub fn new(child_widths: Vec<u16>, indicator_width: u16) -> Self {
        Self::with_generation(child_widths, indicator_width, 0)
    }

    fn with_generation(child_widths: Vec<u16>, indicator_width: u16, generation: u64) -> Self {
        let total_width = child_widths.iter().map(|&w| u32::from(w)).sum();
        Self {
            child_widths,
            indicator_width,
            total_width,
            generation,
        }
    }

    /// Natural width of each item, in item order.
    #[inline]
    pub fn child_widths(&self) -> &[u16] {
        &self.child_widths
    }

    /// Natural width of the overflow indicator.
    #[inline]
    pub fn indicator_width(&self) -> u16 {
        self.indicator_width
    }

    /// Sum of all item widths.
    #[inline]
    pub fn total_width(&self) -> u32 {
        self.total_width
    }

    /// Number of items measured.
    #[inline]
    pub fn len(&self) -> usize {
        self.child_widths.len()
    }

    /// Whether no items were measured.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.child_widths.is_empty()
    }

    /// Capture generation this snapshot belongs to.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Why a capture was skipped.
///
/// None of these are fatal: the previous state is kept and the capture is
/// retried at the next lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    /// The layout mode never overflows.
    ModeInapplicable(MenuMode),
    /// The surface is not attached or has no container width yet.
    Detached,
    /// No item of the current set has been laid out yet.
    MissingItem(usize),
}

impl fmt::Display for MeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModeInapplicable(mode) => {
                write!(f, "mode {mode} does not participate in overflow measurement")
            }
            Self::Detached => write!(f, "container is not attached to a layout surface"),
            Self::MissingItem(index) => write!(f, "item {index} has not been laid out"),
        }
    }
}

impl std::error::Error for MeasureError {}

/// Statistics about capture activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeasureStats {
    /// Successful captures.
    pub captures: u64,
    /// Captures skipped with a [`MeasureError`].
    pub skips: u64,
    /// Explicit invalidations.
    pub invalidations: u64,
}

/// Holds the latest [`MeasurementSnapshot`] for one container.
#[derive(Debug, Default)]
pub struct MeasurementCache {
    snapshot: Option<MeasurementSnapshot>,
    generation: u64,
    stats: MeasureStats,
}

impl MeasurementCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture natural widths for `item_count` items from `surface`.
    ///
    /// On success the previous snapshot is replaced. On failure it is left
    /// untouched and the reason is returned.
    pub fn capture<S: LayoutSurface + ?Sized>(
        &mut self,
        surface: &S,
        mode: MenuMode,
        item_count: usize,
    ) -> Result<&MeasurementSnapshot, MeasureError> {
        match Self::read(surface, mode, item_count) {
            Ok((child_widths, indicator_width)) => {
                self.generation = self.generation.wrapping_add(1);
                self.stats.captures += 1;
                let snapshot = MeasurementSnapshot::with_generation(
                    child_widths,
                    indicator_width,
                    self.generation,
                );
                tracing::debug!(
                    target: "omenu.measure",
                    generation = snapshot.generation,
                    items = snapshot.len(),
                    total_width = snapshot.total_width,
                    indicator_width = snapshot.indicator_width,
                    "captured measurements"
                );
                let snapshot = self.snapshot.insert(snapshot);
                Ok(&*snapshot)
            }
            Err(err) => {
                self.stats.skips += 1;
                tracing::debug!(target: "omenu.measure", reason = %err, "measurement skipped");
                Err(err)
            }
        }
    }

    fn read<S: LayoutSurface + ?Sized>(
        surface: &S,
        mode: MenuMode,
        item_count: usize,
    ) -> Result<(Vec<u16>, u16), MeasureError> {
        if !mode.is_overflow_sensitive() {
            return Err(MeasureError::ModeInapplicable(mode));
        }
        if !surface.is_attached() || surface.container_width().is_none() {
            return Err(MeasureError::Detached);
        }

        let widths: Vec<Option<u16>> = (0..item_count)
            .map(|i| surface.natural_width(NodeRole::Item(i)))
            .collect();
        if item_count > 0 && widths.iter().all(Option::is_none) {
            return Err(MeasureError::MissingItem(0));
        }
        // An item without a box (`display: none`) occupies no width.
        let child_widths = widths.into_iter().map(|w| w.unwrap_or(0)).collect();

        // No placeholder means no indicator could be built; reserve nothing.
        let indicator_width = surface.natural_width(NodeRole::Placeholder).unwrap_or(0);

        Ok((child_widths, indicator_width))
    }

    /// The current snapshot, if one has been captured since the last invalidation.
    #[inline]
    pub fn snapshot(&self) -> Option<&MeasurementSnapshot> {
        self.snapshot.as_ref()
    }

    /// Drop the snapshot and bump the generation.
    pub fn invalidate(&mut self) {
        if self.snapshot.take().is_some() {
            self.stats.invalidations += 1;
        }
        self.generation = self.generation.wrapping_add(1);
    }

    /// Current generation.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Capture statistics.
    #[inline]
    pub fn stats(&self) -> MeasureStats {
        self.stats
    }
}
