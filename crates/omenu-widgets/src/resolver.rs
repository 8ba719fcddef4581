#![forbid(unsafe_code)]

//! Overflow resolution.
//!
//! Decides, from cached natural widths and the current container width, how
//! many leading items stay in the row and which trailing items move into the
//! overflow indicator.
//!
//! # Algorithm
//!
//! 1. If the items fit (`total <= container`), nothing overflows.
//! 2. Otherwise accumulate item widths left to right. An item stays visible
//!    while `running_sum + indicator_width <= container`; the first item that
//!    breaks this, and every item after it, overflows.
//!
//! # Invariants
//!
//! - Everything fits exactly at the boundary: `total == container` is unconstrained.
//! - A constrained row always leaves room for the indicator.
//! - Shrinking the container never reveals more items; growing never hides more.
//! - Pure: identical inputs yield identical output.

use omenu_core::{ItemKey, MenuMode};

use crate::item::MenuItem;
use crate::measure::MeasurementSnapshot;

/// Where the row is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Every item fits; no indicator is shown.
    Unconstrained,
    /// Only the first `visible` items fit alongside the indicator.
    Constrained { visible: usize },
}

impl Boundary {
    /// Index of the last visible item: `-1` when none fit, `None` when unconstrained.
    pub fn last_visible_index(&self) -> Option<isize> {
        match *self {
            Self::Unconstrained => None,
            Self::Constrained { visible } => Some(visible as isize - 1),
        }
    }

    /// Whether the item at `index` is moved into the indicator.
    #[inline]
    pub fn is_overflowed(&self, index: usize) -> bool {
        match *self {
            Self::Unconstrained => false,
            Self::Constrained { visible } => index >= visible,
        }
    }

    /// Whether overflow is active.
    #[inline]
    pub fn is_constrained(&self) -> bool {
        matches!(self, Self::Constrained { .. })
    }
}

/// Compute the boundary for `container_width`.
#[must_use]
pub fn resolve_boundary(snapshot: &MeasurementSnapshot, container_width: u16) -> Boundary {
    let container = u32::from(container_width);
    if snapshot.total_width() <= container {
        return Boundary::Unconstrained;
    }

    let indicator = u32::from(snapshot.indicator_width());
    let mut running = 0u32;
    let mut visible = 0usize;
    for &width in snapshot.child_widths() {
        running = running.saturating_add(u32::from(width));
        if running.saturating_add(indicator) > container {
            break;
        }
        visible += 1;
    }

    Boundary::Constrained { visible }
}

/// The resolved partition of one item set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverflowState {
    boundary: Boundary,
    overflowed: Vec<MenuItem>,
}

impl OverflowState {
    /// State with nothing overflowed.
    pub fn unconstrained() -> Self {
        Self {
            boundary: Boundary::Unconstrained,
            overflowed: Vec::new(),
        }
    }

    /// Build the state for `boundary` over `items`.
    ///
    /// Overflowed items are copied in order, re-tagged for the vertical popup,
    /// and keyed by their own event key.
    pub fn build(boundary: Boundary, items: &[MenuItem]) -> Self {
        let overflowed = match boundary {
            Boundary::Unconstrained => Vec::new(),
            Boundary::Constrained { visible } => items
                .iter()
                .skip(visible)
                .map(|item| MenuItem {
                    key: ItemKey::from_event_key(&item.event_key),
                    mode: Some(MenuMode::VerticalLeft),
                    ..item.clone()
                })
                .collect(),
        };
        Self {
            boundary,
            overflowed,
        }
    }

    #[inline]
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// See [`Boundary::last_visible_index`].
    #[inline]
    pub fn last_visible_index(&self) -> Option<isize> {
        self.boundary.last_visible_index()
    }

    /// Items relocated into the indicator, in original order.
    #[inline]
    pub fn overflowed(&self) -> &[MenuItem] {
        &self.overflowed
    }

    /// Whether the item at `index` is hidden from the row.
    #[inline]
    pub fn is_overflowed(&self, index: usize) -> bool {
        self.boundary.is_overflowed(index)
    }
}

impl Default for OverflowState {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// Resolve `items` against `container_width`.
#[must_use]
pub fn resolve(
    snapshot: &MeasurementSnapshot,
    container_width: u16,
    items: &[MenuItem],
) -> OverflowState {
    OverflowState::build(resolve_boundary(snapshot, container_width), items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| MenuItem::new(format!("item{i}"), format!("Item {i}")).with_key(format!(".${i}")))
            .collect()
    }

    #[test]
    fn five_items_in_320_keeps_two() {
        let snapshot = MeasurementSnapshot::new(vec![100; 5], 50);
        let state = resolve(&snapshot, 320, &items(5));

        assert_eq!(state.last_visible_index(), Some(1));
        let keys: Vec<_> = state.overflowed().iter().map(|i| i.event_key.as_str()).collect();
        assert_eq!(keys, vec!["item2", "item3", "item4"]);
    }

    #[test]
    fn roomy_container_is_unconstrained() {
        let snapshot = MeasurementSnapshot::new(vec![50, 50, 50], 20);
        let state = resolve(&snapshot, 1000, &items(3));
        assert_eq!(state.boundary(), Boundary::Unconstrained);
        assert_eq!(state.last_visible_index(), None);
        assert!(state.overflowed().is_empty());
    }

    #[test]
    fn nothing_fits_beside_indicator() {
        let snapshot = MeasurementSnapshot::new(vec![500], 50);
        let state = resolve(&snapshot, 100, &items(1));
        assert_eq!(state.last_visible_index(), Some(-1));
        assert_eq!(state.overflowed().len(), 1);
        assert!(state.is_overflowed(0));
    }

    #[test]
    fn exact_fit_is_unconstrained() {
        let snapshot = MeasurementSnapshot::new(vec![100, 100, 100], 50);
        assert_eq!(resolve_boundary(&snapshot, 300), Boundary::Unconstrained);
        assert_eq!(
            resolve_boundary(&snapshot, 299),
            Boundary::Constrained { visible: 2 }
        );
    }

    #[test]
    fn indicator_reservation_is_inclusive() {
        // 100 + 100 + 50 == 250 fits exactly.
        let snapshot = MeasurementSnapshot::new(vec![100, 100, 100], 50);
        assert_eq!(
            resolve_boundary(&snapshot, 250),
            Boundary::Constrained { visible: 2 }
        );
    }

    #[test]
    fn empty_snapshot_is_unconstrained() {
        let snapshot = MeasurementSnapshot::new(Vec::new(), 10);
        assert_eq!(resolve_boundary(&snapshot, 0), Boundary::Unconstrained);
    }

    #[test]
    fn zero_width_container() {
        let snapshot = MeasurementSnapshot::new(vec![1, 1], 0);
        assert_eq!(
            resolve_boundary(&snapshot, 0),
            Boundary::Constrained { visible: 0 }
        );
    }

    #[test]
    fn overflowed_items_are_rekeyed_and_vertical() {
        let snapshot = MeasurementSnapshot::new(vec![100; 3], 50);
        let state = resolve(&snapshot, 160, &items(3));
        for item in state.overflowed() {
            assert_eq!(item.key.as_str(), item.event_key.as_str());
            assert_eq!(item.mode, Some(MenuMode::VerticalLeft));
        }
    }

    #[test]
    fn overflowed_copies_keep_payload() {
        let mut source = items(2);
        source[1] = source[1].clone().attr("href", "/help").child(MenuItem::new("about", "About"));
        let snapshot = MeasurementSnapshot::new(vec![100, 100], 10);
        let state = resolve(&snapshot, 150, &source);

        let moved = &state.overflowed()[0];
        assert_eq!(moved.title, "Item 1");
        assert_eq!(moved.attrs.get("href").map(String::as_str), Some("/help"));
        assert_eq!(moved.children.len(), 1);
    }

    #[test]
    fn boundary_helpers() {
        let b = Boundary::Constrained { visible: 2 };
        assert!(b.is_constrained());
        assert!(!b.is_overflowed(1));
        assert!(b.is_overflowed(2));
        assert!(!Boundary::Unconstrained.is_overflowed(99));
        assert_eq!(OverflowState::default(), OverflowState::unconstrained());
    }
}
