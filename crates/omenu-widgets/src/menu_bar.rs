#![forbid(unsafe_code)]

//! The overflow-aware horizontal menu bar.
//!
//! [`OverflowMenuBar`] owns the item set, its [`MeasurementCache`], the
//! resolved [`OverflowState`] and a [`ResizeDebouncer`]. The host drives it
//! with discrete lifecycle events and re-renders after each one that returns
//! `true`:
//!
//! ```ignore
//! let mut bar = OverflowMenuBar::new(MenuBarConfig::horizontal_root(), items);
//! surface.layout(&bar.render());
//! bar.mount(&surface, &mut listeners);
//! surface.layout(&bar.render());
//!
//! // Event loop:
//! bar.on_resize(new_width);
//! if bar.tick(&surface) {
//!     surface.layout(&bar.render());
//! }
//! ```
//!
//! # Phases
//!
//! `Unmeasured -> Measured -> Resolved`. Changing the items or the indicator
//! title drops the snapshot and the state together, returning to
//! `Unmeasured`; the next layout pass re-measures. A resize recomputes only
//! the state, against the cached snapshot.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Surface detached at capture | Skipped, retried at the next layout or tick |
//! | Non-horizontal mode | Resize and measurement are no-ops |
//! | Resize before mount or after unmount | Ignored |

use std::time::{Duration, Instant};

use omenu_runtime::{DebounceAction, ListenerId, ResizeDebouncer, ResizeSource, next_listener_id};

use crate::config::{ContainerTag, MenuBarConfig};
use crate::item::MenuItem;
use crate::measure::{LayoutSurface, MeasurementCache, MeasurementSnapshot};
use crate::reconciler::{RenderNode, reconcile};
use crate::resolver::{OverflowState, resolve};

/// Measurement lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No snapshot for the current item set.
    Unmeasured,
    /// Snapshot captured, no state resolved from it yet.
    Measured,
    /// Snapshot and state are both current.
    Resolved,
}

/// A horizontal menu row that folds trailing items into an overflow indicator.
#[derive(Debug)]
pub struct OverflowMenuBar {
    config: MenuBarConfig,
    items: Vec<MenuItem>,
    cache: MeasurementCache,
    state: Option<OverflowState>,
    debouncer: ResizeDebouncer,
    /// Width from a fire forced during `on_resize`, delivered at the next tick.
    forced_width: Option<u16>,
    listener: ListenerId,
    mounted: bool,
    recomputes: u64,
}

impl OverflowMenuBar {
    pub fn new(config: MenuBarConfig, items: Vec<MenuItem>) -> Self {
        let debouncer = ResizeDebouncer::new(config.debounce.clone());
        Self {
            config,
            items,
            cache: MeasurementCache::new(),
            state: None,
            debouncer,
            forced_width: None,
            listener: next_listener_id(),
            mounted: false,
            recomputes: 0,
        }
    }

    /// The node sequence to lay out.
    pub fn render(&self) -> Vec<RenderNode> {
        reconcile(&self.items, self.state.as_ref(), &self.config)
    }

    /// Mount onto a surface that has laid out [`render`](Self::render).
    ///
    /// Subscribes to resize notifications and performs the first measurement.
    /// Returns `true` if a state was resolved.
    pub fn mount<S, R>(&mut self, surface: &S, listeners: &mut R) -> bool
    where
        S: LayoutSurface + ?Sized,
        R: ResizeSource + ?Sized,
    {
        self.mounted = true;
        listeners.subscribe(self.listener);
        self.capture_and_resolve(surface)
    }

    /// Cancel any pending recomputation and unsubscribe.
    pub fn unmount<R: ResizeSource + ?Sized>(&mut self, listeners: &mut R) {
        let forced = self.forced_width.take().is_some();
        let cancelled = self.debouncer.cancel() || forced;
        listeners.unsubscribe(self.listener);
        self.mounted = false;
        tracing::debug!(
            target: "omenu.resize",
            listener = self.listener,
            cancelled,
            "menu bar unmounted"
        );
    }

    /// Replace the item set. Returns `true` if it changed.
    pub fn set_items(&mut self, items: Vec<MenuItem>) -> bool {
        if items == self.items {
            return false;
        }
        self.items = items;
        self.invalidate();
        true
    }

    /// Replace the indicator title. Returns `true` if it changed.
    pub fn set_overflowed_indicator(&mut self, title: impl Into<String>) -> bool {
        let title = title.into();
        if title == self.config.overflowed_indicator {
            return false;
        }
        self.config.overflowed_indicator = title;
        self.invalidate();
        true
    }

    /// A layout pass completed. Measures if the item set is unmeasured.
    ///
    /// Returns `true` if a state was resolved.
    pub fn on_layout<S: LayoutSurface + ?Sized>(&mut self, surface: &S) -> bool {
        if !self.mounted || self.phase() != Phase::Unmeasured {
            return false;
        }
        self.capture_and_resolve(surface)
    }

    /// Record a resize to `width`.
    pub fn on_resize(&mut self, width: u16) -> DebounceAction {
        self.on_resize_at(width, Instant::now())
    }

    /// Record a resize at a specific time (for testing).
    pub fn on_resize_at(&mut self, width: u16, now: Instant) -> DebounceAction {
        if !self.mounted || !self.config.mode.is_overflow_sensitive() {
            return DebounceAction::None;
        }
        let action = self.debouncer.handle_resize_at(width, now);
        if let DebounceAction::Fire { width, .. } = action {
            self.forced_width = Some(width);
        }
        action
    }

    /// Run a due recomputation.
    pub fn tick<S: LayoutSurface + ?Sized>(&mut self, surface: &S) -> bool {
        self.tick_at(surface, Instant::now())
    }

    /// Run a due recomputation at a specific time (for testing).
    ///
    /// Uses the width of the last resize in the burst. Returns `true` if the
    /// state was recomputed.
    pub fn tick_at<S: LayoutSurface + ?Sized>(&mut self, surface: &S, now: Instant) -> bool {
        if !self.mounted {
            return false;
        }
        let width = match self.forced_width.take() {
            Some(width) => width,
            None => match self.debouncer.tick_at(now) {
                DebounceAction::Fire { width, .. } => width,
                DebounceAction::None | DebounceAction::Deferred => return false,
            },
        };

        if self.cache.snapshot().is_none()
            && self
                .cache
                .capture(surface, self.config.mode, self.items.len())
                .is_err()
        {
            return false;
        }
        self.recompute(width)
    }

    /// Time until the next recomputation is due, if one is pending.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        if self.forced_width.is_some() {
            return Some(Duration::ZERO);
        }
        self.debouncer.time_until_fire(now)
    }

    pub fn phase(&self) -> Phase {
        match (self.cache.snapshot(), &self.state) {
            (None, _) => Phase::Unmeasured,
            (Some(_), None) => Phase::Measured,
            (Some(_), Some(_)) => Phase::Resolved,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> Option<&MeasurementSnapshot> {
        self.cache.snapshot()
    }

    #[inline]
    pub fn overflow_state(&self) -> Option<&OverflowState> {
        self.state.as_ref()
    }

    /// Number of state recomputations so far.
    #[inline]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    #[inline]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[inline]
    pub fn config(&self) -> &MenuBarConfig {
        &self.config
    }

    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Id this bar subscribes to resize notifications with.
    #[inline]
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }

    /// The resize debouncer, for stats and decision logs.
    #[inline]
    pub fn debouncer(&self) -> &ResizeDebouncer {
        &self.debouncer
    }

    /// See [`MenuBarConfig::container_class_name`].
    pub fn container_class_name(&self) -> String {
        self.config.container_class_name()
    }

    pub fn tag(&self) -> &ContainerTag {
        &self.config.tag
    }

    // --- Internal methods ---

    fn invalidate(&mut self) {
        self.cache.invalidate();
        self.state = None;
    }

    fn capture_and_resolve<S: LayoutSurface + ?Sized>(&mut self, surface: &S) -> bool {
        if self
            .cache
            .capture(surface, self.config.mode, self.items.len())
            .is_err()
        {
            return false;
        }
        match surface.container_width() {
            Some(width) => self.recompute(width),
            None => false,
        }
    }

    fn recompute(&mut self, container_width: u16) -> bool {
        let Some(snapshot) = self.cache.snapshot() else {
            return false;
        };
        let state = resolve(snapshot, container_width, &self.items);
        self.recomputes += 1;
        tracing::debug!(
            target: "omenu.measure",
            generation = snapshot.generation(),
            container_width,
            last_visible = ?state.last_visible_index(),
            overflowed = state.overflowed().len(),
            "overflow recomputed"
        );
        self.state = Some(state);
        true
    }
}
