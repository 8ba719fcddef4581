#![forbid(unsafe_code)]

//! End-to-end overflow scenarios.
//!
//! Each scenario drives an [`OverflowMenuBar`] through a [`CellSurface`] with
//! zero padding, so a node's natural width equals its title's width and the
//! widths below can be read straight off the titles.

use std::time::{Duration, Instant};

use omenu_core::EventKey;
use omenu_runtime::{ResizeListeners, ResizeSource};
use omenu_widgets::{
    CellSurface, ItemStyle, LayoutSurface, MenuBarConfig, MenuItem, NodeRole, OverflowMenuBar,
    Phase, RenderNode,
};

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    bar: OverflowMenuBar,
    surface: CellSurface,
    listeners: ResizeListeners,
}

impl Harness {
    fn mount(widths: &[usize], indicator: usize, container: u16) -> Self {
        Self::mount_items(items(widths), indicator, container)
    }

    fn mount_items(items: Vec<MenuItem>, indicator: usize, container: u16) -> Self {
        let config = MenuBarConfig::horizontal_root().overflowed_indicator("·".repeat(indicator));
        let mut harness = Self {
            bar: OverflowMenuBar::new(config, items),
            surface: CellSurface::new(container).with_padding(0),
            listeners: ResizeListeners::new(),
        };
        harness.relayout();
        harness.bar.mount(&harness.surface, &mut harness.listeners);
        harness.relayout();
        harness
    }

    fn relayout(&mut self) {
        self.surface.layout(&self.bar.render());
    }

    /// Deliver a resize the way a host event loop would.
    fn resize_at(&mut self, width: u16, now: Instant) {
        self.surface.set_width(width);
        for id in self.listeners.notify(width) {
            assert_eq!(id, self.bar.listener_id());
            self.bar.on_resize_at(width, now);
        }
    }

    fn tick_at(&mut self, now: Instant) -> bool {
        let fired = self.bar.tick_at(&self.surface, now);
        if fired {
            self.relayout();
        }
        fired
    }

    fn nodes(&self) -> Vec<RenderNode> {
        self.bar.render()
    }

    fn overflowed_keys(&self) -> Vec<String> {
        self.bar
            .overflow_state()
            .map(|s| {
                s.overflowed()
                    .iter()
                    .map(|i| i.event_key.as_str().to_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn items(widths: &[usize]) -> Vec<MenuItem> {
    widths
        .iter()
        .enumerate()
        .map(|(i, &w)| MenuItem::new(format!("item{i}"), "x".repeat(w)))
        .collect()
}

fn indicator(nodes: &[RenderNode]) -> &RenderNode {
    nodes
        .iter()
        .find(|n| n.role == NodeRole::Indicator)
        .expect("live indicator rendered")
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_five_items_in_320() {
    let h = Harness::mount(&[100; 5], 50, 320);

    assert_eq!(h.bar.phase(), Phase::Resolved);
    let state = h.bar.overflow_state().unwrap();
    assert_eq!(state.last_visible_index(), Some(1));
    assert_eq!(h.overflowed_keys(), vec!["item2", "item3", "item4"]);

    let nodes = h.nodes();
    assert_eq!(nodes[2].role, NodeRole::Indicator);
    assert!(indicator(&nodes).is_visible());

    // Indicator sits right after the two visible items.
    assert_eq!(
        h.surface.hit_test(210).map(EventKey::as_str),
        Some("omenu-overflowed-indicator")
    );
    assert_eq!(h.surface.hit_test(150).map(EventKey::as_str), Some("item1"));
    // Hidden items keep their space but never hit.
    assert_eq!(h.surface.hit_test(300), None);
}

#[test]
fn scenario_b_everything_fits() {
    let h = Harness::mount(&[50, 50, 50], 20, 1000);

    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), None);
    assert!(h.overflowed_keys().is_empty());

    let nodes = h.nodes();
    assert!(!indicator(&nodes).item.style.is_laid_out());
    assert!(
        nodes
            .iter()
            .filter(|n| matches!(n.role, NodeRole::Item(_)))
            .all(RenderNode::is_visible)
    );
    assert_eq!(h.surface.natural_width(NodeRole::Indicator), None);
}

#[test]
fn scenario_c_nothing_fits() {
    let h = Harness::mount(&[500], 50, 100);

    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), Some(-1));
    assert_eq!(h.overflowed_keys(), vec!["item0"]);

    let nodes = h.nodes();
    assert_eq!(nodes[0].role, NodeRole::Indicator);
    assert!(nodes[0].is_visible());
    assert!(!nodes[1].is_visible());
    assert!(h.surface.render_line().starts_with('·'));
}

#[test]
fn scenario_d_burst_fires_once_with_last_width() {
    let mut h = Harness::mount(&[100; 5], 50, 1000);
    assert_eq!(h.bar.recompute_count(), 1);
    let t0 = Instant::now();

    // Ten events 10ms apart, narrowing to 320.
    let mut fires = 0;
    for i in 0..10u16 {
        let at = t0 + Duration::from_millis(u64::from(i) * 10);
        h.resize_at(410 - i * 10, at);
        if h.tick_at(at + Duration::from_millis(5)) {
            fires += 1;
        }
    }
    for ms in (100..=400).step_by(10) {
        if h.tick_at(t0 + Duration::from_millis(ms)) {
            fires += 1;
        }
    }

    assert_eq!(fires, 1);
    assert_eq!(h.bar.recompute_count(), 2);
    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), Some(1));

    let stats = h.bar.debouncer().stats();
    assert_eq!(stats.events, 10);
    assert_eq!(stats.fires, 1);
}

#[test]
fn scenario_e_unmount_during_pending_resize() {
    let mut h = Harness::mount(&[100; 5], 50, 1000);
    let t0 = Instant::now();
    h.resize_at(320, t0);
    assert!(h.bar.time_until_tick(t0).is_some());

    h.bar.unmount(&mut h.listeners);

    assert!(!h.tick_at(t0 + Duration::from_secs(1)));
    assert_eq!(h.bar.recompute_count(), 1);
    assert!(h.listeners.is_empty());
    assert!(!h.listeners.is_subscribed(h.bar.listener_id()));
    assert!(h.listeners.notify(200).is_empty());
    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), None);
}

// ============================================================================
// Lifecycle interplay
// ============================================================================

#[test]
fn item_change_during_pending_resize_uses_fresh_snapshot() {
    let mut h = Harness::mount(&[100; 5], 50, 1000);
    let t0 = Instant::now();
    h.resize_at(320, t0);

    assert!(h.bar.set_items(items(&[100, 100, 100])));
    h.relayout();
    assert!(h.bar.on_layout(&h.surface));

    assert!(h.tick_at(t0 + Duration::from_millis(150)));
    let state = h.bar.overflow_state().unwrap();
    assert_eq!(state.last_visible_index(), None, "300 fits in 320");
    assert_eq!(h.bar.snapshot().unwrap().len(), 3);
}

#[test]
fn tick_retries_capture_when_unmeasured() {
    let mut h = Harness::mount(&[100; 5], 50, 1000);
    let t0 = Instant::now();

    assert!(h.bar.set_items(items(&[100; 4])));
    h.relayout();
    h.resize_at(320, t0);

    assert!(h.tick_at(t0 + Duration::from_millis(150)));
    assert_eq!(h.bar.phase(), Phase::Resolved);
    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), Some(1));
}

#[test]
fn growing_back_hides_indicator() {
    let mut h = Harness::mount(&[100; 5], 50, 320);
    let t0 = Instant::now();
    h.resize_at(1000, t0);
    assert!(h.tick_at(t0 + Duration::from_millis(150)));

    let nodes = h.nodes();
    assert!(!indicator(&nodes).item.style.is_laid_out());
    assert!(indicator(&nodes).item.children.is_empty());
    // The placeholder still reserves its width for the next measurement.
    assert_eq!(h.surface.natural_width(NodeRole::Placeholder), Some(50));
}

#[test]
fn overflowed_event_keys_are_aliased_in_row() {
    let h = Harness::mount(&[100; 5], 50, 320);
    let hidden: Vec<_> = h
        .nodes()
        .into_iter()
        .filter(|n| matches!(n.role, NodeRole::Item(_)) && !n.is_visible())
        .map(|n| n.item.event_key.as_str().to_owned())
        .collect();
    assert_eq!(hidden, vec!["item2-hidden", "item3-hidden", "item4-hidden"]);
}

#[test]
fn detached_container_is_retried_on_layout() {
    let config = MenuBarConfig::horizontal_root().overflowed_indicator("·".repeat(50));
    let mut bar = OverflowMenuBar::new(config, items(&[100; 5]));
    let mut surface = CellSurface::new(320).with_padding(0);
    let mut listeners = ResizeListeners::new();
    surface.layout(&bar.render());
    surface.detach();

    assert!(!bar.mount(&surface, &mut listeners));
    assert!(bar.overflow_state().is_none());
    assert!(listeners.is_subscribed(bar.listener_id()));

    surface.attach();
    assert!(bar.on_layout(&surface));
    assert_eq!(bar.overflow_state().unwrap().last_visible_index(), Some(1));
}

#[test]
fn display_none_item_still_allows_overflow() {
    let mut list = items(&[10; 5]);
    list[4] = list[4].clone().style(ItemStyle::new().display_none());
    let h = Harness::mount_items(list, 3, 25);

    assert_eq!(h.bar.phase(), Phase::Resolved);
    assert_eq!(h.bar.snapshot().unwrap().child_widths(), &[10, 10, 10, 10, 0]);
    // 10 + 10 + 3 fits in 25, a third item would not.
    assert_eq!(h.bar.overflow_state().unwrap().last_visible_index(), Some(1));
    assert_eq!(h.overflowed_keys(), vec!["item2", "item3", "item4"]);
    assert_eq!(h.surface.render_line(), format!("{}···  ", "x".repeat(20)));
}
