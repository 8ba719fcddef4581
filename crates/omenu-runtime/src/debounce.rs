//! Trailing-edge resize debouncer.
//!
//! Resize notifications arrive in bursts while a window is dragged. Layout
//! recomputation only needs the final width of a burst, so the debouncer
//! collapses every burst into a single trailing fire.
//!
//! # Usage
//!
//! ```ignore
//! use omenu_runtime::debounce::{DebounceConfig, ResizeDebouncer};
//!
//! let mut debouncer = ResizeDebouncer::new(DebounceConfig::default());
//!
//! // On resize notification
//! debouncer.handle_resize(120);
//!
//! // On tick (called each frame)
//! if let DebounceAction::Fire { width, .. } = debouncer.tick() {
//!     relayout(width);
//! }
//! ```
//!
//! # Invariants
//!
//! - **Latest-wins**: a fire always carries the width of the most recent event.
//! - **Single slot**: at most one fire is pending; a new event reschedules it.
//! - **Quiet period**: a fire happens only after `delay_ms` with no new event,
//!   unless `max_wait_ms` has elapsed since the burst started.
//! - **Deterministic**: identical event sequences yield identical decisions.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `delay_ms = 0` | Fires on the first tick after an event |
//! | `cancel()` with nothing pending | Returns `false`, no state change |
//! | Tick with nothing pending | Returns `DebounceAction::None` |

#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x100000001b3;

/// Environment variable overriding [`DebounceConfig::delay_ms`].
pub const ENV_DELAY_MS: &str = "OMENU_RESIZE_DEBOUNCE_MS";
/// Environment variable setting [`DebounceConfig::max_wait_ms`].
pub const ENV_MAX_WAIT_MS: &str = "OMENU_RESIZE_MAX_WAIT_MS";

fn fnv_hash_bytes(hash: &mut u64, bytes: &[u8]) {
    for byte in bytes {
        *hash ^= *byte as u64;
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
}

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// Configuration for the resize debouncer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Quiet period after the last event before firing (ms).
    pub delay_ms: u64,

    /// Upper bound on how long a burst may defer a fire (ms).
    /// `None` lets a continuous burst defer indefinitely.
    pub max_wait_ms: Option<u64>,

    /// Enable decision logging (JSONL format).
    pub enable_logging: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay_ms: 150,
            max_wait_ms: None,
            enable_logging: false,
        }
    }
}

impl DebounceConfig {
    /// Set the quiet period.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Bound the deferral of a continuous burst.
    #[must_use]
    pub fn with_max_wait_ms(mut self, max_wait_ms: u64) -> Self {
        self.max_wait_ms = Some(max_wait_ms);
        self
    }

    /// Enable or disable decision logging.
    #[must_use]
    pub fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Defaults overridden by [`ENV_DELAY_MS`] and [`ENV_MAX_WAIT_MS`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by values from `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.delay_ms = ms,
                Err(err) => {
                    tracing::warn!(
                        target: "omenu.resize",
                        var = ENV_DELAY_MS, value = %raw, error = %err,
                        "ignoring invalid debounce delay"
                    );
                }
            }
        }
        if let Some(raw) = lookup(ENV_MAX_WAIT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.max_wait_ms = Some(ms),
                Err(err) => {
                    tracing::warn!(
                        target: "omenu.resize",
                        var = ENV_MAX_WAIT_MS, value = %raw, error = %err,
                        "ignoring invalid debounce max wait"
                    );
                }
            }
        }
        config
    }

    /// Serialize configuration to JSONL format.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let max_wait = self
            .max_wait_ms
            .map_or_else(|| "null".to_string(), |ms| ms.to_string());
        format!(
            r#"{{"event":"config","delay_ms":{},"max_wait_ms":{},"logging_enabled":{}}}"#,
            self.delay_ms, max_wait, self.enable_logging
        )
    }
}

/// Action returned by the debouncer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceAction {
    /// No action needed.
    None,

    /// The event was recorded; a fire is scheduled.
    Deferred,

    /// Recompute layout for the given width.
    Fire {
        width: u16,
        /// Events absorbed into this fire besides the last one.
        coalesced: u32,
        /// Time from the first event of the burst to the fire.
        waited: Duration,
        /// Whether `max_wait_ms` forced the fire.
        forced_by_max_wait: bool,
    },
}

/// One logged debouncer decision.
#[derive(Debug, Clone, PartialEq)]
pub struct DebounceLog {
    /// Index of the event or tick that produced this decision.
    pub event_idx: u64,
    /// Milliseconds since the first logged decision.
    pub elapsed_ms: f64,
    /// Decision label: `defer`, `fire`, `fire_max_wait`, or `cancel`.
    pub action: &'static str,
    /// Pending width after the decision.
    pub pending_width: Option<u16>,
    /// Width delivered by a fire.
    pub fired_width: Option<u16>,
    /// Events absorbed by a fire.
    pub coalesced: u32,
}

impl DebounceLog {
    /// Serialize to JSONL format.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let opt = |v: Option<u16>| v.map_or_else(|| "null".to_string(), |w| w.to_string());
        format!(
            r#"{{"event":"decision","idx":{},"elapsed_ms":{:.3},"action":"{}","pending_width":{},"fired_width":{},"coalesced":{}}}"#,
            self.event_idx,
            self.elapsed_ms,
            self.action,
            opt(self.pending_width),
            opt(self.fired_width),
            self.coalesced
        )
    }
}

/// Lifetime counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceStats {
    /// Resize events received.
    pub events: u64,
    /// Fires delivered.
    pub fires: u64,
    /// Pending fires dropped by `cancel()`.
    pub cancels: u64,
    /// Events absorbed into fires without being delivered individually.
    pub coalesced: u64,
}

/// Single-slot trailing debouncer for resize widths.
#[derive(Debug)]
pub struct ResizeDebouncer {
    config: DebounceConfig,

    /// Latest width not yet delivered.
    pending_width: Option<u16>,
    /// First event of the current burst.
    window_start: Option<Instant>,
    /// Most recent event.
    last_event: Option<Instant>,
    /// Events in the current burst.
    events_in_window: u32,

    event_count: u64,
    fires: u64,
    cancels: u64,
    coalesced: u64,

    log_start: Option<Instant>,
    logs: Vec<DebounceLog>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

impl ResizeDebouncer {
    /// Create a debouncer with the given configuration.
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            pending_width: None,
            window_start: None,
            last_event: None,
            events_in_window: 0,
            event_count: 0,
            fires: 0,
            cancels: 0,
            coalesced: 0,
            log_start: None,
            logs: Vec::new(),
        }
    }

    /// Active configuration.
    #[inline]
    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    /// Record a resize event.
    pub fn handle_resize(&mut self, width: u16) -> DebounceAction {
        self.handle_resize_at(width, Instant::now())
    }

    /// Record a resize event at a specific time (for testing).
    pub fn handle_resize_at(&mut self, width: u16, now: Instant) -> DebounceAction {
        self.event_count += 1;
        self.pending_width = Some(width);
        self.events_in_window = self.events_in_window.saturating_add(1);
        let window_start = *self.window_start.get_or_insert(now);
        self.last_event = Some(now);

        if self.max_wait_elapsed(window_start, now) {
            return self.fire_at(now, true);
        }

        self.log_decision(now, "defer", None, 0);
        DebounceAction::Deferred
    }

    /// Tick the debouncer (call each frame).
    pub fn tick(&mut self) -> DebounceAction {
        self.tick_at(Instant::now())
    }

    /// Tick at a specific time (for testing).
    pub fn tick_at(&mut self, now: Instant) -> DebounceAction {
        if self.pending_width.is_none() {
            return DebounceAction::None;
        }

        if let Some(last_event) = self.last_event
            && duration_since_or_zero(now, last_event) >= Duration::from_millis(self.config.delay_ms)
        {
            return self.fire_at(now, false);
        }

        if let Some(window_start) = self.window_start
            && self.max_wait_elapsed(window_start, now)
        {
            return self.fire_at(now, true);
        }

        DebounceAction::None
    }

    /// Drop any pending fire.
    ///
    /// Returns `true` if a fire was pending.
    pub fn cancel(&mut self) -> bool {
        if self.pending_width.take().is_none() {
            return false;
        }
        self.cancels += 1;
        self.reset_window();
        let now = self.last_event.unwrap_or_else(Instant::now);
        self.log_decision(now, "cancel", None, 0);
        tracing::trace!(target: "omenu.resize", cancels = self.cancels, "debounce cancelled");
        true
    }

    /// Time until the pending fire, or `None` if nothing is pending.
    pub fn time_until_fire(&self, now: Instant) -> Option<Duration> {
        self.pending_width?;
        let last_event = self.last_event?;

        let quiet = Duration::from_millis(self.config.delay_ms)
            .saturating_sub(duration_since_or_zero(now, last_event));

        let bounded = match (self.config.max_wait_ms, self.window_start) {
            (Some(max_wait), Some(start)) => {
                let cap = Duration::from_millis(max_wait)
                    .saturating_sub(duration_since_or_zero(now, start));
                quiet.min(cap)
            }
            _ => quiet,
        };
        Some(bounded)
    }

    /// Check if a fire is pending.
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending_width.is_some()
    }

    /// The width a pending fire would deliver.
    #[inline]
    pub fn pending_width(&self) -> Option<u16> {
        self.pending_width
    }

    /// Lifetime counters.
    pub fn stats(&self) -> DebounceStats {
        DebounceStats {
            events: self.event_count,
            fires: self.fires,
            cancels: self.cancels,
            coalesced: self.coalesced,
        }
    }

    /// Decision logs (if logging enabled).
    pub fn logs(&self) -> &[DebounceLog] {
        &self.logs
    }

    /// Clear decision logs.
    pub fn clear_logs(&mut self) {
        self.logs.clear();
        self.log_start = None;
    }

    /// Decision logs as JSONL, prefixed by the configuration line.
    #[must_use]
    pub fn decision_logs_jsonl(&self) -> String {
        std::iter::once(self.config.to_jsonl())
            .chain(self.logs.iter().map(DebounceLog::to_jsonl))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// FNV-1a checksum over the decision sequence (timing excluded).
    #[must_use]
    pub fn decision_checksum(&self) -> u64 {
        let mut hash = FNV_OFFSET_BASIS;
        for entry in &self.logs {
            fnv_hash_bytes(&mut hash, &entry.event_idx.to_le_bytes());
            fnv_hash_bytes(&mut hash, entry.action.as_bytes());
            fnv_hash_bytes(&mut hash, &entry.pending_width.unwrap_or(0).to_le_bytes());
            fnv_hash_bytes(&mut hash, &entry.fired_width.unwrap_or(0).to_le_bytes());
            fnv_hash_bytes(&mut hash, &entry.coalesced.to_le_bytes());
        }
        hash
    }

    // --- Internal methods ---

    fn max_wait_elapsed(&self, window_start: Instant, now: Instant) -> bool {
        self.config.max_wait_ms.is_some_and(|max_wait| {
            duration_since_or_zero(now, window_start) >= Duration::from_millis(max_wait)
        })
    }

    fn fire_at(&mut self, now: Instant, forced: bool) -> DebounceAction {
        let Some(width) = self.pending_width.take() else {
            return DebounceAction::None;
        };

        let waited = self
            .window_start
            .map(|s| duration_since_or_zero(now, s))
            .unwrap_or(Duration::ZERO);
        let coalesced = self.events_in_window.saturating_sub(1);

        self.fires += 1;
        self.coalesced += u64::from(coalesced);
        self.reset_window();

        let action = if forced { "fire_max_wait" } else { "fire" };
        self.log_decision(now, action, Some(width), coalesced);
        tracing::trace!(
            target: "omenu.resize",
            width,
            coalesced,
            waited_ms = waited.as_secs_f64() * 1000.0,
            forced,
            "debounce fire"
        );

        DebounceAction::Fire {
            width,
            coalesced,
            waited,
            forced_by_max_wait: forced,
        }
    }

    fn reset_window(&mut self) {
        self.window_start = None;
        self.events_in_window = 0;
    }

    fn log_decision(
        &mut self,
        now: Instant,
        action: &'static str,
        fired_width: Option<u16>,
        coalesced: u32,
    ) {
        if !self.config.enable_logging {
            return;
        }
        let start = *self.log_start.get_or_insert(now);
        self.logs.push(DebounceLog {
            event_idx: self.event_count,
            elapsed_ms: duration_since_or_zero(now, start).as_secs_f64() * 1000.0,
            action,
            pending_width: self.pending_width,
            fired_width,
            coalesced,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logging_config() -> DebounceConfig {
        DebounceConfig::default().with_logging(true)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn new_debouncer_has_nothing_pending() {
        let d = ResizeDebouncer::default();
        assert!(!d.has_pending());
        assert_eq!(d.config().delay_ms, 150);
        assert_eq!(d.stats(), DebounceStats::default());
    }

    #[test]
    fn single_event_fires_after_quiet_period() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();

        assert_eq!(d.handle_resize_at(100, base), DebounceAction::Deferred);
        assert_eq!(d.tick_at(base + ms(149)), DebounceAction::None);

        let action = d.tick_at(base + ms(150));
        assert!(
            matches!(action, DebounceAction::Fire { width: 100, coalesced: 0, forced_by_max_wait: false, .. }),
            "Expected fire, got {action:?}"
        );
        assert!(!d.has_pending());
        assert_eq!(d.tick_at(base + ms(400)), DebounceAction::None);
    }

    #[test]
    fn burst_collapses_to_one_fire_with_latest_width() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();
        let mut fires = Vec::new();

        for i in 0..10u16 {
            let t = base + ms(u64::from(i) * 14);
            d.handle_resize_at(200 - i * 10, t);
            if let DebounceAction::Fire { width, .. } = d.tick_at(t) {
                fires.push(width);
            }
        }
        for step in 0..=400u64 {
            if let DebounceAction::Fire { width, .. } = d.tick_at(base + ms(126 + step)) {
                fires.push(width);
            }
        }

        assert_eq!(fires, vec![110], "only the final width is delivered");
        let stats = d.stats();
        assert_eq!(stats.events, 10);
        assert_eq!(stats.fires, 1);
        assert_eq!(stats.coalesced, 9);
    }

    #[test]
    fn new_event_reschedules_pending_fire() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();

        d.handle_resize_at(100, base);
        d.handle_resize_at(90, base + ms(100));
        assert_eq!(d.tick_at(base + ms(200)), DebounceAction::None);
        assert!(matches!(
            d.tick_at(base + ms(250)),
            DebounceAction::Fire { width: 90, coalesced: 1, .. }
        ));
    }

    #[test]
    fn max_wait_forces_fire_during_endless_burst() {
        let mut d = ResizeDebouncer::new(DebounceConfig::default().with_max_wait_ms(300));
        let base = Instant::now();
        let mut forced = None;

        for i in 0..40u64 {
            let t = base + ms(i * 20);
            if let DebounceAction::Fire {
                width,
                forced_by_max_wait,
                ..
            } = d.handle_resize_at(500 + i as u16, t)
            {
                forced = Some((i, width, forced_by_max_wait));
                break;
            }
        }

        assert_eq!(forced, Some((15, 515, true)));
    }

    #[test]
    fn max_wait_fires_from_tick() {
        let mut d = ResizeDebouncer::new(
            DebounceConfig::default()
                .with_delay_ms(1_000)
                .with_max_wait_ms(200),
        );
        let base = Instant::now();
        d.handle_resize_at(80, base);
        d.handle_resize_at(81, base + ms(150));
        assert_eq!(d.tick_at(base + ms(199)), DebounceAction::None);
        assert!(matches!(
            d.tick_at(base + ms(200)),
            DebounceAction::Fire { width: 81, forced_by_max_wait: true, .. }
        ));
    }

    #[test]
    fn cancel_drops_pending_fire() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();
        d.handle_resize_at(100, base);

        assert!(d.cancel());
        assert!(!d.has_pending());
        assert_eq!(d.tick_at(base + ms(1_000)), DebounceAction::None);
        assert_eq!(d.stats().cancels, 1);
        assert_eq!(d.stats().fires, 0);
    }

    #[test]
    fn cancel_without_pending_is_noop() {
        let mut d = ResizeDebouncer::default();
        assert!(!d.cancel());
        assert_eq!(d.stats().cancels, 0);
    }

    #[test]
    fn time_until_fire_counts_down() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();
        assert_eq!(d.time_until_fire(base), None);

        d.handle_resize_at(100, base);
        assert_eq!(d.time_until_fire(base + ms(50)), Some(ms(100)));
        assert_eq!(d.time_until_fire(base + ms(500)), Some(Duration::ZERO));
    }

    #[test]
    fn time_until_fire_respects_max_wait() {
        let mut d = ResizeDebouncer::new(DebounceConfig::default().with_max_wait_ms(160));
        let base = Instant::now();
        d.handle_resize_at(100, base);
        d.handle_resize_at(101, base + ms(100));
        assert_eq!(d.time_until_fire(base + ms(100)), Some(ms(60)));
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut d = ResizeDebouncer::new(DebounceConfig::default().with_delay_ms(0));
        let base = Instant::now();
        d.handle_resize_at(42, base);
        assert!(matches!(
            d.tick_at(base),
            DebounceAction::Fire { width: 42, .. }
        ));
    }

    #[test]
    fn logging_captures_decisions() {
        let mut d = ResizeDebouncer::new(logging_config());
        let base = Instant::now();
        d.handle_resize_at(100, base);
        d.handle_resize_at(90, base + ms(10));
        d.tick_at(base + ms(200));

        let actions: Vec<_> = d.logs().iter().map(|l| l.action).collect();
        assert_eq!(actions, vec!["defer", "defer", "fire"]);
        assert_eq!(d.logs()[2].fired_width, Some(90));
        assert_eq!(d.logs()[2].coalesced, 1);
    }

    #[test]
    fn logging_disabled_records_nothing() {
        let mut d = ResizeDebouncer::default();
        let base = Instant::now();
        d.handle_resize_at(100, base);
        d.tick_at(base + ms(200));
        assert!(d.logs().is_empty());
    }

    #[test]
    fn jsonl_starts_with_config_line() {
        let mut d = ResizeDebouncer::new(logging_config());
        let base = Instant::now();
        d.handle_resize_at(64, base);
        d.cancel();

        let jsonl = d.decision_logs_jsonl();
        let lines: Vec<_> = jsonl.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains(r#""event":"config""#));
        assert!(lines[0].contains(r#""max_wait_ms":null"#));
        assert!(lines[1].contains(r#""action":"defer""#));
        assert!(lines[1].contains(r#""pending_width":64"#));
        assert!(lines[2].contains(r#""action":"cancel""#));
    }

    #[test]
    fn decision_checksum_is_stable() {
        let run = || {
            let mut d = ResizeDebouncer::new(logging_config());
            let base = Instant::now();
            for i in 0..5u16 {
                d.handle_resize_at(100 + i, base + ms(u64::from(i) * 30));
            }
            d.tick_at(base + ms(400));
            d.decision_checksum()
        };
        assert_eq!(run(), run());

        let mut other = ResizeDebouncer::new(logging_config());
        other.handle_resize_at(7, Instant::now());
        assert_ne!(run(), other.decision_checksum());
    }

    #[test]
    fn clear_logs_empties_buffer() {
        let mut d = ResizeDebouncer::new(logging_config());
        d.handle_resize_at(1, Instant::now());
        d.clear_logs();
        assert!(d.logs().is_empty());
    }

    #[test]
    fn config_from_lookup_overrides_defaults() {
        let config = DebounceConfig::from_lookup(|name| match name {
            ENV_DELAY_MS => Some("80".to_string()),
            ENV_MAX_WAIT_MS => Some(" 400 ".to_string()),
            _ => None,
        });
        assert_eq!(config.delay_ms, 80);
        assert_eq!(config.max_wait_ms, Some(400));
    }

    #[test]
    fn config_from_lookup_ignores_garbage() {
        let config = DebounceConfig::from_lookup(|name| match name {
            ENV_DELAY_MS => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(config, DebounceConfig::default());
    }

    #[tracing_test::traced_test]
    #[test]
    fn garbage_config_warns_under_resize_target() {
        let config = DebounceConfig::from_lookup(|name| match name {
            ENV_DELAY_MS => Some("soon".to_string()),
            ENV_MAX_WAIT_MS => Some("-1".to_string()),
            _ => None,
        });
        assert_eq!(config, DebounceConfig::default());
        assert!(logs_contain("omenu.resize"));
        assert!(logs_contain("ignoring invalid debounce delay"));
        assert!(logs_contain("ignoring invalid debounce max wait"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn fire_carries_last_width(
                widths in proptest::collection::vec(1u16..2000, 1..30),
                gap in 0u64..149,
            ) {
                let mut d = ResizeDebouncer::default();
                let base = Instant::now();
                let mut t = base;
                for &w in &widths {
                    prop_assert_eq!(d.handle_resize_at(w, t), DebounceAction::Deferred);
                    prop_assert_eq!(d.tick_at(t), DebounceAction::None);
                    t += ms(gap);
                }
                let last = *widths.last().unwrap();
                let fired = d.tick_at(t + ms(150));
                prop_assert!(
                    matches!(fired, DebounceAction::Fire { width, .. } if width == last),
                    "got {:?}", fired
                );
                prop_assert_eq!(d.stats().fires, 1);
            }
        }
    }
}
