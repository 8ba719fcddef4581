#![forbid(unsafe_code)]

//! Resize notification sources.
//!
//! A component registers interest in viewport resizes under a [`ListenerId`]
//! when it mounts and withdraws it when it unmounts. The host event loop asks
//! the source which listeners are active and forwards each resize to them.
//!
//! Subscribing an id that is already active, or unsubscribing one that is
//! not, is a no-op, so repeated lifecycle calls never leak or double-deliver.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a resize listener.
pub type ListenerId = u64;

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Allocate a process-unique listener id.
pub fn next_listener_id() -> ListenerId {
    NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed)
}

/// A source of resize notifications.
pub trait ResizeSource {
    /// Register a listener. Returns `true` if it was not already registered.
    fn subscribe(&mut self, id: ListenerId) -> bool;

    /// Remove a listener. Returns `true` if it was registered.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    /// Whether a listener is registered.
    fn is_subscribed(&self, id: ListenerId) -> bool;
}

/// In-memory listener registry.
#[derive(Debug, Default)]
pub struct ResizeListeners {
    active: BTreeSet<ListenerId>,
    last_width: Option<u16>,
}

impl ResizeListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Registered listeners in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.active.iter().copied()
    }

    /// Record a resize and return the listeners it must be delivered to.
    pub fn notify(&mut self, width: u16) -> Vec<ListenerId> {
        self.last_width = Some(width);
        tracing::trace!(
            target: "omenu.resize",
            width,
            listeners = self.active.len(),
            "resize notification"
        );
        self.active.iter().copied().collect()
    }

    /// Width carried by the most recent notification.
    pub fn last_width(&self) -> Option<u16> {
        self.last_width
    }
}

impl ResizeSource for ResizeListeners {
    fn subscribe(&mut self, id: ListenerId) -> bool {
        let added = self.active.insert(id);
        if added {
            tracing::debug!(target: "omenu.resize", listener = id, "resize listener added");
        }
        added
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let removed = self.active.remove(&id);
        if removed {
            tracing::debug!(target: "omenu.resize", listener = id, "resize listener removed");
        }
        removed
    }

    fn is_subscribed(&self, id: ListenerId) -> bool {
        self.active.contains(&id)
    }
}
