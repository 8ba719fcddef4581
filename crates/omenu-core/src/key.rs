#![forbid(unsafe_code)]

//! Item identity.
//!
//! A menu item carries two keys:
//!
//! - [`ItemKey`] identifies the node to the reconciler. Two renders that emit
//!   the same `ItemKey` refer to the same mounted node.
//! - [`EventKey`] identifies the item to menu state (open submenus, selection).
//!
//! Keys that the overflow machinery synthesizes are derived from these with
//! fixed suffixes, so they are deterministic functions of their inputs.

use std::fmt;

/// Suffix appended to an event key while its item is hidden by overflow.
pub const HIDDEN_SUFFIX: &str = "-hidden";

/// Suffix for the live overflow indicator key.
pub const INDICATOR_SUFFIX: &str = "-overflowed-indicator";

/// Suffix appended to the indicator key for the measurement placeholder.
pub const PLACEHOLDER_SUFFIX: &str = "-placeholder";

/// Event key used by menu state machinery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EventKey(String);

impl EventKey {
    /// Create an event key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The alias given to an item while overflow hides it.
    ///
    /// Menu state never matches an alias against a real key, so a hidden item
    /// cannot fire open events.
    #[must_use]
    pub fn hidden(&self) -> Self {
        Self(format!("{}{HIDDEN_SUFFIX}", self.0))
    }

    /// Whether this key is a hidden alias.
    #[inline]
    pub fn is_hidden_alias(&self) -> bool {
        self.0.ends_with(HIDDEN_SUFFIX)
    }

    /// Event key of the live overflow indicator for a container namespace.
    #[must_use]
    pub fn indicator(prefix: &str) -> Self {
        Self(format!("{prefix}{INDICATOR_SUFFIX}"))
    }

    /// Event key of the measurement placeholder for a container namespace.
    #[must_use]
    pub fn placeholder(prefix: &str) -> Self {
        Self(format!("{prefix}{INDICATOR_SUFFIX}{PLACEHOLDER_SUFFIX}"))
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EventKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Reconciliation identity of a rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemKey(String);

impl ItemKey {
    /// Create an item key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity for an item relocated into the overflow popup.
    ///
    /// Derived from the event key alone, never from position, so an item that
    /// stays overflowed across recomputation keeps the same identity.
    #[must_use]
    pub fn from_event_key(event_key: &EventKey) -> Self {
        Self(event_key.as_str().to_owned())
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<&EventKey> for ItemKey {
    fn from(value: &EventKey) -> Self {
        Self::from_event_key(value)
    }
}
