#![forbid(unsafe_code)]

//! Menu layout modes.

use std::fmt;
use std::str::FromStr;

/// Layout mode of a menu container.
///
/// Only [`MenuMode::Horizontal`] lays items out in a single row that can run
/// out of room; every other mode stacks items and never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuMode {
    /// Single row, overflow-sensitive.
    Horizontal,
    /// Stacked column with popups to the right.
    #[default]
    Vertical,
    /// Stacked column with popups to the left.
    VerticalLeft,
    /// Stacked column with popups to the right, explicitly.
    VerticalRight,
    /// Stacked column with nested items expanded in place.
    Inline,
}

impl MenuMode {
    /// All modes in declaration order.
    pub const ALL: [MenuMode; 5] = [
        Self::Horizontal,
        Self::Vertical,
        Self::VerticalLeft,
        Self::VerticalRight,
        Self::Inline,
    ];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
            Self::VerticalLeft => "vertical-left",
            Self::VerticalRight => "vertical-right",
            Self::Inline => "inline",
        }
    }

    /// Whether items in this mode can overflow the container.
    #[inline]
    #[must_use]
    pub const fn is_overflow_sensitive(self) -> bool {
        matches!(self, Self::Horizontal)
    }
}

impl fmt::Display for MenuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    input: String,
}

impl ParseModeError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown menu mode {:?} (expected one of horizontal, vertical, vertical-left, vertical-right, inline)",
            self.input
        )
    }
}

impl std::error::Error for ParseModeError {}

impl FromStr for MenuMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseModeError {
                input: s.to_owned(),
            })
    }
}
