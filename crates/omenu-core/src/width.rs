#![forbid(unsafe_code)]

//! Width measurement for item titles.
//!
//! This is the measurement primitive the layout surfaces build on: a pure
//! function from a node's label to its natural width in cells.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of `text` in terminal cells.
#[inline]
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.width()
}

/// Width of each grapheme cluster in `text`, skipping zero-width clusters.
pub fn grapheme_widths(text: &str) -> impl Iterator<Item = (&str, usize)> {
    text.graphemes(true)
        .map(|g| (g, g.width()))
        .filter(|(_, w)| *w > 0)
}

/// Measures the natural width of a titled node.
///
/// A node is drawn as `padding + title + padding`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextWidthProbe {
    padding: u16,
}

impl Default for TextWidthProbe {
    fn default() -> Self {
        Self { padding: 1 }
    }
}

impl TextWidthProbe {
    /// Create a probe with the given horizontal padding on each side.
    pub const fn new(padding: u16) -> Self {
        Self { padding }
    }

    /// Horizontal padding on each side.
    #[inline]
    pub const fn padding(&self) -> u16 {
        self.padding
    }

    /// Natural width of a node with this title, saturating at `u16::MAX`.
    #[must_use]
    pub fn measure(&self, title: &str) -> u16 {
        let text = u16::try_from(display_width(title)).unwrap_or(u16::MAX);
        text.saturating_add(self.padding.saturating_mul(2))
    }
}
