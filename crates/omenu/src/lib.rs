#![forbid(unsafe_code)]

//! omenu public facade crate.
//!
//! Re-exports the menu bar, its configuration, and the building blocks from
//! the internal crates, plus a prelude for day-to-day usage.
//!
//! ```ignore
//! use omenu::prelude::*;
//!
//! let config = omenu::config_for_mode("horizontal")?;
//! let mut bar = OverflowMenuBar::new(config, items);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use omenu_core::{EventKey, ItemKey, MenuMode, ParseModeError, Rect, TextWidthProbe};

// --- Runtime re-exports ----------------------------------------------------

pub use omenu_runtime::{
    DebounceAction, DebounceConfig, ResizeDebouncer, ResizeListeners, ResizeSource,
};

// --- Widget re-exports -----------------------------------------------------

pub use omenu_widgets::{
    CellSurface, ContainerTag, ItemStyle, LayoutSurface, MeasureError, MeasurementCache,
    MeasurementSnapshot, MenuBarConfig, MenuItem, NodeRole, OverflowMenuBar, OverflowState,
    Phase, RenderNode,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for omenu callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A layout mode name was not recognized.
    Mode(ParseModeError),
    /// Natural widths could not be captured.
    Measure(MeasureError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(err) => write!(f, "{err}"),
            Self::Measure(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Mode(err) => Some(err),
            Self::Measure(err) => Some(err),
        }
    }
}

impl From<ParseModeError> for Error {
    fn from(err: ParseModeError) -> Self {
        Self::Mode(err)
    }
}

impl From<MeasureError> for Error {
    fn from(err: MeasureError) -> Self {
        Self::Measure(err)
    }
}

/// Standard result type for omenu APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration for a named layout mode.
///
/// Horizontal yields an outermost overflowing bar; every other mode a plain
/// pass-through container.
pub fn config_for_mode(mode: &str) -> Result<MenuBarConfig> {
    let mode: MenuMode = mode.parse()?;
    Ok(match mode {
        MenuMode::Horizontal => MenuBarConfig::horizontal_root(),
        other => MenuBarConfig::default().mode(other),
    })
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CellSurface, DebounceConfig, Error, MenuBarConfig, MenuItem, MenuMode, OverflowMenuBar,
        ResizeListeners, ResizeSource, Result,
    };

    pub use crate::{core, runtime, widgets};
}

pub use omenu_core as core;
pub use omenu_runtime as runtime;
pub use omenu_widgets as widgets;
