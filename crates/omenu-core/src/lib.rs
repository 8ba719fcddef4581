#![forbid(unsafe_code)]

//! Core: geometry, item keys, layout modes, and width measurement.

pub mod geometry;
pub mod key;
pub mod mode;
pub mod width;

pub use geometry::Rect;
pub use key::{EventKey, ItemKey};
pub use mode::{MenuMode, ParseModeError};
pub use width::{TextWidthProbe, display_width};
