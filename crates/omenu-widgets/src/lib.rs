#![forbid(unsafe_code)]

//! Widgets: the overflow-aware menu bar and its building blocks.
//!
//! - [`measure`] captures natural widths from a laid-out row.
//! - [`resolver`] decides where the row is cut.
//! - [`indicator`] builds the overflow submenu item.
//! - [`reconciler`] produces the node sequence to lay out.
//! - [`menu_bar`] ties them to the mount, resize and unmount lifecycle.
//! - [`surface`] is a single-row terminal backend for all of the above.

pub mod config;
pub mod indicator;
pub mod item;
pub mod measure;
pub mod menu_bar;
pub mod reconciler;
pub mod resolver;
pub mod surface;

pub use config::{ContainerTag, MenuBarConfig};
pub use indicator::{IndicatorRole, build_indicator};
pub use item::{Display, ItemStyle, MenuItem, Visibility};
pub use measure::{
    LayoutSurface, MeasureError, MeasureStats, MeasurementCache, MeasurementSnapshot, NodeRole,
};
pub use menu_bar::{OverflowMenuBar, Phase};
pub use reconciler::{RenderNode, reconcile};
pub use resolver::{Boundary, OverflowState, resolve, resolve_boundary};
pub use surface::CellSurface;
