#![forbid(unsafe_code)]

//! Menu items as supplied by the caller.
//!
//! The overflow machinery treats an item as opaque apart from its two keys,
//! its style, and the few properties the overflow indicator copies.

use std::collections::BTreeMap;

use omenu_core::{EventKey, ItemKey, MenuMode};

/// Whether a laid-out node is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Laid out and measured, but not painted or interactive.
    Hidden,
}

/// Whether a node takes part in layout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    #[default]
    Normal,
    /// Removed from layout; occupies no space and has no measurable width.
    None,
}

/// Presentation properties of a node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemStyle {
    pub display: Display,
    pub visibility: Visibility,
    /// Free-form style attributes passed through untouched.
    pub attrs: BTreeMap<String, String>,
}

impl ItemStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a pass-through attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// This style with `visibility: hidden`.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = Visibility::Hidden;
        self
    }

    /// This style with `display: none`.
    #[must_use]
    pub fn display_none(mut self) -> Self {
        self.display = Display::None;
        self
    }

    /// Whether the node occupies layout space.
    #[inline]
    pub fn is_laid_out(&self) -> bool {
        self.display == Display::Normal
    }

    /// Whether the node is painted and interactive.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.is_laid_out() && self.visibility == Visibility::Visible
    }
}

/// A menu item or submenu.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuItem {
    pub key: ItemKey,
    pub event_key: EventKey,
    pub title: String,
    pub class_name: String,
    pub popup_class_name: String,
    pub style: ItemStyle,
    pub disabled: bool,
    /// Layout mode for this item's own children, if it is a submenu.
    pub mode: Option<MenuMode>,
    /// Free-form properties passed through untouched.
    pub attrs: BTreeMap<String, String>,
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Create an item whose item key and event key are both `key`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            key: ItemKey::new(key.clone()),
            event_key: EventKey::new(key),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Override the reconciliation key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = ItemKey::new(key);
        self
    }

    /// Set the class name.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set the popup class name.
    #[must_use]
    pub fn popup_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.popup_class_name = class_name.into();
        self
    }

    /// Set the style.
    #[must_use]
    pub fn style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the disabled flag.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set a pass-through property.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Add a child item, making this a submenu.
    #[must_use]
    pub fn child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this item hosts children.
    #[inline]
    pub fn is_submenu(&self) -> bool {
        !self.children.is_empty()
    }
}
