#![forbid(unsafe_code)]

//! Configuration surface of the menu bar container.

use std::fmt;

use omenu_core::MenuMode;
use omenu_runtime::DebounceConfig;

use crate::item::ItemStyle;

/// Default class-name namespace.
pub const DEFAULT_PREFIX_CLS: &str = "omenu";

/// Default overflow indicator title.
pub const DEFAULT_OVERFLOWED_INDICATOR: &str = "···";

/// Element kind of the container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContainerTag {
    /// Generic block container.
    #[default]
    Div,
    /// Unordered list.
    Ul,
    /// Navigation landmark.
    Nav,
    /// Any other element name.
    Custom(String),
}

impl ContainerTag {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Div => "div",
            Self::Ul => "ul",
            Self::Nav => "nav",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ContainerTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for [`OverflowMenuBar`](crate::menu_bar::OverflowMenuBar).
#[derive(Debug, Clone, PartialEq)]
pub struct MenuBarConfig {
    /// Layout mode. Only horizontal engages overflow handling.
    pub mode: MenuMode,
    /// Nesting depth. The overflow indicator exists only at level 1.
    pub level: u32,
    /// Class-name namespace for generated nodes and keys.
    pub prefix_cls: String,
    /// Theme name appended to the indicator's popup class.
    pub theme: Option<String>,
    /// Title of the overflow indicator.
    pub overflowed_indicator: String,
    /// External visibility toggle, independent of overflow.
    pub visible: bool,
    /// Class appended to the container while `visible` is false.
    pub hidden_class_name: String,
    /// Container element kind.
    pub tag: ContainerTag,
    /// Container class name. Contains `{prefix_cls}-root` for the outermost row.
    pub class_name: String,
    /// Container style; also the base style of the overflow indicator.
    pub style: ItemStyle,
    /// Resize debouncing.
    pub debounce: DebounceConfig,
}

impl Default for MenuBarConfig {
    fn default() -> Self {
        Self {
            mode: MenuMode::default(),
            level: 1,
            prefix_cls: DEFAULT_PREFIX_CLS.to_string(),
            theme: None,
            overflowed_indicator: DEFAULT_OVERFLOWED_INDICATOR.to_string(),
            visible: true,
            hidden_class_name: String::new(),
            tag: ContainerTag::default(),
            class_name: String::new(),
            style: ItemStyle::default(),
            debounce: DebounceConfig::default(),
        }
    }
}

impl MenuBarConfig {
    /// Configuration for an outermost horizontal bar.
    #[must_use]
    pub fn horizontal_root() -> Self {
        let config = Self::default().mode(MenuMode::Horizontal);
        let root = config.root_class();
        config.class_name(root)
    }

    #[must_use]
    pub fn mode(mut self, mode: MenuMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn prefix_cls(mut self, prefix_cls: impl Into<String>) -> Self {
        self.prefix_cls = prefix_cls.into();
        self
    }

    #[must_use]
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub fn overflowed_indicator(mut self, title: impl Into<String>) -> Self {
        self.overflowed_indicator = title.into();
        self
    }

    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn hidden_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.hidden_class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: ContainerTag) -> Self {
        self.tag = tag;
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    #[must_use]
    pub fn style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = debounce;
        self
    }

    /// The class that marks the outermost container.
    pub fn root_class(&self) -> String {
        format!("{}-root", self.prefix_cls)
    }

    /// Whether this container is the outermost row.
    pub fn is_root(&self) -> bool {
        let root = self.root_class();
        self.class_name.split_whitespace().any(|c| c == root)
    }

    /// Whether the overflow indicator may be built for this container.
    pub fn builds_indicator(&self) -> bool {
        self.level == 1 && self.mode.is_overflow_sensitive()
    }

    /// Whether items may be hidden and relocated into the indicator.
    pub fn applies_overflow(&self) -> bool {
        self.builds_indicator() && self.is_root()
    }

    /// Popup class for the indicator: `{prefix_cls}-{theme}`, or empty.
    pub fn popup_class_name(&self) -> String {
        self.theme
            .as_deref()
            .map(|theme| format!("{}-{theme}", self.prefix_cls))
            .unwrap_or_default()
    }

    /// Class for the indicator when the template item carries none.
    pub fn indicator_class_name(&self) -> String {
        format!("{}-overflowed-submenu", self.prefix_cls)
    }

    /// Container class with the hidden class appended while invisible.
    pub fn container_class_name(&self) -> String {
        if self.visible || self.hidden_class_name.is_empty() {
            return self.class_name.clone();
        }
        if self.class_name.is_empty() {
            return self.hidden_class_name.clone();
        }
        format!("{} {}", self.class_name, self.hidden_class_name)
    }
}
