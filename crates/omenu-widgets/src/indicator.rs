#![forbid(unsafe_code)]

//! Overflow indicator construction.
//!
//! The indicator is a synthetic submenu whose children are the overflowed
//! items. It borrows the first item's property set so it looks like a
//! sibling, then replaces a fixed list of properties ([`OVERRIDDEN`]) and
//! fills a few more only when the template leaves them empty ([`DEFAULTED`]).

use omenu_core::{EventKey, ItemKey, MenuMode};

use crate::config::MenuBarConfig;
use crate::item::{ItemStyle, MenuItem};

/// Which indicator instance is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorRole {
    /// The interactive indicator hosting overflowed items.
    Live,
    /// The invisible copy laid out only so its width is known in advance.
    Placeholder,
}

/// A template property the indicator may rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorProp {
    Title,
    Key,
    EventKey,
    Disabled,
    Style,
    Children,
    Mode,
    ClassName,
    PopupClassName,
}

/// Properties always replaced, whatever the template holds.
pub const OVERRIDDEN: [IndicatorProp; 7] = [
    IndicatorProp::Title,
    IndicatorProp::Key,
    IndicatorProp::EventKey,
    IndicatorProp::Disabled,
    IndicatorProp::Style,
    IndicatorProp::Children,
    IndicatorProp::Mode,
];

/// Properties filled only when the template leaves them empty.
pub const DEFAULTED: [IndicatorProp; 2] = [IndicatorProp::ClassName, IndicatorProp::PopupClassName];

/// Values for every property in [`OVERRIDDEN`] and [`DEFAULTED`].
#[derive(Debug, Clone)]
struct IndicatorProps {
    title: String,
    key: ItemKey,
    event_key: EventKey,
    disabled: bool,
    style: ItemStyle,
    children: Vec<MenuItem>,
    mode: Option<MenuMode>,
    class_name: String,
    popup_class_name: String,
}

fn or_default(template: &str, fallback: String) -> String {
    if template.is_empty() {
        fallback
    } else {
        template.to_owned()
    }
}

/// Merge `props` into a copy of `template`.
fn merge(template: &MenuItem, props: IndicatorProps) -> MenuItem {
    MenuItem {
        // Overridden.
        title: props.title,
        key: props.key,
        event_key: props.event_key,
        disabled: props.disabled,
        style: props.style,
        children: props.children,
        mode: props.mode,
        // Defaulted.
        class_name: or_default(&template.class_name, props.class_name),
        popup_class_name: or_default(&template.popup_class_name, props.popup_class_name),
        // Copied.
        attrs: template.attrs.clone(),
    }
}

/// Build an indicator for `items`.
///
/// Returns `None` when the container never shows an indicator (nested level
/// or non-horizontal mode) or there is no item to borrow properties from.
///
/// The live indicator is `display: none` while `overflowed` is empty. The
/// placeholder is always `visibility: hidden` and childless.
pub fn build_indicator(
    items: &[MenuItem],
    config: &MenuBarConfig,
    overflowed: &[MenuItem],
    role: IndicatorRole,
) -> Option<MenuItem> {
    if !config.builds_indicator() {
        return None;
    }
    let template = items.first()?;

    let (event_key, style, children) = match role {
        IndicatorRole::Placeholder => (
            EventKey::placeholder(&config.prefix_cls),
            config.style.clone().hidden(),
            Vec::new(),
        ),
        IndicatorRole::Live if overflowed.is_empty() => (
            EventKey::indicator(&config.prefix_cls),
            config.style.clone().display_none(),
            Vec::new(),
        ),
        IndicatorRole::Live => (
            EventKey::indicator(&config.prefix_cls),
            config.style.clone(),
            overflowed.to_vec(),
        ),
    };

    let props = IndicatorProps {
        title: config.overflowed_indicator.clone(),
        key: ItemKey::from_event_key(&event_key),
        event_key,
        disabled: false,
        style,
        children,
        mode: Some(MenuMode::VerticalLeft),
        class_name: config.indicator_class_name(),
        popup_class_name: config.popup_class_name(),
    };
    Some(merge(template, props))
}
