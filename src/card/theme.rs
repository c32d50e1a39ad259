use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::card::request::{Layout, Theme};

/// Colour tokens substituted into the shared card stylesheet.
#[derive(Debug)]
pub struct Palette {
    pub background: &'static str,
    pub title: &'static str,
    pub title_background: &'static str,
    pub text: &'static str,
}

#[derive(Debug)]
pub struct ThemeStyle {
    pub palette: Palette,
    /// Put the images on the right when laid out side by side.
    pub reverse_side_by_side: bool,
}

/// Structural rules for a layout. Colours never live here.
#[derive(Debug)]
pub struct LayoutRules {
    pub card_direction: &'static str,
    pub logo_direction: &'static str,
    pub title_align: &'static str,
    pub title_items: &'static str,
    pub heading_max_width: &'static str,
    pub logo_margin: &'static str,
}

static LIGHT: ThemeStyle = ThemeStyle {
    palette: Palette {
        background: "#E4B418",
        title: "#262626",
        title_background: "none",
        text: "rgba(0,0,0,.75)",
    },
    reverse_side_by_side: false,
};

static DARK: ThemeStyle = ThemeStyle {
    palette: Palette {
        background: "#4A6B7B",
        title: "#262626",
        title_background: "#E4B418",
        text: "rgba(255,255,255,.75)",
    },
    reverse_side_by_side: true,
};

static STACKED: LayoutRules = LayoutRules {
    card_direction: "column",
    logo_direction: "row",
    title_align: "center",
    title_items: "center",
    heading_max_width: "50vw",
    logo_margin: "0 16px",
};

static SIDE_BY_SIDE: LayoutRules = LayoutRules {
    card_direction: "row",
    logo_direction: "column",
    title_align: "left",
    title_items: "flex-start",
    heading_max_width: "40vw",
    logo_margin: "16px 0",
};

pub static THEME_REGISTRY: Lazy<HashMap<Theme, &'static ThemeStyle>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    registry.insert(Theme::Light, &LIGHT);
    registry.insert(Theme::Dark, &DARK);
    registry
});

pub static LAYOUT_REGISTRY: Lazy<HashMap<Layout, &'static LayoutRules>> = Lazy::new(|| {
    let mut registry = HashMap::new();
    registry.insert(Layout::Stacked, &STACKED);
    registry.insert(Layout::SideBySide, &SIDE_BY_SIDE);
    registry
});

pub fn theme_style(theme: Theme) -> &'static ThemeStyle {
    THEME_REGISTRY.get(&theme).copied().unwrap_or(&LIGHT)
}

pub fn layout_rules(layout: Layout) -> &'static LayoutRules {
    LAYOUT_REGISTRY.get(&layout).copied().unwrap_or(&STACKED)
}

/// Flex direction of the outer card for a theme/layout pair.
pub fn card_direction(theme: Theme, layout: Layout) -> &'static str {
    match layout {
        Layout::SideBySide if theme_style(theme).reverse_side_by_side => "row-reverse",
        _ => layout_rules(layout).card_direction,
    }
}
