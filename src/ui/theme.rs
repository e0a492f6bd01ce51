//! # Theme System
//!
//! Every color the search view draws comes from a [`Theme`]; rendering code
//! never hardcodes `ratatui::style::Color` values.
//!
//! ## Built-in Themes
//!
//! - **Pokédex Classic** (default) - the light blue-and-yellow look of the web form
//! - **Catppuccin Mocha** - warm, dark pastel theme

use ratatui::style::Color;

/// All colors used by the search view, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Name accepted by `--theme` and the config file.
    pub name: &'static str,

    // -- Surfaces --
    /// Background of the whole view.
    pub bg: Color,
    /// Background of the card holding the form and the result.
    pub panel_bg: Color,

    // -- Text --
    pub fg: Color,
    /// Placeholder, loading message, footer hints.
    pub fg_dim: Color,
    /// Creature name heading.
    pub heading: Color,

    // -- Form --
    /// Input border and search button.
    pub accent: Color,
    /// Text on top of `accent`.
    pub on_accent: Color,

    // -- Result --
    pub type_bg: Color,
    pub type_fg: Color,
    pub move_bg: Color,
    pub move_fg: Color,

    pub error: Color,
}

impl Theme {
    /// Return the list of all built-in themes.
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Return the default theme (Pokédex Classic).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }
}

static BUILT_IN_THEMES: [Theme; 2] = [
    // 0 - Pokédex Classic (default)
    Theme {
        name: "Pokédex Classic",
        bg: Color::Rgb(224, 231, 255),       // #e0e7ff
        panel_bg: Color::Rgb(243, 244, 246), // #f3f4f6
        fg: Color::Rgb(51, 51, 51),          // #333
        fg_dim: Color::Rgb(102, 102, 102),   // #666
        heading: Color::Rgb(0, 0, 0),
        accent: Color::Rgb(0, 123, 255), // #007bff
        on_accent: Color::Rgb(255, 255, 255),
        type_bg: Color::Rgb(255, 204, 0), // #ffcc00
        type_fg: Color::Rgb(51, 51, 51),
        move_bg: Color::Rgb(209, 250, 229), // #d1fae5
        move_fg: Color::Rgb(6, 95, 70),     // #065f46
        error: Color::Rgb(255, 0, 0),
    },
    // 1 - Catppuccin Mocha
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(17, 17, 27),          // crust
        panel_bg: Color::Rgb(30, 30, 46),    // base
        fg: Color::Rgb(205, 214, 244),       // text
        fg_dim: Color::Rgb(108, 112, 134),   // overlay0
        heading: Color::Rgb(205, 214, 244),  // text
        accent: Color::Rgb(137, 180, 250),   // blue
        on_accent: Color::Rgb(30, 30, 46),   // base
        type_bg: Color::Rgb(249, 226, 175),  // yellow
        type_fg: Color::Rgb(30, 30, 46),     // base
        move_bg: Color::Rgb(49, 50, 68),     // surface0
        move_fg: Color::Rgb(166, 227, 161),  // green
        error: Color::Rgb(243, 139, 168),    // red
    },
];
