//! Theme system for panels and widgets
//!
//! Provides YAML-based theming support with compile-time embedded themes
//! and user-defined themes from config directories.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/ember-ui/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const EMBER_DARK_YAML: &str = include_str!("../themes/ember-dark.yaml");
pub const EMBER_LIGHT_YAML: &str = include_str!("../themes/ember-light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "ember-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "ember-dark",
        yaml: EMBER_DARK_YAML,
    },
    BuiltinTheme {
        id: "ember-light",
        yaml: EMBER_LIGHT_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(user_dir) = crate::config_paths::themes_dir() {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// Load theme by id, logging and falling back to the default on failure
pub fn load_theme_or_default(id: &str) -> Theme {
    load_theme(id).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using default", id, e);
        Theme::default()
    })
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Normalized `[r, g, b, a]` as stored in vertex records
    pub fn to_rgba_f32(&self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub background: String,
    pub panel: PanelThemeData,
    pub button: ButtonThemeData,
    #[serde(default)]
    pub dock_preview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelThemeData {
    pub background: String,
    pub title_bar_active: String,
    pub title_bar_inactive: String,
    pub border: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ButtonThemeData {
    pub normal: String,
    pub hovered: String,
    pub pressed: String,
    #[serde(default)]
    pub foreground: Option<String>,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    /// Viewport clear color
    pub background: Color,
    pub panel: PanelTheme,
    pub button: ButtonTheme,
    /// Translucent fill shown over the slot a grabbed panel would dock into
    pub dock_preview: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelTheme {
    pub background: Color,
    pub title_bar_active: Color,
    pub title_bar_inactive: Color,
    pub border: Color,
    pub foreground: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonTheme {
    pub normal: Color,
    pub hovered: Color,
    pub pressed: Color,
    pub foreground: Color,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let panel_foreground = Color::from_hex(&data.ui.panel.foreground)?;

        Ok(Theme {
            name: data.name,
            background: Color::from_hex(&data.ui.background)?,
            panel: PanelTheme {
                background: Color::from_hex(&data.ui.panel.background)?,
                title_bar_active: Color::from_hex(&data.ui.panel.title_bar_active)?,
                title_bar_inactive: Color::from_hex(&data.ui.panel.title_bar_inactive)?,
                border: Color::from_hex(&data.ui.panel.border)?,
                foreground: panel_foreground,
            },
            button: ButtonTheme {
                normal: Color::from_hex(&data.ui.button.normal)?,
                hovered: Color::from_hex(&data.ui.button.hovered)?,
                pressed: Color::from_hex(&data.ui.button.pressed)?,
                foreground: data
                    .ui
                    .button
                    .foreground
                    .as_ref()
                    .map(|s| Color::from_hex(s))
                    .transpose()?
                    .unwrap_or(panel_foreground),
            },
            dock_preview: data
                .ui
                .dock_preview
                .as_ref()
                .map(|s| Color::from_hex(s))
                .transpose()?
                .unwrap_or(Color::rgba(0x3D, 0x8E, 0xE8, 0x50)),
        })
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Theme::from_yaml(EMBER_DARK_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "Ember Dark".to_string(),
                background: Color::rgb(0x12, 0x12, 0x14),
                panel: PanelTheme {
                    background: Color::rgb(0x26, 0x26, 0x2B),
                    title_bar_active: Color::rgb(0xD9, 0x6C, 0x2C),
                    title_bar_inactive: Color::rgb(0x3A, 0x3A, 0x40),
                    border: Color::rgb(0x44, 0x44, 0x4C),
                    foreground: Color::rgb(0xE6, 0xE6, 0xE6),
                },
                button: ButtonTheme {
                    normal: Color::rgb(0x3A, 0x3A, 0x42),
                    hovered: Color::rgb(0x4E, 0x4E, 0x58),
                    pressed: Color::rgb(0xD9, 0x6C, 0x2C),
                    foreground: Color::rgb(0xE6, 0xE6, 0xE6),
                },
                dock_preview: Color::rgba(0x3D, 0x8E, 0xE8, 0x50),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}
