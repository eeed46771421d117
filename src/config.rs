//! Toolkit configuration persistence
//!
//! Stores interaction tuning in `~/.config/ember-ui/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::Vec2;

/// Height of the strip at the top of every panel used as the drag/dock handle
pub const TITLE_BAR_HEIGHT: f32 = 15.0;
pub const MIN_PANEL_WIDTH: f32 = 20.0;
pub const MIN_PANEL_HEIGHT: f32 = TITLE_BAR_HEIGHT + 10.0;
/// Distance from a panel edge that still counts as "on the border"
pub const BORDER_TOLERANCE: f32 = 3.0;
pub const DOCK_THRESHOLD_X: f32 = 100.0;
pub const DOCK_THRESHOLD_Y: f32 = 50.0;

/// Interaction and layout tuning shared by the pipeline and the sandbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Selected theme id (e.g., "ember-dark", "ember-light")
    pub theme: String,
    pub title_bar_height: f32,
    pub min_panel_width: f32,
    /// Never smaller than `title_bar_height + 10`
    pub min_panel_height: f32,
    pub border_tolerance: f32,
    /// Horizontal distance from the left/right viewport edge that docks a panel
    pub dock_threshold_x: f32,
    /// Vertical distance from the bottom/top viewport edge that docks a panel
    pub dock_threshold_y: f32,
    /// Padding between the panel border and its buttons
    pub inner_padding: Vec2,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "ember-dark".to_string(),
            title_bar_height: TITLE_BAR_HEIGHT,
            min_panel_width: MIN_PANEL_WIDTH,
            min_panel_height: MIN_PANEL_HEIGHT,
            border_tolerance: BORDER_TOLERANCE,
            dock_threshold_x: DOCK_THRESHOLD_X,
            dock_threshold_y: DOCK_THRESHOLD_Y,
            inner_padding: Vec2::new(15.0, 10.0),
        }
    }
}

impl UiConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        Self::load_or_default(&path)
    }

    /// Load from an explicit path, falling back to defaults on any failure
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file, sanitizing out-of-range values
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: UiConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config.sanitized())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file().context("No config directory available")?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp degenerate values instead of rejecting them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if !(self.title_bar_height > 0.0) {
            tracing::warn!(
                "title_bar_height {} is not positive, using {}",
                self.title_bar_height,
                defaults.title_bar_height
            );
            self.title_bar_height = defaults.title_bar_height;
        }
        if !(self.min_panel_width > 0.0) {
            self.min_panel_width = defaults.min_panel_width;
        }
        let floor = self.title_bar_height + 10.0;
        if !(self.min_panel_height >= floor) {
            tracing::warn!(
                "min_panel_height {} is below title bar + 10, clamping to {}",
                self.min_panel_height,
                floor
            );
            self.min_panel_height = floor;
        }
        if !(self.border_tolerance >= 0.0) {
            self.border_tolerance = defaults.border_tolerance;
        }
        self.dock_threshold_x = self.dock_threshold_x.max(0.0);
        self.dock_threshold_y = self.dock_threshold_y.max(0.0);
        self.inner_padding = Vec2::new(self.inner_padding.x.max(0.0), self.inner_padding.y.max(0.0));

        self
    }
}
