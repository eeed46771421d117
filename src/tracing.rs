//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging focus,
//! grab, resize and docking transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=ember_ui::pipeline=trace` - per-frame pipeline detail
//!
//! # Log Files
//!
//! Logs are written to `~/.config/ember-ui/logs/ember.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::geometry::{Metrics, Rect2D};
use crate::panel::{DockSlot, DockState, MainState, PanelId, ResizeHandle};
use crate::pipeline::PipelineState;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/ember-ui/logs/ember.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {:#}", e);
            None
        }
    };

    // Tests and embedding hosts may have installed a subscriber already
    if let Err(err) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        tracing::debug!(%err, "Keeping the existing tracing subscriber");
    }
}

/// Serializable view of one panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelSnapshot {
    pub id: PanelId,
    pub title: String,
    pub metrics: Metrics,
    pub z: f32,
    pub main_state: MainState,
    pub dock_state: DockState,
    pub dock_slot: DockSlot,
    pub resize_handle: ResizeHandle,
    pub focused: bool,
}

/// Serializable view of the whole layout, used for `--dump-layout` and
/// frame-to-frame diff logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub frame: u64,
    pub dockspace: Rect2D,
    pub panels: Vec<PanelSnapshot>,
    /// Occupant id per slot, in Left, Right, Bottom, Top order
    pub slots: Vec<(DockSlot, Option<PanelId>)>,
}

impl LayoutSnapshot {
    pub fn from_pipeline(state: &PipelineState) -> Self {
        let panels = state
            .panels()
            .iter()
            .map(|p| PanelSnapshot {
                id: p.id(),
                title: p.title().to_string(),
                metrics: p.metrics(),
                z: p.z_index(),
                main_state: p.main_state(),
                dock_state: p.dock_state(),
                dock_slot: p.dock_slot(),
                resize_handle: p.resize_handle(),
                focused: p.is_focused(),
            })
            .collect();

        let dockspace = state.dockspace();
        let slots = DockSlot::ALL
            .into_iter()
            .map(|slot| {
                let occupant = dockspace
                    .occupant(slot)
                    .and_then(|handle| state.panel(handle))
                    .map(|p| p.id());
                (slot, occupant)
            })
            .collect();

        Self {
            frame: state.frame_count(),
            dockspace: dockspace.bounds(),
            panels,
            slots,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &LayoutSnapshot) -> Option<String> {
        if self.panels.len() != other.panels.len() {
            return Some(format!(
                "panel count: {} → {}",
                self.panels.len(),
                other.panels.len()
            ));
        }

        let mut changes = Vec::new();
        for (before, after) in self.panels.iter().zip(&other.panels) {
            let label = format!("#{} {}", after.id.0, after.title);
            if before.metrics != after.metrics {
                let (b, a) = (before.metrics, after.metrics);
                changes.push(format!(
                    "{}: ({:.1},{:.1} {:.1}x{:.1}) → ({:.1},{:.1} {:.1}x{:.1})",
                    label,
                    b.position.x,
                    b.position.y,
                    b.dimensions.x,
                    b.dimensions.y,
                    a.position.x,
                    a.position.y,
                    a.dimensions.x,
                    a.dimensions.y
                ));
            }
            if before.main_state != after.main_state {
                changes.push(format!(
                    "{}: {:?} → {:?}",
                    label, before.main_state, after.main_state
                ));
            }
            if before.dock_slot != after.dock_slot {
                changes.push(format!(
                    "{}: dock {:?} → {:?}",
                    label, before.dock_slot, after.dock_slot
                ));
            }
            if before.focused != after.focused {
                let status = if after.focused { "focused" } else { "unfocused" };
                changes.push(format!("{}: {}", label, status));
            }
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use crate::panel::PanelCreateInfo;
    use crate::theme::Color;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());

        init();
        init();
        tracing::info!("still logging");

        assert!(dir.path().join("ember-ui").join("logs").is_dir());
    }

    fn state() -> PipelineState {
        let mut state = PipelineState::default();
        state.submit_panel(PanelCreateInfo::new(
            "A",
            Vec2::ZERO,
            Vec2::new(200.0, 100.0),
            Color::default(),
        ));
        state
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        let state = state();
        let a = LayoutSnapshot::from_pipeline(&state);
        let b = LayoutSnapshot::from_pipeline(&state);
        assert_eq!(a.diff(&b), None);
    }

    #[test]
    fn test_diff_reports_focus_and_metrics() {
        let state = state();
        let before = LayoutSnapshot::from_pipeline(&state);
        let mut after = before.clone();
        after.panels[0].focused = true;
        after.panels[0].metrics.position = Vec2::new(10.0, 0.0);

        let diff = after.diff(&before).unwrap_or_default();
        assert!(diff.contains("unfocused"));
        let diff = before.diff(&after).unwrap_or_default();
        assert!(diff.contains("#0 A: focused"));
        assert!(diff.contains("→ (10.0,0.0"));
    }

    #[test]
    fn test_json_roundtrip() {
        let snapshot = LayoutSnapshot::from_pipeline(&state());
        let json = snapshot.to_json().unwrap();
        let parsed: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}
