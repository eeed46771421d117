//! Command-line argument parsing for the sandbox
//!
//! Supports:
//! - Alternate config and theme
//! - Initial window size
//! - Dumping the final layout as JSON on exit
//! - A TTF/OTF font for title and button labels

use clap::Parser;
use std::path::PathBuf;

use crate::config::UiConfig;

/// Panel interaction sandbox
#[derive(Parser, Debug)]
#[command(name = "ember", version, about = "Panel docking sandbox")]
pub struct CliArgs {
    /// Load UI config from this file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Theme id (builtin or from the user themes directory)
    #[arg(short, long, value_name = "ID")]
    pub theme: Option<String>,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Write the final panel layout as JSON to this file on exit
    #[arg(long, value_name = "FILE")]
    pub dump_layout: Option<PathBuf>,

    /// Font used for text; without it only quads are drawn
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the UI config: an explicit `--config` must load, the default
    /// location falls back to defaults
    pub fn load_config(&self) -> anyhow::Result<UiConfig> {
        let mut config = match &self.config {
            Some(path) => UiConfig::load_from(path)?,
            None => UiConfig::load(),
        };
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["ember"]).unwrap();
        assert_eq!(args.width, 1280);
        assert_eq!(args.height, 720);
        assert!(args.config.is_none());
        assert!(args.theme.is_none());
        assert!(args.dump_layout.is_none());
        assert!(args.font.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = CliArgs::try_parse_from([
            "ember",
            "--config",
            "ui.yaml",
            "--theme",
            "ember-light",
            "--width",
            "800",
            "--height",
            "600",
            "--dump-layout",
            "layout.json",
            "--font",
            "font.ttf",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("ui.yaml")));
        assert_eq!(args.theme.as_deref(), Some("ember-light"));
        assert_eq!(args.width, 800);
        assert_eq!(args.height, 600);
        assert_eq!(args.dump_layout, Some(PathBuf::from("layout.json")));
        assert_eq!(args.font, Some(PathBuf::from("font.ttf")));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(CliArgs::try_parse_from(["ember", "--width", "0"]).is_err());
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let args =
            CliArgs::try_parse_from(["ember", "--config", "/nonexistent/ember-ui.yaml"]).unwrap();
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_theme_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        UiConfig::default().save_to(&path).unwrap();

        let args = CliArgs::try_parse_from([
            "ember",
            "--config",
            path.to_str().unwrap(),
            "--theme",
            "ember-light",
        ])
        .unwrap();
        assert_eq!(args.load_config().unwrap().theme, "ember-light");
    }
}
