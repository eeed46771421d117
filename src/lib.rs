//! ember-ui - panels, docking and immediate-mode interaction
//!
//! This crate provides the panel interaction state machine and docking
//! layout engine behind a small retained/immediate hybrid GUI toolkit. Hosts
//! submit panels once, then call `PipelineState::execute` every frame with
//! sampled input; the pipeline resolves focus, grab, resize and docking and
//! emits finished geometry to a `RenderSink`.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod geometry;
pub mod input;
pub mod panel;
pub mod pipeline;
pub mod render;
pub mod theme;
pub mod tracing;

// Re-export commonly used types
pub use config::UiConfig;
pub use geometry::{Metrics, Rect2D, Vec2};
pub use input::{InputSnapshot, InputSource, ViewportProvider};
pub use panel::{Panel, PanelCreateInfo, PanelHandle, PanelId};
pub use pipeline::{FrameOutput, PipelineState, UiEvent};
pub use render::{DrawList, RenderSink};
pub use theme::Theme;
