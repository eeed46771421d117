//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window and softbuffer presentation
//! - `input` - pointer event tracking and viewport queries for the pipeline

pub mod app;
pub mod input;

pub use app::{App, AppOptions};
