//! ember - panel docking sandbox
//!
//! Opens a window with five demo panels that can be focused, dragged,
//! resized from any border or corner, and docked to the window edges.

use anyhow::Result;
use clap::Parser;
use winit::event_loop::EventLoop;

use ember_ui::cli::CliArgs;
use ember_ui::pipeline::PipelineState;
use ember_ui::theme::load_theme_or_default;

mod runtime;

use runtime::{App, AppOptions};

fn main() -> Result<()> {
    ember_ui::tracing::init();

    let args = CliArgs::parse();
    let config = args.load_config()?;
    let theme = load_theme_or_default(&config.theme);
    tracing::info!(theme = %theme.name, "Starting ember sandbox");

    let pipeline = PipelineState::new(config).with_theme(theme);
    let options = AppOptions {
        width: args.width,
        height: args.height,
        font: args.font,
        dump_layout: args.dump_layout,
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(pipeline, options);
    event_loop.run_app(&mut app)?;

    Ok(())
}
