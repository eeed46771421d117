//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use ember_ui::geometry::Vec2;
use ember_ui::input::{InputSnapshot, StaticViewport};
use ember_ui::panel::{Panel, PanelCreateInfo, PanelHandle};
use ember_ui::pipeline::{FrameOutput, PipelineState, UiEvent};
use ember_ui::render::DrawList;
use ember_ui::theme::Color;
use ember_ui::UiConfig;

pub const VIEWPORT_WIDTH: f32 = 1280.0;
pub const VIEWPORT_HEIGHT: f32 = 720.0;

pub const PANEL_COLOR: Color = Color::rgb(0x30, 0x34, 0x3C);

/// A pipeline driven by scripted input frames on a 1280x720 viewport
pub struct Harness {
    pub state: PipelineState,
    pub viewport: StaticViewport,
    pub list: DrawList,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(UiConfig::default())
    }

    pub fn with_config(config: UiConfig) -> Self {
        Self {
            state: PipelineState::new(config),
            viewport: StaticViewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            list: DrawList::new(),
        }
    }

    /// Submit a panel centred at `(x, y)`
    pub fn panel(&mut self, title: &str, x: f32, y: f32, width: f32, height: f32) -> PanelHandle {
        self.state.submit_panel(PanelCreateInfo::new(
            title,
            Vec2::new(x, y),
            Vec2::new(width, height),
            PANEL_COLOR,
        ))
    }

    pub fn get(&self, handle: PanelHandle) -> &Panel {
        self.state
            .panel(handle)
            .unwrap_or_else(|| panic!("no panel at {:?}", handle))
    }

    /// Run one frame with the cursor at `(x, y)`
    pub fn frame(&mut self, x: f32, y: f32, down: bool) -> FrameOutput {
        self.list.clear();
        self.state.execute(
            &InputSnapshot::new(Vec2::new(x, y), down),
            &self.viewport,
            &mut self.list,
        )
    }

    /// Hover without pressing; lays out buttons on the first call
    pub fn idle(&mut self) -> FrameOutput {
        self.frame(0.0, 0.0, false)
    }

    /// Press and release at the same spot
    pub fn click(&mut self, x: f32, y: f32) -> Vec<UiEvent> {
        let mut events = self.frame(x, y, true).events;
        events.extend(self.frame(x, y, false).events);
        events
    }

    /// Press at `from`, move to `to` with the button held, release at `to`
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32)) -> Vec<UiEvent> {
        let mut events = self.press_and_move(from, to);
        events.extend(self.frame(to.0, to.1, false).events);
        events
    }

    /// Press at `from` and move to `to`, keeping the button held
    pub fn press_and_move(&mut self, from: (f32, f32), to: (f32, f32)) -> Vec<UiEvent> {
        let mut events = self.frame(from.0, from.1, true).events;
        events.extend(self.frame(to.0, to.1, true).events);
        events
    }
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
