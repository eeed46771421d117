//! Per-frame interaction pipeline
//!
//! `PipelineState` owns every panel, the z-order stack, the dockspace and the
//! gesture latches. Hosts call [`PipelineState::execute`] once per frame with
//! a sampled `InputSnapshot`; the pipeline resolves focus, grab, resize and
//! docking, commits the final layout and hands the geometry to a
//! `RenderSink`.
//!
//! ## Frame stages
//!
//! 1. Button press states (`hit.rs`)
//! 2. Focus resolution and z-order promotion (`focus.rs`)
//! 3. Border classification, grab/resize arbitration and geometry (`resize.rs`)
//! 4. Dock release and docked layout (`docking.rs`)
//! 5. Commit: button layout and render submission

mod docking;
mod focus;
mod hit;
mod resize;

pub use focus::ZOrder;
pub use hit::{classify, topmost_at, HoverRegion};
pub use resize::{resize_bottom, resize_left, resize_right, resize_top, resize_with_handle};

use crate::config::UiConfig;
use crate::geometry::{Metrics, Rect2D, Vec2};
use crate::input::{dockspace_bounds, InputSnapshot, InputSource, ViewportProvider};
use crate::panel::{
    DockSlot, Dockspace, Panel, PanelCreateInfo, PanelHandle, PanelId, PressState, ResizeHandle,
};
use crate::render::{ElementType, Quad, RenderSink, TextRun};
use crate::theme::Theme;

/// Depth used for overlays drawn above every panel
const OVERLAY_Z: f32 = 0.2;

/// Something the host may want to react to, produced during a frame
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    FocusChanged {
        from: Option<PanelId>,
        to: Option<PanelId>,
    },
    GrabStarted(PanelId),
    ResizeStarted {
        panel: PanelId,
        handle: ResizeHandle,
    },
    Docked {
        panel: PanelId,
        slot: DockSlot,
    },
    Undocked {
        panel: PanelId,
        slot: DockSlot,
    },
    /// A press released while the cursor was still over the button
    ButtonClicked {
        panel: PanelId,
        button: usize,
        label: String,
    },
}

/// Pointer shape the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    ResizeHorizontal,
    ResizeVertical,
    /// Top-left / bottom-right diagonal
    ResizeNwse,
    /// Top-right / bottom-left diagonal
    ResizeNesw,
    Grab,
}

impl CursorHint {
    pub fn for_handle(handle: ResizeHandle) -> Self {
        match handle {
            ResizeHandle::None => CursorHint::Default,
            ResizeHandle::Left | ResizeHandle::Right => CursorHint::ResizeHorizontal,
            ResizeHandle::Bottom | ResizeHandle::Top => CursorHint::ResizeVertical,
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => CursorHint::ResizeNwse,
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => CursorHint::ResizeNesw,
        }
    }
}

/// Result of one [`PipelineState::execute`] call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub events: Vec<UiEvent>,
    pub cursor_hint: CursorHint,
}

impl FrameOutput {
    pub fn clicked(&self, panel: PanelId, button: usize) -> bool {
        self.events.iter().any(|e| {
            matches!(e, UiEvent::ButtonClicked { panel: p, button: b, .. } if *p == panel && *b == button)
        })
    }
}

/// Input for one frame with the press/release edges resolved
#[derive(Debug, Clone, Copy)]
pub(crate) struct FrameInput {
    pub cursor: Vec2,
    pub left_down: bool,
    /// Left button went down this frame
    pub pressed: bool,
    /// Left button went up this frame
    pub released: bool,
}

impl FrameInput {
    fn new(input: &InputSnapshot, prev_left_down: bool) -> Self {
        Self {
            cursor: input.cursor,
            left_down: input.left_down,
            pressed: input.left_down && !prev_left_down,
            released: !input.left_down && prev_left_down,
        }
    }
}

/// Dock target shown while a panel is dragged by its title bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockPreview {
    pub slot: DockSlot,
    pub rect: Rect2D,
}

/// All mutable UI state, mutated only through [`PipelineState::execute`]
#[derive(Debug, Clone)]
pub struct PipelineState {
    config: UiConfig,
    theme: Theme,
    panels: Vec<Panel>,
    next_id: u32,
    z_order: ZOrder,
    dockspace: Dockspace,
    last_focused: Option<usize>,
    /// Set by a press on empty space, consumed by the matching release
    grabbed_outside: bool,
    prev_left_down: bool,
    warned_empty: bool,
    dock_preview: Option<DockPreview>,
    frame: u64,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new(UiConfig::default())
    }
}

impl PipelineState {
    pub fn new(config: UiConfig) -> Self {
        Self {
            config: config.sanitized(),
            theme: Theme::default(),
            panels: Vec::new(),
            next_id: 0,
            z_order: ZOrder::default(),
            dockspace: Dockspace::default(),
            last_focused: None,
            grabbed_outside: false,
            prev_left_down: false,
            warned_empty: false,
            dock_preview: None,
            frame: 0,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Create a panel. The newest panel is placed in front of all others.
    pub fn submit_panel(&mut self, info: PanelCreateInfo) -> PanelHandle {
        let id = PanelId(self.next_id);
        self.next_id += 1;

        let mut panel = Panel::new(id, info);
        let dims = panel.dimensions();
        let clamped = Vec2::new(
            dims.x.max(self.config.min_panel_width),
            dims.y.max(self.config.min_panel_height),
        );
        if clamped != dims {
            tracing::warn!(
                panel = %panel.title(),
                "Panel dimensions {}x{} below minimum, clamping",
                dims.x,
                dims.y
            );
            panel.update_metrics(panel.position(), clamped);
        }

        tracing::debug!(id = id.0, title = %panel.title(), "Submitted panel");
        self.panels.push(panel);
        self.z_order.push_front();
        self.z_order.apply(&mut self.panels);
        PanelHandle(self.panels.len() - 1)
    }

    /// Append a button to a panel, returning its index within the panel
    pub fn add_button(
        &mut self,
        handle: PanelHandle,
        text: impl Into<String>,
        dimensions: Vec2,
    ) -> Option<usize> {
        self.panels
            .get_mut(handle.0)
            .map(|panel| panel.add_button(text, dimensions))
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, handle: PanelHandle) -> Option<&Panel> {
        self.panels.get(handle.0)
    }

    pub fn handle_of(&self, id: PanelId) -> Option<PanelHandle> {
        self.panels
            .iter()
            .position(|p| p.id() == id)
            .map(PanelHandle)
    }

    pub fn focused(&self) -> Option<PanelHandle> {
        self.last_focused.map(PanelHandle)
    }

    pub fn z_order(&self) -> &ZOrder {
        &self.z_order
    }

    pub fn dockspace(&self) -> &Dockspace {
        &self.dockspace
    }

    pub fn dock_preview(&self) -> Option<DockPreview> {
        self.dock_preview
    }

    /// Frames executed so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub(crate) fn min_dimensions(&self) -> Vec2 {
        Vec2::new(self.config.min_panel_width, self.config.min_panel_height)
    }

    /// Sample `source` and run one frame
    pub fn execute_from(
        &mut self,
        source: &dyn InputSource,
        viewport: &dyn ViewportProvider,
        sink: &mut dyn RenderSink,
    ) -> FrameOutput {
        self.execute(&InputSnapshot::sample(source), viewport, sink)
    }

    /// Run one frame of interaction and submit the result to `sink`
    pub fn execute(
        &mut self,
        input: &InputSnapshot,
        viewport: &dyn ViewportProvider,
        sink: &mut dyn RenderSink,
    ) -> FrameOutput {
        #[cfg(feature = "profile-tracing")]
        let _span = tracing::trace_span!("pipeline_execute", frame = self.frame).entered();

        self.frame += 1;
        self.dockspace.set_bounds(dockspace_bounds(viewport));

        let frame = FrameInput::new(input, self.prev_left_down);
        self.prev_left_down = input.left_down;

        let mut output = FrameOutput::default();

        if self.panels.is_empty() {
            if !self.warned_empty {
                tracing::warn!("No panels submitted, nothing to do");
                self.warned_empty = true;
            }
            return output;
        }
        self.warned_empty = false;

        self.evaluate_buttons(&frame, &mut output.events);
        self.invalidate_focus(&frame, &mut output.events);

        self.dock_preview = None;
        if let Some(index) = self.last_focused {
            let region = classify(
                &self.panels[index],
                frame.cursor,
                self.config.title_bar_height,
                self.config.border_tolerance,
            );

            self.arbitrate(index, &frame, region, &mut output.events);
            self.update_geometry(index, &frame, region);

            if frame.released {
                self.dock_on_release(index, &frame, region, &mut output.events);
                self.end_gesture(index);
            } else {
                self.dock_preview = self.preview_for(index, &frame, region);
            }

            output.cursor_hint = self.cursor_hint(index, region);
        }

        self.layout_docked();
        self.commit(sink);

        tracing::trace!(
            frame = self.frame,
            events = output.events.len(),
            "Frame executed"
        );
        output
    }

    fn cursor_hint(&self, index: usize, region: HoverRegion) -> CursorHint {
        let panel = &self.panels[index];
        if panel.is_resizing() {
            return CursorHint::for_handle(panel.resize_handle());
        }
        if panel.is_grabbed() {
            return CursorHint::Grab;
        }
        if region.inside {
            return CursorHint::for_handle(region.handle.without_outer_edge(panel.dock_slot()));
        }
        CursorHint::Default
    }

    /// Lay out buttons with the final panel geometry and emit everything,
    /// back to front
    fn commit(&mut self, sink: &mut dyn RenderSink) {
        let title_bar_height = self.config.title_bar_height;
        let padding = self.config.inner_padding;

        for panel in &mut self.panels {
            panel.invalidate_bounds();
            panel.layout_buttons(title_bar_height, padding);
        }

        let text_size = (title_bar_height * 0.8).max(1.0);
        for index in self.z_order.back_to_front() {
            let panel = &self.panels[index];
            let z = panel.z_index();
            let bounds = panel.bounds();

            sink.add_quad(
                Quad::new(
                    panel.position(),
                    z,
                    panel.dimensions(),
                    panel.color(),
                    ElementType::Panel,
                )
                .with_active(panel.is_focused()),
            );
            sink.add_text(TextRun::new(
                panel.title(),
                Vec2::new(bounds.center().x, bounds.top - title_bar_height / 2.0),
                z,
                self.theme.panel.foreground,
                text_size,
            ));

            for button in panel.buttons().iter().filter(|b| b.is_visible()) {
                let color = match button.press_state() {
                    PressState::NotPressed => self.theme.button.normal,
                    PressState::Hovered => self.theme.button.hovered,
                    PressState::Pressed => self.theme.button.pressed,
                };
                sink.add_quad(Quad::new(
                    button.position(),
                    z,
                    button.dimensions(),
                    color,
                    ElementType::Button,
                ));
                sink.add_text(TextRun::new(
                    button.text(),
                    button.position(),
                    z,
                    self.theme.button.foreground,
                    text_size,
                ));
            }
        }

        if let Some(preview) = self.dock_preview {
            let metrics = Metrics::from_rect(preview.rect);
            sink.add_quad(Quad::new(
                metrics.position,
                OVERLAY_Z,
                metrics.dimensions,
                self.theme.dock_preview,
                ElementType::General,
            ));
        }
    }
}
