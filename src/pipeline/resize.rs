//! Grab/resize arbitration and the resize primitives
//!
//! Each primitive moves one edge to the cursor while the opposite edge stays
//! put. A drag that would make the panel smaller than the minimum clamps to
//! the minimum, still anchored on the opposite edge.

use super::{FrameInput, HoverRegion, PipelineState, UiEvent};
use crate::geometry::{Metrics, Vec2};
use crate::panel::{DockSlot, DockState, MainState, ResizeHandle};

pub fn resize_left(m: Metrics, x: f32, min_width: f32) -> Metrics {
    let right = m.position.x + m.dimensions.x / 2.0;
    let width = (right - x).max(min_width);
    Metrics::new(
        Vec2::new(right - width / 2.0, m.position.y),
        Vec2::new(width, m.dimensions.y),
    )
}

pub fn resize_right(m: Metrics, x: f32, min_width: f32) -> Metrics {
    let left = m.position.x - m.dimensions.x / 2.0;
    let width = (x - left).max(min_width);
    Metrics::new(
        Vec2::new(left + width / 2.0, m.position.y),
        Vec2::new(width, m.dimensions.y),
    )
}

pub fn resize_bottom(m: Metrics, y: f32, min_height: f32) -> Metrics {
    let top = m.position.y + m.dimensions.y / 2.0;
    let height = (top - y).max(min_height);
    Metrics::new(
        Vec2::new(m.position.x, top - height / 2.0),
        Vec2::new(m.dimensions.x, height),
    )
}

pub fn resize_top(m: Metrics, y: f32, min_height: f32) -> Metrics {
    let bottom = m.position.y - m.dimensions.y / 2.0;
    let height = (y - bottom).max(min_height);
    Metrics::new(
        Vec2::new(m.position.x, bottom + height / 2.0),
        Vec2::new(m.dimensions.x, height),
    )
}

/// Apply the edge (or pair of edges for a corner) named by `handle`
pub fn resize_with_handle(m: Metrics, handle: ResizeHandle, cursor: Vec2, min: Vec2) -> Metrics {
    let left = |m| resize_left(m, cursor.x, min.x);
    let right = |m| resize_right(m, cursor.x, min.x);
    let bottom = |m| resize_bottom(m, cursor.y, min.y);
    let top = |m| resize_top(m, cursor.y, min.y);

    match handle {
        ResizeHandle::None => m,
        ResizeHandle::Left => left(m),
        ResizeHandle::Right => right(m),
        ResizeHandle::Bottom => bottom(m),
        ResizeHandle::Top => top(m),
        ResizeHandle::BottomLeft => bottom(left(m)),
        ResizeHandle::BottomRight => right(bottom(m)),
        ResizeHandle::TopLeft => left(top(m)),
        ResizeHandle::TopRight => right(top(m)),
    }
}

impl PipelineState {
    /// Start a grab or a resize on the focused panel.
    ///
    /// Only a fresh press starts a gesture. A press on a border resizes; a
    /// press elsewhere inside the panel grabs it, undocking it first when the
    /// press is on the title bar of a docked panel. A docked panel's edge on
    /// the dockspace border is fixed, so pressing it starts nothing.
    pub(super) fn arbitrate(
        &mut self,
        index: usize,
        frame: &FrameInput,
        region: HoverRegion,
        events: &mut Vec<UiEvent>,
    ) {
        if !frame.pressed || !region.inside {
            return;
        }

        let panel = &mut self.panels[index];
        match panel.main_state() {
            MainState::None => {}
            MainState::Grabbed | MainState::Resizing | MainState::InPanelActivity => return,
        }
        let id = panel.id();

        if region.on_border() {
            let handle = region.handle.without_outer_edge(panel.dock_slot());
            if handle == ResizeHandle::None {
                return;
            }
            panel.set_main_state(MainState::Resizing);
            panel.set_resize_handle(handle);
            tracing::debug!(panel = id.0, ?handle, "Resize started");
            events.push(UiEvent::ResizeStarted { panel: id, handle });
            return;
        }

        panel.set_main_state(MainState::Grabbed);
        if !panel.has_captured_grab_offset {
            panel.store_offset_of_cursor_from_center(frame.cursor - panel.position());
            panel.has_captured_grab_offset = true;
        }
        tracing::debug!(panel = id.0, "Grab started");
        events.push(UiEvent::GrabStarted(id));

        if panel.is_docked() && region.on_title_bar {
            let slot = panel.dock_slot();
            panel.set_dock_state(DockState::NotDocked);
            panel.set_dock_slot(DockSlot::None);
            self.dockspace.free_slot(slot);
            tracing::debug!(panel = id.0, ?slot, "Undocked");
            events.push(UiEvent::Undocked { panel: id, slot });
        }
    }

    /// Move or resize the focused panel while the button is held
    pub(super) fn update_geometry(&mut self, index: usize, frame: &FrameInput, region: HoverRegion) {
        if !frame.left_down {
            return;
        }
        let min = self.min_dimensions();
        let panel = &mut self.panels[index];

        match panel.main_state() {
            MainState::Grabbed => {
                if panel.is_docked() && !region.on_title_bar {
                    return;
                }
                let position = frame.cursor - panel.offset_of_cursor_from_center();
                panel.update_metrics(position, panel.dimensions());
            }
            MainState::Resizing => {
                let metrics =
                    resize_with_handle(panel.metrics(), panel.resize_handle(), frame.cursor, min);
                panel.set_metrics(metrics);
            }
            MainState::None | MainState::InPanelActivity => {}
        }
    }

    /// Finish any grab or resize on release
    pub(super) fn end_gesture(&mut self, index: usize) {
        let panel = &mut self.panels[index];
        match panel.main_state() {
            MainState::Grabbed => {
                panel.set_main_state(MainState::None);
                panel.has_captured_grab_offset = false;
                tracing::debug!(panel = panel.id().0, "Grab ended");
            }
            MainState::Resizing => {
                panel.set_main_state(MainState::None);
                panel.set_resize_handle(ResizeHandle::None);
                tracing::debug!(panel = panel.id().0, "Resize ended");
            }
            MainState::None | MainState::InPanelActivity => {}
        }
    }
}
