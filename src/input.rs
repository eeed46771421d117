//! Input and viewport collaborators
//!
//! The pipeline never talks to a windowing system directly. Hosts implement
//! `InputSource` and `ViewportProvider`, and the pipeline samples them once at
//! the start of every frame into an immutable `InputSnapshot`.

use crate::geometry::{Rect2D, Vec2};

/// Mouse buttons the pipeline can query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Per-frame pointer state provided by the host
pub trait InputSource {
    /// Cursor in UI coordinates (origin at viewport centre, y up)
    fn cursor_position(&self) -> Vec2;
    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool;
    fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        !self.is_mouse_button_pressed(button)
    }
}

/// Size and content scale of the drawable area
pub trait ViewportProvider {
    /// Framebuffer size in physical pixels
    fn viewport_size(&self) -> Vec2;
    /// Physical pixels per logical pixel on each axis
    fn content_scale(&self) -> Vec2;
}

/// Pointer state frozen for the duration of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    pub cursor: Vec2,
    pub left_down: bool,
    pub right_down: bool,
}

impl InputSnapshot {
    pub fn new(cursor: Vec2, left_down: bool) -> Self {
        Self {
            cursor,
            left_down,
            right_down: false,
        }
    }

    pub fn sample(source: &dyn InputSource) -> Self {
        Self {
            cursor: source.cursor_position(),
            left_down: source.is_mouse_button_pressed(MouseButton::Left),
            right_down: source.is_mouse_button_pressed(MouseButton::Right),
        }
    }
}

impl InputSource for InputSnapshot {
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left_down,
            MouseButton::Right => self.right_down,
            MouseButton::Middle => false,
        }
    }
}

/// Fixed viewport, used by headless hosts and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticViewport {
    pub size: Vec2,
    pub scale: Vec2,
}

impl StaticViewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            scale: Vec2::splat(1.0),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec2::splat(scale);
        self
    }
}

impl ViewportProvider for StaticViewport {
    fn viewport_size(&self) -> Vec2 {
        self.size
    }

    fn content_scale(&self) -> Vec2 {
        self.scale
    }
}

/// Content scale with non-positive components replaced by 1
fn effective_scale(viewport: &dyn ViewportProvider) -> Vec2 {
    let scale = viewport.content_scale();
    Vec2::new(
        if scale.x > 0.0 { scale.x } else { 1.0 },
        if scale.y > 0.0 { scale.y } else { 1.0 },
    )
}

fn logical_size(viewport: &dyn ViewportProvider) -> Vec2 {
    let size = viewport.viewport_size();
    let scale = effective_scale(viewport);
    Vec2::new(size.x / scale.x, size.y / scale.y)
}

/// Usable dockspace area: the whole viewport in UI coordinates
pub fn dockspace_bounds(viewport: &dyn ViewportProvider) -> Rect2D {
    let half = logical_size(viewport).half();
    Rect2D::new(-half.x, half.x, -half.y, half.y)
}

/// Convert a physical pixel position (origin top-left, y down) to UI
/// coordinates
pub fn cursor_to_ui(physical: Vec2, viewport: &dyn ViewportProvider) -> Vec2 {
    let scale = effective_scale(viewport);
    let half = logical_size(viewport).half();
    Vec2::new(physical.x / scale.x - half.x, -physical.y / scale.y + half.y)
}

/// Convert UI coordinates back to physical pixels (origin top-left, y down)
pub fn ui_to_physical(ui: Vec2, viewport: &dyn ViewportProvider) -> Vec2 {
    let scale = effective_scale(viewport);
    let half = logical_size(viewport).half();
    Vec2::new((ui.x + half.x) * scale.x, (half.y - ui.y) * scale.y)
}
