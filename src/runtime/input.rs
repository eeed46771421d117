//! Window input tracking
//!
//! winit delivers pointer input as events; the pipeline wants a state it can
//! sample once per frame. `WindowInput` folds events into that state and
//! `WindowViewport` exposes the current surface size and scale.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitButton, WindowEvent};
use winit::window::CursorIcon;

use ember_ui::geometry::Vec2;
use ember_ui::input::{cursor_to_ui, InputSource, MouseButton, ViewportProvider};
use ember_ui::pipeline::CursorHint;

/// Surface size and scale factor of the sandbox window
#[derive(Debug, Clone, Copy)]
pub struct WindowViewport {
    pub size: PhysicalSize<u32>,
    pub scale_factor: f64,
}

impl ViewportProvider for WindowViewport {
    fn viewport_size(&self) -> Vec2 {
        Vec2::new(self.size.width as f32, self.size.height as f32)
    }

    fn content_scale(&self) -> Vec2 {
        Vec2::splat(self.scale_factor as f32)
    }
}

/// Pointer state accumulated from window events
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowInput {
    /// Physical pixels, origin top-left
    physical: Option<PhysicalPosition<f64>>,
    cursor: Vec2,
    left: bool,
    right: bool,
    middle: bool,
}

impl WindowInput {
    /// Fold one window event into the tracked state. Returns true when the
    /// event changed pointer state.
    pub fn handle_event(&mut self, event: &WindowEvent, viewport: &WindowViewport) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.physical = Some(*position);
                self.refresh(viewport);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                // Keep the last position so an in-flight drag can still end
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let down = *state == ElementState::Pressed;
                match button {
                    WinitButton::Left => self.left = down,
                    WinitButton::Right => self.right = down,
                    WinitButton::Middle => self.middle = down,
                    _ => return false,
                }
                true
            }
            _ => false,
        }
    }

    /// Recompute the UI-space cursor after a resize or scale change
    pub fn refresh(&mut self, viewport: &WindowViewport) {
        if let Some(p) = self.physical {
            self.cursor = cursor_to_ui(Vec2::new(p.x as f32, p.y as f32), viewport);
        }
    }
}

impl InputSource for WindowInput {
    fn cursor_position(&self) -> Vec2 {
        self.cursor
    }

    fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.left,
            MouseButton::Right => self.right,
            MouseButton::Middle => self.middle,
        }
    }
}

pub fn cursor_icon(hint: CursorHint) -> CursorIcon {
    match hint {
        CursorHint::Default => CursorIcon::Default,
        CursorHint::ResizeHorizontal => CursorIcon::EwResize,
        CursorHint::ResizeVertical => CursorIcon::NsResize,
        CursorHint::ResizeNwse => CursorIcon::NwseResize,
        CursorHint::ResizeNesw => CursorIcon::NeswResize,
        CursorHint::Grab => CursorIcon::Grabbing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> WindowViewport {
        WindowViewport {
            size: PhysicalSize::new(1280, 720),
            scale_factor: 1.0,
        }
    }

    #[test]
    fn test_refresh_maps_to_ui_space() {
        let mut input = WindowInput {
            physical: Some(PhysicalPosition::new(0.0, 0.0)),
            ..Default::default()
        };
        input.refresh(&viewport());
        assert_eq!(input.cursor_position(), Vec2::new(-640.0, 360.0));
    }

    #[test]
    fn test_hidpi_viewport_reports_scale() {
        let vp = WindowViewport {
            size: PhysicalSize::new(2560, 1440),
            scale_factor: 2.0,
        };
        assert_eq!(vp.content_scale(), Vec2::splat(2.0));
        let mut input = WindowInput {
            physical: Some(PhysicalPosition::new(2560.0, 1440.0)),
            ..Default::default()
        };
        input.refresh(&vp);
        assert_eq!(input.cursor_position(), Vec2::new(640.0, -360.0));
    }

    #[test]
    fn test_cursor_icon_mapping() {
        assert_eq!(cursor_icon(CursorHint::Grab), CursorIcon::Grabbing);
        assert_eq!(cursor_icon(CursorHint::ResizeHorizontal), CursorIcon::EwResize);
    }
}
