//! Buttons owned by a panel
//!
//! A button has no identity outside its parent panel. Its position is
//! re-derived from the panel every frame; only its press state and label
//! survive between frames.

use crate::geometry::{Metrics, Rect2D, Vec2};

/// Press state of a button, advanced once per frame by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PressState {
    #[default]
    NotPressed,
    /// Cursor is over the button with the left button up
    Hovered,
    /// Cursor is over the button with the left button down
    Pressed,
}

/// A clickable widget stacked under its panel's title bar
#[derive(Debug, Clone)]
pub struct Button {
    text: String,
    position: Vec2,
    dimensions: Vec2,
    bounds: Rect2D,
    press_state: PressState,
    /// False when the button does not fit inside its panel this frame
    visible: bool,
}

impl Button {
    pub fn new(text: impl Into<String>, dimensions: Vec2) -> Self {
        let dimensions = Vec2::new(dimensions.x.max(0.0), dimensions.y.max(0.0));
        Self {
            text: text.into(),
            position: Vec2::ZERO,
            dimensions,
            bounds: Rect2D::from_center(Vec2::ZERO, dimensions),
            press_state: PressState::NotPressed,
            visible: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    pub fn bounds(&self) -> Rect2D {
        self.bounds
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::new(self.position, self.dimensions)
    }

    pub fn press_state(&self) -> PressState {
        self.press_state
    }

    pub fn is_pressed(&self) -> bool {
        self.press_state == PressState::Pressed
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Move the button and recompute its hit rectangle
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.invalidate_bounds();
    }

    pub fn invalidate_bounds(&mut self) {
        self.bounds = Rect2D::from_center(self.position, self.dimensions);
    }

    /// Hidden buttons never report a hover
    pub fn is_hovered(&self, cursor: Vec2) -> bool {
        self.visible && self.bounds.contains(cursor)
    }

    /// Advance the press state for this frame.
    ///
    /// `inside` must already account for occlusion by other panels.
    /// Returns true when a press is released while still over the button.
    pub fn update_press_state(&mut self, inside: bool, left_down: bool) -> bool {
        let previous = self.press_state;

        if self.press_state == PressState::Hovered {
            self.press_state = PressState::NotPressed;
        }
        if inside {
            self.press_state = if left_down {
                PressState::Pressed
            } else {
                PressState::Hovered
            };
        }
        if !left_down && self.press_state != PressState::Hovered {
            self.press_state = PressState::NotPressed;
        }

        previous == PressState::Pressed && inside && !left_down
    }

    /// Drop any hover/press, used while the parent panel is grabbed or resized
    pub fn reset(&mut self) {
        self.press_state = PressState::NotPressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> Button {
        Button::new("ok", Vec2::new(80.0, 30.0))
    }

    #[test]
    fn test_hover_then_press_then_click() {
        let mut b = button();
        assert!(!b.update_press_state(true, false));
        assert_eq!(b.press_state(), PressState::Hovered);

        assert!(!b.update_press_state(true, true));
        assert_eq!(b.press_state(), PressState::Pressed);

        assert!(b.update_press_state(true, false));
        assert_eq!(b.press_state(), PressState::Hovered);
    }

    #[test]
    fn test_press_held_while_dragging_off() {
        let mut b = button();
        b.update_press_state(true, true);
        assert!(!b.update_press_state(false, true));
        assert_eq!(b.press_state(), PressState::Pressed);

        // Released away from the button: no click
        assert!(!b.update_press_state(false, false));
        assert_eq!(b.press_state(), PressState::NotPressed);
    }

    #[test]
    fn test_hover_reverts_when_cursor_leaves() {
        let mut b = button();
        b.update_press_state(true, false);
        b.update_press_state(false, false);
        assert_eq!(b.press_state(), PressState::NotPressed);
    }

    #[test]
    fn test_hidden_button_is_never_hovered() {
        let mut b = button();
        b.set_position(Vec2::new(10.0, 10.0));
        assert!(b.is_hovered(Vec2::new(10.0, 10.0)));
        b.set_visible(false);
        assert!(!b.is_hovered(Vec2::new(10.0, 10.0)));
    }
}
