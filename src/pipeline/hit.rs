//! Hit-testing panels, borders and buttons

use super::{FrameInput, PipelineState, UiEvent};
use crate::geometry::Vec2;
use crate::panel::{MainState, Panel, ResizeHandle};

/// Where the cursor sits relative to one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HoverRegion {
    /// Inside the bounds grown by the border tolerance
    pub inside: bool,
    /// Border or corner under the cursor; corners win over edges
    pub handle: ResizeHandle,
    pub on_title_bar: bool,
}

impl HoverRegion {
    pub fn on_border(&self) -> bool {
        self.handle != ResizeHandle::None
    }
}

/// Classify the cursor against a panel's eight border regions
pub fn classify(panel: &Panel, cursor: Vec2, title_bar_height: f32, tolerance: f32) -> HoverRegion {
    let bounds = panel.bounds();
    let inside = panel.is_hovered_within(cursor, tolerance);
    if !inside {
        return HoverRegion::default();
    }

    let left = bounds.near_left(cursor, tolerance);
    let right = bounds.near_right(cursor, tolerance);
    let bottom = bounds.near_bottom(cursor, tolerance);
    let top = bounds.near_top(cursor, tolerance);

    let handle = if bottom && left {
        ResizeHandle::BottomLeft
    } else if bottom && right {
        ResizeHandle::BottomRight
    } else if top && left {
        ResizeHandle::TopLeft
    } else if top && right {
        ResizeHandle::TopRight
    } else if left {
        ResizeHandle::Left
    } else if right {
        ResizeHandle::Right
    } else if bottom {
        ResizeHandle::Bottom
    } else if top {
        ResizeHandle::Top
    } else {
        ResizeHandle::None
    };

    HoverRegion {
        inside,
        handle,
        on_title_bar: panel.is_on_title_bar(cursor, title_bar_height, tolerance),
    }
}

/// Index of the panel under the cursor with the highest z; the first
/// maximum wins on ties
pub fn topmost_at(panels: &[Panel], cursor: Vec2, tolerance: f32) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, panel) in panels.iter().enumerate() {
        if !panel.is_hovered_within(cursor, tolerance) {
            continue;
        }
        match best {
            Some((_, z)) if panel.z_index() <= z => {}
            _ => best = Some((index, panel.z_index())),
        }
    }
    best.map(|(index, _)| index)
}

impl PipelineState {
    /// Advance every button's press state.
    ///
    /// Runs before focus so that a press on a button marks its panel
    /// `InPanelActivity` and suppresses grab and resize for that frame. Only
    /// the topmost panel under the cursor sees the cursor over its buttons.
    pub(super) fn evaluate_buttons(&mut self, frame: &FrameInput, events: &mut Vec<UiEvent>) {
        let topmost = topmost_at(&self.panels, frame.cursor, self.config.border_tolerance);

        for (index, panel) in self.panels.iter_mut().enumerate() {
            if panel.main_state() == MainState::InPanelActivity {
                panel.set_main_state(MainState::None);
            }

            match panel.main_state() {
                MainState::Grabbed | MainState::Resizing => {
                    panel.buttons_mut().iter_mut().for_each(|b| b.reset());
                    continue;
                }
                MainState::None | MainState::InPanelActivity => {}
            }

            let over_panel = topmost == Some(index);
            let id = panel.id();
            let mut any_pressed = false;

            for (button_index, button) in panel.buttons_mut().iter_mut().enumerate() {
                let inside = over_panel && button.is_hovered(frame.cursor);
                if button.update_press_state(inside, frame.left_down) {
                    tracing::debug!(panel = id.0, button = %button.text(), "Button clicked");
                    events.push(UiEvent::ButtonClicked {
                        panel: id,
                        button: button_index,
                        label: button.text().to_string(),
                    });
                }
                any_pressed |= button.is_pressed();
            }

            if any_pressed {
                panel.set_main_state(MainState::InPanelActivity);
            }
        }
    }
}
