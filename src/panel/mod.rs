//! Panel system - movable, resizable, dockable windows
//!
//! ## Architecture
//!
//! - `Panel`: geometry, interaction state and child buttons of one window
//! - `Button`: a clickable child stacked under the panel's title bar
//! - `Dockspace`: four edge slots panels can snap into
//!
//! Panels are stored in an arena owned by `PipelineState`; everything else
//! refers to them through `PanelHandle` indices.

pub mod button;
pub mod dock;

use serde::{Deserialize, Serialize};

pub use button::{Button, PressState};
pub use dock::{Axis, Corner, DockSlot, Dockspace};

use crate::config::BORDER_TOLERANCE;
use crate::geometry::{Metrics, Rect2D, Vec2};
use crate::theme::Color;

/// Stable panel identity, assigned monotonically and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(pub u32);

/// Index of a panel in the pipeline's panel arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelHandle(pub usize);

/// Mutually exclusive interaction state of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MainState {
    #[default]
    None,
    /// Being dragged by the cursor
    Grabbed,
    /// An edge or corner is being dragged
    Resizing,
    /// A child button is pressed; grab and resize are suppressed
    InPanelActivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DockState {
    #[default]
    NotDocked,
    Docked,
}

/// Which edge or corner a resize drags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[default]
    None,
    Left,
    Right,
    Bottom,
    Top,
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::Left,
        ResizeHandle::Right,
        ResizeHandle::Bottom,
        ResizeHandle::Top,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft
                | ResizeHandle::BottomRight
                | ResizeHandle::TopLeft
                | ResizeHandle::TopRight
        )
    }

    /// Drop the component that drags the outer edge of `slot`, the edge a
    /// docked panel shares with the dockspace border
    pub fn without_outer_edge(self, slot: DockSlot) -> ResizeHandle {
        use ResizeHandle as H;
        match (slot, self) {
            (DockSlot::Left, H::Left) | (DockSlot::Right, H::Right) => H::None,
            (DockSlot::Bottom, H::Bottom) | (DockSlot::Top, H::Top) => H::None,
            (DockSlot::Left, H::BottomLeft) | (DockSlot::Right, H::BottomRight) => H::Bottom,
            (DockSlot::Left, H::TopLeft) | (DockSlot::Right, H::TopRight) => H::Top,
            (DockSlot::Bottom, H::BottomLeft) | (DockSlot::Top, H::TopLeft) => H::Left,
            (DockSlot::Bottom, H::BottomRight) | (DockSlot::Top, H::TopRight) => H::Right,
            (_, handle) => handle,
        }
    }
}

/// Everything needed to submit a new panel
#[derive(Debug, Clone)]
pub struct PanelCreateInfo {
    pub title: String,
    /// Centre of the panel
    pub position: Vec2,
    pub dimensions: Vec2,
    pub color: Color,
}

impl PanelCreateInfo {
    pub fn new(title: impl Into<String>, position: Vec2, dimensions: Vec2, color: Color) -> Self {
        Self {
            title: title.into(),
            position,
            dimensions,
            color,
        }
    }
}

/// A movable, resizable, dockable window
#[derive(Debug, Clone)]
pub struct Panel {
    id: PanelId,
    title: String,
    position: Vec2,
    z: f32,
    dimensions: Vec2,
    bounds: Rect2D,
    color: Color,

    main_state: MainState,
    dock_state: DockState,
    dock_slot: DockSlot,
    resize_handle: ResizeHandle,
    focused: bool,

    cursor_offset: Vec2,
    /// Set once per grab gesture so the offset is captured on the first
    /// frame only
    pub has_captured_grab_offset: bool,

    buttons: Vec<Button>,
}

impl Panel {
    pub fn new(id: PanelId, info: PanelCreateInfo) -> Self {
        let mut panel = Self {
            id,
            title: info.title,
            position: info.position,
            z: 0.0,
            dimensions: info.dimensions,
            bounds: Rect2D::default(),
            color: info.color,
            main_state: MainState::None,
            dock_state: DockState::NotDocked,
            dock_slot: DockSlot::None,
            resize_handle: ResizeHandle::None,
            focused: false,
            cursor_offset: Vec2::ZERO,
            has_captured_grab_offset: false,
            buttons: Vec::new(),
        };
        panel.invalidate_bounds();
        panel
    }

    pub fn id(&self) -> PanelId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn color(&self) -> Color {
        self.color
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

    pub fn z_index(&self) -> f32 {
        self.z
    }

    pub fn set_z_index(&mut self, z: f32) {
        self.z = z;
    }

    /// Recompute the bounds rectangle from position and dimensions
    pub fn invalidate_bounds(&mut self) {
        self.bounds = Rect2D::from_center(self.position, self.dimensions);
    }

    /// Atomically move and resize the panel
    pub fn update_metrics(&mut self, position: Vec2, dimensions: Vec2) {
        self.position = position;
        self.dimensions = dimensions;
        self.invalidate_bounds();
    }

    pub fn set_metrics(&mut self, metrics: Metrics) {
        self.update_metrics(metrics.position, metrics.dimensions);
    }

    /// Cursor inside the bounds grown by the default border tolerance
    pub fn is_hovered_on_panel(&self, cursor: Vec2) -> bool {
        self.is_hovered_within(cursor, BORDER_TOLERANCE)
    }

    pub fn is_hovered_within(&self, cursor: Vec2, tolerance: f32) -> bool {
        self.bounds.expanded(tolerance).contains(cursor)
    }

    /// Whether the cursor is over the title bar strip
    pub fn is_on_title_bar(&self, cursor: Vec2, title_bar_height: f32, tolerance: f32) -> bool {
        self.is_hovered_within(cursor, tolerance) && cursor.y >= self.bounds.top - title_bar_height
    }

    pub fn store_offset_of_cursor_from_center(&mut self, offset: Vec2) {
        self.cursor_offset = offset;
    }

    pub fn offset_of_cursor_from_center(&self) -> Vec2 {
        self.cursor_offset
    }

    pub fn main_state(&self) -> MainState {
        self.main_state
    }

    pub fn set_main_state(&mut self, state: MainState) {
        self.main_state = state;
    }

    pub fn is_grabbed(&self) -> bool {
        self.main_state == MainState::Grabbed
    }

    pub fn is_resizing(&self) -> bool {
        self.main_state == MainState::Resizing
    }

    pub fn dock_state(&self) -> DockState {
        self.dock_state
    }

    pub fn set_dock_state(&mut self, state: DockState) {
        self.dock_state = state;
    }

    pub fn is_docked(&self) -> bool {
        self.dock_state == DockState::Docked
    }

    pub fn dock_slot(&self) -> DockSlot {
        self.dock_slot
    }

    pub fn set_dock_slot(&mut self, slot: DockSlot) {
        self.dock_slot = slot;
    }

    pub fn resize_handle(&self) -> ResizeHandle {
        self.resize_handle
    }

    pub fn set_resize_handle(&mut self, handle: ResizeHandle) {
        self.resize_handle = handle;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    // ------------------------------------------------------------------------
    // Buttons
    // ------------------------------------------------------------------------

    /// Append a button below the existing ones, returning its index
    pub fn add_button(&mut self, text: impl Into<String>, dimensions: Vec2) -> usize {
        self.buttons.push(Button::new(text, dimensions));
        self.buttons.len() - 1
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn buttons_mut(&mut self) -> &mut [Button] {
        &mut self.buttons
    }

    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    /// Stack the buttons under the title bar.
    ///
    /// The stacking cursor starts at `top - title_bar_height - padding.y` and
    /// moves down by `height + padding.y` per button. A button whose bottom
    /// would fall below `bottom + padding.y` is hidden; a warning is logged
    /// the first frame it overflows.
    pub fn layout_buttons(&mut self, title_bar_height: f32, padding: Vec2) {
        let bounds = self.bounds;
        let mut stack_cursor = bounds.top - title_bar_height - padding.y;
        let floor = bounds.bottom + padding.y;

        for button in &mut self.buttons {
            let dims = button.dimensions();
            let fits = stack_cursor - dims.y >= floor;

            if !fits {
                if button.is_visible() {
                    tracing::warn!(
                        panel = %self.title,
                        button = %button.text(),
                        "Button does not fit inside its panel, skipping"
                    );
                }
                button.set_visible(false);
                button.reset();
                continue;
            }

            button.set_visible(true);
            button.set_position(Vec2::new(
                bounds.left + padding.x + dims.x / 2.0,
                stack_cursor - dims.y / 2.0,
            ));
            stack_cursor -= dims.y + padding.y;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(position: Vec2, dimensions: Vec2) -> Panel {
        Panel::new(
            PanelId(0),
            PanelCreateInfo::new("test", position, dimensions, Color::rgb(0, 0, 0)),
        )
    }

    #[test]
    fn test_outer_edge_dropped_for_dock_slot() {
        assert_eq!(ResizeHandle::Left.without_outer_edge(DockSlot::Left), ResizeHandle::None);
        assert_eq!(ResizeHandle::Right.without_outer_edge(DockSlot::Left), ResizeHandle::Right);
        assert_eq!(
            ResizeHandle::BottomLeft.without_outer_edge(DockSlot::Left),
            ResizeHandle::Bottom
        );
        assert_eq!(
            ResizeHandle::TopRight.without_outer_edge(DockSlot::Top),
            ResizeHandle::Right
        );
        assert_eq!(
            ResizeHandle::BottomRight.without_outer_edge(DockSlot::Top),
            ResizeHandle::BottomRight
        );
        assert_eq!(ResizeHandle::Top.without_outer_edge(DockSlot::None), ResizeHandle::Top);
    }

    #[test]
    fn test_bounds_follow_metrics() {
        let mut p = panel(Vec2::ZERO, Vec2::new(200.0, 100.0));
        assert_eq!(p.bounds(), Rect2D::new(-100.0, 100.0, -50.0, 50.0));

        p.update_metrics(Vec2::new(10.0, 10.0), Vec2::new(20.0, 30.0));
        assert_eq!(p.bounds(), Rect2D::new(0.0, 20.0, -5.0, 25.0));
    }

    #[test]
    fn test_hover_includes_border_tolerance() {
        let p = panel(Vec2::ZERO, Vec2::new(200.0, 100.0));
        assert!(p.is_hovered_on_panel(Vec2::new(-102.0, 0.0)));
        assert!(p.is_hovered_on_panel(Vec2::new(103.0, 53.0)));
        assert!(!p.is_hovered_on_panel(Vec2::new(104.0, 0.0)));
    }

    #[test]
    fn test_title_bar() {
        let p = panel(Vec2::ZERO, Vec2::new(200.0, 100.0));
        assert!(p.is_on_title_bar(Vec2::new(0.0, 40.0), 15.0, 3.0));
        assert!(p.is_on_title_bar(Vec2::new(0.0, 35.0), 15.0, 3.0));
        assert!(!p.is_on_title_bar(Vec2::new(0.0, 30.0), 15.0, 3.0));
    }

    #[test]
    fn test_buttons_stack_under_title_bar() {
        let mut p = panel(Vec2::ZERO, Vec2::new(200.0, 200.0));
        p.add_button("a", Vec2::new(80.0, 30.0));
        p.add_button("b", Vec2::new(60.0, 20.0));
        p.layout_buttons(15.0, Vec2::new(15.0, 10.0));

        // Cursor starts at 100 - 15 - 10 = 75
        assert_eq!(p.buttons()[0].position(), Vec2::new(-100.0 + 15.0 + 40.0, 60.0));
        // Then 75 - 30 - 10 = 35
        assert_eq!(p.buttons()[1].position(), Vec2::new(-100.0 + 15.0 + 30.0, 25.0));
    }

    #[test]
    fn test_overflowing_button_is_hidden() {
        let mut p = panel(Vec2::ZERO, Vec2::new(200.0, 60.0));
        p.add_button("fits", Vec2::new(80.0, 10.0));
        p.add_button("overflows", Vec2::new(80.0, 30.0));
        p.layout_buttons(15.0, Vec2::new(15.0, 10.0));

        assert!(p.buttons()[0].is_visible());
        assert!(!p.buttons()[1].is_visible());

        // Growing the panel brings it back
        p.update_metrics(Vec2::ZERO, Vec2::new(200.0, 200.0));
        p.layout_buttons(15.0, Vec2::new(15.0, 10.0));
        assert!(p.buttons()[1].is_visible());
    }
}
