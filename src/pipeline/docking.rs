//! Dock decisions and docked layout
//!
//! A panel docks when it is released by its title bar close enough to a
//! viewport edge. Every frame afterwards its geometry is derived from its
//! slot, so docked neighbors always meet exactly at their shared edges.

use super::{DockPreview, FrameInput, HoverRegion, PipelineState, UiEvent};
use crate::geometry::{Metrics, Rect2D, Vec2};
use crate::panel::{DockSlot, DockState, Dockspace, PanelHandle};

use super::resize::{resize_bottom, resize_left, resize_right, resize_top};

/// Slot whose edge is the first, in Left, Right, Bottom, Top order, within
/// docking distance of the cursor.
///
/// Only that edge is considered: if another panel holds its slot there is no
/// candidate, even when a later edge is also in range.
pub fn candidate_slot(
    dockspace: &Dockspace,
    cursor: Vec2,
    threshold: Vec2,
    handle: PanelHandle,
) -> Option<DockSlot> {
    let bounds = dockspace.bounds();
    let slot = DockSlot::ALL.into_iter().find(|&slot| match slot {
        DockSlot::Left => cursor.x <= bounds.left + threshold.x,
        DockSlot::Right => cursor.x >= bounds.right - threshold.x,
        DockSlot::Bottom => cursor.y <= bounds.bottom + threshold.y,
        DockSlot::Top => cursor.y >= bounds.top - threshold.y,
        DockSlot::None => false,
    })?;
    match dockspace.occupant(slot) {
        Some(occupant) if occupant != handle => None,
        _ => Some(slot),
    }
}

impl PipelineState {
    fn dock_threshold(&self) -> Vec2 {
        Vec2::new(self.config.dock_threshold_x, self.config.dock_threshold_y)
    }

    /// Whether a release (or the current drag) of the panel at `index` is
    /// eligible for docking
    fn can_dock(&self, index: usize, region: HoverRegion) -> bool {
        let panel = &self.panels[index];
        panel.is_grabbed() && !panel.is_docked() && region.on_title_bar
    }

    /// Where the grabbed panel would dock if released now
    pub(super) fn preview_for(
        &self,
        index: usize,
        frame: &FrameInput,
        region: HoverRegion,
    ) -> Option<DockPreview> {
        if !frame.left_down || !self.can_dock(index, region) {
            return None;
        }
        let slot = candidate_slot(
            &self.dockspace,
            frame.cursor,
            self.dock_threshold(),
            PanelHandle(index),
        )?;
        let rect = self.dockspace.claim_rect(
            slot,
            self.panels[index].dimensions(),
            self.min_dimensions(),
        );
        Some(DockPreview { slot, rect })
    }

    /// Dock the focused panel if it is released by its title bar near a
    /// free edge
    pub(super) fn dock_on_release(
        &mut self,
        index: usize,
        frame: &FrameInput,
        region: HoverRegion,
        events: &mut Vec<UiEvent>,
    ) {
        if !self.can_dock(index, region) {
            return;
        }
        let handle = PanelHandle(index);
        let Some(slot) = candidate_slot(&self.dockspace, frame.cursor, self.dock_threshold(), handle)
        else {
            return;
        };

        if !self.dockspace.claim(slot, handle) {
            return;
        }

        let rect = self.dockspace.claim_rect(
            slot,
            self.panels[index].dimensions(),
            self.min_dimensions(),
        );
        let panel = &mut self.panels[index];
        panel.set_dock_state(DockState::Docked);
        panel.set_dock_slot(slot);
        panel.set_metrics(Metrics::from_rect(rect));

        let id = panel.id();
        tracing::debug!(panel = id.0, ?slot, "Docked");
        events.push(UiEvent::Docked { panel: id, slot });

        self.invalidate_positions_when_docking_in_slot(slot, rect);
    }

    /// Pull the facing edge of the panels docked in the two perpendicular
    /// slots back to the interior edge of a freshly claimed slot
    pub(super) fn invalidate_positions_when_docking_in_slot(&mut self, slot: DockSlot, claimed: Rect2D) {
        let min = self.min_dimensions();

        for neighbor_slot in slot.perpendicular() {
            let Some(PanelHandle(neighbor)) = self.dockspace.occupant(neighbor_slot) else {
                continue;
            };
            let Some(panel) = self.panels.get_mut(neighbor) else {
                continue;
            };

            let m = panel.metrics();
            let metrics = match slot {
                DockSlot::Left => resize_left(m, claimed.right, min.x),
                DockSlot::Right => resize_right(m, claimed.left, min.x),
                DockSlot::Bottom => resize_bottom(m, claimed.top, min.y),
                DockSlot::Top => resize_top(m, claimed.bottom, min.y),
                DockSlot::None => m,
            };
            panel.set_metrics(metrics);
            tracing::trace!(?neighbor_slot, ?slot, "Neighbor reflowed for new dock");
        }
    }

    /// Snap every docked panel to its slot geometry.
    ///
    /// Slot rectangles are computed together from the panels' current main
    /// extents, so a resized interior edge realigns the perpendicular
    /// neighbors in the same frame.
    pub(super) fn layout_docked(&mut self) {
        let min = self.min_dimensions();
        let panels = &self.panels;
        let rects = self.dockspace.slot_rects(
            |PanelHandle(i)| panels.get(i).map_or(Vec2::ZERO, |p| p.dimensions()),
            min,
        );

        for (slot, rect) in DockSlot::ALL.into_iter().zip(rects) {
            let (Some(rect), Some(PanelHandle(index))) = (rect, self.dockspace.occupant(slot))
            else {
                continue;
            };
            if let Some(panel) = self.panels.get_mut(index) {
                panel.set_metrics(Metrics::from_rect(rect));
            }
        }
    }
}
