//! Dockspace slots and docked layout geometry
//!
//! A dockspace covers the usable viewport and has four slots, one per edge.
//! Each slot holds at most one panel. Where two perpendicular slots meet, the
//! shared corner belongs to exactly one of them: the owner spans the corner
//! and the other stops at the owner's interior edge.

use serde::{Deserialize, Serialize};

use super::PanelHandle;
use crate::geometry::{Rect2D, Vec2};

/// Slot a panel is docked into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DockSlot {
    #[default]
    None,
    Left,
    Right,
    Bottom,
    Top,
}

impl DockSlot {
    /// Real slots, in the order docking candidates are tested on release
    pub const ALL: [DockSlot; 4] = [
        DockSlot::Left,
        DockSlot::Right,
        DockSlot::Bottom,
        DockSlot::Top,
    ];

    /// Axis along which the docked panel keeps its own size
    pub fn main_axis(&self) -> Option<Axis> {
        match self {
            DockSlot::Left | DockSlot::Right => Some(Axis::Horizontal),
            DockSlot::Bottom | DockSlot::Top => Some(Axis::Vertical),
            DockSlot::None => None,
        }
    }

    /// The two slots that meet this one at a corner
    pub fn perpendicular(&self) -> [DockSlot; 2] {
        match self {
            DockSlot::Left | DockSlot::Right => [DockSlot::Bottom, DockSlot::Top],
            DockSlot::Bottom | DockSlot::Top => [DockSlot::Left, DockSlot::Right],
            DockSlot::None => [DockSlot::None, DockSlot::None],
        }
    }

    pub fn corners(&self) -> [Option<Corner>; 2] {
        match self {
            DockSlot::Left => [Some(Corner::BottomLeft), Some(Corner::TopLeft)],
            DockSlot::Right => [Some(Corner::BottomRight), Some(Corner::TopRight)],
            DockSlot::Bottom => [Some(Corner::BottomLeft), Some(Corner::BottomRight)],
            DockSlot::Top => [Some(Corner::TopLeft), Some(Corner::TopRight)],
            DockSlot::None => [None, None],
        }
    }

    fn index(&self) -> Option<usize> {
        match self {
            DockSlot::Left => Some(0),
            DockSlot::Right => Some(1),
            DockSlot::Bottom => Some(2),
            DockSlot::Top => Some(3),
            DockSlot::None => None,
        }
    }
}

/// Axis for dock sizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Dockspace corner where two perpendicular slots meet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    BottomLeft,
    BottomRight,
    TopLeft,
    TopRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopLeft,
        Corner::TopRight,
    ];

    /// The two slots touching this corner
    pub fn slots(&self) -> [DockSlot; 2] {
        match self {
            Corner::BottomLeft => [DockSlot::Left, DockSlot::Bottom],
            Corner::BottomRight => [DockSlot::Right, DockSlot::Bottom],
            Corner::TopLeft => [DockSlot::Left, DockSlot::Top],
            Corner::TopRight => [DockSlot::Right, DockSlot::Top],
        }
    }

    /// Corner shared by two slots, if they are perpendicular
    pub fn shared(a: DockSlot, b: DockSlot) -> Option<Corner> {
        a.corners()
            .into_iter()
            .flatten()
            .find(|corner| b.corners().contains(&Some(*corner)))
    }

    fn index(&self) -> usize {
        match self {
            Corner::BottomLeft => 0,
            Corner::BottomRight => 1,
            Corner::TopLeft => 2,
            Corner::TopRight => 3,
        }
    }
}

/// Viewport-wide docking area with four edge slots
///
/// A slot is occupied iff it holds a handle, so the occupancy flag and the
/// back-reference cannot disagree.
#[derive(Debug, Clone, Default)]
pub struct Dockspace {
    bounds: Rect2D,
    occupants: [Option<PanelHandle>; 4],
    corner_owners: [Option<DockSlot>; 4],
}

impl Dockspace {
    pub fn new(bounds: Rect2D) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> Rect2D {
        self.bounds
    }

    /// Called once per frame with the current viewport area
    pub fn set_bounds(&mut self, bounds: Rect2D) {
        self.bounds = bounds;
    }

    pub fn is_occupied(&self, slot: DockSlot) -> bool {
        self.occupant(slot).is_some()
    }

    pub fn is_left_occupied(&self) -> bool {
        self.is_occupied(DockSlot::Left)
    }

    pub fn is_right_occupied(&self) -> bool {
        self.is_occupied(DockSlot::Right)
    }

    pub fn is_bottom_occupied(&self) -> bool {
        self.is_occupied(DockSlot::Bottom)
    }

    pub fn is_top_occupied(&self) -> bool {
        self.is_occupied(DockSlot::Top)
    }

    pub fn occupant(&self, slot: DockSlot) -> Option<PanelHandle> {
        slot.index().and_then(|i| self.occupants[i])
    }

    /// Slot currently held by `handle`, if any
    pub fn slot_of(&self, handle: PanelHandle) -> Option<DockSlot> {
        DockSlot::ALL
            .into_iter()
            .find(|&slot| self.occupant(slot) == Some(handle))
    }

    /// Occupied slots with their occupants, in release-test order
    pub fn occupied(&self) -> impl Iterator<Item = (DockSlot, PanelHandle)> + '_ {
        DockSlot::ALL
            .into_iter()
            .filter_map(|slot| self.occupant(slot).map(|handle| (slot, handle)))
    }

    pub fn corner_owner(&self, corner: Corner) -> Option<DockSlot> {
        self.corner_owners[corner.index()]
    }

    pub fn owns_corner(&self, slot: DockSlot, corner: Corner) -> bool {
        self.corner_owner(corner) == Some(slot)
    }

    /// Put `handle` into `slot`, taking both of the slot's corners.
    ///
    /// Returns false, leaving the dockspace untouched, when the slot is
    /// `None` or held by a different panel.
    pub fn claim(&mut self, slot: DockSlot, handle: PanelHandle) -> bool {
        let Some(index) = slot.index() else {
            return false;
        };
        match self.occupants[index] {
            Some(existing) if existing != handle => return false,
            _ => {}
        }

        self.occupants[index] = Some(handle);
        for corner in slot.corners().into_iter().flatten() {
            self.corner_owners[corner.index()] = Some(slot);
        }
        true
    }

    /// Clear a slot, handing its corners to the perpendicular occupants.
    ///
    /// Neighbors are not resized here; they grow into the freed space the
    /// next time docked geometry is computed.
    pub fn free_slot(&mut self, slot: DockSlot) -> Option<PanelHandle> {
        let index = slot.index()?;
        let previous = self.occupants[index].take();

        for corner in slot.corners().into_iter().flatten() {
            if self.corner_owner(corner) != Some(slot) {
                continue;
            }
            let heir = corner
                .slots()
                .into_iter()
                .find(|&other| other != slot && self.is_occupied(other));
            self.corner_owners[corner.index()] = heir;
        }

        previous
    }

    pub fn free_left_dock(&mut self) -> Option<PanelHandle> {
        self.free_slot(DockSlot::Left)
    }

    pub fn free_right_dock(&mut self) -> Option<PanelHandle> {
        self.free_slot(DockSlot::Right)
    }

    pub fn free_bottom_dock(&mut self) -> Option<PanelHandle> {
        self.free_slot(DockSlot::Bottom)
    }

    pub fn free_top_dock(&mut self) -> Option<PanelHandle> {
        self.free_slot(DockSlot::Top)
    }

    /// Main-axis size of a panel docked in `slot`, clamped to
    /// `[min, half the dockspace extent]`
    pub fn main_extent(&self, slot: DockSlot, dimensions: Vec2, min: Vec2) -> f32 {
        match slot.main_axis() {
            Some(Axis::Horizontal) => dimensions
                .x
                .min(self.bounds.width() / 2.0)
                .max(min.x),
            Some(Axis::Vertical) => dimensions
                .y
                .min(self.bounds.height() / 2.0)
                .max(min.y),
            None => 0.0,
        }
    }

    /// Geometry a panel would get by claiming an empty slot: full cross-axis
    /// span, clamped main axis, snapped to the edge
    pub fn claim_rect(&self, slot: DockSlot, dimensions: Vec2, min: Vec2) -> Rect2D {
        let extent = self.main_extent(slot, dimensions, min);
        self.edge_rect(slot, extent, self.bounds_cross(slot))
    }

    /// Geometry of every occupied slot.
    ///
    /// The cross axis of a slot stops at a perpendicular neighbor that owns
    /// the shared corner. Extents come from `dimensions_of`, so the result is
    /// the same whatever order the panels were updated in.
    pub fn slot_rects(
        &self,
        dimensions_of: impl Fn(PanelHandle) -> Vec2,
        min: Vec2,
    ) -> [Option<Rect2D>; 4] {
        let mut extents = [None; 4];
        for (slot, handle) in self.occupied() {
            if let Some(index) = slot.index() {
                extents[index] = Some(self.main_extent(slot, dimensions_of(handle), min));
            }
        }

        let mut rects = [None; 4];
        for (slot, _) in self.occupied() {
            let Some(index) = slot.index() else {
                continue;
            };
            let Some(extent) = extents[index] else {
                continue;
            };

            let (mut low, mut high) = self.bounds_cross(slot);
            let [low_neighbor, high_neighbor] = slot.perpendicular();
            if let Some(neighbor_extent) = self.neighbor_extent(slot, low_neighbor, &extents) {
                low += neighbor_extent;
            }
            if let Some(neighbor_extent) = self.neighbor_extent(slot, high_neighbor, &extents) {
                high -= neighbor_extent;
            }

            rects[index] = Some(self.edge_rect(slot, extent, (low, high.max(low))));
        }
        rects
    }

    /// Extent of `neighbor` if it is occupied and owns the corner it shares
    /// with `slot`
    fn neighbor_extent(
        &self,
        slot: DockSlot,
        neighbor: DockSlot,
        extents: &[Option<f32>; 4],
    ) -> Option<f32> {
        let corner = Corner::shared(slot, neighbor)?;
        if !self.owns_corner(neighbor, corner) {
            return None;
        }
        extents[neighbor.index()?]
    }

    /// Full cross-axis range of the dockspace for a slot
    fn bounds_cross(&self, slot: DockSlot) -> (f32, f32) {
        match slot.main_axis() {
            Some(Axis::Horizontal) => (self.bounds.bottom, self.bounds.top),
            Some(Axis::Vertical) => (self.bounds.left, self.bounds.right),
            None => (0.0, 0.0),
        }
    }

    fn edge_rect(&self, slot: DockSlot, extent: f32, (low, high): (f32, f32)) -> Rect2D {
        let b = self.bounds;
        match slot {
            DockSlot::Left => Rect2D::new(b.left, b.left + extent, low, high),
            DockSlot::Right => Rect2D::new(b.right - extent, b.right, low, high),
            DockSlot::Bottom => Rect2D::new(low, high, b.bottom, b.bottom + extent),
            DockSlot::Top => Rect2D::new(low, high, b.top - extent, b.top),
            DockSlot::None => Rect2D::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: Vec2 = Vec2::new(20.0, 25.0);

    fn dockspace() -> Dockspace {
        Dockspace::new(Rect2D::new(-640.0, 640.0, -360.0, 360.0))
    }

    #[test]
    fn test_claim_and_free() {
        let mut ds = dockspace();
        assert!(ds.claim(DockSlot::Left, PanelHandle(0)));
        assert!(ds.is_left_occupied());
        assert_eq!(ds.occupant(DockSlot::Left), Some(PanelHandle(0)));
        assert_eq!(ds.slot_of(PanelHandle(0)), Some(DockSlot::Left));

        // Another panel cannot take an occupied slot
        assert!(!ds.claim(DockSlot::Left, PanelHandle(1)));
        assert_eq!(ds.occupant(DockSlot::Left), Some(PanelHandle(0)));

        assert_eq!(ds.free_left_dock(), Some(PanelHandle(0)));
        assert!(!ds.is_left_occupied());
        assert_eq!(ds.occupant(DockSlot::Left), None);
    }

    #[test]
    fn test_claim_none_slot_is_rejected() {
        let mut ds = dockspace();
        assert!(!ds.claim(DockSlot::None, PanelHandle(0)));
        assert_eq!(ds.occupied().count(), 0);
    }

    #[test]
    fn test_claim_takes_corners() {
        let mut ds = dockspace();
        ds.claim(DockSlot::Bottom, PanelHandle(0));
        ds.claim(DockSlot::Left, PanelHandle(1));
        assert_eq!(ds.corner_owner(Corner::BottomLeft), Some(DockSlot::Left));
        assert_eq!(ds.corner_owner(Corner::BottomRight), Some(DockSlot::Bottom));
    }

    #[test]
    fn test_free_hands_corners_to_neighbor() {
        let mut ds = dockspace();
        ds.claim(DockSlot::Bottom, PanelHandle(0));
        ds.claim(DockSlot::Left, PanelHandle(1));
        ds.free_slot(DockSlot::Left);
        assert_eq!(ds.corner_owner(Corner::BottomLeft), Some(DockSlot::Bottom));
        assert_eq!(ds.corner_owner(Corner::TopLeft), None);
    }

    #[test]
    fn test_claim_rect_spans_cross_axis_and_clamps_to_half() {
        let ds = dockspace();
        let rect = ds.claim_rect(DockSlot::Left, Vec2::new(900.0, 100.0), MIN);
        assert_eq!(rect.left, -640.0);
        assert_eq!(rect.right, 0.0);
        assert_eq!(rect.bottom, -360.0);
        assert_eq!(rect.top, 360.0);

        let rect = ds.claim_rect(DockSlot::Top, Vec2::new(100.0, 5.0), MIN);
        assert_eq!(rect.height(), 25.0);
        assert_eq!(rect.top, 360.0);
        assert_eq!(rect.width(), 1280.0);
    }

    #[test]
    fn test_slot_rects_meet_at_t_junction() {
        let mut ds = dockspace();
        ds.claim(DockSlot::Left, PanelHandle(0));
        ds.claim(DockSlot::Bottom, PanelHandle(1));

        let dims = |h: PanelHandle| match h.0 {
            0 => Vec2::new(200.0, 10.0),
            _ => Vec2::new(10.0, 100.0),
        };
        let rects = ds.slot_rects(dims, MIN);
        let left = rects[0].unwrap();
        let bottom = rects[2].unwrap();

        // Bottom claimed the corner last, so Left stops at its top edge
        assert_eq!(left.bottom, bottom.top);
        assert_eq!(left.top, 360.0);
        assert_eq!(bottom.left, -640.0);
        assert_eq!(bottom.right, 640.0);
        assert_eq!(left.right, -440.0);
    }
}
