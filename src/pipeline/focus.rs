//! Focus resolution and the z-order stack

use super::{hit::topmost_at, FrameInput, PipelineState, UiEvent};
use crate::panel::Panel;

/// Depth assigned to the frontmost rank
const FRONT_DEPTH: f32 = 0.1;

/// Parallel rank/depth arrays
///
/// `ranks[panel]` is the panel's position in the stack (0 = frontmost) and
/// `depths[rank]` the z assigned to that position. Ranks are always a dense
/// permutation of `0..n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZOrder {
    ranks: Vec<usize>,
    depths: Vec<f32>,
}

impl ZOrder {
    /// Stack for `n` panels where the last one is frontmost
    pub fn new(n: usize) -> Self {
        Self {
            ranks: (0..n).map(|i| n - 1 - i).collect(),
            depths: Self::depths_for(n),
        }
    }

    /// Evenly spaced depths in `(0, FRONT_DEPTH]`, frontmost first
    fn depths_for(n: usize) -> Vec<f32> {
        if n == 0 {
            return Vec::new();
        }
        let step = FRONT_DEPTH / n as f32;
        (0..n).map(|rank| FRONT_DEPTH - step * rank as f32).collect()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn rank(&self, panel: usize) -> Option<usize> {
        self.ranks.get(panel).copied()
    }

    pub fn depth(&self, rank: usize) -> Option<f32> {
        self.depths.get(rank).copied()
    }

    pub fn z_of(&self, panel: usize) -> Option<f32> {
        self.rank(panel).and_then(|rank| self.depth(rank))
    }

    /// Add a new panel at the front of the stack
    pub fn push_front(&mut self) {
        self.ranks.iter_mut().for_each(|rank| *rank += 1);
        self.ranks.push(0);
        self.depths = Self::depths_for(self.ranks.len());
    }

    /// Move `panel` to rank 0, shifting every panel that was in front of it
    /// back by one
    pub fn promote(&mut self, panel: usize) {
        let Some(current) = self.rank(panel) else {
            return;
        };
        for rank in self.ranks.iter_mut() {
            if *rank < current {
                *rank += 1;
            }
        }
        self.ranks[panel] = 0;
    }

    /// Panel indices ordered from the back of the stack to the front
    pub fn back_to_front(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.ranks.len()).collect();
        order.sort_by(|&a, &b| self.ranks[b].cmp(&self.ranks[a]));
        order
    }

    /// Whether ranks form a permutation of `0..n`
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.ranks.len()];
        for &rank in &self.ranks {
            match seen.get_mut(rank) {
                Some(slot) if !*slot => *slot = true,
                _ => return false,
            }
        }
        true
    }

    /// Write each panel's depth back into the panel
    pub fn apply(&self, panels: &mut [Panel]) {
        for (index, panel) in panels.iter_mut().enumerate() {
            if let Some(z) = self.z_of(index) {
                panel.set_z_index(z);
            }
        }
    }
}

impl PipelineState {
    /// Resolve focus from this frame's press/release edges.
    ///
    /// A grabbed or resizing owner always keeps focus. A press on empty
    /// space clears focus on its release, unless the owner is mid-gesture.
    pub(super) fn invalidate_focus(&mut self, frame: &FrameInput, events: &mut Vec<UiEvent>) {
        if frame.pressed {
            match topmost_at(&self.panels, frame.cursor, self.config.border_tolerance) {
                Some(hit) => match self.last_focused {
                    None => self.set_focus(Some(hit), events),
                    Some(owner) if owner != hit => {
                        let busy = {
                            let owner = &self.panels[owner];
                            owner.is_grabbed() || owner.is_resizing()
                        };
                        if !busy {
                            self.set_focus(Some(hit), events);
                        }
                    }
                    Some(_) => {}
                },
                None => self.grabbed_outside = true,
            }
        }

        if frame.released && self.grabbed_outside {
            self.grabbed_outside = false;
            if let Some(owner) = self.last_focused {
                let panel = &self.panels[owner];
                if !panel.is_grabbed() && !panel.is_resizing() {
                    self.set_focus(None, events);
                }
            }
        }
    }

    /// Move focus to `target`, promoting it to the front of the z-order
    fn set_focus(&mut self, target: Option<usize>, events: &mut Vec<UiEvent>) {
        let from = self.last_focused;
        if from == target {
            return;
        }

        if let Some(previous) = from {
            self.panels[previous].set_focus(false);
        }
        if let Some(index) = target {
            self.panels[index].set_focus(true);
            self.z_order.promote(index);
            self.z_order.apply(&mut self.panels);
        }
        self.last_focused = target;

        let from = from.map(|i| self.panels[i].id());
        let to = target.map(|i| self.panels[i].id());
        tracing::debug!(?from, ?to, "Focus changed");
        events.push(UiEvent::FocusChanged { from, to });
    }
}
