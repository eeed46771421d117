//! Tests for focus resolution and z-order promotion

mod common;

use common::Harness;
use ember_ui::pipeline::UiEvent;

// ============================================================================
// Focus by depth
// ============================================================================

#[test]
fn test_press_in_overlap_focuses_later_panel() {
    let mut h = Harness::new();
    let a = h.panel("A", 0.0, 0.0, 200.0, 100.0);
    let b = h.panel("B", 50.0, 0.0, 200.0, 100.0);

    assert!(h.get(b).z_index() > h.get(a).z_index());

    h.frame(25.0, 0.0, true);

    assert_eq!(h.state.focused(), Some(b));
    assert!(h.get(b).is_focused());
    assert!(!h.get(a).is_focused());
}

#[test]
fn test_focus_transfer_promotes_to_front() {
    let mut h = Harness::new();
    let a = h.panel("A", 0.0, 0.0, 200.0, 100.0);
    let b = h.panel("B", 50.0, 0.0, 200.0, 100.0);

    h.click(25.0, 0.0);
    assert_eq!(h.state.focused(), Some(b));

    // Only A covers this point
    let events = h.click(-80.0, 0.0);
    assert_eq!(h.state.focused(), Some(a));
    assert!(h.get(a).z_index() > h.get(b).z_index());
    assert_eq!(h.state.z_order().rank(a.0), Some(0));
    assert!(events.contains(&UiEvent::FocusChanged {
        from: Some(h.get(b).id()),
        to: Some(h.get(a).id()),
    }));

    // The overlap now resolves to A
    h.click(25.0, 0.0);
    assert_eq!(h.state.focused(), Some(a));
}

#[test]
fn test_press_on_focused_panel_emits_nothing() {
    let mut h = Harness::new();
    h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.click(0.0, 0.0);
    let events = h.click(10.0, 0.0);
    assert!(!events
        .iter()
        .any(|e| matches!(e, UiEvent::FocusChanged { .. })));
}

// ============================================================================
// Clearing focus
// ============================================================================

#[test]
fn test_press_on_empty_space_clears_focus_on_release() {
    let mut h = Harness::new();
    let a = h.panel("A", 0.0, 0.0, 200.0, 100.0);
    h.click(0.0, 0.0);
    assert_eq!(h.state.focused(), Some(a));

    h.frame(500.0, -300.0, true);
    assert_eq!(h.state.focused(), Some(a), "focus held until release");

    let output = h.frame(500.0, -300.0, false);
    assert_eq!(h.state.focused(), None);
    assert!(!h.get(a).is_focused());
    assert!(output.events.contains(&UiEvent::FocusChanged {
        from: Some(h.get(a).id()),
        to: None,
    }));
}

#[test]
fn test_grabbed_panel_keeps_focus_when_dragged_over_another() {
    let mut h = Harness::new();
    let a = h.panel("A", -300.0, 0.0, 200.0, 100.0);
    let b = h.panel("B", 300.0, 0.0, 200.0, 100.0);

    h.press_and_move((-300.0, 0.0), (300.0, 0.0));
    assert_eq!(h.state.focused(), Some(a));
    assert!(h.get(a).is_grabbed());

    h.frame(300.0, 0.0, false);
    assert_eq!(h.state.focused(), Some(a));
    assert!(!h.get(b).is_focused());
}

// ============================================================================
// Z-order invariants
// ============================================================================

#[test]
fn test_z_order_stays_a_permutation() {
    let mut h = Harness::new();
    let centres = [-400.0, -200.0, 0.0, 200.0, 400.0];
    let handles: Vec<_> = centres
        .iter()
        .enumerate()
        .map(|(i, &x)| h.panel(&format!("P{i}"), x, 0.0, 150.0, 100.0))
        .collect();

    for &i in &[2usize, 0, 4, 0, 1, 3, 2] {
        h.click(centres[i], 0.0);

        assert!(h.state.z_order().is_permutation());
        assert_eq!(h.state.focused(), Some(handles[i]));
        assert_eq!(h.state.z_order().rank(handles[i].0), Some(0));

        let focused_z = h.get(handles[i]).z_index();
        for &other in handles.iter().filter(|&&o| o != handles[i]) {
            assert!(h.get(other).z_index() < focused_z);
        }

        let focused_count = h.state.panels().iter().filter(|p| p.is_focused()).count();
        assert_eq!(focused_count, 1);
    }
}

#[test]
fn test_depths_are_distinct_and_in_range() {
    let mut h = Harness::new();
    for i in 0..4 {
        h.panel(&format!("P{i}"), i as f32 * 10.0, 0.0, 100.0, 100.0);
    }
    h.idle();

    let mut zs: Vec<f32> = h.state.panels().iter().map(|p| p.z_index()).collect();
    zs.sort_by(f32::total_cmp);
    zs.dedup();
    assert_eq!(zs.len(), 4);
    assert!(zs.iter().all(|&z| z > 0.0 && z <= 0.1));
}

#[test]
fn test_empty_pipeline_runs() {
    let mut h = Harness::new();
    let output = h.click(0.0, 0.0);
    assert!(output.is_empty());
    assert_eq!(h.state.focused(), None);
    assert!(h.list.quads().is_empty());
}
