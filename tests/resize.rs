//! Tests for grab and border/corner resizing driven through the pipeline

mod common;

use common::{approx, Harness};
use ember_ui::panel::{MainState, ResizeHandle};
use ember_ui::pipeline::{CursorHint, UiEvent};

// ============================================================================
// Edge resizing
// ============================================================================

#[test]
fn test_left_border_drag_widens_panel() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    let events = h.press_and_move((-100.0, 0.0), (-150.0, 0.0));
    assert!(h.get(p).is_resizing());
    assert_eq!(h.get(p).resize_handle(), ResizeHandle::Left);
    assert!(events.contains(&UiEvent::ResizeStarted {
        panel: h.get(p).id(),
        handle: ResizeHandle::Left,
    }));

    let bounds = h.get(p).bounds();
    assert!(approx(h.get(p).dimensions().x, 250.0));
    assert!(approx(bounds.left, -150.0));
    assert!(approx(bounds.right, 100.0));

    h.frame(-150.0, 0.0, false);
    assert_eq!(h.get(p).main_state(), MainState::None);
    assert_eq!(h.get(p).resize_handle(), ResizeHandle::None);
    assert!(approx(h.get(p).dimensions().x, 250.0));
}

#[test]
fn test_left_border_clamps_to_min_width() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.drag((-100.0, 0.0), (95.0, 0.0));

    let bounds = h.get(p).bounds();
    assert!(approx(h.get(p).dimensions().x, 20.0));
    assert!(approx(bounds.right, 100.0));
    assert!(approx(bounds.left, 80.0));
}

#[test]
fn test_top_border_clamps_to_min_height() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.drag((0.0, 50.0), (0.0, -200.0));

    assert!(approx(h.get(p).dimensions().y, 25.0));
    assert!(approx(h.get(p).bounds().bottom, -50.0));
}

#[test]
fn test_resize_continues_outside_panel() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.press_and_move((100.0, 0.0), (300.0, 0.0));
    h.frame(400.0, 10.0, true);
    h.frame(400.0, 10.0, false);

    let bounds = h.get(p).bounds();
    assert!(approx(bounds.left, -100.0));
    assert!(approx(bounds.right, 400.0));
    assert!(approx(h.get(p).dimensions().y, 100.0));
}

// ============================================================================
// Corners
// ============================================================================

#[test]
fn test_corner_press_wins_over_edge() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.frame(-99.0, -49.0, true);
    assert_eq!(h.get(p).resize_handle(), ResizeHandle::BottomLeft);
}

#[test]
fn test_top_right_corner_moves_two_edges() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.drag((100.0, 50.0), (160.0, 90.0));

    let bounds = h.get(p).bounds();
    assert!(approx(bounds.right, 160.0));
    assert!(approx(bounds.top, 90.0));
    assert!(approx(bounds.left, -100.0));
    assert!(approx(bounds.bottom, -50.0));
}

#[test]
fn test_every_handle_anchors_opposite_edges() {
    let cases = [
        ((-100.0, 0.0), ResizeHandle::Left),
        ((100.0, 0.0), ResizeHandle::Right),
        ((0.0, -50.0), ResizeHandle::Bottom),
        ((0.0, 50.0), ResizeHandle::Top),
        ((-100.0, -50.0), ResizeHandle::BottomLeft),
        ((100.0, -50.0), ResizeHandle::BottomRight),
        ((-100.0, 50.0), ResizeHandle::TopLeft),
        ((100.0, 50.0), ResizeHandle::TopRight),
    ];

    for (start, handle) in cases {
        let mut h = Harness::new();
        let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

        h.press_and_move(start, (start.0 + 30.0, start.1 - 20.0));
        assert_eq!(h.get(p).resize_handle(), handle, "{handle:?}");

        let b = h.get(p).bounds();
        let moves_left = matches!(
            handle,
            ResizeHandle::Left | ResizeHandle::BottomLeft | ResizeHandle::TopLeft
        );
        let moves_right = matches!(
            handle,
            ResizeHandle::Right | ResizeHandle::BottomRight | ResizeHandle::TopRight
        );
        let moves_bottom = matches!(
            handle,
            ResizeHandle::Bottom | ResizeHandle::BottomLeft | ResizeHandle::BottomRight
        );
        let moves_top = matches!(
            handle,
            ResizeHandle::Top | ResizeHandle::TopLeft | ResizeHandle::TopRight
        );

        assert!(moves_left || approx(b.left, -100.0), "{handle:?} left");
        assert!(moves_right || approx(b.right, 100.0), "{handle:?} right");
        assert!(moves_bottom || approx(b.bottom, -50.0), "{handle:?} bottom");
        assert!(moves_top || approx(b.top, 50.0), "{handle:?} top");
    }
}

// ============================================================================
// Grab
// ============================================================================

#[test]
fn test_grab_keeps_cursor_offset() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    let events = h.drag((40.0, 10.0), (140.0, -90.0));
    assert!(events.contains(&UiEvent::GrabStarted(h.get(p).id())));

    let position = h.get(p).position();
    assert!(approx(position.x, 100.0));
    assert!(approx(position.y, -100.0));
    assert!(approx(h.get(p).dimensions().x, 200.0));
    assert!(!h.get(p).has_captured_grab_offset);
}

#[test]
fn test_second_grab_recaptures_offset() {
    let mut h = Harness::new();
    let p = h.panel("A", 0.0, 0.0, 200.0, 100.0);

    h.drag((40.0, 10.0), (140.0, 10.0));
    h.drag((60.0, 0.0), (0.0, 0.0));

    let position = h.get(p).position();
    assert!(approx(position.x, 40.0));
    assert!(approx(position.y, 0.0));
}

#[test]
fn test_cursor_hint_follows_gesture() {
    let mut h = Harness::new();
    h.panel("A", 0.0, 0.0, 200.0, 100.0);

    // Focus first so hover hints apply
    h.click(0.0, 0.0);
    assert_eq!(h.frame(-100.0, 0.0, false).cursor_hint, CursorHint::ResizeHorizontal);
    assert_eq!(h.frame(0.0, -50.0, false).cursor_hint, CursorHint::ResizeVertical);
    assert_eq!(h.frame(100.0, 50.0, false).cursor_hint, CursorHint::ResizeNesw);
    assert_eq!(h.frame(0.0, 0.0, true).cursor_hint, CursorHint::Grab);
    assert_eq!(h.frame(0.0, 0.0, false).cursor_hint, CursorHint::Default);
}
