//! Camera transform tests: zoom to cursor, clamping and fit to view.

use crate::helpers::{TestSessionBuilder, assert_close};
use pinboard::constants::{MAX_SCALE, MIN_SCALE};
use pinboard::input::coords::{CanvasPoint, ScreenPoint, Viewport, WorldPoint};
use pinboard::input::transform::{clamp_scale, fit_to_view, wheel_zoom_factor};
use pinboard::input::{InputEvent, InputOutcome};
use pinboard::types::{Camera, Item};

#[test]
fn test_zoom_keeps_anchor_fixed() {
    let cameras = [
        Camera::new(0.0, 0.0, 1.0),
        Camera::new(200.0, 120.0, 1.0),
        Camera::new(-350.0, 75.5, 2.5),
    ];
    let anchors = [
        CanvasPoint::new(0.0, 0.0),
        CanvasPoint::new(412.0, 310.0),
        CanvasPoint::new(-40.0, 900.0),
    ];

    for camera in cameras {
        for anchor in anchors {
            for factor in [0.5, 0.9, 1.1, 3.0] {
                let before = camera.canvas_to_world(anchor);
                let zoomed = camera.zoomed_around(anchor, factor);
                let after = zoomed.canvas_to_world(anchor);
                assert!(
                    (before.x - after.x).abs() < 1e-6 && (before.y - after.y).abs() < 1e-6,
                    "anchor drifted for {camera:?} at {anchor:?} x{factor}"
                );
            }
        }
    }
}

#[test]
fn test_zoom_saturates_at_bounds_and_keeps_anchor() {
    let anchor = CanvasPoint::new(300.0, 200.0);
    let camera = Camera::new(10.0, 20.0, 5.0);

    let zoomed = camera.zoomed_around(anchor, 10.0);
    assert_eq!(zoomed.scale, MAX_SCALE);
    let before = camera.canvas_to_world(anchor);
    let after = zoomed.canvas_to_world(anchor);
    assert!((before.x - after.x).abs() < 1e-6);
    assert!((before.y - after.y).abs() < 1e-6);

    let out = Camera::new(0.0, 0.0, 0.2).zoomed_around(anchor, 0.01);
    assert_eq!(out.scale, MIN_SCALE);
}

#[test]
fn test_clamp_scale() {
    assert_eq!(clamp_scale(0.01), MIN_SCALE);
    assert_eq!(clamp_scale(100.0), MAX_SCALE);
    assert_eq!(clamp_scale(2.0), 2.0);
    assert_eq!(clamp_scale(f64::NAN), 1.0);
}

#[test]
fn test_wheel_factor_direction() {
    assert!(wheel_zoom_factor(120.0, 0.0015) > 1.0);
    assert!(wheel_zoom_factor(-120.0, 0.0015) < 1.0);
    assert_close(wheel_zoom_factor(0.0, 0.0015), 1.0);
}

#[test]
fn test_fit_to_view_centers_below_top_bar() {
    let item = Item::new("/a.png", WorldPoint::new(0.0, 0.0), (200.0, 100.0), 1);
    let viewport = Viewport::new(ScreenPoint::new(0.0, 0.0), 1000.0, 800.0);

    let camera = fit_to_view(&item, &viewport);

    // (1000 - 60) / 200 = 4.7 beats (800 - 60 - 110) / 100 = 6.3
    assert_close(camera.scale, 4.7);
    assert_close(camera.tx, 500.0);
    assert_close(camera.ty, 455.0);
}

#[test]
fn test_wheel_zooms_around_pointer_with_viewport_offset() {
    let (mut session, _) = TestSessionBuilder::new()
        .with_viewport((40.0, 60.0), 800.0, 600.0)
        .build();
    let pointer = ScreenPoint::new(340.0, 260.0);
    let world_before = session.viewport().screen_to_world(&session.camera(), pointer);

    let outcome = session.dispatch(InputEvent::Wheel {
        position: pointer,
        delta: 240.0,
    });

    assert_eq!(outcome, InputOutcome::Handled);
    assert!(session.camera().scale > 1.0);
    let world_after = session.viewport().screen_to_world(&session.camera(), pointer);
    assert_close(world_before.x, world_after.x);
    assert_close(world_before.y, world_after.y);
    // committed to the tab, so a snapshot carries it
    assert_eq!(session.document().active_tab().camera, session.camera());
}
