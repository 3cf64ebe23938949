use eframe::egui::pos2;

use overlay_timer::message::OverlayMessage;
use overlay_timer::overlay::{DragState, Geometry, HorizontalAnchor, OverlayHost, PANEL_WIDTH};
use overlay_timer::settings::Settings;

fn host() -> OverlayHost {
    OverlayHost::new(Settings::default())
}

#[test]
fn toggle_alternates_presence() {
    let mut host = host();
    assert!(!host.is_present());
    host.handle(OverlayMessage::Toggle);
    assert!(host.is_present());
    host.handle(OverlayMessage::Toggle);
    assert!(!host.is_present());
}

#[test]
fn create_and_destroy_are_idempotent() {
    let mut host = host();
    host.create();
    host.create();
    assert!(host.is_present());
    host.destroy();
    host.destroy();
    assert!(!host.is_present());
}

#[test]
fn close_message_destroys_the_container() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);
    host.handle(OverlayMessage::Close);
    assert!(!host.is_present());
    // A second close is harmless.
    host.handle(OverlayMessage::Close);
    assert!(!host.is_present());
}

#[test]
fn resize_applies_height_and_leaves_width_alone() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);
    host.handle(OverlayMessage::Resize { height: 44 });
    let overlay = host.overlay().expect("overlay should be present");
    assert_eq!(overlay.geometry.height, 44.0);
    assert_eq!(overlay.geometry.width, PANEL_WIDTH);
}

#[test]
fn stale_resize_after_destroy_is_dropped() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);
    host.handle(OverlayMessage::Close);
    host.handle(OverlayMessage::Resize { height: 999 });
    assert!(!host.is_present());
}

#[test]
fn recreation_starts_from_scratch() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);
    host.handle(OverlayMessage::Resize { height: 44 });
    host.overlay_mut()
        .expect("overlay should be present")
        .panel
        .engine_mut()
        .quick_add(600);
    host.handle(OverlayMessage::Toggle);
    host.handle(OverlayMessage::Toggle);

    let overlay = host.overlay().expect("overlay should be present");
    assert_eq!(overlay.geometry.height, 260.0);
    assert_eq!(
        overlay.panel.engine().remaining().seconds(),
        Settings::default().start_seconds
    );
}

#[test]
fn fresh_geometry_hangs_off_the_right_edge() {
    let geometry = Geometry::at_offset(20.0, 20.0);
    assert_eq!(
        geometry.origin(1920.0),
        pos2(1920.0 - PANEL_WIDTH - 20.0, 20.0)
    );
    // Right-anchored origin follows the screen edge.
    assert_eq!(geometry.origin(1280.0).x, 1280.0 - PANEL_WIDTH - 20.0);
}

#[test]
fn consecutive_drag_deltas_accumulate() {
    let screen = 1920.0;
    let mut geometry = Geometry::at_offset(20.0, 20.0);
    let mut drag = DragState::default();

    drag.pointer_down(pos2(1700.0, 25.0));
    let first = drag.pointer_move(pos2(1710.0, 32.0)).expect("captured");
    geometry.drag_by(first, screen);
    // The second delta is relative to the moved position, not the start.
    let second = drag.pointer_move(pos2(1715.0, 30.0)).expect("captured");
    geometry.drag_by(second, screen);

    let start_x = screen - PANEL_WIDTH - 20.0;
    assert_eq!(geometry.origin(screen), pos2(start_x + 15.0, 25.0));
    drag.pointer_up();
    assert!(!drag.is_captured());
}

#[test]
fn drag_switches_the_anchor_one_way() {
    let mut geometry = Geometry::at_offset(20.0, 20.0);
    assert!(matches!(geometry.anchor, HorizontalAnchor::RightOffset(_)));
    geometry.drag_by(eframe::egui::vec2(-5.0, 0.0), 1920.0);
    assert!(matches!(geometry.anchor, HorizontalAnchor::Left(_)));
    // Once left-anchored the origin no longer tracks the screen width.
    assert_eq!(geometry.origin(1920.0).x, geometry.origin(800.0).x);
}

#[test]
fn moves_without_capture_are_ignored() {
    let mut drag = DragState::default();
    assert!(drag.pointer_move(pos2(10.0, 10.0)).is_none());
    drag.pointer_down(pos2(0.0, 0.0));
    drag.pointer_up();
    assert!(drag.pointer_move(pos2(10.0, 10.0)).is_none());
}

#[test]
fn drag_does_not_clamp_to_screen_bounds() {
    let mut geometry = Geometry::at_offset(20.0, 20.0);
    geometry.drag_by(eframe::egui::vec2(-5000.0, -5000.0), 1920.0);
    let origin = geometry.origin(1920.0);
    assert!(origin.x < 0.0);
    assert!(origin.y < 0.0);
}

#[test]
fn compact_toggle_round_trips_the_container_height() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);

    host.overlay_mut()
        .expect("overlay should be present")
        .panel
        .toggle_compact();
    host.pump();
    assert_eq!(host.overlay().unwrap().geometry.height, 44.0);

    host.overlay_mut()
        .expect("overlay should be present")
        .panel
        .toggle_compact();
    host.pump();
    assert_eq!(host.overlay().unwrap().geometry.height, 260.0);
}

#[test]
fn panel_close_request_reaches_the_host() {
    let mut host = host();
    host.handle(OverlayMessage::Toggle);
    host.overlay()
        .expect("overlay should be present")
        .panel
        .request_close();
    host.pump();
    assert!(!host.is_present());
}
