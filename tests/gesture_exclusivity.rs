use spatial_desk::layout::{Point, Size, Viewport};
use spatial_desk::pointer::{Gesture, PointerController};
use spatial_desk::window::{AppId, WindowRegistry};

fn two_open() -> WindowRegistry {
    let mut registry = WindowRegistry::with_default_layout(Viewport::new(1920, 1080));
    registry.open(AppId::Files);
    registry
}

#[test]
fn second_gesture_is_rejected_until_the_first_ends() {
    let mut registry = two_open();
    let mut pointer = PointerController::new();
    let files_before = registry.get(AppId::Files).unwrap().clone();

    // resize the protocol panel from its bottom-right corner (580, 660)
    assert!(pointer.begin_resize(&mut registry, AppId::StatusPanel, Point::new(575, 655)));
    assert!(!pointer.begin_drag(&mut registry, AppId::Files, Point::new(300, 130)));

    pointer.pointer_move(&mut registry, Point::new(675, 705));
    assert_eq!(registry.get(AppId::Files).unwrap(), &files_before);
    assert_eq!(
        registry.get(AppId::StatusPanel).unwrap().size,
        Size::new(600, 650)
    );
    assert_eq!(registry.active(), Some(AppId::StatusPanel));

    assert_eq!(pointer.pointer_up(), Some(AppId::StatusPanel));
    assert!(pointer.begin_drag(&mut registry, AppId::Files, Point::new(300, 130)));
    pointer.pointer_move(&mut registry, Point::new(350, 180));
    assert_eq!(
        registry.get(AppId::Files).unwrap().position,
        Point::new(250, 170)
    );
}

#[test]
fn listeners_live_exactly_as_long_as_the_gesture() {
    let mut registry = two_open();
    let mut pointer = PointerController::new();
    assert_eq!(pointer.registered_listeners(), 0);

    pointer.begin_drag(&mut registry, AppId::Files, Point::new(300, 130));
    assert!(pointer.is_listening());
    assert_eq!(pointer.registered_listeners(), 1);
    // a rejected start does not register twice
    pointer.begin_resize(&mut registry, AppId::Files, Point::new(990, 610));
    assert_eq!(pointer.registered_listeners(), 1);

    pointer.cancel();
    assert_eq!(pointer.registered_listeners(), 0);
    assert_eq!(pointer.gesture(), Gesture::Idle);

    pointer.begin_resize(&mut registry, AppId::Files, Point::new(990, 610));
    pointer.pointer_up();
    assert!(!pointer.is_listening());
    // moves after release write nothing
    let before = registry.get(AppId::Files).unwrap().clone();
    assert!(!pointer.pointer_move(&mut registry, Point::new(0, 0)));
    assert_eq!(registry.get(AppId::Files).unwrap(), &before);
}

#[test]
fn drag_clamps_on_every_move() {
    let mut registry = two_open();
    let mut pointer = PointerController::new();
    pointer.begin_drag(&mut registry, AppId::Files, Point::new(210, 130));
    for (x, y) in [(-5000, 130), (100, -400), (9000, 9000)] {
        pointer.pointer_move(&mut registry, Point::new(x, y));
        let w = registry.get(AppId::Files).unwrap();
        assert!(w.position.x >= -(w.size.width - 50) && w.position.x <= 1870);
        assert!(w.position.y >= 0 && w.position.y <= 1030);
    }
}

#[test]
fn hidden_windows_cannot_start_gestures() {
    let mut registry = two_open();
    let mut pointer = PointerController::new();
    registry.minimize(AppId::Files);
    assert!(!pointer.begin_drag(&mut registry, AppId::Files, Point::new(300, 130)));
    assert!(!pointer.begin_resize(&mut registry, AppId::Gallery, Point::new(0, 0)));
    assert!(!pointer.is_active());
}
