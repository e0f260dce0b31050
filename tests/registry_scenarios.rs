use spatial_desk::layout::{Point, Size, Viewport};
use spatial_desk::window::{AppId, WindowRecord, WindowRegistry};

fn desktop_1080p() -> WindowRegistry {
    WindowRegistry::with_default_layout(Viewport::new(1920, 1080))
}

fn three_windows() -> WindowRegistry {
    let size = Size::new(400, 300);
    WindowRegistry::new(
        Viewport::new(1920, 1080),
        vec![
            WindowRecord::new(AppId::Files, Point::new(0, 0), size, 10).opened(),
            WindowRecord::new(AppId::Notes, Point::new(10, 10), size, 11).opened(),
            WindowRecord::new(AppId::Gallery, Point::new(20, 20), size, 12).opened(),
        ],
    )
}

#[test]
fn dragging_far_left_keeps_fifty_pixels_reachable() {
    let mut registry = desktop_1080p();
    registry.move_window(AppId::StatusPanel, Point::new(-600, 60));
    let window = registry.get(AppId::StatusPanel).unwrap();
    assert_eq!(window.position, Point::new(-450, 60));
}

#[test]
fn resize_applies_lower_bounds() {
    let mut registry = desktop_1080p();
    registry.resize_window(AppId::StatusPanel, Size::new(100, 50));
    assert_eq!(
        registry.get(AppId::StatusPanel).unwrap().size,
        Size::new(300, 200)
    );
}

#[test]
fn focus_takes_max_z_plus_one() {
    let mut registry = three_windows();
    registry.focus(AppId::Files);
    let z = |id| registry.get(id).unwrap().z_index;
    assert_eq!(z(AppId::Files), 13);
    assert_eq!(z(AppId::Notes), 11);
    assert_eq!(z(AppId::Gallery), 12);
    assert_eq!(registry.active(), Some(AppId::Files));
}

#[test]
fn opening_closed_windows_stacks_them_in_order() {
    let mut registry = WindowRegistry::with_default_layout(Viewport::new(1920, 1080));
    registry.open(AppId::Files);
    registry.open(AppId::Notes);
    let z = |id| registry.get(id).unwrap().z_index;
    assert_eq!((z(AppId::Files), z(AppId::Notes)), (17, 18));
    assert_eq!(registry.active(), Some(AppId::Notes));
}

#[test]
fn repeated_focus_is_strictly_increasing() {
    let mut registry = three_windows();
    let mut last = registry.max_z();
    for id in [AppId::Notes, AppId::Files, AppId::Notes, AppId::Gallery, AppId::Files] {
        registry.focus(id);
        let z = registry.get(id).unwrap().z_index;
        assert!(z > last);
        assert!(registry.iter().filter(|w| w.id != id).all(|w| w.z_index < z));
        last = z;
    }
}

#[test]
fn close_then_open_restores_geometry() {
    let mut registry = desktop_1080p();
    registry.open(AppId::Notes);
    registry.move_window(AppId::Notes, Point::new(333, 222));
    registry.resize_window(AppId::Notes, Size::new(640, 410));
    registry.close(AppId::Notes);
    assert_eq!(registry.active(), None);
    registry.open(AppId::Notes);
    let notes = registry.get(AppId::Notes).unwrap();
    assert_eq!(notes.position, Point::new(333, 222));
    assert_eq!(notes.size, Size::new(640, 410));
    assert_eq!(registry.active(), Some(AppId::Notes));
}

#[test]
fn minimized_window_stays_running_in_dock() {
    let mut registry = desktop_1080p();
    registry.minimize(AppId::StatusPanel);
    let entry = registry
        .dock_entries()
        .into_iter()
        .find(|e| e.id == AppId::StatusPanel)
        .unwrap();
    assert!(entry.running);
    assert!(!entry.visible);
    assert!(!entry.active);
    assert!(registry.visible_in_paint_order().is_empty());
}

#[test]
fn every_move_lands_inside_the_clamp_bounds() {
    let mut registry = desktop_1080p();
    registry.open(AppId::Monitor);
    let viewport = registry.viewport();
    for x in (-3000..=3000).step_by(250) {
        for y in (-1500..=2500).step_by(250) {
            registry.move_window(AppId::Monitor, Point::new(x, y));
            let w = registry.get(AppId::Monitor).unwrap();
            assert!(w.position.x >= -(w.size.width - 50));
            assert!(w.position.x <= viewport.width - 50);
            assert!(w.position.y >= 0);
            assert!(w.position.y <= viewport.height - 50);
        }
    }
}

#[test]
fn resize_does_not_reclamp_position() {
    let mut registry = WindowRegistry::with_default_layout(Viewport::new(800, 600));
    registry.move_window(AppId::StatusPanel, Point::new(700, 500));
    registry.resize_window(AppId::StatusPanel, Size::new(1200, 900));
    let w = registry.get(AppId::StatusPanel).unwrap();
    assert_eq!(w.position, Point::new(700, 500));
    assert_eq!(w.size, Size::new(1200, 900));
}
