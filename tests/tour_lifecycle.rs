use std::rc::Rc;
use std::time::{Duration, Instant};

use spatial_desk::constants::TOUR_COMPLETE_KEY;
use spatial_desk::layout::{Point, Viewport};
use spatial_desk::store::{KeyValueStore, MemoryStore};
use spatial_desk::tour::{CardAlign, TourSequencer, TourState, TourTarget, placement};
use spatial_desk::window::{AppId, WindowRegistry};

const DELAY: Duration = Duration::from_millis(1000);

fn fresh() -> (Rc<MemoryStore>, TourSequencer) {
    let store = Rc::new(MemoryStore::new());
    (store.clone(), TourSequencer::new(store))
}

#[test]
fn auto_start_fires_exactly_once_per_session() {
    let (_, mut tour) = fresh();
    let t0 = Instant::now();
    assert!(tour.arm_auto_start(t0));
    assert!(!tour.arm_auto_start(t0));
    assert!(!tour.poll(t0 + DELAY / 2));
    assert!(tour.poll(t0 + DELAY));
    assert_eq!(tour.state(), TourState::Step(0));

    tour.skip();
    assert!(!tour.poll(t0 + DELAY * 5));
    assert!(!tour.arm_auto_start(t0 + DELAY * 5));
    assert_eq!(tour.state(), TourState::Inactive);
}

#[test]
fn completed_tour_never_auto_starts() {
    let (store, mut tour) = fresh();
    store.set(TOUR_COMPLETE_KEY, "true").unwrap();
    let t0 = Instant::now();
    assert!(!tour.arm_auto_start(t0));
    assert!(!tour.poll(t0 + DELAY));
    assert!(!tour.is_active());
}

#[test]
fn n_advances_finish_and_persist() {
    let (store, mut tour) = fresh();
    tour.start();
    let n = tour.len();
    for i in 0..n {
        assert_eq!(tour.state(), TourState::Step(i));
        assert_eq!(tour.next_label(), if i + 1 == n { "Initialize" } else { "Next" });
        assert_eq!(store.get(TOUR_COMPLETE_KEY), None);
        tour.advance();
    }
    assert_eq!(tour.state(), TourState::Inactive);
    assert_eq!(store.get(TOUR_COMPLETE_KEY).as_deref(), Some("true"));
}

#[test]
fn skip_from_any_step_persists_immediately() {
    for step in 0..5 {
        let (store, mut tour) = fresh();
        tour.start();
        for _ in 0..step {
            tour.advance();
        }
        assert_eq!(tour.state(), TourState::Step(step));
        tour.skip();
        assert_eq!(tour.state(), TourState::Inactive);
        assert_eq!(store.get(TOUR_COMPLETE_KEY).as_deref(), Some("true"));
    }
}

#[test]
fn dismissing_before_the_delay_cancels_the_pending_start() {
    let (_, mut tour) = fresh();
    let t0 = Instant::now();
    tour.arm_auto_start(t0);
    tour.start();
    tour.skip();
    assert!(!tour.auto_start_pending());
    assert!(!tour.poll(t0 + DELAY * 2));
    assert!(!tour.is_active());
}

#[test]
fn window_step_follows_live_geometry() {
    let (_, mut tour) = fresh();
    let viewport = Viewport::new(1920, 1080);
    let mut registry = WindowRegistry::with_default_layout(viewport);
    tour.start();
    while tour
        .current()
        .is_some_and(|(_, step)| step.target != TourTarget::Window(AppId::StatusPanel))
    {
        tour.advance();
    }
    let at_home = tour.current_placement(&registry, viewport).unwrap();
    assert_eq!(at_home.anchor, Point::new(80 + 500 + 20, 60 + 300));
    assert_eq!(at_home.align, CardAlign::TopLeft);

    registry.move_window(AppId::StatusPanel, Point::new(400, 200));
    let moved = tour.current_placement(&registry, viewport).unwrap();
    assert_eq!(moved.anchor, Point::new(920, 500));

    registry.minimize(AppId::StatusPanel);
    let fallback = tour.current_placement(&registry, viewport).unwrap();
    assert_eq!(fallback.anchor, Point::new(960, 540));
    assert_eq!(fallback.align, CardAlign::Center);
}

#[test]
fn fixed_anchors() {
    let viewport = Viewport::new(1920, 1080);
    let registry = WindowRegistry::with_default_layout(viewport);
    let anchor = |target| {
        let step = spatial_desk::tour::TourStep {
            target,
            title: "t",
            description: "d",
        };
        placement(&step, &registry, viewport)
    };
    assert_eq!(anchor(TourTarget::Dock).anchor, Point::new(960, 960));
    assert_eq!(anchor(TourTarget::Dock).align, CardAlign::BottomCenter);
    assert_eq!(anchor(TourTarget::Status).anchor, Point::new(20, 80));
    assert_eq!(anchor(TourTarget::Center).anchor, Point::new(960, 540));
}

#[test]
fn skip_while_waiting_only_cancels() {
    let (store, mut tour) = fresh();
    let t0 = Instant::now();
    tour.arm_auto_start(t0);
    tour.skip();
    assert!(!tour.poll(t0 + DELAY));
    assert_eq!(store.get(TOUR_COMPLETE_KEY), None);
}

#[test]
fn completion_is_stored_under_the_bill_key() {
    // existing browser profiles carry this exact key
    let store = Rc::new(MemoryStore::new());
    store.set("bill_tour_complete", "true").unwrap();
    let mut tour = TourSequencer::new(store.clone());
    assert!(!tour.arm_auto_start(Instant::now()));

    let (store, mut tour) = fresh();
    tour.start();
    tour.skip();
    assert_eq!(store.get("bill_tour_complete").as_deref(), Some("true"));
}
