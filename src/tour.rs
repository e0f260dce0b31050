//! First-run onboarding tour.
//!
//! The sequencer only reads window geometry; it never moves or focuses a
//! window. Completion is recorded in the injected store under
//! [`TOUR_COMPLETE_KEY`].

use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::constants::{
    TOUR_AUTO_START_DELAY, TOUR_COMPLETE_KEY, TOUR_DOCK_OFFSET, TOUR_STATUS_ANCHOR,
    TOUR_WINDOW_GAP,
};
use crate::layout::{PixelRect, Point, Size, Viewport};
use crate::store::KeyValueStore;
use crate::window::{AppId, WindowRegistry};

/// Where a step's card points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourTarget {
    Center,
    Status,
    Dock,
    Window(AppId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourStep {
    pub target: TourTarget,
    pub title: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_STEPS: [TourStep; 5] = [
    TourStep {
        target: TourTarget::Center,
        title: "System Initialization",
        description: "Welcome to BILL Spatial OS. This is a full desktop environment with file management, web browsing, and spatial apps.",
    },
    TourStep {
        target: TourTarget::Status,
        title: "Status Bar",
        description: "The bar along the top names the focused application and keeps an eye on connectivity and power.",
    },
    TourStep {
        target: TourTarget::Dock,
        title: "Object Dock",
        description: "Launch your applications here. We've added a File Manager and a full Web Browser.",
    },
    TourStep {
        target: TourTarget::Window(AppId::StatusPanel),
        title: "Protocol Panel",
        description: "Windows move by their title bar and resize from the bottom-right grip. Try dragging this one.",
    },
    TourStep {
        target: TourTarget::Center,
        title: "Desktop Interaction",
        description: "You can right-click on the wallpaper to access system context menus, or double-click icons to launch apps.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourState {
    #[default]
    Inactive,
    Step(usize),
}

/// How the card hangs off its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAlign {
    /// Anchor is the card centre.
    Center,
    /// Anchor is the card's top-left corner.
    TopLeft,
    /// Anchor is the middle of the card's bottom edge.
    BottomCenter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayPlacement {
    pub anchor: Point,
    pub align: CardAlign,
}

impl OverlayPlacement {
    pub fn centered(viewport: Viewport) -> Self {
        Self {
            anchor: viewport.center(),
            align: CardAlign::Center,
        }
    }

    /// Card rectangle for a card of `size` placed at this anchor.
    pub fn card_rect(&self, size: Size) -> PixelRect {
        let origin = match self.align {
            CardAlign::Center => Point::new(
                self.anchor.x - size.width / 2,
                self.anchor.y - size.height / 2,
            ),
            CardAlign::TopLeft => self.anchor,
            CardAlign::BottomCenter => {
                Point::new(self.anchor.x - size.width / 2, self.anchor.y - size.height)
            }
        };
        PixelRect::new(origin, size)
    }
}

/// Where `step`'s card goes given the current windows and viewport.
pub fn placement(step: &TourStep, registry: &WindowRegistry, viewport: Viewport) -> OverlayPlacement {
    match step.target {
        TourTarget::Center => OverlayPlacement::centered(viewport),
        TourTarget::Status => OverlayPlacement {
            anchor: Point::new(TOUR_STATUS_ANCHOR.0, TOUR_STATUS_ANCHOR.1),
            align: CardAlign::TopLeft,
        },
        TourTarget::Dock => OverlayPlacement {
            anchor: Point::new(viewport.width / 2, viewport.height - TOUR_DOCK_OFFSET),
            align: CardAlign::BottomCenter,
        },
        TourTarget::Window(id) => match registry.get(id).filter(|w| w.is_visible()) {
            Some(window) => OverlayPlacement {
                anchor: Point::new(
                    window.position.x + window.size.width + TOUR_WINDOW_GAP,
                    window.position.y + window.size.height / 2,
                ),
                align: CardAlign::TopLeft,
            },
            None => OverlayPlacement::centered(viewport),
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AutoStart {
    Unarmed,
    Pending { due: Instant },
    /// Fired or cancelled. The auto-start never happens twice in a session.
    Spent,
}

pub struct TourSequencer {
    steps: Vec<TourStep>,
    state: TourState,
    auto_start: AutoStart,
    delay: Duration,
    store: Rc<dyn KeyValueStore>,
}

impl std::fmt::Debug for TourSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TourSequencer")
            .field("state", &self.state)
            .field("auto_start", &self.auto_start)
            .field("steps", &self.steps.len())
            .finish()
    }
}

impl TourSequencer {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            steps: DEFAULT_STEPS.to_vec(),
            state: TourState::Inactive,
            auto_start: AutoStart::Unarmed,
            delay: TOUR_AUTO_START_DELAY,
            store,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn state(&self) -> TourState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, TourState::Step(_))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<(usize, &TourStep)> {
        match self.state {
            TourState::Step(i) => self.steps.get(i).map(|s| (i, s)),
            TourState::Inactive => None,
        }
    }

    pub fn is_last_step(&self) -> bool {
        matches!(self.state, TourState::Step(i) if i + 1 == self.steps.len())
    }

    pub fn next_label(&self) -> &'static str {
        if self.is_last_step() { "Initialize" } else { "Next" }
    }

    pub fn is_complete(&self) -> bool {
        self.store.get(TOUR_COMPLETE_KEY).is_some()
    }

    pub fn auto_start_pending(&self) -> bool {
        matches!(self.auto_start, AutoStart::Pending { .. })
    }

    /// Schedules the first-run start for `now + delay`. Does nothing when the
    /// tour was already completed or this session already armed it once.
    pub fn arm_auto_start(&mut self, now: Instant) -> bool {
        if self.auto_start != AutoStart::Unarmed {
            return false;
        }
        if self.is_complete() {
            tracing::debug!("tour already completed, auto-start not armed");
            self.auto_start = AutoStart::Spent;
            return false;
        }
        let due = now + self.delay;
        self.auto_start = AutoStart::Pending { due };
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "tour auto-start armed");
        true
    }

    /// Fires a pending auto-start once its deadline has passed. Returns true
    /// on the call that started the tour.
    pub fn poll(&mut self, now: Instant) -> bool {
        let AutoStart::Pending { due } = self.auto_start else {
            return false;
        };
        if now < due {
            return false;
        }
        self.auto_start = AutoStart::Spent;
        if self.is_active() {
            return false;
        }
        self.state = TourState::Step(0);
        tracing::info!("tour auto-started");
        true
    }

    pub fn cancel_auto_start(&mut self) {
        if self.auto_start_pending() {
            tracing::debug!("tour auto-start cancelled");
        }
        self.auto_start = AutoStart::Spent;
    }

    /// Explicit start, from step one, whatever the current state.
    pub fn start(&mut self) {
        self.cancel_auto_start();
        self.state = TourState::Step(0);
        tracing::info!("tour started");
    }

    pub fn advance(&mut self) {
        let TourState::Step(i) = self.state else {
            return;
        };
        if i + 1 < self.steps.len() {
            self.state = TourState::Step(i + 1);
            tracing::debug!(step = i + 1, "tour advanced");
        } else {
            self.finish("completed");
        }
    }

    pub fn skip(&mut self) {
        self.cancel_auto_start();
        if self.is_active() {
            self.finish("skipped");
        }
    }

    fn finish(&mut self, how: &'static str) {
        self.state = TourState::Inactive;
        tracing::info!(how, "tour finished");
        if let Err(err) = self.store.set(TOUR_COMPLETE_KEY, "true") {
            tracing::warn!(%err, "failed to persist tour completion");
        }
    }

    /// Placement for the current step, or `None` when inactive.
    pub fn current_placement(
        &self,
        registry: &WindowRegistry,
        viewport: Viewport,
    ) -> Option<OverlayPlacement> {
        self.current()
            .map(|(_, step)| placement(step, registry, viewport))
    }
}
