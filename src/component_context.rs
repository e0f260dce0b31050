//! Shared component rendering context
//!
//! `ComponentContext` carries the bits of desktop state a content panel may
//! look at while rendering or handling input, so the component trait stays
//! stable as panels grow.

use std::time::Instant;

/// Context passed to `Component` trait methods.
///
/// - `focused`: the hosting window is the active window.
/// - `now`: the frame's clock reading. Panels use it for timed badges
///   instead of reading the wall clock themselves.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    now: Instant,
}

impl ComponentContext {
    pub fn new(focused: bool) -> Self {
        Self {
            focused,
            now: Instant::now(),
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn now(&self) -> Instant {
        self.now
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_now(mut self, now: Instant) -> Self {
        self.now = now;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
