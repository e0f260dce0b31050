//! Drag and resize gestures.
//!
//! One [`PointerController`] exists per desktop and it tracks at most one
//! gesture. Surface-wide move/up listeners are held as a [`ListenerGuard`]
//! for exactly as long as a gesture is in flight.

use std::cell::Cell;
use std::rc::Rc;

use crate::layout::floating::{drag_target, resize_target};
use crate::layout::{Point, Size};
use crate::window::{AppId, WindowRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging {
        window: AppId,
        /// Pointer position relative to the window origin at press time.
        grab_offset: Point,
    },
    Resizing {
        window: AppId,
        start_pointer: Point,
        start_size: Size,
    },
}

impl Gesture {
    pub fn window(&self) -> Option<AppId> {
        match *self {
            Gesture::Idle => None,
            Gesture::Dragging { window, .. } | Gesture::Resizing { window, .. } => Some(window),
        }
    }
}

/// Registration of the surface-wide pointer listeners. Dropping the guard
/// deregisters them, whichever way the gesture ended.
#[derive(Debug)]
pub struct ListenerGuard {
    registered: Rc<Cell<usize>>,
}

impl ListenerGuard {
    fn acquire(registered: &Rc<Cell<usize>>) -> Self {
        registered.set(registered.get() + 1);
        Self {
            registered: Rc::clone(registered),
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.registered.set(self.registered.get().saturating_sub(1));
    }
}

#[derive(Debug, Default)]
pub struct PointerController {
    gesture: Gesture,
    listeners: Option<ListenerGuard>,
    registered: Rc<Cell<usize>>,
}

impl PointerController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    pub fn is_listening(&self) -> bool {
        self.listeners.is_some()
    }

    /// Number of live listener registrations. Never exceeds one.
    pub fn registered_listeners(&self) -> usize {
        self.registered.get()
    }

    fn start(&mut self, gesture: Gesture) {
        self.gesture = gesture;
        self.listeners = Some(ListenerGuard::acquire(&self.registered));
    }

    /// Title-bar press. Focuses the window and remembers where it was
    /// grabbed. Returns `false`, touching nothing, when another gesture is
    /// still in flight or the window is not visible.
    pub fn begin_drag(&mut self, registry: &mut WindowRegistry, id: AppId, pointer: Point) -> bool {
        if self.is_active() {
            tracing::debug!(window_id = ?id, current = ?self.gesture, "drag ignored, gesture in flight");
            return false;
        }
        let Some(origin) = registry
            .get(id)
            .filter(|w| w.is_visible())
            .map(|w| w.position)
        else {
            return false;
        };
        registry.focus(id);
        self.start(Gesture::Dragging {
            window: id,
            grab_offset: pointer - origin,
        });
        tracing::debug!(window_id = ?id, "drag started");
        true
    }

    /// Resize-handle press. Same exclusivity rules as [`Self::begin_drag`].
    pub fn begin_resize(
        &mut self,
        registry: &mut WindowRegistry,
        id: AppId,
        pointer: Point,
    ) -> bool {
        if self.is_active() {
            tracing::debug!(window_id = ?id, current = ?self.gesture, "resize ignored, gesture in flight");
            return false;
        }
        let Some(start_size) = registry
            .get(id)
            .filter(|w| w.is_visible())
            .map(|w| w.size)
        else {
            return false;
        };
        registry.focus(id);
        self.start(Gesture::Resizing {
            window: id,
            start_pointer: pointer,
            start_size,
        });
        tracing::debug!(window_id = ?id, "resize started");
        true
    }

    /// Feeds a pointer position into the gesture. Returns whether the
    /// registry was written.
    pub fn pointer_move(&mut self, registry: &mut WindowRegistry, pointer: Point) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging {
                window,
                grab_offset,
            } => {
                registry.move_window(window, drag_target(pointer, grab_offset));
                true
            }
            Gesture::Resizing {
                window,
                start_pointer,
                start_size,
            } => {
                registry.resize_window(window, resize_target(start_size, start_pointer, pointer));
                true
            }
        }
    }

    /// Ends whatever gesture is in flight. Accepted from anywhere on the
    /// surface so a release outside the window still lets go.
    pub fn pointer_up(&mut self) -> Option<AppId> {
        let ended = self.gesture.window();
        if let Some(id) = ended {
            tracing::debug!(window_id = ?id, "gesture ended");
        }
        self.reset();
        ended
    }

    /// Abandons the gesture without a final write, e.g. when its window was
    /// closed or minimized mid-gesture.
    pub fn cancel(&mut self) {
        if let Some(id) = self.gesture.window() {
            tracing::debug!(window_id = ?id, "gesture cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.gesture = Gesture::Idle;
        self.listeners = None;
    }
}
