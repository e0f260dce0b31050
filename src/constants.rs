//! Shared crate-wide constants.

use std::time::Duration;

/// Smallest width a window may be resized to, in viewport pixels.
pub const MIN_WINDOW_WIDTH: i32 = 300;

/// Smallest height a window may be resized to, in viewport pixels.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

/// Number of pixels of a window's title bar that must stay inside the
/// viewport so the user can grab it again.
///
/// Applied on both horizontal edges and on the bottom edge. The top edge is
/// a hard limit at `y = 0` instead.
pub const TITLE_BAR_GRAB_MARGIN: i32 = 50;

/// Horizontal gap between a highlighted window and the tour card placed
/// beside it.
pub const TOUR_WINDOW_GAP: i32 = 20;

/// Distance of the tour card from the bottom edge when it points at the dock.
pub const TOUR_DOCK_OFFSET: i32 = 120;

/// Fixed top-left anchor of the tour card when it points at the status bar.
pub const TOUR_STATUS_ANCHOR: (i32, i32) = (20, 80);

/// Delay between the desktop becoming interactive and the first-run tour.
pub const TOUR_AUTO_START_DELAY: Duration = Duration::from_millis(1000);

/// Two presses on the same desktop icon within this window activate it.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

/// How long the notes "Saved" badge stays visible.
pub const NOTES_SAVED_BADGE: Duration = Duration::from_millis(2000);

/// Store key holding the tour completion marker.
pub const TOUR_COMPLETE_KEY: &str = "bill_tour_complete";

/// Store key holding the notes scratchpad text.
pub const NOTES_CONTENT_KEY: &str = "bill_notes_content";
