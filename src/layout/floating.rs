//! Geometry rules for floating windows.
//!
//! Every function here is pure: the registry and the pointer controller feed
//! in the current geometry and write back whatever comes out.

use super::{Point, Size, Viewport};
use crate::constants::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, TITLE_BAR_GRAB_MARGIN};

/// Constrain a window origin so that at least `TITLE_BAR_GRAB_MARGIN` pixels
/// of its title bar stay reachable.
///
/// `x` may go negative down to `-(width - margin)`; `y` never goes above the
/// top edge. The bottom limit only keeps the title bar on screen, the body is
/// free to extend below the viewport.
pub fn clamp_position(position: Point, size: Size, viewport: Viewport) -> Point {
    let min_x = -(size.width - TITLE_BAR_GRAB_MARGIN);
    let max_x = viewport.width - TITLE_BAR_GRAB_MARGIN;
    let max_y = viewport.height - TITLE_BAR_GRAB_MARGIN;
    // max-of-min rather than `clamp`: a viewport narrower than the margin
    // would make `clamp` panic with min > max.
    Point {
        x: min_x.max(position.x.min(max_x)),
        y: 0.max(position.y.min(max_y)),
    }
}

/// Apply the lower size bounds. There is no upper bound.
pub fn clamp_size(size: Size) -> Size {
    Size {
        width: size.width.max(MIN_WINDOW_WIDTH),
        height: size.height.max(MIN_WINDOW_HEIGHT),
    }
}

/// Window origin for a header drag: the pointer minus the grab offset
/// recorded when the drag started.
pub fn drag_target(pointer: Point, grab_offset: Point) -> Point {
    pointer - grab_offset
}

/// Size for a bottom-right resize drag: the start size grown by however far
/// the pointer travelled since the press.
pub fn resize_target(start_size: Size, start_pointer: Point, pointer: Point) -> Size {
    let delta = pointer - start_pointer;
    Size {
        width: start_size.width + delta.x,
        height: start_size.height + delta.y,
    }
}
