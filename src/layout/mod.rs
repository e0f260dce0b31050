pub mod floating;

use ratatui::prelude::Rect;

/// A point in viewport pixels, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset_from(self, origin: Point) -> Point {
        Point {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.offset_from(rhs)
    }
}

/// Window dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// The visible surface the desktop is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn center(&self) -> Point {
        Point {
            x: self.width / 2,
            y: self.height / 2,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

/// Signed pixel rectangle. Windows may hang off the left edge, so the origin
/// can be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub const fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn contains(&self, point: Point) -> bool {
        self.width > 0
            && self.height > 0
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }
}

/// Signed cell rectangle: a pixel rectangle projected onto the terminal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

/// Pixels covered by one terminal cell.
///
/// The desktop core reasons in pixels; the terminal host projects through
/// these metrics when drawing and when turning mouse cells into pointer
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub width: u16,
    pub height: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
        }
    }
}

impl CellMetrics {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn viewport_for_area(&self, area: Rect) -> Viewport {
        Viewport::new(
            area.width as i32 * self.width as i32,
            area.height as i32 * self.height as i32,
        )
    }

    /// Pointer position for a mouse cell. Uses the cell centre so that a
    /// window whose edge falls mid-cell still receives clicks on the row it
    /// is drawn on.
    pub fn point_for_cell(&self, column: u16, row: u16) -> Point {
        let cw = self.width as i32;
        let ch = self.height as i32;
        Point::new(column as i32 * cw + cw / 2, row as i32 * ch + ch / 2)
    }

    pub fn cell_for_point(&self, point: Point) -> (i32, i32) {
        (
            point.x.div_euclid(self.width as i32),
            point.y.div_euclid(self.height as i32),
        )
    }

    pub fn to_cells(&self, rect: PixelRect) -> CellRect {
        let cw = self.width as i32;
        let ch = self.height as i32;
        let width = (rect.width.max(0) + cw - 1) / cw;
        let height = (rect.height.max(0) + ch - 1) / ch;
        CellRect {
            x: rect.x.div_euclid(cw),
            y: rect.y.div_euclid(ch),
            width: width.clamp(0, u16::MAX as i32) as u16,
            height: height.clamp(0, u16::MAX as i32) as u16,
        }
    }

    pub fn cells_to_pixels(&self, columns: u16, rows: u16) -> Size {
        Size::new(
            columns as i32 * self.width as i32,
            rows as i32 * self.height as i32,
        )
    }
}

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    let max_x = rect.x.saturating_add(rect.width);
    let max_y = rect.y.saturating_add(rect.height);
    column >= rect.x && column < max_x && row >= rect.y && row < max_y
}

/// Visible part of a signed cell rectangle inside `bounds`.
pub fn cell_rect_visible(rect: CellRect, bounds: Rect) -> Rect {
    let left = rect.x.max(bounds.x as i32);
    let top = rect.y.max(bounds.y as i32);
    let right = (rect.x + rect.width as i32).min(bounds.x as i32 + bounds.width as i32);
    let bottom = (rect.y + rect.height as i32).min(bounds.y as i32 + bounds.height as i32);
    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect {
        x: left as u16,
        y: top as u16,
        width: (right - left) as u16,
        height: (bottom - top) as u16,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_rect_contains_is_half_open() {
        let r = PixelRect::new(Point::new(-10, 0), Size::new(20, 10));
        assert!(r.contains(Point::new(-10, 0)));
        assert!(r.contains(Point::new(9, 9)));
        assert!(!r.contains(Point::new(10, 5)));
        assert!(!r.contains(Point::new(0, 10)));
        let empty = PixelRect::new(Point::new(0, 0), Size::new(0, 10));
        assert!(!empty.contains(Point::new(0, 0)));
    }

    #[test]
    fn cell_metrics_round_trip_through_centres() {
        let m = CellMetrics::new(10, 20);
        let p = m.point_for_cell(3, 2);
        assert_eq!(p, Point::new(35, 50));
        assert_eq!(m.cell_for_point(p), (3, 2));
        assert_eq!(m.cell_for_point(Point::new(-1, -1)), (-1, -1));
    }

    #[test]
    fn to_cells_floors_origin_and_rounds_size_up() {
        let m = CellMetrics::new(10, 20);
        let cells = m.to_cells(PixelRect {
            x: -45,
            y: 65,
            width: 305,
            height: 200,
        });
        assert_eq!(cells.x, -5);
        assert_eq!(cells.y, 3);
        assert_eq!(cells.width, 31);
        assert_eq!(cells.height, 10);
    }

    #[test]
    fn viewport_for_area_scales_by_metrics() {
        let m = CellMetrics::default();
        let vp = m.viewport_for_area(Rect {
            x: 0,
            y: 0,
            width: 192,
            height: 54,
        });
        assert_eq!(vp, Viewport::new(1920, 1080));
    }

    #[test]
    fn cell_rect_visible_clips_negative_offsets() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let rect = CellRect {
            x: -5,
            y: 3,
            width: 20,
            height: 6,
        };
        let visible = cell_rect_visible(rect, bounds);
        assert_eq!(visible.x, 0);
        assert_eq!(visible.y, 3);
        assert_eq!(visible.width, 15);
        assert_eq!(visible.height, 6);
        let gone = CellRect {
            x: 90,
            ..rect
        };
        assert_eq!(cell_rect_visible(gone, bounds), Rect::default());
    }

    #[test]
    fn rect_contains_edge_cases() {
        let r = Rect {
            x: 0,
            y: 0,
            width: 0,
            height: 5,
        };
        assert!(!rect_contains(r, 0, 0));
        let r2 = Rect {
            x: 1,
            y: 1,
            width: 3,
            height: 3,
        };
        assert!(rect_contains(r2, 1, 1));
        assert!(!rect_contains(r2, 4, 1));
    }
}
