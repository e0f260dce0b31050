//! Pointer zones of a window frame.

use crate::layout::{CellMetrics, PixelRect, Point, Size};

/// Pixel dimensions of the window frame parts that react to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    pub title_bar_height: i32,
    pub button_width: i32,
    /// Gap between the right edge and the close button.
    pub button_inset: i32,
    pub resize_handle: Size,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            title_bar_height: 48,
            button_width: 28,
            button_inset: 24,
            resize_handle: Size::new(32, 32),
        }
    }
}

impl ChromeMetrics {
    /// Frame metrics matching what the terminal decorator draws: a one-row
    /// title bar, three-column buttons and a two-column resize grip on the
    /// bottom border.
    pub fn for_cells(cells: CellMetrics) -> Self {
        let cw = cells.width as i32;
        let ch = cells.height as i32;
        Self {
            title_bar_height: ch,
            button_width: 3 * cw,
            button_inset: cw,
            resize_handle: Size::new(2 * cw, ch),
        }
    }

    pub fn close_button(&self, rect: PixelRect) -> PixelRect {
        PixelRect {
            x: rect.right() - self.button_inset - self.button_width,
            y: rect.y,
            width: self.button_width,
            height: self.title_bar_height,
        }
    }

    pub fn minimize_button(&self, rect: PixelRect) -> PixelRect {
        let close = self.close_button(rect);
        PixelRect {
            x: close.x - self.button_width,
            ..close
        }
    }

    pub fn resize_handle(&self, rect: PixelRect) -> PixelRect {
        PixelRect {
            x: rect.right() - self.resize_handle.width,
            y: rect.bottom() - self.resize_handle.height,
            width: self.resize_handle.width,
            height: self.resize_handle.height,
        }
    }

    pub fn title_bar(&self, rect: PixelRect) -> PixelRect {
        PixelRect {
            height: self.title_bar_height.min(rect.height),
            ..rect
        }
    }
}

/// What a pointer press on a window lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowZone {
    Close,
    Minimize,
    TitleBar,
    ResizeHandle,
    Body,
}

impl WindowZone {
    pub fn hit_test(rect: PixelRect, point: Point, metrics: &ChromeMetrics) -> Option<Self> {
        if !rect.contains(point) {
            return None;
        }
        if metrics.resize_handle(rect).contains(point) {
            return Some(Self::ResizeHandle);
        }
        if metrics.title_bar(rect).contains(point) {
            if metrics.close_button(rect).contains(point) {
                return Some(Self::Close);
            }
            if metrics.minimize_button(rect).contains(point) {
                return Some(Self::Minimize);
            }
            return Some(Self::TitleBar);
        }
        Some(Self::Body)
    }
}
