//! Clipped drawing surface shared by the desktop and every content panel.
//!
//! All drawing goes through [`UiFrame`], which intersects every target
//! rectangle with its own area before touching the buffer. Windows are drawn
//! into an offscreen buffer at their logical cell size and composited with
//! [`UiFrame::blit_from_signed`], so a window hanging off the left edge is
//! still drawn from its own origin.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Clear, Widget};

use crate::layout::CellRect;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Frame over an arbitrary buffer. Used for offscreen window surfaces and
    /// for rendering in tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Clears `area` and paints it with `style`.
    pub fn fill(&mut self, area: Rect, style: Style) {
        if let Some(clipped) = self.clip_rect(area) {
            Clear.render(clipped, self.buffer);
            self.buffer.set_style(clipped, style);
        }
    }

    /// Writes `text` at `(x, y)`, truncated at the frame's right edge.
    pub fn text(&mut self, x: u16, y: u16, text: &str, style: Style) {
        safe_set_string(self.buffer, self.area, x, y, text, style);
    }

    /// Copies `src` so that window-local cell `(0, 0)` lands on the signed
    /// cell position of `dest`. `src` may cover only part of the window; its
    /// own area gives the local cells it holds. Cells falling outside the
    /// frame are dropped.
    pub fn blit_from_signed(&mut self, src: &Buffer, dest: CellRect) {
        let frame_x0 = self.area.x as i32;
        let frame_y0 = self.area.y as i32;
        let frame_x1 = frame_x0 + self.area.width as i32;
        let frame_y1 = frame_y0 + self.area.height as i32;
        let local = src
            .area
            .intersection(Rect::new(0, 0, dest.width, dest.height));
        for sy in local.top()..local.bottom() {
            let dy = dest.y + sy as i32;
            if dy < frame_y0 || dy >= frame_y1 {
                continue;
            }
            for sx in local.left()..local.right() {
                let dx = dest.x + sx as i32;
                if dx < frame_x0 || dx >= frame_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx, sy)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

/// Column at which `text` starts when centred in `area`.
pub(crate) fn centered_x(area: Rect, text: &str) -> u16 {
    let len = text.chars().count() as u16;
    area.x + area.width.saturating_sub(len) / 2
}

/// Renders the frame buffer as plain text rows. Handy for assertions.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.y..area.y.saturating_add(area.height))
        .map(|y| {
            (area.x..area.x.saturating_add(area.width))
                .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
                .collect::<String>()
        })
        .collect()
}
