//! Window frame drawing.
//!
//! The decorator paints onto a window-local surface whose origin is the
//! window's top-left cell. Its layout must agree with
//! [`ChromeMetrics::for_cells`](super::ChromeMetrics::for_cells): a single
//! title row, `[_]` and `[x]` three columns wide ending one column before the
//! right edge, and a two-column resize grip in the bottom-right corner.

use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use crate::theme;
use crate::ui::UiFrame;

pub const MINIMIZE_LABEL: &str = "[_]";
pub const CLOSE_LABEL: &str = "[x]";
pub const RESIZE_GRIP: &str = "◢";

pub trait WindowDecorator: std::fmt::Debug {
    /// Draws the frame into `area` and returns the content rectangle.
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        title: &str,
        icon: &str,
        active: bool,
    ) -> Rect;
}

#[derive(Debug, Default)]
pub struct GlassDecorator;

impl GlassDecorator {
    pub fn content_area(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }
}

impl WindowDecorator for GlassDecorator {
    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        title: &str,
        icon: &str,
        active: bool,
    ) -> Rect {
        if area.width < 2 || area.height < 2 {
            return Rect::default();
        }
        let header_style = Style::default()
            .bg(theme::decorator_header_bg(active))
            .fg(theme::decorator_header_fg())
            .add_modifier(if active { Modifier::BOLD } else { Modifier::empty() });
        let border_style = Style::default()
            .bg(theme::window_bg())
            .fg(theme::decorator_border());

        frame.fill(area, theme::window_style());

        // Title bar
        let header = Rect { height: 1, ..area };
        frame.fill(header, header_style);
        let right = area.x + area.width;
        let buttons_x = right.saturating_sub(1 + 2 * MINIMIZE_LABEL.len() as u16);
        let title_room = buttons_x.saturating_sub(area.x + 1) as usize;
        let label = crate::ui::truncate_to_width(&format!("{icon} {title}"), title_room);
        frame.text(area.x + 1, area.y, &label, header_style);
        if buttons_x > area.x {
            frame.text(buttons_x, area.y, MINIMIZE_LABEL, header_style);
            frame.text(buttons_x + 3, area.y, CLOSE_LABEL, header_style);
        }

        // Borders
        let bottom = area.y + area.height - 1;
        for y in area.y + 1..bottom {
            frame.text(area.x, y, "│", border_style);
            frame.text(right - 1, y, "│", border_style);
        }
        let rule: String = "─".repeat(area.width.saturating_sub(2) as usize);
        frame.text(area.x, bottom, "└", border_style);
        frame.text(area.x + 1, bottom, &rule, border_style);
        frame.text(right - 1, bottom, "┘", border_style);
        let grip_style = border_style.fg(theme::accent());
        frame.text(right.saturating_sub(2), bottom, RESIZE_GRIP, grip_style);
        frame.text(right - 1, bottom, RESIZE_GRIP, grip_style);

        Self::content_area(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use ratatui::buffer::Buffer;

    #[test]
    fn frame_places_buttons_and_grip() {
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let content = GlassDecorator.render_window(&mut frame, area, "Files", "▤", true);
        assert_eq!(content, Rect::new(1, 1, 18, 3));
        let lines = buffer_lines(&buf);
        assert!(lines[0].starts_with(" ▤ Files"));
        assert_eq!(&lines[0][lines[0].len() - 7..], "[_][x] ");
        assert!(lines[4].ends_with("◢◢"));
        assert!(lines[2].starts_with('│'));
    }

    #[test]
    fn long_titles_do_not_cover_buttons() {
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        GlassDecorator.render_window(&mut frame, area, "A very long title", "◎", false);
        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("[_][x]"));
    }

    #[test]
    fn tiny_area_draws_nothing() {
        let area = Rect::new(0, 0, 1, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let content = GlassDecorator.render_window(&mut frame, area, "x", "x", false);
        assert_eq!(content, Rect::default());
    }
}
