//! "Shape Monitor": a stability gauge over a live tail of the system log.

use ratatui::layout::Rect;

use crate::components::status_panel::bar;
use crate::components::{Component, ComponentContext};
use crate::logbuf::{LogBufferHandle, global_log_buffer};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

#[derive(Debug, Default)]
pub struct MonitorComponent {
    /// Explicit feed; falls back to the global buffer when unset.
    feed: Option<LogBufferHandle>,
}

impl MonitorComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(feed: LogBufferHandle) -> Self {
        Self { feed: Some(feed) }
    }

    fn feed(&self) -> Option<LogBufferHandle> {
        self.feed.clone().or_else(global_log_buffer)
    }

    /// Fraction of recent lines that are not warnings or errors.
    fn stability(lines: &[String]) -> f32 {
        if lines.is_empty() {
            return 1.0;
        }
        let troubled = lines
            .iter()
            .filter(|l| l.contains("WARN") || l.contains("ERROR"))
            .count();
        1.0 - troubled as f32 / lines.len() as f32
    }
}

impl Component for MonitorComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        if area.width < 8 || area.height < 3 {
            return;
        }
        let x = area.x + 1;
        let width = area.width.saturating_sub(2) as usize;
        let feed_rows = area.height.saturating_sub(3) as usize;
        let lines = self.feed().map(|f| f.tail(feed_rows.max(20))).unwrap_or_default();
        let stability = Self::stability(&lines);

        frame.text(x, area.y, "STABILITY", theme::muted_style());
        let gauge_w = width.saturating_sub(16).max(4);
        let color = if stability >= 0.8 {
            theme::success()
        } else {
            theme::warning()
        };
        frame.text(x + 10, area.y, &bar(stability, gauge_w), theme::window_style().fg(color));
        frame.text(
            x + 11 + gauge_w as u16,
            area.y,
            &format!("{:>3.0}%", stability * 100.0),
            theme::window_style(),
        );
        frame.text(x, area.y + 1, "SYSTEM EVENTS", theme::muted_style());

        let start = lines.len().saturating_sub(feed_rows);
        for (row, line) in lines[start..].iter().enumerate() {
            frame.text(
                x,
                area.y + 2 + row as u16,
                &truncate_to_width(line, width),
                theme::window_style(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use ratatui::buffer::Buffer;

    #[test]
    fn shows_newest_lines() {
        let feed = LogBufferHandle::new(50);
        for i in 0..10 {
            feed.push(format!("DEBUG event {i}"));
        }
        let mut monitor = MonitorComponent::with_feed(feed);
        let area = Rect::new(0, 0, 40, 6);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            monitor.render(&mut frame, area, &ComponentContext::default());
        }
        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("100%"));
        assert!(lines[4].contains("event 9"));
        assert!(lines[2].contains("event 7"));
    }

    #[test]
    fn warnings_lower_stability() {
        let lines = vec!["WARN a".to_string(), "INFO b".to_string()];
        assert!((MonitorComponent::stability(&lines) - 0.5).abs() < f32::EPSILON);
    }
}
