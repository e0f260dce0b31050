//! The "BILL Protocol" panel: shape-vector readout plus the tour restart
//! button.

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use indoc::indoc;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext, ContentRequest, mouse_in};
use crate::theme;
use crate::ui::UiFrame;

const RESTART_LABEL: &str = "[↻ Tour]";

const STATUS_TEXT: &str = indoc! {"
    The desktop environment is functioning within normal parameters.
    Visual harmony is established through deferential materials (Glass).
    Spatial depth is active.
"};

/// One component of the shape vector S = (c, m, f, k).
#[derive(Debug, Clone, Copy)]
struct Metric {
    label: &'static str,
    value: f32,
}

const SHAPE_VECTOR: [Metric; 4] = [
    Metric {
        label: "Correctness (c)",
        value: 0.95,
    },
    Metric {
        label: "Misconception (m)",
        value: 0.05,
    },
    Metric {
        label: "Fog (f)",
        value: 0.1,
    },
    Metric {
        label: "Confidence (k)",
        value: 0.9,
    },
];

/// `[#####.....]` style bar of `width` cells.
pub(crate) fn bar(value: f32, width: usize) -> String {
    let filled = ((value.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[derive(Debug, Default)]
pub struct StatusPanelComponent {
    restart_button: Rect,
    pending: Option<ContentRequest>,
}

impl StatusPanelComponent {
    pub fn new() -> Self {
        Self::default()
    }

    fn request_tour(&mut self) {
        tracing::debug!("tour restart requested from protocol panel");
        self.pending = Some(ContentRequest::StartTour);
    }
}

impl Component for StatusPanelComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        if area.width < 4 || area.height == 0 {
            self.restart_button = Rect::default();
            return;
        }
        let x = area.x + 1;
        let mut y = area.y;
        frame.text(x, y, "BILL System", theme::heading_style());
        let label_w = RESTART_LABEL.chars().count() as u16;
        self.restart_button = Rect {
            x: (area.x + area.width).saturating_sub(label_w + 1),
            y,
            width: label_w,
            height: 1,
        };
        frame.text(
            self.restart_button.x,
            y,
            RESTART_LABEL,
            theme::window_style().fg(theme::accent_alt()),
        );
        y += 1;
        frame.text(x, y, "Protocol v1.0 • Shape Engine Online", theme::muted_style());
        y += 2;

        frame.text(x, y, "SHAPE VECTOR S = (c, m, f, k)", theme::muted_style());
        y += 1;
        let bar_w = area.width.saturating_sub(22).clamp(4, 30) as usize;
        for metric in SHAPE_VECTOR {
            if y >= area.y + area.height {
                return;
            }
            frame.text(x, y, metric.label, theme::window_style());
            frame.text(x + 19, y, &bar(metric.value, bar_w), theme::window_style());
            y += 1;
        }
        y += 1;

        if y < area.y + area.height {
            frame.text(x, y, "System Status", theme::heading_style());
            y += 1;
        }
        let body = Rect {
            x,
            y,
            width: area.width.saturating_sub(2),
            height: (area.y + area.height).saturating_sub(y),
        };
        frame.render_widget(
            Paragraph::new(STATUS_TEXT)
                .style(theme::muted_style())
                .wrap(Wrap { trim: true }),
            body,
        );
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key)
                if ctx.focused()
                    && key.code == KeyCode::Char('t')
                    && key.modifiers == KeyModifiers::NONE =>
            {
                self.request_tour();
                true
            }
            Event::Mouse(_) => match mouse_in(event, self.restart_button) {
                Some((_, _, MouseEventKind::Down(MouseButton::Left))) => {
                    self.request_tour();
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    fn take_request(&mut self) -> Option<ContentRequest> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use crossterm::event::MouseEvent;
    use ratatui::buffer::Buffer;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(bar(0.5, 4), "██░░");
        assert_eq!(bar(2.0, 3), "███");
        assert_eq!(bar(-1.0, 2), "░░");
    }

    #[test]
    fn restart_button_requests_tour() {
        let mut panel = StatusPanelComponent::new();
        let area = Rect::new(1, 1, 48, 20);
        let mut buf = Buffer::empty(Rect::new(0, 0, 50, 22));
        let ctx = ComponentContext::new(true);
        {
            let mut frame = UiFrame::from_parts(buf.area, &mut buf);
            panel.render(&mut frame, area, &ctx);
        }
        assert!(buffer_lines(&buf)[1].contains("BILL System"));
        let button = panel.restart_button;
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: button.x + 1,
            row: button.y,
            modifiers: KeyModifiers::NONE,
        });
        assert!(panel.handle_event(&click, &ctx));
        assert_eq!(panel.take_request(), Some(ContentRequest::StartTour));
        assert_eq!(panel.take_request(), None);
    }
}
