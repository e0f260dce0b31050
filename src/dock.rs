//! Bottom-centred application dock.
//!
//! One slot per application. A dot under the icon marks a running window,
//! a lit slot marks a visible one and brackets mark the active one. A click
//! on a slot is translated into an open command by the desktop.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::layout::rect_contains;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::{AppId, DockEntry};

const SLOT_WIDTH: u16 = 5;
/// Rows between the dock's bottom edge and the terminal's bottom edge.
const BOTTOM_MARGIN: u16 = 1;
const DOCK_HEIGHT: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockOutcome {
    Ignored,
    /// Input landed on the dock but not on a slot.
    Consumed,
    Open(AppId),
}

#[derive(Debug, Default)]
pub struct Dock {
    rect: Rect,
    slots: Vec<(AppId, Rect)>,
    hovered: Option<AppId>,
}

impl Dock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Where a dock with `slots` entries sits inside `area`.
    pub fn layout(area: Rect, slots: usize) -> Rect {
        let width = (slots as u16 * SLOT_WIDTH + 2).min(area.width);
        let height = DOCK_HEIGHT.min(area.height);
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: (area.y + area.height).saturating_sub(height + BOTTOM_MARGIN),
            width,
            height,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn slot_rect(&self, id: AppId) -> Option<Rect> {
        self.slots.iter().find(|(s, _)| *s == id).map(|(_, r)| *r)
    }

    /// Recomputes slot rectangles without drawing, so hit-testing works
    /// before the first frame.
    pub fn arrange(&mut self, area: Rect, entries: &[DockEntry]) {
        self.rect = Self::layout(area, entries.len());
        self.slots = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let x = self.rect.x + 1 + i as u16 * SLOT_WIDTH;
                (entry.id, Rect::new(x, self.rect.y, SLOT_WIDTH, self.rect.height))
            })
            .collect();
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, entries: &[DockEntry]) {
        self.arrange(area, entries);
        let base = theme::window_style().bg(theme::bar_bg());
        frame.fill(self.rect, base);
        let mut x = self.rect.x + 1;
        for entry in entries {
            let mut style = base;
            if entry.visible {
                style = style.fg(theme::dock_running()).add_modifier(Modifier::BOLD);
            }
            let label = if entry.active {
                format!("[ {} ]", entry.icon)
            } else {
                format!("  {}  ", entry.icon)
            };
            frame.text(x, self.rect.y, &label, style);
            if entry.running && self.rect.height > 1 {
                frame.text(x + SLOT_WIDTH / 2, self.rect.y + 1, "•", base);
            }
            if self.hovered == Some(entry.id) && self.rect.y > area.y {
                let tip = format!(" {} ", entry.title);
                let tip_x = (x + SLOT_WIDTH / 2).saturating_sub(tip.chars().count() as u16 / 2);
                frame.text(tip_x, self.rect.y - 1, &tip, theme::selected_style());
            }
            x += SLOT_WIDTH;
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.rect, column, row)
    }

    pub fn slot_at(&self, column: u16, row: u16) -> Option<AppId> {
        self.slots
            .iter()
            .find(|(_, rect)| rect_contains(*rect, column, row))
            .map(|(id, _)| *id)
    }

    pub fn handle_event(&mut self, event: &Event) -> DockOutcome {
        let Event::Mouse(mouse) = event else {
            return DockOutcome::Ignored;
        };
        if mouse.kind == MouseEventKind::Moved {
            self.hovered = self.slot_at(mouse.column, mouse.row);
            return DockOutcome::Ignored;
        }
        if !self.contains(mouse.column, mouse.row) {
            return DockOutcome::Ignored;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => match self.slot_at(mouse.column, mouse.row) {
                Some(id) => {
                    tracing::debug!(window_id = ?id, "dock click");
                    DockOutcome::Open(id)
                }
                None => DockOutcome::Consumed,
            },
            _ => DockOutcome::Consumed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Viewport;
    use crate::ui::buffer_lines;
    use crate::window::WindowRegistry;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn layout_is_bottom_centred() {
        let rect = Dock::layout(Rect::new(0, 0, 100, 40), 7);
        assert_eq!(rect, Rect::new(31, 37, 37, 2));
    }

    #[test]
    fn click_on_slot_opens_app() {
        let registry = WindowRegistry::with_default_layout(Viewport::default());
        let mut dock = Dock::new();
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            dock.render(&mut frame, area, &registry.dock_entries());
        }
        let lines = buffer_lines(&buf);
        assert!(lines[37].contains("[ ◈ ]"));
        assert!(lines[38].contains('•'));

        let files = dock.slot_rect(AppId::Files).unwrap();
        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            dock.handle_event(&mouse(down, files.x + 2, files.y)),
            DockOutcome::Open(AppId::Files)
        );
        assert_eq!(
            dock.handle_event(&mouse(down, dock.rect().x, dock.rect().y)),
            DockOutcome::Consumed
        );
        assert_eq!(dock.handle_event(&mouse(down, 0, 0)), DockOutcome::Ignored);
    }
}
