use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::components::{Component, ComponentContext, mouse_in};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleItem {
    pub label: String,
    pub checked: bool,
}

impl ToggleItem {
    pub fn new(label: impl Into<String>, checked: bool) -> Self {
        Self {
            label: label.into(),
            checked,
        }
    }
}

/// A vertical list of on/off switches, one per row.
#[derive(Debug)]
pub struct ToggleListComponent {
    items: Vec<ToggleItem>,
    selected: usize,
    area: Rect,
    keys: KeyBindings,
}

impl Component for ToggleListComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.area = area;
        for (i, item) in self.items.iter().enumerate().take(area.height as usize) {
            let y = area.y + i as u16;
            let mut style = theme::window_style();
            if ctx.focused() && i == self.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let switch = if item.checked { "(●  )" } else { "(  ○)" };
            let switch_style = if item.checked {
                style.fg(theme::success())
            } else {
                style.fg(theme::dialog_muted())
            };
            let row = Rect {
                y,
                height: 1,
                ..area
            };
            frame.fill(row, style);
            frame.text(area.x + 1, y, &item.label, style);
            let sx = (area.x + area.width).saturating_sub(6);
            frame.text(sx, y, switch, switch_style);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => {
                if self.keys.matches(Action::MenuUp, key) {
                    self.bump_selection(-1);
                    true
                } else if self.keys.matches(Action::MenuDown, key) {
                    self.bump_selection(1);
                    true
                } else if self.keys.matches(Action::ToggleSelection, key) {
                    self.toggle_selected()
                } else {
                    false
                }
            }
            Event::Mouse(_) => match mouse_in(event, self.area) {
                Some((_, row, MouseEventKind::Down(MouseButton::Left))) => {
                    if (row as usize) < self.items.len() {
                        self.selected = row as usize;
                        self.toggle_selected()
                    } else {
                        false
                    }
                }
                _ => false,
            },
            _ => false,
        }
    }
}

impl ToggleListComponent {
    pub fn new(items: Vec<ToggleItem>) -> Self {
        Self {
            items,
            selected: 0,
            area: Rect::default(),
            keys: KeyBindings::default(),
        }
    }

    pub fn items(&self) -> &[ToggleItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.bump_selection(delta);
    }

    fn bump_selection(&mut self, delta: isize) {
        if self.items.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.items.len() - 1);
        }
    }

    pub fn toggle_selected(&mut self) -> bool {
        if let Some(item) = self.items.get_mut(self.selected) {
            item.checked = !item.checked;
            tracing::debug!(setting = %item.label, enabled = item.checked, "setting toggled");
            return true;
        }
        false
    }
}

impl Default for ToggleListComponent {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;

    fn make_items(n: usize) -> Vec<ToggleItem> {
        (0..n)
            .map(|i| ToggleItem::new(format!("label{i}"), i % 2 == 0))
            .collect()
    }

    #[test]
    fn bump_selection_bounds_and_toggle() {
        let mut t = ToggleListComponent::new(make_items(3));
        assert_eq!(t.selected(), 0);
        t.move_selection(1);
        assert_eq!(t.selected(), 1);
        t.move_selection(10);
        assert_eq!(t.selected(), 2);
        t.move_selection(-100);
        assert_eq!(t.selected(), 0);
        assert!(t.toggle_selected());
        assert!(!t.items()[0].checked);
    }

    #[test]
    fn keyboard_and_mouse_toggle() {
        let mut t = ToggleListComponent::new(make_items(4));
        let ctx = ComponentContext::new(true);
        let area = Rect::new(2, 3, 20, 4);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 10));
        let mut frame = UiFrame::from_parts(buf.area, &mut buf);
        t.render(&mut frame, area, &ctx);

        t.handle_event(&Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)), &ctx);
        assert_eq!(t.selected(), 1);
        t.handle_event(&Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)), &ctx);
        assert!(t.items()[1].checked);

        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 6,
            modifiers: KeyModifiers::NONE,
        });
        assert!(t.handle_event(&click, &ctx));
        assert_eq!(t.selected(), 3);
        assert!(t.items()[3].checked);
    }
}
