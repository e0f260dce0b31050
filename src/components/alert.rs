use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::UiFrame;

/// Modal message box. While visible it swallows all input; Enter, Esc or any
/// click dismisses it.
#[derive(Debug, Clone)]
pub struct AlertDialog {
    message: Option<String>,
    width: u16,
    height: u16,
    keys: KeyBindings,
}

impl Default for AlertDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertDialog {
    pub fn new() -> Self {
        Self {
            message: None,
            width: 48,
            height: 7,
            keys: KeyBindings::default(),
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "alert shown");
        self.message = Some(message);
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }

    pub fn visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Clamp dialog size to the available area so it never draws outside
    /// the buffer on small terminals.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let width = area.width.min(self.width).max(1);
        let height = area.height.min(self.height).max(1);
        Rect {
            x: area.x + area.width.saturating_sub(width) / 2,
            y: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let Some(message) = self.message.as_deref() else {
            return;
        };
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let style = ratatui::style::Style::default()
            .bg(theme::dialog_bg())
            .fg(theme::dialog_fg());
        let block = Block::default()
            .title(" System ")
            .borders(Borders::ALL)
            .border_style(style.fg(theme::accent()));
        let body = format!("{message}\n\n[ OK ]");
        let paragraph = Paragraph::new(body)
            .style(style.add_modifier(Modifier::BOLD))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }

    /// Consumes `event` while visible. Returns whether the event was
    /// swallowed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if !self.visible() {
            return false;
        }
        match event {
            Event::Key(key) if self.keys.matches(Action::DismissAlert, key) => self.dismiss(),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                self.dismiss()
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn rect_for_clamps_sizes() {
        let dlg = AlertDialog::new();
        let r = dlg.rect_for(Rect::new(0, 0, 10, 2));
        assert_eq!((r.width, r.height), (10, 2));
        let r2 = dlg.rect_for(Rect::new(0, 0, 100, 30));
        assert_eq!((r2.x, r2.y, r2.width, r2.height), (26, 11, 48, 7));
    }

    #[test]
    fn swallows_input_until_dismissed() {
        let mut dlg = AlertDialog::new();
        let other = Event::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE));
        assert!(!dlg.handle_event(&other));
        dlg.show("Display settings calibrated for Vision Pro");
        assert!(dlg.handle_event(&other));
        assert!(dlg.visible());
        assert!(dlg.handle_event(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))));
        assert!(!dlg.visible());
    }
}
