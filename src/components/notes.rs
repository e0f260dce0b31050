//! "Thoughts": a scratchpad persisted under [`NOTES_CONTENT_KEY`].

use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, ComponentContext, mouse_in};
use crate::constants::{NOTES_CONTENT_KEY, NOTES_SAVED_BADGE};
use crate::keybindings::{Action, KeyBindings};
use crate::store::KeyValueStore;
use crate::theme;
use crate::ui::UiFrame;

const PLACEHOLDER: &str = "Type to structure your thoughts...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Badge {
    Saved(Instant),
    SaveFailed(Instant),
}

pub struct NotesComponent {
    content: String,
    store: Rc<dyn KeyValueStore>,
    badge: Option<Badge>,
    /// First Ctrl+L arms the clear, the second one performs it.
    clear_armed: bool,
    keys: KeyBindings,
    save_button: Rect,
    clear_button: Rect,
}

impl std::fmt::Debug for NotesComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesComponent")
            .field("content_len", &self.content.len())
            .field("badge", &self.badge)
            .field("clear_armed", &self.clear_armed)
            .finish()
    }
}

impl NotesComponent {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            content: String::new(),
            store,
            badge: None,
            clear_armed: false,
            keys: KeyBindings::default(),
            save_button: Rect::default(),
            clear_button: Rect::default(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Reloads the buffer from the store. An absent key leaves the current
    /// text alone.
    pub fn load(&mut self) {
        if let Some(saved) = self.store.get(NOTES_CONTENT_KEY) {
            self.content = saved;
        }
    }

    pub fn save(&mut self, now: Instant) {
        self.clear_armed = false;
        match self.store.set(NOTES_CONTENT_KEY, &self.content) {
            Ok(()) => {
                tracing::debug!(bytes = self.content.len(), "notes saved");
                self.badge = Some(Badge::Saved(now));
            }
            Err(err) => {
                tracing::warn!(%err, "failed to save notes");
                self.badge = Some(Badge::SaveFailed(now));
            }
        }
    }

    /// Returns true when the buffer was actually cleared.
    pub fn request_clear(&mut self) -> bool {
        if !self.clear_armed {
            self.clear_armed = true;
            return false;
        }
        self.clear_armed = false;
        self.content.clear();
        if let Err(err) = self.store.remove(NOTES_CONTENT_KEY) {
            tracing::warn!(%err, "failed to clear stored notes");
        }
        tracing::debug!("notes cleared");
        true
    }

    fn badge_text(&self, now: Instant) -> Option<(&'static str, bool)> {
        match self.badge? {
            Badge::Saved(at) if now.duration_since(at) < NOTES_SAVED_BADGE => Some(("Saved", true)),
            Badge::SaveFailed(at) if now.duration_since(at) < NOTES_SAVED_BADGE => {
                Some(("Save failed", false))
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &ComponentContext) -> bool {
        if self.keys.matches(Action::NotesSave, key) {
            self.save(ctx.now());
            return true;
        }
        if self.keys.matches(Action::NotesClear, key) {
            self.request_clear();
            return true;
        }
        let edited = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.content.push(c);
                true
            }
            KeyCode::Enter => {
                self.content.push('\n');
                true
            }
            KeyCode::Tab => {
                self.content.push_str("    ");
                true
            }
            KeyCode::Backspace => {
                self.content.pop();
                true
            }
            _ => false,
        };
        if edited {
            self.clear_armed = false;
        }
        edited
    }
}

impl Component for NotesComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        if area.width < 16 || area.height < 3 {
            return;
        }
        frame.text(area.x + 1, area.y, "SCRATCHPAD", theme::muted_style());
        let right = area.x + area.width;
        self.clear_button = Rect::new(right.saturating_sub(9), area.y, 7, 1);
        self.save_button = Rect::new(right.saturating_sub(16), area.y, 6, 1);
        frame.text(self.save_button.x, area.y, "[Save]", theme::window_style());
        let clear_label = if self.clear_armed { "[Sure?]" } else { "[Clear]" };
        frame.text(
            self.clear_button.x,
            area.y,
            clear_label,
            theme::window_style().fg(theme::warning()),
        );

        let body = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width - 2,
            height: area.height - 2,
        };
        if self.content.is_empty() {
            frame.text(body.x, body.y, PLACEHOLDER, theme::muted_style());
        } else {
            let mut text = self.content.clone();
            if ctx.focused() {
                text.push('▏');
            }
            // Keep the cursor line in view.
            let lines = text.lines().count().max(1) as u16;
            let scroll = lines.saturating_sub(body.height);
            frame.render_widget(
                Paragraph::new(text)
                    .style(theme::window_style())
                    .wrap(Wrap { trim: false })
                    .scroll((scroll, 0)),
                body,
            );
        }

        if let Some((label, ok)) = self.badge_text(ctx.now()) {
            let color = if ok { theme::success() } else { theme::warning() };
            let x = right.saturating_sub(label.len() as u16 + 1);
            frame.text(x, area.y + area.height - 1, label, theme::window_style().fg(color));
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() => self.handle_key(key, ctx),
            Event::Mouse(_) => {
                let Some((_, _, MouseEventKind::Down(MouseButton::Left))) =
                    mouse_in(event, Rect::union(self.save_button, self.clear_button))
                else {
                    return false;
                };
                if mouse_in(event, self.save_button).is_some() {
                    self.save(ctx.now());
                    true
                } else if mouse_in(event, self.clear_button).is_some() {
                    self.request_clear();
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn mount(&mut self) {
        self.load();
    }

    fn unmount(&mut self) {
        self.clear_armed = false;
    }
}
