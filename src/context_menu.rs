//! Right-click desktop menu.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

use crate::keybindings::{Action, KeyBindings};
use crate::layout::rect_contains;
use crate::theme;
use crate::ui::UiFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewFolder,
    Refresh,
    ChangeWallpaper,
    DisplaySettings,
    SystemPreferences,
}

impl MenuAction {
    pub const ALL: [MenuAction; 5] = [
        MenuAction::NewFolder,
        MenuAction::Refresh,
        MenuAction::ChangeWallpaper,
        MenuAction::DisplaySettings,
        MenuAction::SystemPreferences,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            MenuAction::NewFolder => "New Folder",
            MenuAction::Refresh => "Refresh Environment",
            MenuAction::ChangeWallpaper => "Change Wallpaper",
            MenuAction::DisplaySettings => "Display Settings",
            MenuAction::SystemPreferences => "System Preferences...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Not for the menu. A click outside also closes it before returning
    /// this, so the click keeps routing.
    Ignored,
    Consumed,
    Activated(MenuAction),
}

const MENU_WIDTH: u16 = 26;

#[derive(Debug)]
pub struct ContextMenu {
    rect: Option<Rect>,
    selected: usize,
    keys: KeyBindings,
}

impl Default for ContextMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextMenu {
    pub fn new() -> Self {
        Self {
            rect: None,
            selected: 0,
            keys: KeyBindings::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.rect.is_some()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    /// Opens at the pointer, shifted left/up as needed to stay inside
    /// `bounds`.
    pub fn open_at(&mut self, column: u16, row: u16, bounds: Rect) {
        let width = MENU_WIDTH.min(bounds.width);
        let height = (MenuAction::ALL.len() as u16 + 2).min(bounds.height);
        let max_x = (bounds.x + bounds.width).saturating_sub(width);
        let max_y = (bounds.y + bounds.height).saturating_sub(height);
        let rect = Rect {
            x: column.clamp(bounds.x, max_x.max(bounds.x)),
            y: row.clamp(bounds.y, max_y.max(bounds.y)),
            width,
            height,
        };
        tracing::debug!(x = rect.x, y = rect.y, "context menu opened");
        self.rect = Some(rect);
        self.selected = 0;
    }

    pub fn close(&mut self) {
        self.rect = None;
    }

    fn item_at(&self, column: u16, row: u16) -> Option<MenuAction> {
        let rect = self.rect?;
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        if !rect_contains(inner, column, row) {
            return None;
        }
        MenuAction::ALL.get((row - inner.y) as usize).copied()
    }

    fn activate(&mut self, action: MenuAction) -> MenuOutcome {
        self.close();
        tracing::debug!(?action, "context menu action");
        MenuOutcome::Activated(action)
    }

    pub fn render(&self, frame: &mut UiFrame<'_>) {
        let Some(rect) = self.rect else {
            return;
        };
        let style = ratatui::style::Style::default()
            .bg(theme::menu_bg())
            .fg(theme::menu_fg());
        frame.fill(rect, style);
        frame.render_widget(Block::default().borders(Borders::ALL).border_style(style), rect);
        let inner = Block::default().borders(Borders::ALL).inner(rect);
        for (i, action) in MenuAction::ALL.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let item_style = if i == self.selected {
                theme::selected_style()
            } else {
                style
            };
            frame.fill(Rect::new(inner.x, y, inner.width, 1), item_style);
            frame.text(inner.x + 1, y, action.label(), item_style);
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> MenuOutcome {
        let Some(rect) = self.rect else {
            return MenuOutcome::Ignored;
        };
        match event {
            Event::Key(key) => {
                if self.keys.matches(Action::MenuClose, key) {
                    self.close();
                } else if self.keys.matches(Action::MenuUp, key) {
                    self.selected = self.selected.saturating_sub(1);
                } else if self.keys.matches(Action::MenuDown, key) {
                    self.selected = (self.selected + 1).min(MenuAction::ALL.len() - 1);
                } else if self.keys.matches(Action::MenuSelect, key) {
                    return self.activate(MenuAction::ALL[self.selected]);
                }
                MenuOutcome::Consumed
            }
            Event::Mouse(mouse) => {
                let inside = rect_contains(rect, mouse.column, mouse.row);
                match mouse.kind {
                    MouseEventKind::Moved if inside => {
                        if let Some(action) = self.item_at(mouse.column, mouse.row) {
                            self.selected = MenuAction::ALL
                                .iter()
                                .position(|a| *a == action)
                                .unwrap_or(self.selected);
                        }
                        MenuOutcome::Consumed
                    }
                    MouseEventKind::Down(MouseButton::Left) if inside => {
                        match self.item_at(mouse.column, mouse.row) {
                            Some(action) => self.activate(action),
                            None => MenuOutcome::Consumed,
                        }
                    }
                    MouseEventKind::Down(_) | MouseEventKind::Up(_) if inside => {
                        MenuOutcome::Consumed
                    }
                    MouseEventKind::Down(_) => {
                        self.close();
                        MenuOutcome::Ignored
                    }
                    _ => MenuOutcome::Ignored,
                }
            }
            _ => MenuOutcome::Ignored,
        }
    }
}
