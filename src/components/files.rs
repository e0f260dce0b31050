//! "Files": sidebar, breadcrumb and a grid or list of mock documents.

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use crate::components::{Component, ComponentContext, mouse_in};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    Document,
    Image,
    Other,
}

impl FileKind {
    fn glyph(self) -> &'static str {
        match self {
            FileKind::Folder => "▰",
            FileKind::Document => "▤",
            FileKind::Image => "▨",
            FileKind::Other => "▫",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub name: &'static str,
    pub kind: FileKind,
    pub size: Option<&'static str>,
    pub date: &'static str,
}

pub const ENTRIES: [FileEntry; 6] = [
    FileEntry {
        name: "Project_Alpha",
        kind: FileKind::Folder,
        size: None,
        date: "Today, 10:23 AM",
    },
    FileEntry {
        name: "Budget_2024.pdf",
        kind: FileKind::Document,
        size: Some("2.4 MB"),
        date: "Yesterday",
    },
    FileEntry {
        name: "Design_Mockup.png",
        kind: FileKind::Image,
        size: Some("12 MB"),
        date: "Oct 24",
    },
    FileEntry {
        name: "Notes.txt",
        kind: FileKind::Other,
        size: Some("4 KB"),
        date: "Oct 22",
    },
    FileEntry {
        name: "Meeting_Recording.mp3",
        kind: FileKind::Other,
        size: Some("45 MB"),
        date: "Oct 20",
    },
    FileEntry {
        name: "Presentation",
        kind: FileKind::Folder,
        size: None,
        date: "Oct 15",
    },
];

const SIDEBAR: [(&str, &[&str]); 2] = [
    ("Locations", &["Macintosh HD", "External Drive", "Network"]),
    ("Favorites", &["Desktop", "Documents", "Pictures", "Downloads"]),
];

const SIDEBAR_WIDTH: u16 = 18;
const GRID_COLUMNS: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

#[derive(Debug)]
pub struct FilesComponent {
    view: ViewMode,
    selected: Option<usize>,
    keys: KeyBindings,
    view_toggle: Rect,
    items: Vec<Rect>,
}

impl Default for FilesComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FilesComponent {
    pub fn new() -> Self {
        Self {
            view: ViewMode::Grid,
            selected: None,
            keys: KeyBindings::default(),
            view_toggle: Rect::default(),
            items: Vec::new(),
        }
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn selected(&self) -> Option<&FileEntry> {
        self.selected.and_then(|i| ENTRIES.get(i))
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        };
    }

    fn step_selection(&mut self, delta: isize) {
        let last = ENTRIES.len() - 1;
        let next = match self.selected {
            None => 0,
            Some(i) if delta < 0 => i.saturating_sub(delta.unsigned_abs()),
            Some(i) => (i + delta as usize).min(last),
        };
        self.selected = Some(next);
    }

    fn render_sidebar(&self, frame: &mut UiFrame<'_>, area: Rect) {
        let style = theme::window_style().bg(theme::bar_bg());
        frame.fill(area, style);
        let mut y = area.y;
        for (heading, items) in SIDEBAR {
            if y >= area.y + area.height {
                break;
            }
            frame.text(area.x + 1, y, heading, style.fg(theme::dialog_muted()));
            y += 1;
            for item in items {
                let item_style = if *item == "Documents" {
                    style.fg(theme::accent_alt())
                } else {
                    style
                };
                frame.text(area.x + 2, y, item, item_style);
                y += 1;
            }
            y += 1;
        }
    }
}

impl Component for FilesComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        self.items.clear();
        if area.width < SIDEBAR_WIDTH + 10 || area.height < 3 {
            return;
        }
        self.render_sidebar(frame, Rect { width: SIDEBAR_WIDTH, ..area });

        let main = Rect {
            x: area.x + SIDEBAR_WIDTH + 1,
            width: area.width - SIDEBAR_WIDTH - 1,
            ..area
        };
        frame.text(main.x, main.y, "Home › Documents", theme::muted_style());
        let toggle_label = match self.view {
            ViewMode::Grid => "[▦ grid]",
            ViewMode::List => "[☰ list]",
        };
        self.view_toggle = Rect::new(
            (main.x + main.width).saturating_sub(9),
            main.y,
            8,
            1,
        );
        frame.text(self.view_toggle.x, main.y, toggle_label, theme::window_style());

        let body = Rect {
            y: main.y + 2,
            height: main.height.saturating_sub(2),
            ..main
        };
        for (i, entry) in ENTRIES.iter().enumerate() {
            let style = if self.selected == Some(i) {
                theme::selected_style()
            } else {
                theme::window_style()
            };
            let rect = match self.view {
                ViewMode::Grid => {
                    let cell_w = body.width / GRID_COLUMNS;
                    Rect::new(
                        body.x + (i as u16 % GRID_COLUMNS) * cell_w,
                        body.y + (i as u16 / GRID_COLUMNS) * 3,
                        cell_w.saturating_sub(1),
                        2,
                    )
                }
                ViewMode::List => Rect::new(body.x, body.y + i as u16, body.width, 1),
            };
            if rect.y >= body.y + body.height {
                break;
            }
            frame.fill(rect, style);
            match self.view {
                ViewMode::Grid => {
                    frame.text(rect.x + rect.width / 2, rect.y, entry.kind.glyph(), style);
                    let name = truncate_to_width(entry.name, rect.width as usize);
                    frame.text(crate::ui::centered_x(rect, &name), rect.y + 1, &name, style);
                }
                ViewMode::List => {
                    let line = format!(
                        "{} {:<24}{:<18}{:>7}",
                        entry.kind.glyph(),
                        entry.name,
                        entry.date,
                        entry.size.unwrap_or("--")
                    );
                    frame.text(rect.x, rect.y, &line, style);
                }
            }
            self.items.push(rect);
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() => {
                if key.code == KeyCode::Char('v') {
                    self.toggle_view();
                    true
                } else if self.keys.matches(Action::MenuDown, key) {
                    self.step_selection(1);
                    true
                } else if self.keys.matches(Action::MenuUp, key) {
                    self.step_selection(-1);
                    true
                } else {
                    false
                }
            }
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                if mouse_in(event, self.view_toggle).is_some() {
                    self.toggle_view();
                    return true;
                }
                match self.items.iter().position(|r| mouse_in(event, *r).is_some()) {
                    Some(i) => {
                        self.selected = Some(i);
                        tracing::debug!(file = ENTRIES[i].name, "file selected");
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}
