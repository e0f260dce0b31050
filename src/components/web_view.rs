//! "Spatial Web": address bar, history and an opaque page frame.
//!
//! Pages are never fetched. The frame shows what would be loaded and the
//! system browser can be asked to open it for real.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Modifier;

use crate::components::{Component, ComponentContext, ContentRequest, mouse_in};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::{UiFrame, centered_x};

pub const HOME_URL: &str = "https://en.wikipedia.org/wiki/Spatial_computing";
const SEARCH_URL: &str = "https://en.wikipedia.org/w/index.php?search=";

/// Turns address-bar input into a URL. Anything that already names an
/// http(s) scheme is kept; something that looks like a host gets `https://`;
/// everything else becomes a search.
pub fn resolve_target(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http") {
        input.to_string()
    } else if input.contains('.') && !input.contains(' ') {
        format!("https://{input}")
    } else {
        format!("{SEARCH_URL}{}", urlencoding::encode(input))
    }
}

/// Back/forward stack. Navigating from the middle drops the forward part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            entries: vec![first.into()],
            index: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn push(&mut self, url: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(url);
        self.index = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    pub fn forward(&mut self) -> bool {
        if self.can_go_forward() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolbarButton {
    Back,
    Forward,
    Reload,
    Home,
    External,
}

const TOOLBAR: [(ToolbarButton, &str); 4] = [
    (ToolbarButton::Back, "◀"),
    (ToolbarButton::Forward, "▶"),
    (ToolbarButton::Reload, "↻"),
    (ToolbarButton::Home, "⌂"),
];

#[derive(Debug)]
pub struct WebViewComponent {
    history: History,
    input: String,
    editing: bool,
    loading: bool,
    keys: KeyBindings,
    buttons: Vec<(ToolbarButton, Rect)>,
    address_bar: Rect,
    pending: Option<ContentRequest>,
}

impl Default for WebViewComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl WebViewComponent {
    pub fn new() -> Self {
        Self {
            history: History::new(HOME_URL),
            input: HOME_URL.to_string(),
            editing: false,
            loading: false,
            keys: KeyBindings::default(),
            buttons: Vec::new(),
            address_bar: Rect::default(),
            pending: None,
        }
    }

    pub fn url(&self) -> &str {
        self.history.current()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn navigate(&mut self, raw: &str) {
        let target = resolve_target(raw);
        tracing::debug!(url = %target, "web view navigating");
        self.history.push(target.clone());
        self.input = target;
        self.editing = false;
        self.loading = true;
    }

    fn sync_input(&mut self) {
        self.input = self.history.current().to_string();
        self.editing = false;
        self.loading = true;
    }

    pub fn back(&mut self) -> bool {
        let moved = self.history.back();
        if moved {
            self.sync_input();
        }
        moved
    }

    pub fn forward(&mut self) -> bool {
        let moved = self.history.forward();
        if moved {
            self.sync_input();
        }
        moved
    }

    pub fn reload(&mut self) {
        tracing::debug!(url = %self.url(), "web view reload");
        self.loading = true;
    }

    pub fn home(&mut self) {
        self.navigate(HOME_URL);
    }

    pub fn open_external(&mut self) {
        let url = self.url().to_string();
        match webbrowser::open(&url) {
            Ok(()) => tracing::info!(%url, "opened in system browser"),
            Err(err) => {
                tracing::warn!(%url, %err, "could not open system browser");
                self.pending = Some(ContentRequest::Alert(format!(
                    "Could not open the system browser: {err}"
                )));
            }
        }
    }

    fn press(&mut self, button: ToolbarButton) {
        match button {
            ToolbarButton::Back => {
                self.back();
            }
            ToolbarButton::Forward => {
                self.forward();
            }
            ToolbarButton::Reload => self.reload(),
            ToolbarButton::Home => self.home(),
            ToolbarButton::External => self.open_external(),
        }
    }

    fn handle_edit_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => {
                let raw = self.input.clone();
                self.navigate(&raw);
            }
            KeyCode::Esc => {
                self.input = self.url().to_string();
                self.editing = false;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.push(c);
            }
            _ => return false,
        }
        true
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if self.editing {
            return self.handle_edit_key(key);
        }
        if self.keys.matches(Action::BrowserEditUrl, key) {
            self.editing = true;
            self.input.clear();
        } else if self.keys.matches(Action::BrowserBack, key) {
            self.back();
        } else if self.keys.matches(Action::BrowserForward, key) {
            self.forward();
        } else if self.keys.matches(Action::BrowserReload, key) {
            self.reload();
        } else if self.keys.matches(Action::BrowserHome, key) {
            self.home();
        } else if self.keys.matches(Action::BrowserOpenExternal, key) {
            self.open_external();
        } else {
            return false;
        }
        true
    }
}

impl Component for WebViewComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        self.buttons.clear();
        if area.width < 8 || area.height < 2 {
            return;
        }
        let bar_style = theme::window_style().bg(theme::bar_bg());
        let toolbar = Rect { height: 1, ..area };
        frame.fill(toolbar, bar_style);

        let mut x = area.x + 1;
        for (button, glyph) in TOOLBAR {
            let enabled = match button {
                ToolbarButton::Back => self.history.can_go_back(),
                ToolbarButton::Forward => self.history.can_go_forward(),
                _ => true,
            };
            let style = if enabled {
                bar_style
            } else {
                bar_style.fg(theme::dialog_muted())
            };
            frame.text(x, area.y, glyph, style);
            self.buttons.push((button, Rect::new(x, area.y, 1, 1)));
            x += 2;
        }
        let external_x = (area.x + area.width).saturating_sub(2);
        frame.text(external_x, area.y, "⇱", bar_style);
        self.buttons
            .push((ToolbarButton::External, Rect::new(external_x, area.y, 1, 1)));

        self.address_bar = Rect {
            x,
            y: area.y,
            width: external_x.saturating_sub(x + 1),
            height: 1,
        };
        let lock = if self.url().starts_with("https://") { "◆" } else { "◇" };
        let shown = if self.editing {
            format!("{}▏", self.input)
        } else {
            format!("{lock} {}", self.input)
        };
        let mut address_style = bar_style;
        if self.editing && ctx.focused() {
            address_style = address_style.add_modifier(Modifier::UNDERLINED);
        }
        frame.text(
            self.address_bar.x,
            area.y,
            &crate::ui::truncate_to_width(&shown, self.address_bar.width as usize),
            address_style,
        );

        // Opaque page frame
        let page = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        let mid = page.y + page.height / 2;
        let status = if self.loading { "Loading…" } else { "Content frame" };
        frame.text(centered_x(page, status), mid.saturating_sub(1), status, theme::muted_style());
        let url = crate::ui::truncate_to_width(self.url(), page.width.saturating_sub(2) as usize);
        frame.text(centered_x(page, &url), mid, &url, theme::window_style());
        self.loading = false;
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) if ctx.focused() => self.handle_key(key),
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
                if mouse_in(event, self.address_bar).is_some() {
                    self.editing = true;
                    return true;
                }
                let hit = self
                    .buttons
                    .iter()
                    .find(|(_, rect)| mouse_in(event, *rect).is_some())
                    .map(|(button, _)| *button);
                match hit {
                    Some(button) => {
                        self.press(button);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn unmount(&mut self) {
        self.editing = false;
        self.input = self.url().to_string();
    }

    fn take_request(&mut self) -> Option<ContentRequest> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseEvent;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn resolve_target_infers_scheme_or_searches() {
        assert_eq!(resolve_target("https://a.b/c"), "https://a.b/c");
        assert_eq!(resolve_target("example.com"), "https://example.com");
        assert_eq!(
            resolve_target("spatial computing"),
            "https://en.wikipedia.org/w/index.php?search=spatial%20computing"
        );
    }

    #[test]
    fn history_drops_forward_entries_on_navigate() {
        let mut web = WebViewComponent::new();
        web.navigate("a.com");
        web.navigate("b.com");
        assert!(web.back());
        assert_eq!(web.url(), "https://a.com");
        web.navigate("c.com");
        assert!(!web.forward());
        assert_eq!(web.history().len(), 3);
        assert!(web.back());
        assert!(web.back());
        assert_eq!(web.url(), HOME_URL);
        assert!(!web.back());
    }

    #[test]
    fn typing_into_the_address_bar() {
        let mut web = WebViewComponent::new();
        let ctx = ComponentContext::new(true);
        let edit = Event::Key(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(web.handle_event(&edit, &ctx));
        assert!(web.is_editing());
        for c in "rust-lang.org".chars() {
            web.handle_event(&key(KeyCode::Char(c)), &ctx);
        }
        web.handle_event(&key(KeyCode::Enter), &ctx);
        assert_eq!(web.url(), "https://rust-lang.org");
        assert!(!web.is_editing());
    }

    #[test]
    fn toolbar_back_button_click() {
        let mut web = WebViewComponent::new();
        web.navigate("a.com");
        let ctx = ComponentContext::new(true);
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            web.render(&mut frame, area, &ctx);
        }
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 1,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert!(web.handle_event(&click, &ctx));
        assert_eq!(web.url(), HOME_URL);
    }
}
