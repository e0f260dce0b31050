use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    StartTour,
    FocusNextWindow,
    CloseWindow,
    MinimizeWindow,
    // Tour card
    TourNext,
    TourSkip,
    // Alert dialog
    DismissAlert,
    // Context menu / lists
    MenuUp,
    MenuDown,
    MenuSelect,
    MenuClose,
    ToggleSelection,
    // Notes
    NotesSave,
    NotesClear,
    // Web viewer
    BrowserBack,
    BrowserForward,
    BrowserReload,
    BrowserOpenExternal,
    BrowserEditUrl,
    BrowserHome,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::StartTour => "Start the tour",
            Action::FocusNextWindow => "Focus next window",
            Action::CloseWindow => "Close window",
            Action::MinimizeWindow => "Minimize window",
            Action::TourNext => "Tour: next step",
            Action::TourSkip => "Tour: skip",
            Action::DismissAlert => "Dismiss alert",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuSelect => "Menu select",
            Action::MenuClose => "Close menu",
            Action::ToggleSelection => "Toggle selection / space",
            Action::NotesSave => "Save note",
            Action::NotesClear => "Clear note",
            Action::BrowserBack => "Back",
            Action::BrowserForward => "Forward",
            Action::BrowserReload => "Reload",
            Action::BrowserOpenExternal => "Open in system browser",
            Action::BrowserEditUrl => "Edit address",
            Action::BrowserHome => "Home page",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::ctrl('q'));
        kb.add(StartTour, KeyCombo::plain(KeyCode::F(1)));
        kb.add(FocusNextWindow, KeyCombo::plain(KeyCode::F(6)));
        kb.add(CloseWindow, KeyCombo::ctrl('w'));
        kb.add(MinimizeWindow, KeyCombo::ctrl('n'));
        // Tour card
        kb.add(TourNext, KeyCombo::plain(KeyCode::Enter));
        kb.add(TourNext, KeyCombo::plain(KeyCode::Right));
        kb.add(TourSkip, KeyCombo::plain(KeyCode::Esc));
        // Alert
        kb.add(DismissAlert, KeyCombo::plain(KeyCode::Enter));
        kb.add(DismissAlert, KeyCombo::plain(KeyCode::Esc));
        // Menus and lists
        kb.add(MenuUp, KeyCombo::plain(KeyCode::Up));
        kb.add(MenuUp, KeyCombo::plain(KeyCode::Char('k')));
        kb.add(MenuDown, KeyCombo::plain(KeyCode::Down));
        kb.add(MenuDown, KeyCombo::plain(KeyCode::Char('j')));
        kb.add(MenuSelect, KeyCombo::plain(KeyCode::Enter));
        kb.add(MenuClose, KeyCombo::plain(KeyCode::Esc));
        kb.add(ToggleSelection, KeyCombo::plain(KeyCode::Char(' ')));
        kb.add(ToggleSelection, KeyCombo::plain(KeyCode::Enter));
        // Notes
        kb.add(NotesSave, KeyCombo::ctrl('s'));
        kb.add(NotesClear, KeyCombo::ctrl('l'));
        // Web viewer
        kb.add(BrowserBack, KeyCombo::new(KeyCode::Left, KeyModifiers::ALT));
        kb.add(BrowserForward, KeyCombo::new(KeyCode::Right, KeyModifiers::ALT));
        kb.add(BrowserReload, KeyCombo::ctrl('r'));
        kb.add(BrowserOpenExternal, KeyCombo::ctrl('o'));
        kb.add(BrowserEditUrl, KeyCombo::ctrl('l'));
        kb.add(BrowserHome, KeyCombo::new(KeyCode::Home, KeyModifiers::ALT));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// One-line hint such as `F1 tour` for the given actions.
    pub fn hint(&self, entries: &[(Action, &str)]) -> String {
        entries
            .iter()
            .filter_map(|(action, label)| {
                self.combos_for(*action)
                    .first()
                    .map(|combo| format!("{combo} {label}"))
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_desktop_keys() {
        let kb = KeyBindings::default();
        assert!(kb.matches(Action::Quit, &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(kb.matches(Action::StartTour, &KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)));
        assert!(kb.matches(Action::TourNext, &KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        assert!(!kb.matches(Action::Quit, &KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn hint_uses_first_combo() {
        let kb = KeyBindings::default();
        let hint = kb.hint(&[(Action::StartTour, "tour"), (Action::Quit, "quit")]);
        assert_eq!(hint, "F1 tour  Ctrl+Q quit");
    }
}
