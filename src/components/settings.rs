//! "Environment": spatial and connectivity switches plus a power readout.

use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::components::status_panel::bar;
use crate::components::{Component, ComponentContext, ToggleItem, ToggleListComponent};
use crate::theme;
use crate::ui::UiFrame;

const POWER_LEVEL: f32 = 0.85;

#[derive(Debug)]
pub struct SettingsComponent {
    environment: ToggleListComponent,
    connectivity: ToggleListComponent,
    /// Which list receives keyboard input.
    keyboard_on_connectivity: bool,
}

impl Default for SettingsComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsComponent {
    pub fn new() -> Self {
        Self {
            environment: ToggleListComponent::new(vec![
                ToggleItem::new("Passthrough Mode", true),
                ToggleItem::new("Spatial Audio", true),
                ToggleItem::new("Hand Tracking", true),
            ]),
            connectivity: ToggleListComponent::new(vec![
                ToggleItem::new("Wi-Fi", true),
                ToggleItem::new("Bluetooth", false),
            ]),
            keyboard_on_connectivity: false,
        }
    }

    pub fn is_enabled(&self, label: &str) -> Option<bool> {
        self.environment
            .items()
            .iter()
            .chain(self.connectivity.items())
            .find(|item| item.label == label)
            .map(|item| item.checked)
    }
}

impl Component for SettingsComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        if area.width < 10 || area.height < 4 {
            return;
        }
        let x = area.x + 1;
        let bottom = area.y + area.height;
        let mut y = area.y;
        frame.text(x, y, "Environment", theme::heading_style());
        frame.text(x, y + 1, "Configure your spatial computing context.", theme::muted_style());
        y += 2;
        let env_rows = (self.environment.items().len() as u16).min(bottom.saturating_sub(y));
        let env_ctx = ctx.with_focus(ctx.focused() && !self.keyboard_on_connectivity);
        self.environment.render(
            frame,
            Rect::new(area.x, y, area.width, env_rows),
            &env_ctx,
        );
        y += env_rows + 1;

        if y + 2 < bottom {
            frame.text(x, y, "Connectivity", theme::heading_style());
            frame.text(x, y + 1, "Network and peripherals.", theme::muted_style());
            y += 2;
            let rows = (self.connectivity.items().len() as u16).min(bottom - y);
            let conn_ctx = ctx.with_focus(ctx.focused() && self.keyboard_on_connectivity);
            self.connectivity
                .render(frame, Rect::new(area.x, y, area.width, rows), &conn_ctx);
            y += rows + 1;
        }

        if y + 1 < bottom {
            frame.text(x, y, "POWER", theme::muted_style());
            let width = area.width.saturating_sub(12).min(40) as usize;
            frame.text(
                x + 7,
                y,
                &bar(POWER_LEVEL, width),
                theme::window_style().fg(theme::success()),
            );
            frame.text(x, y + 1, "High Performance · 4h 32m remaining", theme::muted_style());
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        if let Event::Key(key) = event {
            if !ctx.focused() {
                return false;
            }
            if key.code == crossterm::event::KeyCode::Tab {
                self.keyboard_on_connectivity = !self.keyboard_on_connectivity;
                return true;
            }
            return if self.keyboard_on_connectivity {
                self.connectivity.handle_event(event, ctx)
            } else {
                self.environment.handle_event(event, ctx)
            };
        }
        self.environment.handle_event(event, ctx) || self.connectivity.handle_event(event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_match_factory_settings() {
        let settings = SettingsComponent::new();
        assert_eq!(settings.is_enabled("Passthrough Mode"), Some(true));
        assert_eq!(settings.is_enabled("Bluetooth"), Some(false));
        assert_eq!(settings.is_enabled("Telepathy"), None);
    }

    #[test]
    fn tab_moves_keyboard_between_sections() {
        let mut settings = SettingsComponent::new();
        let ctx = ComponentContext::new(true);
        let key = |code| Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        settings.handle_event(&key(KeyCode::Tab), &ctx);
        settings.handle_event(&key(KeyCode::Down), &ctx);
        settings.handle_event(&key(KeyCode::Char(' ')), &ctx);
        assert_eq!(settings.is_enabled("Bluetooth"), Some(true));
        assert_eq!(settings.is_enabled("Spatial Audio"), Some(true));
    }
}
