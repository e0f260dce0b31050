//! Desktop shortcuts drawn on the wallpaper.

use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;

use crate::constants::DOUBLE_CLICK_WINDOW;
use crate::layout::rect_contains;
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};
use crate::window::AppId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub label: &'static str,
    pub glyph: &'static str,
    pub target: AppId,
}

pub const DEFAULT_ICONS: [DesktopIcon; 3] = [
    DesktopIcon {
        label: "Macintosh HD",
        glyph: "▥",
        target: AppId::Files,
    },
    DesktopIcon {
        label: "Documents",
        glyph: "▤",
        target: AppId::Files,
    },
    DesktopIcon {
        label: "Protocol.pdf",
        glyph: "✎",
        target: AppId::StatusPanel,
    },
];

const ORIGIN_COLUMN: u16 = 3;
const ORIGIN_ROW: u16 = 4;
const ICON_WIDTH: u16 = 14;
/// Glyph row plus label row.
const ICON_HEIGHT: u16 = 2;
const ICON_GAP: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOutcome {
    Ignored,
    /// First press: the icon is selected but not launched.
    Selected(usize),
    Activated(AppId),
}

#[derive(Debug)]
pub struct DesktopIcons {
    icons: Vec<DesktopIcon>,
    selected: Option<usize>,
    last_press: Option<(usize, Instant)>,
}

impl Default for DesktopIcons {
    fn default() -> Self {
        Self::new(DEFAULT_ICONS.to_vec())
    }
}

impl DesktopIcons {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            selected: None,
            last_press: None,
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Cell rectangle of icon `index` inside `area`.
    pub fn icon_rect(&self, area: Rect, index: usize) -> Rect {
        let stride = ICON_HEIGHT + ICON_GAP;
        Rect::new(
            area.x + ORIGIN_COLUMN,
            area.y + ORIGIN_ROW + index as u16 * stride,
            ICON_WIDTH,
            ICON_HEIGHT,
        )
        .intersection(area)
    }

    fn icon_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        (0..self.icons.len()).find(|i| rect_contains(self.icon_rect(area, *i), column, row))
    }

    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect) {
        for (i, icon) in self.icons.iter().enumerate() {
            let rect = self.icon_rect(area, i);
            if rect.height < ICON_HEIGHT {
                continue;
            }
            let label_style = if self.selected == Some(i) {
                theme::selected_style()
            } else {
                ratatui::style::Style::default()
                    .fg(theme::wallpaper_fg())
                    .bg(theme::wallpaper_bg())
            };
            let glyph_x = rect.x + rect.width / 2;
            frame.text(glyph_x, rect.y, icon.glyph, theme::heading_style());
            let label = truncate_to_width(icon.label, rect.width as usize);
            let label_x = rect.x + (rect.width.saturating_sub(label.chars().count() as u16)) / 2;
            frame.text(label_x, rect.y + 1, &label, label_style);
        }
    }

    /// Tracks presses; a second press on the same icon within the
    /// double-click window activates it.
    pub fn handle_event(&mut self, event: &Event, area: Rect, now: Instant) -> IconOutcome {
        let Event::Mouse(mouse) = event else {
            return IconOutcome::Ignored;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return IconOutcome::Ignored;
        }
        let Some(index) = self.icon_at(area, mouse.column, mouse.row) else {
            self.selected = None;
            self.last_press = None;
            return IconOutcome::Ignored;
        };
        self.selected = Some(index);
        let double = self.last_press.is_some_and(|(last, at)| {
            last == index && now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
        });
        if double {
            self.last_press = None;
            let target = self.icons[index].target;
            tracing::debug!(icon = self.icons[index].label, window_id = ?target, "icon activated");
            IconOutcome::Activated(target)
        } else {
            self.last_press = Some((index, now));
            IconOutcome::Selected(index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;
    use std::time::Duration;

    const AREA: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 30,
    };

    fn press(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn double_press_within_window_activates() {
        let mut icons = DesktopIcons::default();
        let rect = icons.icon_rect(AREA, 2);
        let t0 = Instant::now();
        assert_eq!(icons.handle_event(&press(rect.x, rect.y), AREA, t0), IconOutcome::Selected(2));
        assert_eq!(
            icons.handle_event(&press(rect.x + 1, rect.y + 1), AREA, t0 + Duration::from_millis(300)),
            IconOutcome::Activated(AppId::StatusPanel)
        );
    }

    #[test]
    fn slow_or_split_presses_only_select() {
        let mut icons = DesktopIcons::default();
        let hd = icons.icon_rect(AREA, 0);
        let docs = icons.icon_rect(AREA, 1);
        let t0 = Instant::now();
        icons.handle_event(&press(hd.x, hd.y), AREA, t0);
        assert_eq!(
            icons.handle_event(&press(hd.x, hd.y), AREA, t0 + Duration::from_millis(800)),
            IconOutcome::Selected(0)
        );
        assert_eq!(
            icons.handle_event(&press(docs.x, docs.y), AREA, t0 + Duration::from_millis(900)),
            IconOutcome::Selected(1)
        );
        assert_eq!(icons.handle_event(&press(60, 20), AREA, t0), IconOutcome::Ignored);
        assert_eq!(icons.selected(), None);
    }

    #[test]
    fn renders_labels() {
        let icons = DesktopIcons::default();
        let mut buf = Buffer::empty(AREA);
        {
            let mut frame = UiFrame::from_parts(AREA, &mut buf);
            icons.render(&mut frame, AREA);
        }
        let lines = buffer_lines(&buf);
        assert!(lines[5].contains("Macintosh HD"));
        assert!(lines[9].contains("Documents"));
        assert!(lines[13].contains("Protocol.pdf"));
    }
}
