//! "Spatial Memories": four memory objects in a two-column grid.

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Borders};

use crate::components::{Component, ComponentContext, mouse_in};
use crate::theme;
use crate::ui::{UiFrame, centered_x};

const MEMORIES: [&str; 4] = [
    "https://picsum.photos/id/16/400/300",
    "https://picsum.photos/id/28/400/300",
    "https://picsum.photos/id/42/400/300",
    "https://picsum.photos/id/56/400/300",
];

#[derive(Debug, Default)]
pub struct GalleryComponent {
    tiles: Vec<Rect>,
    highlighted: Option<usize>,
}

impl GalleryComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    fn label(index: usize) -> String {
        format!("Object_REF_{}", index + 10)
    }
}

impl Component for GalleryComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        frame.fill(area, theme::window_style());
        self.tiles.clear();
        if area.width < 8 || area.height < 4 {
            return;
        }
        frame.text(area.x + 1, area.y, "Memory Objects", theme::heading_style());
        frame.text(
            area.x + 1,
            area.y + 1,
            "Visual data stored in spatial containers.",
            theme::muted_style(),
        );
        let grid = Rect {
            x: area.x + 1,
            y: area.y + 3,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(3),
        };
        let tile_w = grid.width / 2;
        let tile_h = (grid.height / 2).max(3);
        for (i, _) in MEMORIES.iter().enumerate() {
            let tile = Rect {
                x: grid.x + (i as u16 % 2) * tile_w,
                y: grid.y + (i as u16 / 2) * tile_h,
                width: tile_w.saturating_sub(1),
                height: tile_h.saturating_sub(1),
            };
            let mut border = theme::window_style().fg(theme::decorator_border());
            if self.highlighted == Some(i) {
                border = border.fg(theme::accent());
            }
            frame.render_widget(Block::default().borders(Borders::ALL).border_style(border), tile);
            let label = Self::label(i);
            frame.text(
                centered_x(tile, &label),
                tile.y + tile.height / 2,
                &label,
                theme::window_style(),
            );
            self.tiles.push(tile);
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let hit = self.tiles.iter().position(|tile| {
            matches!(
                mouse_in(event, *tile),
                Some((_, _, MouseEventKind::Down(MouseButton::Left)))
            )
        });
        match hit {
            Some(i) => {
                tracing::debug!(memory = MEMORIES[i], "memory object selected");
                self.highlighted = Some(i);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;

    #[test]
    fn click_highlights_tile() {
        let mut gallery = GalleryComponent::new();
        let area = Rect::new(0, 0, 40, 15);
        let mut buf = Buffer::empty(area);
        let ctx = ComponentContext::default();
        {
            let mut frame = UiFrame::from_parts(area, &mut buf);
            gallery.render(&mut frame, area, &ctx);
        }
        assert!(buffer_lines(&buf).iter().any(|l| l.contains("Object_REF_13")));
        let last = gallery.tiles[3];
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: last.x + 1,
            row: last.y + 1,
            modifiers: KeyModifiers::NONE,
        });
        assert!(gallery.handle_event(&click, &ctx));
        assert_eq!(gallery.highlighted(), Some(3));
    }
}
