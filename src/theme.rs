use ratatui::style::{Color, Modifier, Style};

// Centralized palette. Everything the desktop draws pulls its colours from
// here so the frosted-glass look stays consistent across panels.

pub const ACCENT_RGB: (u8, u8, u8) = (168, 85, 247);
pub const ACCENT_ALT_RGB: (u8, u8, u8) = (96, 165, 250);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

pub fn accent_alt() -> Color {
    rgb_to_color(ACCENT_ALT_RGB)
}

// Wallpaper
pub fn wallpaper_bg() -> Color {
    Color::Rgb(15, 23, 42)
}
pub fn wallpaper_fg() -> Color {
    Color::Rgb(51, 65, 85)
}

// Status bar / dock
pub fn bar_bg() -> Color {
    Color::Rgb(30, 41, 59)
}
pub fn bar_fg() -> Color {
    Color::White
}
pub fn dock_running() -> Color {
    accent_alt()
}

// Menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

// Dialog / tour card
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_muted() -> Color {
    Color::DarkGray
}

// Decorator
pub fn decorator_header_bg(active: bool) -> Color {
    if active { accent() } else { Color::Rgb(71, 85, 105) }
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_border() -> Color {
    Color::Gray
}
pub fn window_bg() -> Color {
    Color::Rgb(24, 24, 27)
}
pub fn window_fg() -> Color {
    Color::Rgb(228, 228, 231)
}

// Indicators
pub fn success() -> Color {
    Color::Green
}
pub fn warning() -> Color {
    Color::Yellow
}

pub fn window_style() -> Style {
    Style::default().bg(window_bg()).fg(window_fg())
}

pub fn muted_style() -> Style {
    window_style().fg(dialog_muted())
}

pub fn heading_style() -> Style {
    window_style().add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default().bg(menu_selected_bg()).fg(menu_selected_fg())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_are_rgb() {
        assert!(matches!(accent(), Color::Rgb(168, 85, 247)));
        assert!(matches!(accent_alt(), Color::Rgb(_, _, _)));
    }

    #[test]
    fn inactive_header_differs_from_active() {
        assert_ne!(decorator_header_bg(true), decorator_header_bg(false));
    }
}
