use crate::ui::UiFrame;
use ratatui::backend::Backend;
use std::io;

pub trait OutputDriver {
    type Backend: Backend;

    /// Takes over the terminal (alternate screen, raw mode, mouse).
    fn enter(&mut self) -> io::Result<()>;
    /// Restores the terminal. Safe to call more than once.
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
