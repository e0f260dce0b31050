//! Headless drivers: a queued input script and an in-memory screen.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

use super::{InputDriver, OutputDriver};
use crate::ui::UiFrame;

/// Replays a fixed list of events, then reports an idle terminal.
#[derive(Debug, Default)]
pub struct ScriptedInputDriver {
    events: VecDeque<Event>,
}

impl ScriptedInputDriver {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputDriver for ScriptedInputDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))
    }
}

/// Renders into a `ratatui` test backend.
pub struct HeadlessOutputDriver {
    terminal: Terminal<TestBackend>,
    frames: usize,
}

impl HeadlessOutputDriver {
    pub fn new(width: u16, height: u16) -> io::Result<Self> {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .map_err(|err| io::Error::other(err.to_string()))?;
        Ok(Self {
            terminal,
            frames: 0,
        })
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl OutputDriver for HeadlessOutputDriver {
    type Backend = TestBackend;

    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>),
    {
        self.terminal
            .draw(move |frame| f(UiFrame::new(frame)))
            .map_err(|err| io::Error::other(err.to_string()))?;
        self.frames += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::buffer_lines;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn script_drains_in_order() {
        let mut driver = ScriptedInputDriver::new([
            Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)),
            Event::Resize(10, 5),
        ]);
        assert!(driver.poll(Duration::ZERO).unwrap());
        assert!(matches!(driver.read().unwrap(), Event::Key(_)));
        assert!(matches!(driver.read().unwrap(), Event::Resize(10, 5)));
        assert!(!driver.poll(Duration::ZERO).unwrap());
        assert!(driver.read().is_err());
    }

    #[test]
    fn headless_output_keeps_last_frame() {
        let mut output = HeadlessOutputDriver::new(12, 2).unwrap();
        output
            .draw(|mut frame| frame.text(0, 1, "hello", ratatui::style::Style::default()))
            .unwrap();
        assert_eq!(output.frames(), 1);
        assert_eq!(buffer_lines(output.buffer())[1].trim_end(), "hello");
    }
}
