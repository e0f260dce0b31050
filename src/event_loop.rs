use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// What the loop hands its handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Input(Event),
    /// Once per iteration, before polling. Drawing and timers hang off this.
    Tick(Instant),
}

/// The single place that polls the input driver.
///
/// Each iteration emits a [`LoopEvent::Tick`], waits up to the poll interval
/// for input and then drains every event that is already queued, so a burst
/// of drag events is applied before the next frame is drawn.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(LoopEvent) -> io::Result<ControlFlow>,
    {
        loop {
            if handler(LoopEvent::Tick(Instant::now()))? == ControlFlow::Quit {
                return Ok(());
            }
            if !self.driver.poll(self.poll_interval)? {
                continue;
            }
            loop {
                let event = self.driver.read()?;
                if handler(LoopEvent::Input(event))? == ControlFlow::Quit {
                    return Ok(());
                }
                if !self.driver.poll(Duration::ZERO)? {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::scripted::ScriptedInputDriver;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn bursts_are_drained_between_ticks() {
        let driver = ScriptedInputDriver::new([key('a'), key('b'), key('c')]);
        let mut event_loop = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        event_loop
            .run(|event| {
                let label = match &event {
                    LoopEvent::Tick(_) => "tick".to_string(),
                    LoopEvent::Input(Event::Key(KeyEvent {
                        code: KeyCode::Char(c),
                        ..
                    })) => c.to_string(),
                    LoopEvent::Input(_) => "other".to_string(),
                };
                seen.push(label);
                Ok(if seen.len() >= 5 {
                    ControlFlow::Quit
                } else {
                    ControlFlow::Continue
                })
            })
            .unwrap();
        assert_eq!(seen, vec!["tick", "a", "b", "c", "tick"]);
    }

    #[test]
    fn handler_errors_stop_the_loop() {
        let mut event_loop = EventLoop::new(ScriptedInputDriver::default(), Duration::ZERO);
        let err = event_loop
            .run(|_| Err(io::Error::other("boom")))
            .unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
