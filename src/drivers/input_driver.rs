use crossterm::event::Event;
use std::io;
use std::time::Duration;

pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    struct Fixed;

    impl InputDriver for Fixed {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(true)
        }

        fn read(&mut self) -> io::Result<Event> {
            Ok(Event::Key(KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE)))
        }
    }

    fn drain_one(mut driver: impl InputDriver) -> Option<Event> {
        if driver.poll(Duration::ZERO).ok()? {
            driver.read().ok()
        } else {
            None
        }
    }

    #[test]
    fn mutable_references_are_drivers() {
        let mut driver = Fixed;
        let event = drain_one(&mut driver);
        assert!(matches!(event, Some(Event::Key(k)) if k.code == KeyCode::F(1)));
        assert!(driver.set_mouse_capture(true).is_ok());
    }
}
