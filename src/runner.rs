use std::io;
use std::time::{Duration, Instant};

use crate::desktop::Desktop;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop, LoopEvent};

/// Runs `desktop` until it asks to quit. The terminal is restored on every
/// exit path, including errors from the loop itself.
pub fn run_desktop<O, D>(
    output: &mut O,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    output.enter()?;
    let result = drive(output, driver, desktop, poll_interval);
    let restored = output.exit();
    result.and(restored)
}

fn drive<O, D>(
    output: &mut O,
    driver: D,
    desktop: &mut Desktop,
    poll_interval: Duration,
) -> io::Result<()>
where
    O: OutputDriver,
    D: InputDriver,
{
    if desktop.arm_first_run_tour(Instant::now()) {
        tracing::info!("first run, tour scheduled");
    }
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    event_loop.run(|event| {
        match event {
            LoopEvent::Tick(now) => {
                desktop.tick(now);
                if desktop.should_quit() {
                    return Ok(ControlFlow::Quit);
                }
                output.draw(|mut frame| desktop.render(&mut frame, now))?;
            }
            LoopEvent::Input(event) => {
                desktop.handle_event(&event, Instant::now());
            }
        }
        Ok(if desktop.should_quit() {
            ControlFlow::Quit
        } else {
            ControlFlow::Continue
        })
    })
}
