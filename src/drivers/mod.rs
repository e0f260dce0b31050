//! Terminal input and output seams.
//!
//! The desktop never talks to crossterm directly; it goes through an
//! [`InputDriver`] and an [`OutputDriver`], so the whole run loop can be
//! driven headless in tests.

pub mod console;
pub mod scripted;

mod input_driver;
mod output_driver;

pub use input_driver::InputDriver;
pub use output_driver::OutputDriver;
