//! A spatial desktop: draggable, resizable, z-ordered windows with a dock,
//! a context menu, desktop icons and a first-run tour, hosted in a
//! terminal.
//!
//! The core ([`window`], [`pointer`], [`tour`], [`layout`]) works in virtual
//! pixels and knows nothing about terminals. [`desktop::Desktop`] maps
//! terminal cells onto that space and wires input to the core.

pub mod component_context;
pub mod components;
pub mod config;
pub mod constants;
pub mod context_menu;
pub mod desktop;
pub mod dock;
pub mod drivers;
pub mod event_loop;
pub mod icons;
pub mod keybindings;
pub mod layout;
pub mod logbuf;
pub mod pointer;
pub mod runner;
pub mod store;
pub mod theme;
pub mod tour;
pub mod tracing_sub;
pub mod ui;
pub mod window;
