//! mw-tui: Terminal viewer for the mirrorwalk generator
//!
//! Animates a [`mw_core::Generator`] tick by tick in a ratatui map, then lets
//! an avatar walk the finished room. The headless renderer prints a finished
//! map as ASCII or JSON.

pub mod app;
pub mod display;
pub mod headless;
pub mod input;
pub mod options;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use app::{App, UiMode};
pub use display::GraphicsMode;
pub use headless::OutputFormat;
pub use input::Command;
pub use options::ConfigOverrides;
pub use theme::Theme;
