//! Terminal front-end for the countdown timer.
//!
//! This module provides the presentation layer:
//! - `commands`: Flag definitions using clap derive, and interactive line parsing
//! - `display`: Rendering of timer views

pub mod commands;
pub mod display;

pub use commands::{parse_line, Action, Cli};
pub use display::Display;
