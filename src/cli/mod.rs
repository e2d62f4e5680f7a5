//! CLI module for the countdown clock.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `run`: The `run` command wiring settings, cue and clock engine
//! - `display`: Output formatting and display logic

pub mod commands;
pub mod display;
pub mod run;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use run::run_clock;
