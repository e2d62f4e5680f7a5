//! Display utilities for the countdown clock CLI.
//!
//! This module provides formatted output for:
//! - The run banner
//! - Clock frames, redrawn in place on one line
//! - Stop and error messages

use std::io::Write;

use crate::types::ClockConfig;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Shows the clock settings before the first frame.
    pub fn show_banner(config: &ClockConfig, cue_name: &str, cue_ms: u64, muted: bool) {
        println!("{}", Self::format_banner(config, cue_name, cue_ms, muted));
        println!("Press Ctrl-C to stop");
    }

    /// Redraws the current frame in place.
    pub fn show_frame(frame: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{}", Self::format_frame(frame));
        let _ = stdout.flush();
    }

    /// Shows the stop message below the last frame.
    pub fn show_stopped() {
        println!();
        println!("[] Clock stopped");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    fn format_banner(config: &ClockConfig, cue_name: &str, cue_ms: u64, muted: bool) -> String {
        let cue = if muted {
            "muted".to_string()
        } else {
            format!("{} ({} ms)", cue_name, cue_ms)
        };
        format!(
            "> Delay {}, interval {}, cue: {}",
            config.delay, config.interval, cue
        )
    }

    /// Right-aligns the frame so `-MM:SS` and `MM:SS` share a column, and
    /// returns to the start of the line.
    fn format_frame(frame: &str) -> String {
        format!("\r{:>7}", frame)
    }
}

// ============================================================================
// Tests
// ============================================================================
