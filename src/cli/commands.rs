//! Command definitions for the countdown clock CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::TimeDuration;

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown Clock - count down a delay, then count up with a periodic cue
#[derive(Parser, Debug)]
#[command(
    name = "countdown-clock",
    version,
    about = "Countdown/count-up clock with a periodic audio cue",
    long_about = "Counts down the delay, then counts up from zero.\n\
                  An audio cue is timed to finish exactly when the countdown reaches zero \
                  and repeats every interval after that.",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the clock until Ctrl-C
    Run(RunArgs),

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Time between two cues (MM:SS)
    #[arg(short, long, value_name = "MM:SS")]
    pub interval: Option<TimeDuration>,

    /// Countdown before the first cue completes (MM:SS)
    #[arg(short, long, value_name = "MM:SS")]
    pub delay: Option<TimeDuration>,

    /// Sound file to use as the cue (WAV, FLAC, Vorbis, MP3)
    #[arg(short, long, value_name = "PATH", conflicts_with = "tone_ms")]
    pub sound: Option<PathBuf>,

    /// Length of the generated tone in milliseconds
    #[arg(
        long,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..=59_000)
    )]
    pub tone_ms: Option<u64>,

    /// Disable the audio cue
    #[arg(long)]
    pub no_sound: bool,

    /// Settings file (defaults to <config dir>/countdown-clock/config.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================
