//! The `run` command: resolves settings, starts the clock and renders frames
//! until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::debug;

use super::commands::RunArgs;
use super::display::Display;
use crate::clock::ClockEngine;
use crate::config::Settings;
use crate::sound::{try_create_trigger, AudioTrigger, CueSource, LoadedCue};
use crate::types::{ClockConfig, ConfigError};

/// Picks the cue source: command line first, then settings, then the
/// default tone.
pub fn cue_source(args: &RunArgs, settings: &Settings) -> CueSource {
    if let Some(path) = &args.sound {
        return CueSource::file(path);
    }
    if let Some(ms) = args.tone_ms {
        return CueSource::tone(ms);
    }
    if let Some(path) = &settings.sound {
        return CueSource::file(path);
    }
    settings.tone_ms.map(CueSource::tone).unwrap_or_default()
}

/// Resolves interval and delay and validates them against the cue length.
///
/// Missing values default to the minimum duration allowed for the cue.
/// A seconds field of 60 or more is reset to zero.
///
/// # Errors
///
/// Returns `ConfigError::TooShort` if either duration is shorter than the
/// cue.
pub fn clock_config(
    args: &RunArgs,
    settings: &Settings,
    cue_ms: u64,
) -> Result<ClockConfig, ConfigError> {
    let defaults = ClockConfig::for_cue(cue_ms);
    let interval = args
        .interval
        .or(settings.interval)
        .unwrap_or(defaults.interval)
        .normalized();
    let delay = args
        .delay
        .or(settings.delay)
        .unwrap_or(defaults.delay)
        .normalized();

    let config = ClockConfig::new(interval, delay);
    config.validate(cue_ms)?;
    Ok(config)
}

/// Creates the audio trigger on the blocking pool.
///
/// Opening the output device waits on the audio thread, which must not
/// stall the runtime driving the clock.
///
/// # Errors
///
/// Returns an error if the blocking task panics or is cancelled.
pub async fn create_audio(cue: LoadedCue, muted: bool) -> Result<Arc<dyn AudioTrigger>> {
    tokio::task::spawn_blocking(move || try_create_trigger(cue, muted))
        .await
        .context("audio initialization task failed")
}

/// Runs the clock until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the settings or the cue cannot be loaded, the
/// durations are invalid, or the clock cannot be started.
pub async fn run_clock(args: RunArgs) -> Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())?;
    let source = cue_source(&args, &settings);
    let cue = source.load().context("failed to load the audio cue")?;
    let config = clock_config(&args, &settings, cue.duration_ms())?;
    let muted = args.no_sound || settings.muted;
    debug!("Resolved {:?} with cue {:?}, muted: {}", config, source, muted);

    let audio = create_audio(cue.clone(), muted).await?;

    let (frame_tx, mut frame_rx) = mpsc::unbounded_channel::<String>();
    let mut engine = ClockEngine::new(config.interval, config.delay, Arc::new(frame_tx), audio)?;

    Display::show_banner(&config, cue.name(), cue.duration_ms(), muted);
    engine.start()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            frame = frame_rx.recv() => match frame {
                Some(frame) => Display::show_frame(&frame),
                None => break,
            },
            result = &mut ctrl_c => {
                result.context("failed to listen for Ctrl-C")?;
                break;
            }
        }
    }

    engine.stop();
    Display::show_stopped();
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
