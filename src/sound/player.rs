//! Audio cue player implementation using rodio.
//!
//! rodio's `OutputStream` cannot leave the thread that created it, so the
//! player owns it on a dedicated audio thread and the clock talks to that
//! thread through a channel. The handle handed to the clock is `Send + Sync`.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{open_clip, CueData, LoadedCue};
use super::{AudioTrigger, MutedAudioTrigger};

/// Tone volume relative to full scale.
const TONE_AMPLITUDE: f32 = 0.25;

/// Commands processed by the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AudioCommand {
    Play,
    Shutdown,
}

/// An audio trigger that plays the cue through the default output device.
pub struct RodioAudioTrigger {
    commands: Sender<AudioCommand>,
    thread: Option<JoinHandle<()>>,
    duration_ms: u64,
    name: String,
}

impl RodioAudioTrigger {
    /// Opens the default output device and starts the audio thread.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(cue: LoadedCue) -> Result<Self, SoundError> {
        let (commands, command_rx) = unbounded();
        let (ready_tx, ready_rx) = bounded(1);
        let duration_ms = cue.duration_ms();
        let name = cue.name().to_string();

        let thread = std::thread::Builder::new()
            .name("countdown-clock-audio".to_string())
            .spawn(move || audio_thread(cue, command_rx, ready_tx))
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                debug!("Audio output stream initialized");
                Ok(Self {
                    commands,
                    thread: Some(thread),
                    duration_ms,
                    name,
                })
            }
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(SoundError::DeviceNotAvailable(
                    "audio thread exited during startup".to_string(),
                ))
            }
        }
    }
}

impl AudioTrigger for RodioAudioTrigger {
    fn play(&self) -> Result<(), SoundError> {
        self.commands
            .send(AudioCommand::Play)
            .map_err(|_| SoundError::PlaybackError("audio thread is not running".to_string()))
    }

    fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

impl Drop for RodioAudioTrigger {
    fn drop(&mut self) {
        let _ = self.commands.send(AudioCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl std::fmt::Debug for RodioAudioTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioTrigger")
            .field("cue", &self.name)
            .field("duration_ms", &self.duration_ms)
            .finish_non_exhaustive()
    }
}

/// Body of the audio thread.
///
/// Reports the device initialization result on `ready`, then restarts the
/// cue from the beginning on every `Play` until `Shutdown` arrives or the
/// trigger is dropped.
fn audio_thread(
    cue: LoadedCue,
    commands: Receiver<AudioCommand>,
    ready: Sender<Result<(), SoundError>>,
) {
    let (_stream, handle) = match OutputStream::try_default() {
        Ok(pair) => pair,
        Err(e) => {
            let _ = ready.send(Err(SoundError::DeviceNotAvailable(e.to_string())));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    let mut current: Option<Sink> = None;
    for command in commands {
        match command {
            AudioCommand::Play => {
                if let Some(previous) = current.take() {
                    previous.stop();
                }
                match start_cue(&handle, &cue) {
                    Ok(sink) => current = Some(sink),
                    Err(e) => warn!("Failed to play cue '{}': {}", cue.name(), e),
                }
            }
            AudioCommand::Shutdown => break,
        }
    }
    debug!("Audio thread stopped");
}

/// Starts the cue on a fresh sink.
fn start_cue(handle: &OutputStreamHandle, cue: &LoadedCue) -> Result<Sink, SoundError> {
    let sink = Sink::try_new(handle).map_err(|e| SoundError::StreamError(e.to_string()))?;

    match &cue.data {
        CueData::Tone { frequency_hz } => {
            let tone = SineWave::new(*frequency_hz as f32)
                .take_duration(Duration::from_millis(cue.duration_ms()))
                .amplify(TONE_AMPLITUDE);
            sink.append(tone);
        }
        CueData::Clip(bytes) => sink.append(open_clip(bytes)?),
    }

    debug!("Cue playback started");
    Ok(sink)
}

/// Creates the trigger for a run.
///
/// A muted run never opens the output device. Otherwise this returns a
/// rodio trigger, or a muted one if audio is unavailable. Either way the
/// trigger keeps the cue length so the clock schedule is the same with or
/// without sound.
///
/// Opening the device blocks until the audio thread reports back; call
/// this from a blocking context inside async code.
#[must_use]
pub fn try_create_trigger(cue: LoadedCue, muted: bool) -> Arc<dyn AudioTrigger> {
    let duration_ms = cue.duration_ms();
    if muted {
        debug!("Cue muted, audio device not opened");
        return Arc::new(MutedAudioTrigger::new(duration_ms));
    }
    match RodioAudioTrigger::new(cue) {
        Ok(trigger) => Arc::new(trigger),
        Err(e) if e.is_device_error() => {
            warn!("Audio not available, cue muted: {} ({})", e, e.suggestion());
            Arc::new(MutedAudioTrigger::new(duration_ms))
        }
        Err(e) => {
            warn!("Audio thread failed to start, cue muted: {}", e);
            Arc::new(MutedAudioTrigger::new(duration_ms))
        }
    }
}
