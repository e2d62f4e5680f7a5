//! Cue source management.
//!
//! The cue is either a generated sine tone or a sound file. Loading a source
//! resolves its length in milliseconds, which the clock needs to align the
//! end of the cue with the end of the countdown.

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, Source};
use tracing::debug;

use super::error::SoundError;

/// Default tone frequency in Hz.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Default tone length in milliseconds.
pub const DEFAULT_TONE_MS: u64 = 1000;

/// Where the audio cue comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueSource {
    /// A generated sine tone.
    Tone {
        /// Tone frequency in Hz.
        frequency_hz: u32,
        /// Tone length in milliseconds.
        duration_ms: u64,
    },
    /// A sound file decoded by rodio (WAV, FLAC, Vorbis, MP3).
    File {
        /// Path to the sound file.
        path: PathBuf,
    },
}

impl Default for CueSource {
    fn default() -> Self {
        Self::tone(DEFAULT_TONE_MS)
    }
}

impl CueSource {
    /// Creates a tone source at the default frequency.
    #[must_use]
    pub fn tone(duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz: DEFAULT_TONE_HZ,
            duration_ms,
        }
    }

    /// Creates a file source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Returns a short name for logging.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Tone { frequency_hz, .. } => format!("{}Hz tone", frequency_hz),
            Self::File { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Loads the source into memory and measures its length.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the file cannot be read and
    /// `SoundError::DecodeError` if it cannot be decoded.
    pub fn load(&self) -> Result<LoadedCue, SoundError> {
        match self {
            Self::Tone {
                frequency_hz,
                duration_ms,
            } => Ok(LoadedCue {
                name: self.name(),
                data: CueData::Tone {
                    frequency_hz: *frequency_hz,
                },
                duration_ms: *duration_ms,
            }),
            Self::File { path } => {
                let bytes = std::fs::read(path)
                    .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
                let bytes: Arc<[u8]> = bytes.into();
                let duration_ms = measure_duration_ms(&bytes)?;
                debug!("Loaded sound file {} ({} ms)", path.display(), duration_ms);

                Ok(LoadedCue {
                    name: self.name(),
                    data: CueData::Clip(bytes),
                    duration_ms,
                })
            }
        }
    }
}

/// Audio content of a loaded cue.
#[derive(Debug, Clone)]
pub(crate) enum CueData {
    Tone { frequency_hz: u32 },
    Clip(Arc<[u8]>),
}

/// A cue ready to be played, with its measured length.
#[derive(Debug, Clone)]
pub struct LoadedCue {
    name: String,
    pub(crate) data: CueData,
    duration_ms: u64,
}

impl LoadedCue {
    /// Returns the cue name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the cue length in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Returns the cue length.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Decodes the clip once to find its length.
///
/// Uses the decoder's reported total duration when available and falls back
/// to counting samples.
fn measure_duration_ms(bytes: &Arc<[u8]>) -> Result<u64, SoundError> {
    let decoder = open_clip(bytes)?;
    if let Some(total) = decoder.total_duration() {
        return Ok(total.as_millis() as u64);
    }

    let channels = u64::from(decoder.channels());
    let sample_rate = u64::from(decoder.sample_rate());
    if channels == 0 || sample_rate == 0 {
        return Err(SoundError::DecodeError(
            "stream reports no channels or sample rate".to_string(),
        ));
    }
    let samples = decoder.count() as u64;
    Ok(samples * 1000 / (channels * sample_rate))
}

/// Opens a fresh decoder positioned at the start of the clip.
pub(crate) fn open_clip(bytes: &Arc<[u8]>) -> Result<Decoder<Cursor<Vec<u8>>>, SoundError> {
    Decoder::new(Cursor::new(bytes.to_vec())).map_err(|e| SoundError::DecodeError(e.to_string()))
}
