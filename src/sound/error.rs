//! Sound system error types.
//!
//! A failing cue never stops the clock; these errors are logged by the
//! engine and surfaced to the user only when loading the cue up front.

use thiserror::Error;

/// Errors that can occur while loading or playing the audio cue.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio file.
    #[error("failed to decode sound file: {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("sound playback error: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "connect an audio device or run with --no-sound",
            Self::FileNotFound(_) => "check the --sound path",
            Self::DecodeError(_) => "the sound file may be corrupted or in an unsupported format",
            Self::StreamError(_) => "check the audio settings",
            Self::PlaybackError(_) => "restart the clock",
        }
    }
}
