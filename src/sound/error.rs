//! Sound system error types.
//!
//! Every variant is produced by a notifier and absorbed by the timer engine;
//! none of them ever reaches the user.

use thiserror::Error;

/// Errors that can occur while playing the completion alert.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("audio device is not available: {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found or could not be read.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// Failed to decode the audio data.
    #[error("failed to decode sound: {0}")]
    DecodeError(String),

    /// Failed to create the audio output sink.
    #[error("failed to create audio stream: {0}")]
    StreamError(String),

    /// Playback was refused, e.g. by a mock or a blocked host.
    #[error("sound playback failed: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if the asset is unusable and the generated tone should
    /// be played instead.
    #[must_use]
    pub fn should_fallback_to_tone(&self) -> bool {
        matches!(self, Self::FileNotFound(_) | Self::DecodeError(_))
    }
}
