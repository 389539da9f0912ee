//! Completion alert for the countdown timer.
//!
//! This module provides the Sound Notifier capability:
//!
//! - `SoundNotifier`: `rewind_and_play` / `stop_and_rewind`
//! - `RodioNotifier`: plays a file or a generated tone through rodio
//! - `SilentNotifier`: used when sound is disabled or no device exists
//! - `MockSoundNotifier`: records calls for tests
//!
//! Playback is best-effort. Notifiers report failures as `SoundError`, and
//! the timer engine discards them.
//!
//! # Usage
//!
//! ```rust,no_run
//! use countdown::sound::{RodioNotifier, SoundNotifier, SoundSource};
//!
//! let notifier = RodioNotifier::new(&SoundSource::file("sounds/beep.mp3")).expect("audio init");
//! let _ = notifier.rewind_and_play();
//! let _ = notifier.stop_and_rewind();
//! ```

mod error;
mod player;
mod source;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::warn;

pub use error::SoundError;
pub use player::RodioNotifier;
pub use source::{SoundSource, DEFAULT_SOUND_PATH, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};

/// Capability to play and stop the completion alert.
pub trait SoundNotifier {
    /// Rewinds the alert to its beginning and plays it.
    ///
    /// # Errors
    ///
    /// Returns an error if playback could not be started.
    fn rewind_and_play(&self) -> Result<(), SoundError>;

    /// Stops the alert and rewinds it.
    ///
    /// # Errors
    ///
    /// Returns an error if the output could not be stopped.
    fn stop_and_rewind(&self) -> Result<(), SoundError>;
}

impl<T: SoundNotifier + ?Sized> SoundNotifier for Arc<T> {
    fn rewind_and_play(&self) -> Result<(), SoundError> {
        (**self).rewind_and_play()
    }

    fn stop_and_rewind(&self) -> Result<(), SoundError> {
        (**self).stop_and_rewind()
    }
}

/// Notifier that never makes a sound.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl SoundNotifier for SilentNotifier {
    fn rewind_and_play(&self) -> Result<(), SoundError> {
        Ok(())
    }

    fn stop_and_rewind(&self) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Builds the notifier for the given source.
///
/// Falls back to `SilentNotifier` when sound is disabled or the audio
/// device cannot be opened.
#[must_use]
pub fn create_notifier(source: &SoundSource, enabled: bool) -> Box<dyn SoundNotifier> {
    if !enabled {
        return Box::new(SilentNotifier);
    }
    match RodioNotifier::new(source) {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            Box::new(SilentNotifier)
        }
    }
}

/// Mock sound notifier for testing.
#[derive(Debug, Default)]
pub struct MockSoundNotifier {
    play_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    should_fail: AtomicBool,
}

impl MockSoundNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with `SoundError::PlaybackError`.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Number of `rewind_and_play` calls, including failed ones.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    /// Number of `stop_and_rewind` calls, including failed ones.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    fn outcome(&self) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}

impl SoundNotifier for MockSoundNotifier {
    fn rewind_and_play(&self) -> Result<(), SoundError> {
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }

    fn stop_and_rewind(&self) -> Result<(), SoundError> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_notifier() {
        let notifier = SilentNotifier;
        assert!(notifier.rewind_and_play().is_ok());
        assert!(notifier.stop_and_rewind().is_ok());
    }

    #[test]
    fn test_create_notifier_disabled() {
        let notifier = create_notifier(&SoundSource::default(), false);
        assert!(notifier.rewind_and_play().is_ok());
    }

    #[test]
    fn test_create_notifier_no_panic_without_device() {
        let notifier = create_notifier(&SoundSource::default_tone(), true);
        let _ = notifier.stop_and_rewind();
    }

    #[test]
    fn test_mock_counts_calls() {
        let mock = MockSoundNotifier::new();
        mock.rewind_and_play().unwrap();
        mock.rewind_and_play().unwrap();
        mock.stop_and_rewind().unwrap();

        assert_eq!(mock.play_count(), 2);
        assert_eq!(mock.stop_count(), 1);
    }

    #[test]
    fn test_mock_failure() {
        let mock = MockSoundNotifier::new();
        mock.set_should_fail(true);

        assert!(matches!(
            mock.rewind_and_play(),
            Err(SoundError::PlaybackError(_))
        ));
        assert_eq!(mock.play_count(), 1);
    }

    #[test]
    fn test_shared_mock_through_arc() {
        let mock = Arc::new(MockSoundNotifier::new());
        let boxed: Box<dyn SoundNotifier> = Box::new(Arc::clone(&mock));

        boxed.rewind_and_play().unwrap();
        assert_eq!(mock.play_count(), 1);
    }
}
