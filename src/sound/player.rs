//! Sound notifier implementation using rodio.
//!
//! `RodioNotifier` keeps the alert asset in memory and plays it through a
//! dedicated `Sink`, so a replay always starts from the beginning and a stop
//! silences it immediately.

use std::io::Cursor;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{SoundSource, DEFAULT_TONE_HZ, DEFAULT_TONE_MS};
use super::SoundNotifier;

/// Amplitude applied to the generated tone.
const TONE_VOLUME: f32 = 0.25;

/// Audio data ready to be replayed.
#[derive(Debug, Clone)]
enum Clip {
    /// Encoded file contents, decoded afresh on each play.
    Encoded(Arc<[u8]>),
    /// Generated sine tone.
    Tone { frequency_hz: u32, duration: Duration },
}

impl Clip {
    /// Loads the clip for `source`, falling back to the built-in tone when
    /// the file is missing or cannot be decoded.
    fn resolve(source: &SoundSource) -> Result<Self, SoundError> {
        match Self::load(source) {
            Ok(clip) => Ok(clip),
            Err(e) if e.should_fallback_to_tone() => {
                warn!("{}, using the built-in tone", e);
                Ok(Self::default_tone())
            }
            Err(e) => Err(e),
        }
    }

    /// Reads the asset and checks once that it decodes.
    fn load(source: &SoundSource) -> Result<Self, SoundError> {
        match source {
            SoundSource::File { .. } => {
                let bytes: Arc<[u8]> = source.load()?.unwrap_or_default().into();
                Decoder::new(Cursor::new(Arc::clone(&bytes)))
                    .map_err(|e| SoundError::DecodeError(e.to_string()))?;
                Ok(Self::Encoded(bytes))
            }
            SoundSource::Tone {
                frequency_hz,
                duration_ms,
            } => Ok(Self::Tone {
                frequency_hz: *frequency_hz,
                duration: Duration::from_millis(*duration_ms),
            }),
        }
    }

    fn default_tone() -> Self {
        Self::Tone {
            frequency_hz: DEFAULT_TONE_HZ,
            duration: Duration::from_millis(DEFAULT_TONE_MS),
        }
    }
}

/// A sound notifier that uses rodio for audio playback.
///
/// The output stream must live as long as the notifier, so this type is not
/// meant to cross threads; the timer engine drives it from a single task.
pub struct RodioNotifier {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    /// The alert to play.
    clip: Clip,
    /// Sink of the alert currently playing, if any.
    sink: Mutex<Option<Sink>>,
}

impl RodioNotifier {
    /// Opens the default output device and loads the alert.
    ///
    /// A file that cannot be read or decoded is replaced by the built-in
    /// tone.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(source: &SoundSource) -> Result<Self, SoundError> {
        let clip = Clip::resolve(source)?;
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            clip,
            sink: Mutex::new(None),
        })
    }

    fn current_sink(&self) -> MutexGuard<'_, Option<Sink>> {
        self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn append_tone(sink: &Sink, frequency_hz: u32, duration: Duration) {
        let tone = SineWave::new(frequency_hz as f32)
            .take_duration(duration)
            .amplify(TONE_VOLUME);
        sink.append(tone);
    }
}

impl SoundNotifier for RodioNotifier {
    fn rewind_and_play(&self) -> Result<(), SoundError> {
        let mut current = self.current_sink();
        if let Some(previous) = current.take() {
            previous.stop();
        }

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        match &self.clip {
            Clip::Encoded(bytes) => {
                let decoder = Decoder::new(Cursor::new(Arc::clone(bytes)))
                    .map_err(|e| SoundError::DecodeError(e.to_string()))?;
                sink.append(decoder);
            }
            Clip::Tone {
                frequency_hz,
                duration,
            } => Self::append_tone(&sink, *frequency_hz, *duration),
        }

        debug!("Alert playback started");
        *current = Some(sink);
        Ok(())
    }

    fn stop_and_rewind(&self) -> Result<(), SoundError> {
        if let Some(sink) = self.current_sink().take() {
            sink.stop();
            debug!("Alert playback stopped");
        }
        Ok(())
    }
}

impl std::fmt::Debug for RodioNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioNotifier")
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}
