//! Sound source selection.
//!
//! The completion alert is either an audio file on disk or a generated sine
//! tone. The tone doubles as the fallback when a file cannot be used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::SoundError;

/// Default path of the alert asset, relative to the working directory.
pub const DEFAULT_SOUND_PATH: &str = "sounds/beep.mp3";

/// Default fallback tone frequency.
pub const DEFAULT_TONE_HZ: u32 = 880;

/// Default fallback tone length.
pub const DEFAULT_TONE_MS: u64 = 400;

/// Represents the source of the completion alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoundSource {
    /// An audio file (mp3, wav, flac, ogg...).
    File {
        /// Path to the audio file.
        path: PathBuf,
    },
    /// A generated sine tone.
    Tone {
        /// Frequency in hertz.
        frequency_hz: u32,
        /// Length in milliseconds.
        duration_ms: u64,
    },
}

impl SoundSource {
    /// Creates a file source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File { path: path.into() }
    }

    /// Creates a tone source.
    #[must_use]
    pub fn tone(frequency_hz: u32, duration_ms: u64) -> Self {
        Self::Tone {
            frequency_hz,
            duration_ms,
        }
    }

    /// The built-in beep used when no file is usable.
    #[must_use]
    pub fn default_tone() -> Self {
        Self::tone(DEFAULT_TONE_HZ, DEFAULT_TONE_MS)
    }

    /// Returns the file path if this is a file source.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File { path } => Some(path.as_path()),
            Self::Tone { .. } => None,
        }
    }

    /// Reads the whole asset into memory so every play starts from byte 0.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::FileNotFound` if the file cannot be read.
    pub fn load(&self) -> Result<Option<Vec<u8>>, SoundError> {
        match self {
            Self::File { path } => std::fs::read(path)
                .map(Some)
                .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e))),
            Self::Tone { .. } => Ok(None),
        }
    }
}

impl Default for SoundSource {
    fn default() -> Self {
        Self::file(DEFAULT_SOUND_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_source() {
        let source = SoundSource::file("sounds/beep.mp3");
        assert_eq!(source.path(), Some(Path::new("sounds/beep.mp3")));
    }

    #[test]
    fn test_tone_source() {
        let source = SoundSource::default_tone();
        assert!(source.path().is_none());
        assert_eq!(
            source,
            SoundSource::Tone {
                frequency_hz: DEFAULT_TONE_HZ,
                duration_ms: DEFAULT_TONE_MS
            }
        );
    }

    #[test]
    fn test_default_is_beep_file() {
        assert_eq!(SoundSource::default(), SoundSource::file(DEFAULT_SOUND_PATH));
    }

    #[test]
    fn test_load_missing_file() {
        let source = SoundSource::file("/nonexistent/path/to/beep.mp3");
        match source.load() {
            Err(SoundError::FileNotFound(msg)) => assert!(msg.contains("beep.mp3")),
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_load_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beep.wav");
        std::fs::write(&path, b"RIFF....WAVE").unwrap();

        let bytes = SoundSource::file(&path).load().unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"RIFF....WAVE"[..]));
    }

    #[test]
    fn test_load_tone_has_no_bytes() {
        assert!(SoundSource::default_tone().load().unwrap().is_none());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(SoundSource::tone(440, 200)).unwrap();
        assert_eq!(json["kind"], "tone");
        assert_eq!(json["frequency_hz"], 440);
    }
}
