//! Runtime configuration for the countdown front-end.
//!
//! The configuration is assembled from command-line flags and decides which
//! notifier to build, what the input field starts with, and how views are
//! rendered.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::Cli;
use crate::sound::SoundSource;

/// How views are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable panel with a progress bar
    #[default]
    Text,
    /// One JSON object per view
    Json,
}

/// Errors in the runtime configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// `--start` was given without anything to start from.
    #[error("--start needs an initial value (use --seconds)")]
    StartWithoutInput,

    /// The sound path is empty.
    #[error("sound path must not be empty")]
    EmptySoundPath,
}

/// Countdown front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownConfig {
    /// Alert played when the countdown finishes
    pub sound: SoundSource,
    /// Whether to open an audio device at all
    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,
    /// Text placed in the input field at startup
    #[serde(default)]
    pub initial_input: Option<String>,
    /// Start right away from `initial_input`
    #[serde(default)]
    pub auto_start: bool,
    /// Rendering of views
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_sound_enabled() -> bool {
    true
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            sound: SoundSource::default(),
            sound_enabled: default_sound_enabled(),
            initial_input: None,
            auto_start: false,
            format: OutputFormat::default(),
        }
    }
}

impl CountdownConfig {
    /// Builds the configuration from parsed command-line flags.
    pub fn from_cli(cli: &Cli) -> Self {
        let sound = if cli.tone {
            SoundSource::default_tone()
        } else {
            SoundSource::file(&cli.sound)
        };
        Self {
            sound,
            sound_enabled: !cli.no_sound,
            initial_input: cli.seconds.clone(),
            auto_start: cli.start,
            format: cli.format,
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_start && self.initial_input.is_none() {
            return Err(ConfigError::StartWithoutInput);
        }
        if self
            .sound
            .path()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(ConfigError::EmptySoundPath);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = CountdownConfig::default();
        assert_eq!(config.sound, SoundSource::file("sounds/beep.mp3"));
        assert!(config.sound_enabled);
        assert!(config.initial_input.is_none());
        assert_eq!(config.format, OutputFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::parse_from([
            "countdown",
            "--sound",
            "alarm.wav",
            "--seconds",
            "90",
            "--start",
            "--format",
            "json",
        ]);
        let config = CountdownConfig::from_cli(&cli);

        assert_eq!(config.sound, SoundSource::file("alarm.wav"));
        assert_eq!(config.initial_input.as_deref(), Some("90"));
        assert!(config.auto_start);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_cli_tone_and_no_sound() {
        let cli = Cli::parse_from(["countdown", "--tone", "--no-sound"]);
        let config = CountdownConfig::from_cli(&cli);

        assert_eq!(config.sound, SoundSource::default_tone());
        assert!(!config.sound_enabled);
    }

    #[test]
    fn test_start_without_input() {
        let config = CountdownConfig {
            auto_start: true,
            ..CountdownConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::StartWithoutInput));
    }

    #[test]
    fn test_empty_sound_path() {
        let config = CountdownConfig {
            sound: SoundSource::file(""),
            ..CountdownConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySoundPath));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"sound":{"kind":"tone","frequency_hz":660,"duration_ms":300}}"#;
        let config: CountdownConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.sound, SoundSource::tone(660, 300));
        assert!(config.sound_enabled);
        assert!(!config.auto_start);
        assert_eq!(config.format, OutputFormat::Text);
    }
}
