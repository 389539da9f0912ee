//! Countdown Timer Library
//!
//! This library provides the core functionality for the countdown timer.
//! It includes:
//! - Timer engine with pause/resume and a single owned tick schedule
//! - Type definitions for the timer state machine and its rendered view
//! - Sound notification on completion (best-effort)
//! - Terminal presentation layer and configuration

pub mod cli;
pub mod config;
pub mod engine;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, CountdownConfig, OutputFormat};
pub use engine::{TickSchedule, TimerCommand, TimerEngine, TimerEvent, TICK_PERIOD};
pub use sound::{
    create_notifier, MockSoundNotifier, RodioNotifier, SilentNotifier, SoundError, SoundNotifier,
    SoundSource,
};
pub use types::{sanitize_seconds, Controls, TimerState, TimerStatus, TimerView, ValidationError};
