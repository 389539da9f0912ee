//! Core data types for the countdown timer.
//!
//! This module defines:
//! - The timer status and its transition table
//! - Input sanitization
//! - The derived view consumed by the presentation layer

mod input;

pub use input::{sanitize_seconds, ValidationError, INVALID_SECONDS_MESSAGE};

use serde::{Deserialize, Serialize};

// ============================================================================
// TimerStatus
// ============================================================================

/// Represents the current status of the timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerStatus {
    /// Nothing started yet, or reset
    #[default]
    Idle,
    /// Counting down
    Running,
    /// Countdown suspended with time remaining
    Paused,
    /// Countdown reached zero
    Finished,
}

impl TimerStatus {
    /// Returns the string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Finished => "finished",
        }
    }

    /// Returns true if the countdown is live.
    pub fn is_running(&self) -> bool {
        matches!(self, TimerStatus::Running)
    }
}

impl std::fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Transition outcomes
// ============================================================================

/// Result of a start request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    /// The timer was already running; nothing changed.
    AlreadyRunning,
    /// The input failed sanitization; the error is recorded in the state.
    Rejected(ValidationError),
    /// A zero-second countdown finished immediately.
    Completed,
    /// The countdown is running and needs a tick source.
    Started {
        /// Committed duration in seconds
        duration: u32,
    },
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed.
    Ignored,
    /// One second was taken off the clock.
    Counting {
        /// Seconds left after this tick
        remaining: u32,
    },
    /// The countdown reached zero.
    Completed,
}

/// Result of a pause/resume toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseResumeOutcome {
    /// Running → Paused.
    Paused {
        /// Seconds preserved across the pause
        remaining: u32,
    },
    /// Paused → Running; a fresh tick source is needed.
    Resumed {
        /// Seconds left when resuming
        remaining: u32,
    },
    /// Idle or Finished; nothing changed.
    Ignored,
}

// ============================================================================
// TimerState
// ============================================================================

/// The timer's state machine.
///
/// All fields are private so that `0 <= remaining <= duration` holds in every
/// reachable state. Transitions report what happened so the caller can
/// schedule or cancel ticks and drive the sound notifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    input_text: String,
    status: TimerStatus,
    duration: u32,
    remaining: u32,
    error: Option<ValidationError>,
}

impl TimerState {
    /// Creates a new state in Idle with empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the raw input text.
    ///
    /// Returns false (and leaves the text alone) while running, since the
    /// input field is disabled then.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.status.is_running() {
            return false;
        }
        self.input_text = text.into();
        true
    }

    /// Commits the current input text and starts the countdown.
    pub fn start(&mut self) -> StartOutcome {
        if self.status.is_running() {
            return StartOutcome::AlreadyRunning;
        }
        self.error = None;

        let seconds = match sanitize_seconds(&self.input_text) {
            Ok(seconds) => seconds,
            Err(e) => {
                self.error = Some(e.clone());
                return StartOutcome::Rejected(e);
            }
        };

        self.duration = seconds;
        self.remaining = seconds;
        if seconds == 0 {
            self.status = TimerStatus::Finished;
            StartOutcome::Completed
        } else {
            self.status = TimerStatus::Running;
            StartOutcome::Started { duration: seconds }
        }
    }

    /// Advances the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.status.is_running() {
            return TickOutcome::Ignored;
        }
        if self.remaining <= 1 {
            self.remaining = 0;
            self.status = TimerStatus::Finished;
            return TickOutcome::Completed;
        }
        self.remaining -= 1;
        TickOutcome::Counting {
            remaining: self.remaining,
        }
    }

    /// Toggles between Running and Paused.
    pub fn pause_resume(&mut self) -> PauseResumeOutcome {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                PauseResumeOutcome::Paused {
                    remaining: self.remaining,
                }
            }
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                PauseResumeOutcome::Resumed {
                    remaining: self.remaining,
                }
            }
            TimerStatus::Idle | TimerStatus::Finished => PauseResumeOutcome::Ignored,
        }
    }

    /// Returns to the initial Idle state, clearing every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Raw input text.
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Current status.
    pub fn status(&self) -> TimerStatus {
        self.status
    }

    /// Committed duration in seconds.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Seconds left on the clock.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Validation error from the last start attempt, if any.
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// True if the input sanitizes and the timer is not running.
    pub fn can_start(&self) -> bool {
        sanitize_seconds(&self.input_text).is_ok() && !self.status.is_running()
    }

    /// Remaining time as a rounded percentage of the duration.
    ///
    /// Always 0 when the duration is 0. Halves round up.
    pub fn progress_percent(&self) -> u8 {
        if self.duration == 0 {
            return 0;
        }
        let remaining = u64::from(self.remaining);
        let duration = u64::from(self.duration);
        let percent = (200 * remaining + duration) / (2 * duration);
        percent.min(100) as u8
    }

    /// Enablement of the input field and the buttons.
    pub fn controls(&self) -> Controls {
        let status = self.status;
        Controls {
            input_disabled: status.is_running(),
            start_disabled: !self.can_start(),
            pause_resume_disabled: matches!(status, TimerStatus::Idle | TimerStatus::Finished)
                || self.remaining == 0,
            pause_resume_label: if status.is_running() { "Pause" } else { "Resume" },
            reset_disabled: status == TimerStatus::Idle && self.input_text.is_empty(),
        }
    }

    /// Builds a snapshot for rendering.
    pub fn view(&self) -> TimerView {
        TimerView {
            input_text: self.input_text.clone(),
            status: self.status,
            remaining_seconds: self.remaining,
            duration_seconds: self.duration,
            error: self.error.as_ref().map(|e| e.message().to_string()),
            can_start: self.can_start(),
            progress_percent: self.progress_percent(),
            controls: self.controls(),
        }
    }
}

// ============================================================================
// View
// ============================================================================

/// Enablement of the presentation controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Controls {
    /// The seconds input cannot be edited
    pub input_disabled: bool,
    /// The Start button cannot be pressed
    pub start_disabled: bool,
    /// The Pause/Resume button cannot be pressed
    pub pause_resume_disabled: bool,
    /// "Pause" while running, "Resume" otherwise
    pub pause_resume_label: &'static str,
    /// The Reset button cannot be pressed
    pub reset_disabled: bool,
}

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerView {
    /// Raw input text
    pub input_text: String,
    /// Current status
    pub status: TimerStatus,
    /// Seconds left
    pub remaining_seconds: u32,
    /// Committed duration
    pub duration_seconds: u32,
    /// Validation message, if the last start was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether Start would be accepted
    pub can_start: bool,
    /// Remaining time as a percentage of the duration
    pub progress_percent: u8,
    /// Control enablement
    pub controls: Controls,
}

impl Default for TimerView {
    fn default() -> Self {
        TimerState::default().view()
    }
}

// ============================================================================
// Tests
// ============================================================================
