//! Display utilities for the countdown front-end.
//!
//! This module renders:
//! - The full timer panel (input, buttons, time left, progress bar)
//! - A compact progress line for ticks
//! - JSON views for machine consumers
//! - Help and error messages

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::types::{TimerStatus, TimerView};

/// Width of the progress bar in characters.
const PROGRESS_WIDTH: usize = 30;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for terminal output.
pub struct Display;

impl Display {
    /// Renders `view`, which replaced `previous`, in the requested format.
    ///
    /// In text mode a plain countdown step gets the compact progress line
    /// and every other change gets the full panel.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(previous: &TimerView, view: &TimerView, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Self::render_json(view),
            OutputFormat::Text if Self::is_countdown_step(previous, view) => {
                Ok(Self::render_progress_line(view))
            }
            OutputFormat::Text => Ok(Self::render_panel(view)),
        }
    }

    /// True if only the remaining time went down while running.
    fn is_countdown_step(previous: &TimerView, view: &TimerView) -> bool {
        previous.status == TimerStatus::Running
            && view.status == TimerStatus::Running
            && previous.duration_seconds == view.duration_seconds
            && view.remaining_seconds < previous.remaining_seconds
    }

    /// Renders the full panel.
    pub fn render_panel(view: &TimerView) -> String {
        let mut lines = Vec::new();

        let lock = if view.controls.input_disabled { " (locked)" } else { "" };
        lines.push(format!("Time (seconds): [{}]{}", view.input_text, lock));

        if let Some(error) = &view.error {
            lines.push(format!("! {}", error));
        }

        lines.push(format!(
            "{} {} {}",
            Self::button("Start", view.controls.start_disabled),
            Self::button(view.controls.pause_resume_label, view.controls.pause_resume_disabled),
            Self::button("Reset", view.controls.reset_disabled),
        ));

        lines.push(Self::render_progress_line(view));

        if view.status == TimerStatus::Finished {
            lines.push("Time's up!".to_string());
        }

        lines.join("\n")
    }

    /// Renders `"{remaining}s [####      ] 40%"`.
    pub fn render_progress_line(view: &TimerView) -> String {
        format!(
            "{:>5}s {} {:>3}%",
            view.remaining_seconds,
            Self::progress_bar(view.progress_percent),
            view.progress_percent
        )
    }

    /// Renders the view as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_json(view: &TimerView) -> Result<String> {
        serde_json::to_string(view).context("Failed to serialize timer view")
    }

    /// Shows the interactive command list.
    pub fn show_help() {
        println!("Commands:");
        println!("  <seconds>       type seconds and start");
        println!("  start [TEXT]    start (optionally with new input)");
        println!("  input [TEXT]    edit the seconds field");
        println!("  pause | resume  toggle pause/resume");
        println!("  reset           back to idle");
        println!("  quit            leave");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("error: {}", message);
    }

    /// Draws a button, bracketed when enabled and parenthesized when disabled.
    fn button(label: &str, disabled: bool) -> String {
        if disabled {
            format!("({})", label)
        } else {
            format!("[{}]", label)
        }
    }

    fn progress_bar(percent: u8) -> String {
        let filled = usize::from(percent.min(100)) * PROGRESS_WIDTH / 100;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            " ".repeat(PROGRESS_WIDTH - filled)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
