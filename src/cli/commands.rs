//! Command definitions for the countdown front-end.
//!
//! Process flags use clap derive. Interactive lines typed while the timer
//! runs are mapped onto [`TimerCommand`]s by [`parse_line`].

use std::path::PathBuf;

use clap::Parser;

use crate::config::OutputFormat;
use crate::engine::TimerCommand;
use crate::sound::DEFAULT_SOUND_PATH;

// ============================================================================
// CLI Structure
// ============================================================================

/// Countdown timer with pause/resume, a progress bar and an audible alert
#[derive(Parser, Debug)]
#[command(
    name = "countdown",
    version,
    about = "Countdown timer with pause/resume, a progress bar and an audible alert",
    long_about = "Countdown timer driven from the terminal.\n\
                  Type a number of seconds and press Enter to start. \
                  Type `help` for the list of commands.",
    propagate_version = true
)]
pub struct Cli {
    /// Audio file played when the countdown finishes
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SOUND_PATH)]
    pub sound: PathBuf,

    /// Play a generated beep instead of the audio file
    #[arg(long)]
    pub tone: bool,

    /// Disable the completion alert
    #[arg(long)]
    pub no_sound: bool,

    /// Initial content of the seconds field
    #[arg(short, long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub seconds: Option<String>,

    /// Start immediately from --seconds
    #[arg(long)]
    pub start: bool,

    /// Output format for the timer view
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,
}

// ============================================================================
// Interactive Lines
// ============================================================================

/// What a typed line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Forward to the timer engine
    Timer(TimerCommand),
    /// Show the command list
    Help,
    /// Leave the program
    Quit,
}

/// Maps one typed line to an action.
///
/// - `start [TEXT]` starts, optionally with new input
/// - `pause`, `resume`, `p` toggle pause/resume
/// - `reset`, `r` reset
/// - `input [TEXT]` edits the seconds field
/// - `help`, `?` and `quit`, `q`, `exit`
///
/// An empty line presses Start; anything else is typed into the field and
/// submitted, like pressing Enter in the input.
pub fn parse_line(line: &str) -> Action {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword.to_ascii_lowercase().as_str() {
        "" => Action::Timer(TimerCommand::Start(None)),
        "start" | "s" if rest.is_empty() => Action::Timer(TimerCommand::Start(None)),
        "start" | "s" => Action::Timer(TimerCommand::Start(Some(rest.to_string()))),
        "pause" | "resume" | "p" => Action::Timer(TimerCommand::PauseResume),
        "reset" | "r" => Action::Timer(TimerCommand::Reset),
        "input" | "i" => Action::Timer(TimerCommand::Input(rest.to_string())),
        "help" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        _ => Action::Timer(TimerCommand::Start(Some(line.to_string()))),
    }
}

// ============================================================================
// Tests
// ============================================================================
