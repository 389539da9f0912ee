//! Timer engine for the countdown.
//!
//! This module provides the core timer functionality:
//! - State transitions (Idle → Running ⇄ Paused → Finished)
//! - Countdown driven by a single owned tick schedule
//! - Completion alert through the sound notifier
//! - Event firing and view publishing for the presentation layer

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

use super::schedule::{TickSchedule, TICK_PERIOD};
use crate::sound::SoundNotifier;
use crate::types::{PauseResumeOutcome, StartOutcome, TickOutcome, TimerState, TimerView};

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for the presentation layer and other observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started
    Started {
        /// Committed duration in seconds
        duration: u32,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining: u32,
    },
    /// Countdown paused
    Paused {
        /// Remaining seconds
        remaining: u32,
    },
    /// Countdown resumed
    Resumed {
        /// Remaining seconds
        remaining: u32,
    },
    /// Countdown reached zero
    Finished,
    /// Timer returned to Idle
    Reset,
    /// The input text was edited
    InputChanged {
        /// New input text
        text: String,
    },
    /// Start was refused because of the input
    InputRejected {
        /// User-facing message
        message: String,
    },
}

// ============================================================================
// TimerCommand
// ============================================================================

/// User actions accepted by [`TimerEngine::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerCommand {
    /// The input text changed
    Input(String),
    /// Start, optionally replacing the input text first
    Start(Option<String>),
    /// Toggle pause/resume
    PauseResume,
    /// Back to Idle
    Reset,
    /// Tear the engine down and leave the run loop
    Unmount,
}

/// What woke the run loop.
enum Wake {
    Command(Option<TimerCommand>),
    Tick,
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Timer engine that owns the countdown state, its tick schedule and the
/// sound notifier.
pub struct TimerEngine {
    /// Current timer state
    state: TimerState,
    /// The single live tick source, if running
    ticks: Option<TickSchedule>,
    /// Completion alert
    notifier: Box<dyn SoundNotifier>,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
    /// Latest view for rendering
    view_tx: watch::Sender<TimerView>,
}

impl TimerEngine {
    /// Creates a new TimerEngine in Idle with the given notifier and event channel.
    pub fn new(
        notifier: Box<dyn SoundNotifier>,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Self {
        let state = TimerState::new();
        let (view_tx, _) = watch::channel(state.view());
        Self {
            state,
            ticks: None,
            notifier,
            event_tx,
            view_tx,
        }
    }

    /// Subscribes to view snapshots, published after every change.
    pub fn subscribe(&self) -> watch::Receiver<TimerView> {
        self.view_tx.subscribe()
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a fresh view of the current state.
    pub fn view(&self) -> TimerView {
        self.state.view()
    }

    /// Returns true if a tick schedule is live.
    pub fn has_tick_source(&self) -> bool {
        self.ticks.is_some()
    }

    /// Replaces the input text. Ignored while running.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn on_input_change(&mut self, text: impl Into<String>) -> Result<()> {
        if !self.state.set_input(text) {
            debug!("Input ignored while running");
            return Ok(());
        }
        self.publish();
        self.event_tx
            .send(TimerEvent::InputChanged {
                text: self.state.input_text().to_string(),
            })
            .context("Failed to send input changed event")
    }

    /// Sets the input text to `text` and starts the countdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn start(&mut self, text: &str) -> Result<()> {
        self.state.set_input(text);
        self.start_current()
    }

    /// Starts the countdown from the current input text.
    ///
    /// Does nothing while running. Invalid input records a validation error
    /// and leaves the countdown untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn start_current(&mut self) -> Result<()> {
        match self.state.start() {
            StartOutcome::AlreadyRunning => {
                debug!("Start ignored: already running");
                Ok(())
            }
            StartOutcome::Rejected(e) => {
                debug!("Start rejected: {:?}", self.state.input_text());
                self.publish();
                self.event_tx
                    .send(TimerEvent::InputRejected {
                        message: e.message().to_string(),
                    })
                    .context("Failed to send input rejected event")
            }
            StartOutcome::Completed => {
                self.cancel_ticks();
                info!("Zero-second countdown finished immediately");
                self.publish();
                self.ring();
                self.event_tx
                    .send(TimerEvent::Finished)
                    .context("Failed to send finished event")
            }
            StartOutcome::Started { duration } => {
                self.schedule_ticks();
                info!(duration, "Countdown started");
                self.publish();
                self.event_tx
                    .send(TimerEvent::Started { duration })
                    .context("Failed to send started event")
            }
        }
    }

    /// Handles one tick of the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn on_tick(&mut self) -> Result<()> {
        if self.state.status().is_running() && self.state.remaining() <= 1 {
            self.cancel_ticks();
        }

        match self.state.tick() {
            TickOutcome::Ignored => Ok(()),
            TickOutcome::Counting { remaining } => {
                self.publish();
                self.event_tx
                    .send(TimerEvent::Tick { remaining })
                    .context("Failed to send tick event")
            }
            TickOutcome::Completed => {
                info!("Countdown finished");
                self.publish();
                self.ring();
                self.event_tx
                    .send(TimerEvent::Tick { remaining: 0 })
                    .context("Failed to send tick event")?;
                self.event_tx
                    .send(TimerEvent::Finished)
                    .context("Failed to send finished event")
            }
        }
    }

    /// Pauses a running countdown or resumes a paused one.
    ///
    /// Resuming starts a fresh one-second phase.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn pause_resume(&mut self) -> Result<()> {
        if self.state.status().is_running() {
            self.cancel_ticks();
        }

        match self.state.pause_resume() {
            PauseResumeOutcome::Paused { remaining } => {
                debug!(remaining, "Countdown paused");
                self.publish();
                self.event_tx
                    .send(TimerEvent::Paused { remaining })
                    .context("Failed to send paused event")
            }
            PauseResumeOutcome::Resumed { remaining } => {
                self.schedule_ticks();
                debug!(remaining, "Countdown resumed");
                self.publish();
                self.event_tx
                    .send(TimerEvent::Resumed { remaining })
                    .context("Failed to send resumed event")
            }
            PauseResumeOutcome::Ignored => {
                debug!("Pause/resume ignored in {} state", self.state.status());
                Ok(())
            }
        }
    }

    /// Returns to Idle from any state and silences the alert.
    ///
    /// Stopping the alert is best-effort: a notifier failure is discarded
    /// and the reset still completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn reset(&mut self) -> Result<()> {
        self.cancel_ticks();
        self.state.reset();
        let _ = self.notifier.stop_and_rewind();
        debug!("Timer reset");
        self.publish();
        self.event_tx
            .send(TimerEvent::Reset)
            .context("Failed to send reset event")
    }

    /// Cancels the tick schedule unconditionally.
    ///
    /// Nothing mutates the state after this unless a new command arrives.
    pub fn unmount(&mut self) {
        self.cancel_ticks();
        debug!("Timer unmounted");
    }

    /// Waits for the next tick of the live schedule.
    ///
    /// Never completes while no schedule is live.
    pub async fn next_tick(&mut self) {
        match self.ticks.as_mut() {
            Some(ticks) => ticks.tick().await,
            None => std::future::pending().await,
        }
    }

    /// Applies one command.
    ///
    /// Returns false once the engine has been unmounted.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub fn handle(&mut self, command: TimerCommand) -> Result<bool> {
        match command {
            TimerCommand::Input(text) => self.on_input_change(text)?,
            TimerCommand::Start(Some(text)) => self.start(&text)?,
            TimerCommand::Start(None) => self.start_current()?,
            TimerCommand::PauseResume => self.pause_resume()?,
            TimerCommand::Reset => self.reset()?,
            TimerCommand::Unmount => {
                self.unmount();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Runs the cooperative loop.
    ///
    /// Commands and ticks are handled one at a time, each to completion.
    /// A command that is ready together with a tick goes first. The loop
    /// ends, tearing the engine down, on `Unmount` or when the command
    /// channel closes.
    ///
    /// # Errors
    ///
    /// Returns an error if the event channel is closed.
    pub async fn run(&mut self, commands: &mut mpsc::UnboundedReceiver<TimerCommand>) -> Result<()> {
        loop {
            let wake = tokio::select! {
                biased;
                command = commands.recv() => Wake::Command(command),
                _ = self.next_tick() => Wake::Tick,
            };

            match wake {
                Wake::Command(Some(command)) => {
                    if !self.handle(command)? {
                        return Ok(());
                    }
                }
                Wake::Command(None) => {
                    self.unmount();
                    return Ok(());
                }
                Wake::Tick => self.on_tick()?,
            }
        }
    }

    /// Replaces any live schedule with a fresh one.
    fn schedule_ticks(&mut self) {
        self.cancel_ticks();
        self.ticks = Some(TickSchedule::start(TICK_PERIOD));
    }

    fn cancel_ticks(&mut self) {
        if let Some(ticks) = self.ticks.take() {
            ticks.cancel();
        }
    }

    /// Plays the completion alert. Failures are absorbed.
    fn ring(&self) {
        let _ = self.notifier.rewind_and_play();
    }

    fn publish(&self) {
        self.view_tx.send_replace(self.state.view());
    }
}

impl Drop for TimerEngine {
    fn drop(&mut self) {
        self.cancel_ticks();
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.state)
            .field("ticking", &self.ticks.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
