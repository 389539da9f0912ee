//! Countdown engine.
//!
//! - `timer`: the `TimerEngine` state owner and its cooperative run loop
//! - `schedule`: the owned one-second tick source

pub mod schedule;
pub mod timer;

pub use schedule::{TickSchedule, TICK_PERIOD};
pub use timer::{TimerCommand, TimerEngine, TimerEvent};
