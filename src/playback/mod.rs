//! Tick-by-tick replay of a computed timeline.
//!
//! The [`PlaybackController`] never schedules anything itself. It walks a
//! [`Timeline`](crate::models::Timeline) one logical tick at a time and
//! derives, for that tick, which occupant held the CPU and the state of
//! every process.
//!
//! # State machine
//!
//! | From | Command | To |
//! |------|---------|----|
//! | IDLE / PAUSED | `start` | RUNNING |
//! | RUNNING | `pause` | PAUSED |
//! | IDLE / PAUSED | `step` | PAUSED (or FINISHED) |
//! | RUNNING | timer tick reaching makespan | FINISHED |
//! | any | `reset` | IDLE |
//!
//! Commands that do not apply to the current state are ignored and
//! reported as a [`PlaybackError`](crate::error::PlaybackError); the
//! controller is left untouched.
//!
//! # Timer
//!
//! The controller owns no timer. `start` returns a [`TimerEpoch`]; the
//! driver calls [`PlaybackController::tick`] with it at its own cadence.
//! Pausing, resetting, and finishing move to a new epoch, so ticks still
//! queued from an older run are discarded.

mod controller;
mod snapshot;

pub use controller::PlaybackController;
pub use snapshot::{ProcessSnapshot, TickSnapshot};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Controller state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlaybackState {
    /// Clock at zero, nothing replayed.
    #[default]
    Idle,
    /// Advancing on timer ticks.
    Running,
    /// Halted mid-replay; resumable.
    Paused,
    /// Clock reached the makespan.
    Finished,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "IDLE",
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Finished => "FINISHED",
        })
    }
}

/// Playback command that can be refused. Reset always applies, so it
/// has no variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Begin or resume replay.
    Start,
    /// Halt replay.
    Pause,
    /// Advance one tick manually.
    Step,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Step => "step",
        })
    }
}

/// Token identifying one run of the external tick timer.
///
/// Only ticks carrying the controller's current epoch are applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerEpoch(u64);

impl TimerEpoch {
    /// Raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for TimerEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(PlaybackState::Finished.to_string(), "FINISHED");
        assert_eq!(Command::Step.to_string(), "step");
        assert_eq!(
            serde_json::to_value(PlaybackState::Paused).unwrap(),
            "PAUSED"
        );
    }

    #[test]
    fn test_epoch_advances() {
        let e = TimerEpoch::default();
        assert_eq!(e.value(), 0);
        assert!(e.next() > e);
        assert_ne!(e.next(), e);
    }
}
