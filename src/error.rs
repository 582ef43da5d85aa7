//! Error types for scheduling and playback.

use thiserror::Error;

use crate::playback::{Command, PlaybackState};
use crate::validation::ValidationError;

/// Errors from computing a schedule.
///
/// A failed `schedule` call produces nothing: there is no partial timeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Empty input, duplicate IDs, zero bursts or a bad quantum.
    #[error("invalid process set: {}", join_messages(.0))]
    InvalidProcessSet(Vec<ValidationError>),
}

impl ScheduleError {
    /// The individual validation problems.
    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidProcessSet(errors) => errors,
        }
    }
}

/// A playback command that was ignored.
///
/// Returning one of these never changes controller state; callers may
/// surface it or drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// `start` or `step` before any timeline was loaded.
    #[error("no timeline available; run the scheduler first")]
    NoTimelineAvailable,
    /// The command is not valid in the current state.
    #[error("`{command}` ignored while playback is {state}")]
    Misuse {
        /// The rejected command.
        command: Command,
        /// State at the time of the command.
        state: PlaybackState,
    },
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
