//! Per-tick observation records handed to the presentation layer.

use serde::{Deserialize, Serialize};

use super::PlaybackState;
use crate::models::{Occupant, ProcessState, Ticks};

/// State of one process at a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSnapshot {
    /// Process identifier.
    pub id: String,
    /// Derived state for this tick.
    pub state: ProcessState,
    /// Work left after this tick.
    pub remaining_time: Ticks,
}

/// Everything a renderer needs for one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSnapshot {
    /// Logical clock (ticks completed so far).
    pub clock: Ticks,
    /// Occupant of the unit `(clock - 1, clock]`; `IDLE` at clock 0.
    #[serde(rename = "runningOccupant")]
    pub running: Occupant,
    /// One entry per process, in input order.
    #[serde(rename = "processSnapshots")]
    pub processes: Vec<ProcessSnapshot>,
    /// Ids in the READY state, in input order.
    #[serde(rename = "readyQueueSnapshot")]
    pub ready_queue: Vec<String>,
    /// Controller state after this tick.
    pub playback: PlaybackState,
}

impl TickSnapshot {
    /// Snapshot of one process.
    pub fn process(&self, id: &str) -> Option<&ProcessSnapshot> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Number of processes in `state`.
    pub fn count_in(&self, state: ProcessState) -> usize {
        self.processes.iter().filter(|p| p.state == state).count()
    }

    /// Whether every process has finished.
    pub fn all_done(&self) -> bool {
        self.processes.iter().all(|p| p.state == ProcessState::Done)
    }
}
