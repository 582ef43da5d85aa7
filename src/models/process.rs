//! Process model.
//!
//! A process is one schedulable unit: it becomes eligible at its arrival
//! tick and needs `burst_time` ticks of CPU before it completes.
//!
//! The scheduler never mutates these values. Runtime bookkeeping
//! (remaining time, state) is owned by the playback controller, and
//! completion metrics are reported separately as [`ProcessMetrics`].

use serde::{Deserialize, Serialize};

/// Logical clock unit. One tick is the smallest slice of CPU time.
pub type Ticks = u64;

/// A process to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Unique process identifier.
    pub id: String,
    /// Tick at which the process becomes schedulable.
    pub arrival_time: Ticks,
    /// Total CPU time required (must be at least 1).
    pub burst_time: Ticks,
    /// Scheduling priority (lower value = higher priority).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(id: impl Into<String>, burst_time: Ticks) -> Self {
        Self {
            id: id.into(),
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival tick.
    pub fn with_arrival(mut self, arrival_time: Ticks) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the priority (lower = more important).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the process has arrived by tick `t`.
    #[inline]
    pub fn has_arrived(&self, t: Ticks) -> bool {
        self.arrival_time <= t
    }
}

/// Observable state of a process during playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessState {
    /// Not yet arrived (or playback not started).
    #[default]
    Waiting,
    /// Arrived with work left, not on the CPU this tick.
    Ready,
    /// Holding the CPU this tick.
    Running,
    /// No remaining work.
    Done,
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Waiting => "WAITING",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Completion metrics for one process after scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: String,
    /// Arrival tick (copied from the input).
    pub arrival_time: Ticks,
    /// Burst time (copied from the input).
    pub burst_time: Ticks,
    /// Priority (copied from the input).
    pub priority: i32,
    /// Tick at which the last unit of work finished.
    pub completion_time: Ticks,
    /// `completion_time - arrival_time`.
    pub turnaround_time: Ticks,
    /// `turnaround_time - burst_time`.
    pub waiting_time: Ticks,
}

impl ProcessMetrics {
    /// Derives turnaround and waiting time from a completion tick.
    ///
    /// A valid schedule never completes a process before
    /// `arrival_time + burst_time`; the subtractions saturate rather than
    /// wrap if handed an impossible completion.
    pub fn from_completion(process: &Process, completion_time: Ticks) -> Self {
        let turnaround_time = completion_time.saturating_sub(process.arrival_time);
        Self {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            priority: process.priority,
            completion_time,
            turnaround_time,
            waiting_time: turnaround_time.saturating_sub(process.burst_time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new("P1", 8).with_arrival(3).with_priority(2);
        assert_eq!(p.id, "P1");
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 8);
        assert_eq!(p.priority, 2);
        assert!(!p.has_arrived(2));
        assert!(p.has_arrived(3));
    }

    #[test]
    fn test_metrics_from_completion() {
        let p = Process::new("P2", 4).with_arrival(1);
        let m = ProcessMetrics::from_completion(&p, 12);
        assert_eq!(m.turnaround_time, 11);
        assert_eq!(m.waiting_time, 7);
        assert_eq!(m.turnaround_time, m.waiting_time + m.burst_time);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ProcessState::Waiting.to_string(), "WAITING");
        assert_eq!(ProcessState::Done.to_string(), "DONE");
        assert_eq!(ProcessState::default(), ProcessState::Waiting);
    }

    #[test]
    fn test_process_wire_names() {
        let json = serde_json::to_value(Process::new("P1", 5).with_arrival(2)).unwrap();
        assert_eq!(json["arrivalTime"], 2);
        assert_eq!(json["burstTime"], 5);
        assert_eq!(
            serde_json::to_value(ProcessState::Running).unwrap(),
            "RUNNING"
        );
    }
}
