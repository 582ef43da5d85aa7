//! Scheduler-side working copy of a process.

use crate::models::{Process, Ticks};

/// Mutable bookkeeping for one process while a schedule is computed.
///
/// Borrows the caller's [`Process`] read-only; only `remaining` and
/// `completion` change.
#[derive(Debug, Clone)]
pub struct Job<'a> {
    /// Position in the input (final tie-breaker).
    pub index: usize,
    /// The input process.
    pub process: &'a Process,
    /// Ticks of work left.
    pub remaining: Ticks,
    /// Completion tick, once finished.
    pub completion: Option<Ticks>,
}

impl<'a> Job<'a> {
    /// Creates one job per process, preserving input order.
    pub fn from_processes(processes: &'a [Process]) -> Vec<Self> {
        processes
            .iter()
            .enumerate()
            .map(|(index, process)| Self {
                index,
                process,
                remaining: process.burst_time,
                completion: None,
            })
            .collect()
    }

    /// Process identifier.
    #[inline]
    pub fn id(&self) -> &'a str {
        &self.process.id
    }

    /// Arrival tick.
    #[inline]
    pub fn arrival(&self) -> Ticks {
        self.process.arrival_time
    }

    /// Whether the job has completed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.completion.is_some()
    }

    /// Arrived by `clock` and not yet completed.
    #[inline]
    pub fn is_ready_at(&self, clock: Ticks) -> bool {
        !self.is_done() && self.process.has_arrived(clock)
    }

    /// Runs the job for up to `ticks`, ending at `end`.
    ///
    /// Returns the ticks actually consumed. Records `end` as the completion
    /// time when the remaining work reaches zero.
    pub fn execute(&mut self, ticks: Ticks, end: Ticks) -> Ticks {
        let run = ticks.min(self.remaining);
        self.remaining -= run;
        if self.remaining == 0 {
            self.completion = Some(end);
        }
        run
    }
}

/// Earliest arrival among jobs that have not completed.
pub(crate) fn next_arrival(jobs: &[Job<'_>]) -> Option<Ticks> {
    jobs.iter()
        .filter(|j| !j.is_done())
        .map(|j| j.arrival())
        .min()
}
