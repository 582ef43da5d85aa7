//! Built-in dispatching rules.
//!
//! | Rule | Policy | Score |
//! |------|--------|-------|
//! | `FirstCome` | FCFS | arrival time |
//! | `ShortestBurst` | SJF | burst time |
//! | `ShortestRemaining` | SRTF | remaining time |
//! | `HighestPriority` | Priority | priority value |
//!
//! # Score Convention
//! All rules return lower scores for jobs that should run first.

use super::{DispatchingRule, Job, RuleScore};

/// First Come, First Served.
///
/// Prioritizes the job that arrived earliest.
#[derive(Debug, Clone, Copy)]
pub struct FirstCome;

impl DispatchingRule for FirstCome {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, job: &Job<'_>) -> RuleScore {
        to_score(job.arrival())
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Shortest Job First.
///
/// Prioritizes the job with the smallest total burst time.
/// Minimizes mean waiting time among non-preemptive policies.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, job: &Job<'_>) -> RuleScore {
        to_score(job.process.burst_time)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest Remaining Time First.
///
/// Prioritizes the job closest to completion.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, job: &Job<'_>) -> RuleScore {
        to_score(job.remaining)
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Priority scheduling (lower value = more important).
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, job: &Job<'_>) -> RuleScore {
        RuleScore::from(job.process.priority)
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest value) First"
    }
}

#[inline]
fn to_score(ticks: u64) -> RuleScore {
    RuleScore::from(ticks)
}
