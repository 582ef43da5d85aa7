//! Dispatching rules and rule engine for process selection.
//!
//! Every policy that chooses among several ready processes (SJF, SRTF,
//! Priority, and FCFS through the shared non-preemptive loop) expresses
//! its choice as a [`DispatchingRule`]. The [`RuleEngine`] applies the
//! primary rule followed by the canonical tie-break chain: lowest arrival
//! time, then insertion order.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, Job, RuleEngine};
//! use u_cpusched::models::Process;
//!
//! let processes = vec![Process::new("long", 9), Process::new("short", 2)];
//! let jobs = Job::from_processes(&processes);
//!
//! let engine = RuleEngine::canonical(rules::ShortestBurst);
//! assert_eq!(engine.select_best(&jobs, 0), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
mod job;
pub mod rules;

pub use engine::RuleEngine;
pub use job::Job;
pub(crate) use job::next_arrival;

use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first). Wide enough to hold
/// any tick count and any priority without loss.
pub type RuleScore = i128;

/// A dispatching rule that ranks ready jobs.
///
/// # Score Convention
/// **Lower score = dispatched first.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF", "SRTF").
    fn name(&self) -> &'static str;

    /// Scores a job; lower = higher priority.
    fn evaluate(&self, job: &Job<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
