//! Shared run-to-completion loop for FCFS, SJF and Priority.
//!
//! # Algorithm
//!
//! 1. Collect jobs that have arrived and are not done.
//! 2. If none, emit an idle block up to the earliest pending arrival.
//! 3. Otherwise dispatch the rule engine's best job for its whole burst.
//!
//! With the FCFS rule the choice degenerates to arrival order, which is
//! the same as pre-sorting by arrival (stable on input order).
//!
//! # Complexity
//! O(n²): n dispatch decisions, each scanning every job.

use tracing::debug;

use crate::dispatching::{next_arrival, Job, RuleEngine};
use crate::models::{Occupant, Timeline};

pub(super) fn run(jobs: &mut [Job<'_>], engine: &RuleEngine) -> Timeline {
    let mut timeline = Timeline::new();
    let mut clock = 0;

    loop {
        if let Some(best) = engine.select_best(jobs, clock) {
            let job = &mut jobs[best];
            let burst = job.remaining;
            let end = clock + burst;
            debug!(process = job.id(), start = clock, end, "dispatch");

            job.execute(burst, end);
            timeline.push(Occupant::process(job.id()), burst);
            clock = end;
            continue;
        }

        match next_arrival(jobs) {
            Some(next) => {
                debug!(start = clock, end = next, "idle");
                timeline.push(Occupant::Idle, next - clock);
                clock = next;
            }
            None => break,
        }
    }

    timeline
}
