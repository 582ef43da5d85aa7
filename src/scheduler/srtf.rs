//! Shortest Remaining Time First (preemptive).
//!
//! The clock advances one tick at a time. Each tick goes to the ready job
//! with the least remaining work, so a newly arrived shorter job wins the
//! very next tick. Consecutive ticks for the same occupant (including
//! idle) are coalesced into one block.

use tracing::debug;

use crate::dispatching::{next_arrival, Job, RuleEngine};
use crate::models::{Occupant, Ticks, Timeline};

pub(super) fn run(jobs: &mut [Job<'_>], engine: &RuleEngine) -> Timeline {
    let mut timeline = Timeline::new();
    let mut clock: Ticks = 0;
    let mut current: Option<usize> = None;

    loop {
        match engine.select_best(jobs, clock) {
            Some(best) => {
                if let Some(prev) = current.filter(|&prev| prev != best && !jobs[prev].is_done()) {
                    debug!(
                        preempted = jobs[prev].id(),
                        by = jobs[best].id(),
                        at = clock,
                        "preempt"
                    );
                }
                current = Some(best);

                let job = &mut jobs[best];
                job.execute(1, clock + 1);
                timeline.extend_or_push(Occupant::process(job.id()), 1);
                clock += 1;
                if job.is_done() {
                    debug!(process = job.id(), completion = clock, "complete");
                }
            }
            None => match next_arrival(jobs) {
                Some(next) => {
                    // Idle ticks until the next arrival, coalesced in one step.
                    debug!(start = clock, end = next, "idle");
                    timeline.extend_or_push(Occupant::Idle, next - clock);
                    clock = next;
                    current = None;
                }
                None => break,
            },
        }
    }

    timeline
}
