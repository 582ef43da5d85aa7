//! Round Robin with a fixed time quantum.
//!
//! # Algorithm
//!
//! A FIFO ready queue plus a cursor over arrival-sorted jobs.
//!
//! 1. Admit every job whose arrival has been reached (arrival order,
//!    input order on ties).
//! 2. If the queue is empty, idle until the next arrival and admit.
//! 3. Otherwise run the head for `min(quantum, remaining)` ticks.
//! 4. Admit jobs that arrived during that slice **before** re-queueing the
//!    slice's job, so new arrivals are served ahead of the incumbent.
//!
//! One block is emitted per slice; consecutive slices of the same job are
//! not merged.

use std::collections::VecDeque;
use std::iter::Peekable;
use std::num::NonZeroU64;
use std::vec::IntoIter;

use tracing::debug;

use crate::dispatching::Job;
use crate::models::{Occupant, Ticks, Timeline};

pub(super) fn run(jobs: &mut [Job<'_>], quantum: NonZeroU64) -> Timeline {
    let quantum = quantum.get();
    let mut timeline = Timeline::new();
    let mut clock: Ticks = 0;

    let mut by_arrival: Vec<usize> = (0..jobs.len()).collect();
    by_arrival.sort_by_key(|&i| jobs[i].arrival());
    let mut pending = by_arrival.into_iter().peekable();
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(jobs.len());

    admit(&mut pending, jobs, clock, &mut queue);

    loop {
        let Some(head) = queue.pop_front() else {
            let Some(&next) = pending.peek() else {
                break;
            };
            let next_arrival = jobs[next].arrival();
            debug!(start = clock, end = next_arrival, "idle");
            timeline.push(Occupant::Idle, next_arrival - clock);
            clock = next_arrival;
            admit(&mut pending, jobs, clock, &mut queue);
            continue;
        };

        let job = &mut jobs[head];
        let slice = quantum.min(job.remaining);
        let end = clock + slice;
        job.execute(slice, end);
        timeline.push(Occupant::process(job.id()), slice);
        debug!(
            process = job.id(),
            start = clock,
            end,
            remaining = job.remaining,
            "slice"
        );
        clock = end;

        admit(&mut pending, jobs, clock, &mut queue);
        if !jobs[head].is_done() {
            queue.push_back(head);
        }
    }

    timeline
}

/// Moves every job that has arrived by `clock` from `pending` to the queue.
fn admit(
    pending: &mut Peekable<IntoIter<usize>>,
    jobs: &[Job<'_>],
    clock: Ticks,
    queue: &mut VecDeque<usize>,
) {
    while let Some(i) = pending.next_if(|&i| jobs[i].arrival() <= clock) {
        queue.push_back(i);
    }
}
