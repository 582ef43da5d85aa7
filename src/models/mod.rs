//! CPU scheduling domain models.
//!
//! Provides the core data types for representing a scheduling problem
//! (a set of processes) and its solution (a timeline of CPU allocations
//! with per-process completion metrics).
//!
//! | Type | Role |
//! |------|------|
//! | `Process` | Schedulable unit: arrival, burst, priority |
//! | `ProcessSet` | Id-unique, insertion-ordered input collection |
//! | `ProcessMetrics` | Completion, turnaround and waiting time |
//! | `TimelineBlock` | One contiguous `[start, end)` CPU allocation |
//! | `Timeline` | Ordered, gap-free sequence of blocks |

mod process;
mod process_set;
mod timeline;

pub use process::{Process, ProcessMetrics, ProcessState, Ticks};
pub use process_set::{ProcessSet, DEFAULT_ARRIVAL, DEFAULT_BURST, DEFAULT_PRIORITY};
pub use timeline::{Occupant, Timeline, TimelineBlock, IDLE};
