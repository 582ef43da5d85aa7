//! Single-processor CPU scheduling engine with deterministic tick replay.
//!
//! Turns a process set into an execution timeline under one of five
//! classical policies, then replays that timeline one logical tick at a
//! time so an observer can watch process states evolve.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessMetrics`, `Timeline`,
//!   `TimelineBlock`, `Occupant`, `ProcessSet`
//! - **`validation`**: Input integrity checks (empty sets, duplicate IDs,
//!   zero bursts, tick-range overflow, quantum)
//! - **`dispatching`**: Selection rules and the tie-breaking rule engine
//! - **`scheduler`**: FCFS, SJF, SRTF, Priority, Round Robin and KPIs
//! - **`playback`**: start/pause/step/reset state machine over a timeline
//! - **`session`**: Caller-owned bundle of processes, config and replay
//! - **`config`**: Simulation settings with serde defaults
//! - **`workload`**: Seeded random process sets
//!
//! # Example
//!
//! ```
//! use u_cpusched::{Policy, ProcessSet, SimulationConfig, SimulationSession};
//!
//! let mut session = SimulationSession::new(ProcessSet::sample().into_vec())
//!     .with_config(SimulationConfig::new(Policy::Srtf));
//! let outcome = session.run_simulation().unwrap();
//! assert_eq!(outcome.makespan(), 21);
//!
//! let snap = session.step().unwrap();
//! assert_eq!(snap.clock, 1);
//! assert_eq!(snap.running.as_str(), "P1");
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod playback;
pub mod scheduler;
pub mod session;
pub mod validation;
pub mod workload;

pub use config::SimulationConfig;
pub use error::{PlaybackError, ScheduleError};
pub use models::{Occupant, Process, ProcessSet, ProcessState, Timeline, TimelineBlock};
pub use playback::{PlaybackController, PlaybackState, TickSnapshot, TimerEpoch};
pub use scheduler::{schedule, Policy, ScheduleOutcome, ScheduleRequest};
pub use session::SimulationSession;
