//! Playback finite-state machine and per-tick state derivation.

use tracing::{debug, info};

use super::{Command, PlaybackState, ProcessSnapshot, TickSnapshot, TimerEpoch};
use crate::error::PlaybackError;
use crate::models::{Occupant, Process, ProcessState, Ticks, Timeline};

/// Replay-side view of one process.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProcessRuntime {
    id: String,
    arrival_time: Ticks,
    burst_time: Ticks,
    remaining_time: Ticks,
    state: ProcessState,
}

impl ProcessRuntime {
    fn new(process: &Process) -> Self {
        Self {
            id: process.id.clone(),
            arrival_time: process.arrival_time,
            burst_time: process.burst_time,
            remaining_time: process.burst_time,
            state: ProcessState::Waiting,
        }
    }

    fn restore(&mut self) {
        self.remaining_time = self.burst_time;
        self.state = ProcessState::Waiting;
    }
}

/// Replays a [`Timeline`] one logical tick at a time.
///
/// Every mutating method runs to completion before returning, so a
/// command can never observe a half-derived tick.
///
/// # Example
///
/// ```
/// use u_cpusched::models::{Process, ProcessState};
/// use u_cpusched::playback::{PlaybackController, PlaybackState};
/// use u_cpusched::scheduler::{schedule, Policy};
///
/// let processes = vec![Process::new("A", 2), Process::new("B", 1).with_arrival(1)];
/// let outcome = schedule(&processes, Policy::Fcfs, None).unwrap();
///
/// let mut playback = PlaybackController::new(&processes);
/// playback.load_timeline(outcome.timeline);
///
/// let snap = playback.step().unwrap();
/// assert_eq!(snap.clock, 1);
/// assert_eq!(snap.process("B").unwrap().state, ProcessState::Ready);
///
/// let epoch = playback.start().unwrap();
/// while playback.tick(epoch).is_some() {}
/// assert_eq!(playback.state(), PlaybackState::Finished);
/// assert_eq!(playback.clock(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PlaybackController {
    state: PlaybackState,
    clock: Ticks,
    timeline: Option<Timeline>,
    processes: Vec<ProcessRuntime>,
    ready: Vec<String>,
    running: Occupant,
    epoch: TimerEpoch,
}

impl PlaybackController {
    /// Creates an idle controller with no timeline.
    pub fn new(processes: &[Process]) -> Self {
        Self {
            state: PlaybackState::Idle,
            clock: 0,
            timeline: None,
            processes: processes.iter().map(ProcessRuntime::new).collect(),
            ready: Vec::new(),
            running: Occupant::Idle,
            epoch: TimerEpoch::default(),
        }
    }

    /// Installs a timeline and resets playback to tick zero.
    ///
    /// An empty timeline counts as no timeline.
    pub fn load_timeline(&mut self, timeline: Timeline) {
        debug!(
            blocks = timeline.len(),
            makespan = timeline.makespan(),
            "timeline loaded"
        );
        self.timeline = (!timeline.is_empty()).then_some(timeline);
        self.reset();
    }

    /// Drops the timeline and resets playback.
    pub fn clear_timeline(&mut self) {
        self.timeline = None;
        self.reset();
    }

    /// Replaces the tracked processes, drops the timeline and resets.
    pub fn set_processes(&mut self, processes: &[Process]) {
        self.processes = processes.iter().map(ProcessRuntime::new).collect();
        self.clear_timeline();
    }

    /// Begins or resumes timer-driven replay.
    ///
    /// Returns the epoch the timer must pass to [`tick`](Self::tick).
    pub fn start(&mut self) -> Result<TimerEpoch, PlaybackError> {
        match self.state {
            PlaybackState::Running | PlaybackState::Finished => {
                Err(self.ignored(Command::Start))
            }
            PlaybackState::Idle | PlaybackState::Paused => {
                if self.timeline.is_none() {
                    debug!("start ignored: no timeline");
                    return Err(PlaybackError::NoTimelineAvailable);
                }
                self.state = PlaybackState::Running;
                debug!(clock = self.clock, epoch = %self.epoch, "playback started");
                Ok(self.epoch)
            }
        }
    }

    /// Halts timer-driven replay, cancelling pending ticks.
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Running {
            return Err(self.ignored(Command::Pause));
        }
        self.state = PlaybackState::Paused;
        self.epoch = self.epoch.next();
        debug!(clock = self.clock, "playback paused");
        Ok(())
    }

    /// Advances exactly one tick by hand.
    ///
    /// Leaves the controller PAUSED, or FINISHED if the tick reached the
    /// makespan. Stepping a finished replay is a no-op that returns the
    /// current snapshot.
    pub fn step(&mut self) -> Result<TickSnapshot, PlaybackError> {
        if self.state == PlaybackState::Running {
            return Err(self.ignored(Command::Step));
        }
        if self.timeline.is_none() {
            debug!("step ignored: no timeline");
            return Err(PlaybackError::NoTimelineAvailable);
        }
        if self.state != PlaybackState::Finished {
            self.state = PlaybackState::Paused;
            self.advance();
        }
        Ok(self.snapshot())
    }

    /// Returns to tick zero, keeping the timeline.
    ///
    /// Restores every process and cancels pending ticks. Calling it twice
    /// is the same as calling it once.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.clock = 0;
        self.running = Occupant::Idle;
        self.ready.clear();
        for p in &mut self.processes {
            p.restore();
        }
        self.epoch = self.epoch.next();
        debug!(epoch = %self.epoch, "playback reset");
    }

    /// Applies one timer tick.
    ///
    /// Ignored (returns `None`) unless the controller is RUNNING and
    /// `epoch` is current.
    pub fn tick(&mut self, epoch: TimerEpoch) -> Option<TickSnapshot> {
        if epoch != self.epoch || self.state != PlaybackState::Running {
            debug!(
                tick_epoch = %epoch,
                current = %self.epoch,
                state = %self.state,
                "stale tick ignored"
            );
            return None;
        }
        self.advance();
        Some(self.snapshot())
    }

    /// Current observable state.
    pub fn snapshot(&self) -> TickSnapshot {
        TickSnapshot {
            clock: self.clock,
            running: self.running.clone(),
            processes: self
                .processes
                .iter()
                .map(|p| ProcessSnapshot {
                    id: p.id.clone(),
                    state: p.state,
                    remaining_time: p.remaining_time,
                })
                .collect(),
            ready_queue: self.ready.clone(),
            playback: self.state,
        }
    }

    /// Controller state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Logical clock.
    pub fn clock(&self) -> Ticks {
        self.clock
    }

    /// Current timer epoch.
    pub fn epoch(&self) -> TimerEpoch {
        self.epoch
    }

    /// Loaded timeline, if any.
    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    /// Whether `start`/`step` have something to replay.
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    /// Makespan of the loaded timeline.
    pub fn makespan(&self) -> Option<Ticks> {
        self.timeline.as_ref().map(Timeline::makespan)
    }

    /// One tick: advance the clock, derive states, finish at the makespan.
    fn advance(&mut self) {
        let Some(makespan) = self.makespan() else {
            return;
        };
        if self.clock >= makespan {
            self.finish();
            return;
        }

        self.clock += 1;
        self.running = self
            .timeline
            .as_ref()
            .map_or(Occupant::Idle, |t| t.occupant_at(self.clock));
        self.derive_states();

        if self.clock >= makespan {
            self.finish();
        }
    }

    /// Recomputes every process state for the current clock.
    fn derive_states(&mut self) {
        let t = self.clock;
        self.ready.clear();
        for p in &mut self.processes {
            p.state = if p.arrival_time > t {
                ProcessState::Waiting
            } else if self.running.is(&p.id) {
                p.remaining_time = p.remaining_time.saturating_sub(1);
                ProcessState::Running
            } else if p.remaining_time == 0 {
                ProcessState::Done
            } else {
                self.ready.push(p.id.clone());
                ProcessState::Ready
            };
        }
        debug!(
            clock = t,
            running = %self.running,
            ready = self.ready.len(),
            "tick"
        );
    }

    /// Terminal assignment: everything done, pending ticks cancelled.
    fn finish(&mut self) {
        for p in &mut self.processes {
            p.remaining_time = 0;
            p.state = ProcessState::Done;
        }
        self.ready.clear();
        self.state = PlaybackState::Finished;
        self.epoch = self.epoch.next();
        info!(clock = self.clock, "playback finished");
    }

    fn ignored(&self, command: Command) -> PlaybackError {
        debug!(%command, state = %self.state, "command ignored");
        PlaybackError::Misuse {
            command,
            state: self.state,
        }
    }
}
