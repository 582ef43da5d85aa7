//! One caller-owned simulation: processes, settings, last schedule, replay.

use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::error::{PlaybackError, ScheduleError};
use crate::models::{Process, Ticks};
use crate::playback::{PlaybackController, PlaybackState, TickSnapshot, TimerEpoch};
use crate::scheduler::{schedule, ScheduleOutcome};

/// Everything one simulation needs, passed around explicitly.
///
/// Changing the processes or the config discards the computed schedule;
/// call [`run_simulation`](Self::run_simulation) again before replaying.
#[derive(Debug, Clone)]
pub struct SimulationSession {
    processes: Vec<Process>,
    config: SimulationConfig,
    outcome: Option<ScheduleOutcome>,
    playback: PlaybackController,
}

impl SimulationSession {
    /// Creates a session with the default config and no schedule.
    pub fn new(processes: Vec<Process>) -> Self {
        let playback = PlaybackController::new(&processes);
        Self {
            processes,
            config: SimulationConfig::default(),
            outcome: None,
            playback,
        }
    }

    /// Builder form of [`set_config`](Self::set_config).
    pub fn with_config(mut self, config: SimulationConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Computes the schedule and loads it for replay from tick zero.
    ///
    /// On failure the previous outcome, if any, is kept and stays
    /// replayable.
    pub fn run_simulation(&mut self) -> Result<&ScheduleOutcome, ScheduleError> {
        let outcome = match schedule(
            &self.processes,
            self.config.policy,
            self.config.effective_quantum(),
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "simulation rejected");
                return Err(e);
            }
        };

        info!(
            policy = %outcome.policy,
            makespan = outcome.makespan(),
            "simulation ready"
        );
        self.playback.load_timeline(outcome.timeline.clone());
        Ok(self.outcome.insert(outcome))
    }

    /// Replaces the process set; discards the schedule and resets replay.
    pub fn set_processes(&mut self, processes: Vec<Process>) {
        self.playback.set_processes(&processes);
        self.processes = processes;
        self.outcome = None;
    }

    /// Replaces the settings; discards the schedule and resets replay.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
        self.outcome = None;
        self.playback.clear_timeline();
    }

    /// Begins or resumes replay. See [`PlaybackController::start`].
    pub fn start(&mut self) -> Result<TimerEpoch, PlaybackError> {
        self.playback.start()
    }

    /// Halts replay. See [`PlaybackController::pause`].
    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.playback.pause()
    }

    /// Advances one tick by hand. See [`PlaybackController::step`].
    pub fn step(&mut self) -> Result<TickSnapshot, PlaybackError> {
        self.playback.step()
    }

    /// Rewinds replay to tick zero, keeping the schedule.
    pub fn reset(&mut self) {
        self.playback.reset();
    }

    /// Forwards a timer firing. See [`PlaybackController::tick`].
    pub fn tick(&mut self, epoch: TimerEpoch) -> Option<TickSnapshot> {
        self.playback.tick(epoch)
    }

    /// Current replay snapshot.
    pub fn snapshot(&self) -> TickSnapshot {
        self.playback.snapshot()
    }

    /// Replay state.
    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Logical clock.
    pub fn clock(&self) -> Ticks {
        self.playback.clock()
    }

    /// Processes being simulated.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Active settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Last successful schedule, if still current.
    pub fn outcome(&self) -> Option<&ScheduleOutcome> {
        self.outcome.as_ref()
    }

    /// The replay controller.
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }
}
