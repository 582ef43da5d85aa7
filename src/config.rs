//! Simulation settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::{Process, Ticks};
use crate::scheduler::{Policy, ScheduleRequest};
use crate::validation::{validate_quantum, validate_tick_interval, ValidationResult};

/// Default round-robin time slice.
pub const DEFAULT_QUANTUM: Ticks = 2;
/// Default wall-clock period of one playback tick.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

/// Policy and playback settings for a [`SimulationSession`](crate::session::SimulationSession).
///
/// Missing fields deserialize to their defaults, so `{"policy": "SRTF"}`
/// is a complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Scheduling policy.
    pub policy: Policy,
    /// Round-robin slice; kept but unused by other policies.
    pub quantum: Ticks,
    /// Period the external timer should tick at.
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            quantum: DEFAULT_QUANTUM,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl SimulationConfig {
    /// Default settings for `policy`.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Sets the round-robin quantum.
    pub fn with_quantum(mut self, quantum: Ticks) -> Self {
        self.quantum = quantum;
        self
    }

    /// Sets the playback tick period.
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Tick period as a [`Duration`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Quantum as passed to the scheduler (`None` unless round robin).
    pub fn effective_quantum(&self) -> Option<Ticks> {
        self.policy.uses_quantum().then_some(self.quantum)
    }

    /// Checks the quantum (round robin only) and the tick interval.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = validate_quantum(self.policy, self.effective_quantum())
            .err()
            .unwrap_or_default();
        if let Err(mut more) = validate_tick_interval(self.tick_interval_ms) {
            errors.append(&mut more);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builds a scheduling request for `processes` under these settings.
    pub fn to_request(&self, processes: Vec<Process>) -> ScheduleRequest {
        ScheduleRequest {
            processes,
            policy: self.policy,
            quantum: self.effective_quantum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.policy, Policy::Fcfs);
        assert_eq!(config.quantum, 2);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"policy": "ROUND_ROBIN", "quantum": 4}"#).unwrap();
        assert_eq!(config.policy, Policy::RoundRobin);
        assert_eq!(config.quantum, 4);
        assert_eq!(config.tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);

        let empty: SimulationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, SimulationConfig::default());
    }

    #[test]
    fn test_quantum_only_matters_for_round_robin() {
        let fcfs = SimulationConfig::new(Policy::Fcfs).with_quantum(0);
        assert!(fcfs.validate().is_ok());
        assert_eq!(fcfs.effective_quantum(), None);

        let rr = SimulationConfig::new(Policy::RoundRobin)
            .with_quantum(0)
            .with_tick_interval_ms(0);
        let errors = rr.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidQuantum);
        assert_eq!(errors[1].kind, ValidationErrorKind::InvalidTickInterval);
    }

    #[test]
    fn test_to_request() {
        let request = SimulationConfig::new(Policy::RoundRobin)
            .with_quantum(3)
            .to_request(vec![Process::new("A", 4)]);
        assert_eq!(request.quantum, Some(3));
        assert_eq!(request.run().unwrap().timeline.len(), 2);
    }
}
