//! Random process-set generation for demos and property tests.
//!
//! Draws are taken from the caller's RNG, so a seeded generator gives a
//! reproducible workload.
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_cpusched::workload::{generate, WorkloadConfig};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let set = generate(&WorkloadConfig::default().with_count(4), &mut rng).unwrap();
//! assert_eq!(set.len(), 4);
//! assert_eq!(set.next_id(), "P5");
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Process, ProcessSet, Ticks};
use crate::validation::ValidationError;

/// Shape of a generated workload. Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkloadConfig {
    /// Number of processes.
    pub count: usize,
    /// Latest possible arrival tick.
    pub max_arrival: Ticks,
    /// Shortest burst (raised to 1 if zero).
    pub min_burst: Ticks,
    /// Longest burst.
    pub max_burst: Ticks,
    /// Largest priority value (priorities start at 0).
    pub max_priority: i32,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 10,
            max_priority: 5,
        }
    }
}

impl WorkloadConfig {
    /// Sets the process count.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: Ticks) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min: Ticks, max: Ticks) -> Self {
        self.min_burst = min;
        self.max_burst = max;
        self
    }

    /// Burst bounds with `1 <= lo <= hi`.
    fn burst_bounds(&self) -> (Ticks, Ticks) {
        let lo = self.min_burst.max(1);
        (lo, self.max_burst.max(lo))
    }
}

/// Generates `config.count` processes named `P1..Pn`.
pub fn generate<R: Rng>(
    config: &WorkloadConfig,
    rng: &mut R,
) -> Result<ProcessSet, ValidationError> {
    let (lo, hi) = config.burst_bounds();
    let max_priority = config.max_priority.max(0);

    let mut set = ProcessSet::new();
    for _ in 0..config.count {
        let process = Process::new(set.next_id(), rng.random_range(lo..=hi))
            .with_arrival(rng.random_range(0..=config.max_arrival))
            .with_priority(rng.random_range(0..=max_priority));
        set.add(process)?;
    }

    debug!(count = set.len(), "workload generated");
    Ok(set)
}
