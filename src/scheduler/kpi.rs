//! Schedule quality metrics (KPIs).
//!
//! Computes the standard single-CPU performance indicators from a finished
//! timeline and its per-process completion metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | End of the last block |
//! | Busy / Idle Time | Ticks spent on processes / on `IDLE` |
//! | CPU Utilization | busy / makespan |
//! | Mean Waiting Time | mean(turnaround - burst) |
//! | Mean Turnaround Time | mean(completion - arrival) |
//! | Max Waiting Time | Largest single wait |
//! | Throughput | processes / makespan |
//!
//! Means are kept at full precision; [`rounded`] gives the two-decimal
//! value used for display.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2:
//! Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ProcessMetrics, Ticks, Timeline};

/// Aggregate schedule performance indicators.
///
/// All time values are in ticks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    /// End of the last timeline block.
    pub makespan: Ticks,
    /// Ticks occupied by processes.
    pub busy_time: Ticks,
    /// Ticks the CPU sat idle.
    pub idle_time: Ticks,
    /// Fraction of the makespan spent busy (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Arithmetic mean of waiting times.
    pub mean_waiting_time: f64,
    /// Arithmetic mean of turnaround times.
    pub mean_turnaround_time: f64,
    /// Largest waiting time of any single process.
    pub max_waiting_time: Ticks,
    /// Completed processes per tick.
    pub throughput: f64,
}

impl ScheduleMetrics {
    /// Computes KPIs from a timeline and its per-process metrics.
    ///
    /// # Arguments
    /// * `timeline` - The computed CPU allocations.
    /// * `processes` - Completion metrics, one per process.
    pub fn calculate(timeline: &Timeline, processes: &[ProcessMetrics]) -> Self {
        let makespan = timeline.makespan();
        let busy_time = timeline.busy_time();
        let idle_time = timeline.idle_time();

        // Sums are u128: n values each up to u64::MAX cannot overflow it.
        let count = processes.len() as u128;
        let (total_waiting, total_turnaround, max_waiting) = processes.iter().fold(
            (0u128, 0u128, 0u64),
            |(wait, turn, max), m| {
                (
                    wait + u128::from(m.waiting_time),
                    turn + u128::from(m.turnaround_time),
                    max.max(m.waiting_time),
                )
            },
        );

        Self {
            makespan,
            busy_time,
            idle_time,
            cpu_utilization: ratio(busy_time.into(), makespan.into()),
            mean_waiting_time: ratio(total_waiting, count),
            mean_turnaround_time: ratio(total_turnaround, count),
            max_waiting_time: max_waiting,
            throughput: ratio(count, makespan.into()),
        }
    }

    /// Copy with every floating-point field rounded to two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            cpu_utilization: rounded(self.cpu_utilization),
            mean_waiting_time: rounded(self.mean_waiting_time),
            mean_turnaround_time: rounded(self.mean_turnaround_time),
            throughput: rounded(self.throughput),
            ..self.clone()
        }
    }
}

/// Rounds to two decimal places (half away from zero).
///
/// ```
/// use u_cpusched::scheduler::rounded;
///
/// assert_eq!(rounded(17.0 / 3.0), 5.67);
/// assert_eq!(rounded(38.0 / 3.0), 12.67);
/// ```
pub fn rounded(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `num / den`, or 0 when `den` is zero.
fn ratio(num: u128, den: u128) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}
