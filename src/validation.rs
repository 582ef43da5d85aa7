//! Input validation for scheduling requests.
//!
//! Checks structural integrity of a process set before scheduling.
//! Detects:
//! - Empty process sets
//! - Duplicate, empty or reserved IDs
//! - Zero burst times
//! - Workloads whose worst-case makespan does not fit in a tick count
//! - Missing or non-positive round-robin quantum
//! - A zero playback tick interval
//!
//! All problems are collected, so a caller sees every issue in one pass.
//! Negative arrival or burst values cannot be expressed: both are unsigned
//! tick counts.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU64;

use crate::models::{Process, Ticks, IDLE};
use crate::scheduler::Policy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No processes were supplied.
    EmptyProcessSet,
    /// Two processes share the same ID.
    DuplicateId,
    /// A process has an empty (or whitespace-only) ID.
    EmptyId,
    /// A process uses the idle sentinel as its ID.
    ReservedId,
    /// A process needs no CPU time.
    ZeroBurst,
    /// Latest arrival plus total burst exceeds the tick range.
    HorizonOverflow,
    /// Round robin was requested without a quantum.
    MissingQuantum,
    /// The quantum is not a positive integer.
    InvalidQuantum,
    /// The playback tick interval is zero.
    InvalidTickInterval,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Checks a single process in isolation (ID shape and burst time).
pub fn validate_process(process: &Process) -> ValidationResult {
    let mut errors = Vec::new();
    check_process(process, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a process set.
///
/// Checks:
/// 1. At least one process
/// 2. No empty IDs and no ID equal to the idle sentinel
/// 3. No duplicate IDs
/// 4. Every burst time is at least 1
/// 5. Latest arrival plus the sum of all bursts fits in [`Ticks`]
///
/// Every clock value a schedule reaches is bounded by check 5, so the
/// scheduling loops never overflow.
pub fn validate_processes(processes: &[Process]) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessSet,
            "Process set is empty",
        ));
    }

    let mut ids = HashSet::new();
    for p in processes {
        check_process(p, &mut errors);
        if !ids.insert(p.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", p.id),
            ));
        }
    }

    if horizon(processes).is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Latest arrival plus total burst time exceeds the tick range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the quantum for a policy.
///
/// Only round robin consumes a quantum; other policies ignore it.
pub fn validate_quantum(policy: Policy, quantum: Option<Ticks>) -> ValidationResult {
    if !policy.uses_quantum() {
        return Ok(());
    }
    resolve_quantum(quantum).map(|_| ()).map_err(|e| vec![e])
}

/// Checks a round-robin quantum and returns it as a non-zero slice length.
pub fn resolve_quantum(quantum: Option<Ticks>) -> Result<NonZeroU64, ValidationError> {
    match quantum {
        None => Err(ValidationError::new(
            ValidationErrorKind::MissingQuantum,
            "Round robin requires a time quantum",
        )),
        Some(q) => NonZeroU64::new(q).ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::InvalidQuantum,
                "Time quantum must be a positive integer, got 0",
            )
        }),
    }
}

/// Checks the playback timer period.
pub fn validate_tick_interval(tick_interval_ms: u64) -> ValidationResult {
    if tick_interval_ms == 0 {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::InvalidTickInterval,
            "Tick interval must be at least 1 ms",
        )]);
    }
    Ok(())
}

/// Upper bound on the makespan: latest arrival plus every burst.
///
/// The CPU idles only while nothing has arrived, so no schedule ends later.
/// `None` when the bound overflows.
fn horizon(processes: &[Process]) -> Option<Ticks> {
    let latest = processes.iter().map(|p| p.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(latest, |acc, p| acc.checked_add(p.burst_time))
}

fn check_process(p: &Process, errors: &mut Vec<ValidationError>) {
    if p.id.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Process ID must not be empty",
        ));
    } else if p.id == IDLE {
        errors.push(ValidationError::new(
            ValidationErrorKind::ReservedId,
            format!("Process ID '{IDLE}' is reserved for idle blocks"),
        ));
    }

    if p.burst_time == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroBurst,
            format!("Process '{}' has a burst time of 0", p.id),
        ));
    }
}
