//! Process registry.
//!
//! An ordered collection of processes with unique IDs, plus the ID
//! suggestion and defaulting rules used when processes are entered by hand.

use serde::Serialize;

use super::{Process, Ticks};
use crate::validation::{validate_process, ValidationError, ValidationErrorKind};

/// Default arrival tick for hand-entered processes.
pub const DEFAULT_ARRIVAL: Ticks = 0;
/// Default burst time for hand-entered processes.
pub const DEFAULT_BURST: Ticks = 5;
/// Default priority for hand-entered processes.
pub const DEFAULT_PRIORITY: i32 = 1;

/// An insertion-ordered set of processes with unique IDs.
///
/// Insertion order is significant: it is the final tie-breaker for every
/// scheduling policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessSet {
    processes: Vec<Process>,
    counter: u64,
}

impl ProcessSet {
    /// Creates an empty set. The first suggested ID is `P1`.
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
            counter: 1,
        }
    }

    /// The three-process demo workload.
    pub fn sample() -> Self {
        let processes = vec![
            Process::new("P1", 8).with_arrival(0).with_priority(2),
            Process::new("P2", 4).with_arrival(1).with_priority(1),
            Process::new("P3", 9).with_arrival(2).with_priority(3),
        ];
        Self {
            processes,
            counter: 4,
        }
    }

    /// Adds a process, rejecting invalid or duplicate IDs.
    pub fn add(&mut self, process: Process) -> Result<(), ValidationError> {
        if let Err(mut errors) = validate_process(&process) {
            return Err(errors.remove(0));
        }
        if self.contains(&process.id) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", process.id),
            ));
        }

        self.advance_counter(&process.id);
        self.processes.push(process);
        Ok(())
    }

    /// Adds a process, filling unspecified fields with the defaults
    /// (suggested ID, arrival 0, burst 5, priority 1).
    pub fn add_with_defaults(
        &mut self,
        id: Option<&str>,
        arrival_time: Option<Ticks>,
        burst_time: Option<Ticks>,
        priority: Option<i32>,
    ) -> Result<&Process, ValidationError> {
        let id = match id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.next_id(),
        };
        let process = Process::new(id, burst_time.unwrap_or(DEFAULT_BURST))
            .with_arrival(arrival_time.unwrap_or(DEFAULT_ARRIVAL))
            .with_priority(priority.unwrap_or(DEFAULT_PRIORITY));

        self.add(process)?;
        Ok(&self.processes[self.processes.len() - 1])
    }

    /// Suggested ID for the next process (`P<n>`).
    pub fn next_id(&self) -> String {
        format!("P{}", self.counter)
    }

    /// Removes all processes and restarts ID suggestions at `P1`.
    pub fn clear(&mut self) {
        self.processes.clear();
        self.counter = 1;
    }

    /// Whether a process with this ID exists.
    pub fn contains(&self, id: &str) -> bool {
        self.processes.iter().any(|p| p.id == id)
    }

    /// Looks up a process by ID.
    pub fn get(&self, id: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Processes in insertion order.
    pub fn as_slice(&self) -> &[Process] {
        &self.processes
    }

    /// Consumes the set, returning the processes in insertion order.
    pub fn into_vec(self) -> Vec<Process> {
        self.processes
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    fn advance_counter(&mut self, id: &str) {
        let numbered = id
            .strip_prefix('P')
            .and_then(|rest| rest.parse::<u64>().ok());
        self.counter = match numbered {
            Some(n) => n + 1,
            None => self.counter + 1,
        };
    }
}

impl Default for ProcessSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[Process]> for ProcessSet {
    fn as_ref(&self) -> &[Process] {
        &self.processes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_set() {
        let set = ProcessSet::sample();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("P2").unwrap().burst_time, 4);
        assert_eq!(set.get("P3").unwrap().priority, 3);
        assert_eq!(set.next_id(), "P4");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut set = ProcessSet::new();
        set.add(Process::new("A", 3)).unwrap();
        let err = set.add(Process::new("A", 1)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::DuplicateId);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_invalid_process_rejected() {
        let mut set = ProcessSet::new();
        let err = set.add(Process::new("P1", 0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ZeroBurst);
        assert!(set.is_empty());
        assert_eq!(set.next_id(), "P1");
    }

    #[test]
    fn test_defaults_and_id_suggestion() {
        let mut set = ProcessSet::new();
        let p = set.add_with_defaults(None, None, None, None).unwrap().clone();
        assert_eq!(p.id, "P1");
        assert_eq!(p.arrival_time, DEFAULT_ARRIVAL);
        assert_eq!(p.burst_time, DEFAULT_BURST);
        assert_eq!(p.priority, DEFAULT_PRIORITY);
        assert_eq!(set.next_id(), "P2");

        // Numbered ids jump the counter
        set.add_with_defaults(Some("P7"), Some(2), Some(3), None)
            .unwrap();
        assert_eq!(set.next_id(), "P8");

        // Free-form ids just increment
        set.add_with_defaults(Some("editor"), None, None, Some(4))
            .unwrap();
        assert_eq!(set.next_id(), "P9");

        // Blank id falls back to the suggestion
        let p = set.add_with_defaults(Some("  "), None, None, None).unwrap();
        assert_eq!(p.id, "P9");
    }

    #[test]
    fn test_clear_restarts_ids() {
        let mut set = ProcessSet::sample();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.next_id(), "P1");
    }
}
