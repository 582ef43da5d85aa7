//! Timeline (solution) model.
//!
//! A timeline is the ordered sequence of CPU allocations produced by one
//! scheduling run. Blocks are half-open `[start, end)` intervals, contiguous
//! from t=0 to the makespan, and never overlap.

use serde::{Deserialize, Serialize};

use super::Ticks;

/// Wire name of the idle occupant.
pub const IDLE: &str = "IDLE";

/// Who holds the CPU during a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Occupant {
    /// No process was eligible.
    Idle,
    /// The process with this id.
    Process(String),
}

impl Occupant {
    /// Creates a process occupant.
    pub fn process(id: impl Into<String>) -> Self {
        Self::Process(id.into())
    }

    /// Whether this is the idle sentinel.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Process id, or `None` when idle.
    pub fn process_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Process(id) => Some(id),
        }
    }

    /// Whether this occupant is the given process.
    pub fn is(&self, id: &str) -> bool {
        self.process_id() == Some(id)
    }

    /// Display / wire name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => IDLE,
            Self::Process(id) => id,
        }
    }
}

impl From<String> for Occupant {
    fn from(value: String) -> Self {
        if value == IDLE {
            Self::Idle
        } else {
            Self::Process(value)
        }
    }
}

impl From<Occupant> for String {
    fn from(value: Occupant) -> Self {
        match value {
            Occupant::Idle => IDLE.to_string(),
            Occupant::Process(id) => id,
        }
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One contiguous CPU allocation `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineBlock {
    /// Process holding the CPU, or idle.
    pub occupant: Occupant,
    /// First tick of the block (inclusive).
    pub start: Ticks,
    /// End tick (exclusive).
    pub end: Ticks,
}

impl TimelineBlock {
    /// Creates a block.
    pub fn new(occupant: Occupant, start: Ticks, end: Ticks) -> Self {
        Self {
            occupant,
            start,
            end,
        }
    }

    /// Length in ticks.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    /// Whether the unit of time ending at tick `t` lies in this block.
    ///
    /// Tick `t` denotes the unit `[t-1, t)` that has just been executed,
    /// so the test is `start < t <= end`.
    #[inline]
    pub fn covers_tick(&self, t: Ticks) -> bool {
        t > self.start && t <= self.end
    }
}

/// An ordered, contiguous sequence of timeline blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    blocks: Vec<TimelineBlock>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block running `occupant` from the current end for `duration` ticks.
    ///
    /// Zero-length allocations are dropped.
    pub fn push(&mut self, occupant: Occupant, duration: Ticks) {
        if duration == 0 {
            return;
        }
        let start = self.makespan();
        self.blocks
            .push(TimelineBlock::new(occupant, start, start + duration));
    }

    /// Like [`push`](Self::push), but extends the last block when it has the
    /// same occupant.
    pub fn extend_or_push(&mut self, occupant: Occupant, duration: Ticks) {
        if duration == 0 {
            return;
        }
        match self.blocks.last_mut() {
            Some(last) if last.occupant == occupant => last.end += duration,
            _ => self.push(occupant, duration),
        }
    }

    /// Blocks in time order.
    pub fn blocks(&self) -> &[TimelineBlock] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block was produced.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// End of the final block (0 when empty).
    pub fn makespan(&self) -> Ticks {
        self.blocks.last().map(|b| b.end).unwrap_or(0)
    }

    /// Block covering the unit that ends at tick `t` (see [`TimelineBlock::covers_tick`]).
    pub fn block_at(&self, t: Ticks) -> Option<&TimelineBlock> {
        // Blocks are sorted and contiguous: the first block whose end
        // reaches `t` is the only candidate.
        let idx = self.blocks.partition_point(|b| b.end < t);
        self.blocks.get(idx).filter(|b| b.covers_tick(t))
    }

    /// Occupant of the unit ending at tick `t`; idle outside the timeline.
    pub fn occupant_at(&self, t: Ticks) -> Occupant {
        self.block_at(t)
            .map(|b| b.occupant.clone())
            .unwrap_or(Occupant::Idle)
    }

    /// All blocks allocated to a given process.
    pub fn blocks_for(&self, id: &str) -> Vec<&TimelineBlock> {
        self.blocks.iter().filter(|b| b.occupant.is(id)).collect()
    }

    /// Total ticks executed by a given process.
    pub fn executed_time(&self, id: &str) -> Ticks {
        self.blocks_for(id).iter().map(|b| b.duration()).sum()
    }

    /// Ticks spent running any process.
    pub fn busy_time(&self) -> Ticks {
        self.blocks
            .iter()
            .filter(|b| !b.occupant.is_idle())
            .map(|b| b.duration())
            .sum()
    }

    /// Ticks spent idle.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Whether blocks start at 0, are non-empty, and each starts where the
    /// previous one ended.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        for b in &self.blocks {
            if b.start != cursor || b.end <= b.start {
                return false;
            }
            cursor = b.end;
        }
        true
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineBlock;
    type IntoIter = std::slice::Iter<'a, TimelineBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
