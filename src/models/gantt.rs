//! Gantt timeline model.
//!
//! The engine appends one entry per tick through the [`GanttSink`]
//! capability. [`GanttChart`] is the in-memory buffer most callers use;
//! rendering is left to the consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Tick;

/// Occupancy status of a timeline interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GanttStatus {
    /// The CPU executed a process.
    Run,
    /// The CPU had nothing to run.
    Idle,
}

impl fmt::Display for GanttStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GanttStatus::Run => f.write_str("RUN"),
            GanttStatus::Idle => f.write_str("IDLE"),
        }
    }
}

/// One timeline interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Interval start tick.
    pub start: Tick,
    /// Interval end tick (exclusive).
    pub end: Tick,
    /// Occupant pid; `None` while idle.
    pub pid: Option<usize>,
    /// Occupancy status.
    pub status: GanttStatus,
}

impl GanttEntry {
    /// Interval length in ticks.
    #[inline]
    pub fn duration(&self) -> Tick {
        self.end - self.start
    }
}

/// Receiver of timeline entries emitted by the engine.
pub trait GanttSink {
    /// Records that `[start, end)` was spent in `status` by `pid`.
    fn add_entry(&mut self, start: Tick, end: Tick, pid: Option<usize>, status: GanttStatus);
}

/// Ordered, caller-owned timeline buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    /// Entries in emission order.
    pub entries: Vec<GanttEntry>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chart has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merges adjacent entries with the same occupant and status.
    ///
    /// The per-tick stream `[0,1) P0, [1,2) P0, [2,3) idle` becomes
    /// `[0,2) P0, [2,3) idle`.
    pub fn consolidate(&self) -> GanttChart {
        let mut merged: Vec<GanttEntry> = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            match merged.last_mut() {
                Some(last)
                    if last.pid == entry.pid
                        && last.status == entry.status
                        && last.end == entry.start =>
                {
                    last.end = entry.end;
                }
                _ => merged.push(*entry),
            }
        }
        GanttChart { entries: merged }
    }

    /// Total RUN ticks attributed to `pid`.
    pub fn run_ticks_for(&self, pid: usize) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.status == GanttStatus::Run && e.pid == Some(pid))
            .map(GanttEntry::duration)
            .sum()
    }

    /// Total RUN ticks across all occupants.
    pub fn busy_time(&self) -> Tick {
        self.ticks_with(GanttStatus::Run)
    }

    /// Total IDLE ticks.
    pub fn idle_time(&self) -> Tick {
        self.ticks_with(GanttStatus::Idle)
    }

    /// End of the last entry (0 when empty).
    pub fn span(&self) -> Tick {
        self.entries.last().map(|e| e.end).unwrap_or(0)
    }

    fn ticks_with(&self, status: GanttStatus) -> Tick {
        self.entries
            .iter()
            .filter(|e| e.status == status)
            .map(GanttEntry::duration)
            .sum()
    }
}

impl GanttSink for GanttChart {
    fn add_entry(&mut self, start: Tick, end: Tick, pid: Option<usize>, status: GanttStatus) {
        self.entries.push(GanttEntry {
            start,
            end,
            pid,
            status,
        });
    }
}
