//! Ordering criteria and sorted queue operations.
//!
//! Every criterion is a strict ascending comparator: the entity with the
//! smaller key is more urgent.
//!
//! | Criterion | Key | Used by |
//! |-----------|-----|---------|
//! | `Priority` | `priority` | Priority, Priority+Aging |
//! | `RemainingTime` | `cpu_burst - progress` | SJF |
//! | `Deadline` | absolute `deadline` | EDF |
//! | `Period` | `period` | RMS |

use std::cmp::Ordering;

use crate::error::Result;
use crate::models::{Process, Tick};
use crate::queue::ReadyQueue;

/// Comparison criterion for ready-queue ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriteria {
    /// Lower priority value first.
    Priority,
    /// Shorter remaining CPU demand first.
    RemainingTime,
    /// Earlier absolute deadline first.
    Deadline,
    /// Shorter period first.
    Period,
}

impl SortCriteria {
    /// Sort key of a process under this criterion.
    pub fn key(self, process: &Process) -> Tick {
        match self {
            SortCriteria::Priority => Tick::from(process.priority),
            SortCriteria::RemainingTime => process.remaining(),
            SortCriteria::Deadline => process.deadline,
            SortCriteria::Period => process.period,
        }
    }

    /// Compares two processes; `Less` means `a` is more urgent.
    pub fn compare(self, a: &Process, b: &Process) -> Ordering {
        self.key(a).cmp(&self.key(b))
    }

    /// Whether `a` ranks strictly ahead of `b`.
    #[inline]
    pub fn outranks(self, a: &Process, b: &Process) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Stable resort of all residents; equal keys keep their relative order.
pub fn sort_queue(queue: &mut ReadyQueue, jobs: &[Process], criteria: SortCriteria) {
    if queue.len() <= 1 {
        return;
    }
    queue
        .as_mut_slice()
        .sort_by(|&a, &b| criteria.compare(&jobs[a], &jobs[b]));
}

/// Inserts `idx` after every resident whose key is less than or equal to
/// its own. Assumes the queue is already sorted by `criteria`.
pub fn insert_sorted(
    queue: &mut ReadyQueue,
    jobs: &[Process],
    idx: usize,
    criteria: SortCriteria,
) -> Result<()> {
    let key = criteria.key(&jobs[idx]);
    let position = queue
        .as_mut_slice()
        .partition_point(|&resident| criteria.key(&jobs[resident]) <= key);
    queue.insert(position, idx)
}
