//! Stateless policies.
//!
//! Each policy is fully described by its ordering criterion and whether
//! it preempts on admission. EDF and RMS additionally insert into sort
//! position instead of appending.

use super::Policy;
use crate::error::Result;
use crate::models::Process;
use crate::ordering::{insert_sorted, SortCriteria};
use crate::queue::ReadyQueue;

// ======================== FIFO ========================

/// First-Come, First-Served.
///
/// The ready queue is never resorted; the occupant runs until it blocks
/// or completes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        None
    }
}

// ======================== Shortest job ========================

/// Non-preemptive Shortest Job First (by remaining time).
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfNonPreemptive;

impl Policy for SjfNonPreemptive {
    fn name(&self) -> &'static str {
        "Non-Preemptive SJF"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::RemainingTime)
    }
}

/// Preemptive Shortest Job First (Shortest Remaining Time First).
///
/// A newcomer preempts when its remaining time is strictly shorter than
/// the occupant's.
#[derive(Debug, Clone, Copy, Default)]
pub struct SjfPreemptive;

impl Policy for SjfPreemptive {
    fn name(&self) -> &'static str {
        "Preemptive SJF"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::RemainingTime)
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

// ======================== Priority ========================

/// Non-preemptive priority (lower value = more urgent).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityNonPreemptive;

impl Policy for PriorityNonPreemptive {
    fn name(&self) -> &'static str {
        "Non-Preemptive Priority"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::Priority)
    }
}

/// Preemptive priority (lower value = more urgent).
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityPreemptive;

impl Policy for PriorityPreemptive {
    fn name(&self) -> &'static str {
        "Preemptive Priority"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::Priority)
    }

    fn is_preemptive(&self) -> bool {
        true
    }
}

// ======================== Real-time ========================

/// Earliest Deadline First.
///
/// Ranks job instances by absolute deadline; ties keep queue order.
///
/// # Reference
/// Liu & Layland (1973), optimal dynamic-priority scheduler for U ≤ 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Edf;

impl Policy for Edf {
    fn name(&self) -> &'static str {
        "EDF"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::Deadline)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn enqueue(&self, ready: &mut ReadyQueue, jobs: &[Process], idx: usize) -> Result<()> {
        insert_sorted(ready, jobs, idx, SortCriteria::Deadline)
    }
}

/// Rate Monotonic Scheduling.
///
/// Static priority equal to the period: shorter period = more urgent.
///
/// # Reference
/// Liu & Layland (1973), optimal fixed-priority scheduler for implicit deadlines.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rms;

impl Policy for Rms {
    fn name(&self) -> &'static str {
        "RMS"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::Period)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn enqueue(&self, ready: &mut ReadyQueue, jobs: &[Process], idx: usize) -> Result<()> {
        insert_sorted(ready, jobs, idx, SortCriteria::Period)
    }
}
