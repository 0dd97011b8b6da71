//! Scheduling policies for the tick engine.
//!
//! A [`Policy`] decides how the generic tick loop admits, orders and
//! dispatches entities. The loop itself (arrivals, I/O completions,
//! execution, bookkeeping) lives in [`crate::engine`] and is shared by
//! every policy.
//!
//! | Policy | Criterion | Preemptive | Extra behavior |
//! |--------|-----------|------------|----------------|
//! | [`Fcfs`] | FIFO | no | |
//! | [`SjfNonPreemptive`] | remaining time | no | |
//! | [`SjfPreemptive`] | remaining time | yes | |
//! | [`PriorityNonPreemptive`] | priority | no | |
//! | [`PriorityPreemptive`] | priority | yes | |
//! | [`RoundRobin`] | FIFO | quantum | rotation at tick start |
//! | [`PriorityAging`] | priority | yes | promotion at tick start |
//! | [`Edf`] | deadline | yes | sorted insertion |
//! | [`Rms`] | period | yes | sorted insertion |
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"

mod aging;
mod basic;
mod round_robin;

pub use aging::PriorityAging;
pub use basic::{
    Edf, Fcfs, PriorityNonPreemptive, PriorityPreemptive, Rms, SjfNonPreemptive, SjfPreemptive,
};
pub use round_robin::RoundRobin;

use std::fmt::Debug;

use crate::engine::SimState;
use crate::error::Result;
use crate::models::Process;
use crate::ordering::{sort_queue, SortCriteria};
use crate::queue::ReadyQueue;

/// What to do with an entity entering the ready set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Displace the running occupant and take the CPU.
    Preempt,
    /// Place the entity in the ready queue.
    Enqueue,
}

/// Per-policy decisions plugged into the generic tick loop.
///
/// Default methods implement the common case: FIFO or criterion-ordered
/// ready queue, strict-rank preemption when [`is_preemptive`] is set, and
/// no pre-tick behavior.
///
/// [`is_preemptive`]: Policy::is_preemptive
pub trait Policy: Debug {
    /// Policy name (e.g., "FCFS", "EDF").
    fn name(&self) -> &'static str;

    /// Ordering criterion; `None` keeps arrival (FIFO) order.
    fn criteria(&self) -> Option<SortCriteria>;

    /// Whether arrivals and I/O completions may preempt the occupant.
    fn is_preemptive(&self) -> bool {
        false
    }

    /// Decides between preemption and enqueueing for `candidate`.
    fn admit(&self, jobs: &[Process], candidate: usize, running: Option<usize>) -> Admission {
        match (self.criteria(), running) {
            (Some(criteria), Some(occupant))
                if self.is_preemptive()
                    && criteria.outranks(&jobs[candidate], &jobs[occupant]) =>
            {
                Admission::Preempt
            }
            _ => Admission::Enqueue,
        }
    }

    /// Places `idx` in the ready queue.
    fn enqueue(&self, ready: &mut ReadyQueue, _jobs: &[Process], idx: usize) -> Result<()> {
        ready.enqueue(idx)
    }

    /// Once-per-tick resort before dispatch.
    fn reorder(&self, ready: &mut ReadyQueue, jobs: &[Process]) {
        if let Some(criteria) = self.criteria() {
            sort_queue(ready, jobs, criteria);
        }
    }

    /// Picks the next occupant for an empty CPU.
    fn select_next(&mut self, ready: &mut ReadyQueue, _jobs: &[Process]) -> Option<usize> {
        ready.dequeue()
    }

    /// Runs at the start of every tick, before arrivals.
    fn on_tick_extra(&mut self, _state: &mut SimState) -> Result<()> {
        Ok(())
    }

    /// `idx` was placed in the running slot.
    fn on_dispatch(&mut self, _idx: usize) {}

    /// `idx` consumed one CPU tick.
    fn on_execute(&mut self, _idx: usize) {}

    /// `idx` left the CPU by blocking on I/O or completing.
    fn on_vacate(&mut self, _idx: usize) {}
}

/// Grows a per-job counter table so that `idx` is addressable.
pub(crate) fn slot<T: Default + Clone>(table: &mut Vec<T>, idx: usize) -> &mut T {
    if idx >= table.len() {
        table.resize(idx + 1, T::default());
    }
    &mut table[idx]
}
