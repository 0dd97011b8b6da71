//! Preemptive priority with aging.
//!
//! Starved residents of the ready queue are promoted one priority level
//! every `threshold` ticks, down to priority 1, so that a stream of
//! urgent work cannot starve them indefinitely.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.3.4

use log::{debug, info};

use super::{slot, Policy};
use crate::engine::SimState;
use crate::error::{Result, SimError};
use crate::models::AgingEvent;
use crate::ordering::{sort_queue, SortCriteria};

/// Most urgent priority reachable through aging.
pub const AGING_PRIORITY_FLOOR: i32 = 1;

/// Preemptive priority scheduling with aging.
///
/// At the start of every tick:
/// 1. every ready resident's age increments;
/// 2. residents whose age reached the threshold (and whose priority is
///    above [`AGING_PRIORITY_FLOOR`]) gain one priority level and restart
///    aging;
/// 3. the ready queue is resorted if anything was promoted;
/// 4. if the ready head now outranks the occupant, they swap.
///
/// Age restarts whenever an entity takes the CPU.
#[derive(Debug, Clone)]
pub struct PriorityAging {
    threshold: u32,
    ages: Vec<u32>,
}

impl PriorityAging {
    /// Creates the policy with the given aging threshold (ticks).
    /// The threshold must be positive.
    pub fn new(threshold: u32) -> Result<Self> {
        if threshold == 0 {
            return Err(SimError::InvalidAgingThreshold(threshold));
        }
        Ok(Self {
            threshold,
            ages: Vec::new(),
        })
    }

    /// Configured threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}

impl Policy for PriorityAging {
    fn name(&self) -> &'static str {
        "Priority with Aging"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        Some(SortCriteria::Priority)
    }

    fn is_preemptive(&self) -> bool {
        true
    }

    fn on_tick_extra(&mut self, state: &mut SimState) -> Result<()> {
        let mut promoted = Vec::new();
        for idx in state.ready.iter() {
            let age = slot(&mut self.ages, idx);
            *age += 1;
            if *age >= self.threshold && state.jobs[idx].priority > AGING_PRIORITY_FLOOR {
                promoted.push((idx, *age));
            }
        }

        for &(idx, age) in &promoted {
            let job = &mut state.jobs[idx];
            let event = AgingEvent {
                tick: state.now,
                pid: job.pid,
                age,
                old_priority: job.priority,
                new_priority: job.priority - 1,
            };
            job.priority -= 1;
            *slot(&mut self.ages, idx) = 0;
            info!(
                "t={}: aged pid {} priority {} -> {}",
                event.tick, event.pid, event.old_priority, event.new_priority
            );
            state.metrics.aging_log.push(event);
        }

        if !promoted.is_empty() {
            sort_queue(&mut state.ready, &state.jobs, SortCriteria::Priority);
        }

        let (Some(occupant), Some(head)) = (state.running, state.ready.peek()) else {
            return Ok(());
        };
        if state.jobs[head].priority < state.jobs[occupant].priority {
            state.ready.dequeue();
            state.ready.enqueue(occupant)?;
            state.running = Some(head);
            self.on_dispatch(head);
            state.metrics.preemptions += 1;
            debug!(
                "t={}: aging preemption, pid {} displaces pid {}",
                state.now, state.jobs[head].pid, state.jobs[occupant].pid
            );
        }
        Ok(())
    }

    fn on_dispatch(&mut self, idx: usize) {
        *slot(&mut self.ages, idx) = 0;
    }
}
