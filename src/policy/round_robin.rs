//! Round Robin.

use log::debug;

use super::{slot, Policy};
use crate::engine::SimState;
use crate::error::{Result, SimError};
use crate::models::Tick;
use crate::ordering::SortCriteria;

/// Round Robin with a fixed time quantum.
///
/// At the start of a tick, an occupant that has run `quantum` consecutive
/// ticks is moved to the ready tail before arrivals are admitted. The
/// counter resets whenever the occupant blocks on I/O, completes, or is
/// rotated out. A rotation only counts as a preemption when another entity
/// is waiting to take the CPU.
#[derive(Debug, Clone)]
pub struct RoundRobin {
    quantum: Tick,
    used: Vec<Tick>,
}

impl RoundRobin {
    /// Creates the policy. The quantum must be positive.
    pub fn new(quantum: Tick) -> Result<Self> {
        if quantum <= 0 {
            return Err(SimError::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum,
            used: Vec::new(),
        })
    }

    /// Configured quantum.
    pub fn quantum(&self) -> Tick {
        self.quantum
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "Round Robin"
    }

    fn criteria(&self) -> Option<SortCriteria> {
        None
    }

    fn on_tick_extra(&mut self, state: &mut SimState) -> Result<()> {
        let Some(occupant) = state.running else {
            return Ok(());
        };
        if *slot(&mut self.used, occupant) < self.quantum {
            return Ok(());
        }

        let contended = !state.ready.is_empty();
        state.running = None;
        state.ready.enqueue(occupant)?;
        *slot(&mut self.used, occupant) = 0;
        if contended {
            state.metrics.preemptions += 1;
        }
        debug!(
            "t={}: quantum expired for pid {}",
            state.now, state.jobs[occupant].pid
        );
        Ok(())
    }

    fn on_execute(&mut self, idx: usize) {
        *slot(&mut self.used, idx) += 1;
    }

    fn on_vacate(&mut self, idx: usize) {
        *slot(&mut self.used, idx) = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    #[test]
    fn test_rejects_non_positive_quantum() {
        assert!(matches!(
            RoundRobin::new(0),
            Err(SimError::InvalidQuantum(0))
        ));
        assert!(RoundRobin::new(-2).is_err());
        assert_eq!(RoundRobin::new(3).unwrap().quantum(), 3);
    }

    #[test]
    fn test_rotation_after_quantum() {
        let mut rr = RoundRobin::new(2).unwrap();
        let mut state = SimState::new(vec![Process::new(0, 0, 5), Process::new(1, 0, 5)], 4);
        state.running = Some(0);
        state.ready.enqueue(1).unwrap();

        rr.on_execute(0);
        rr.on_tick_extra(&mut state).unwrap();
        assert_eq!(state.running, Some(0));

        rr.on_execute(0);
        rr.on_tick_extra(&mut state).unwrap();
        assert_eq!(state.running, None);
        assert_eq!(state.ready.iter().collect::<Vec<_>>(), vec![1, 0]);
        assert_eq!(state.metrics.preemptions, 1);
    }

    #[test]
    fn test_lone_rotation_is_not_a_preemption() {
        let mut rr = RoundRobin::new(2).unwrap();
        let mut state = SimState::new(vec![Process::new(0, 0, 5)], 2);
        state.running = Some(0);

        rr.on_execute(0);
        rr.on_execute(0);
        rr.on_tick_extra(&mut state).unwrap();
        assert_eq!(state.running, None);
        assert_eq!(state.ready.peek(), Some(0));
        assert_eq!(state.metrics.preemptions, 0);
    }

    #[test]
    fn test_vacate_resets_counter() {
        let mut rr = RoundRobin::new(2).unwrap();
        let mut state = SimState::new(vec![Process::new(0, 0, 5)], 2);
        rr.on_execute(0);
        rr.on_vacate(0);
        rr.on_execute(0);
        state.running = Some(0);
        rr.on_tick_extra(&mut state).unwrap();
        assert_eq!(state.running, Some(0));
    }
}
