//! Seeded random workloads.
//!
//! | Field | Range |
//! |-------|-------|
//! | arrival | `0..10` |
//! | cpu burst | `1..=10` |
//! | I/O operations | up to [`MAX_IO_OPERATIONS`] distinct offsets in `1..burst`, bursts `1..=5` |
//! | priority | `1..=10` |
//! | period | `burst + 3..=6` |
//! | deadline | `arrival + period` |
//!
//! Bursts of 1 or 2 ticks never issue I/O.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::models::{Process, Tick, MAX_IO_OPERATIONS};

/// Reproducible generator of process tables.
///
/// # Example
///
/// ```
/// use u_cpusim::workload::WorkloadGenerator;
///
/// let a = WorkloadGenerator::new(7).generate(5);
/// let b = WorkloadGenerator::new(7).generate(5);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `count` processes with pids `0..count`.
    pub fn generate(&mut self, count: usize) -> Vec<Process> {
        (0..count).map(|pid| self.process(pid)).collect()
    }

    fn process(&mut self, pid: usize) -> Process {
        let arrival: Tick = self.rng.random_range(0..10);
        let burst: Tick = self.rng.random_range(1..=10);
        let priority: i32 = self.rng.random_range(1..=10);
        let period = burst + self.rng.random_range(3..=6);

        let mut process = Process::new(pid, arrival, burst)
            .with_priority(priority)
            .with_period(period)
            .with_deadline(arrival + period);

        if burst > 2 {
            let slots = (burst - 1) as usize;
            let count = self.rng.random_range(0..=MAX_IO_OPERATIONS.min(slots));
            for offset in index::sample(&mut self.rng, slots, count) {
                let io_burst = self.rng.random_range(1..=5);
                process = process.with_io(offset as Tick + 1, io_burst);
            }
        }
        process
    }
}
