//! Process (and job instance) model.
//!
//! A process is a CPU burst interrupted by up to [`MAX_IO_OPERATIONS`]
//! I/O operations. Under periodic policies (EDF, RMS) every release of a
//! process produces a job instance, which is a `Process` value sharing the
//! parent's `pid` but owning its own arrival, deadline and run state.

use serde::{Deserialize, Serialize};

use super::Tick;

/// Maximum number of I/O operations per process.
pub const MAX_IO_OPERATIONS: usize = 3;

/// An I/O operation issued mid-burst.
///
/// `io_start` is a progress offset inside the CPU burst: once the process
/// has consumed exactly `io_start` CPU ticks it blocks for `io_burst` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoOperation {
    /// CPU progress at which the operation starts.
    pub io_start: Tick,
    /// Blocking duration (ticks).
    pub io_burst: Tick,
}

impl IoOperation {
    /// Creates an I/O operation.
    pub fn new(io_start: Tick, io_burst: Tick) -> Self {
        Self { io_start, io_burst }
    }
}

/// A schedulable process.
///
/// Input fields are set by the workload producer; run-state fields are
/// owned by the engine and reset at the start of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Process identifier, shared by all job instances of a process.
    pub pid: usize,
    /// Arrival tick.
    pub arrival_time: Tick,
    /// Total CPU ticks required.
    pub cpu_burst: Tick,
    /// Scheduling priority (lower = more urgent).
    pub priority: i32,
    /// Absolute deadline.
    pub deadline: Tick,
    /// Release interval; unused by non-periodic policies.
    pub period: Tick,
    /// I/O operations, ascending by `io_start`.
    pub io_operations: Vec<IoOperation>,

    /// CPU ticks still required.
    pub remaining_time: Tick,
    /// CPU ticks consumed so far.
    pub progress: Tick,
    /// Completion tick (0 until completed).
    pub comp_time: Tick,
    /// Final waiting time, copied from the counter at completion.
    pub waiting_time: Tick,
    /// `comp_time - arrival_time`.
    pub turnaround_time: Tick,
    /// Ticks spent resident in the ready queue.
    pub waiting_time_counter: Tick,
    /// Set when a job instance completes after its deadline.
    pub missed_deadline: bool,
}

impl Process {
    /// Creates a process with the given identity, arrival and burst.
    pub fn new(pid: usize, arrival_time: Tick, cpu_burst: Tick) -> Self {
        Self {
            pid,
            arrival_time,
            cpu_burst,
            priority: 0,
            deadline: 0,
            period: 0,
            io_operations: Vec::new(),
            remaining_time: cpu_burst,
            progress: 0,
            comp_time: 0,
            waiting_time: 0,
            turnaround_time: 0,
            waiting_time_counter: 0,
            missed_deadline: false,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the absolute deadline.
    pub fn with_deadline(mut self, deadline: Tick) -> Self {
        self.deadline = deadline;
        self
    }

    /// Sets the release period.
    pub fn with_period(mut self, period: Tick) -> Self {
        self.period = period;
        self
    }

    /// Adds an I/O operation, keeping operations sorted by start offset.
    pub fn with_io(mut self, io_start: Tick, io_burst: Tick) -> Self {
        self.io_operations.push(IoOperation::new(io_start, io_burst));
        self.io_operations.sort_by_key(|op| op.io_start);
        self
    }

    /// Clears all run state.
    pub fn reset(&mut self) {
        self.remaining_time = self.cpu_burst;
        self.progress = 0;
        self.comp_time = 0;
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.waiting_time_counter = 0;
        self.missed_deadline = false;
    }

    /// The I/O operation starting at the given progress offset, if any.
    pub fn io_at(&self, progress: Tick) -> Option<&IoOperation> {
        self.io_operations.iter().find(|op| op.io_start == progress)
    }

    /// Number of I/O operations.
    pub fn io_count(&self) -> usize {
        self.io_operations.len()
    }

    /// Sum of all I/O bursts.
    pub fn total_io_time(&self) -> Tick {
        self.io_operations.iter().map(|op| op.io_burst).sum()
    }

    /// Whether the process (or job instance) has completed.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.progress == self.cpu_burst && self.comp_time > 0
    }

    /// Remaining CPU demand derived from progress.
    #[inline]
    pub fn remaining(&self) -> Tick {
        self.cpu_burst - self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(3, 2, 8)
            .with_priority(4)
            .with_deadline(12)
            .with_period(10);

        assert_eq!(p.pid, 3);
        assert_eq!(p.arrival_time, 2);
        assert_eq!(p.cpu_burst, 8);
        assert_eq!(p.priority, 4);
        assert_eq!(p.deadline, 12);
        assert_eq!(p.period, 10);
        assert_eq!(p.remaining_time, 8);
        assert!(!p.is_completed());
    }

    #[test]
    fn test_io_sorted_by_start() {
        let p = Process::new(0, 0, 10).with_io(6, 1).with_io(2, 3).with_io(4, 2);
        let starts: Vec<Tick> = p.io_operations.iter().map(|op| op.io_start).collect();
        assert_eq!(starts, vec![2, 4, 6]);
        assert_eq!(p.io_count(), 3);
        assert_eq!(p.total_io_time(), 6);
    }

    #[test]
    fn test_io_at_progress() {
        let p = Process::new(0, 0, 10).with_io(3, 4);
        assert_eq!(p.io_at(3).map(|op| op.io_burst), Some(4));
        assert!(p.io_at(2).is_none());
    }

    #[test]
    fn test_reset_clears_run_state() {
        let mut p = Process::new(0, 1, 5);
        p.progress = 5;
        p.remaining_time = 0;
        p.comp_time = 9;
        p.turnaround_time = 8;
        p.waiting_time = 3;
        p.waiting_time_counter = 3;
        p.missed_deadline = true;

        p.reset();
        assert_eq!(p.progress, 0);
        assert_eq!(p.remaining_time, 5);
        assert_eq!(p.comp_time, 0);
        assert_eq!(p.waiting_time_counter, 0);
        assert!(!p.missed_deadline);
    }

    #[test]
    fn test_serde_roundtrip_keeps_io() {
        let p = Process::new(1, 0, 6).with_io(2, 2);
        let json = serde_json::to_string(&p).unwrap();
        let back: Process = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
