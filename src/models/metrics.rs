//! Run metrics and domain event logs.

use serde::{Deserialize, Serialize};

use super::{Process, Tick};

/// A job instance that completed after its absolute deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineMissInfo {
    /// Pid of the parent process.
    pub pid: usize,
    /// Release tick of the job instance.
    pub arrival_time: Tick,
    /// Absolute deadline of the job instance.
    pub deadline: Tick,
    /// Actual completion tick.
    pub completion_time: Tick,
}

impl DeadlineMissInfo {
    /// Ticks past the deadline.
    #[inline]
    pub fn delay(&self) -> Tick {
        self.completion_time - self.deadline
    }
}

/// A priority promotion applied by aging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgingEvent {
    /// Tick at which the promotion happened.
    pub tick: Tick,
    /// Promoted process.
    pub pid: usize,
    /// Age reached when promoted.
    pub age: u32,
    /// Priority before promotion.
    pub old_priority: i32,
    /// Priority after promotion.
    pub new_priority: i32,
}

/// Aggregate result of one simulation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Elapsed ticks.
    pub total_time: Tick,
    /// Ticks with an empty running slot.
    pub idle_time: Tick,
    /// Deadline misses in completion order (periodic policies only).
    pub deadline_misses: Vec<DeadlineMissInfo>,
    /// Every job instance released (periodic policies only).
    pub jobs: Vec<Process>,
    /// Priority promotions (aging policy only).
    pub aging_log: Vec<AgingEvent>,
    /// Number of times a running occupant was displaced before completion
    /// by another entity (including Round Robin rotations with a waiting
    /// successor).
    pub preemptions: usize,
}

impl Metrics {
    /// Number of recorded deadline misses.
    pub fn deadline_miss_count(&self) -> usize {
        self.deadline_misses.len()
    }

    /// Ticks spent executing.
    #[inline]
    pub fn busy_time(&self) -> Tick {
        self.total_time - self.idle_time
    }

    /// Job instances that completed within the horizon.
    pub fn completed_jobs(&self) -> impl Iterator<Item = &Process> {
        self.jobs.iter().filter(|j| j.is_completed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_delay() {
        let miss = DeadlineMissInfo {
            pid: 1,
            arrival_time: 5,
            deadline: 10,
            completion_time: 13,
        };
        assert_eq!(miss.delay(), 3);
    }

    #[test]
    fn test_metrics_accessors() {
        let mut done = Process::new(0, 0, 2);
        done.progress = 2;
        done.comp_time = 2;
        let pending = Process::new(0, 4, 2);

        let metrics = Metrics {
            total_time: 10,
            idle_time: 4,
            jobs: vec![done, pending],
            ..Default::default()
        };
        assert_eq!(metrics.busy_time(), 6);
        assert_eq!(metrics.deadline_miss_count(), 0);
        assert_eq!(metrics.completed_jobs().count(), 1);
    }
}
