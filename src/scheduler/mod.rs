//! Algorithm drivers, KPIs and schedulability analysis.
//!
//! Each driver copies the caller's process snapshot, runs the tick engine
//! under one policy and returns the filled-in processes together with
//! the run [`Metrics`](crate::models::Metrics).
//!
//! # Drivers
//!
//! | Algorithm | Driver | Reads from config |
//! |-----------|--------|-------------------|
//! | FCFS | [`run_fcfs`] | |
//! | SJF (non-preemptive) | [`run_sjf_np`] | |
//! | SJF (preemptive) | [`run_sjf_p`] | |
//! | Priority (non-preemptive) | [`run_priority_np`] | |
//! | Priority (preemptive) | [`run_priority_p`] | |
//! | Round Robin | [`run_rr`] | `time_quantum` |
//! | Priority with aging | [`run_priority_aging`] | `aging_threshold` |
//! | EDF | [`run_edf`] | `max_time` |
//! | RMS | [`run_rms`] | `max_time` |
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"

mod drivers;
mod kpi;
mod utilization;

pub use drivers::{
    run_edf, run_fcfs, run_priority_aging, run_priority_np, run_priority_p, run_rms, run_rr,
    run_sjf_np, run_sjf_p,
};
pub use kpi::{compare_algorithms, AlgorithmKpi, IoStatistics};
pub use utilization::UtilizationAnalysis;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SimConfig;
use crate::engine::SimulationRun;
use crate::error::Result;
use crate::models::{GanttSink, Process};

/// The supported scheduling algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Fcfs,
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin,
    PriorityAging,
    Edf,
    Rms,
}

impl Algorithm {
    /// All algorithms in comparison order.
    pub const ALL: [Algorithm; 9] = [
        Algorithm::Fcfs,
        Algorithm::SjfNonPreemptive,
        Algorithm::SjfPreemptive,
        Algorithm::PriorityNonPreemptive,
        Algorithm::PriorityPreemptive,
        Algorithm::RoundRobin,
        Algorithm::PriorityAging,
        Algorithm::Edf,
        Algorithm::Rms,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::SjfNonPreemptive => "Non-Preemptive SJF",
            Algorithm::SjfPreemptive => "Preemptive SJF",
            Algorithm::PriorityNonPreemptive => "Non-Preemptive Priority",
            Algorithm::PriorityPreemptive => "Preemptive Priority",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::PriorityAging => "Priority with Aging",
            Algorithm::Edf => "EDF",
            Algorithm::Rms => "RMS",
        }
    }

    /// Compact code (e.g., for table columns).
    pub fn short_name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::SjfNonPreemptive => "SJF-NP",
            Algorithm::SjfPreemptive => "SJF-P",
            Algorithm::PriorityNonPreemptive => "PRI-NP",
            Algorithm::PriorityPreemptive => "PRI-P",
            Algorithm::RoundRobin => "RR",
            Algorithm::PriorityAging => "PRI-AGING",
            Algorithm::Edf => "EDF",
            Algorithm::Rms => "RMS",
        }
    }

    /// Whether the algorithm releases periodic job instances up to a horizon.
    pub fn is_periodic(self) -> bool {
        matches!(self, Algorithm::Edf | Algorithm::Rms)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs the driver for `algorithm`.
///
/// # Example
///
/// ```
/// use u_cpusim::models::{GanttChart, Process};
/// use u_cpusim::scheduler::{run, Algorithm};
/// use u_cpusim::SimConfig;
///
/// let processes = vec![Process::new(0, 0, 5), Process::new(1, 0, 3)];
/// let mut gantt = GanttChart::new();
/// let result = run(Algorithm::RoundRobin, &processes, &SimConfig::default(), &mut gantt).unwrap();
///
/// assert_eq!(result.metrics.total_time, 8);
/// assert_eq!(gantt.run_ticks_for(0), 5);
/// ```
pub fn run(
    algorithm: Algorithm,
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    match algorithm {
        Algorithm::Fcfs => run_fcfs(processes, config, gantt),
        Algorithm::SjfNonPreemptive => run_sjf_np(processes, config, gantt),
        Algorithm::SjfPreemptive => run_sjf_p(processes, config, gantt),
        Algorithm::PriorityNonPreemptive => run_priority_np(processes, config, gantt),
        Algorithm::PriorityPreemptive => run_priority_p(processes, config, gantt),
        Algorithm::RoundRobin => run_rr(processes, config, gantt),
        Algorithm::PriorityAging => run_priority_aging(processes, config, gantt),
        Algorithm::Edf => run_edf(processes, config, gantt),
        Algorithm::Rms => run_rms(processes, config, gantt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GanttChart, Tick};
    use crate::workload::WorkloadGenerator;

    #[test]
    fn test_algorithm_names() {
        assert_eq!(Algorithm::ALL.len(), 9);
        assert_eq!(Algorithm::SjfPreemptive.to_string(), "Preemptive SJF");
        assert_eq!(Algorithm::PriorityAging.short_name(), "PRI-AGING");
        assert!(Algorithm::Edf.is_periodic());
        assert!(!Algorithm::RoundRobin.is_periodic());
    }

    #[test]
    fn test_every_one_shot_algorithm_conserves_work() {
        let processes = WorkloadGenerator::new(7).generate(6);
        let config = SimConfig::default();

        for algorithm in Algorithm::ALL.into_iter().filter(|a| !a.is_periodic()) {
            let mut gantt = GanttChart::new();
            let result = run(algorithm, &processes, &config, &mut gantt).unwrap();

            for p in &result.processes {
                assert_eq!(gantt.run_ticks_for(p.pid), p.cpu_burst, "{algorithm}");
                assert!(p.is_completed(), "{algorithm}");
                assert_eq!(p.turnaround_time, p.comp_time - p.arrival_time);
                // Turnaround covers running, waiting and blocked ticks
                assert_eq!(
                    p.turnaround_time,
                    p.cpu_burst + p.waiting_time + p.total_io_time(),
                    "{algorithm} pid {}",
                    p.pid
                );
            }
            assert_eq!(result.metrics.total_time, gantt.span());
            assert_eq!(
                result.metrics.total_time,
                result.metrics.idle_time + gantt.busy_time()
            );
        }
    }

    #[test]
    fn test_periodic_algorithms_fill_horizon() {
        let processes = WorkloadGenerator::new(11).generate(4);
        let config = SimConfig::default().with_max_time(40);

        for algorithm in [Algorithm::Edf, Algorithm::Rms] {
            let mut gantt = GanttChart::new();
            let result = run(algorithm, &processes, &config, &mut gantt).unwrap();
            assert_eq!(result.metrics.total_time, 40);
            assert_eq!(gantt.len(), 40);

            let run_ticks: Tick = result.metrics.jobs.iter().map(|j| j.progress).sum();
            assert_eq!(run_ticks, gantt.busy_time());
            for miss in &result.metrics.deadline_misses {
                assert!(miss.completion_time > miss.deadline);
            }
        }
    }

    #[test]
    fn test_runs_are_deterministic() {
        let processes = WorkloadGenerator::new(42).generate(8);
        let config = SimConfig::default().with_max_time(50);

        for algorithm in Algorithm::ALL {
            let mut first_gantt = GanttChart::new();
            let first = run(algorithm, &processes, &config, &mut first_gantt).unwrap();
            let mut second_gantt = GanttChart::new();
            let second = run(algorithm, &processes, &config, &mut second_gantt).unwrap();

            assert_eq!(first, second, "{algorithm}");
            assert_eq!(first_gantt, second_gantt, "{algorithm}");
        }
    }
}
