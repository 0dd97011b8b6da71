//! Algorithm performance indicators.
//!
//! Summarizes a [`SimulationRun`] into the figures used to compare
//! scheduling algorithms on the same workload.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting | Mean ready-queue residence of completed entities |
//! | Avg Turnaround | Mean `completion - arrival` (one-shot algorithms only) |
//! | CPU Utilization | `(total - idle) / total × 100` |
//! | Throughput | Completed entities per 100 ticks |
//! | Missed Deadlines | Job instances completed after their deadline (EDF/RMS only) |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::{run, Algorithm};
use crate::config::SimConfig;
use crate::engine::SimulationRun;
use crate::error::Result;
use crate::models::{GanttChart, Process, Tick};

/// Performance indicators of one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmKpi {
    /// Algorithm that produced the run.
    pub algorithm: Algorithm,
    /// Mean waiting time (ticks).
    pub avg_waiting_time: f64,
    /// Mean turnaround time (ticks); `None` for periodic algorithms.
    pub avg_turnaround_time: Option<f64>,
    /// Busy share of the run (0.0..100.0).
    pub cpu_utilization: f64,
    /// Completed entities per 100 ticks.
    pub throughput: f64,
    /// Elapsed ticks.
    pub total_time: Tick,
    /// Deadline misses; `None` for one-shot algorithms.
    pub missed_deadlines: Option<usize>,
}

impl AlgorithmKpi {
    /// Computes KPIs from a finished run.
    ///
    /// Periodic runs average over the job instances that completed within
    /// the horizon; one-shot runs over all processes.
    pub fn calculate(algorithm: Algorithm, run: &SimulationRun) -> Self {
        let metrics = &run.metrics;
        let completed: Vec<&Process> = if algorithm.is_periodic() {
            metrics.completed_jobs().collect()
        } else {
            run.processes.iter().collect()
        };

        let count = completed.len();
        let mean = |total: Tick| {
            if count == 0 {
                0.0
            } else {
                total as f64 / count as f64
            }
        };

        let avg_waiting_time = mean(completed.iter().map(|p| p.waiting_time).sum());
        let avg_turnaround_time = (!algorithm.is_periodic())
            .then(|| mean(completed.iter().map(|p| p.turnaround_time).sum()));

        let (cpu_utilization, throughput) = if metrics.total_time > 0 {
            let total = metrics.total_time as f64;
            (
                metrics.busy_time() as f64 / total * 100.0,
                count as f64 / total * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            algorithm,
            avg_waiting_time,
            avg_turnaround_time,
            cpu_utilization,
            throughput,
            total_time: metrics.total_time,
            missed_deadlines: algorithm
                .is_periodic()
                .then(|| metrics.deadline_miss_count()),
        }
    }
}

/// Runs every algorithm on the same snapshot and collects their KPIs.
///
/// Each run gets its own Gantt buffer; the caller's slice is untouched.
pub fn compare_algorithms(processes: &[Process], config: &SimConfig) -> Result<Vec<AlgorithmKpi>> {
    Algorithm::ALL
        .into_iter()
        .map(|algorithm| {
            let mut gantt = GanttChart::new();
            let result = run(algorithm, processes, config, &mut gantt)?;
            Ok(AlgorithmKpi::calculate(algorithm, &result))
        })
        .collect()
}

/// I/O profile of a workload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoStatistics {
    /// Processes with at least one I/O operation.
    pub processes_with_io: usize,
    /// Total I/O operations.
    pub total_operations: usize,
    /// Sum of all I/O bursts.
    pub total_io_time: Tick,
    /// Shortest I/O burst (0 when there is no I/O).
    pub min_io_burst: Tick,
    /// Longest I/O burst (0 when there is no I/O).
    pub max_io_burst: Tick,
    /// Mean I/O burst.
    pub avg_io_burst: f64,
}

impl IoStatistics {
    /// Collects statistics over all I/O operations of `processes`.
    pub fn calculate(processes: &[Process]) -> Self {
        let bursts: Vec<Tick> = processes
            .iter()
            .flat_map(|p| p.io_operations.iter().map(|op| op.io_burst))
            .collect();
        if bursts.is_empty() {
            return Self::default();
        }

        let total: Tick = bursts.iter().sum();
        Self {
            processes_with_io: processes.iter().filter(|p| p.io_count() > 0).count(),
            total_operations: bursts.len(),
            total_io_time: total,
            min_io_burst: bursts.iter().copied().min().unwrap_or(0),
            max_io_burst: bursts.iter().copied().max().unwrap_or(0),
            avg_io_burst: total as f64 / bursts.len() as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kpi_fcfs() {
        let processes = vec![Process::new(0, 0, 3), Process::new(1, 1, 2)];
        let mut gantt = GanttChart::new();
        let result = run(Algorithm::Fcfs, &processes, &SimConfig::default(), &mut gantt).unwrap();
        let kpi = AlgorithmKpi::calculate(Algorithm::Fcfs, &result);

        assert!((kpi.avg_waiting_time - 1.0).abs() < 1e-10); // (0+2)/2
        assert!((kpi.avg_turnaround_time.unwrap() - 3.5).abs() < 1e-10); // (3+4)/2
        assert!((kpi.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((kpi.throughput - 40.0).abs() < 1e-10); // 2/5
        assert_eq!(kpi.total_time, 5);
        assert_eq!(kpi.missed_deadlines, None);
    }

    #[test]
    fn test_kpi_idle_lowers_utilization() {
        let processes = vec![Process::new(0, 0, 3).with_io(1, 3)];
        let mut gantt = GanttChart::new();
        let result = run(Algorithm::Fcfs, &processes, &SimConfig::default(), &mut gantt).unwrap();
        let kpi = AlgorithmKpi::calculate(Algorithm::Fcfs, &result);
        assert!((kpi.cpu_utilization - 50.0).abs() < 1e-10); // 3 idle of 6
    }

    #[test]
    fn test_kpi_periodic() {
        let processes = vec![
            Process::new(0, 0, 3).with_deadline(4).with_period(4),
            Process::new(1, 0, 3).with_deadline(5).with_period(5),
        ];
        let config = SimConfig::default().with_max_time(20);
        let mut gantt = GanttChart::new();
        let result = run(Algorithm::Edf, &processes, &config, &mut gantt).unwrap();
        let kpi = AlgorithmKpi::calculate(Algorithm::Edf, &result);

        assert_eq!(kpi.avg_turnaround_time, None);
        assert_eq!(kpi.missed_deadlines, Some(5));
        assert_eq!(kpi.total_time, 20);
        let completed = result.metrics.completed_jobs().count() as f64;
        assert!((kpi.throughput - completed / 20.0 * 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_compare_algorithms_covers_all() {
        let processes = vec![
            Process::new(0, 0, 4).with_priority(2).with_deadline(8).with_period(8),
            Process::new(1, 1, 2).with_priority(1).with_deadline(6).with_period(5),
        ];
        let config = SimConfig::default().with_max_time(20);
        let kpis = compare_algorithms(&processes, &config).unwrap();

        assert_eq!(kpis.len(), 9);
        for (kpi, algorithm) in kpis.iter().zip(Algorithm::ALL) {
            assert_eq!(kpi.algorithm, algorithm);
            assert_eq!(kpi.avg_turnaround_time.is_none(), algorithm.is_periodic());
            assert_eq!(kpi.missed_deadlines.is_some(), algorithm.is_periodic());
        }
    }

    #[test]
    fn test_compare_algorithms_propagates_errors() {
        let config = SimConfig::default().with_time_quantum(0);
        assert!(compare_algorithms(&[Process::new(0, 0, 2)], &config).is_err());
    }

    #[test]
    fn test_io_statistics() {
        let processes = vec![
            Process::new(0, 0, 6).with_io(1, 2).with_io(3, 4),
            Process::new(1, 0, 3),
            Process::new(2, 0, 4).with_io(2, 3),
        ];
        let stats = IoStatistics::calculate(&processes);
        assert_eq!(stats.processes_with_io, 2);
        assert_eq!(stats.total_operations, 3);
        assert_eq!(stats.total_io_time, 9);
        assert_eq!(stats.min_io_burst, 2);
        assert_eq!(stats.max_io_burst, 4);
        assert!((stats.avg_io_burst - 3.0).abs() < 1e-10);

        assert_eq!(IoStatistics::calculate(&[Process::new(0, 0, 1)]), IoStatistics::default());
    }
}
