//! Schedulability analysis for periodic task sets.
//!
//! # Bounds
//!
//! | Scheduler | Sufficient test |
//! |-----------|-----------------|
//! | EDF | U ≤ 1 |
//! | RMS | U ≤ n(2^(1/n) − 1) |
//!
//! The RMS bound is sufficient but not necessary: a set above it may
//! still be schedulable.
//!
//! # Reference
//! Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//! Hard-Real-Time Environment", Theorems 4 and 7

use serde::{Deserialize, Serialize};

use crate::models::Process;

/// Processor demand of a periodic task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationAnalysis {
    /// `(pid, utilization)` per task; I/O time counts as demand.
    pub per_process: Vec<(usize, f64)>,
    /// Sum of per-task utilizations.
    pub total: f64,
    /// EDF bound (always 1.0).
    pub edf_bound: f64,
    /// Liu-Layland RMS bound for this task count.
    pub rms_bound: f64,
}

impl UtilizationAnalysis {
    /// Analyzes `processes` as a periodic task set.
    ///
    /// Tasks with a non-positive period contribute no utilization.
    pub fn calculate(processes: &[Process]) -> Self {
        let per_process: Vec<(usize, f64)> = processes
            .iter()
            .map(|p| {
                let demand = (p.cpu_burst + p.total_io_time()) as f64;
                let utilization = if p.period > 0 {
                    demand / p.period as f64
                } else {
                    0.0
                };
                (p.pid, utilization)
            })
            .collect();
        let total = per_process.iter().map(|&(_, u)| u).sum();

        Self {
            per_process,
            total,
            edf_bound: 1.0,
            rms_bound: Self::liu_layland_bound(processes.len()),
        }
    }

    /// `n(2^(1/n) − 1)`; 1.0 for a single task, 0.0 for none.
    pub fn liu_layland_bound(n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        let n = n as f64;
        n * (2f64.powf(1.0 / n) - 1.0)
    }

    /// Whether EDF is guaranteed to meet every deadline.
    pub fn edf_schedulable(&self) -> bool {
        self.total <= self.edf_bound
    }

    /// Whether the Liu-Layland test guarantees RMS meets every deadline.
    pub fn rms_schedulable(&self) -> bool {
        self.total <= self.rms_bound
    }
}
