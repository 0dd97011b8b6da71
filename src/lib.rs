//! Deterministic tick-level CPU scheduling simulator.
//!
//! Simulates a uniprocessor executing processes whose CPU bursts are
//! interrupted by up to three I/O operations, under nine scheduling
//! policies, and reports per-process statistics, aggregate metrics and a
//! Gantt timeline.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `IoOperation`, `Metrics`,
//!   `DeadlineMissInfo`, `GanttChart`
//! - **`engine`**: The generic tick loop and periodic job release
//! - **`policy`**: One [`Policy`](policy::Policy) per algorithm
//! - **`scheduler`**: Per-algorithm drivers, KPIs, utilization analysis
//! - **`queue`** / **`ordering`**: Bounded ready queue and its criteria
//! - **`workload`**: Seeded random process tables
//!
//! # Example
//!
//! ```
//! use u_cpusim::models::{GanttChart, Process};
//! use u_cpusim::{run_sjf_p, SimConfig};
//!
//! let processes = vec![Process::new(0, 0, 6), Process::new(1, 2, 2)];
//! let mut gantt = GanttChart::new();
//! let run = run_sjf_p(&processes, &SimConfig::default(), &mut gantt).unwrap();
//!
//! assert_eq!(run.processes[1].comp_time, 4);
//! assert_eq!(run.metrics.preemptions, 1);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Liu & Layland (1973), "Scheduling Algorithms for Multiprogramming in a
//!   Hard-Real-Time Environment"

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod ordering;
pub mod policy;
pub mod queue;
pub mod scheduler;
pub mod workload;

pub use config::SimConfig;
pub use engine::SimulationRun;
pub use error::{Result, SimError};
pub use scheduler::{
    compare_algorithms, run, run_edf, run_fcfs, run_priority_aging, run_priority_np,
    run_priority_p, run_rms, run_rr, run_sjf_np, run_sjf_p, Algorithm,
};
