//! Simulation configuration.
//!
//! A single [`SimConfig`] carries the parameters every driver may need.
//! Drivers read only the fields relevant to them: Round Robin reads
//! `time_quantum`, the aging policy reads `aging_threshold`, EDF and RMS
//! read `max_time`.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::SimConfig;
//!
//! let config = SimConfig::new().with_time_quantum(4).with_max_time(60);
//! assert_eq!(config.time_quantum, 4);
//! assert_eq!(config.aging_threshold, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::Tick;

/// Default Round Robin quantum (ticks).
pub const DEFAULT_TIME_QUANTUM: Tick = 2;
/// Default horizon for periodic policies (ticks).
pub const DEFAULT_MAX_TIME: Tick = 100;
/// Default ticks a ready resident waits before its priority is promoted.
pub const DEFAULT_AGING_THRESHOLD: u32 = 3;

/// Parameters of a simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Round Robin quantum (ticks).
    pub time_quantum: Tick,
    /// Horizon for EDF/RMS (ticks).
    pub max_time: Tick,
    /// Aging threshold (ticks resident in ready).
    pub aging_threshold: u32,
    /// Ready queue bound. `None` = derived from the job table bound.
    pub queue_capacity: Option<usize>,
    /// Job table bound for periodic runs.
    /// `None` = `count × ceil(max_time / min_period)`.
    pub job_capacity: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            time_quantum: DEFAULT_TIME_QUANTUM,
            max_time: DEFAULT_MAX_TIME,
            aging_threshold: DEFAULT_AGING_THRESHOLD,
            queue_capacity: None,
            job_capacity: None,
        }
    }
}

impl SimConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Round Robin quantum.
    pub fn with_time_quantum(mut self, quantum: Tick) -> Self {
        self.time_quantum = quantum;
        self
    }

    /// Sets the periodic-policy horizon.
    pub fn with_max_time(mut self, max_time: Tick) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets the aging threshold.
    pub fn with_aging_threshold(mut self, threshold: u32) -> Self {
        self.aging_threshold = threshold;
        self
    }

    /// Bounds the ready queue.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Bounds the job table of periodic runs.
    pub fn with_job_capacity(mut self, capacity: usize) -> Self {
        self.job_capacity = Some(capacity);
        self
    }
}
