//! Error types for simulation runs.
//!
//! Every detectable invariant violation is reported to the caller of a
//! driver as a [`SimError`]. Deadline misses are not errors; they are
//! recorded in [`Metrics`](crate::models::Metrics).

use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimError>;

/// Bounded tables owned by a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueKind {
    /// Ready queue of dispatchable entities.
    Ready,
    /// Job-instance table of a periodic run.
    Jobs,
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Ready => f.write_str("ready queue"),
            QueueKind::Jobs => f.write_str("job table"),
        }
    }
}

/// Errors raised by the simulation engine.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("workload is empty")]
    EmptyWorkload,

    #[error("process {pid}: cpu burst must be positive, got {burst}")]
    InvalidBurst { pid: usize, burst: i64 },

    #[error("process {pid}: arrival time must be non-negative, got {arrival}")]
    InvalidArrival { pid: usize, arrival: i64 },

    #[error("process {pid}: period must be positive, got {period}")]
    InvalidPeriod { pid: usize, period: i64 },

    #[error("time quantum must be positive, got {0}")]
    InvalidQuantum(i64),

    #[error("aging threshold must be positive, got {0}")]
    InvalidAgingThreshold(u32),

    #[error("simulation horizon must be positive, got {0}")]
    InvalidHorizon(i64),

    #[error("process {pid}: {count} I/O operations exceed the limit of {max}")]
    TooManyIoOperations { pid: usize, count: usize, max: usize },

    #[error("process {pid}: I/O offset {io_start} outside (0, {burst})")]
    InvalidIoOffset { pid: usize, io_start: i64, burst: i64 },

    #[error("process {pid}: two I/O operations start at offset {io_start}")]
    DuplicateIoOffset { pid: usize, io_start: i64 },

    #[error("process {pid}: I/O burst must be non-negative, got {io_burst}")]
    InvalidIoBurst { pid: usize, io_burst: i64 },

    #[error("{table} capacity exceeded (capacity {capacity})")]
    CapacityExceeded { table: QueueKind, capacity: usize },

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}
