//! Simulation domain models.
//!
//! Provides the data types handed to and produced by the engine: the
//! process (and job instance) table, the Gantt timeline, and run metrics.
//!
//! # Time Representation
//! All times are integer ticks relative to the start of a run (t=0).
//!
//! # Lifecycle
//!
//! | State | Meaning |
//! |-------|---------|
//! | not-yet-arrived | `now < arrival_time` |
//! | ready | resident in the ready queue, accruing waiting time |
//! | running | occupying the single CPU slot |
//! | blocked | counting down an I/O operation |
//! | finished | `progress == cpu_burst`, `comp_time` set |

mod gantt;
mod metrics;
mod process;

pub use gantt::{GanttChart, GanttEntry, GanttSink, GanttStatus};
pub use metrics::{AgingEvent, DeadlineMissInfo, Metrics};
pub use process::{IoOperation, Process, MAX_IO_OPERATIONS};

/// Discrete simulation time.
pub type Tick = i64;
