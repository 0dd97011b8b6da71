//! Periodic release of job instances.

use log::debug;

use super::SimState;
use crate::error::{QueueKind, Result, SimError};
use crate::models::{Process, Tick};

/// Release bookkeeping for one periodic template.
#[derive(Debug, Clone)]
struct Release {
    template: Process,
    next_arrival: Tick,
    next_deadline: Tick,
}

/// Releases a fresh job instance of every template each period.
///
/// Deadlines are chained: the `k`-th instance carries the template's
/// deadline plus `k × period`, independent of when it is released.
#[derive(Debug, Clone)]
pub(crate) struct ReleaseSchedule {
    releases: Vec<Release>,
    capacity: usize,
}

impl ReleaseSchedule {
    /// Prepares releases for `templates` up to `horizon`.
    ///
    /// Without an explicit `capacity`, the job table is bounded by
    /// `templates × ceil(horizon / min_period)`.
    pub(crate) fn new(templates: &[Process], horizon: Tick, capacity: Option<usize>) -> Result<Self> {
        if horizon <= 0 {
            return Err(SimError::InvalidHorizon(horizon));
        }
        if let Some(p) = templates.iter().find(|p| p.period <= 0) {
            return Err(SimError::InvalidPeriod {
                pid: p.pid,
                period: p.period,
            });
        }

        let capacity = capacity.unwrap_or_else(|| {
            let min_period = templates.iter().map(|p| p.period).min().unwrap_or(1);
            let per_template = (horizon + min_period - 1) / min_period;
            templates.len() * per_template as usize
        });

        let releases = templates
            .iter()
            .map(|template| Release {
                template: template.clone(),
                next_arrival: template.arrival_time,
                next_deadline: template.deadline,
            })
            .collect();

        Ok(Self { releases, capacity })
    }

    /// Job table bound.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends every instance due at `state.now` to the job table and
    /// returns their indices in template order.
    pub(crate) fn release_due(&mut self, state: &mut SimState) -> Result<Vec<usize>> {
        let mut released = Vec::new();
        for release in &mut self.releases {
            if release.next_arrival != state.now {
                continue;
            }
            if state.jobs.len() >= self.capacity {
                return Err(SimError::CapacityExceeded {
                    table: QueueKind::Jobs,
                    capacity: self.capacity,
                });
            }
            state.jobs.try_reserve(1)?;
            state.blocked.try_reserve(1)?;

            let mut job = release.template.clone();
            job.reset();
            job.arrival_time = state.now;
            job.deadline = release.next_deadline;

            debug!(
                "t={}: release pid {} (deadline {})",
                state.now, job.pid, job.deadline
            );

            released.push(state.jobs.len());
            state.jobs.push(job);
            state.blocked.push(None);

            release.next_arrival += release.template.period;
            release.next_deadline += release.template.period;
        }
        Ok(released)
    }
}
