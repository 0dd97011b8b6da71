//! Generic tick engine.
//!
//! One deterministic loop drives every policy. Each tick runs, in order:
//!
//! 0. policy pre-tick hook (quantum expiry, aging)
//! 1. arrivals / periodic releases, each admitted with a preemption check
//! 2. I/O countdowns; completions are admitted exactly like arrivals
//! 3. policy resort of the ready queue
//! 4. dispatch into an empty CPU
//! 5. execute one tick and emit a Gantt entry
//! 6. block on I/O or complete
//! 7. charge one waiting tick to every ready resident
//!
//! The order is part of the observable behavior: an arrival and an I/O
//! completion landing on the same tick are admitted in that order, and
//! each may preempt.

mod release;

use log::{debug, info, trace};

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::models::{
    DeadlineMissInfo, GanttSink, GanttStatus, Metrics, Process, Tick, MAX_IO_OPERATIONS,
};
use crate::policy::{Admission, Policy};
use crate::queue::ReadyQueue;

use release::ReleaseSchedule;

/// Mutable tables of one simulation run.
///
/// Exposed to [`Policy::on_tick_extra`] so policies can rotate or promote
/// residents. Indices in `ready`, `running` and `blocked` refer to `jobs`.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Current tick.
    pub now: Tick,
    /// Process table (one-shot runs) or job-instance table (periodic runs).
    pub jobs: Vec<Process>,
    /// Ready queue.
    pub ready: ReadyQueue,
    /// Running slot.
    pub running: Option<usize>,
    /// Remaining I/O countdown per job; `None` = not blocked.
    pub blocked: Vec<Option<Tick>>,
    /// Metrics accumulated so far.
    pub metrics: Metrics,
    completed: usize,
}

impl SimState {
    /// Creates the tables for `jobs` with a bounded ready queue.
    pub fn new(jobs: Vec<Process>, queue_capacity: usize) -> Self {
        let blocked = vec![None; jobs.len()];
        Self {
            now: 0,
            jobs,
            ready: ReadyQueue::with_capacity(queue_capacity),
            running: None,
            blocked,
            metrics: Metrics::default(),
            completed: 0,
        }
    }

    /// Number of completed entities.
    pub fn completed(&self) -> usize {
        self.completed
    }
}

/// Result of one driver invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    /// Process table with run state filled in. For periodic policies this
    /// is the reset input snapshot; per-release statistics are in
    /// [`Metrics::jobs`].
    pub processes: Vec<Process>,
    /// Aggregate metrics.
    pub metrics: Metrics,
}

/// Tick engine parameterized by a scheduling policy.
///
/// # Example
///
/// ```
/// use u_cpusim::engine::Engine;
/// use u_cpusim::models::{GanttChart, Process};
/// use u_cpusim::policy::Fcfs;
/// use u_cpusim::SimConfig;
///
/// let processes = vec![Process::new(0, 0, 3), Process::new(1, 1, 2)];
/// let mut gantt = GanttChart::new();
/// let run = Engine::one_shot(Fcfs)
///     .run(&processes, &SimConfig::default(), &mut gantt)
///     .unwrap();
///
/// assert_eq!(run.metrics.total_time, 5);
/// assert_eq!(run.processes[1].waiting_time, 2);
/// ```
#[derive(Debug)]
pub struct Engine<P: Policy> {
    policy: P,
    horizon: Option<Tick>,
}

impl<P: Policy> Engine<P> {
    /// Runs every process once; stops when all have completed.
    pub fn one_shot(policy: P) -> Self {
        Self {
            policy,
            horizon: None,
        }
    }

    /// Releases a job instance every period; stops at `horizon`.
    pub fn periodic(policy: P, horizon: Tick) -> Self {
        Self {
            policy,
            horizon: Some(horizon),
        }
    }

    /// The policy driving this engine.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Simulates `processes` and streams the timeline into `gantt`.
    ///
    /// The input slice is copied and reset; it is never mutated.
    pub fn run<G: GanttSink>(
        mut self,
        processes: &[Process],
        config: &SimConfig,
        gantt: &mut G,
    ) -> Result<SimulationRun> {
        check_workload(processes)?;

        let mut snapshot = Vec::new();
        snapshot.try_reserve_exact(processes.len())?;
        snapshot.extend(processes.iter().cloned());
        snapshot.iter_mut().for_each(Process::reset);

        let mut releases = match self.horizon {
            Some(horizon) => Some(ReleaseSchedule::new(
                &snapshot,
                horizon,
                config.job_capacity,
            )?),
            None => None,
        };

        let (jobs, job_bound) = match &releases {
            Some(schedule) => {
                let mut jobs = Vec::new();
                jobs.try_reserve_exact(schedule.capacity())?;
                (jobs, schedule.capacity())
            }
            None => (snapshot.clone(), snapshot.len()),
        };
        let mut state = SimState::new(jobs, config.queue_capacity.unwrap_or(job_bound));

        debug!(
            "{}: starting run with {} processes{}",
            self.policy.name(),
            processes.len(),
            self.horizon
                .map(|h| format!(", horizon {h}"))
                .unwrap_or_default()
        );

        loop {
            let finished = match self.horizon {
                Some(horizon) => state.now >= horizon,
                None => state.completed == state.jobs.len(),
            };
            if finished {
                break;
            }
            self.step(&mut state, releases.as_mut(), gantt)?;
        }

        let mut metrics = state.metrics;
        metrics.total_time = state.now;
        let processes = match releases {
            Some(_) => {
                metrics.jobs = state.jobs;
                snapshot
            }
            None => state.jobs,
        };

        debug!(
            "{}: finished at t={} (idle {}, preemptions {}, misses {})",
            self.policy.name(),
            metrics.total_time,
            metrics.idle_time,
            metrics.preemptions,
            metrics.deadline_miss_count()
        );

        Ok(SimulationRun { processes, metrics })
    }

    fn step<G: GanttSink>(
        &mut self,
        state: &mut SimState,
        releases: Option<&mut ReleaseSchedule>,
        gantt: &mut G,
    ) -> Result<()> {
        self.policy.on_tick_extra(state)?;

        // Arrivals
        match releases {
            Some(schedule) => {
                for idx in schedule.release_due(state)? {
                    self.admit(state, idx)?;
                }
            }
            None => {
                for idx in 0..state.jobs.len() {
                    if state.jobs[idx].arrival_time == state.now {
                        self.admit(state, idx)?;
                    }
                }
            }
        }

        // I/O completions
        for idx in 0..state.blocked.len() {
            let Some(left) = state.blocked[idx] else {
                continue;
            };
            if left > 1 {
                state.blocked[idx] = Some(left - 1);
                continue;
            }
            state.blocked[idx] = None;
            debug!("t={}: pid {} resumes from I/O", state.now, state.jobs[idx].pid);
            self.admit(state, idx)?;
        }

        self.policy.reorder(&mut state.ready, &state.jobs);

        if state.running.is_none() {
            if let Some(next) = self.policy.select_next(&mut state.ready, &state.jobs) {
                state.running = Some(next);
                self.policy.on_dispatch(next);
                trace!("t={}: dispatch pid {}", state.now, state.jobs[next].pid);
            }
        }

        let now = state.now;
        match state.running {
            None => {
                gantt.add_entry(now, now + 1, None, GanttStatus::Idle);
                state.metrics.idle_time += 1;
            }
            Some(idx) => {
                self.execute(state, idx, gantt);
            }
        }

        for idx in state.ready.iter() {
            state.jobs[idx].waiting_time_counter += 1;
        }

        state.now += 1;
        Ok(())
    }

    fn execute<G: GanttSink>(&mut self, state: &mut SimState, idx: usize, gantt: &mut G) {
        let now = state.now;
        let job = &mut state.jobs[idx];
        gantt.add_entry(now, now + 1, Some(job.pid), GanttStatus::Run);
        job.progress += 1;
        job.remaining_time = job.remaining();
        self.policy.on_execute(idx);

        if let Some(io) = job.io_at(job.progress) {
            // Countdown includes the tick that observes completion.
            state.blocked[idx] = Some(io.io_burst + 1);
            debug!(
                "t={}: pid {} blocks on I/O for {} ticks",
                now, job.pid, io.io_burst
            );
        } else if job.progress == job.cpu_burst {
            job.comp_time = now + 1;
            job.turnaround_time = job.comp_time - job.arrival_time;
            job.waiting_time = job.waiting_time_counter;
            state.completed += 1;

            if self.horizon.is_some() && job.comp_time > job.deadline {
                job.missed_deadline = true;
                let miss = DeadlineMissInfo {
                    pid: job.pid,
                    arrival_time: job.arrival_time,
                    deadline: job.deadline,
                    completion_time: job.comp_time,
                };
                info!(
                    "t={}: pid {} missed deadline {} (completed {})",
                    now, miss.pid, miss.deadline, miss.completion_time
                );
                state.metrics.deadline_misses.push(miss);
            }
        } else {
            return;
        }

        state.running = None;
        self.policy.on_vacate(idx);
    }

    fn admit(&mut self, state: &mut SimState, idx: usize) -> Result<()> {
        match self.policy.admit(&state.jobs, idx, state.running) {
            Admission::Preempt => {
                if let Some(occupant) = state.running.replace(idx) {
                    self.policy.enqueue(&mut state.ready, &state.jobs, occupant)?;
                    state.metrics.preemptions += 1;
                    debug!(
                        "t={}: pid {} preempts pid {}",
                        state.now, state.jobs[idx].pid, state.jobs[occupant].pid
                    );
                }
                self.policy.on_dispatch(idx);
            }
            Admission::Enqueue => {
                self.policy.enqueue(&mut state.ready, &state.jobs, idx)?;
            }
        }
        Ok(())
    }
}

/// Rejects inputs that would stall or corrupt the tick loop.
fn check_workload(processes: &[Process]) -> Result<()> {
    if processes.is_empty() {
        return Err(SimError::EmptyWorkload);
    }

    for p in processes {
        if p.cpu_burst <= 0 {
            return Err(SimError::InvalidBurst {
                pid: p.pid,
                burst: p.cpu_burst,
            });
        }
        if p.arrival_time < 0 {
            return Err(SimError::InvalidArrival {
                pid: p.pid,
                arrival: p.arrival_time,
            });
        }
        if p.io_operations.len() > MAX_IO_OPERATIONS {
            return Err(SimError::TooManyIoOperations {
                pid: p.pid,
                count: p.io_operations.len(),
                max: MAX_IO_OPERATIONS,
            });
        }
        for (i, op) in p.io_operations.iter().enumerate() {
            if op.io_start <= 0 || op.io_start >= p.cpu_burst {
                return Err(SimError::InvalidIoOffset {
                    pid: p.pid,
                    io_start: op.io_start,
                    burst: p.cpu_burst,
                });
            }
            if op.io_burst < 0 {
                return Err(SimError::InvalidIoBurst {
                    pid: p.pid,
                    io_burst: op.io_burst,
                });
            }
            if p.io_operations[..i].iter().any(|o| o.io_start == op.io_start) {
                return Err(SimError::DuplicateIoOffset {
                    pid: p.pid,
                    io_start: op.io_start,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GanttChart;
    use crate::policy::{Fcfs, PriorityPreemptive, SjfPreemptive};

    fn spans(gantt: &GanttChart) -> Vec<(Tick, Tick, Option<usize>)> {
        gantt
            .consolidate()
            .entries
            .iter()
            .map(|e| (e.start, e.end, e.pid))
            .collect()
    }

    #[test]
    fn test_io_blocks_for_exactly_io_burst_ticks() {
        let processes = vec![Process::new(0, 0, 3).with_io(1, 3)];
        let mut gantt = GanttChart::new();
        let run = Engine::one_shot(Fcfs)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();

        assert_eq!(spans(&gantt), vec![(0, 1, Some(0)), (1, 4, None), (4, 6, Some(0))]);
        assert_eq!(run.metrics.total_time, 6);
        assert_eq!(run.metrics.idle_time, 3);
        assert_eq!(run.processes[0].comp_time, 6);
        assert_eq!(run.processes[0].waiting_time, 0);
    }

    #[test]
    fn test_io_overlaps_with_other_work() {
        let processes = vec![Process::new(0, 0, 4).with_io(2, 2), Process::new(1, 1, 3)];
        let mut gantt = GanttChart::new();
        let run = Engine::one_shot(Fcfs)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();

        assert_eq!(spans(&gantt), vec![(0, 2, Some(0)), (2, 5, Some(1)), (5, 7, Some(0))]);
        assert_eq!(run.metrics.idle_time, 0);
        let p0 = &run.processes[0];
        assert_eq!((p0.comp_time, p0.turnaround_time, p0.waiting_time), (7, 7, 1));
        let p1 = &run.processes[1];
        assert_eq!((p1.comp_time, p1.turnaround_time, p1.waiting_time), (5, 4, 1));
    }

    #[test]
    fn test_io_completion_preempts() {
        // P0 returns from I/O at t=2 with 3 ticks left, P1 has 5 left
        let processes = vec![Process::new(0, 0, 4).with_io(1, 1), Process::new(1, 0, 6)];
        let mut gantt = GanttChart::new();
        let run = Engine::one_shot(SjfPreemptive)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();

        assert_eq!(
            spans(&gantt),
            vec![(0, 1, Some(0)), (1, 2, Some(1)), (2, 5, Some(0)), (5, 10, Some(1))]
        );
        assert_eq!(run.metrics.preemptions, 1);
    }

    #[test]
    fn test_arrival_then_io_completion_both_preempt() {
        // t=3: P2 arrives and preempts P0, then P1 returns from I/O and preempts P2
        let processes = vec![
            Process::new(0, 0, 10).with_priority(5),
            Process::new(1, 0, 3).with_priority(1).with_io(1, 2),
            Process::new(2, 3, 2).with_priority(3),
        ];
        let mut gantt = GanttChart::new();
        let run = Engine::one_shot(PriorityPreemptive)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();

        assert_eq!(
            spans(&gantt),
            vec![
                (0, 1, Some(1)),
                (1, 3, Some(0)),
                (3, 5, Some(1)),
                (5, 7, Some(2)),
                (7, 15, Some(0)),
            ]
        );
        assert_eq!(run.metrics.preemptions, 2);
    }

    #[test]
    fn test_arrival_enqueued_before_io_completion() {
        let processes = vec![
            Process::new(0, 0, 3).with_io(1, 2),
            Process::new(1, 0, 5),
            Process::new(2, 3, 1),
        ];
        let mut engine = Engine::one_shot(Fcfs);
        assert_eq!(engine.policy().name(), "FCFS");

        let mut state = SimState::new(processes, 3);
        assert_eq!(state.ready.capacity(), 3);
        let mut gantt = GanttChart::new();
        for _ in 0..4 {
            engine.step(&mut state, None, &mut gantt).unwrap();
        }
        // Both land on t=3 while P1 holds the CPU
        assert_eq!(state.running, Some(1));
        assert_eq!(state.ready.iter().collect::<Vec<_>>(), vec![2, 0]);
        assert_eq!(state.completed(), 0);

        while state.completed() < state.jobs.len() {
            engine.step(&mut state, None, &mut gantt).unwrap();
        }
        assert_eq!(state.now, 9);
        assert_eq!(
            spans(&gantt),
            vec![(0, 1, Some(0)), (1, 6, Some(1)), (6, 7, Some(2)), (7, 9, Some(0))]
        );
    }

    #[test]
    fn test_input_is_not_mutated() {
        let processes = vec![Process::new(0, 0, 2)];
        let before = processes.clone();
        let mut gantt = GanttChart::new();
        Engine::one_shot(Fcfs)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();
        assert_eq!(processes, before);
    }

    #[test]
    fn test_late_arrival_idles_first() {
        let processes = vec![Process::new(0, 3, 1)];
        let mut gantt = GanttChart::new();
        let run = Engine::one_shot(Fcfs)
            .run(&processes, &SimConfig::default(), &mut gantt)
            .unwrap();
        assert_eq!(run.metrics.idle_time, 3);
        assert_eq!(run.processes[0].turnaround_time, 1);
    }

    #[test]
    fn test_degenerate_inputs_rejected() {
        let config = SimConfig::default();
        let mut gantt = GanttChart::new();

        let err = Engine::one_shot(Fcfs).run(&[], &config, &mut gantt).unwrap_err();
        assert!(matches!(err, SimError::EmptyWorkload));

        let err = Engine::one_shot(Fcfs)
            .run(&[Process::new(4, 0, 0)], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidBurst { pid: 4, burst: 0 }));

        let err = Engine::one_shot(Fcfs)
            .run(&[Process::new(1, -1, 3)], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidArrival { pid: 1, .. }));

        let err = Engine::one_shot(Fcfs)
            .run(&[Process::new(0, 0, 3).with_io(3, 1)], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidIoOffset { io_start: 3, .. }));

        let err = Engine::one_shot(Fcfs)
            .run(&[Process::new(0, 0, 5).with_io(2, 1).with_io(2, 3)], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::DuplicateIoOffset { io_start: 2, .. }));

        let err = Engine::one_shot(Fcfs)
            .run(&[Process::new(0, 0, 5).with_io(2, -1)], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidIoBurst { .. }));

        let too_many = Process::new(0, 0, 10)
            .with_io(1, 1)
            .with_io(2, 1)
            .with_io(3, 1)
            .with_io(4, 1);
        let err = Engine::one_shot(Fcfs)
            .run(&[too_many], &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(err, SimError::TooManyIoOperations { count: 4, .. }));

        assert!(gantt.is_empty());
    }

    #[test]
    fn test_ready_queue_capacity_is_enforced() {
        let processes = vec![
            Process::new(0, 0, 2),
            Process::new(1, 0, 2),
            Process::new(2, 0, 2),
        ];
        let config = SimConfig::default().with_queue_capacity(2);
        let mut gantt = GanttChart::new();
        let err = Engine::one_shot(Fcfs)
            .run(&processes, &config, &mut gantt)
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::CapacityExceeded {
                table: crate::error::QueueKind::Ready,
                capacity: 2
            }
        ));
    }
}
