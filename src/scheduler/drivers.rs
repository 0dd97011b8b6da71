//! One entry point per scheduling algorithm.

use crate::config::SimConfig;
use crate::engine::{Engine, SimulationRun};
use crate::error::Result;
use crate::models::{GanttSink, Process};
use crate::policy::{
    Edf, Fcfs, PriorityAging, PriorityNonPreemptive, PriorityPreemptive, Rms, RoundRobin,
    SjfNonPreemptive, SjfPreemptive,
};

/// First-Come, First-Served.
pub fn run_fcfs(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::one_shot(Fcfs).run(processes, config, gantt)
}

/// Non-preemptive Shortest Job First.
pub fn run_sjf_np(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::one_shot(SjfNonPreemptive).run(processes, config, gantt)
}

/// Preemptive Shortest Job First.
pub fn run_sjf_p(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::one_shot(SjfPreemptive).run(processes, config, gantt)
}

/// Non-preemptive priority.
pub fn run_priority_np(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::one_shot(PriorityNonPreemptive).run(processes, config, gantt)
}

/// Preemptive priority.
pub fn run_priority_p(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::one_shot(PriorityPreemptive).run(processes, config, gantt)
}

/// Round Robin with `config.time_quantum`.
pub fn run_rr(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    let policy = RoundRobin::new(config.time_quantum)?;
    Engine::one_shot(policy).run(processes, config, gantt)
}

/// Preemptive priority with aging after `config.aging_threshold` ticks.
///
/// Promotions only affect the run itself: the returned processes carry
/// their input priorities. Promotions are listed in
/// [`Metrics::aging_log`](crate::models::Metrics::aging_log).
pub fn run_priority_aging(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    let policy = PriorityAging::new(config.aging_threshold)?;
    let mut run = Engine::one_shot(policy).run(processes, config, gantt)?;
    for (out, input) in run.processes.iter_mut().zip(processes) {
        out.priority = input.priority;
    }
    Ok(run)
}

/// Earliest Deadline First over `[0, config.max_time)`.
pub fn run_edf(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::periodic(Edf, config.max_time).run(processes, config, gantt)
}

/// Rate Monotonic over `[0, config.max_time)`.
pub fn run_rms(
    processes: &[Process],
    config: &SimConfig,
    gantt: &mut impl GanttSink,
) -> Result<SimulationRun> {
    Engine::periodic(Rms, config.max_time).run(processes, config, gantt)
}
