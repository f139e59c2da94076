//! Scheduler driver.
//!
//! Pops ready jobs off the dependency frontier in input-index order and
//! places each one through the fragment planner:
//!
//! 1. The earliest start is the job's release time, pushed back past the
//!    completion (delivery included) of every dependency.
//! 2. Multi-machine jobs use every machine; pre-assigned jobs use their
//!    machine; everything else is trial-placed on each machine in turn
//!    and committed to the one finishing first (first machine to reach
//!    the minimum wins a tie).
//! 3. A positive delivery time appends a waiting fragment that blocks
//!    dependents without occupying the machine.
//!
//! The result is a deterministic function of the instance: the ready
//! frontier, the trial tie-break, and the planner's event tie-break are
//! all index-ordered.

use std::fmt;

use tracing::{debug, trace};

use super::gaps::GapLists;
use super::graph::JobGraph;
use super::planner::{place_job, Candidates};
use crate::models::{Instance, Job, JobFragment, Schedule, Splitting};
use crate::validation::{validate_instance, ValidationError};

/// Why a schedule could not be produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// The instance failed validation (first issue reported).
    InvalidInput(ValidationError),
    /// The dependency graph contains a cycle.
    CyclicDependency {
        /// Jobs that could be ordered before progress stopped.
        scheduled: usize,
        /// Jobs supplied.
        total: usize,
    },
    /// A job's candidate machines are all of speed zero.
    Unschedulable {
        /// Index of the stuck job.
        job: usize,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(e) => e.fmt(f),
            Self::CyclicDependency { scheduled, total } => write!(
                f,
                "dependency graph contains a cycle ({scheduled} of {total} jobs could be ordered)"
            ),
            Self::Unschedulable { job } => write!(
                f,
                "job {job} cannot be processed: every candidate machine has speed 0"
            ),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(error: ValidationError) -> Self {
        Self::InvalidInput(error)
    }
}

/// Computes a schedule for an instance.
///
/// Single-shot and deterministic: the same instance always yields the
/// same schedule. Fragments come back ordered by `(end, machine)` within
/// each job.
///
/// # Example
/// ```
/// use listsched::models::{Instance, Job};
/// use listsched::scheduler::compute_schedule;
///
/// let instance = Instance::new(vec![2])
///     .with_job(Job::new(4))
///     .with_job(Job::new(2).with_dependency(0));
/// let schedule = compute_schedule(&instance).unwrap();
/// assert_eq!(schedule.jobs[0][0].end, 2);
/// assert_eq!(schedule.jobs[1][0].start, 2);
/// ```
pub fn compute_schedule(instance: &Instance) -> Result<Schedule, ScheduleError> {
    validate_instance(instance).map_err(|mut errors| errors.remove(0))?;

    let job_count = instance.job_count();
    debug!(
        jobs = job_count,
        machines = instance.machine_count(),
        "computing schedule"
    );

    let mut schedule = Schedule::empty(job_count);
    // Completion (delivery included) per scheduled job. Authoritative
    // even for jobs that produce no fragments.
    let mut completions = vec![0i64; job_count];
    let mut gaps = GapLists::new(instance.machine_count());
    let mut graph = JobGraph::new(&instance.jobs);
    let mut frontier = graph.ready_frontier();
    let mut scheduled = 0usize;

    while let Some(idx) = frontier.extract_min() {
        let job = &instance.jobs[idx];
        let earliest_start = job
            .dependencies
            .iter()
            .map(|&dep| completions[dep])
            .fold(job.release_time, i64::max);

        let (candidates, delivery_machine) = match (job.splitting, job.pre_assignment) {
            (Splitting::MultipleMachines, pre) => (Candidates::All, pre.unwrap_or(0)),
            (_, Some(machine)) => (Candidates::Single(machine), machine),
            (_, None) => {
                let machine = best_single_machine(&mut gaps, instance, job, earliest_start)
                    .ok_or(ScheduleError::Unschedulable { job: idx })?;
                (Candidates::Single(machine), machine)
            }
        };

        let completion = place_job(
            &mut gaps,
            &instance.machine_speeds,
            candidates,
            job.size,
            job.preemptible(),
            instance.min_fragment_size,
            earliest_start,
            Some(&mut schedule.jobs[idx]),
        )
        .ok_or(ScheduleError::Unschedulable { job: idx })?;

        // Concurrent placements can emit equal-end fragments out of
        // machine order when a gap boundary coincides with the job's
        // completion; normalise to (end, machine).
        schedule.jobs[idx].sort_by_key(|f| (f.end, f.machine));

        completions[idx] = if job.delivery_time > 0 {
            let delivery_end = completion.saturating_add(job.delivery_time);
            schedule.jobs[idx].push(JobFragment::waiting(
                delivery_machine,
                completion,
                delivery_end,
            ));
            delivery_end
        } else {
            completion
        };
        trace!(
            job = idx,
            earliest_start,
            completion = completions[idx],
            "job scheduled"
        );

        scheduled += 1;
        graph.mark_scheduled(idx, &mut frontier);
    }

    if scheduled < job_count {
        return Err(ScheduleError::CyclicDependency {
            scheduled,
            total: job_count,
        });
    }
    Ok(schedule)
}

/// Trial-places a job on every machine and returns the one completing
/// first. Strict `<` means the first machine to reach the running
/// minimum keeps it.
fn best_single_machine(
    gaps: &mut GapLists,
    instance: &Instance,
    job: &Job,
    earliest_start: i64,
) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for machine in 0..instance.machine_count() {
        let Some(completion) = place_job(
            gaps,
            &instance.machine_speeds,
            Candidates::Single(machine),
            job.size,
            job.preemptible(),
            instance.min_fragment_size,
            earliest_start,
            None,
        ) else {
            continue;
        };
        if best.is_none_or(|(_, fastest)| completion < fastest) {
            best = Some((machine, completion));
        }
    }
    best.map(|(machine, _)| machine)
}
