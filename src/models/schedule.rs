//! Schedule (solution) model.
//!
//! A schedule assigns every job an ordered list of fragments: intervals
//! on a machine during which the job executes, plus an optional trailing
//! waiting fragment covering its delivery time.
//!
//! # Invariants
//!
//! For a schedule produced by the engine:
//! - per job, fragments are ordered by `(end, machine)`;
//! - on any machine, non-waiting fragments of all jobs are pairwise
//!   disjoint; waiting fragments occupy no machine and may overlap;
//! - all timestamps are non-negative integers.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

/// One interval of a job's execution on a machine.
///
/// `is_waiting` marks a delivery-time fragment: the job is finished
/// processing but its dependents remain blocked until `end`. Waiting
/// fragments do not occupy the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFragment {
    /// Machine the fragment lives on.
    pub machine: usize,
    /// Inclusive start timestamp.
    pub start: i64,
    /// Exclusive end timestamp.
    pub end: i64,
    /// Whether this is a delivery-time fragment.
    #[serde(default)]
    pub is_waiting: bool,
}

impl JobFragment {
    /// Creates a processing fragment.
    pub fn processing(machine: usize, start: i64, end: i64) -> Self {
        Self {
            machine,
            start,
            end,
            is_waiting: false,
        }
    }

    /// Creates a waiting (delivery) fragment.
    pub fn waiting(machine: usize, start: i64, end: i64) -> Self {
        Self {
            machine,
            start,
            end,
            is_waiting: true,
        }
    }

    /// Wall-clock length of the fragment.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A complete schedule: one fragment list per input job.
///
/// Serializes as a bare array parallel to the instance's job list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Fragment lists, indexed like the input jobs.
    pub jobs: Vec<Vec<JobFragment>>,
}

impl Schedule {
    /// Creates a schedule with an empty fragment list per job.
    pub fn empty(job_count: usize) -> Self {
        Self {
            jobs: vec![Vec::new(); job_count],
        }
    }

    /// Fragments of one job.
    pub fn fragments(&self, job: usize) -> &[JobFragment] {
        &self.jobs[job]
    }

    /// Latest end timestamp across all fragments, waiting included.
    pub fn makespan(&self) -> i64 {
        self.jobs
            .iter()
            .flatten()
            .map(|f| f.end)
            .max()
            .unwrap_or(0)
    }

    /// End of a job's last fragment (its delivery fragment when present).
    ///
    /// `None` for a job that produced no fragments (zero size, zero
    /// delivery time).
    pub fn job_completion_time(&self, job: usize) -> Option<i64> {
        self.jobs[job].last().map(|f| f.end)
    }

    /// All fragments placed on one machine, as `(job, fragment)` pairs
    /// ordered by `(start, end)`.
    pub fn fragments_for_machine(&self, machine: usize) -> Vec<(usize, JobFragment)> {
        let mut found: Vec<(usize, JobFragment)> = self
            .jobs
            .iter()
            .enumerate()
            .flat_map(|(job, frags)| {
                frags
                    .iter()
                    .filter(|f| f.machine == machine)
                    .map(move |f| (job, *f))
            })
            .collect();
        found.sort_by_key(|(_, f)| (f.start, f.end));
        found
    }

    /// Total wall-clock time a machine spends processing (waiting
    /// fragments excluded).
    pub fn busy_time(&self, machine: usize) -> i64 {
        self.jobs
            .iter()
            .flatten()
            .filter(|f| f.machine == machine && !f.is_waiting)
            .map(|f| f.duration())
            .sum()
    }

    /// Size units processed for one job: Σ duration × machine speed over
    /// its non-waiting fragments.
    pub fn processed_units(&self, job: usize, machine_speeds: &[i64]) -> i64 {
        self.jobs[job]
            .iter()
            .filter(|f| !f.is_waiting)
            .map(|f| f.duration() * machine_speeds[f.machine])
            .sum()
    }
}
