//! Scheduling instance model.
//!
//! An instance bundles everything the scheduler needs: the machine park
//! (one integer speed per machine), the jobs, and the instance-wide
//! minimum fragment size that applies to splittable jobs.

use serde::{Deserialize, Serialize};

use super::Job;

/// A complete scheduling problem.
///
/// Machines are uniform-related: machine `m` processes `machine_speeds[m]`
/// units of job size per time unit. Jobs reference machines and each other
/// by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Speed of each machine, in size units per time unit.
    pub machine_speeds: Vec<i64>,
    /// Jobs to schedule, referenced by their position in this list.
    pub jobs: Vec<Job>,
    /// Minimum size (in unit-machine time) of any fragment of a
    /// preemptible job. Non-preemptible jobs always run en bloc.
    #[serde(default)]
    pub min_fragment_size: i64,
}

impl Instance {
    /// Creates an instance with the given machine speeds and no jobs.
    pub fn new(machine_speeds: Vec<i64>) -> Self {
        Self {
            machine_speeds,
            jobs: Vec::new(),
            min_fragment_size: 0,
        }
    }

    /// Adds a job.
    pub fn with_job(mut self, job: Job) -> Self {
        self.jobs.push(job);
        self
    }

    /// Sets the minimum fragment size.
    pub fn with_min_fragment_size(mut self, min_fragment_size: i64) -> Self {
        self.min_fragment_size = min_fragment_size;
        self
    }

    /// Number of machines.
    #[inline]
    pub fn machine_count(&self) -> usize {
        self.machine_speeds.len()
    }

    /// Number of jobs.
    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
