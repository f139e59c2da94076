//! Job model.
//!
//! A job is the unit of scheduling: a processing requirement expressed in
//! unit-machine time, plus the constraints that govern where and when it
//! may run (dependencies, release time, pre-assignment, splitting mode).
//!
//! # Time Representation
//! All durations and timestamps are non-negative integers on a shared
//! abstract timeline. On a machine of speed `s`, one time unit processes
//! `s` units of job size.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! (uniform parallel machines)

use serde::{Deserialize, Serialize};

/// How a job's processing may be divided into fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Splitting {
    /// En bloc on a single machine: exactly one processing fragment.
    None,
    /// Interruptible on a single machine: fragments may be separated in
    /// time but all share one machine.
    #[default]
    Preemption,
    /// May run on several machines concurrently; every fragment is
    /// subject to the instance-wide minimum fragment size.
    MultipleMachines,
}

/// A job to be scheduled.
///
/// Dependencies are finish-to-start: the job may not begin before every
/// dependency has fully completed, delivery time included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Processing requirement in unit-machine time.
    pub size: i64,
    /// Post-processing idle duration. Blocks dependents but occupies no
    /// machine. Also accepted as `waitTime` on input.
    #[serde(default, alias = "waitTime")]
    pub delivery_time: i64,
    /// Fragmentation mode.
    #[serde(default)]
    pub splitting: Splitting,
    /// Indices of jobs that must complete before this one starts.
    #[serde(default)]
    pub dependencies: Vec<usize>,
    /// Earliest moment processing may begin. Also accepted as
    /// `earliestStart` on input.
    #[serde(default, alias = "earliestStart")]
    pub release_time: i64,
    /// Forced machine choice. Ignored for machine selection when
    /// `splitting` is [`Splitting::MultipleMachines`], but still names
    /// the delivery machine.
    #[serde(default)]
    pub pre_assignment: Option<usize>,
}

impl Job {
    /// Creates a job with the given size and default constraints.
    pub fn new(size: i64) -> Self {
        Self {
            size,
            delivery_time: 0,
            splitting: Splitting::default(),
            dependencies: Vec::new(),
            release_time: 0,
            pre_assignment: None,
        }
    }

    /// Sets the delivery (wait) time.
    pub fn with_delivery_time(mut self, delivery_time: i64) -> Self {
        self.delivery_time = delivery_time;
        self
    }

    /// Sets the splitting mode.
    pub fn with_splitting(mut self, splitting: Splitting) -> Self {
        self.splitting = splitting;
        self
    }

    /// Adds a dependency on another job by index.
    pub fn with_dependency(mut self, job: usize) -> Self {
        self.dependencies.push(job);
        self
    }

    /// Replaces the dependency list.
    pub fn with_dependencies(mut self, dependencies: Vec<usize>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: i64) -> Self {
        self.release_time = release_time;
        self
    }

    /// Pins the job to a machine.
    pub fn with_pre_assignment(mut self, machine: usize) -> Self {
        self.pre_assignment = Some(machine);
        self
    }

    /// Whether processing may be interrupted and resumed.
    #[inline]
    pub fn preemptible(&self) -> bool {
        self.splitting != Splitting::None
    }
}
