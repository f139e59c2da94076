//! Greedy list scheduler for uniform machines.
//!
//! Produces a deterministic schedule for an [`Instance`](crate::models::Instance):
//! machine-and-time fragments for every job, honouring dependencies,
//! release times, delivery times, pre-assignments, and splitting modes.
//!
//! # Algorithm
//!
//! A list-scheduling policy over a dependency frontier:
//!
//! 1. Jobs whose dependencies are all scheduled sit in a min-heap keyed
//!    by input index.
//! 2. Each popped job is placed by the fragment planner, which simulates
//!    a concurrent execution front over per-machine gap lists (free
//!    intervals). Jobs without a pre-assignment are trial-placed on
//!    every machine first; the earliest-finishing machine is committed.
//! 3. Completion releases dependents; incomplete progress at the end
//!    means the dependency graph was cyclic.
//!
//! Greedy and single-shot: fast, deterministic, not optimal.
//!
//! # References
//!
//! - Graham (1966), "Bounds for Certain Multiprocessing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5
//! - Brucker (2007), "Scheduling Algorithms", Ch. 5 (uniform machines)

mod engine;
mod gaps;
mod graph;
mod kpi;
mod planner;

pub use engine::{compute_schedule, ScheduleError};
pub use kpi::ScheduleKpi;
