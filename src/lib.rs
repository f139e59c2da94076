//! Deterministic list scheduling for uniform machines.
//!
//! Given jobs with dependencies, release times, delivery times, optional
//! pre-assignments and splitting modes, plus machines with integer
//! speeds, [`scheduler::compute_schedule`] produces per-job fragment
//! lists via a greedy list-scheduling policy. All arithmetic is integer
//! and the output is a pure function of the input.
//!
//! # Modules
//!
//! - **`models`**: Domain types — [`models::Instance`], [`models::Job`],
//!   [`models::Splitting`], [`models::Schedule`], [`models::JobFragment`]
//! - **`validation`**: Input integrity checks and tolerant JSON ingestion
//! - **`scheduler`**: The engine — gap lists, fragment planner, driver,
//!   KPIs
//! - **`heap`**: The comparator-parameterised min-heap behind the ready
//!   frontier
//!
//! # Example
//!
//! ```
//! use listsched::models::{Instance, Job, Splitting};
//! use listsched::scheduler::compute_schedule;
//!
//! let instance = Instance::new(vec![10, 1])
//!     .with_job(Job::new(10).with_release_time(1))
//!     .with_job(Job::new(23).with_splitting(Splitting::MultipleMachines));
//!
//! let schedule = compute_schedule(&instance).expect("valid instance");
//! assert_eq!(schedule.jobs[0].len(), 1);
//! assert_eq!(schedule.jobs[1].len(), 3);
//! ```
//!
//! # References
//!
//! - Graham (1966), "Bounds for Certain Multiprocessing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod heap;
pub mod models;
pub mod scheduler;
pub mod validation;
