//! Schedule quality metrics (KPIs).
//!
//! Computes standard scheduling performance indicators from a completed
//! schedule and its instance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest fragment end, delivery included |
//! | Total Work | Σ size units processed across all jobs |
//! | Busy Time | Per machine, wall-clock time spent processing |
//! | Utilization | busy_time / makespan per machine |
//! | Avg Flow Time | Mean (completion − release) over scheduled jobs |
//!
//! Waiting fragments never count as busy time: delivery occupies the
//! job, not the machine.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::{Instance, Schedule};

/// Schedule performance indicators.
#[derive(Debug, Clone)]
pub struct ScheduleKpi {
    /// Latest fragment end across all jobs, delivery included.
    pub makespan: i64,
    /// Size units processed across all jobs.
    pub total_work: i64,
    /// Per-machine wall-clock processing time.
    pub busy_by_machine: Vec<i64>,
    /// Per-machine busy_time / makespan (0.0..1.0).
    pub utilization_by_machine: Vec<f64>,
    /// Mean utilization across machines.
    pub avg_utilization: f64,
    /// Mean time from release to completion over jobs with fragments.
    pub avg_flow_time: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from an instance and its schedule.
    pub fn calculate(instance: &Instance, schedule: &Schedule) -> Self {
        let makespan = schedule.makespan();

        let total_work = (0..instance.job_count())
            .map(|job| schedule.processed_units(job, &instance.machine_speeds))
            .sum();

        let busy_by_machine: Vec<i64> = (0..instance.machine_count())
            .map(|machine| schedule.busy_time(machine))
            .collect();
        let utilization_by_machine: Vec<f64> = busy_by_machine
            .iter()
            .map(|&busy| {
                if makespan > 0 {
                    busy as f64 / makespan as f64
                } else {
                    0.0
                }
            })
            .collect();
        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let mut total_flow = 0.0;
        let mut flow_count = 0usize;
        for (idx, job) in instance.jobs.iter().enumerate() {
            if let Some(completion) = schedule.job_completion_time(idx) {
                total_flow += (completion - job.release_time) as f64;
                flow_count += 1;
            }
        }
        let avg_flow_time = if flow_count == 0 {
            0.0
        } else {
            total_flow / flow_count as f64
        };

        Self {
            makespan,
            total_work,
            busy_by_machine,
            utilization_by_machine,
            avg_utilization,
            avg_flow_time,
        }
    }
}
