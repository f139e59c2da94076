//! Input validation and ingestion for scheduling instances.
//!
//! Checks structural integrity of an [`Instance`] before scheduling.
//! Detects:
//! - Missing machines
//! - Negative sizes, speeds, times
//! - Out-of-range dependency and pre-assignment indices
//!
//! Dependency cycles are *not* detected here: the scheduler discovers
//! them through incomplete topological progress and reports its own
//! error.
//!
//! The module also offers [`parse_instance`], a deliberately tolerant
//! JSON ingestion path: numeric fields are read as `f64` first so that
//! fractional inputs (a size of `1.2`, say) produce a targeted
//! "must be an integer" error instead of a generic type mismatch, and a
//! `preAssignment` of `-1` means "no pre-assignment".

use serde::Deserialize;
use std::fmt;

use crate::models::{Instance, Job, Splitting};

/// Validation result carrying every detected issue.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The instance has no machines.
    MissingMachines,
    /// A numeric field is negative.
    NegativeValue,
    /// A numeric field is fractional or non-finite.
    NotAnInteger,
    /// A dependency or pre-assignment index points outside the instance.
    IndexOutOfRange,
    /// The input document could not be read at all.
    InvalidFormat,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates an instance.
///
/// Checks:
/// 1. At least one machine
/// 2. No negative machine speed, job size, delivery time, release time,
///    or minimum fragment size
/// 3. All dependency indices within `[0, job_count)`
/// 4. All pre-assignments within `[0, machine_count)`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.machine_speeds.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MissingMachines,
            "at least one machine speed is required",
        ));
    }

    for (machine, &speed) in instance.machine_speeds.iter().enumerate() {
        if speed < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("machine {machine} has a negative speed ({speed})"),
            ));
        }
    }

    if instance.min_fragment_size < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeValue,
            format!(
                "minimum fragment size is negative ({})",
                instance.min_fragment_size
            ),
        ));
    }

    for (idx, job) in instance.jobs.iter().enumerate() {
        if job.size < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!("job {idx} has a negative size ({})", job.size),
            ));
        }
        if job.delivery_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!(
                    "job {idx} has a negative delivery time ({})",
                    job.delivery_time
                ),
            ));
        }
        if job.release_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeValue,
                format!(
                    "job {idx} has a negative release time ({})",
                    job.release_time
                ),
            ));
        }
        for &dep in &job.dependencies {
            if dep >= instance.jobs.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IndexOutOfRange,
                    format!("job {idx} depends on job {dep}, which does not exist"),
                ));
            }
        }
        if let Some(machine) = job.pre_assignment {
            if machine >= instance.machine_speeds.len() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::IndexOutOfRange,
                    format!("job {idx} is pre-assigned to machine {machine}, which does not exist"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

// Raw mirror of the external JSON shape. Numerics stay f64 until the
// integer check has run.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInstance {
    machine_speeds: Vec<f64>,
    #[serde(default)]
    jobs: Vec<RawJob>,
    #[serde(default)]
    min_fragment_size: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJob {
    #[serde(default)]
    size: f64,
    #[serde(default, alias = "waitTime")]
    delivery_time: f64,
    #[serde(default)]
    splitting: Splitting,
    #[serde(default)]
    dependencies: Vec<f64>,
    #[serde(default, alias = "earliestStart")]
    release_time: f64,
    #[serde(default = "no_pre_assignment")]
    pre_assignment: f64,
}

fn no_pre_assignment() -> f64 {
    -1.0
}

fn checked_integer(value: f64, what: &str) -> Result<i64, ValidationError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NotAnInteger,
            format!("{what} must be an integer (got {value})"),
        ));
    }
    Ok(value as i64)
}

fn checked_index(value: f64, what: &str) -> Result<usize, ValidationError> {
    let index = checked_integer(value, what)?;
    if index < 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NegativeValue,
            format!("{what} is negative ({index})"),
        ));
    }
    Ok(index as usize)
}

/// Parses an instance from its external JSON representation.
///
/// Field names are camelCase (`machineSpeeds`, `minFragmentSize`, …);
/// `waitTime` and `earliestStart` are accepted as aliases for
/// `deliveryTime` and `releaseTime`, and a `preAssignment` of `-1` (or
/// an absent one) means no pre-assignment.
///
/// Only shape and integrality are checked here; run the result through
/// [`validate_instance`] (the engine does) for range and sign checks.
pub fn parse_instance(json: &str) -> Result<Instance, ValidationError> {
    let raw: RawInstance = serde_json::from_str(json).map_err(|e| {
        ValidationError::new(
            ValidationErrorKind::InvalidFormat,
            format!("invalid instance document: {e}"),
        )
    })?;

    let mut machine_speeds = Vec::with_capacity(raw.machine_speeds.len());
    for (machine, &speed) in raw.machine_speeds.iter().enumerate() {
        machine_speeds.push(checked_integer(
            speed,
            &format!("machine {machine} speed"),
        )?);
    }

    let mut jobs = Vec::with_capacity(raw.jobs.len());
    for (idx, raw_job) in raw.jobs.into_iter().enumerate() {
        let mut dependencies = Vec::with_capacity(raw_job.dependencies.len());
        for &dep in &raw_job.dependencies {
            dependencies.push(checked_index(dep, &format!("job {idx} dependency"))?);
        }
        let pre_assignment = if raw_job.pre_assignment == -1.0 {
            None
        } else {
            Some(checked_index(
                raw_job.pre_assignment,
                &format!("job {idx} pre-assignment"),
            )?)
        };
        jobs.push(Job {
            size: checked_integer(raw_job.size, &format!("job {idx} size"))?,
            delivery_time: checked_integer(
                raw_job.delivery_time,
                &format!("job {idx} delivery time"),
            )?,
            splitting: raw_job.splitting,
            dependencies,
            release_time: checked_integer(
                raw_job.release_time,
                &format!("job {idx} release time"),
            )?,
            pre_assignment,
        });
    }

    Ok(Instance {
        machine_speeds,
        jobs,
        min_fragment_size: checked_integer(raw.min_fragment_size, "minimum fragment size")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_instance() -> Instance {
        Instance::new(vec![2, 1])
            .with_job(Job::new(4).with_delivery_time(1))
            .with_job(Job::new(6).with_dependency(0).with_pre_assignment(1))
    }

    #[test]
    fn test_valid_instance() {
        assert!(validate_instance(&sample_instance()).is_ok());
    }

    #[test]
    fn test_no_machines() {
        let instance = Instance::new(vec![]).with_job(Job::new(1));
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingMachines));
        assert!(errors[0].message.contains("required"));
    }

    #[test]
    fn test_negative_speed() {
        let instance = Instance::new(vec![2, -1]);
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeValue && e.message.contains("negative")));
    }

    #[test]
    fn test_negative_job_fields() {
        let instance = Instance::new(vec![1])
            .with_job(Job::new(-3))
            .with_job(Job::new(1).with_delivery_time(-1))
            .with_job(Job::new(1).with_release_time(-2));
        let errors = validate_instance(&instance).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::NegativeValue));
    }

    #[test]
    fn test_negative_min_fragment_size() {
        let instance = Instance::new(vec![1]).with_min_fragment_size(-5);
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeValue));
    }

    #[test]
    fn test_dependency_out_of_range() {
        let instance = Instance::new(vec![1]).with_job(Job::new(1).with_dependency(7));
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::IndexOutOfRange));
    }

    #[test]
    fn test_pre_assignment_out_of_range() {
        let instance = Instance::new(vec![1]).with_job(Job::new(1).with_pre_assignment(3));
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::IndexOutOfRange));
    }

    #[test]
    fn test_collects_all_errors() {
        let instance = Instance::new(vec![-1])
            .with_job(Job::new(-1).with_dependency(9))
            .with_min_fragment_size(-1);
        let errors = validate_instance(&instance).unwrap_err();
        assert!(errors.len() >= 4);
    }

    #[test]
    fn test_parse_complete_document() {
        let instance = parse_instance(
            r#"{
                "machineSpeeds": [10, 1],
                "jobs": [
                    {"size": 10, "releaseTime": 1},
                    {"size": 23, "splitting": "MULTIPLE_MACHINES"},
                    {"size": 4, "waitTime": 2, "dependencies": [0], "preAssignment": 1}
                ],
                "minFragmentSize": 2
            }"#,
        )
        .unwrap();
        assert_eq!(instance.machine_speeds, vec![10, 1]);
        assert_eq!(instance.jobs[0].release_time, 1);
        assert_eq!(instance.jobs[1].splitting, Splitting::MultipleMachines);
        assert_eq!(instance.jobs[2].delivery_time, 2);
        assert_eq!(instance.jobs[2].dependencies, vec![0]);
        assert_eq!(instance.jobs[2].pre_assignment, Some(1));
        assert_eq!(instance.min_fragment_size, 2);
    }

    #[test]
    fn test_parse_rejects_fractional_speed() {
        let err = parse_instance(r#"{"machineSpeeds": [1.2], "jobs": []}"#).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NotAnInteger);
        assert!(err.message.contains("integer"));
    }

    #[test]
    fn test_parse_rejects_fractional_size() {
        let err =
            parse_instance(r#"{"machineSpeeds": [1], "jobs": [{"size": 0.5}]}"#).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NotAnInteger);
    }

    #[test]
    fn test_parse_negative_dependency() {
        let err = parse_instance(r#"{"machineSpeeds": [1], "jobs": [{"size": 1, "dependencies": [-1]}]}"#)
            .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NegativeValue);
        assert!(err.message.contains("negative"));
    }

    #[test]
    fn test_parse_sentinel_pre_assignment() {
        let instance = parse_instance(
            r#"{"machineSpeeds": [1], "jobs": [{"size": 1, "preAssignment": -1}, {"size": 2}]}"#,
        )
        .unwrap();
        assert_eq!(instance.jobs[0].pre_assignment, None);
        assert_eq!(instance.jobs[1].pre_assignment, None);
    }

    #[test]
    fn test_parse_negative_speed_passes_to_validation() {
        // Sign checks belong to validate_instance, not the parser.
        let instance = parse_instance(r#"{"machineSpeeds": [-1], "jobs": []}"#).unwrap();
        assert_eq!(instance.machine_speeds, vec![-1]);
        assert!(validate_instance(&instance).is_err());
    }

    #[test]
    fn test_parse_malformed_document() {
        let err = parse_instance("{not json").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidFormat);
    }
}
