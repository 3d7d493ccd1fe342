use crate::domain::model::{DilutionPolicy, Plan, PlanConfig, Sample};
use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Finite and strictly greater than zero.
pub fn validate_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PlannerError::invalid_input(
            field_name,
            format!("value must be a finite number, got {}", value),
        ));
    }
    if value <= 0.0 {
        return Err(PlannerError::invalid_input(
            field_name,
            format!("value must be greater than 0, got {}", value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PlannerError::invalid_input(
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PlannerError::config(field_name, "path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(PlannerError::config(field_name, "path contains null bytes"));
    }

    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    if formats.is_empty() {
        return Err(PlannerError::config(
            field_name,
            "at least one output format is required",
        ));
    }

    for format in formats {
        if !allowed_set.contains(format.trim().to_ascii_lowercase().as_str()) {
            return Err(PlannerError::config(
                field_name,
                format!(
                    "unsupported format '{}'. Allowed formats: {}",
                    format,
                    allowed.join(", ")
                ),
            ));
        }
    }

    Ok(())
}

pub fn validate_bundle_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;
    if !name.ends_with(".zip") {
        return Err(PlannerError::config(
            field_name,
            format!("bundle '{}' must have a .zip extension", name),
        ));
    }
    Ok(())
}

/// Bench limits from the original intake form. Exceeding them only produces warnings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabBounds {
    pub max_samples: usize,
    pub min_target_concentration: f64,
    pub max_target_concentration: f64,
    pub min_target_recovery: f64,
    pub max_target_recovery: f64,
    pub min_cell_count: u64,
    pub min_volume_floor: f64,
}

impl Default for LabBounds {
    fn default() -> Self {
        Self {
            max_samples: 8,
            min_target_concentration: 200.0,
            max_target_concentration: 2000.0,
            min_target_recovery: 10_000.0,
            max_target_recovery: 20_000.0,
            min_cell_count: 10_000,
            min_volume_floor: 10.0,
        }
    }
}

fn within_range(value: f64, min: f64, max: f64) -> bool {
    value >= min && value <= max
}

/// Non-fatal warnings about a run that is valid but unusual for the bench.
pub fn lab_advisories(
    bounds: &LabBounds,
    config: &PlanConfig,
    samples: &[Sample],
    plan: &Plan,
) -> Vec<String> {
    let mut advisories = Vec::new();

    if samples.len() > bounds.max_samples {
        advisories.push(format!(
            "{} samples exceeds the usual pool size of {}",
            samples.len(),
            bounds.max_samples
        ));
    }

    if !within_range(
        config.target_concentration,
        bounds.min_target_concentration,
        bounds.max_target_concentration,
    ) {
        advisories.push(format!(
            "target concentration {} cells/uL is outside {}-{}",
            config.target_concentration,
            bounds.min_target_concentration,
            bounds.max_target_concentration
        ));
    }

    if !within_range(
        config.target_recovery,
        bounds.min_target_recovery,
        bounds.max_target_recovery,
    ) {
        advisories.push(format!(
            "target recovery {} cells is outside {}-{}",
            config.target_recovery, bounds.min_target_recovery, bounds.max_target_recovery
        ));
    }

    if let DilutionPolicy::MinimumVolume { min_volume } = config.policy {
        if min_volume < bounds.min_volume_floor {
            advisories.push(format!(
                "minimum volume {} uL is below {} uL",
                min_volume, bounds.min_volume_floor
            ));
        }
    }

    for sample in samples {
        if sample.cell_count < bounds.min_cell_count {
            advisories.push(format!(
                "sample '{}' has only {} cells (expected at least {})",
                sample.name, sample.cell_count, bounds.min_cell_count
            ));
        }
    }

    for row in plan.held_at_base() {
        advisories.push(format!(
            "sample '{}' is below target at {} uL and was not diluted; the pool will sit below target",
            row.sample_name,
            config.policy.base_volume()
        ));
    }

    if plan.summary.withdraw_volume > plan.summary.total_pool_volume {
        advisories.push(format!(
            "withdraw volume {} uL exceeds the pool volume {} uL; target recovery is unattainable",
            plan.summary.withdraw_volume, plan.summary.total_pool_volume
        ));
    }

    advisories
}
