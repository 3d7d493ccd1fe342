use crate::core::summary::summarize;
use crate::domain::model::{DilutionPolicy, Plan, PlanConfig, PolicyKind, Sample, SampleRow};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_positive};
use std::collections::HashSet;

/// Rejects the whole run on the first bad input; nothing is computed before this passes.
pub fn validate_inputs(samples: &[Sample], config: &PlanConfig) -> Result<()> {
    validate_positive("target_concentration", config.target_concentration)?;
    validate_positive("target_recovery", config.target_recovery)?;
    validate_positive(config.policy.base_volume_field(), config.policy.base_volume())?;

    if samples.is_empty() {
        return Err(PlannerError::invalid_input(
            "samples",
            "at least one sample is required",
        ));
    }

    let mut seen = HashSet::with_capacity(samples.len());
    let mut total_cells: u64 = 0;
    for (index, sample) in samples.iter().enumerate() {
        validate_non_empty_string(&format!("samples[{}].name", index), &sample.name)?;

        if sample.cell_count == 0 {
            return Err(PlannerError::invalid_input(
                format!("samples[{}].cell_count", index),
                "cell count must be greater than 0",
            ));
        }

        total_cells = total_cells.checked_add(sample.cell_count).ok_or_else(|| {
            PlannerError::invalid_input("samples", "total cell count overflows")
        })?;

        if !seen.insert(sample.name.trim()) {
            return Err(PlannerError::invalid_input(
                format!("samples[{}].name", index),
                format!("duplicate sample name '{}'", sample.name.trim()),
            ));
        }
    }

    Ok(())
}

/// Plans dilution for every sample and summarizes the resulting pool.
pub fn plan(samples: &[Sample], config: &PlanConfig) -> Result<Plan> {
    validate_inputs(samples, config)?;

    let rows: Vec<SampleRow> = samples
        .iter()
        .map(|sample| config.policy.allocate(sample, config.target_concentration))
        .collect();
    let summary = summarize(&rows, config.target_recovery)?;

    Ok(Plan { rows, summary })
}

/// Flat entry point: `policy_param` is the fixed final volume or the minimum volume.
pub fn compute_plan(
    policy: PolicyKind,
    samples: &[Sample],
    target_concentration: f64,
    target_recovery: f64,
    policy_param: f64,
) -> Result<Plan> {
    plan(
        samples,
        &PlanConfig {
            target_concentration,
            target_recovery,
            policy: DilutionPolicy::from_kind(policy, policy_param),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples() -> Vec<Sample> {
        vec![Sample::new("S1", 130_000), Sample::new("S2", 260_000)]
    }

    fn plan_fixed_default(input: &[Sample]) -> Result<Plan> {
        plan(input, &PlanConfig::default())
    }

    fn field_of(err: PlannerError) -> String {
        match err {
            PlannerError::InvalidInput { field, .. } => field,
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_samples_rejected() {
        let err = plan(&[], &PlanConfig::default()).unwrap_err();
        assert_eq!(field_of(err), "samples");
    }

    #[test]
    fn test_non_positive_config_rejected() {
        let mut config = PlanConfig::default();
        config.target_concentration = 0.0;
        assert_eq!(
            field_of(plan(&samples(), &config).unwrap_err()),
            "target_concentration"
        );

        let mut config = PlanConfig::default();
        config.target_recovery = -5.0;
        assert_eq!(
            field_of(plan(&samples(), &config).unwrap_err()),
            "target_recovery"
        );

        let mut config = PlanConfig::default();
        config.policy = DilutionPolicy::MinimumVolume { min_volume: 0.0 };
        assert_eq!(
            field_of(plan(&samples(), &config).unwrap_err()),
            "min_volume"
        );
    }

    #[test]
    fn test_nan_volume_rejected() {
        let err = compute_plan(PolicyKind::Fixed, &samples(), 1300.0, 20_000.0, f64::NAN)
            .unwrap_err();
        assert_eq!(field_of(err), "final_volume");
    }

    #[test]
    fn test_zero_cell_count_rejected_with_index() {
        let input = vec![Sample::new("S1", 130_000), Sample::new("S2", 0)];
        let err = plan(&input, &PlanConfig::default()).unwrap_err();
        assert_eq!(field_of(err), "samples[1].cell_count");
    }

    #[test]
    fn test_blank_and_duplicate_names_rejected() {
        let blank = vec![Sample::new("  ", 130_000)];
        assert_eq!(
            field_of(plan(&blank, &PlanConfig::default()).unwrap_err()),
            "samples[0].name"
        );

        let duplicate = vec![Sample::new("S1", 130_000), Sample::new(" S1 ", 260_000)];
        let err = plan(&duplicate, &PlanConfig::default()).unwrap_err();
        assert!(err.to_string().contains("duplicate sample name 'S1'"));
    }

    #[test]
    fn test_overflowing_cell_total_rejected() {
        let half = u64::MAX / 2 + 1;
        let input = vec![Sample::new("S1", half), Sample::new("S2", half)];
        let err = plan_fixed_default(&input).unwrap_err();
        assert_eq!(field_of(err), "samples");

        // u64::MAX 本身仍可規劃
        let single = vec![Sample::new("S1", u64::MAX)];
        let plan = plan_fixed_default(&single).unwrap();
        assert_eq!(plan.summary.total_cells, u64::MAX);
    }

    #[test]
    fn test_compute_plan_dispatches_on_policy() {
        let fixed = compute_plan(PolicyKind::Fixed, &samples(), 1300.0, 20_000.0, 100.0).unwrap();
        assert!(!fixed.reports_concentration());

        let min = compute_plan(PolicyKind::MinVolume, &samples(), 1300.0, 20_000.0, 100.0)
            .unwrap();
        assert!(min.reports_concentration());
        assert_eq!(min.summary, fixed.summary);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let config = PlanConfig {
            target_concentration: 1234.5,
            target_recovery: 17_500.0,
            policy: DilutionPolicy::MinimumVolume { min_volume: 42.0 },
        };
        let input = vec![
            Sample::new("a", 11_111),
            Sample::new("b", 333_333),
            Sample::new("c", 98_765),
        ];
        let first = plan(&input, &config).unwrap();
        let second = plan(&input, &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.summary.withdraw_volume.to_bits(),
            second.summary.withdraw_volume.to_bits()
        );
    }

    #[test]
    fn test_sample_limit_not_hard_coded() {
        let input: Vec<Sample> = (0..32)
            .map(|i| Sample::new(Sample::default_name(i), 130_000))
            .collect();
        let plan = plan(&input, &PlanConfig::default()).unwrap();
        assert_eq!(plan.rows.len(), 32);
        assert_eq!(plan.summary.total_pool_volume, 3_200.0);
    }
}
