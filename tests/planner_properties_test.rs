use suspension_planner::{
    compute_plan, plan, plan_fixed, plan_min_volume, DilutionPolicy, PlanConfig, PlannerError,
    PolicyKind, Sample,
};

fn bench_samples() -> Vec<Sample> {
    vec![
        Sample::new("S1", 130_000),
        Sample::new("S2", 260_000),
        Sample::new("S3", 5_000),
        Sample::new("S4", 187_654),
        Sample::new("S5", 42_001),
        Sample::new("S6", 999_999),
    ]
}

fn configs() -> Vec<PlanConfig> {
    let mut configs = Vec::new();
    for target_concentration in [200.0, 1300.0, 1777.7] {
        for volume in [10.0, 100.0, 250.5, 100.004, 0.004] {
            configs.push(PlanConfig {
                target_concentration,
                target_recovery: 20_000.0,
                policy: DilutionPolicy::FixedFinalVolume {
                    final_volume: volume,
                },
            });
            configs.push(PlanConfig {
                target_concentration,
                target_recovery: 12_500.0,
                policy: DilutionPolicy::MinimumVolume { min_volume: volume },
            });
        }
    }
    configs
}

/// 每列體積都為正、稀釋液不為負
#[test]
fn test_rows_have_positive_volumes() {
    for config in configs() {
        let plan = plan(&bench_samples(), &config).unwrap();
        for row in &plan.rows {
            assert!(row.final_volume > 0.0, "{:?} / {:?}", config, row);
            assert!(row.diluent_volume >= 0.0, "{:?} / {:?}", config, row);
            assert!(row.diluent_volume.is_sign_positive());
        }
    }
}

/// 固定體積策略：final_volume - diluent_volume == final_volume 設定值
#[test]
fn test_fixed_rows_keep_base_volume() {
    for config in configs() {
        let DilutionPolicy::FixedFinalVolume { final_volume: base } = config.policy else {
            continue;
        };
        let plan = plan(&bench_samples(), &config).unwrap();
        for row in &plan.rows {
            assert!(row.final_volume > 0.0, "{:?} / {:?}", config, row);
            assert!(
                (row.final_volume - row.diluent_volume - base).abs() < 1e-9,
                "{:?} / {:?}",
                config,
                row
            );
        }
    }
}

#[test]
fn test_sub_cent_final_volume_is_reported_as_given() {
    let plan = plan_fixed(&[Sample::new("S1", 1)], 1300.0, 20_000.0, 0.004).unwrap();
    assert_eq!(plan.rows[0].final_volume, 0.004);

    let plan = plan_fixed(&[Sample::new("S1", 10_000)], 1300.0, 20_000.0, 100.004).unwrap();
    assert_eq!(plan.rows[0].diluent_volume, 0.0);
    assert_eq!(plan.rows[0].final_volume, 100.004);
}

#[test]
fn test_cell_total_overflow_is_invalid_input() {
    let half = u64::MAX / 2 + 1;
    let samples = vec![Sample::new("S1", half), Sample::new("S2", half)];
    for kind in [PolicyKind::Fixed, PolicyKind::MinVolume] {
        let err = compute_plan(kind, &samples, 1300.0, 20_000.0, 100.0).unwrap_err();
        assert!(
            matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "samples"),
            "{:?}",
            err
        );
    }
}

#[test]
fn test_total_cells_is_exact_sum() {
    let expected: u64 = bench_samples().iter().map(|s| s.cell_count).sum();
    for config in configs() {
        let plan = plan(&bench_samples(), &config).unwrap();
        assert_eq!(plan.summary.total_cells, expected);
    }
}

#[test]
fn test_pool_volume_matches_row_sum() {
    let samples = bench_samples();
    // 每列四捨五入誤差最多 0.005
    let tolerance = 0.01 + 0.005 * samples.len() as f64;

    for config in configs() {
        let plan = plan(&samples, &config).unwrap();
        let row_sum: f64 = plan.rows.iter().map(|r| r.final_volume).sum();
        assert!(
            (plan.summary.total_pool_volume - row_sum).abs() <= tolerance,
            "{:?}: summary {} vs rows {}",
            config,
            plan.summary.total_pool_volume,
            row_sum
        );
    }
}

#[test]
fn test_fixed_policy_pool_volume_within_cent() {
    let plan = plan_fixed(&bench_samples(), 1300.0, 20_000.0, 100.0).unwrap();
    let row_sum: f64 = plan.rows.iter().map(|r| r.final_volume).sum();
    assert!((plan.summary.total_pool_volume - row_sum).abs() <= 0.01);
}

#[test]
fn test_identical_inputs_give_identical_plans() {
    for config in configs() {
        let first = plan(&bench_samples(), &config).unwrap();
        let second = plan(&bench_samples(), &config).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.rows.iter().zip(&second.rows) {
            assert_eq!(a.final_volume.to_bits(), b.final_volume.to_bits());
            assert_eq!(a.diluent_volume.to_bits(), b.diluent_volume.to_bits());
        }
    }
}

#[test]
fn test_fixed_policy_reference_cases() {
    let samples = vec![
        Sample::new("clamped", 5_000),
        Sample::new("exact", 130_000),
        Sample::new("diluted", 260_000),
    ];
    let plan = plan_fixed(&samples, 1300.0, 20_000.0, 100.0).unwrap();

    assert_eq!(plan.rows[0].diluent_volume, 0.0);
    assert_eq!(plan.rows[0].final_volume, 100.0);
    assert!(plan.rows[0].held_at_base_volume());

    assert_eq!(plan.rows[1].diluent_volume, 0.0);
    assert_eq!(plan.rows[1].final_volume, 100.0);

    assert_eq!(plan.rows[2].diluent_volume, 100.0);
    assert_eq!(plan.rows[2].final_volume, 200.0);
}

#[test]
fn test_min_volume_below_minimum_case() {
    let plan = plan_min_volume(&[Sample::new("S1", 5_000)], 1300.0, 20_000.0, 100.0).unwrap();
    let row = &plan.rows[0];
    assert_eq!(row.final_volume, 100.0);
    assert_eq!(row.diluent_volume, 0.0);
    assert_eq!(row.actual_concentration, Some(50.0));
}

#[test]
fn test_two_sample_pool_end_to_end() {
    let samples = vec![Sample::new("S1", 130_000), Sample::new("S2", 260_000)];
    let plan = compute_plan(PolicyKind::Fixed, &samples, 1300.0, 20_000.0, 100.0).unwrap();

    let finals: Vec<f64> = plan.rows.iter().map(|r| r.final_volume).collect();
    assert_eq!(finals, vec![100.0, 200.0]);
    assert_eq!(plan.summary.total_cells, 390_000);
    assert_eq!(plan.summary.total_pool_volume, 300.0);
    assert_eq!(plan.summary.final_pool_concentration, 1300.0);
    assert_eq!(plan.summary.withdraw_volume, 15.38);
    assert_eq!(plan.diluent_series(), vec![("S1", 0.0), ("S2", 100.0)]);
}

#[test]
fn test_empty_sample_set_is_invalid_input() {
    for kind in [PolicyKind::Fixed, PolicyKind::MinVolume] {
        let err = compute_plan(kind, &[], 1300.0, 20_000.0, 100.0).unwrap_err();
        assert!(
            matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "samples"),
            "{:?}",
            err
        );
    }
}

#[test]
fn test_invalid_input_returns_no_partial_plan() {
    let samples = vec![Sample::new("S1", 130_000), Sample::new("S1", 260_000)];
    let result = compute_plan(PolicyKind::MinVolume, &samples, 1300.0, 20_000.0, 100.0);
    assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
}
