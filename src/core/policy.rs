use crate::core::numeric::{non_negative, round2};
use crate::core::planner::plan;
use crate::domain::model::{DilutionPolicy, Plan, PlanConfig, Sample, SampleRow};
use crate::utils::error::Result;

impl DilutionPolicy {
    /// Computes one sample's row. Samples are independent of each other, so
    /// this is the whole per-sample decision.
    pub fn allocate(&self, sample: &Sample, target_concentration: f64) -> SampleRow {
        let required_volume = sample.cell_count as f64 / target_concentration;

        match *self {
            DilutionPolicy::FixedFinalVolume { final_volume } => {
                // 已比目標稀的樣品不會被濃縮，維持 final_volume
                let diluent = non_negative(round2(required_volume - final_volume));
                let total = final_volume + diluent;

                SampleRow {
                    sample_name: sample.name.clone(),
                    cell_count: sample.cell_count,
                    diluent_volume: diluent,
                    final_volume: total,
                    actual_concentration: None,
                    pooled_volume: total,
                    held_at_base: required_volume < final_volume,
                }
            }
            DilutionPolicy::MinimumVolume { min_volume } => {
                let (final_volume, diluent, actual_concentration, held_at_base) =
                    if required_volume < min_volume {
                        (
                            min_volume,
                            0.0,
                            sample.cell_count as f64 / min_volume,
                            true,
                        )
                    } else {
                        (
                            required_volume,
                            required_volume - min_volume,
                            target_concentration,
                            false,
                        )
                    };

                SampleRow {
                    sample_name: sample.name.clone(),
                    cell_count: sample.cell_count,
                    diluent_volume: non_negative(round2(diluent)),
                    final_volume: round2(final_volume),
                    actual_concentration: Some(round2(actual_concentration)),
                    pooled_volume: final_volume,
                    held_at_base,
                }
            }
        }
    }
}

/// Dilutes every sample to the same `final_volume` baseline.
pub fn plan_fixed(
    samples: &[Sample],
    target_concentration: f64,
    target_recovery: f64,
    final_volume: f64,
) -> Result<Plan> {
    plan(
        samples,
        &PlanConfig {
            target_concentration,
            target_recovery,
            policy: DilutionPolicy::FixedFinalVolume { final_volume },
        },
    )
}

/// Dilutes to target but never below `min_volume`.
pub fn plan_min_volume(
    samples: &[Sample],
    target_concentration: f64,
    target_recovery: f64,
    min_volume: f64,
) -> Result<Plan> {
    plan(
        samples,
        &PlanConfig {
            target_concentration,
            target_recovery,
            policy: DilutionPolicy::MinimumVolume { min_volume },
        },
    )
}
