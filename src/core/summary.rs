use crate::core::numeric::round2;
use crate::domain::model::{PoolSummary, SampleRow};
use crate::utils::error::{PlannerError, Result};

/// Reduces planned rows into pool-level figures.
///
/// Volumes are summed at full precision; the returned summary is rounded
/// to 2 decimals. `withdraw_volume` is derived from the unrounded pool
/// concentration.
pub fn summarize(rows: &[SampleRow], target_recovery: f64) -> Result<PoolSummary> {
    let total_cells = rows
        .iter()
        .try_fold(0u64, |acc, row| acc.checked_add(row.cell_count))
        .ok_or_else(|| PlannerError::invalid_input("samples", "total cell count overflows"))?;
    let total_pool_volume: f64 = rows.iter().map(|row| row.pooled_volume).sum();

    if !(total_pool_volume > 0.0) {
        return Err(PlannerError::division_by_zero("final_pool_concentration"));
    }

    let final_pool_concentration = total_cells as f64 / total_pool_volume;
    if !(final_pool_concentration > 0.0) {
        return Err(PlannerError::division_by_zero("withdraw_volume"));
    }

    Ok(PoolSummary {
        total_pool_volume: round2(total_pool_volume),
        total_cells,
        final_pool_concentration: round2(final_pool_concentration),
        withdraw_volume: round2(target_recovery / final_pool_concentration),
    })
}
