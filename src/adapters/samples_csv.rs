use crate::domain::model::Sample;
use crate::utils::error::{PlannerError, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SampleRecord {
    #[serde(alias = "Sample Name", alias = "sample_name", default)]
    name: Option<String>,
    #[serde(alias = "Cell Count")]
    cell_count: String,
}

// 大於 2^53 的浮點數無法精確表示整數
const MAX_EXACT_FLOAT_COUNT: f64 = 9_007_199_254_740_992.0;

/// Counts must be whole and non-negative; `130000.0` and `1.3e5` are accepted.
fn parse_count(index: usize, raw: &str) -> Result<u64> {
    if let Ok(count) = raw.parse::<u64>() {
        return Ok(count);
    }

    let field = format!("samples[{}].cell_count", index);
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value < 0.0 => Err(PlannerError::invalid_input(
            field,
            format!("cell count must not be negative, got {}", raw),
        )),
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value <= MAX_EXACT_FLOAT_COUNT => {
            Ok(value as u64)
        }
        Ok(_) => Err(PlannerError::invalid_input(
            field,
            format!("cell count must be a whole number, got {}", raw),
        )),
        Err(_) => Err(PlannerError::invalid_input(
            field,
            format!("cell count '{}' is not a number", raw),
        )),
    }
}

/// Parses a sample sheet with `name,cell_count` headers.
///
/// Blank names fall back to `S1`, `S2`, ... by row position. Counts that are
/// not whole non-negative numbers are rejected here with the row's field
/// name; range checks are left to the planner.
pub fn parse_samples(data: &[u8]) -> Result<Vec<Sample>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(data);

    let mut samples = Vec::new();
    for (index, record) in reader.deserialize::<SampleRecord>().enumerate() {
        let record = record?;
        let name = match record.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => Sample::default_name(index),
        };
        let cell_count = parse_count(index, &record.cell_count)?;
        samples.push(Sample::new(name, cell_count));
    }

    tracing::debug!("Parsed {} samples from sheet", samples.len());
    Ok(samples)
}
