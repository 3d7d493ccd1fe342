//! Text and file renderings of a [`Plan`].
//!
//! Exports use the field names of the planning model (`sample_name`,
//! `diluent_volume`, ...) so downstream sheets can join on them. The text
//! table keeps the bench-friendly headings.

use crate::domain::model::{DilutionPolicy, Plan, PlanConfig, PoolSummary, SampleRow};
use crate::domain::ports::{OutputFormat, PlanArtifacts};
use crate::utils::error::{PlannerError, Result};
use serde::Serialize;

const ROW_FIELDS: [&str; 4] = ["sample_name", "cell_count", "diluent_volume", "final_volume"];
const CHART_WIDTH: usize = 40;

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    generated_at: String,
    run_name: Option<&'a str>,
    target_concentration: f64,
    target_recovery: f64,
    policy: &'a DilutionPolicy,
    rows: &'a [SampleRow],
    summary: &'a PoolSummary,
    diluent_series: Vec<(&'a str, f64)>,
}

pub fn render(
    format: OutputFormat,
    plan: &Plan,
    config: &PlanConfig,
    run_name: Option<&str>,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Csv => to_delimited(plan, b','),
        OutputFormat::Tsv => to_delimited(plan, b'\t'),
        OutputFormat::Json => to_json(plan, config, run_name).map(String::into_bytes),
    }
}

/// One record per sample. `actual_concentration` is only emitted when the policy reports it.
pub fn to_delimited(plan: &Plan, delimiter: u8) -> Result<Vec<u8>> {
    let with_concentration = plan.reports_concentration();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    let mut header: Vec<&str> = ROW_FIELDS.to_vec();
    if with_concentration {
        header.push("actual_concentration");
    }
    writer.write_record(&header)?;

    for row in &plan.rows {
        let mut record = vec![
            row.sample_name.clone(),
            row.cell_count.to_string(),
            format!("{:.2}", row.diluent_volume),
            format!("{:.2}", row.final_volume),
        ];
        if with_concentration {
            record.push(
                row.actual_concentration
                    .map(|c| format!("{:.2}", c))
                    .unwrap_or_default(),
            );
        }
        writer.write_record(&record)?;
    }

    writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(e.into_error()))
}

pub fn to_json(plan: &Plan, config: &PlanConfig, run_name: Option<&str>) -> Result<String> {
    let report = PlanReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        run_name,
        target_concentration: config.target_concentration,
        target_recovery: config.target_recovery,
        policy: &config.policy,
        rows: &plan.rows,
        summary: &plan.summary,
        diluent_series: plan.diluent_series(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

pub fn render_table(plan: &Plan) -> String {
    let with_concentration = plan.reports_concentration();
    let mut headers = vec![
        "Sample Name".to_string(),
        "Cell Count".to_string(),
        "PBS to Add (uL)".to_string(),
        "Final Volume (uL)".to_string(),
    ];
    if with_concentration {
        headers.push("Actual Conc. (cells/uL)".to_string());
    }

    let body: Vec<Vec<String>> = plan
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.sample_name.clone(),
                row.cell_count.to_string(),
                format!("{:.2}", row.diluent_volume),
                format!("{:.2}", row.final_volume),
            ];
            if let Some(conc) = row.actual_concentration.filter(|_| with_concentration) {
                cells.push(format!("{:.2}", conc));
            }
            cells
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .filter_map(|cells| cells.get(i))
                .map(|c| c.chars().count())
                .fold(h.chars().count(), usize::max)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                // 名稱靠左，數值靠右
                if i == 0 {
                    format!("{:<width$}", cell, width = width)
                } else {
                    format!("{:>width$}", cell, width = width)
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let mut lines = vec![format_line(headers.as_slice())];
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(body.iter().map(|cells| format_line(cells.as_slice())));
    lines.join("\n")
}

pub fn render_summary(summary: &PoolSummary) -> String {
    [
        format!("Total Pool Volume (uL):                   {:.2}", summary.total_pool_volume),
        format!("Total Cells:                              {}", summary.total_cells),
        format!(
            "Final Pool Concentration (cells/uL):      {:.2}",
            summary.final_pool_concentration
        ),
        format!("Withdraw Volume for Target Recovery (uL): {:.2}", summary.withdraw_volume),
    ]
    .join("\n")
}

/// Horizontal bar chart of diluent volume per sample.
pub fn render_chart(plan: &Plan) -> String {
    let series = plan.diluent_series();
    let max = series.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    let label_width = series
        .iter()
        .map(|(name, _)| name.chars().count())
        .max()
        .unwrap_or(0);

    series
        .iter()
        .map(|(name, volume)| {
            let bar_len = if max > 0.0 {
                ((volume / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            format!(
                "{:<width$} | {} {:.2}",
                name,
                "#".repeat(bar_len),
                volume,
                width = label_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Table, summary, chart and advisories as printed by the binaries.
pub fn render_console(artifacts: &PlanArtifacts) -> String {
    let mut sections = vec![
        format!(
            "PBS Volume per Sample ({} policy)\n{}",
            artifacts.config.policy.kind(),
            render_table(&artifacts.plan)
        ),
        format!(
            "Summary of Pooled Suspension\n{}",
            render_summary(&artifacts.plan.summary)
        ),
        format!("PBS to Add (uL)\n{}", render_chart(&artifacts.plan)),
    ];

    if !artifacts.advisories.is_empty() {
        let notes: Vec<String> = artifacts
            .advisories
            .iter()
            .map(|a| format!("  - {}", a))
            .collect();
        sections.push(format!("Advisories\n{}", notes.join("\n")));
    }

    sections.join("\n\n")
}
