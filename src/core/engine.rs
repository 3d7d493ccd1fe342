use crate::core::{Pipeline, PlanArtifacts};
use crate::utils::error::Result;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PlanningOutcome {
    pub artifacts: PlanArtifacts,
    pub written: Vec<String>,
}

pub struct PlanningEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> PlanningEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract and transform only; nothing is written.
    pub async fn preview(&self) -> Result<PlanArtifacts> {
        tracing::info!("📥 Loading samples...");
        let samples = self.pipeline.extract().await?;
        tracing::info!("Loaded {} samples", samples.len());

        tracing::info!("🧮 Computing dilution plan...");
        let artifacts = self.pipeline.transform(samples).await?;
        tracing::info!(
            "Planned {} samples: pool {} uL at {} cells/uL",
            artifacts.plan.rows.len(),
            artifacts.plan.summary.total_pool_volume,
            artifacts.plan.summary.final_pool_concentration
        );

        Ok(artifacts)
    }

    pub async fn run(&self) -> Result<PlanningOutcome> {
        let artifacts = self.preview().await?;

        tracing::info!("💾 Writing {} export(s)...", artifacts.files.len());
        let written = self.pipeline.load(&artifacts).await?;
        for path in &written {
            tracing::info!("📁 Output saved to: {}", path);
        }

        Ok(PlanningOutcome { artifacts, written })
    }
}
