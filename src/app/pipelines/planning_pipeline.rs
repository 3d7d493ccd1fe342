use crate::adapters::samples_csv::parse_samples;
use crate::app::report;
use crate::core::{plan, ConfigProvider, Pipeline, PlanArtifacts, Sample, SampleSource, Storage};
use crate::utils::error::Result;
use crate::utils::validation::lab_advisories;
use std::io::Write;
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

pub struct PlanningPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> PlanningPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, name: &str) -> String {
        Path::new(self.config.output_path())
            .join(name)
            .to_string_lossy()
            .into_owned()
    }

    fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        for (name, data) in files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }

        // 完成並取回底層 Vec<u8>
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PlanningPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Sample>> {
        match self.config.sample_source() {
            SampleSource::File(path) => {
                tracing::debug!("Reading sample sheet from: {}", path);
                let data = self.storage.read_file(&path).await?;
                parse_samples(&data)
            }
            SampleSource::Inline(samples) => {
                tracing::debug!("Using {} inline samples", samples.len());
                Ok(samples)
            }
        }
    }

    async fn transform(&self, samples: Vec<Sample>) -> Result<PlanArtifacts> {
        let config = self.config.plan_config();
        tracing::debug!(
            "Planning {} samples with {} policy (base volume {} uL, target {} cells/uL)",
            samples.len(),
            config.policy.kind(),
            config.policy.base_volume(),
            config.target_concentration
        );

        let plan = plan(&samples, &config)?;

        let advisories = lab_advisories(&self.config.lab_bounds(), &config, &samples, &plan);
        for advisory in &advisories {
            tracing::warn!("⚠️ {}", advisory);
        }

        let mut files = Vec::new();
        for format in self.config.output_formats() {
            let data = report::render(format, &plan, &config, self.config.run_name())?;
            files.push((format.file_name().to_string(), data));
        }

        Ok(PlanArtifacts {
            plan,
            config,
            files,
            advisories,
        })
    }

    async fn load(&self, artifacts: &PlanArtifacts) -> Result<Vec<String>> {
        if let Some(bundle_name) = self.config.bundle_name() {
            tracing::debug!(
                "Creating ZIP bundle with {} files",
                artifacts.files.len()
            );
            let zip_data = Self::bundle(&artifacts.files)?;
            let path = self.output_file(bundle_name);

            tracing::debug!("Writing ZIP file ({} bytes) to storage", zip_data.len());
            self.storage.write_file(&path, &zip_data).await?;
            return Ok(vec![path]);
        }

        let mut written = Vec::with_capacity(artifacts.files.len());
        for (name, data) in &artifacts.files {
            let path = self.output_file(name);
            self.storage.write_file(&path, data).await?;
            tracing::debug!("Wrote {} ({} bytes)", path, data.len());
            written.push(path);
        }

        Ok(written)
    }
}
