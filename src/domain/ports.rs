use crate::domain::model::{Plan, PlanConfig, Sample};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Where the pipeline reads samples from.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    File(String),
    Inline(Vec<Sample>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub const ALL: [&'static str; 3] = ["csv", "tsv", "json"];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "tsv" => Some(OutputFormat::Tsv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "dilution_plan.csv",
            OutputFormat::Tsv => "dilution_plan.tsv",
            OutputFormat::Json => "dilution_plan.json",
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn plan_config(&self) -> PlanConfig;
    fn sample_source(&self) -> SampleSource;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    /// Zip archive name when exports should be bundled into a single file.
    fn bundle_name(&self) -> Option<&str>;
    fn lab_bounds(&self) -> crate::utils::validation::LabBounds {
        crate::utils::validation::LabBounds::default()
    }
    fn run_name(&self) -> Option<&str> {
        None
    }
}

/// Rendered exports ready for the load stage.
#[derive(Debug, Clone)]
pub struct PlanArtifacts {
    pub plan: Plan,
    pub config: PlanConfig,
    pub files: Vec<(String, Vec<u8>)>,
    pub advisories: Vec<String>,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Sample>>;
    async fn transform(&self, samples: Vec<Sample>) -> Result<PlanArtifacts>;
    async fn load(&self, artifacts: &PlanArtifacts) -> Result<Vec<String>>;
}
