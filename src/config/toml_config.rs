use crate::domain::model::{PlanConfig, Sample};
use crate::domain::ports::{ConfigProvider, OutputFormat, SampleSource};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{
    validate_bundle_name, validate_output_formats, validate_path, LabBounds, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: Option<RunInfo>,
    #[serde(default)]
    pub plan: PlanConfig,
    pub samples: SamplesConfig,
    pub output: OutputConfig,
    pub bounds: Option<LabBounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub name: String,
    pub description: Option<String>,
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplesConfig {
    pub file: Option<String>,
    pub inline: Option<Vec<Sample>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlannerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| PlannerError::config("toml_parsing", format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${TARGET_RECOVERY})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| PlannerError::config("toml_parsing", e.to_string()))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.samples.file, &self.samples.inline) {
            (Some(_), Some(_)) => {
                return Err(PlannerError::config(
                    "samples",
                    "set either samples.file or samples.inline, not both",
                ))
            }
            (None, None) => {
                return Err(PlannerError::config(
                    "samples",
                    "a sample source (samples.file or samples.inline) is required",
                ))
            }
            (Some(file), None) => validate_path("samples.file", file)?,
            (None, Some(_)) => {}
        }

        validate_path("output.output_path", &self.output.output_path)?;
        validate_output_formats(
            "output.output_formats",
            &self.output.output_formats,
            &OutputFormat::ALL,
        )?;

        if let Some(compression) = self.output.compression.as_ref().filter(|c| c.enabled) {
            validate_bundle_name("output.compression.filename", &compression.filename)?;
        }

        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.run.as_ref().map(|r| r.name.as_str()).unwrap_or("unnamed run")
    }
}

impl ConfigProvider for TomlConfig {
    fn plan_config(&self) -> PlanConfig {
        self.plan
    }

    fn sample_source(&self) -> SampleSource {
        match (&self.samples.file, &self.samples.inline) {
            (Some(file), _) => SampleSource::File(file.clone()),
            (None, inline) => SampleSource::Inline(inline.clone().unwrap_or_default()),
        }
    }

    fn output_path(&self) -> &str {
        &self.output.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.output
            .output_formats
            .iter()
            .filter_map(|f| OutputFormat::parse(f))
            .collect()
    }

    fn bundle_name(&self) -> Option<&str> {
        self.output
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn lab_bounds(&self) -> LabBounds {
        self.bounds.unwrap_or_default()
    }

    fn run_name(&self) -> Option<&str> {
        self.run.as_ref().map(|r| r.name.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
