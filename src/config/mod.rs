pub mod toml_config;

#[cfg(feature = "cli")]
mod cli_config {
    use crate::domain::model::{
        DilutionPolicy, PlanConfig, PolicyKind, DEFAULT_BASE_VOLUME, DEFAULT_TARGET_CONCENTRATION,
        DEFAULT_TARGET_RECOVERY,
    };
    use crate::domain::ports::{ConfigProvider, OutputFormat, SampleSource};
    use crate::utils::error::Result;
    use crate::utils::validation::{
        validate_bundle_name, validate_output_formats, validate_path, Validate,
    };
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "suspension-planner")]
    #[command(about = "Plan PBS dilution volumes for pooling cell suspensions")]
    pub struct CliConfig {
        /// Sample sheet (CSV with name,cell_count columns)
        #[arg(long)]
        pub samples: String,

        #[arg(long, value_enum, default_value = "fixed")]
        pub policy: PolicyKind,

        /// Target cell concentration (cells/uL)
        #[arg(long, default_value_t = DEFAULT_TARGET_CONCENTRATION)]
        pub target_concentration: f64,

        /// Cells to recover from the pool
        #[arg(long, default_value_t = DEFAULT_TARGET_RECOVERY)]
        pub target_recovery: f64,

        /// Final volume (fixed policy) or minimum volume (min-volume policy) in uL
        #[arg(long, default_value_t = DEFAULT_BASE_VOLUME)]
        pub volume: f64,

        #[arg(long, default_value = "./output")]
        pub output_path: String,

        #[arg(long, value_delimiter = ',', default_value = "csv,json")]
        pub formats: Vec<String>,

        /// Bundle all exports into this zip file instead of writing them separately
        #[arg(long)]
        pub bundle: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[arg(long, help = "Print the plan without writing any files")]
        pub dry_run: bool,
    }

    impl ConfigProvider for CliConfig {
        fn plan_config(&self) -> PlanConfig {
            PlanConfig {
                target_concentration: self.target_concentration,
                target_recovery: self.target_recovery,
                policy: DilutionPolicy::from_kind(self.policy, self.volume),
            }
        }

        fn sample_source(&self) -> SampleSource {
            SampleSource::File(self.samples.clone())
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> Vec<OutputFormat> {
            self.formats
                .iter()
                .filter_map(|f| OutputFormat::parse(f))
                .collect()
        }

        fn bundle_name(&self) -> Option<&str> {
            self.bundle.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_path("samples", &self.samples)?;
            validate_path("output_path", &self.output_path)?;
            validate_output_formats("formats", &self.formats, &OutputFormat::ALL)?;
            if let Some(bundle) = &self.bundle {
                validate_bundle_name("bundle", bundle)?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_follow_form() {
            let config = CliConfig::parse_from(["suspension-planner", "--samples", "s.csv"]);
            assert_eq!(config.plan_config(), PlanConfig::default());
            assert_eq!(
                config.output_formats(),
                vec![OutputFormat::Csv, OutputFormat::Json]
            );
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_min_volume_flags() {
            let config = CliConfig::parse_from([
                "suspension-planner",
                "--samples",
                "s.csv",
                "--policy",
                "min-volume",
                "--volume",
                "50",
                "--formats",
                "tsv",
            ]);
            assert_eq!(
                config.plan_config().policy,
                DilutionPolicy::MinimumVolume { min_volume: 50.0 }
            );
            assert_eq!(config.output_formats(), vec![OutputFormat::Tsv]);
        }

        #[test]
        fn test_rejects_unknown_format_and_bad_bundle() {
            let config = CliConfig::parse_from([
                "suspension-planner",
                "--samples",
                "s.csv",
                "--formats",
                "xlsx",
            ]);
            assert!(config.validate().is_err());

            let config = CliConfig::parse_from([
                "suspension-planner",
                "--samples",
                "s.csv",
                "--bundle",
                "plan.tar",
            ]);
            assert!(config.validate().is_err());
        }
    }
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;
