pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::LocalStorage;
pub use crate::app::pipelines::PlanningPipeline;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::engine::{PlanningEngine, PlanningOutcome};
pub use crate::core::{
    compute_plan, plan, plan_fixed, plan_min_volume, summarize, DilutionPolicy, Plan, PlanConfig,
    PolicyKind, PoolSummary, Sample, SampleRow,
};
pub use crate::utils::error::{PlannerError, Result};
