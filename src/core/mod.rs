pub mod engine;
pub mod numeric;
pub mod planner;
pub mod policy;
pub mod summary;

pub use crate::domain::model::{
    DilutionPolicy, Plan, PlanConfig, PolicyKind, PoolSummary, Sample, SampleRow,
};
pub use crate::domain::ports::{
    ConfigProvider, OutputFormat, Pipeline, PlanArtifacts, SampleSource, Storage,
};
pub use crate::utils::error::Result;
pub use planner::{compute_plan, plan, validate_inputs};
pub use policy::{plan_fixed, plan_min_volume};
pub use summary::summarize;
