pub mod planning_pipeline;

pub use planning_pipeline::PlanningPipeline;
