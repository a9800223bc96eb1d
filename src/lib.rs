pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use core::{etl::AssessmentEngine, pipeline::AssessmentPipeline};
pub use domain::services::AssessmentScorer;
pub use utils::error::{Result, ScoringError};
