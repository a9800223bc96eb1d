pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::core::OutputFormat;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_list, validate_non_empty_string, validate_path,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Checks shared by every config source.
pub fn validate_provider<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_non_empty_string("child_name", config.child_name())?;
    validate_path("output_path", config.output_path())?;
    if let Some(input) = config.input_path() {
        validate_path("input", input)?;
        validate_file_extension("input", input, &["csv"])?;
    }
    validate_non_empty_list("formats", config.output_formats())?;
    Ok(())
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "starticulation")]
#[command(about = "Score a consonant articulation assessment against Australian norms")]
pub struct CliConfig {
    #[arg(long, help = "Child's first name")]
    pub child_name: String,

    #[arg(long, help = "Child's age as years;months, e.g. 4;6")]
    pub age: String,

    #[arg(long, help = "Assessment sheet CSV (sound,position,produced)")]
    pub input: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_enum, value_delimiter = ',', default_values_t = OutputFormat::ALL)]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Also write every report into one zip file")]
    pub bundle: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn child_name(&self) -> &str {
        &self.child_name
    }

    fn age_input(&self) -> &str {
        &self.age
    }

    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    fn bundle(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl crate::utils::validation::Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
