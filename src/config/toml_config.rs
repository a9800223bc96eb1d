use crate::core::{ConfigProvider, OutputFormat};
use crate::utils::error::{Result, ScoringError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub child: ChildConfig,
    pub input: Option<InputConfig>,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildConfig {
    pub name: String,
    /// "years;months", e.g. "4;6".
    pub age: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,
    #[serde(default)]
    pub bundle: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_formats() -> Vec<OutputFormat> {
    OutputFormat::ALL.to_vec()
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScoringError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScoringError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScoringError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn child_name(&self) -> &str {
        &self.child.name
    }

    fn age_input(&self) -> &str {
        &self.child.age
    }

    fn input_path(&self) -> Option<&str> {
        self.input.as_ref().map(|input| input.path.as_str())
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output.formats
    }

    fn bundle(&self) -> bool {
        self.output.bundle
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[child]
name = "Ava"
age = "4;6"

[input]
path = "sheet.csv"

[output]
path = "./reports"
formats = ["csv", "txt"]
bundle = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.child_name(), "Ava");
        assert_eq!(config.age_input(), "4;6");
        assert_eq!(config.input_path(), Some("sheet.csv"));
        assert_eq!(config.output_formats(), &[OutputFormat::Csv, OutputFormat::Txt]);
        assert!(config.bundle());
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let toml_content = r#"
[child]
name = "Ava"
age = "4;6"

[output]
path = "./reports"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input_path(), None);
        assert_eq!(config.output_formats(), &OutputFormat::ALL);
        assert!(!config.bundle());
        assert!(config.verbose());
        assert!(!config.log_json());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STARTICULATION_TEST_CHILD", "Noah");

        let toml_content = r#"
[child]
name = "${STARTICULATION_TEST_CHILD}"
age = "5;0"

[output]
path = "./reports"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.child.name, "Noah");

        std::env::remove_var("STARTICULATION_TEST_CHILD");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[child]
name = ""
age = "4;6"

[output]
path = "./reports"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[child]
name = "Ava"
age = "4;6"

[output]
path = "./reports"
formats = []
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_format_is_parse_error() {
        let toml_content = r#"
[child]
name = "Ava"
age = "4;6"

[output]
path = "./reports"
formats = ["pdf"]
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(ScoringError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[child]
name = "File Test"
age = "3;2"

[output]
path = "./reports"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.child.name, "File Test");
    }
}
