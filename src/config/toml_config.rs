use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// "text", "csv" or "http"
    pub r#type: String,
    pub path: Option<String>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub bundle: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` placeholders with environment values;
    /// unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        match self.source.r#type.as_str() {
            "text" => {
                let path = validation::validate_required_field("source.path", &self.source.path)?;
                validation::validate_path("source.path", path)?;
            }
            "csv" => {
                let path = validation::validate_required_field("source.path", &self.source.path)?;
                validation::validate_file_extensions("source.path", path, &["csv", "tsv"])?;
            }
            "http" => {
                let endpoint =
                    validation::validate_required_field("source.endpoint", &self.source.endpoint)?;
                validation::validate_url("source.endpoint", endpoint)?;
            }
            other => {
                return Err(EtlError::InvalidConfigValueError {
                    field: "source.type".to_string(),
                    value: other.to_string(),
                    reason: "Supported source types: text, csv, http".to_string(),
                })
            }
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn schedule_file(&self) -> Option<&str> {
        match self.source.r#type.as_str() {
            "text" => self.source.path.as_deref(),
            _ => None,
        }
    }

    fn csv_file(&self) -> Option<&str> {
        match self.source.r#type.as_str() {
            "csv" => self.source.path.as_deref(),
            _ => None,
        }
    }

    fn endpoint(&self) -> Option<&str> {
        match self.source.r#type.as_str() {
            "http" => self.source.endpoint.as_deref(),
            _ => None,
        }
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn bundle_outputs(&self) -> bool {
        self.load.bundle.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "course-schedule"
description = "Course schedule export pipeline"
version = "1.0.0"

[source]
type = "text"
path = "all_courses.txt"

[load]
output_path = "./output"
bundle = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "course-schedule");
        assert_eq!(config.schedule_file(), Some("all_courses.txt"));
        assert_eq!(config.csv_file(), None);
        assert!(config.bundle_outputs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("TEST_SCHEDULE_ENDPOINT", "https://courses.example.com/export");

        let toml_content = r#"
[pipeline]
name = "remote"
description = "remote export"
version = "1.0"

[source]
type = "http"
endpoint = "${TEST_SCHEDULE_ENDPOINT}"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.endpoint(),
            Some("https://courses.example.com/export")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_env_var_left_in_place() {
        let content = "endpoint = \"${DEFINITELY_NOT_SET_ANYWHERE}\"";
        let processed = TomlConfig::substitute_env_vars(content).unwrap();
        assert_eq!(processed, content);
    }

    #[test]
    fn test_unsupported_source_type_rejected() {
        let toml_content = r#"
[pipeline]
name = "bad"
description = "bad"
version = "1.0"

[source]
type = "ftp"
path = "all_courses.txt"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            EtlError::InvalidConfigValueError { .. }
        ));
    }

    #[test]
    fn test_text_source_requires_path() {
        let toml_content = r#"
[pipeline]
name = "no-path"
description = "no path"
version = "1.0"

[source]
type = "text"

[load]
output_path = "./output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate().unwrap_err(),
            EtlError::MissingConfigError { .. }
        ));
    }
}
