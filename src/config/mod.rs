pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{EtlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "schedule-etl")]
#[command(about = "Converts course schedule exports into calendar events")]
pub struct CliConfig {
    /// Schedule text export to parse
    #[arg(long)]
    pub schedule_file: Option<String>,

    /// Tabular CSV export to convert instead of schedule text
    #[arg(long)]
    pub csv_file: Option<String>,

    /// HTTP endpoint serving the schedule text
    #[arg(long)]
    pub endpoint: Option<String>,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// TOML pipeline configuration file; overrides the source flags
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Bundle outputs into a single zip archive")]
    pub bundle: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn schedule_file(&self) -> Option<&str> {
        self.schedule_file.as_deref()
    }

    fn csv_file(&self) -> Option<&str> {
        self.csv_file.as_deref()
    }

    fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn bundle_outputs(&self) -> bool {
        self.bundle
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("output_path", &self.output_path)?;

        // a TOML file supplies the source instead
        if self.config.is_some() {
            return Ok(());
        }

        let sources = [
            self.schedule_file.is_some(),
            self.csv_file.is_some(),
            self.endpoint.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count();

        match sources {
            0 => {
                return Err(EtlError::MissingConfigError {
                    field: "schedule_file | csv_file | endpoint".to_string(),
                })
            }
            1 => {}
            _ => {
                return Err(EtlError::ConfigError {
                    message: "choose exactly one of --schedule-file, --csv-file, --endpoint"
                        .to_string(),
                })
            }
        }

        if let Some(schedule_file) = &self.schedule_file {
            validation::validate_path("schedule_file", schedule_file)?;
        }
        if let Some(csv_file) = &self.csv_file {
            validation::validate_file_extensions("csv_file", csv_file, &["csv", "tsv"])?;
        }
        if let Some(endpoint) = &self.endpoint {
            validation::validate_url("endpoint", endpoint)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            schedule_file: Some("all_courses.txt".to_string()),
            csv_file: None,
            endpoint: None,
            output_path: "./output".to_string(),
            config: None,
            bundle: false,
            verbose: false,
            monitor: false,
        }
    }

    #[test]
    fn test_single_source_is_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_no_source_is_missing_config() {
        let mut config = base_config();
        config.schedule_file = None;
        assert!(matches!(
            config.validate().unwrap_err(),
            EtlError::MissingConfigError { .. }
        ));
    }

    #[test]
    fn test_two_sources_conflict() {
        let mut config = base_config();
        config.csv_file = Some("course_data.csv".to_string());
        assert!(matches!(
            config.validate().unwrap_err(),
            EtlError::ConfigError { .. }
        ));
    }

    #[test]
    fn test_csv_extension_checked() {
        let mut config = base_config();
        config.schedule_file = None;
        config.csv_file = Some("course_data.xlsx".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_override_skips_source_checks() {
        let mut config = base_config();
        config.schedule_file = None;
        config.config = Some("etl-config.toml".to_string());
        assert!(config.validate().is_ok());
    }
}
