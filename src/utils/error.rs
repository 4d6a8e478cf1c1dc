use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("unknown day token '{token}' at line {line_no}: {line}")]
    UnknownDayTokenError {
        token: String,
        line: String,
        line_no: usize,
    },

    #[error("invalid time '{value}' at line {line_no}: {source}")]
    TimeFormatError {
        value: String,
        line_no: usize,
        #[source]
        source: chrono::format::ParseError,
    },

    #[error("malformed row at line {line_no} ({reason}): {line}")]
    MalformedRowError {
        line: String,
        line_no: usize,
        reason: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Parse,
    Config,
    Io,
    Network,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownDayTokenError { .. }
            | Self::TimeFormatError { .. }
            | Self::MalformedRowError { .. } => ErrorCategory::Parse,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Config,
            Self::IoError(_) | Self::ZipError(_) => ErrorCategory::Io,
            Self::ApiError(_) => ErrorCategory::Network,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Parse | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::UnknownDayTokenError { token, .. } => format!(
                "Day tokens must be one of א, ב, ג, ד, ה, ו; found '{}'. Fix the source line",
                token
            ),
            Self::TimeFormatError { value, .. } => {
                format!("Times must be HH:MM 24-hour clock; found '{}'", value)
            }
            Self::MalformedRowError { .. } => {
                "Data rows need exactly: day start end lecturer location".to_string()
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Check the CLI flags or the TOML configuration file".to_string()
            }
            Self::ApiError(_) => "Check the endpoint URL and network connectivity".to_string(),
            Self::IoError(_) | Self::ZipError(_) => {
                "Check that the input exists and the output path is writable".to_string()
            }
            Self::CsvError(_) => {
                "Check the CSV header row and column count against the expected schema".to_string()
            }
            Self::SerializationError(_) => {
                "Inspect the transformed records for bad data".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Parse => format!("Schedule text could not be parsed: {}", self),
            ErrorCategory::Config => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("File system problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Data => format!("Data problem: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_errors_are_high_severity() {
        let err = EtlError::MalformedRowError {
            line: "א 09:00".to_string(),
            line_no: 3,
            reason: "expected 5 fields, found 2".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Parse);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_unknown_day_token_mentions_token_and_line() {
        let err = EtlError::UnknownDayTokenError {
            token: "ש".to_string(),
            line: "ש 09:00 11:00 Levi 305".to_string(),
            line_no: 7,
        };
        let msg = err.to_string();
        assert!(msg.contains('ש'));
        assert!(msg.contains("line 7"));
        assert!(err.recovery_suggestion().contains('ש'));
    }
}
