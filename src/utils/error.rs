use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("{path} not found.")]
    MissingInputError { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn missing_input(path: impl Into<String>) -> Self {
        EtlError::MissingInputError { path: path.into() }
    }

    /// 缺少輸入檔案屬於預期中的失敗路徑
    pub fn is_missing_input(&self) -> bool {
        matches!(self, EtlError::MissingInputError { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EtlError::MissingInputError { .. } => ErrorSeverity::Low,
            EtlError::ValidationError { .. } => ErrorSeverity::Medium,
            EtlError::CsvError(_) | EtlError::SerializationError(_) => ErrorSeverity::High,
            EtlError::ConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::TomlError(_) => ErrorSeverity::High,
            EtlError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EtlError::MissingInputError { .. } => {
                "Check the working directory (--base-dir) and the file names in the config"
            }
            EtlError::CsvError(_) => {
                "Make sure the ranking CSV has a header row with a 'gene' column"
            }
            EtlError::SerializationError(_) => {
                "The registry file is not valid JSON; regenerate it with convert_csv"
            }
            EtlError::TomlError(_) => "Check the TOML syntax of the config or gene list file",
            EtlError::ConfigError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run again"
            }
            EtlError::ValidationError { .. } => "Inspect the input files for unexpected content",
            EtlError::IoError(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::MissingInputError { path } => format!("Error: {} not found.", path),
            EtlError::IoError(e) => format!("File system error: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_message() {
        let err = EtlError::missing_input("data.json");
        assert!(err.is_missing_input());
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.user_friendly_message(), "Error: data.json not found.");
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = EtlError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(!err.is_missing_input());
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
