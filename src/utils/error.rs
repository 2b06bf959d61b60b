use thiserror::Error;

#[derive(Error, Debug)]
pub enum BikeshareError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data file not found: {path}")]
    DataFileNotFound { path: String },

    #[error("Required column '{column}' is missing from the data file")]
    MissingColumn { column: String },

    #[error("Could not parse trip on data row {row}: {message}")]
    TripParseError { row: usize, message: String },

    #[error("'{value}' is not a valid {field}")]
    InvalidChoice { field: String, value: String },

    #[error("Input stream closed")]
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BikeshareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidChoice { .. } | Self::InputClosed => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_)
            | Self::DataFileNotFound { .. }
            | Self::MissingColumn { .. }
            | Self::TripParseError { .. } => ErrorCategory::Data,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InputClosed => ErrorSeverity::Low,
            Self::InvalidChoice { .. } | Self::DataFileNotFound { .. } => ErrorSeverity::Medium,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_)
            | Self::MissingColumn { .. }
            | Self::TripParseError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Data errors end one analysis but leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Data
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::DataFileNotFound { path } => {
                format!("The trip data file '{}' could not be found.", path)
            }
            Self::MissingColumn { column } => {
                format!("The trip data file has no '{}' column.", column)
            }
            Self::TripParseError { row, .. } => {
                format!("The trip data file is malformed near data row {}.", row)
            }
            Self::CsvError(_) => "The trip data file is not valid CSV.".to_string(),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Invalid configuration: {}", self),
            Self::InvalidChoice { field, value } => {
                format!("'{}' is not a valid {}.", value, field)
            }
            Self::InputClosed => "Input closed, goodbye!".to_string(),
            Self::IoError(_) | Self::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Answer with one of the listed options",
            ErrorCategory::Configuration => {
                "Check the command-line flags and the TOML configuration file"
            }
            ErrorCategory::Data => {
                "Check that --data-dir points at the directory holding the city CSV files"
            }
            ErrorCategory::System => "Retry; if the problem persists run with --verbose",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BikeshareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_are_recoverable() {
        let err = BikeshareError::DataFileNotFound {
            path: "chicago.csv".to_string(),
        };
        assert!(err.is_recoverable());
        assert_eq!(err.category(), ErrorCategory::Data);
        assert!(err.user_friendly_message().contains("chicago.csv"));

        let err = BikeshareError::ConfigError {
            message: "bad".to_string(),
        };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        assert_eq!(BikeshareError::InputClosed.exit_code(), 0);
        assert_eq!(
            BikeshareError::MissingColumn {
                column: "Start Time".to_string()
            }
            .exit_code(),
            1
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert_eq!(BikeshareError::from(io).exit_code(), 3);
    }
}
