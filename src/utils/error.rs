use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero while computing {quantity}")]
    DivisionByZero { quantity: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Arithmetic,
    Configuration,
    Io,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn division_by_zero(quantity: impl Into<String>) -> Self {
        PlannerError::DivisionByZero {
            quantity: quantity.into(),
        }
    }

    pub fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlannerError::ConfigError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::InvalidInput { .. } => ErrorCategory::Input,
            PlannerError::DivisionByZero { .. } => ErrorCategory::Arithmetic,
            PlannerError::ConfigError { .. } => ErrorCategory::Configuration,
            PlannerError::IoError(_) | PlannerError::ZipError(_) => ErrorCategory::Io,
            PlannerError::CsvError(_) | PlannerError::SerializationError(_) => {
                ErrorCategory::Serialization
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
            ErrorCategory::Arithmetic | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修正建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::InvalidInput { .. } => {
                "Check that every sample has a unique name and a positive cell count, and that all volumes and targets are positive"
            }
            PlannerError::DivisionByZero { .. } => {
                "Make sure at least one sample is provided and the pooled volume is non-zero"
            }
            PlannerError::ConfigError { .. } => {
                "Review the configuration file or command line flags"
            }
            PlannerError::IoError(_) => "Verify the file paths exist and are writable",
            PlannerError::CsvError(_) => {
                "The sample sheet needs 'name' and 'cell_count' columns with integer counts"
            }
            PlannerError::SerializationError(_) | PlannerError::ZipError(_) => {
                "Retry the export; if it keeps failing, choose a different output format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::InvalidInput { field, reason } => {
                format!("Input rejected ({}): {}", field, reason)
            }
            PlannerError::DivisionByZero { quantity } => {
                format!("Cannot compute {}: the pool is empty", quantity)
            }
            PlannerError::ConfigError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_classification() {
        let err = PlannerError::invalid_input("samples[0].cell_count", "must be greater than 0");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("samples[0].cell_count"));
    }

    #[test]
    fn test_division_by_zero_is_critical() {
        let err = PlannerError::division_by_zero("final_pool_concentration");
        assert_eq!(err.category(), ErrorCategory::Arithmetic);
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.to_string(),
            "Division by zero while computing final_pool_concentration"
        );
    }

    #[test]
    fn test_every_error_exits_non_zero() {
        let errors = vec![
            PlannerError::invalid_input("samples", "at least one sample is required"),
            PlannerError::division_by_zero("withdraw_volume"),
            PlannerError::config("output_path", "must not be empty"),
            PlannerError::IoError(std::io::Error::other("disk full")),
            PlannerError::SerializationError(serde_json::Error::io(std::io::Error::other("eof"))),
        ];
        for err in errors {
            assert_ne!(err.exit_code(), 0, "{:?}", err);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: PlannerError = io.into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert!(err.user_friendly_message().contains("missing.csv"));
    }
}
