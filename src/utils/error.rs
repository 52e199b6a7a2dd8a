use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Missing value for field: {field}")]
    MissingField { field: String },

    #[error("Field '{field}' is not a number: {value}")]
    NotANumber { field: String, value: String },

    #[error("Field '{field}' out of range: {value} ({reason})")]
    OutOfRange {
        field: String,
        value: f64,
        reason: String,
    },

    #[error("Operation '{operation}' is not supported by variant '{variant}'")]
    UnsupportedOperation { operation: String, variant: String },

    #[error("Calculation produced a non-finite value for {quantity}")]
    NonFiniteResult { quantity: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Domain,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CalcError::MissingField { .. }
            | CalcError::NotANumber { .. }
            | CalcError::OutOfRange { .. } => ErrorCategory::Input,
            CalcError::UnsupportedOperation { .. } | CalcError::NonFiniteResult { .. } => {
                ErrorCategory::Domain
            }
            CalcError::ConfigValidationError { .. } | CalcError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CalcError::IoError(_) | CalcError::CsvError(_) | CalcError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 輸入錯誤：使用者重新輸入即可
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Domain | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CalcError::MissingField { .. } => "A required value was left blank".to_string(),
            CalcError::NotANumber { value, .. } => format!("'{}' is not a valid number", value),
            CalcError::OutOfRange { reason, .. } => reason.clone(),
            CalcError::UnsupportedOperation { operation, variant } => format!(
                "The {} calculator is not available in the {} variant",
                operation, variant
            ),
            CalcError::NonFiniteResult { quantity } => {
                format!("The {} cannot be calculated for these values", quantity)
            }
            CalcError::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
            CalcError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            CalcError::IoError(e) => format!("Could not access a file: {}", e),
            CalcError::CsvError(e) => format!("Could not read the CSV data: {}", e),
            CalcError::SerializationError(e) => format!("Could not produce output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CalcError::MissingField { field } => format!("Provide a value for '{}'", field),
            CalcError::NotANumber { field, .. } => {
                format!("Enter '{}' as a decimal number, e.g. 18.5", field)
            }
            CalcError::OutOfRange { field, .. } => {
                format!("Enter '{}' within the allowed range", field)
            }
            CalcError::UnsupportedOperation { .. } => {
                "Run with --variant extended to enable the target calculator".to_string()
            }
            CalcError::NonFiniteResult { .. } => {
                "Check that the ending index is greater than -12".to_string()
            }
            CalcError::ConfigValidationError { .. } | CalcError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            CalcError::IoError(_) => "Check that the file exists and is readable".to_string(),
            CalcError::CsvError(_) => {
                "Use a header row of player,starting_index,ending_index".to_string()
            }
            CalcError::SerializationError(_) => "Retry without --json".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_medium_severity() {
        let err = CalcError::MissingField {
            field: "ending_index".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("ending_index"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = CalcError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
