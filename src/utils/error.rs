use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxError {
    #[error("Invalid {field} '{value}': {reason}")]
    InputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid credentials for user '{username}'")]
    InvalidCredentials { username: String },

    #[error("Database error: {0}")]
    StorageError(#[from] rusqlite::Error),

    #[error("Record store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Authentication,
    Storage,
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

impl TaxError {
    pub fn input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        TaxError::InputError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            TaxError::InputError { .. } => ErrorCategory::Input,
            TaxError::InvalidCredentials { .. } => ErrorCategory::Authentication,
            TaxError::StorageError(_) | TaxError::StoreUnavailable { .. } => ErrorCategory::Storage,
            TaxError::ConfigError { .. }
            | TaxError::ConfigValidationError { .. }
            | TaxError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            TaxError::IoError(_) | TaxError::SerializationError(_) | TaxError::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Authentication => ErrorSeverity::Low,
            ErrorCategory::Storage => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Input and credential errors only ever cost the user a re-prompt.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Input | ErrorCategory::Authentication
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TaxError::InputError { .. } => "Enter plain numbers such as 750000 or 1250.50",
            TaxError::InvalidCredentials { .. } => "Check the username and password and try again",
            TaxError::StorageError(_) => "Check that the database file is writable and not locked",
            TaxError::StoreUnavailable { .. } => {
                "Check the database path; calculations still work but are not saved"
            }
            TaxError::IoError(_) => "Check file permissions and available disk space",
            TaxError::SerializationError(_) | TaxError::CsvError(_) => {
                "Retry with a different output format"
            }
            TaxError::ConfigError { .. } | TaxError::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML"
            }
            TaxError::InvalidConfigValueError { .. } => "Fix the reported configuration value",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TaxError::InputError { .. } => "Enter valid numbers!".to_string(),
            TaxError::InvalidCredentials { .. } => "Invalid Credentials!".to_string(),
            TaxError::StorageError(_) | TaxError::StoreUnavailable { .. } => {
                format!("The calculation database is unavailable ({})", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_is_low_severity_and_recoverable() {
        let err = TaxError::input("income", "abc", "not a number");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.is_recoverable());
        assert_eq!(err.user_friendly_message(), "Enter valid numbers!");
    }

    #[test]
    fn test_store_errors_are_not_recoverable_by_reprompt() {
        let err = TaxError::StoreUnavailable {
            message: "unable to open database file".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_recoverable());
        assert!(err.user_friendly_message().contains("database is unavailable"));
        assert!(!err.user_friendly_message().contains("saved"));
    }

    #[test]
    fn test_credentials_message_matches_login_prompt() {
        let err = TaxError::InvalidCredentials {
            username: "guest".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "Invalid Credentials!");
        assert!(err.to_string().contains("guest"));
    }
}
