use thiserror::Error;

/// Message shown to the user whenever the directory cannot be loaded.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to load doctors. Please try again.";

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API responded with status {status} for {endpoint}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("Malformed doctor list: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DirectoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DirectoryError::RequestError(_) | DirectoryError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            DirectoryError::DecodeError(_) => ErrorCategory::Data,
            DirectoryError::IoError(_) => ErrorCategory::System,
            DirectoryError::ConfigError { .. }
            | DirectoryError::ConfigValidationError { .. }
            | DirectoryError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// True for every error the data fetcher can produce.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            DirectoryError::RequestError(_)
                | DirectoryError::HttpStatusError { .. }
                | DirectoryError::DecodeError(_)
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            DirectoryError::RequestError(_) => {
                "Check your network connection and reload the directory".to_string()
            }
            DirectoryError::HttpStatusError { endpoint, .. } => {
                format!("Verify that {} is reachable and serves the doctor list", endpoint)
            }
            DirectoryError::DecodeError(_) => {
                "The endpoint must return a JSON array of doctor records".to_string()
            }
            DirectoryError::IoError(_) => "Check file permissions and paths".to_string(),
            DirectoryError::ConfigError { .. } | DirectoryError::ConfigValidationError { .. } => {
                "Fix the configuration file and try again".to_string()
            }
            DirectoryError::InvalidConfigValueError { field, .. } => {
                format!("Provide a valid value for '{}'", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        if self.is_fetch_failure() {
            FETCH_FAILURE_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
