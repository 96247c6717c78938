use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Contact endpoint rejected the request with status {status}")]
    DeliveryRejected { status: u16 },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    System,
}

impl SiteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SiteError::ConfigValidationError { .. }
            | SiteError::InvalidConfigValueError { .. }
            | SiteError::InvalidSelector { .. } => ErrorCategory::Configuration,
            SiteError::HttpError(_) | SiteError::DeliveryRejected { .. } => ErrorCategory::Network,
            SiteError::IoError(_) | SiteError::SerializationError(_) => ErrorCategory::System,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
