use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument { field: String, message: String },

    #[error("Invalid freight parameter '{field}' = {value}: {reason}")]
    InvalidFreightParameters {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid freight modality: {value}")]
    InvalidModality { value: String },

    #[error("Order with id '{id}' was not found")]
    NotFound { id: uuid::Uuid },

    #[error("Order with id '{id}' already exists")]
    AlreadyExists { id: uuid::Uuid },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Script step {step} failed: {source}")]
    ScriptError {
        step: usize,
        #[source]
        source: Box<OrderError>,
    },
}

pub type Result<T> = std::result::Result<T, OrderError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Conflict,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl OrderError {
    pub fn invalid_argument(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn invalid_modality(value: impl ToString) -> Self {
        Self::InvalidModality {
            value: value.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. }
            | Self::InvalidFreightParameters { .. }
            | Self::InvalidModality { .. } => ErrorCategory::Validation,
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
            Self::ScriptError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Validation | ErrorCategory::Conflict => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 對應傳輸層的結果碼 (400 / 404 / 409 / 500)
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Conflict => 409,
            ErrorCategory::Configuration | ErrorCategory::System => 500,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidArgument { field, .. } => {
                format!("Provide a non-empty value for '{}'", field)
            }
            Self::InvalidFreightParameters { field, .. } => format!(
                "Check '{}': weight and distance must be greater than zero, fixed fee cannot be negative, and none may exceed 10^27",
                field
            ),
            Self::InvalidModality { .. } => {
                "Use one of the supported modalities: normal, express, scheduled".to_string()
            }
            Self::NotFound { .. } => {
                "List the stored orders to find a valid order id".to_string()
            }
            Self::AlreadyExists { .. } => "Retry the operation with a new order id".to_string(),
            Self::IoError(_) => "Check that the file exists and is readable".to_string(),
            Self::SerializationError(_) => "Check the input data format".to_string(),
            Self::ConfigError { .. } | Self::ConfigValidationError { .. } => {
                "Fix the script configuration and run again".to_string()
            }
            Self::ScriptError { step, .. } => format!(
                "Fix step {} or set error_handling.on_error = \"continue\"",
                step
            ),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message, .. } => message.clone(),
            Self::InvalidFreightParameters { reason, .. } => reason.clone(),
            Self::InvalidModality { value } => format!("'{}' is not a freight modality", value),
            Self::NotFound { id } => format!("Order '{}' does not exist", id),
            Self::AlreadyExists { id } => format!("Order '{}' is already stored", id),
            Self::ScriptError { step, source } => {
                format!("Step {}: {}", step, source.user_friendly_message())
            }
            other => other.to_string(),
        }
    }
}
