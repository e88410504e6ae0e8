use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { status: u16, url: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid store path '{path}': expected '<namespace>/<name>'")]
    InvalidPath { path: String },

    #[error("No module registered under namespace '{namespace}'")]
    UnknownModule { namespace: String },

    #[error("Unknown {kind} '{name}' in module '{namespace}'")]
    UnknownOperation {
        kind: OperationKind,
        namespace: String,
        name: String,
    },

    #[error("Module namespace '{namespace}' is already registered")]
    DuplicateModule { namespace: String },

    #[error("Invalid payload for '{operation}': {message}")]
    InvalidPayload { operation: String, message: String },
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Which kind of module operation a namespaced path pointed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Getter,
    Mutation,
    Action,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OperationKind::Getter => "getter",
            OperationKind::Mutation => "mutation",
            OperationKind::Action => "action",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Dispatch,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StoreError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StoreError::ApiError(_) | StoreError::HttpStatusError { .. } => ErrorCategory::Network,
            StoreError::ConfigValidationError { .. }
            | StoreError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            StoreError::SerializationError(_) | StoreError::InvalidPayload { .. } => {
                ErrorCategory::Data
            }
            StoreError::InvalidPath { .. }
            | StoreError::UnknownModule { .. }
            | StoreError::UnknownOperation { .. }
            | StoreError::DuplicateModule { .. } => ErrorCategory::Dispatch,
            StoreError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // Network failures are transient; running again may succeed.
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Dispatch => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StoreError::ApiError(e) if e.is_timeout() => {
                "The request timed out; raise profile.timeout_seconds or retry later".to_string()
            }
            StoreError::ApiError(_) => {
                "Check network connectivity and that the profile endpoint is reachable".to_string()
            }
            StoreError::HttpStatusError { status, .. } if *status >= 500 => {
                "The remote service failed; retry later".to_string()
            }
            StoreError::HttpStatusError { .. } => {
                "Verify the profile endpoint URL and its query parameters".to_string()
            }
            StoreError::IoError(_) => "Check file paths and permissions".to_string(),
            StoreError::SerializationError(_) => {
                "The response body must be a JSON object with firstName and lastName".to_string()
            }
            StoreError::ConfigValidationError { field, .. }
            | StoreError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in the configuration file or CLI flags", field)
            }
            StoreError::InvalidPath { .. } => {
                "Address operations as '<namespace>/<name>', e.g. 'profile/firstName'".to_string()
            }
            StoreError::UnknownModule { .. } => {
                "Register the module on the root store before addressing it".to_string()
            }
            StoreError::UnknownOperation { .. } => {
                "Check the operation name against the module's getters, mutations and actions"
                    .to_string()
            }
            StoreError::DuplicateModule { .. } => {
                "Each module needs a unique namespace".to_string()
            }
            StoreError::InvalidPayload { .. } => {
                "Check the payload shape expected by the operation".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the profile: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::Dispatch => format!("Store call rejected: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
