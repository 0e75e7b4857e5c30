use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("WASM file not found at {path}")]
    NotFound { path: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to start `{program}`: {source}")]
    CommandSpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value:?}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    ExternalTool,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl UploadError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            UploadError::NotFound { .. } | UploadError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            UploadError::ConfigError { .. }
            | UploadError::ConfigValidationError { .. }
            | UploadError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            UploadError::CommandSpawnError { .. } => ErrorCategory::ExternalTool,
            UploadError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration | ErrorCategory::ExternalTool => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            UploadError::NotFound { .. } => {
                "Build the module first or pass the correct WASM path as the first argument"
                    .to_string()
            }
            UploadError::CommandSpawnError { program, .. } => format!(
                "Make sure `{}` is installed and on PATH, or point --dfx at the binary",
                program
            ),
            UploadError::ConfigError { .. } | UploadError::ConfigValidationError { .. } => {
                "Check the TOML file syntax and the [upload] table".to_string()
            }
            UploadError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of `{}` on the command line or in the config file", field)
            }
            UploadError::ValidationError { .. } => {
                "The argument must look like (blob \"\\XX\\XX...\")".to_string()
            }
            UploadError::IoError(_) => "Check file permissions and available disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            UploadError::NotFound { path } => format!("Error: WASM file not found at {}", path),
            UploadError::CommandSpawnError { program, .. } => {
                format!("Error: could not run `{}`", program)
            }
            other => format!("Error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, UploadError>;
