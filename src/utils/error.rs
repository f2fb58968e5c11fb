use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrecioLuzError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Telegram API error (status {status}): {description}")]
    TelegramError { status: u16, description: String },

    #[error("Container recipe error: {message}")]
    RecipeError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Recipe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PrecioLuzError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PrecioLuzError::HttpError(_) | PrecioLuzError::TelegramError { .. } => {
                ErrorCategory::Network
            }
            PrecioLuzError::IoError(_) | PrecioLuzError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            PrecioLuzError::MissingConfigError { .. }
            | PrecioLuzError::InvalidConfigValueError { .. }
            | PrecioLuzError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            PrecioLuzError::RecipeError { .. } => ErrorCategory::Recipe,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // the next scheduled run retries on its own
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Recipe => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PrecioLuzError::HttpError(_) => {
                "Check network connectivity and the Telegram API base URL".to_string()
            }
            PrecioLuzError::TelegramError { status: 401, .. } => {
                "The bot token was rejected; check TELEGRAM_BOT_TOKEN".to_string()
            }
            PrecioLuzError::TelegramError { status: 400, .. } => {
                "Check TELEGRAM_CHAT_ID and that the bot has been added to the chat".to_string()
            }
            PrecioLuzError::TelegramError { .. } => {
                "Telegram rejected the message; try again later".to_string()
            }
            PrecioLuzError::IoError(_) => {
                "Check that the state file location exists and is writable".to_string()
            }
            PrecioLuzError::SerializationError(_) => {
                "The response could not be decoded; check the API base URL".to_string()
            }
            PrecioLuzError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or the environment", field)
            }
            PrecioLuzError::InvalidConfigValueError { field, .. }
            | PrecioLuzError::ConfigValidationError { field, .. } => {
                format!("Fix the value of '{}' in the configuration", field)
            }
            PrecioLuzError::RecipeError { .. } => {
                "Check the base image reference, manifest path and command".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not reach Telegram: {}", self),
            ErrorCategory::Storage => format!("Could not access local state: {}", self),
            ErrorCategory::Recipe => format!("Invalid container recipe: {}", self),
        }
    }

    /// Process exit code for a run that ended with this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, PrecioLuzError>;
