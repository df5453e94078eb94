use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unable to parse menu: {message}")]
    MenuParseError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Render error: {message}")]
    RenderError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FeedError {
    pub fn menu_parse(message: impl Into<String>) -> Self {
        Self::MenuParseError {
            message: message.into(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FeedError::HttpError(_) => ErrorSeverity::Medium,
            FeedError::MenuParseError { .. }
            | FeedError::RenderError { .. }
            | FeedError::ConfigError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => ErrorSeverity::High,
            FeedError::IoError(_) | FeedError::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FeedError::ConfigError { .. }
                | FeedError::InvalidConfigValueError { .. }
                | FeedError::MissingConfigError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FeedError::IoError(e) => format!("Could not read or write a file: {}", e),
            FeedError::HttpError(e) => format!("The ad server could not be reached: {}", e),
            FeedError::SerializationError(e) => format!("Could not encode the feed: {}", e),
            FeedError::MenuParseError { message } => {
                format!("The menu file is not valid: {}", message)
            }
            FeedError::ConfigError { message } => format!("Configuration problem: {}", message),
            FeedError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Setting '{}' has an invalid value '{}': {}", field, value, reason),
            FeedError::MissingConfigError { field } => {
                format!("Setting '{}' is required but was not provided", field)
            }
            FeedError::RenderError { message } => format!("Could not render the feed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FeedError::IoError(_) => "Check that the path exists and is readable",
            FeedError::HttpError(_) => "Check the ad endpoint URL and your network connection",
            FeedError::SerializationError(_) | FeedError::RenderError { .. } => {
                "Try the other output format"
            }
            FeedError::MenuParseError { .. } => {
                "The menu must be a JSON array of objects with name, description, price, category and photo"
            }
            FeedError::ConfigError { .. }
            | FeedError::InvalidConfigValueError { .. }
            | FeedError::MissingConfigError { .. } => "Review the command line flags and the TOML file",
        }
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;
