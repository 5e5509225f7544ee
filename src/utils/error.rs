use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unable to generate a unique nickname after {max_attempts} attempts")]
    ExhaustionError { max_attempts: usize },

    #[error("Handle lookup failed: {message}")]
    VerificationError { message: String },

    #[error("Profile conflict: {message}")]
    CreationConflictError { message: String },

    #[error("Profile creation failed: {message}")]
    CreationError { message: String },

    #[error("Profile query failed: {message}")]
    QueryError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ProfileError>;
