//! Error types for coral_core

use thiserror::Error;

/// Errors raised while reading slider configuration attributes
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Attribute present but not a number
    #[error("attribute `{name}` expects a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    /// Attribute present but not a boolean
    #[error("attribute `{name}` expects true/false, got {value:?}")]
    InvalidBool { name: &'static str, value: String },

    /// Numeric attribute outside its accepted range
    #[error("attribute `{name}` out of range: {value}")]
    OutOfRange { name: &'static str, value: String },

    /// Attribute not one of the accepted keywords
    #[error("attribute `{name}` has unknown value {value:?}")]
    UnknownKeyword { name: &'static str, value: String },
}

/// Errors that can occur in the Coral slider
#[derive(Error, Debug)]
pub enum CoralError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The host element has no `.coral-scroll__slider` track
    #[error("Slider root has no slide track")]
    MissingTrack,

    /// A bus message could not be decoded from its JSON detail
    #[error("Malformed bus message: {0}")]
    MalformedMessage(#[from] serde_json::Error),

    /// Unknown bus event name
    #[error("Unknown bus event: {0}")]
    UnknownEvent(String),
}

/// Result type for coral operations
pub type Result<T> = std::result::Result<T, CoralError>;
