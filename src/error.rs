//! Error types for scoped-resources.

use std::num::ParseIntError;

use thiserror::Error;

/// Crate error type.
///
/// Only caller-side mistakes surface here. Missing or unreadable resources
/// degrade to empty results and are reported through logs or failure records.
#[derive(Error, Debug)]
pub enum Error {
    /// Property exists but is not a base-10 `i32`
    #[error("Property '{name}' of {scope} is not an integer: {value:?}")]
    NotAnInteger {
        scope: String,
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Provider name is not a qualified identifier
    #[error("Invalid provider name: {0:?}")]
    InvalidProviderName(String),

    /// Malformed properties content
    #[error("Properties parse error: {0}")]
    Parse(#[from] crate::properties::parser::PropertiesParseError),

    /// JSON configuration error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scoped-resources operations.
pub type Result<T> = std::result::Result<T, Error>;
