//! Error types shared across the geocoding, generation and storage layers

use thiserror::Error;

/// Geocoding failed or returned nothing usable
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Geocoding failed: {0}")]
    Status(String),

    #[error("Geocoding returned no results")]
    NoResults,

    #[error("Unexpected geocoding response: {0}")]
    MalformedResponse(String),
}

/// Text generation did not produce a usable answer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Generation request failed: {0}")]
    Transport(String),

    #[error("Unexpected API response format")]
    MalformedResponse,
}

/// A favorites import payload was rejected as a whole
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportValidationError {
    #[error("Import payload is not an array")]
    NotAnArray,

    #[error("Import entry {index} is invalid: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Import payload is not valid JSON: {0}")]
    Unparseable(String),
}

/// Import failure: either the payload was rejected or persisting it failed
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Invalid(#[from] ImportValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Path(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Path(String),
}

/// Umbrella error for application-level operations
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("No location selected")]
    NoLocationSelected,

    #[error("No saved location at index {0}")]
    NoSuchLocation(usize),

    #[error("No locations to export.")]
    NothingToExport,
}
