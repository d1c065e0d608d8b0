//! Error types shared by the document core and the command surface.
//!
//! Every failure is caller-correctable: the core either produces a complete new
//! state or leaves the previous one untouched, so errors carry enough context
//! (a machine-readable kind and an optional field path) to fix the input.

use serde_json::{json, Value};
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, PixiconError>;

/// Errors reported by pixicon operations.
#[derive(Debug, Error)]
pub enum PixiconError {
    /// The operation needs a document but none was supplied
    #[error("{message}")]
    MissingDocument { message: String },

    /// A required parameter is absent
    #[error("{message}")]
    MissingParameter { message: String, path: String },

    /// A parameter is present but out of range or of the wrong shape
    #[error("{message}")]
    InvalidParameter { message: String, path: String },

    /// A cell-selection expression references a missing cell or is malformed
    #[error("{message}")]
    InvalidTarget { message: String },

    /// A pattern name is not recognized
    #[error("Unknown pattern: \"{name}\". Available: {available}")]
    UnknownPattern { name: String, available: String, path: String },

    /// A pattern produced no cells where at least one is required
    #[error("Pattern \"{0}\" produced no cells")]
    EmptyPatternResult(String),

    /// Grid dimensions outside the supported 1..=64 bound
    #[error("Grid size must be between 1 and 64 (got {rows}x{cols})")]
    InvalidGridSize { rows: usize, cols: usize },

    /// The document is missing its frames or is otherwise malformed
    #[error("{message}")]
    InvalidDocumentShape { message: String, path: String },

    /// A describe topic is not recognized
    #[error("Unknown topic: \"{name}\". Available: {available}")]
    UnknownTopic { name: String, available: String },

    /// A preset name is not recognized
    #[error("Unknown preset: \"{name}\". Available: {available}")]
    UnknownPreset { name: String, available: String },

    /// A command verb is not recognized
    #[error("Unknown {noun} verb: \"{verb}\"")]
    UnknownVerb { noun: String, verb: String },

    /// Structured input could not be parsed
    #[error("Invalid JSON in {source_name}: {message}")]
    MalformedInput { source_name: String, message: String },

    /// A gallery entry does not exist
    #[error("No gallery entry with id \"{0}\"")]
    NotFound(String),

    /// File access failed
    #[error("Cannot read file: {message}")]
    Io { message: String, path: String },

    /// An image file could not be decoded
    #[error("Cannot decode image: {0}")]
    ImageDecode(String),
}

impl PixiconError {
    pub fn missing_document(message: impl Into<String>) -> Self {
        PixiconError::MissingDocument { message: message.into() }
    }

    pub fn missing_param(message: impl Into<String>, path: impl Into<String>) -> Self {
        PixiconError::MissingParameter { message: message.into(), path: path.into() }
    }

    pub fn invalid_param(message: impl Into<String>, path: impl Into<String>) -> Self {
        PixiconError::InvalidParameter { message: message.into(), path: path.into() }
    }

    pub fn invalid_target(message: impl Into<String>) -> Self {
        PixiconError::InvalidTarget { message: message.into() }
    }

    pub fn invalid_document(message: impl Into<String>, path: impl Into<String>) -> Self {
        PixiconError::InvalidDocumentShape { message: message.into(), path: path.into() }
    }

    pub fn unknown_verb(noun: impl Into<String>, verb: Option<&str>) -> Self {
        PixiconError::UnknownVerb {
            noun: noun.into(),
            verb: verb.unwrap_or("").to_string(),
        }
    }

    pub fn malformed(source_name: impl Into<String>, err: impl std::fmt::Display) -> Self {
        PixiconError::MalformedInput { source_name: source_name.into(), message: err.to_string() }
    }

    /// Machine-readable error code.
    pub fn kind(&self) -> &'static str {
        match self {
            PixiconError::MissingDocument { .. } => "NO_DOCUMENT",
            PixiconError::MissingParameter { .. } => "MISSING_PARAM",
            PixiconError::InvalidParameter { .. } => "INVALID_PARAM",
            PixiconError::InvalidTarget { .. } => "INVALID_TARGET",
            PixiconError::UnknownPattern { .. } => "UNKNOWN_PATTERN",
            PixiconError::EmptyPatternResult(_) => "EMPTY_PATTERN",
            PixiconError::InvalidGridSize { .. } => "INVALID_SIZE",
            PixiconError::InvalidDocumentShape { .. } => "INVALID_DOCUMENT",
            PixiconError::UnknownTopic { .. } => "UNKNOWN_TOPIC",
            PixiconError::UnknownPreset { .. } => "UNKNOWN_PRESET",
            PixiconError::UnknownVerb { .. } => "UNKNOWN_VERB",
            PixiconError::MalformedInput { .. } => "INVALID_JSON",
            PixiconError::NotFound(_) => "NOT_FOUND",
            PixiconError::Io { .. } => "FILE_READ",
            PixiconError::ImageDecode(_) => "IMAGE_DECODE",
        }
    }

    /// Field path the error refers to, when there is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            PixiconError::MissingDocument { .. } => Some("stdin"),
            PixiconError::MissingParameter { path, .. } => Some(path),
            PixiconError::InvalidParameter { path, .. } => Some(path),
            PixiconError::InvalidTarget { .. } => Some("targets"),
            PixiconError::UnknownPattern { path, .. } => Some(path),
            PixiconError::EmptyPatternResult(_) => Some("data.pattern"),
            PixiconError::InvalidGridSize { .. } => Some("data.rows/cols"),
            PixiconError::InvalidDocumentShape { path, .. } => Some(path),
            PixiconError::UnknownTopic { .. } => Some("topic"),
            PixiconError::UnknownPreset { .. } => Some("data.preset"),
            PixiconError::UnknownVerb { .. } => Some("command"),
            PixiconError::MalformedInput { source_name, .. } => Some(source_name),
            PixiconError::NotFound(_) => Some("data.id"),
            PixiconError::Io { path, .. } => Some(path),
            PixiconError::ImageDecode(_) => Some("data.path"),
        }
    }

    /// Structured report: `{error, message, path?}`.
    pub fn to_json(&self) -> Value {
        let mut obj = json!({ "error": self.kind(), "message": self.to_string() });
        if let Some(path) = self.path() {
            obj["path"] = Value::String(path.to_string());
        }
        obj
    }
}
