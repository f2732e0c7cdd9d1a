use crate::model::TagCategory;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PharmacalcError {
    #[error("'{id}' is not a known {category} tag")]
    InvalidTag { category: TagCategory, id: String },

    #[error("tag '{0}' not found in registry")]
    TagNotFound(String),

    #[error("select at least one drug functional group or excipient before assessing")]
    EmptySelection,

    #[error("invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("failed to load registry from {path}: {reason}")]
    RegistryLoad { path: PathBuf, reason: String },

    #[error("invalid registry: {0}")]
    RegistryInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PharmacalcError {
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        PharmacalcError::InvalidInput {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Short stable code for transports that map errors to status codes.
    pub fn error_code(&self) -> &'static str {
        match self {
            PharmacalcError::InvalidTag { .. } => "INVALID_TAG",
            PharmacalcError::TagNotFound(_) => "TAG_NOT_FOUND",
            PharmacalcError::EmptySelection => "EMPTY_SELECTION",
            PharmacalcError::InvalidInput { .. } => "INVALID_INPUT",
            PharmacalcError::RegistryLoad { .. } => "REGISTRY_LOAD",
            PharmacalcError::RegistryInvalid(_) => "REGISTRY_INVALID",
            PharmacalcError::Io(_) => "IO_ERROR",
            PharmacalcError::Json(_) => "JSON_ERROR",
        }
    }
}
