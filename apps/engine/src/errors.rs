use thiserror::Error;

use crate::generation::GenerationTarget;
use crate::models::EntryId;

/// A store update that does not fit the document schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Unknown {list} entry: {id}")]
    UnknownEntry { list: &'static str, id: EntryId },

    #[error("Invalid value for {field}: expected {expected}")]
    InvalidValue {
        field: String,
        expected: &'static str,
    },

    #[error("Invalid value for {field}: '{value}' is not one of [{allowed}]")]
    NotInEnumeration {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("{list} entries have no current flag")]
    CurrentNotSupported { list: &'static str },

    #[error("Cannot set {field} on an entry marked current")]
    EndDateOnCurrentEntry { field: &'static str },

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

impl SchemaError {
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownField(_) => "UNKNOWN_FIELD",
            SchemaError::UnknownEntry { .. } => "UNKNOWN_ENTRY",
            SchemaError::InvalidValue { .. } => "INVALID_VALUE",
            SchemaError::NotInEnumeration { .. } => "NOT_IN_ENUMERATION",
            SchemaError::CurrentNotSupported { .. } => "CURRENT_NOT_SUPPORTED",
            SchemaError::EndDateOnCurrentEntry { .. } => "END_DATE_ON_CURRENT_ENTRY",
            SchemaError::UnknownTemplate(_) => "UNKNOWN_TEMPLATE",
        }
    }
}

/// Generation preconditions not met. Raised before any backend call.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Cannot generate {target}: please fill in {} first", .missing.join(", "))]
pub struct ValidationError {
    pub target: GenerationTarget,
    /// Human-readable names of the empty context fields (or the missing entry).
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        "VALIDATION_ERROR"
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TemplateError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Template already registered: {0}")]
    DuplicateTemplate(String),
}

impl TemplateError {
    pub fn code(&self) -> &'static str {
        match self {
            TemplateError::UnknownTemplate(_) => "UNKNOWN_TEMPLATE",
            TemplateError::DuplicateTemplate(_) => "DUPLICATE_TEMPLATE",
        }
    }
}

/// Errors the orchestrator surfaces synchronously to its caller.
/// Backend failures are not here: they end as `GenerationOutcome::Failed`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A generation request for {0} is already in progress")]
    AlreadyRequesting(GenerationTarget),
}

impl GenerationError {
    pub fn code(&self) -> &'static str {
        match self {
            GenerationError::Validation(e) => e.code(),
            GenerationError::AlreadyRequesting(_) => "ALREADY_REQUESTING",
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Validation(e) => e.to_string(),
            GenerationError::AlreadyRequesting(_) => {
                "Generation is already running for this field. Please wait for it to finish."
                    .to_string()
            }
        }
    }
}
