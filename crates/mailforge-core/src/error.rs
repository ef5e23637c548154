//! Error handling for MailForge
//!
//! Provides error types for each layer of the design studio:
//! - Design errors (element model, properties input, templates, fonts)
//! - Persistence errors (remote campaign store, serialization)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::ids::CampaignId;

/// Design error type
///
/// Raised by editor operations whose input can be rejected. Mutations keyed
/// by a stale element id are never errors; they are silent no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DesignError {
    /// A reorder did not contain exactly the current element set
    #[error("Reorder rejected: expected {expected} elements, got {actual} ({reason})")]
    InvalidPermutation {
        /// Number of elements in the model.
        expected: usize,
        /// Number of ids in the proposed order.
        actual: usize,
        /// What was wrong with the proposed order.
        reason: String,
    },

    /// A numeric field received text that is not a finite number
    #[error("Invalid number for '{field}': {input:?}")]
    InvalidNumber {
        /// The property field being edited.
        field: String,
        /// The raw text that failed to parse.
        input: String,
    },

    /// A choice field received a value outside its option list
    #[error("Invalid value for '{field}': {input:?}")]
    InvalidValue {
        /// The property field being edited.
        field: String,
        /// The rejected value.
        input: String,
    },

    /// A field does not apply to the selected element's variant
    #[error("Field '{field}' does not apply to {kind} elements")]
    FieldNotApplicable {
        /// The property field being edited.
        field: String,
        /// The element variant name.
        kind: String,
    },

    /// No element is selected
    #[error("No element selected")]
    NoSelection,

    /// A layer row index is outside the list
    #[error("Layer index {index} out of range for {len} layers")]
    LayerIndexOutOfRange {
        /// The displayed row index.
        index: usize,
        /// Number of rows.
        len: usize,
    },

    /// Template id is not in the catalog
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Unknown postcard size key
    #[error("Unknown postcard size: {0}")]
    UnknownCanvasSize(String),

    /// An uploaded font could not be read
    #[error("Font '{name}' could not be loaded: {reason}")]
    FontLoad {
        /// Uploaded file name.
        name: String,
        /// Why the font was rejected.
        reason: String,
    },
}

/// Persistence error type
///
/// Represents failures talking to the remote campaign store.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    /// The store rejected or failed the request
    #[error("Campaign store error: {0}")]
    Store(String),

    /// The campaign record does not exist
    #[error("Campaign not found: {0}")]
    NotFound(CampaignId),

    /// Design data could not be encoded or decoded
    #[error("Design serialization failed: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        PersistenceError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_design_error_display() {
        let err = DesignError::InvalidNumber {
            field: "x".to_string(),
            input: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid number for 'x': \"abc\"");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: PersistenceError = json_err.into();
        assert!(matches!(err, PersistenceError::Serialization(_)));
        assert!(err.to_string().starts_with("Design serialization failed:"));
    }
}
