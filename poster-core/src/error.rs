//! Error types for editor operations.

use thiserror::Error;

use crate::{ComponentType, FieldKey};

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors that can occur in editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A drop payload or type string did not name a known component.
    #[error("Unknown component type: {0}")]
    InvalidDropType(String),

    /// A handle tag did not name a known operation mode.
    #[error("Unknown operation mode: {0}")]
    InvalidOperationMode(String),

    /// A string did not name a known property field.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The field does not exist on this component type.
    #[error("Field `{field}` does not apply to {component} elements")]
    FieldNotApplicable {
        /// The field that was addressed.
        field: FieldKey,
        /// The component type of the element.
        component: ComponentType,
    },

    /// Required fields cannot be removed from an element.
    #[error("Field `{0}` is required and cannot be removed")]
    FieldRequired(FieldKey),

    /// The value supplied for a field has the wrong shape.
    #[error("Invalid value for field `{field}`: {reason}")]
    InvalidFieldValue {
        /// The field that was addressed.
        field: FieldKey,
        /// Why the value was rejected.
        reason: String,
    },

    /// Importing a document failed.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while importing an interchange document.
///
/// Both variants leave the scene untouched.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not valid JSON.
    #[error("Failed to parse document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The JSON is well-formed but does not describe a list of elements.
    #[error("Invalid document: {0}")]
    Schema(#[from] SchemaError),
}

/// Schema violations found while validating an imported document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The document root is not an array.
    #[error("document root is not an array")]
    NotAnArray,

    /// An item of the array is not a keyed object.
    #[error("item {item} is not an object")]
    NotAnObject {
        /// Position of the offending item.
        item: usize,
    },

    /// A required field is absent.
    #[error("item {item} is missing required field `{field}`")]
    MissingField {
        /// Position of the offending item.
        item: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// An enumerated field holds an unknown value.
    #[error("item {item} has unknown `{field}` value {value:?}")]
    InvalidEnum {
        /// Position of the offending item.
        item: usize,
        /// Name of the enumerated field.
        field: &'static str,
        /// The rejected value as written in the document.
        value: String,
    },

    /// A field is present but holds a value of the wrong type.
    #[error("item {item} has an invalid value: {message}")]
    InvalidValue {
        /// Position of the offending item.
        item: usize,
        /// Deserializer message describing the problem.
        message: String,
    },
}

impl SchemaError {
    /// Short machine-readable tag for the kind of violation.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotAnArray => "not-an-array",
            Self::NotAnObject { .. } => "not-an-object",
            Self::MissingField { .. } => "missing-field",
            Self::InvalidEnum { .. } => "invalid-enum",
            Self::InvalidValue { .. } => "invalid-value",
        }
    }

    /// Position of the offending item, if the error concerns one.
    #[must_use]
    pub const fn item(&self) -> Option<usize> {
        match self {
            Self::NotAnArray => None,
            Self::NotAnObject { item }
            | Self::MissingField { item, .. }
            | Self::InvalidEnum { item, .. }
            | Self::InvalidValue { item, .. } => Some(*item),
        }
    }
}
