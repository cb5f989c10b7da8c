//! Error types for attribute validation

use crate::utils::validation::shape::format_dims;
use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Comprehensive error types for validation failures
///
/// Every variant maps to a machine-readable identifier (see
/// [`ValidationError::identifier`]) and displays as the human-readable
/// message, already prefixed with the error context where one applies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Call parameter of the wrong type
    #[error("{0}")]
    InvalidType(String),

    /// Value is not of any accepted class
    #[error("{0}")]
    ClassMismatch(String),

    /// Malformed call parameter (context arguments, auxiliary attribute values)
    #[error("{0}")]
    InvalidInputArg(String),

    /// Attribute token not present in the rule table
    #[error("validateattributes: unknown ATTRIBUTE {0}")]
    UnknownAttribute(String),

    /// Attribute token that needs an auxiliary value was the last token
    #[error("Incorrect number of attribute arguments")]
    MissingAttributeValue(String),

    /// A check failed for the value under test
    #[error("{message}")]
    CheckFailed {
        /// Identifier such as `expected-square` or `incorrect-size`
        id: &'static str,
        /// Context-prefixed description of the failure
        message: String,
    },

    /// Comparison bound whose shape cannot broadcast against the value
    #[error("{0}")]
    Nonconformant(String),

    /// Elementwise operation not defined for the value's class
    #[error("{0}")]
    UndefinedOperation(String),
}

impl ValidationError {
    /// Create a new invalid type error
    pub fn invalid_type<S: Into<String>>(msg: S) -> Self {
        Self::InvalidType(msg.into())
    }

    /// Create a new invalid input argument error
    pub fn invalid_input_arg<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInputArg(msg.into())
    }

    /// Create a new unknown attribute error
    pub fn unknown_attribute<S: Into<String>>(name: S) -> Self {
        Self::UnknownAttribute(name.into())
    }

    /// Create a new failed check error
    pub fn check_failed<S: Into<String>>(id: &'static str, msg: S) -> Self {
        Self::CheckFailed {
            id,
            message: msg.into(),
        }
    }

    /// Create an error for an operation the class does not support
    pub fn undefined_operation(operation: &str, class_name: &str) -> Self {
        Self::UndefinedOperation(format!(
            "{} not defined for values of class '{}'",
            operation, class_name
        ))
    }

    /// Create a size mismatch error between a value and a comparison bound
    pub fn nonconformant(operation: &str, value_dims: &[usize], bound_dims: &[usize]) -> Self {
        Self::Nonconformant(format!(
            "operator {}: nonconformant arguments (op1 is {}, op2 is {})",
            operation,
            format_dims(value_dims),
            format_dims(bound_dims)
        ))
    }

    /// Machine-readable identifier for this error
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::InvalidType(_) | Self::ClassMismatch(_) => "invalid-type",
            Self::InvalidInputArg(_) | Self::UnknownAttribute(_) | Self::MissingAttributeValue(_) => {
                "invalid-input-arg"
            },
            Self::CheckFailed { id, .. } => id,
            Self::Nonconformant(_) => "nonconformant-args",
            Self::UndefinedOperation(_) => "undefined-function",
        }
    }

    /// Identifier with an optional namespace, e.g. `Octave:expected-2d`
    pub fn qualified_identifier(&self, namespace: Option<&str>) -> String {
        match namespace {
            Some(ns) if !ns.is_empty() => format!("{}:{}", ns, self.identifier()),
            _ => self.identifier().to_string(),
        }
    }

    /// Whether the value under test failed a check, as opposed to a malformed call
    pub fn is_check_failure(&self) -> bool {
        matches!(self, Self::CheckFailed { .. } | Self::ClassMismatch(_))
    }
}
