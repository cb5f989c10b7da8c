//! JSON description of a validation call
//!
//! A request carries the value under test, the accepted classes, the
//! attribute list and the context parameters:
//!
//! ```json
//! {
//!   "value": { "class": "double", "size": [2, 2], "data": [1, 0, 0, 1] },
//!   "classes": ["numeric"],
//!   "attributes": ["square", "size", [2, null], ">=", 0],
//!   "context": ["solve", "A", 1]
//! }
//! ```
//!
//! Array data is column-major. `null` in a numeric position stands for NaN.

use crate::attributes::AttrArg;
use crate::config::ValidatorConfig;
use crate::context::{ContextArg, ErrorContext};
use crate::error::{Result, ValidationError};
use crate::types::{ElementClass, Storage, Value, ValueClass};
use crate::validator::AttributeValidator;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

fn nan_if_null(data: &[Option<f64>]) -> Vec<f64> {
    data.iter().map(|x| x.unwrap_or(f64::NAN)).collect()
}

fn default_class() -> ValueClass {
    ValueClass::Builtin(ElementClass::Double)
}

/// Full description of an array value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
    /// Builtin class name, or `{"name": ..., "superclasses": [...]}` for objects
    #[serde(default = "default_class")]
    pub class: ValueClass,
    /// Dimensions; a row vector when omitted
    #[serde(default)]
    pub size: Option<Vec<usize>>,
    /// Real parts in column-major order
    #[serde(default)]
    pub data: Vec<Option<f64>>,
    /// Imaginary parts in column-major order
    #[serde(default)]
    pub imag: Option<Vec<Option<f64>>>,
    #[serde(default)]
    pub storage: Storage,
}

impl ArraySpec {
    pub fn to_value(&self) -> Result<Value> {
        let class = match &self.class {
            ValueClass::Object { name, superclasses } => {
                return Ok(Value::object(name.clone(), superclasses.clone()));
            },
            ValueClass::Builtin(class) => *class,
        };

        let shape = self
            .size
            .clone()
            .unwrap_or_else(|| vec![1, self.data.len()]);
        let value = Value::from_column_major(
            class,
            &shape,
            nan_if_null(&self.data),
            self.imag.as_deref().map(nan_if_null),
        )?;

        match self.storage {
            Storage::Dense => Ok(value),
            Storage::Sparse => value.into_sparse(),
            Storage::Diagonal => value.into_diagonal(),
        }
    }
}

/// A value or attribute token in a request
///
/// Strings are char data in the value position and attribute names in the
/// attribute list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSpec {
    Text(String),
    Scalar(Option<f64>),
    Row(Vec<Option<f64>>),
    Array(ArraySpec),
}

impl ValueSpec {
    pub fn to_value(&self) -> Result<Value> {
        match self {
            Self::Text(text) => Ok(Value::text(text)),
            Self::Scalar(x) => Ok(Value::scalar(x.unwrap_or(f64::NAN))),
            Self::Row(values) => Ok(Value::row(&nan_if_null(values))),
            Self::Array(spec) => spec.to_value(),
        }
    }

    fn to_attribute(&self) -> Result<AttrArg> {
        match self {
            Self::Text(name) => Ok(AttrArg::Name(name.clone())),
            other => other.to_value().map(AttrArg::Value),
        }
    }
}

/// A complete validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationRequest {
    pub value: ValueSpec,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<ValueSpec>,
    #[serde(default)]
    pub context: Vec<ContextArg>,
}

impl ValidationRequest {
    /// Parse a request from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_input_arg(format!("Invalid request: {}", e)))
    }

    /// Parse a request from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| ValidationError::invalid_input_arg(format!("Invalid request: {}", e)))
    }

    /// The value under test
    pub fn value(&self) -> Result<Value> {
        self.value.to_value()
    }

    /// The attribute list
    pub fn attributes(&self) -> Result<Vec<AttrArg>> {
        self.attributes.iter().map(ValueSpec::to_attribute).collect()
    }

    /// Perform the validation the request describes
    pub fn run(&self, config: &ValidatorConfig) -> Result<()> {
        let value = self.value()?;
        let attributes = self.attributes()?;
        let context = ErrorContext::from_args(&self.context)?;
        let classes: Vec<&str> = self.classes.iter().map(String::as_str).collect();

        debug!(value = %value, "Running validation request");
        AttributeValidator::new(config.clone()).validate(&value, &classes, &attributes, &context)
    }
}

/// Outcome of a request, as reported by the command-line tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn passed() -> Self {
        Self {
            valid: true,
            identifier: None,
            message: None,
        }
    }

    #[must_use]
    pub fn failed(error: &ValidationError, config: &ValidatorConfig) -> Self {
        Self {
            valid: false,
            identifier: Some(error.qualified_identifier(config.identifier_namespace.as_deref())),
            message: Some(error.to_string()),
        }
    }
}
