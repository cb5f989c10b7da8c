//! Error context: the subject phrase prefixed to every failure message

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One optional trailing parameter of a validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContextArg {
    Text(String),
    Number(f64),
}

impl From<&str> for ContextArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ContextArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for ContextArg {
    fn from(x: f64) -> Self {
        Self::Number(x)
    }
}

impl From<usize> for ContextArg {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for ContextArg {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Positive integral index, as accepted for ARG_IDX
fn as_arg_index(arg: &ContextArg) -> Option<usize> {
    match arg {
        ContextArg::Number(x) if *x > 0.0 && x.fract() == 0.0 && x.is_finite() => Some(*x as usize),
        _ => None,
    }
}

/// Context prefix such as `solve: A (argument #1)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    prefix: String,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            prefix: "input".to_string(),
        }
    }
}

impl ErrorContext {
    /// The default `input` context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context builder
    #[must_use]
    pub fn builder() -> ErrorContextBuilder {
        ErrorContextBuilder::default()
    }

    /// Build the context from the trailing call parameters
    ///
    /// Accepts up to three parameters: a function name (or, when it is the
    /// only parameter, a 1-based argument index), an argument name, and an
    /// argument index.
    pub fn from_args(args: &[ContextArg]) -> Result<Self> {
        if args.len() > 3 {
            return Err(ValidationError::invalid_input_arg(format!(
                "validateattributes: expected at most 3 context arguments, got {}",
                args.len()
            )));
        }

        let mut builder = Self::builder();
        let Some(first) = args.first() else {
            return builder.build();
        };

        match first {
            ContextArg::Text(func_name) => builder = builder.func_name(func_name.as_str()),
            number if args.len() == 1 => match as_arg_index(number) {
                Some(index) => return builder.input_index(index).build(),
                None => return Err(first_arg_error()),
            },
            ContextArg::Number(_) => return Err(first_arg_error()),
        }

        if let Some(arg_name) = args.get(1) {
            match arg_name {
                ContextArg::Text(name) => builder = builder.arg_name(name.as_str()),
                ContextArg::Number(_) => {
                    return Err(ValidationError::invalid_type(
                        "validateattributes: VAR_NAME must be a string",
                    ));
                },
            }
        }

        if let Some(arg_index) = args.get(2) {
            let index = as_arg_index(arg_index).ok_or_else(|| {
                ValidationError::invalid_input_arg(
                    "validateattributes: ARG_IDX must be a positive integer",
                )
            })?;
            builder = builder.arg_index(index);
        }

        builder.build()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}

fn first_arg_error() -> ValidationError {
    ValidationError::invalid_input_arg(
        "validateattributes: first context argument must be ARG_IDX or FUNC_NAME",
    )
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Builder for [`ErrorContext`]
#[derive(Debug, Default, Clone)]
pub struct ErrorContextBuilder {
    func_name: Option<String>,
    arg_name: Option<String>,
    input_index: Option<usize>,
    arg_index: Option<usize>,
}

impl ErrorContextBuilder {
    /// Function name, rendered as a `name: ` prefix
    #[must_use]
    pub fn func_name<S: Into<String>>(mut self, name: S) -> Self {
        self.func_name = Some(name.into());
        self
    }

    /// Argument name, replacing the default `input`
    #[must_use]
    pub fn arg_name<S: Into<String>>(mut self, name: S) -> Self {
        self.arg_name = Some(name.into());
        self
    }

    /// Position of an unnamed input, rendered as `input N`
    #[must_use]
    pub fn input_index(mut self, index: usize) -> Self {
        self.input_index = Some(index);
        self
    }

    /// Argument position, rendered as ` (argument #N)`
    #[must_use]
    pub fn arg_index(mut self, index: usize) -> Self {
        self.arg_index = Some(index);
        self
    }

    /// Build the context
    pub fn build(self) -> Result<ErrorContext> {
        if self.input_index == Some(0) || self.arg_index == Some(0) {
            return Err(ValidationError::invalid_input_arg(
                "validateattributes: ARG_IDX must be a positive integer",
            ));
        }

        let mut prefix = String::new();
        if let Some(func_name) = &self.func_name {
            prefix.push_str(func_name);
            prefix.push_str(": ");
        }

        match (&self.arg_name, self.input_index) {
            (Some(name), _) => prefix.push_str(name),
            (None, Some(index)) => prefix.push_str(&format!("input {}", index)),
            (None, None) => prefix.push_str("input"),
        }

        if let Some(index) = self.arg_index {
            prefix.push_str(&format!(" (argument #{})", index));
        }

        Ok(ErrorContext { prefix })
    }
}
