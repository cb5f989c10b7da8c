#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::uninlined_format_args)]

//! # validate-attributes
//!
//! Argument validation for N-dimensional numeric values, modelled on the
//! `validateattributes` function of numerical computing environments.
//!
//! A call checks a [`Value`] against a list of accepted classes and a list of
//! attributes such as `"square"`, `"nonnegative"` or `"size", [3, NaN]`. The
//! first failing check produces a [`ValidationError`] carrying a
//! machine-readable identifier and a message prefixed with the error context.
//!
//! ## Features
//!
//! - **Class checks**: exact class names, the `float`, `integer` and `numeric`
//!   categories, and superclasses of user-defined object classes
//! - **Attributes**: shape, size, element-count, element-value, monotonicity
//!   and comparison checks, matched case-insensitively
//! - **Host value model**: builtin element classes, complex data, sparse and
//!   diagonal storage, built from any `ndarray` array
//! - **JSON requests**: describe a validation call as JSON and run it
//! - **CLI Integration**: optional command-line interface (enable with `cli` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use validate_attributes::{attrs, validate_attributes, Value};
//! use ndarray::array;
//!
//! let value = Value::from_array(&array![[1.0, 0.0], [0.0, 2.0]]);
//!
//! validate_attributes(&value, &["numeric"], &attrs!["square", "nonnegative", "diag"], &[])?;
//!
//! let err = validate_attributes(
//!     &value,
//!     &["double"],
//!     &attrs!["size", [3.0, f64::NAN]],
//!     &["solve".into(), "A".into(), 1.into()],
//! )
//! .unwrap_err();
//! assert_eq!(err.identifier(), "incorrect-size");
//! assert_eq!(err.to_string(), "solve: A (argument #1) must be of size 3xN but was 2x2");
//! # Ok::<(), validate_attributes::ValidationError>(())
//! ```
//!
//! ## Configuration
//!
//! [`AttributeValidator`] takes a [`ValidatorConfig`] that can namespace
//! identifiers (`Octave:expected-square`) and set the precision used to print
//! comparison bounds.
//!
//! ### Feature Flags
//!
//! - `cli` (default): command-line interface and tracing subscriber setup
//! - `tracing-json`: JSON log output for the CLI
//! - `tracing-files`: log file output for the CLI
//!
//! ### Library-Only Usage
//!
//! ```toml
//! [dependencies]
//! validate-attributes = { version = "0.1", default-features = false }
//! ```

pub mod attributes;
pub mod classes;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod request;
#[cfg(feature = "cli")]
pub mod tracing_config;
pub mod types;
pub mod utils;
pub mod validator;

// Public API exports
pub use attributes::{AttrArg, Rule};
pub use classes::{check_class, class_matches, expand_classes};
pub use config::{ValidatorConfig, ValidatorConfigBuilder};
pub use context::{ContextArg, ErrorContext, ErrorContextBuilder};
pub use error::{Result, ValidationError};
pub use request::{ArraySpec, ValidationReport, ValidationRequest, ValueSpec};
pub use types::{normalize_dims, Element, ElementClass, Storage, Value, ValueClass};
pub use utils::{Comparison, DimConstraint, NumericValidator, ShapeValidator};
pub use validator::{validate_attributes, AttributeValidator};

#[cfg(feature = "cli")]
pub use tracing_config::{events, spans, TracingConfig, TracingFormat, TracingGuard, TracingOutput};
