//! Configuration types for attribute validation

use crate::error::{Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest number of decimals that still changes how an `f64` prints
const MAX_COMPARISON_PRECISION: usize = 17;

/// Validator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Namespace prepended to error identifiers (e.g. `Octave` gives `Octave:expected-2d`)
    pub identifier_namespace: Option<String>,

    /// Decimals used when printing comparison bounds in failure messages
    pub comparison_precision: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            identifier_namespace: None,
            comparison_precision: 6,
        }
    }
}

impl ValidatorConfig {
    /// Create a configuration builder
    #[must_use]
    pub fn builder() -> ValidatorConfigBuilder {
        ValidatorConfigBuilder::default()
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::invalid_input_arg(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            ValidationError::invalid_input_arg(format!("Invalid configuration: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    ///
    /// # Validation Rules
    ///
    /// - Comparison precision: 0-17 (inclusive)
    /// - Identifier namespace: no `:` (it separates namespace and identifier)
    pub fn validate(&self) -> Result<()> {
        if self.comparison_precision > MAX_COMPARISON_PRECISION {
            return Err(ValidationError::invalid_input_arg(format!(
                "Invalid comparison precision: {} (valid range: 0-{})",
                self.comparison_precision, MAX_COMPARISON_PRECISION
            )));
        }

        if let Some(namespace) = &self.identifier_namespace {
            if namespace.contains(':') {
                return Err(ValidationError::invalid_input_arg(format!(
                    "Invalid identifier namespace '{}': must not contain ':'",
                    namespace
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`ValidatorConfig`]
#[derive(Debug, Default)]
pub struct ValidatorConfigBuilder {
    config: ValidatorConfig,
}

impl ValidatorConfigBuilder {
    /// Set identifier namespace
    #[must_use]
    pub fn identifier_namespace<S: Into<String>>(mut self, namespace: S) -> Self {
        self.config.identifier_namespace = Some(namespace.into());
        self
    }

    /// Set comparison precision (clamped to the maximum useful precision)
    #[must_use]
    pub fn comparison_precision(mut self, precision: usize) -> Self {
        self.config.comparison_precision = precision.min(MAX_COMPARISON_PRECISION);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ValidatorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
