//! The attribute validator
//!
//! Checks class membership first, then walks the attribute list with a
//! cursor. Each name is looked up in the rule table; rules that take an
//! auxiliary value consume the following entry. The first failing check ends
//! validation.

use crate::attributes::{AttrArg, Rule};
use crate::classes::check_class;
use crate::config::ValidatorConfig;
use crate::context::{ContextArg, ErrorContext};
use crate::error::{Result, ValidationError};
use crate::types::Value;
use crate::utils::validation::shape::format_dims;
use tracing::{debug, debug_span, trace};

/// Validates values against classes and attribute lists
#[derive(Debug, Clone, Default)]
pub struct AttributeValidator {
    config: ValidatorConfig,
}

impl AttributeValidator {
    /// Create a validator with the given configuration
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `value` against `classes` and `attributes`
    ///
    /// An empty class list accepts any class. Attributes are checked left to
    /// right and validation stops at the first failure.
    pub fn validate(
        &self,
        value: &Value,
        classes: &[&str],
        attributes: &[AttrArg],
        context: &ErrorContext,
    ) -> Result<()> {
        let span = debug_span!(
            "validate",
            class = %value.class(),
            dims = %format_dims(value.dims()),
            attributes = attributes.len()
        );
        let _enter = span.enter();

        let outcome = check_class(value, classes, context)
            .and_then(|()| self.check_attributes(value, attributes, context));

        if let Err(err) = &outcome {
            debug!(
                identifier = %err.qualified_identifier(self.config.identifier_namespace.as_deref()),
                "Validation failed"
            );
        }
        outcome
    }

    fn check_attributes(
        &self,
        value: &Value,
        attributes: &[AttrArg],
        context: &ErrorContext,
    ) -> Result<()> {
        let mut cursor = 0;
        while let Some(token) = attributes.get(cursor) {
            let name = token.as_name().ok_or_else(|| {
                ValidationError::invalid_type(
                    "validateattributes: attribute names must be strings",
                )
            })?;
            let rule = Rule::lookup(name).ok_or_else(|| ValidationError::unknown_attribute(name))?;

            let aux = if rule.arity() == 1 {
                let aux = attributes.get(cursor + 1).ok_or_else(|| {
                    ValidationError::MissingAttributeValue(rule.name().to_string())
                })?;
                Some(aux)
            } else {
                None
            };

            trace!(attribute = rule.name(), position = cursor, "Checking attribute");
            rule.apply(value, aux, context, &self.config)?;
            cursor += 1 + rule.arity();
        }
        Ok(())
    }
}

/// Validate a value using the default configuration
///
/// `context` holds up to three trailing parameters: a function name (or a
/// 1-based argument index when it is the only one), an argument name, and an
/// argument index.
///
/// ```
/// use validate_attributes::{attrs, validate_attributes, Value};
///
/// let value = Value::row(&[4.0, 5.0, 6.0, 7.0]);
/// assert!(validate_attributes(&value, &["numeric"], &attrs![">=", 4], &[]).is_ok());
///
/// let err = validate_attributes(&value, &[], &attrs![">", 4], &["solve".into()]).unwrap_err();
/// assert_eq!(err.identifier(), "expected-greater");
/// assert_eq!(err.to_string(), "solve: input must be greater than 4.000000");
/// ```
pub fn validate_attributes(
    value: &Value,
    classes: &[&str],
    attributes: &[AttrArg],
    context: &[ContextArg],
) -> Result<()> {
    let context = ErrorContext::from_args(context)?;
    AttributeValidator::default().validate(value, classes, attributes, &context)
}
