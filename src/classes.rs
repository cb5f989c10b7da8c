//! Class membership check
//!
//! A value passes when it matches any requested class, either by its own
//! class name, through one of the `float`, `integer` and `numeric`
//! categories, or as an instance of a superclass.

use crate::context::ErrorContext;
use crate::error::{Result, ValidationError};
use crate::types::{ElementClass, Value};
use std::collections::BTreeSet;

/// Whether `value` belongs to the class or category `name`
#[must_use]
pub fn class_matches(value: &Value, name: &str) -> bool {
    value.class_name() == name
        || (name == "float" && value.is_float())
        || (name == "integer" && value.is_integer())
        || (name == "numeric" && value.is_numeric())
        || value.class().is_instance_of(name)
}

/// Expand categories into concrete class names, sorted and de-duplicated
#[must_use]
pub fn expand_classes<'a>(classes: &[&'a str]) -> BTreeSet<&'a str> {
    let mut expanded = BTreeSet::new();
    for &class in classes {
        match class {
            "integer" => expanded.extend(ElementClass::INTEGER.iter().map(|c| c.name())),
            "float" => expanded.extend(ElementClass::FLOAT.iter().map(|c| c.name())),
            "numeric" => {
                expanded.extend(ElementClass::INTEGER.iter().map(|c| c.name()));
                expanded.extend(ElementClass::FLOAT.iter().map(|c| c.name()));
            },
            other => {
                expanded.insert(other);
            },
        }
    }
    expanded
}

/// Check `value` against the accepted classes; an empty list accepts anything
pub fn check_class(value: &Value, classes: &[&str], context: &ErrorContext) -> Result<()> {
    if classes.is_empty() || classes.iter().any(|name| class_matches(value, name)) {
        return Ok(());
    }

    let accepted = expand_classes(classes)
        .into_iter()
        .collect::<Vec<_>>()
        .join(" ");
    Err(ValidationError::ClassMismatch(format!(
        "{} must be of class:\n\n  {}\n\nbut was of class {}",
        context,
        accepted,
        value.class_name()
    )))
}
