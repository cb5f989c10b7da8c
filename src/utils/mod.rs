//! Shared validation helpers

pub mod validation;

pub use validation::{format_dims, Comparison, DimConstraint, NumericValidator, ShapeValidator};
