//! Low-level checks over dimensions and element data

pub mod numeric;
pub mod shape;

pub use numeric::{Comparison, NumericValidator};
pub use shape::{format_dims, DimConstraint, ShapeValidator};
