//! Shape validation utilities
//!
//! Provides the dimension predicates used by the shape attributes and the
//! size matching used by `size`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected extent of one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DimConstraint {
    /// Any extent matches
    Any,
    Exactly(usize),
    /// Negative, fractional or infinite entry that no extent can equal
    Unmatchable(f64),
}

impl DimConstraint {
    /// Convert a numeric size entry, with NaN meaning "any extent"
    #[must_use]
    pub fn from_f64(x: f64) -> Self {
        if x.is_nan() {
            Self::Any
        } else if x < 0.0 || x.fract() != 0.0 || !x.is_finite() {
            Self::Unmatchable(x)
        } else {
            Self::Exactly(x as usize)
        }
    }

    #[must_use]
    pub fn matches(self, extent: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => expected == extent,
            Self::Unmatchable(_) => false,
        }
    }
}

impl fmt::Display for DimConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("N"),
            Self::Exactly(n) => write!(f, "{}", n),
            Self::Unmatchable(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "Inf" } else { "-Inf" })
            },
            Self::Unmatchable(x) => write!(f, "{}", x),
        }
    }
}

/// Render dimensions as `5x3x6`
#[must_use]
pub fn format_dims(dims: &[usize]) -> String {
    dims.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

/// Render expected dimensions as `5xNx6`
#[must_use]
pub fn format_constraints(expected: &[DimConstraint]) -> String {
    expected
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

/// Validator for dimension predicates
pub struct ShapeValidator;

impl ShapeValidator {
    /// Exactly two dimensions
    pub fn is_2d(dims: &[usize]) -> bool {
        dims.len() == 2
    }

    /// No more than three dimensions
    pub fn is_3d(dims: &[usize]) -> bool {
        dims.len() <= 3
    }

    pub fn is_row(dims: &[usize]) -> bool {
        matches!(dims, [1, _])
    }

    pub fn is_column(dims: &[usize]) -> bool {
        matches!(dims, [_, 1])
    }

    pub fn is_vector(dims: &[usize]) -> bool {
        matches!(dims, [1, _] | [_, 1])
    }

    pub fn is_square(dims: &[usize]) -> bool {
        matches!(dims, [rows, cols] if rows == cols)
    }

    /// Number of rows, if the value has a first dimension
    pub fn rows(dims: &[usize]) -> Option<usize> {
        dims.first().copied()
    }

    /// Number of columns, if the value has a second dimension
    pub fn cols(dims: &[usize]) -> Option<usize> {
        dims.get(1).copied()
    }

    /// Match actual dimensions against expected ones
    ///
    /// The expected list must cover every actual dimension. Expected entries
    /// past the last actual dimension only match when unconstrained.
    pub fn matches_size(actual: &[usize], expected: &[DimConstraint]) -> bool {
        if expected.len() < actual.len() {
            return false;
        }

        expected.iter().enumerate().all(|(i, constraint)| match constraint {
            DimConstraint::Any => true,
            DimConstraint::Exactly(_) | DimConstraint::Unmatchable(_) => actual
                .get(i)
                .is_some_and(|&extent| constraint.matches(extent)),
        })
    }
}
