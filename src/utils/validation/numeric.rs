//! Numeric validation utilities
//!
//! Elementwise predicates over the data of a value. Comparisons follow the
//! environment's rules: real data compares directly, while complex data is
//! ordered by magnitude and then by phase angle. NaN never compares true.

use crate::error::{Result, ValidationError};
use crate::types::{ElementClass, Value};
use ndarray::{Array2, ShapeBuilder, Zip};
use std::cmp::Ordering;

/// Ordering comparison used by the bound and monotonicity attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Comparison {
    /// Operator as written in an attribute list
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Phrase used in failure messages
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Less => "less than",
            Self::LessEqual => "less than or equal to",
            Self::Greater => "greater than",
            Self::GreaterEqual => "greater than or equal to",
        }
    }

    fn holds(self, a: (f64, f64), b: (f64, f64), complex: bool) -> bool {
        let Some(ordering) = compare(a, b, complex) else {
            return false;
        };
        match self {
            Self::Less => ordering == Ordering::Less,
            Self::LessEqual => ordering != Ordering::Greater,
            Self::Greater => ordering == Ordering::Greater,
            Self::GreaterEqual => ordering != Ordering::Less,
        }
    }
}

fn compare(a: (f64, f64), b: (f64, f64), complex: bool) -> Option<Ordering> {
    if !complex {
        return a.0.partial_cmp(&b.0);
    }
    if [a.0, a.1, b.0, b.1].iter().any(|x| x.is_nan()) {
        return None;
    }
    match a.0.hypot(a.1).partial_cmp(&b.0.hypot(b.1))? {
        Ordering::Equal => a.1.atan2(a.0).partial_cmp(&b.1.atan2(b.0)),
        ordering => Some(ordering),
    }
}

/// Column-major element data of a value
struct Elements {
    re: Vec<f64>,
    im: Option<Vec<f64>>,
}

impl Elements {
    fn of(value: &Value, operation: &str) -> Result<Self> {
        if value.is_object() {
            return Err(ValidationError::undefined_operation(
                operation,
                value.class_name(),
            ));
        }
        Ok(Self {
            re: value.linear_re(),
            im: value.linear_im(),
        })
    }

    fn len(&self) -> usize {
        self.re.len()
    }

    fn is_complex(&self) -> bool {
        self.im.is_some()
    }

    fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let im = self.im.as_deref();
        self.re.iter().enumerate().map(move |(k, &re)| {
            let im = im.and_then(|im| im.get(k).copied()).unwrap_or(0.0);
            (re, im)
        })
    }
}

/// Validator for elementwise numeric predicates
pub struct NumericValidator;

impl NumericValidator {
    /// Whether any element has a NaN part
    pub fn any_nan(value: &Value) -> Result<bool> {
        let elements = Elements::of(value, "isnan")?;
        let found = elements.iter().any(|(re, im)| re.is_nan() || im.is_nan());
        Ok(found)
    }

    /// Whether every element is finite in both parts
    pub fn all_finite(value: &Value) -> Result<bool> {
        let elements = Elements::of(value, "isfinite")?;
        let finite = elements.iter().all(|(re, im)| re.is_finite() && im.is_finite());
        Ok(finite)
    }

    /// Whether every element has no fractional part
    pub fn all_integral(value: &Value) -> Result<bool> {
        let elements = Elements::of(value, "ceil")?;
        let integral = elements
            .iter()
            .all(|(re, im)| re.ceil() == re && im.ceil() == im);
        Ok(integral)
    }

    /// Whether every element is exactly 0 or 1
    pub fn all_binary(value: &Value) -> Result<bool> {
        let elements = Elements::of(value, "!=")?;
        let binary = elements
            .iter()
            .all(|(re, im)| im == 0.0 && (re == 0.0 || re == 1.0));
        Ok(binary)
    }

    /// Whether any element equals zero
    pub fn any_zero(value: &Value) -> Result<bool> {
        let elements = Elements::of(value, "==")?;
        let found = elements.iter().any(|(re, im)| re == 0.0 && im == 0.0);
        Ok(found)
    }

    /// Whether `rem(x, 2) == 0` for every element
    pub fn all_even(value: &Value) -> Result<bool> {
        let elements = Self::real_elements(value, "rem")?;
        let even = elements.iter().all(|(re, _)| re % 2.0 == 0.0);
        Ok(even)
    }

    /// Whether `mod(x, 2) == 1` for every element
    ///
    /// `mod` takes the sign of the divisor, so negative odd numbers pass.
    pub fn all_odd(value: &Value) -> Result<bool> {
        let elements = Self::real_elements(value, "mod")?;
        let odd = elements.iter().all(|(re, _)| re.rem_euclid(2.0) == 1.0);
        Ok(odd)
    }

    fn real_elements(value: &Value, operation: &str) -> Result<Elements> {
        if !value.is_real() {
            return Err(ValidationError::undefined_operation(
                operation,
                "complex",
            ));
        }
        Elements::of(value, operation)
    }

    /// Whether any element satisfies `x <op> bound`
    pub fn any_compare_scalar(value: &Value, op: Comparison, bound: f64) -> Result<bool> {
        let elements = Elements::of(value, op.symbol())?;
        let complex = elements.is_complex();
        let found = elements
            .iter()
            .any(|x| op.holds(x, (bound, 0.0), complex));
        Ok(found)
    }

    /// Whether every element satisfies `x <op> bound`
    ///
    /// The value is taken as an `n x 1` column of its elements and the bound
    /// keeps its own shape, folded to two dimensions. Singleton dimensions
    /// broadcast, so a scalar applies to every element, an `n x 1` bound
    /// compares elementwise and a `1 x m` bound compares every element
    /// against every entry.
    pub fn all_compare(value: &Value, op: Comparison, bound: &Value) -> Result<bool> {
        let elements = Elements::of(value, op.symbol())?;
        let bounds = Elements::of(bound, op.symbol())?;
        let complex = elements.is_complex() || bounds.is_complex();

        if bounds.iter().any(|(re, im)| re.is_nan() || im.is_nan()) {
            log::warn!(
                "Comparison bound for '{}' contains NaN; the check can only pass for empty values",
                op.symbol()
            );
        }

        let n = elements.len();
        let (bound_rows, bound_cols) = match bound.dims() {
            [rows, rest @ ..] => (*rows, rest.iter().product::<usize>()),
            [] => (1, 1),
        };
        let nonconformant =
            || ValidationError::nonconformant(op.symbol(), &[n, 1], bound.dims());

        let rows = if n == bound_rows || bound_rows == 1 {
            n
        } else if n == 1 {
            bound_rows
        } else {
            return Err(nonconformant());
        };

        let column: Array2<(f64, f64)> = Array2::from_shape_vec((n, 1), elements.iter().collect())
            .map_err(|_| nonconformant())?;
        let limits: Array2<(f64, f64)> =
            Array2::from_shape_vec((bound_rows, bound_cols).f(), bounds.iter().collect())
                .map_err(|_| nonconformant())?;

        let shape = (rows, bound_cols);
        let (Some(column), Some(limits)) = (column.broadcast(shape), limits.broadcast(shape)) else {
            return Err(nonconformant());
        };
        let all = Zip::from(column)
            .and(limits)
            .all(|&x, &limit| op.holds(x, limit, complex));
        Ok(all)
    }

    /// Whether successive differences all satisfy `diff <op> 0` with no NaN present
    ///
    /// Differences of integer and single values are taken in their own class,
    /// so integer steps saturate: `uint8` data can never be decreasing.
    pub fn is_monotone(value: &Value, op: Comparison) -> Result<bool> {
        let elements = Elements::of(value, "diff")?;
        if elements.iter().any(|(re, im)| re.is_nan() || im.is_nan()) {
            return Ok(false);
        }

        let step_class = value
            .element_class()
            .filter(|class| class.is_integer() || *class == ElementClass::Single);
        let in_class = |x: f64| match step_class {
            Some(class) => class.convert(x),
            None => Ok(x),
        };

        let complex = elements.is_complex();
        let points: Vec<(f64, f64)> = elements.iter().collect();
        for pair in points.windows(2) {
            let [prev, next] = pair else { continue };
            let step = (in_class(next.0 - prev.0)?, in_class(next.1 - prev.1)?);
            if !op.holds(step, (0.0, 0.0), complex) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether every nonzero element lies on the main diagonal
    ///
    /// Values stored as diagonal matrices pass without inspection. Otherwise
    /// only two-dimensional numeric or logical values can pass.
    pub fn is_diagonal(value: &Value) -> Result<bool> {
        if value.is_diagonal_matrix() {
            return Ok(true);
        }
        if !(value.is_numeric() || value.is_logical()) || value.ndims() != 2 {
            return Ok(false);
        }

        let rows = value.dims().first().copied().unwrap_or(0);
        if rows == 0 {
            return Ok(true);
        }

        let elements = Elements::of(value, "find")?;
        let diagonal = elements
            .iter()
            .enumerate()
            .filter(|(_, (re, im))| *re != 0.0 || *im != 0.0)
            .all(|(k, _)| k % rows == k / rows);
        Ok(diagonal)
    }
}
