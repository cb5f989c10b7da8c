//! Attribute tokens and the rule table
//!
//! Every attribute name maps to one [`Rule`] in a static table. A rule either
//! tests the value on its own or consumes the token that follows it as an
//! auxiliary value (`size`, `numel`, `ncols`, `nrows`, `ndims` and the four
//! comparison operators).

use crate::config::ValidatorConfig;
use crate::context::ErrorContext;
use crate::error::{Result, ValidationError};
use crate::types::Value;
use crate::utils::validation::numeric::{Comparison, NumericValidator};
use crate::utils::validation::shape::{
    format_constraints, format_dims, DimConstraint, ShapeValidator,
};
use tracing::trace;

/// One entry of an attribute list: a name, or an auxiliary value
#[derive(Debug, Clone, PartialEq)]
pub enum AttrArg {
    Name(String),
    Value(Value),
}

impl AttrArg {
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Value(_) => None,
        }
    }
}

impl From<&str> for AttrArg {
    fn from(s: &str) -> Self {
        Self::Name(s.to_string())
    }
}

impl From<String> for AttrArg {
    fn from(s: String) -> Self {
        Self::Name(s)
    }
}

impl From<Value> for AttrArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<f64> for AttrArg {
    fn from(x: f64) -> Self {
        Self::Value(Value::scalar(x))
    }
}

impl From<i32> for AttrArg {
    fn from(n: i32) -> Self {
        Self::Value(Value::scalar(f64::from(n)))
    }
}

impl From<usize> for AttrArg {
    fn from(n: usize) -> Self {
        Self::Value(Value::scalar(n as f64))
    }
}

impl From<&[f64]> for AttrArg {
    fn from(values: &[f64]) -> Self {
        Self::Value(Value::row(values))
    }
}

impl From<Vec<f64>> for AttrArg {
    fn from(values: Vec<f64>) -> Self {
        Self::Value(Value::row(&values))
    }
}

impl<const N: usize> From<[f64; N]> for AttrArg {
    fn from(values: [f64; N]) -> Self {
        Self::Value(Value::row(&values))
    }
}

/// Build an attribute list from names and auxiliary values
///
/// ```
/// use validate_attributes::attrs;
///
/// let list = attrs!["binary", "size", [f64::NAN, 4.0], ">=", 0];
/// assert_eq!(list.len(), 5);
/// ```
#[macro_export]
macro_rules! attrs {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::AttrArg::from($arg)),*]
    };
}

/// Dimension count checked by a sizing attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Measure {
    Numel,
    Columns,
    Rows,
    Dimensions,
}

impl Measure {
    fn actual(self, value: &Value) -> Option<usize> {
        match self {
            Self::Numel => Some(value.numel()),
            Self::Columns => ShapeValidator::cols(value.dims()),
            Self::Rows => ShapeValidator::rows(value.dims()),
            Self::Dimensions => Some(value.ndims()),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Numel => "elements",
            Self::Columns => "columns",
            Self::Rows => "rows",
            Self::Dimensions => "dimensions",
        }
    }
}

/// What a rule does when it is applied
#[derive(Clone, Copy)]
enum Check {
    Predicate(fn(&Value) -> Result<bool>),
    Size,
    Count(Measure),
    Bound(Comparison),
}

/// A named validation rule
pub struct Rule {
    name: &'static str,
    id: &'static str,
    check: Check,
}

const fn predicate(name: &'static str, id: &'static str, f: fn(&Value) -> Result<bool>) -> Rule {
    Rule {
        name,
        id,
        check: Check::Predicate(f),
    }
}

static RULES: [Rule; 33] = [
    predicate("2d", "expected-2d", is_2d),
    predicate("3d", "expected-3d", is_3d),
    predicate("column", "expected-column", is_column),
    predicate("row", "expected-row", is_row),
    predicate("real", "expected-real", is_real),
    predicate("scalar", "expected-scalar", is_scalar),
    predicate("square", "expected-square", is_square),
    Rule {
        name: "size",
        id: "incorrect-size",
        check: Check::Size,
    },
    predicate("vector", "expected-vector", is_vector),
    predicate("diag", "expected-diag", NumericValidator::is_diagonal),
    predicate("decreasing", "expected-decreasing", is_decreasing),
    predicate("nonempty", "expected-nonempty", is_nonempty),
    predicate("nonsparse", "expected-nonsparse", is_nonsparse),
    predicate("nonnan", "expected-nonnan", is_nonnan),
    predicate("nonnegative", "expected-nonnegative", is_nonnegative),
    predicate("nonzero", "expected-nonzero", is_nonzero),
    predicate("nondecreasing", "expected-nondecreasing", is_nondecreasing),
    predicate("nonincreasing", "expected-nonincreasing", is_nonincreasing),
    Rule {
        name: "numel",
        id: "incorrect-numel",
        check: Check::Count(Measure::Numel),
    },
    Rule {
        name: "ncols",
        id: "incorrect-numcols",
        check: Check::Count(Measure::Columns),
    },
    Rule {
        name: "nrows",
        id: "incorrect-numrows",
        check: Check::Count(Measure::Rows),
    },
    Rule {
        name: "ndims",
        id: "incorrect-numdims",
        check: Check::Count(Measure::Dimensions),
    },
    predicate("binary", "expected-binary", is_binary),
    predicate("even", "expected-even", NumericValidator::all_even),
    predicate("odd", "expected-odd", NumericValidator::all_odd),
    predicate("integer", "expected-integer", is_integer),
    predicate("increasing", "expected-increasing", is_increasing),
    predicate("finite", "expected-finite", is_finite),
    predicate("positive", "expected-positive", is_positive),
    Rule {
        name: ">",
        id: "expected-greater",
        check: Check::Bound(Comparison::Greater),
    },
    Rule {
        name: ">=",
        id: "expected-greater-equal",
        check: Check::Bound(Comparison::GreaterEqual),
    },
    Rule {
        name: "<",
        id: "expected-less",
        check: Check::Bound(Comparison::Less),
    },
    Rule {
        name: "<=",
        id: "expected-less-equal",
        check: Check::Bound(Comparison::LessEqual),
    },
];

impl Rule {
    /// Find the rule for an attribute name, ignoring ASCII case
    #[must_use]
    pub fn lookup(token: &str) -> Option<&'static Rule> {
        RULES.iter().find(|rule| rule.name.eq_ignore_ascii_case(token))
    }

    /// Every rule, in table order
    pub fn all() -> impl Iterator<Item = &'static Rule> {
        RULES.iter()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Identifier reported when the check fails
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Number of auxiliary values the rule consumes
    #[must_use]
    pub fn arity(&self) -> usize {
        match self.check {
            Check::Predicate(_) => 0,
            Check::Size | Check::Count(_) | Check::Bound(_) => 1,
        }
    }

    /// Apply the rule to `value`
    ///
    /// `aux` must be present exactly when [`Rule::arity`] is one.
    pub(crate) fn apply(
        &self,
        value: &Value,
        aux: Option<&AttrArg>,
        context: &ErrorContext,
        config: &ValidatorConfig,
    ) -> Result<()> {
        trace!(attribute = self.name, "Checking attribute");

        match self.check {
            Check::Predicate(check) => {
                if check(value)? {
                    Ok(())
                } else {
                    Err(ValidationError::check_failed(
                        self.id,
                        format!("{} must be {}", context, self.name),
                    ))
                }
            },
            Check::Size => {
                let expected = self.aux_value(aux)?;
                let constraints = size_constraints(expected)?;
                if ShapeValidator::matches_size(value.dims(), &constraints) {
                    Ok(())
                } else {
                    Err(ValidationError::check_failed(
                        self.id,
                        format!(
                            "{} must be of size {} but was {}",
                            context,
                            format_constraints(&constraints),
                            format_dims(value.dims())
                        ),
                    ))
                }
            },
            Check::Count(measure) => {
                let expected = self.aux_count(aux)?;
                if measure.actual(value) == Some(expected) {
                    Ok(())
                } else {
                    Err(ValidationError::check_failed(
                        self.id,
                        format!("{} must have {} {}", context, expected, measure.noun()),
                    ))
                }
            },
            Check::Bound(op) => {
                let bound = self.aux_value(aux)?;
                if NumericValidator::all_compare(value, op, bound)? {
                    Ok(())
                } else {
                    Err(ValidationError::check_failed(
                        self.id,
                        format!(
                            "{} must be {} {}",
                            context,
                            op.describe(),
                            format_bound(bound, config.comparison_precision)
                        ),
                    ))
                }
            },
        }
    }

    fn aux_value<'a>(&self, aux: Option<&'a AttrArg>) -> Result<&'a Value> {
        match aux {
            Some(AttrArg::Value(value)) if !value.is_object() => Ok(value),
            Some(_) => Err(ValidationError::invalid_type(format!(
                "validateattributes: value for '{}' must be numeric",
                self.name
            ))),
            None => Err(ValidationError::MissingAttributeValue(self.name.to_string())),
        }
    }

    fn aux_count(&self, aux: Option<&AttrArg>) -> Result<usize> {
        let value = self.aux_value(aux)?;
        let re = value.linear_re();
        match re.as_slice() {
            [n] if value.is_real() && *n >= 0.0 && n.fract() == 0.0 && n.is_finite() => {
                Ok(*n as usize)
            },
            _ => Err(ValidationError::invalid_input_arg(format!(
                "validateattributes: value for '{}' must be a non-negative integer",
                self.name
            ))),
        }
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("arity", &self.arity())
            .finish()
    }
}

fn size_constraints(expected: &Value) -> Result<Vec<DimConstraint>> {
    if !expected.is_real() {
        return Err(ValidationError::invalid_input_arg(
            "validateattributes: size must be real",
        ));
    }
    Ok(expected
        .linear_re()
        .into_iter()
        .map(DimConstraint::from_f64)
        .collect())
}

/// Render a comparison bound with a fixed number of decimals
///
/// Array bounds are broadcast against the value, so their entries are listed
/// in column-major order followed by the bound's dimensions.
fn format_bound(bound: &Value, precision: usize) -> String {
    let entries = bound
        .linear_re()
        .iter()
        .map(|x| format!("{:.*}", precision, x))
        .collect::<Vec<_>>();
    match entries.as_slice() {
        [single] => single.clone(),
        _ => format!("[{}] ({})", entries.join(" "), format_dims(bound.dims())),
    }
}

fn is_2d(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_2d(value.dims()))
}

fn is_3d(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_3d(value.dims()))
}

fn is_column(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_column(value.dims()))
}

fn is_row(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_row(value.dims()))
}

fn is_real(value: &Value) -> Result<bool> {
    Ok(value.is_real())
}

fn is_scalar(value: &Value) -> Result<bool> {
    Ok(value.numel() == 1)
}

fn is_square(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_square(value.dims()))
}

fn is_vector(value: &Value) -> Result<bool> {
    Ok(ShapeValidator::is_vector(value.dims()))
}

fn is_nonempty(value: &Value) -> Result<bool> {
    Ok(!value.is_empty())
}

fn is_nonsparse(value: &Value) -> Result<bool> {
    Ok(!value.is_sparse())
}

// Integer classes cannot hold NaN, Inf or fractions; logical cannot hold
// anything but 0 and 1. Those classes pass the matching checks untested.

fn is_nonnan(value: &Value) -> Result<bool> {
    Ok(value.is_integer() || !NumericValidator::any_nan(value)?)
}

fn is_finite(value: &Value) -> Result<bool> {
    Ok(value.is_integer() || NumericValidator::all_finite(value)?)
}

fn is_integer(value: &Value) -> Result<bool> {
    Ok(value.is_integer() || NumericValidator::all_integral(value)?)
}

fn is_binary(value: &Value) -> Result<bool> {
    Ok(value.is_logical() || NumericValidator::all_binary(value)?)
}

fn is_nonnegative(value: &Value) -> Result<bool> {
    Ok(!NumericValidator::any_compare_scalar(value, Comparison::Less, 0.0)?)
}

fn is_positive(value: &Value) -> Result<bool> {
    Ok(!NumericValidator::any_compare_scalar(value, Comparison::LessEqual, 0.0)?)
}

fn is_nonzero(value: &Value) -> Result<bool> {
    Ok(!NumericValidator::any_zero(value)?)
}

fn is_increasing(value: &Value) -> Result<bool> {
    NumericValidator::is_monotone(value, Comparison::Greater)
}

fn is_decreasing(value: &Value) -> Result<bool> {
    NumericValidator::is_monotone(value, Comparison::Less)
}

fn is_nondecreasing(value: &Value) -> Result<bool> {
    NumericValidator::is_monotone(value, Comparison::GreaterEqual)
}

fn is_nonincreasing(value: &Value) -> Result<bool> {
    NumericValidator::is_monotone(value, Comparison::LessEqual)
}
