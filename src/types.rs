//! Core types for attribute validation
//!
//! Models the values a numerical environment hands to the validator: an
//! N-dimensional array with a class, a storage layout and an optional
//! imaginary part. Dimensions follow the environment's conventions: there are
//! always at least two, and trailing singleton dimensions past the second are
//! dropped.

use crate::error::{Result, ValidationError};
use ndarray::{Array2, ArrayBase, ArrayD, Data, Dimension, IxDyn, ShapeBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Builtin element classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementClass {
    Double,
    Single,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Logical,
    Char,
}

impl ElementClass {
    /// The eight fixed-width integer classes
    pub const INTEGER: [Self; 8] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
    ];

    /// The floating point classes
    pub const FLOAT: [Self; 2] = [Self::Single, Self::Double];

    const ALL: [Self; 12] = [
        Self::Double,
        Self::Single,
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Uint64,
        Self::Logical,
        Self::Char,
    ];

    /// Class name as the environment reports it
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Double => "double",
            Self::Single => "single",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Logical => "logical",
            Self::Char => "char",
        }
    }

    #[must_use]
    pub fn is_float(self) -> bool {
        matches!(self, Self::Double | Self::Single)
    }

    #[must_use]
    pub fn is_integer(self) -> bool {
        Self::INTEGER.contains(&self)
    }

    /// Floating point or integer; logical and char are not numeric
    #[must_use]
    pub fn is_numeric(self) -> bool {
        self.is_float() || self.is_integer()
    }

    /// Representable range of an integer class
    fn integer_range(self) -> Option<(f64, f64)> {
        let range = match self {
            Self::Int8 => (f64::from(i8::MIN), f64::from(i8::MAX)),
            Self::Int16 => (f64::from(i16::MIN), f64::from(i16::MAX)),
            Self::Int32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
            Self::Int64 => (i64::MIN as f64, i64::MAX as f64),
            Self::Uint8 => (0.0, f64::from(u8::MAX)),
            Self::Uint16 => (0.0, f64::from(u16::MAX)),
            Self::Uint32 => (0.0, f64::from(u32::MAX)),
            Self::Uint64 => (0.0, u64::MAX as f64),
            _ => return None,
        };
        Some(range)
    }

    /// Convert a double into this class the way the environment does
    ///
    /// Integer classes round half away from zero and saturate, with NaN
    /// becoming zero. Logical rejects NaN and maps every nonzero to one.
    pub fn convert(self, x: f64) -> Result<f64> {
        if let Some((min, max)) = self.integer_range() {
            if x.is_nan() {
                return Ok(0.0);
            }
            return Ok(x.round().clamp(min, max));
        }
        match self {
            Self::Single => Ok(f64::from(x as f32)),
            Self::Logical => {
                if x.is_nan() {
                    Err(ValidationError::invalid_input_arg(
                        "logical: NaN can't be converted to logical value",
                    ))
                } else {
                    Ok(if x == 0.0 { 0.0 } else { 1.0 })
                }
            },
            _ => Ok(x),
        }
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementClass {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.name() == s)
            .ok_or_else(|| ValidationError::invalid_type(format!("unknown element class '{}'", s)))
    }
}

/// Rust element types that map onto a builtin class
pub trait Element: Copy {
    const CLASS: ElementClass;

    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($ty:ty => $class:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const CLASS: ElementClass = ElementClass::$class;

                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_element!(
    f64 => Double,
    f32 => Single,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
);

impl Element for bool {
    const CLASS: ElementClass = ElementClass::Logical;

    fn to_f64(self) -> f64 {
        f64::from(u8::from(self))
    }
}

impl Element for char {
    const CLASS: ElementClass = ElementClass::Char;

    fn to_f64(self) -> f64 {
        f64::from(u32::from(self))
    }
}

/// Class of a value: builtin, or a user-defined object class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueClass {
    Builtin(ElementClass),
    Object {
        name: String,
        /// Every ancestor class, nearest first
        #[serde(default)]
        superclasses: Vec<String>,
    },
}

impl ValueClass {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Builtin(class) => class.name(),
            Self::Object { name, .. } => name,
        }
    }

    #[must_use]
    pub fn element_class(&self) -> Option<ElementClass> {
        match self {
            Self::Builtin(class) => Some(*class),
            Self::Object { .. } => None,
        }
    }

    /// Whether the class is `name` or derives from it
    #[must_use]
    pub fn is_instance_of(&self, name: &str) -> bool {
        match self {
            Self::Builtin(class) => class.name() == name,
            Self::Object {
                name: own,
                superclasses,
            } => own == name || superclasses.iter().any(|parent| parent == name),
        }
    }
}

impl fmt::Display for ValueClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the array is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Storage {
    #[default]
    Dense,
    Sparse,
    /// Diagonal matrix type; off-diagonal entries are zero by construction
    Diagonal,
}

/// A value under test
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    class: ValueClass,
    storage: Storage,
    dims: Vec<usize>,
    re: ArrayD<f64>,
    im: Option<ArrayD<f64>>,
}

/// Apply the environment's dimension conventions to a raw shape
///
/// Zero-dimensional arrays are `1x1`, one-dimensional arrays are rows, and
/// trailing singleton dimensions past the second are dropped.
#[must_use]
pub fn normalize_dims(shape: &[usize]) -> Vec<usize> {
    let mut dims = shape.to_vec();
    match dims.len() {
        0 => dims = vec![1, 1],
        1 => dims.insert(0, 1),
        _ => {},
    }
    while dims.len() > 2 && dims.last() == Some(&1) {
        dims.pop();
    }
    dims
}

impl Value {
    fn from_parts(class: ValueClass, re: ArrayD<f64>, im: Option<ArrayD<f64>>) -> Self {
        Self {
            class,
            storage: Storage::Dense,
            dims: normalize_dims(re.shape()),
            re,
            im,
        }
    }

    /// Build a value from any `ndarray` array of a supported element type
    pub fn from_array<A, S, D>(array: &ArrayBase<S, D>) -> Self
    where
        A: Element,
        S: Data<Elem = A>,
        D: Dimension,
    {
        let re = array.mapv(Element::to_f64).into_dyn();
        Self::from_parts(ValueClass::Builtin(A::CLASS), re, None)
    }

    /// Build a complex double value from real and imaginary parts
    pub fn complex<S, D>(re: &ArrayBase<S, D>, im: &ArrayBase<S, D>) -> Result<Self>
    where
        S: Data<Elem = f64>,
        D: Dimension,
    {
        if re.shape() != im.shape() {
            return Err(ValidationError::invalid_input_arg(format!(
                "complex: real part has shape {:?} but imaginary part has shape {:?}",
                re.shape(),
                im.shape()
            )));
        }
        Ok(Self::from_parts(
            ValueClass::Builtin(ElementClass::Double),
            re.to_owned().into_dyn(),
            Some(im.to_owned().into_dyn()),
        ))
    }

    /// Build a value from column-major data, converting it into `class`
    pub fn from_column_major(
        class: ElementClass,
        shape: &[usize],
        data: Vec<f64>,
        imag: Option<Vec<f64>>,
    ) -> Result<Self> {
        let expected: usize = shape.iter().product();
        let build = |data: Vec<f64>| -> Result<ArrayD<f64>> {
            if data.len() != expected {
                return Err(ValidationError::invalid_input_arg(format!(
                    "data has {} elements but size {:?} needs {}",
                    data.len(),
                    shape,
                    expected
                )));
            }
            let converted = data
                .into_iter()
                .map(|x| class.convert(x))
                .collect::<Result<Vec<f64>>>()?;
            ArrayD::from_shape_vec(IxDyn(shape).f(), converted)
                .map_err(|e| ValidationError::invalid_input_arg(e.to_string()))
        };

        let re = build(data)?;
        let im = match imag {
            Some(_) if !class.is_float() => {
                return Err(ValidationError::invalid_type(format!(
                    "complex values must be of class double or single, not {}",
                    class
                )));
            },
            Some(imag) => Some(build(imag)?),
            None => None,
        };
        Ok(Self::from_parts(ValueClass::Builtin(class), re, im))
    }

    /// A `1x1` double
    #[must_use]
    pub fn scalar(x: f64) -> Self {
        Self::from_array(&ndarray::arr0(x))
    }

    /// A `1xN` double row vector
    #[must_use]
    pub fn row(values: &[f64]) -> Self {
        Self::from_array(&ndarray::aview1(values))
    }

    /// An `Nx1` double column vector
    #[must_use]
    pub fn column(values: &[f64]) -> Self {
        let column = ndarray::aview1(values).insert_axis(ndarray::Axis(1)).to_owned();
        Self::from_array(&column)
    }

    /// A double array of the given shape with every element set to `x`
    #[must_use]
    pub fn filled(shape: &[usize], x: f64) -> Self {
        Self::from_array(&ArrayD::from_elem(IxDyn(shape), x))
    }

    /// An all-zero double array of the given shape
    #[must_use]
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, 0.0)
    }

    /// The `0x0` empty double matrix
    #[must_use]
    pub fn empty() -> Self {
        Self::zeros(&[0, 0])
    }

    /// A char row vector
    #[must_use]
    pub fn text(s: &str) -> Self {
        let chars: Vec<char> = s.chars().collect();
        Self::from_array(&ndarray::aview1(&chars))
    }

    /// An `NxN` diagonal matrix value
    #[must_use]
    pub fn diagonal(entries: &[f64]) -> Self {
        let mut value = Self::from_array(&Array2::from_diag(&ndarray::aview1(entries)));
        value.storage = Storage::Diagonal;
        value
    }

    /// A `1x1` instance of a user-defined class
    #[must_use]
    pub fn object<S: Into<String>>(name: S, superclasses: Vec<String>) -> Self {
        Self::from_parts(
            ValueClass::Object {
                name: name.into(),
                superclasses,
            },
            ArrayD::zeros(IxDyn(&[1, 1])),
            None,
        )
    }

    /// Convert to sparse storage
    ///
    /// Only two-dimensional double and logical values can be sparse.
    pub fn into_sparse(mut self) -> Result<Self> {
        let supported = matches!(
            self.element_class(),
            Some(ElementClass::Double | ElementClass::Logical)
        );
        if !supported || self.ndims() != 2 {
            return Err(ValidationError::invalid_type(format!(
                "sparse: cannot store {} {} as a sparse matrix",
                crate::utils::validation::shape::format_dims(&self.dims),
                self.class
            )));
        }
        self.storage = Storage::Sparse;
        Ok(self)
    }

    /// Convert to diagonal matrix storage
    ///
    /// The value must be a two-dimensional float matrix with zeros off the
    /// diagonal.
    pub fn into_diagonal(mut self) -> Result<Self> {
        let rows = self.dims[0].max(1);
        let off_diagonal = |(k, x): (usize, &f64)| k % rows != k / rows && *x != 0.0;
        let nonzero_re = self.linear_re().iter().enumerate().any(off_diagonal);
        let nonzero_im = self
            .linear_im()
            .is_some_and(|im| im.iter().enumerate().any(off_diagonal));

        if !self.is_float() || self.ndims() != 2 || nonzero_re || nonzero_im {
            return Err(ValidationError::invalid_type(format!(
                "diag: cannot store {} as a diagonal matrix",
                self
            )));
        }
        self.storage = Storage::Diagonal;
        Ok(self)
    }

    #[must_use]
    pub fn class(&self) -> &ValueClass {
        &self.class
    }

    #[must_use]
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    #[must_use]
    pub fn element_class(&self) -> Option<ElementClass> {
        self.class.element_class()
    }

    #[must_use]
    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Normalized dimensions (at least two)
    #[must_use]
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[must_use]
    pub fn ndims(&self) -> usize {
        self.dims.len()
    }

    #[must_use]
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// True unless the value carries an imaginary part
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_none()
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        self.storage == Storage::Sparse
    }

    #[must_use]
    pub fn is_diagonal_matrix(&self) -> bool {
        self.storage == Storage::Diagonal
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        self.element_class().is_some_and(ElementClass::is_float)
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.element_class().is_some_and(ElementClass::is_integer)
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        self.element_class().is_some_and(ElementClass::is_numeric)
    }

    #[must_use]
    pub fn is_logical(&self) -> bool {
        self.element_class() == Some(ElementClass::Logical)
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self.class, ValueClass::Object { .. })
    }

    /// Real parts in column-major order
    ///
    /// Reversing the axes turns ndarray's logical (row-major) iteration into
    /// the column-major order the environment linearizes with.
    #[must_use]
    pub fn linear_re(&self) -> Vec<f64> {
        self.re.t().iter().copied().collect()
    }

    /// Imaginary parts in column-major order, if the value is complex
    #[must_use]
    pub fn linear_im(&self) -> Option<Vec<f64>> {
        self.im.as_ref().map(|im| im.t().iter().copied().collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let complex = if self.is_real() { "" } else { "complex " };
        let storage = match self.storage {
            Storage::Dense => "",
            Storage::Sparse => "sparse ",
            Storage::Diagonal => "diagonal ",
        };
        write!(
            f,
            "{} {}{}{}",
            crate::utils::validation::shape::format_dims(&self.dims),
            storage,
            complex,
            self.class
        )
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(x: $ty) -> Self {
                    Self::from_array(&ndarray::arr0(x))
                }
            }
        )*
    };
}

impl_from_scalar!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, bool, char);
