//! Behaviour of every attribute against passing and failing values
//!
//! Each failing case checks both the identifier and a fragment of the
//! message, the way callers match on them.

use ndarray::{array, Array2, Array3, Array4};
use validate_attributes::{attrs, validate_attributes, AttrArg, ValidationError, Value};

fn rand(shape: &[usize]) -> Value {
    Value::filled(shape, 0.5)
}

fn passes(value: &Value, classes: &[&str], attributes: &[AttrArg]) {
    if let Err(err) = validate_attributes(value, classes, attributes, &[]) {
        panic!("expected {} to pass {:?}: {}", value, attributes, err);
    }
}

fn fails(value: &Value, classes: &[&str], attributes: &[AttrArg], id: &str, fragment: &str) {
    match validate_attributes(value, classes, attributes, &[]) {
        Ok(()) => panic!("expected {} to fail {:?}", value, attributes),
        Err(err) => {
            assert_eq!(err.identifier(), id, "unexpected identifier for {}", err);
            assert!(
                err.to_string().contains(fragment),
                "message '{}' does not mention '{}'",
                err,
                fragment
            );
        },
    }
}

fn eye(n: usize) -> Value {
    Value::from_array(&Array2::<f64>::eye(n))
}

#[test]
fn test_shape_attributes() {
    passes(&rand(&[5, 5]), &[], &attrs!["2d"]);
    passes(&rand(&[5, 5]), &[], &attrs!["3d"]);
    passes(&rand(&[5, 5, 5]), &[], &attrs!["3d"]);
    passes(&rand(&[5, 1]), &[], &attrs!["column"]);
    passes(&rand(&[1, 5]), &[], &attrs!["row"]);
    passes(&Value::text("a"), &[], &attrs!["scalar"]);
    passes(&Value::scalar(5.0), &[], &attrs!["scalar"]);
    passes(&rand(&[1, 5]), &[], &attrs!["vector"]);
    passes(&rand(&[5, 1]), &[], &attrs!["vector"]);
    passes(&rand(&[5, 5]), &[], &attrs!["square"]);
    passes(&rand(&[5, 5]), &[], &attrs!["nonempty"]);
    passes(&rand(&[5, 5]), &[], &attrs!["nonsparse"]);

    fails(&rand(&[5, 5, 5]), &[], &attrs!["2d"], "expected-2d", "2d");
    fails(&rand(&[5, 5, 5, 7]), &[], &attrs!["3d"], "expected-3d", "3d");
    fails(&rand(&[5, 5]), &[], &attrs!["column"], "expected-column", "column");
    fails(&rand(&[1, 5]), &[], &attrs!["column"], "expected-column", "column");
    fails(&rand(&[5, 5]), &[], &attrs!["row"], "expected-row", "row");
    fails(&rand(&[5, 1]), &[], &attrs!["row"], "expected-row", "row");
    fails(&rand(&[1, 5]), &[], &attrs!["scalar"], "expected-scalar", "scalar");
    fails(&rand(&[5, 5]), &[], &attrs!["vector"], "expected-vector", "vector");
    fails(&rand(&[5, 6]), &[], &attrs!["square"], "expected-square", "square");
    fails(&Value::empty(), &[], &attrs!["nonempty"], "expected-nonempty", "nonempty");

    let sparse = rand(&[5, 5]).into_sparse().unwrap();
    fails(&sparse, &[], &attrs!["nonsparse"], "expected-nonsparse", "nonsparse");
}

#[test]
fn test_empty_values() {
    // 1x0 is a row and a vector; 0x0 is neither
    let row = Value::zeros(&[1, 0]);
    passes(&row, &[], &attrs!["row", "vector", "2d"]);
    fails(&Value::empty(), &[], &attrs!["vector"], "expected-vector", "vector");
    fails(&Value::empty(), &[], &attrs!["scalar"], "expected-scalar", "scalar");
    passes(&Value::empty(), &[], &attrs!["square", "diag", "increasing", "positive"]);
}

#[test]
fn test_element_attributes() {
    passes(&Value::row(&[0.0, 1.0, 0.0, 1.0, 0.0]), &[], &attrs!["binary"]);
    passes(
        &Value::from_array(&Array2::from_elem((5, 5), true)),
        &[],
        &attrs!["binary"],
    );
    passes(&Value::row(&[8.0, 4.0, 0.0, 6.0]), &[], &attrs!["even"]);
    passes(&Value::row(&[-1.0, 3.0, 5.0]), &[], &attrs!["odd"]);
    passes(&Value::row(&[8.0, 4.0, 0.0, 6.0]), &[], &attrs!["real"]);

    let complex = Value::complex(&array![8.0, 0.0, 0.0, 6.0], &array![0.0, 4.0, 0.0, 0.0]).unwrap();
    passes(&complex, &[], &attrs!["finite"]);
    passes(&Value::from_array(&array![8u8, 4]), &[], &attrs!["finite"]);
    passes(&Value::row(&[8.0, f64::INFINITY]), &[], &attrs!["nonnan"]);
    passes(&Value::row(&[0.0, 7.0, 4.0]), &[], &attrs!["nonnegative"]);
    passes(&Value::row(&[-8.0, 7.0, 4.0]), &[], &attrs!["nonzero"]);
    passes(&Value::row(&[8.0, 7.0, 4.0]), &[], &attrs!["positive"]);

    fails(&Value::text("text"), &[], &attrs!["binary"], "expected-binary", "binary");
    fails(&Value::row(&[0.0, 1.0, 0.0, 3.0, 0.0]), &[], &attrs!["binary"], "expected-binary", "binary");
    fails(&Value::row(&[2.0, 3.0, 6.0, 8.0]), &[], &attrs!["even"], "expected-even", "even");
    fails(&Value::row(&[2.0, f64::NAN]), &[], &attrs!["even"], "expected-even", "even");
    fails(&Value::row(&[3.0, 4.0, 7.0, 5.0]), &[], &attrs!["odd"], "expected-odd", "odd");
    fails(&Value::row(&[5.0, f64::NAN]), &[], &attrs!["odd"], "expected-odd", "odd");
    fails(&Value::row(&[5.0, 5.2, 5.7]), &[], &attrs!["integer"], "expected-integer", "integer");

    let imaginary = Value::complex(&array![0.0, 8.0, 9.0], &array![5.0, 0.0, 0.0]).unwrap();
    fails(&imaginary, &[], &attrs!["real"], "expected-real", "real");

    let infinite =
        Value::complex(&array![0.0, f64::INFINITY, 8.0], &array![5.0, 0.0, 0.0]).unwrap();
    fails(&infinite, &[], &attrs!["finite"], "expected-finite", "finite");
    fails(&Value::row(&[f64::NAN, f64::INFINITY, 8.0]), &[], &attrs!["nonnan"], "expected-nonnan", "nonnan");
    fails(&Value::row(&[7.0, 8.0, -9.0]), &[], &attrs!["nonnegative"], "expected-nonnegative", "nonnegative");
    fails(&Value::row(&[7.0, 8.0, 0.0]), &[], &attrs!["nonzero"], "expected-nonzero", "nonzero");
    fails(&Value::row(&[7.0, 0.0, 8.0]), &[], &attrs!["positive"], "expected-positive", "positive");
}

#[test]
fn test_nan_passes_sign_checks() {
    // Sign checks look for offending elements; NaN is never one
    passes(&Value::row(&[f64::NAN, 1.0]), &[], &attrs!["nonnegative", "positive", "nonzero"]);
}

#[test]
fn test_class_exemptions() {
    let int = Value::from_array(&array![[1i32, -2], [3, 4]]);
    passes(&int, &[], &attrs!["integer", "finite", "nonnan"]);

    let logical = Value::from_array(&array![true, false, true]);
    passes(&logical, &["logical"], &attrs!["binary", "nonnegative"]);
}

#[test]
fn test_monotonic_attributes() {
    passes(&Value::row(&[8.0, 7.0, 4.0, -5.0]), &[], &attrs!["decreasing"]);
    passes(&Value::row(&[-8.0, -7.0, 4.0, 5.0]), &[], &attrs!["increasing"]);
    passes(&Value::row(&[8.0, 4.0, 4.0, -5.0]), &[], &attrs!["nonincreasing"]);
    passes(&Value::row(&[-8.0, -8.0, 4.0, 5.0]), &[], &attrs!["nondecreasing"]);

    fails(&Value::row(&[7.0, 8.0, 4.0, 3.0, -5.0]), &[], &attrs!["decreasing"], "expected-decreasing", "decreasing");
    fails(&Value::row(&[7.0, f64::NAN, 4.0, 3.0, -5.0]), &[], &attrs!["decreasing"], "expected-decreasing", "decreasing");
    fails(&Value::row(&[7.0, 8.0, 4.0, 9.0, 20.0]), &[], &attrs!["increasing"], "expected-increasing", "increasing");
    fails(&Value::row(&[7.0, 8.0, f64::NAN, 9.0, 20.0]), &[], &attrs!["increasing"], "expected-increasing", "increasing");
    fails(&Value::row(&[7.0, 8.0, 4.0, 9.0, 20.0]), &[], &attrs!["nonincreasing"], "expected-nonincreasing", "nonincreasing");
    fails(&Value::row(&[7.0, 8.0, f64::NAN, 9.0, 20.0]), &[], &attrs!["nonincreasing"], "expected-nonincreasing", "nonincreasing");
    fails(&Value::row(&[7.0, 8.0, 4.0, 3.0, -5.0]), &[], &attrs!["nondecreasing"], "expected-nondecreasing", "nondecreasing");
    fails(&Value::row(&[7.0, f64::NAN, 4.0, 3.0, -5.0]), &[], &attrs!["nondecreasing"], "expected-nondecreasing", "nondecreasing");
}

#[test]
fn test_monotonic_steps_stay_in_integer_classes() {
    // uint8 differences saturate at zero, so falling data is never decreasing
    let falling = Value::from_array(&array![5u8, 3]);
    fails(&falling, &[], &attrs!["decreasing"], "expected-decreasing", "decreasing");
    passes(&falling, &[], &attrs!["nonincreasing"]);
    passes(&Value::from_array(&array![3u8, 5, 9]), &[], &attrs!["increasing"]);

    passes(&Value::from_array(&array![120i8, -120]), &[], &attrs!["decreasing"]);
    fails(&Value::from_array(&array![7u16, 7]), &[], &attrs!["increasing"], "expected-increasing", "increasing");
}

#[test]
fn test_monotonic_uses_column_major_order() {
    // Linear order is 1, 2, 3, 4 even though rows read 1 3 / 2 4
    let matrix = Value::from_array(&array![[1.0, 3.0], [2.0, 4.0]]);
    passes(&matrix, &[], &attrs!["increasing"]);
}

#[test]
fn test_size_attributes() {
    let cube = rand(&[4, 6, 7, 2]);
    passes(&cube, &[], &attrs!["size", [4.0, 6.0, 7.0, 2.0]]);
    passes(&cube, &[], &attrs!["size", [4.0, f64::NAN, 7.0, 2.0]]);
    passes(&cube, &[], &attrs!["size", [4.0, 6.0, f64::NAN, 2.0, f64::NAN]]);
    passes(&rand(&[6, 2]), &[], &attrs!["numel", 12]);
    passes(&rand(&[6, 2]), &[], &attrs!["ncols", 2]);
    passes(&rand(&[6, 2]), &[], &attrs!["nrows", 6]);
    passes(&rand(&[6, 2, 4, 5]), &[], &attrs!["ndims", 4]);

    fails(
        &rand(&[4, 6, 7, 3]),
        &[],
        &attrs!["size", [4.0, f64::NAN, 7.0, 2.0]],
        "incorrect-size",
        "4xNx7x2 but was 4x6x7x3",
    );

    let ones = Value::filled(&[5, 3, 6], 1.0);
    fails(&ones, &[], &attrs!["size", [5.0, 4.0, 7.0]], "incorrect-size", "size");
    fails(&ones, &[], &attrs!["size", [5.0, f64::NAN, 7.0]], "incorrect-size", "5xNx7 but was 5x3x6");
    fails(&ones, &[], &attrs!["size", [5.0, 3.0, 6.0, 2.0]], "incorrect-size", "size");
    fails(&ones, &[], &attrs!["size", [5.0, 3.0]], "incorrect-size", "size");
    fails(&Value::filled(&[6, 3], 1.0), &[], &attrs!["numel", 12], "incorrect-numel", "elements");
    fails(&Value::filled(&[6, 2], 1.0), &[], &attrs!["ncols", 3], "incorrect-numcols", "columns");
    fails(&Value::filled(&[6, 2], 1.0), &[], &attrs!["nrows", 3], "incorrect-numrows", "rows");
    fails(&Value::filled(&[6, 2, 6, 3], 1.0), &[], &attrs!["ndims", 3], "incorrect-numdims", "dimensions");
}

#[test]
fn test_size_entries_that_no_extent_can_equal() {
    let scalar = Value::scalar(1.0);
    fails(&scalar, &[], &attrs!["size", [1.5, 1.0]], "incorrect-size", "1.5x1 but was 1x1");
    fails(&scalar, &[], &attrs!["size", [-1.0, 1.0]], "incorrect-size", "-1x1 but was 1x1");
    fails(&scalar, &[], &attrs!["size", [f64::INFINITY, f64::NAN]], "incorrect-size", "InfxN but was 1x1");

    let err = validate_attributes(&scalar, &[], &attrs!["size", [1.5, 1.0]], &[]).unwrap_err();
    assert!(err.is_check_failure());
}

#[test]
fn test_size_uses_normalized_dims() {
    // Trailing singleton dimensions are dropped, so 4x5x1 is 4x5
    let value = Value::from_array(&Array3::<f64>::zeros((4, 5, 1)));
    passes(&value, &[], &attrs!["size", [4.0, 5.0], "ndims", 2, "2d"]);

    let value = Value::from_array(&Array4::<f64>::zeros((2, 1, 3, 1)));
    passes(&value, &[], &attrs!["size", [2.0, 1.0, 3.0], "3d"]);
}

#[test]
fn test_comparison_attributes() {
    let value = Value::row(&[4.0, 5.0, 6.0, 7.0]);
    passes(&value, &[], &attrs![">", 3]);
    passes(&value, &[], &attrs![">=", 4]);
    passes(&value, &[], &attrs!["<", 8]);
    passes(&value, &[], &attrs!["<=", 7]);

    let value = Value::row(&[6.0, 7.0, 8.0, 5.0]);
    fails(&value, &[], &attrs![">", 5], "expected-greater", "greater than");
    fails(&value, &[], &attrs![">=", 6], "expected-greater-equal", "greater than");
    fails(&value, &[], &attrs!["<", 8], "expected-less", "less than");
    fails(&value, &[], &attrs!["<=", 7], "expected-less-equal", "less than");
}

#[test]
fn test_array_bounds_broadcast_against_the_elements() {
    let value = Value::row(&[2.0, 3.0, 4.0]);

    // A column bound lines up with the elements
    passes(&value, &[], &attrs![">", Value::column(&[1.0, 2.0, 3.0])]);
    fails(
        &value,
        &[],
        &attrs![">", Value::column(&[1.0, 3.0, 3.0])],
        "expected-greater",
        "greater than [1.000000 3.000000 3.000000] (3x1)",
    );

    // A row bound is checked against every element
    fails(
        &value,
        &[],
        &attrs![">", [1.0, 2.0, 3.0]],
        "expected-greater",
        "greater than [1.000000 2.000000 3.000000] (1x3)",
    );
    passes(&value, &[], &attrs![">", [0.0, 1.5]]);
    passes(&value, &[], &attrs!["<=", Value::filled(&[1, 2, 2], 4.0)]);

    // A scalar value is checked against every bound entry
    passes(&Value::scalar(5.0), &[], &attrs![">", [1.0, 2.0, 3.0]]);

    let err = validate_attributes(&value, &[], &attrs![">", Value::column(&[1.0, 2.0])], &[])
        .unwrap_err();
    assert_eq!(err.identifier(), "nonconformant-args");
    assert!(!err.is_check_failure());
}

#[test]
fn test_complex_comparisons() {
    // 3+4i has magnitude 5
    let value = Value::complex(&array![3.0], &array![4.0]).unwrap();
    passes(&value, &[], &attrs![">", 4.5, "<", 5.5]);
    fails(&value, &[], &attrs!["<", 4.5], "expected-less", "less than");

    let err = validate_attributes(&value, &[], &attrs!["even"], &[]).unwrap_err();
    assert_eq!(err.identifier(), "undefined-function");
}

#[test]
fn test_diag_attribute() {
    passes(&eye(3), &[], &attrs!["diag"]);
    passes(&Value::zeros(&[3, 3]), &[], &attrs!["diag"]);
    passes(&Value::diagonal(&[1.0, 2.0, 3.0]), &[], &attrs!["diag"]);
    passes(&Value::from_array(&array![[2u8, 0], [0, 0]]), &[], &attrs!["diag"]);

    let lower = Value::from_array(&array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]);
    fails(&lower, &[], &attrs!["diag"], "expected-diag", "diag");

    let stacked = Value::from_array(&Array3::from_shape_fn((3, 3, 3), |(i, j, _)| {
        if i == j {
            1.0
        } else {
            0.0
        }
    }));
    fails(&stacked, &[], &attrs!["diag"], "expected-diag", "diag");
    fails(&Value::row(&[1.0, 2.0]), &["numeric"], &attrs!["diag"], "expected-diag", "diag");
    fails(&Value::text("a"), &[], &attrs!["diag"], "expected-diag", "diag");
}

#[test]
fn test_attribute_names_ignore_case() {
    passes(&rand(&[5, 5]), &[], &attrs!["SQUARE", "NonEmpty", "2D"]);
    fails(&rand(&[5, 6]), &[], &attrs!["Square"], "expected-square", "must be square");
}

#[test]
fn test_combined_attributes() {
    let value = Value::row(&[0.0, 1.0, 0.0, 1.0]);
    passes(
        &value,
        &["double", "uint8"],
        &attrs!["binary", "size", [f64::NAN, 4.0], "nonnan"],
    );
}

#[test]
fn test_malformed_attribute_lists() {
    let value = Value::scalar(1.0);

    let err = validate_attributes(&value, &[], &attrs!["shiny"], &[]).unwrap_err();
    assert!(matches!(err, ValidationError::UnknownAttribute(_)));
    assert_eq!(err.identifier(), "invalid-input-arg");

    let err = validate_attributes(&value, &[], &attrs!["size"], &[]).unwrap_err();
    assert!(matches!(err, ValidationError::MissingAttributeValue(_)));


    let err = validate_attributes(&value, &[], &attrs!["ndims", -2], &[]).unwrap_err();
    assert_eq!(err.identifier(), "invalid-input-arg");

    let err = validate_attributes(&value, &[], &attrs![">", "zero"], &[]).unwrap_err();
    assert_eq!(err.identifier(), "invalid-type");
}
