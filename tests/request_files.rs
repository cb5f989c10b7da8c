//! JSON requests read from files, and the command-line processing built on them

use std::fs::{self, File};
use std::io::BufReader;
use tempfile::TempDir;
use validate_attributes::{ValidationRequest, ValidatorConfig};

fn write(dir: &TempDir, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_request_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "matrix.json",
        r#"{
            "value": { "class": "int16", "size": [2, 3], "data": [1, 2, 3, 4, 5, 6] },
            "classes": ["integer"],
            "attributes": ["nrows", 2, "ncols", 3, "increasing", "<=", 6],
            "context": ["reshape", "M"]
        }"#,
    );

    let request = ValidationRequest::from_reader(BufReader::new(File::open(&path).unwrap())).unwrap();
    let value = request.value().unwrap();
    assert_eq!(value.class_name(), "int16");
    assert_eq!(value.dims(), &[2, 3]);
    assert!(request.run(&ValidatorConfig::default()).is_ok());
}

#[test]
fn test_request_values_are_converted_to_their_class() {
    let request = ValidationRequest::from_json_str(
        r#"{"value": {"class": "uint8", "data": [300, -4, 2.5]}, "attributes": ["<=", 255]}"#,
    )
    .unwrap();
    assert_eq!(request.value().unwrap().linear_re(), vec![255.0, 0.0, 3.0]);
    assert!(request.run(&ValidatorConfig::default()).is_ok());
}

#[test]
fn test_request_failure_message() {
    let request = ValidationRequest::from_json_str(
        r#"{"value": {"size": [5, 3, 6], "data": []}, "attributes": ["size", [5, null, 7]]}"#,
    );
    // Data length must match the size
    assert!(request.unwrap().value().is_err());

    let data = vec!["1"; 90].join(", ");
    let json = format!(
        r#"{{"value": {{"size": [5, 3, 6], "data": [{}]}}, "attributes": ["size", [5, null, 7]]}}"#,
        data
    );
    let err = ValidationRequest::from_json_str(&json)
        .unwrap()
        .run(&ValidatorConfig::default())
        .unwrap_err();
    assert_eq!(err.identifier(), "incorrect-size");
    assert_eq!(err.to_string(), "input must be of size 5xNx7 but was 5x3x6");
}

#[test]
fn test_request_precision_from_config() {
    let dir = TempDir::new().unwrap();
    let config_path = write(&dir, "config.json", r#"{"comparison_precision": 2}"#);
    let config = ValidatorConfig::from_json_file(&config_path).unwrap();

    let err = ValidationRequest::from_json_str(r#"{"value": [1, 2], "attributes": [">=", 1.5]}"#)
        .unwrap()
        .run(&config)
        .unwrap_err();
    assert_eq!(err.to_string(), "input must be greater than or equal to 1.50");
}

#[cfg(feature = "cli")]
mod cli {
    use super::*;
    use validate_attributes::cli::{evaluate, process_input};

    #[test]
    fn test_process_input_reports() {
        let dir = TempDir::new().unwrap();
        let config = ValidatorConfig::default();

        let valid = write(&dir, "valid.json", r#"{"value": "abc", "classes": ["char"], "attributes": ["row"]}"#);
        let report = process_input(&valid.to_string_lossy(), &config).unwrap();
        assert!(report.valid);

        let invalid = write(&dir, "invalid.json", r#"{"value": "abc", "classes": ["numeric"]}"#);
        let report = process_input(&invalid.to_string_lossy(), &config).unwrap();
        assert!(!report.valid);
        assert_eq!(report.identifier.as_deref(), Some("invalid-type"));
    }

    #[test]
    fn test_evaluate_separates_call_errors() {
        let config = ValidatorConfig::default();

        let request = ValidationRequest::from_json_str(r#"{"value": 1, "attributes": ["numel"]}"#).unwrap();
        assert!(evaluate(&request, &config).is_err());

        let request = ValidationRequest::from_json_str(r#"{"value": 1, "context": [0]}"#).unwrap();
        assert!(evaluate(&request, &config).is_err());

        let request = ValidationRequest::from_json_str(r#"{"value": 1, "attributes": ["even"]}"#).unwrap();
        let report = evaluate(&request, &config).unwrap();
        assert_eq!(report.identifier.as_deref(), Some("expected-even"));

        // A size entry no extent can equal is a failed check, not a bad call
        let request =
            ValidationRequest::from_json_str(r#"{"value": 1, "attributes": ["size", [1.5, 1]]}"#).unwrap();
        let report = evaluate(&request, &config).unwrap();
        assert!(!report.valid);
        assert_eq!(report.identifier.as_deref(), Some("incorrect-size"));
    }
}
