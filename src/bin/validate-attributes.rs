//! Attribute validation CLI tool
//!
//! Exit status: 0 when every value is valid, 1 when a value fails
//! validation, 2 when a request cannot be read or is malformed.

#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    match validate_attributes::cli::main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(2)
        },
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
