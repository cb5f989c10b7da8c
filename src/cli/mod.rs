//! CLI module for the validate-attributes library
//!
//! This module is only available when the "cli" feature is enabled.

mod config;
#[path = "main.rs"]
mod main_impl;

pub use main_impl::{evaluate, main, process_input, Cli, CliOutputFormat};
