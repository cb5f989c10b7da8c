//! Attribute validation CLI tool
//!
//! Reads validation requests as JSON, runs them, and reports the outcome.

use super::config::CliConfigBuilder;
use crate::{
    attributes::Rule,
    config::ValidatorConfig,
    error::ValidationError,
    request::{ValidationReport, ValidationRequest},
    tracing_config::{events, spans, TracingConfig, TracingFormat, TracingGuard},
};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

/// Validate values against classes and attributes
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "validate-attributes")]
pub struct Cli {
    /// Request files (use "-" for stdin)
    #[arg(value_name = "REQUEST", default_value = "-")]
    pub input: Vec<String>,

    /// Validator configuration file (JSON)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Namespace prepended to error identifiers (e.g. "Octave")
    #[arg(long)]
    pub namespace: Option<String>,

    /// Decimals used for comparison bounds in failure messages
    #[arg(long)]
    pub precision: Option<usize>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = CliOutputFormat::Text)]
    pub format: CliOutputFormat,

    /// Enable verbose logging (-v: DEBUG, -vv: TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// List the supported attributes and exit
    #[arg(long)]
    pub list_attributes: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum CliOutputFormat {
    Text,
    Json,
}

/// Exit code for a request whose value failed validation
const EXIT_INVALID: u8 = 1;

pub fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let _guard = init_tracing(cli.verbose).context("Failed to initialize tracing")?;

    if cli.list_attributes {
        list_attributes(&mut io::stdout().lock()).context("Failed to write attribute list")?;
        return Ok(ExitCode::SUCCESS);
    }

    CliConfigBuilder::validate_cli(&cli).context("Invalid CLI arguments")?;
    let config = CliConfigBuilder::from_cli(&cli).context("Failed to build configuration")?;
    debug!(?config, "Validator configured");

    let mut all_valid = true;
    let mut stdout = io::stdout().lock();
    for source in &cli.input {
        let report = process_input(source, &config)?;
        write_report(&mut stdout, source, &report, cli.format)
            .context("Failed to write report")?;
        all_valid &= report.valid;
    }

    info!(
        "Checked {} request(s): {}",
        cli.input.len(),
        if all_valid { "all valid" } else { "failures found" }
    );

    Ok(if all_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

fn init_tracing(verbose_count: u8) -> Result<TracingGuard> {
    let guard = TracingConfig::new()
        .with_verbosity(verbose_count)
        .with_format(TracingFormat::Console)
        .init()
        .context("Failed to initialize tracing subscriber")?;

    debug!(verbosity = verbose_count, "Tracing initialized");
    Ok(guard)
}

/// Read and run one request
///
/// Returns a report for values that pass or fail their checks; malformed
/// requests are errors.
pub fn process_input(source: &str, config: &ValidatorConfig) -> Result<ValidationReport> {
    let span = spans::request(source);
    let _enter = span.enter();
    let start = Instant::now();

    let request =
        read_request(source).with_context(|| format!("Failed to read request from {}", source))?;
    let report = evaluate(&request, config).map_err(|err| {
        events::error_with_context(&err, source);
        anyhow::Error::new(err).context(format!("Invalid request in {}", source))
    })?;

    match (&report.identifier, &report.message) {
        (Some(identifier), Some(message)) => events::validation_failed(source, identifier, message),
        _ => events::validation_passed(source),
    }
    events::timing(source, start.elapsed());

    Ok(report)
}

/// Run a parsed request, separating check failures from malformed calls
pub fn evaluate(
    request: &ValidationRequest,
    config: &ValidatorConfig,
) -> std::result::Result<ValidationReport, ValidationError> {
    match request.run(config) {
        Ok(()) => Ok(ValidationReport::passed()),
        Err(err) if err.is_check_failure() => Ok(ValidationReport::failed(&err, config)),
        Err(err) => Err(err),
    }
}

fn read_request(source: &str) -> Result<ValidationRequest> {
    if source == "-" {
        info!("Reading request from stdin");
        return Ok(ValidationRequest::from_reader(io::stdin().lock())?);
    }

    let file = File::open(source).with_context(|| format!("Failed to open {}", source))?;
    Ok(ValidationRequest::from_reader(BufReader::new(file))?)
}

#[derive(Serialize)]
struct SourcedReport<'a> {
    source: &'a str,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

fn write_report<W: Write>(
    out: &mut W,
    source: &str,
    report: &ValidationReport,
    format: CliOutputFormat,
) -> Result<()> {
    match format {
        CliOutputFormat::Text => match (&report.identifier, &report.message) {
            (Some(identifier), Some(message)) => {
                writeln!(out, "{}: invalid [{}]", source, identifier)?;
                for line in message.lines() {
                    writeln!(out, "    {}", line)?;
                }
            },
            _ => writeln!(out, "{}: valid", source)?,
        },
        CliOutputFormat::Json => {
            serde_json::to_writer(&mut *out, &SourcedReport { source, report })?;
            writeln!(out)?;
        },
    }
    Ok(())
}

fn list_attributes<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{:<15} {:<6} IDENTIFIER", "ATTRIBUTE", "VALUE")?;
    for rule in Rule::all() {
        let takes_value = if rule.arity() == 1 { "yes" } else { "no" };
        writeln!(out, "{:<15} {:<6} {}", rule.name(), takes_value, rule.id())?;
    }
    Ok(())
}
