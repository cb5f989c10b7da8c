//! Configuration conversion utilities for CLI arguments

use crate::cli::main_impl::Cli;
use crate::config::ValidatorConfig;
use anyhow::{Context, Result};

/// Convert CLI arguments to a [`ValidatorConfig`]
pub(crate) struct CliConfigBuilder;

impl CliConfigBuilder {
    /// Build the configuration: the `--config` file first, then flag overrides
    pub(crate) fn from_cli(cli: &Cli) -> Result<ValidatorConfig> {
        let mut config = match &cli.config {
            Some(path) => ValidatorConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?,
            None => ValidatorConfig::default(),
        };

        if let Some(namespace) = &cli.namespace {
            config.identifier_namespace = Some(namespace.clone());
        }
        if let Some(precision) = cli.precision {
            config.comparison_precision = precision;
        }

        config.validate().context("Invalid validator configuration")?;
        Ok(config)
    }

    /// Validate CLI arguments before any request is read
    pub(crate) fn validate_cli(cli: &Cli) -> Result<()> {
        if cli.input.is_empty() {
            anyhow::bail!("At least one request is required");
        }

        if cli.input.iter().filter(|input| input.as_str() == "-").count() > 1 {
            anyhow::bail!("Standard input can only be read once");
        }

        Ok(())
    }
}
