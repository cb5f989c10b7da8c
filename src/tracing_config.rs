//! Tracing configuration for the command-line tool
//!
//! The library only emits events and spans. Installing a subscriber is left
//! to applications; this module does it for the `validate-attributes` binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
    /// Colored human-readable output (default)
    Console,
    /// Plain compact output for CI logs
    Compact,
    /// JSON structured logging
    #[cfg(feature = "tracing-json")]
    Json,
}

/// Destination for log lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TracingOutput {
    /// Standard error, so reports on stdout stay machine-readable
    Stderr,
    /// Output to a file
    #[cfg(feature = "tracing-files")]
    File(std::path::PathBuf),
}

/// Keeps background log writers alive; drop it only when the program exits
#[derive(Debug, Default)]
#[must_use = "dropping the guard stops buffered file logging"]
pub struct TracingGuard {
    #[cfg(feature = "tracing-files")]
    _file_writer: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Tracing configuration builder
#[derive(Debug)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    pub format: TracingFormat,
    pub output: TracingOutput,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            format: TracingFormat::Console,
            output: TracingOutput::Stderr,
            env_filter: None,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-2+)
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Set custom environment filter
    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Convert verbosity level to tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",  // Default: summaries and warnings
            1 => "debug", // -v: each validation call and its outcome
            _ => "trace", // -vv+: every attribute checked
        }
    }

    fn filter(&self) -> anyhow::Result<EnvFilter> {
        let directives = self
            .env_filter
            .clone()
            .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
            .unwrap_or_else(|| self.verbosity_to_filter().to_string());
        Ok(EnvFilter::try_new(directives)?)
    }

    /// Install the global subscriber
    pub fn init(self) -> anyhow::Result<TracingGuard> {
        let registry = Registry::default().with(self.filter()?);

        match (&self.format, &self.output) {
            (TracingFormat::Console, TracingOutput::Stderr) => {
                let fmt_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(false)
                    .with_level(true)
                    .compact();
                registry.with(fmt_layer).try_init()?;
            },

            (TracingFormat::Compact, TracingOutput::Stderr) => {
                let fmt_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_target(false)
                    .compact();
                registry.with(fmt_layer).try_init()?;
            },

            #[cfg(feature = "tracing-json")]
            (TracingFormat::Json, TracingOutput::Stderr) => {
                let fmt_layer = fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .with_current_span(true)
                    .with_span_list(true);
                registry.with(fmt_layer).try_init()?;
            },

            #[cfg(feature = "tracing-files")]
            (format, TracingOutput::File(path)) => {
                use tracing_appender::{non_blocking, rolling};

                let file_appender = rolling::never(
                    path.parent().unwrap_or_else(|| std::path::Path::new(".")),
                    path.file_name()
                        .unwrap_or_else(|| std::ffi::OsStr::new("validate-attributes.log")),
                );
                let (file_writer, guard) = non_blocking(file_appender);

                match format {
                    TracingFormat::Console | TracingFormat::Compact => {
                        let fmt_layer = fmt::layer()
                            .with_ansi(false)
                            .with_writer(file_writer)
                            .compact();
                        registry.with(fmt_layer).try_init()?;
                    },
                    #[cfg(feature = "tracing-json")]
                    TracingFormat::Json => {
                        let fmt_layer = fmt::layer()
                            .json()
                            .with_writer(file_writer)
                            .with_current_span(true)
                            .with_span_list(true);
                        registry.with(fmt_layer).try_init()?;
                    },
                }

                return Ok(TracingGuard {
                    _file_writer: Some(guard),
                });
            },
        }

        Ok(TracingGuard::default())
    }
}

/// Span creation helpers for the command-line tool
pub mod spans {
    use tracing::{Level, Span};

    /// Span covering one request, from reading to reporting
    pub fn request(source: &str) -> Span {
        tracing::span!(Level::INFO, "request", source = %source)
    }
}

/// Event helpers for common logging patterns
pub mod events {
    use tracing::{debug, error, info};

    /// Log a request that passed every check
    pub fn validation_passed(source: &str) {
        info!(source = %source, "Value is valid");
    }

    /// Log a request whose value failed a check
    pub fn validation_failed(source: &str, identifier: &str, reason: &str) {
        info!(
            source = %source,
            identifier = %identifier,
            reason = %reason,
            "Value failed validation"
        );
    }

    /// Log an error with context
    pub fn error_with_context(error: &dyn std::error::Error, context: &str) {
        error!(error = %error, context = %context, "Operation failed");
    }

    /// Log how long a request took
    pub fn timing(source: &str, elapsed: std::time::Duration) {
        debug!(
            source = %source,
            elapsed_us = %elapsed.as_micros(),
            "Request finished"
        );
    }
}
