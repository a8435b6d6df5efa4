//! Command-line surface, error rendering and exit codes.
//!
//! Release inputs come from `VERSION` and `PRERELEASE`, read directly from
//! the environment so their absence maps to the publisher's own error and
//! exit code rather than clap's usage error.

use crate::tracing::{LogLevel, TracingFormat};
use clap::Parser;
use miette::{Diagnostic, Report};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a successful run
pub const EXIT_OK: i32 = 0;
/// Exit code for any validation or I/O failure
pub const EXIT_FAILURE: i32 = 1;

/// Publish versioned Homebrew casks and formulas from release templates.
///
/// Reads VERSION and PRERELEASE from the environment, renders
/// `Casks/<package>.rb.tmpl` (and `Formula/<package>.rb.tmpl` when present)
/// into one file per release channel, and deletes the templates.
#[derive(Debug, Parser)]
#[command(name = "tapgen", version, about, long_about)]
pub struct Cli {
    /// Tap checkout containing the cask and formula directories
    #[arg(long, env = "TAPGEN_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// TOML file overriding package name and directory layout
    #[arg(long, env = "TAPGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Render and list the artifacts without writing or deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log level
    #[arg(short = 'L', long, value_enum, default_value_t = LogLevel::Info)]
    pub level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value_t = TracingFormat::Compact)]
    pub log_format: TracingFormat,
}

/// Parse command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// CLI-level error wrapping everything that can end a run.
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Failure reported by the channel publisher.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Publish(#[from] tapgen_channels::Error),

    /// Failure setting up the CLI itself (e.g. logging).
    #[error("{message}")]
    #[diagnostic(code(tapgen::cli::setup))]
    Setup {
        /// The error message
        message: String,
    },
}

impl CliError {
    /// Create a new setup error.
    #[must_use]
    pub fn setup(message: impl Into<String>) -> Self {
        Self::Setup {
            message: message.into(),
        }
    }

    /// Short machine-readable category.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Publish(tapgen_channels::Error::MissingInput { .. }) => "missing_input",
            Self::Publish(tapgen_channels::Error::InvalidVersion { .. }) => "invalid_version",
            Self::Publish(tapgen_channels::Error::TemplateShape { .. }) => "template_shape",
            Self::Publish(tapgen_channels::Error::Io { .. }) => "io",
            Self::Publish(tapgen_channels::Error::Config { .. }) => "config",
            Self::Setup { .. } => "setup",
        }
    }
}

/// Map CLI error to its exit code.
#[must_use]
pub const fn exit_code_for(_err: &CliError) -> i32 {
    EXIT_FAILURE
}

#[derive(Serialize)]
struct ErrorEnvelope {
    status: &'static str,
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
}

/// Render error to stderr, as JSON when `json_mode` is set.
#[allow(clippy::print_stderr)]
pub fn render_error(err: CliError, json_mode: bool) {
    if json_mode {
        let envelope = ErrorEnvelope {
            status: "error",
            code: err.code(),
            message: err.to_string(),
            help: err.help().map(|h| h.to_string()),
        };
        match serde_json::to_string(&envelope) {
            Ok(json) => eprintln!("{json}"),
            Err(_) => eprintln!("{err}"),
        }
    } else {
        // miette renders code, message and help
        let report = Report::new(err);
        eprintln!("{report:?}");
    }
    let _ = io::stderr().flush();
}
