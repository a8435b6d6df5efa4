//! A single publishing run.

use crate::cli::{Cli, CliError};
use std::path::PathBuf;
use tapgen_channels::{PublishPlan, Publisher, ReleaseInputs, TapConfig};
use tracing::{info, instrument};

/// What a run did (or would do, for a dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Files were written and templates removed.
    Published {
        /// Written artifacts, in order
        written: Vec<PathBuf>,
        /// Deleted templates
        removed: Vec<PathBuf>,
    },
    /// Nothing was touched; these files would be written.
    DryRun {
        /// Planned artifacts, in order
        planned: Vec<PathBuf>,
    },
}

impl Outcome {
    /// Paths to report on stdout.
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            Self::Published { written, .. } => written,
            Self::DryRun { planned } => planned,
        }
    }
}

/// Loads configuration, reads the release inputs and publishes.
///
/// # Errors
///
/// Returns a [`CliError`] wrapping any publisher failure.
#[instrument(skip_all, fields(root = %cli.root.display(), dry_run = cli.dry_run))]
pub fn execute(cli: &Cli) -> Result<Outcome, CliError> {
    let config = match &cli.config {
        Some(path) => TapConfig::load(path)?,
        None => TapConfig::default(),
    };

    let inputs = ReleaseInputs::from_env()?;
    let version = inputs.version()?;
    let publisher = Publisher::new(config, &cli.root);

    if cli.dry_run {
        let plan = publisher.plan(&version)?;
        log_plan(&plan);
        return Ok(Outcome::DryRun {
            planned: plan.files.into_iter().map(|f| f.path).collect(),
        });
    }

    let report = publisher.run(&version)?;
    info!(
        written = report.written.len(),
        removed = report.removed.len(),
        "publish complete"
    );
    Ok(Outcome::Published {
        written: report.written,
        removed: report.removed,
    })
}

fn log_plan(plan: &PublishPlan) {
    for file in &plan.files {
        info!(kind = %file.kind, channel = %file.channel, path = %file.path.display(), "would write");
    }
    for (kind, path) in &plan.templates {
        info!(kind = %kind, path = %path.display(), "would remove template");
    }
}
