//! Release inputs read from the environment.

use crate::error::{Error, Result};
use crate::version::ReleaseVersion;

/// Environment variable holding the release version.
pub const VERSION_VAR: &str = "VERSION";
/// Environment variable holding the prerelease flag.
pub const PRERELEASE_VAR: &str = "PRERELEASE";

/// Raw release inputs as provided by the release pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInputs {
    /// The raw version string, e.g. `v1.2.3`.
    pub version: String,
    /// Whether the release is a prerelease.
    pub prerelease: bool,
}

impl ReleaseInputs {
    /// Reads `VERSION` and `PRERELEASE` from the process environment.
    ///
    /// Both variables are required and must be non-empty. `PRERELEASE` is
    /// true only for the literal `true`; any other value is a stable release.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] when either variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let version = require_var(VERSION_VAR)?;
        let prerelease = require_var(PRERELEASE_VAR)?;
        Ok(Self {
            version,
            prerelease: parse_prerelease(&prerelease),
        })
    }

    /// Validates the version against the prerelease flag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] if the version is malformed.
    pub fn version(&self) -> Result<ReleaseVersion> {
        ReleaseVersion::parse(&self.version, self.prerelease)
    }
}

/// `true` only for the literal string `"true"`.
#[must_use]
pub fn parse_prerelease(value: &str) -> bool {
    value == "true"
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_input(
            format!("{name} env var is required"),
            format!("Set {name} before running, e.g. VERSION=v1.2.3 PRERELEASE=false"),
        )),
    }
}
