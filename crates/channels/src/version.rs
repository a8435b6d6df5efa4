//! Release version parsing and validation.
//!
//! Versions arrive as `MAJOR.MINOR.PATCH`, optionally prefixed with `v` and
//! optionally followed by a `-prerelease` and/or `+build` suffix. Only
//! prereleases may carry a suffix.

use crate::error::{Error, Result};
use std::fmt;

/// A validated release version.
///
/// Components are kept as the literal digit strings from the input, so
/// `01.2.3` stays `01.2.3` in every derived channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    full: String,
    major: String,
    minor: String,
    patch: String,
    prerelease: bool,
}

impl ReleaseVersion {
    /// Parses and validates a raw version string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVersion`] when the core is not three
    /// dot-separated digit strings, or when a stable release carries a
    /// prerelease/build suffix.
    pub fn parse(raw: &str, prerelease: bool) -> Result<Self> {
        let full = raw.strip_prefix('v').unwrap_or(raw);

        let core = full
            .split_once(['-', '+'])
            .map_or(full, |(core, _suffix)| core);

        let parts: Vec<&str> = core.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(Error::invalid_version(raw, "expected MAJOR.MINOR.PATCH"));
        };
        if !parts.iter().all(|p| is_digits(p)) {
            return Err(Error::invalid_version(
                raw,
                "version components must be non-negative integers",
            ));
        }

        if !prerelease && full != core {
            return Err(Error::invalid_version(raw, "stable releases must be X.Y.Z"));
        }

        Ok(Self {
            full: full.to_string(),
            major: (*major).to_string(),
            minor: (*minor).to_string(),
            patch: (*patch).to_string(),
            prerelease,
        })
    }

    /// The version without a leading `v`, suffixes included.
    #[must_use]
    pub fn full(&self) -> &str {
        &self.full
    }

    /// `MAJOR.MINOR.PATCH` only.
    #[must_use]
    pub fn core(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// Major component.
    #[must_use]
    pub fn major(&self) -> &str {
        &self.major
    }

    /// Minor component.
    #[must_use]
    pub fn minor(&self) -> &str {
        &self.minor
    }

    /// `MAJOR.MINOR`.
    #[must_use]
    pub fn major_minor(&self) -> String {
        format!("{}.{}", self.major, self.minor)
    }

    /// Whether this release was flagged as a prerelease.
    #[must_use]
    pub const fn is_prerelease(&self) -> bool {
        self.prerelease
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
