//! Release channels derived from a version.

use crate::token::token_suffix;
use crate::version::ReleaseVersion;
use std::fmt;

/// A release stream that gets its own installable artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The exact version, suffixes included (e.g. `1.2.3-rc.1`).
    Full(String),
    /// `MAJOR.MINOR` alias, stable releases only.
    MajorMinor(String),
    /// `MAJOR` alias, stable releases only.
    Major(String),
    /// The unversioned latest-stable artifact.
    Default,
}

impl Channel {
    /// The version string this channel pins, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Full(v) | Self::MajorMinor(v) | Self::Major(v) => Some(v),
            Self::Default => None,
        }
    }

    /// Token suffix used in filenames and identifiers.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.version().map(token_suffix)
    }

    /// Output filename for `package` on this channel.
    #[must_use]
    pub fn file_name(&self, package: &str) -> String {
        match self.token() {
            Some(token) => format!("{package}@{token}.rb"),
            None => format!("{package}.rb"),
        }
    }

    /// Human-readable label used in logs and errors.
    #[must_use]
    pub fn label(&self, package: &str) -> String {
        match self.token() {
            Some(token) => format!("{package}@{token}"),
            None => package.to_string(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full(v) => write!(f, "full ({v})"),
            Self::MajorMinor(v) => write!(f, "minor ({v})"),
            Self::Major(v) => write!(f, "major ({v})"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Channels to publish for a version, in write order.
///
/// Prereleases only get their exact version; they never take the default
/// slot or the `MAJOR`/`MAJOR.MINOR` aliases.
#[must_use]
pub fn channels_for(version: &ReleaseVersion) -> Vec<Channel> {
    let mut channels = vec![Channel::Full(version.full().to_string())];
    if !version.is_prerelease() {
        channels.push(Channel::Default);
        channels.push(Channel::MajorMinor(version.major_minor()));
        channels.push(Channel::Major(version.major().to_string()));
    }
    channels
}
