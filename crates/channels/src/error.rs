//! Error types for channel publishing.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for channel publishing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or publishing channel artifacts.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// A required input (environment variable, directory, template) is absent.
    #[error("Missing input: {what}")]
    #[diagnostic(code(tapgen::channels::missing_input), help("{help}"))]
    MissingInput {
        /// Description of the missing input
        what: String,
        /// Help text for the user
        help: String,
    },

    /// The version string is malformed or not allowed for this release type.
    #[error("Invalid VERSION: {version} - {reason}")]
    #[diagnostic(
        code(tapgen::channels::invalid_version),
        help("VERSION must be X.Y.Z with an optional leading 'v'; suffixes like -rc.1 or +build require PRERELEASE=true")
    )]
    InvalidVersion {
        /// The raw version string
        version: String,
        /// Why it was rejected
        reason: String,
    },

    /// A template no longer contains a token the rewriter depends on.
    #[error("failed to rewrite {kind} for {channel}: expected token not found: {token}")]
    #[diagnostic(
        code(tapgen::channels::template_shape),
        help("The template must contain the token verbatim on a non-comment line")
    )]
    TemplateShape {
        /// Template kind ("cask" or "formula")
        kind: String,
        /// Channel label the render was for
        channel: String,
        /// The token that was not found
        token: String,
    },

    /// Reading, writing or deleting a file failed.
    #[error("I/O error: failed to {operation} {}", path.display())]
    #[diagnostic(
        code(tapgen::channels::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// The operation that failed
        operation: &'static str,
        /// The path involved
        path: PathBuf,
        /// The underlying source error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be loaded.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(tapgen::channels::config), help("{help}"))]
    Config {
        /// The error message
        message: String,
        /// Help text for the user
        help: String,
    },
}

impl Error {
    /// Create a new missing input error.
    #[must_use]
    pub fn missing_input(what: impl Into<String>, help: impl Into<String>) -> Self {
        Self::MissingInput {
            what: what.into(),
            help: help.into(),
        }
    }

    /// Create a new invalid version error.
    #[must_use]
    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }

    /// Create a new template shape error.
    #[must_use]
    pub fn template_shape(
        kind: impl Into<String>,
        channel: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::TemplateShape {
            kind: kind.into(),
            channel: channel.into(),
            token: token.into(),
        }
    }

    /// Create a new I/O error.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create a new configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            help: help.into(),
        }
    }
}
