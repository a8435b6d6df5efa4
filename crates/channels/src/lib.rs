//! Release-channel publishing for Homebrew taps.
//!
//! Turns a cask template (and optionally a formula template) into one
//! artifact per release channel:
//!
//! - `<package>@<X_Y_Z>.rb` for the exact version
//! - `<package>@<X_Y>.rb` and `<package>@<X>.rb` aliases, stable releases only
//! - `<package>.rb`, the unversioned latest-stable artifact
//!
//! Versioned artifacts get a channel-qualified declaration and an installed
//! binary pinned to the version; every artifact is stripped of comment-only
//! lines. Templates are deleted once their artifacts are written.
//!
//! # Example
//!
//! ```rust,ignore
//! use tapgen_channels::{Publisher, ReleaseInputs, TapConfig};
//!
//! let inputs = ReleaseInputs::from_env()?;
//! let publisher = Publisher::new(TapConfig::default(), ".");
//! let report = publisher.run(&inputs.version()?)?;
//! ```

#![warn(missing_docs)]

pub mod channel;
pub mod comments;
pub mod config;
pub mod error;
pub mod inputs;
pub mod publish;
pub mod template;
pub mod token;
pub mod version;

#[cfg(test)]
mod test_fixtures;

pub use channel::{Channel, channels_for};
pub use comments::strip_comment_lines;
pub use config::TapConfig;
pub use error::{Error, Result};
pub use inputs::ReleaseInputs;
pub use publish::{PlannedFile, PublishPlan, PublishReport, Publisher};
pub use template::{Occurrence, Replacement, RewriteRule, Template, TemplateKind};
pub use token::token_suffix;
pub use version::ReleaseVersion;
