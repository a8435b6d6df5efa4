//! tapgen: publish versioned Homebrew casks and formulas.
//!
//! The binary is a thin shell around [`tapgen_channels`]: it parses flags,
//! sets up tracing, reads `VERSION`/`PRERELEASE`, and maps failures to exit
//! codes.

#![warn(missing_docs)]

pub mod cli;
pub mod run;
pub mod tracing;

pub use cli::{Cli, CliError, EXIT_FAILURE, EXIT_OK};
pub use run::{Outcome, execute};
