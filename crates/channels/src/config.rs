//! Publisher configuration.
//!
//! Every field has a default matching the `sentrie` tap layout, so a missing
//! config file is equivalent to an empty one.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default package name.
pub const DEFAULT_PACKAGE: &str = "sentrie";

/// Tap layout and naming configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TapConfig {
    /// Package (and installed binary) name.
    pub package: String,
    /// Formula class name. Derived from `package` when unset.
    #[serde(rename = "className")]
    pub class_name: Option<String>,
    /// Directory holding the cask template and outputs.
    #[serde(rename = "caskDir")]
    pub cask_dir: PathBuf,
    /// Directory holding the formula template and outputs.
    #[serde(rename = "formulaDir")]
    pub formula_dir: PathBuf,
    /// Extension of template files, appended to the package name.
    #[serde(rename = "templateExtension")]
    pub template_extension: String,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            class_name: None,
            cask_dir: PathBuf::from("Casks"),
            formula_dir: PathBuf::from("Formula"),
            template_extension: "rb.tmpl".to_string(),
        }
    }
}

impl TapConfig {
    /// Creates a configuration for `package` with default directories.
    #[must_use]
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            ..Self::default()
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed, or if
    /// the resulting package name is empty.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(
                format!("failed to read {}: {e}", path.display()),
                "Pass an existing file to --config",
            )
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            Error::config(
                format!("failed to parse {}: {e}", path.display()),
                "Expected keys: package, className, caskDir, formulaDir, templateExtension",
            )
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the package name is usable in file names and tokens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the package name is empty or contains
    /// a path separator or quote.
    pub fn validate(&self) -> Result<()> {
        if self.package.is_empty()
            || self
                .package
                .chars()
                .any(|c| matches!(c, '/' | '\\' | '"' | '@') || c.is_whitespace())
        {
            return Err(Error::config(
                format!("invalid package name: {:?}", self.package),
                "Package names must be non-empty and contain no '/', '\\', '\"', '@' or whitespace",
            ));
        }
        Ok(())
    }

    /// Formula class name, e.g. `Sentrie` for `sentrie`.
    #[must_use]
    pub fn class_name(&self) -> String {
        self.class_name
            .clone()
            .unwrap_or_else(|| class_name_for(&self.package))
    }

    /// Template file name, e.g. `sentrie.rb.tmpl`.
    #[must_use]
    pub fn template_file_name(&self) -> String {
        format!("{}.{}", self.package, self.template_extension)
    }
}

/// Homebrew class form of a package name: `my-tool` -> `MyTool`.
#[must_use]
pub fn class_name_for(package: &str) -> String {
    package
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect()
}
