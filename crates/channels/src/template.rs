//! Template kinds and per-channel rewriting.
//!
//! A template is rendered once per channel from the same in-memory source.
//! Versioned channels rewrite the package declaration and pin the installed
//! binary name; the default channel keeps the template as-is. Every render
//! is comment-stripped.
//!
//! Cask rules rewrite the first match only, while formula binary rules
//! rewrite every match since formulas carry one install block per platform.

use crate::channel::Channel;
use crate::comments::{is_comment_line, strip_comment_lines};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use regex::{NoExpand, Regex};
use std::fmt;
use std::path::Path;

/// The kinds of Homebrew definitions a tap publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// `Casks/<package>.rb`
    Cask,
    /// `Formula/<package>.rb`
    Formula,
}

impl TemplateKind {
    /// All kinds, in processing order.
    pub const ALL: [Self; 2] = [Self::Cask, Self::Formula];

    /// Lowercase name used in logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cask => "cask",
            Self::Formula => "formula",
        }
    }

    /// Whether a run must fail when this kind's template is absent.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Cask)
    }

    /// Directory (relative to the tap root) holding this kind.
    #[must_use]
    pub fn dir<'a>(&self, config: &'a TapConfig) -> &'a Path {
        match self {
            Self::Cask => &config.cask_dir,
            Self::Formula => &config.formula_dir,
        }
    }

    /// Rewrite rules applied to versioned channels of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a pattern built from the configured names
    /// does not compile.
    pub fn rules(&self, config: &TapConfig) -> Result<Vec<RewriteRule>> {
        let package = config.package.as_str();
        match self {
            Self::Cask => Ok(vec![
                RewriteRule::literal(
                    format!("cask \"{package}\" do"),
                    Replacement::CaskDeclaration {
                        package: package.to_string(),
                    },
                    Occurrence::First,
                )?,
                RewriteRule::literal(
                    format!("  binary \"{package}\""),
                    Replacement::CaskBinary {
                        package: package.to_string(),
                    },
                    Occurrence::First,
                )?,
            ]),
            Self::Formula => {
                let class = config.class_name();
                Ok(vec![
                    RewriteRule::new(
                        format!("class {class} < Formula"),
                        &format!(r"^class\s+{}\s+<\s+Formula", regex::escape(&class)),
                        Replacement::FormulaClass { class },
                        Occurrence::First,
                    )?,
                    RewriteRule::literal(
                        format!("bin.install \"{package}\""),
                        Replacement::FormulaInstall {
                            package: package.to_string(),
                        },
                        Occurrence::All,
                    )?,
                    RewriteRule::literal(
                        format!("\"#{{bin}}/{package}\""),
                        Replacement::FormulaBinPath {
                            package: package.to_string(),
                        },
                        Occurrence::All,
                    )?
                    .optional(),
                ])
            }
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How many matches a rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurrence {
    /// Only the first match in the template.
    First,
    /// Every match in the template.
    All,
}

/// Channel-qualified text substituted for a matched token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// `cask "<package>@<token>" do`
    CaskDeclaration {
        /// Package name
        package: String,
    },
    /// `  binary "<package>", target: "<package>@<version>"`
    CaskBinary {
        /// Package name
        package: String,
    },
    /// `class <Class>AT<token> < Formula`
    FormulaClass {
        /// Formula class name
        class: String,
    },
    /// `bin.install "<package>" => "<package>@<version>"`
    FormulaInstall {
        /// Package name
        package: String,
    },
    /// `"#{bin}/<package>@<version>"`
    FormulaBinPath {
        /// Package name
        package: String,
    },
}

impl Replacement {
    /// Renders the replacement for a channel.
    ///
    /// `token` is the filesystem-safe suffix; `version` is the channel's
    /// version string with dots intact, used for installed binary names.
    #[must_use]
    pub fn render(&self, token: &str, version: &str) -> String {
        match self {
            Self::CaskDeclaration { package } => format!("cask \"{package}@{token}\" do"),
            Self::CaskBinary { package } => {
                format!("  binary \"{package}\", target: \"{package}@{version}\"")
            }
            Self::FormulaClass { class } => format!("class {class}AT{token} < Formula"),
            Self::FormulaInstall { package } => {
                format!("bin.install \"{package}\" => \"{package}@{version}\"")
            }
            Self::FormulaBinPath { package } => format!("\"#{{bin}}/{package}@{version}\""),
        }
    }
}

/// A single token rewrite.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    token: String,
    pattern: Regex,
    replacement: Replacement,
    occurrence: Occurrence,
    required: bool,
}

impl RewriteRule {
    /// Creates a rule from a line-scoped regex.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `pattern` does not compile.
    pub fn new(
        token: impl Into<String>,
        pattern: &str,
        replacement: Replacement,
        occurrence: Occurrence,
    ) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            Error::config(
                format!("invalid rewrite pattern {pattern:?}: {e}"),
                "Check the configured package and class names",
            )
        })?;
        Ok(Self {
            token: token.into(),
            pattern,
            replacement,
            occurrence,
            required: true,
        })
    }

    /// Marks the rule optional: an absent token leaves the text unchanged.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Creates a rule matching `token` verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the escaped token does not compile.
    pub fn literal(
        token: impl Into<String>,
        replacement: Replacement,
        occurrence: Occurrence,
    ) -> Result<Self> {
        let token = token.into();
        let pattern = regex::escape(&token);
        Self::new(token, &pattern, replacement, occurrence)
    }

    /// The token as shown in errors.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether an absent token fails the render.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Applies the rule, returning `None` when the token is not present.
    ///
    /// Comment-only lines are never matched, so a token that survives only
    /// inside a comment counts as missing.
    #[must_use]
    pub fn apply(&self, text: &str, token: &str, version: &str) -> Option<String> {
        let replacement = self.replacement.render(token, version);
        let mut out = String::with_capacity(text.len() + replacement.len());
        let mut matched = false;

        for line in text.split_inclusive('\n') {
            let eligible = !matched || self.occurrence == Occurrence::All;
            if eligible && !is_comment_line(line) && self.pattern.is_match(line) {
                let rewritten = match self.occurrence {
                    Occurrence::First => self.pattern.replacen(line, 1, NoExpand(&replacement)),
                    Occurrence::All => self.pattern.replace_all(line, NoExpand(&replacement)),
                };
                out.push_str(&rewritten);
                matched = true;
            } else {
                out.push_str(line);
            }
        }

        matched.then_some(out)
    }
}

/// A loaded template ready to render per channel.
#[derive(Debug, Clone)]
pub struct Template {
    kind: TemplateKind,
    package: String,
    source: String,
    rules: Vec<RewriteRule>,
}

impl Template {
    /// Wraps template `source` of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the kind's rules cannot be built.
    pub fn new(kind: TemplateKind, source: impl Into<String>, config: &TapConfig) -> Result<Self> {
        Ok(Self {
            kind,
            package: config.package.clone(),
            source: source.into(),
            rules: kind.rules(config)?,
        })
    }

    /// The template kind.
    #[must_use]
    pub const fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// Renders the artifact for `channel`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateShape`] when a rule's token is absent.
    pub fn render(&self, channel: &Channel) -> Result<String> {
        let (Some(version), Some(token)) = (channel.version(), channel.token()) else {
            return Ok(strip_comment_lines(&self.source));
        };

        let mut text = self.source.clone();
        for rule in &self.rules {
            match rule.apply(&text, &token, version) {
                Some(rewritten) => text = rewritten,
                None if !rule.is_required() => {}
                None => {
                    return Err(Error::template_shape(
                        self.kind.name(),
                        channel.label(&self.package),
                        rule.token(),
                    ));
                }
            }
        }

        Ok(strip_comment_lines(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{CASK_TEMPLATE as CASK, FORMULA_TEMPLATE as FORMULA};

    fn cask() -> Template {
        Template::new(TemplateKind::Cask, CASK, &TapConfig::default()).unwrap()
    }

    fn formula() -> Template {
        Template::new(TemplateKind::Formula, FORMULA, &TapConfig::default()).unwrap()
    }

    fn full(v: &str) -> Channel {
        Channel::Full(v.to_string())
    }

    #[test]
    fn test_cask_versioned_render() {
        let out = cask().render(&full("1.2.3")).unwrap();
        assert!(out.starts_with("cask \"sentrie@1_2_3\" do\n"));
        assert!(out.contains("  binary \"sentrie\", target: \"sentrie@1.2.3\"\n"));
        assert!(out.contains("#{version}"));
        assert!(!out.contains("GoReleaser"));
    }

    #[test]
    fn test_cask_default_render_keeps_bare_names() {
        let out = cask().render(&Channel::Default).unwrap();
        assert!(out.starts_with("cask \"sentrie\" do\n"));
        assert!(out.contains("  binary \"sentrie\"\n"));
        assert!(!out.contains("target:"));
        assert!(!out.lines().any(|l| l.trim().starts_with('#')));
    }

    #[test]
    fn test_binary_target_keeps_dots() {
        let out = cask().render(&full("0.0.2+git.abc123")).unwrap();
        assert!(out.contains("cask \"sentrie@0_0_2_git_abc123\" do"));
        assert!(out.contains("target: \"sentrie@0.0.2+git.abc123\""));
    }

    #[test]
    fn test_formula_versioned_render() {
        let out = formula()
            .render(&Channel::MajorMinor("1.2".to_string()))
            .unwrap();
        assert!(out.starts_with("class SentrieAT1_2 < Formula\n"));
        assert_eq!(
            out.matches("bin.install \"sentrie\" => \"sentrie@1.2\"").count(),
            2
        );
        assert!(out.contains("system \"#{bin}/sentrie@1.2\", \"version\""));
    }

    #[test]
    fn test_formula_test_block_runs_pinned_binary() {
        let out = formula().render(&full("1.2.3")).unwrap();
        assert!(out.contains("bin.install \"sentrie\" => \"sentrie@1.2.3\""));
        assert!(out.contains("system \"#{bin}/sentrie@1.2.3\", \"version\""));
        assert!(!out.contains("\"#{bin}/sentrie\""));

        let out = formula().render(&Channel::Default).unwrap();
        assert!(out.contains("system \"#{bin}/sentrie\", \"version\""));
    }

    #[test]
    fn test_formula_without_test_block_still_renders() {
        let source = FORMULA.replace("    system \"#{bin}/sentrie\", \"version\"\n", "");
        let template = Template::new(TemplateKind::Formula, source, &TapConfig::default()).unwrap();
        let out = template.render(&full("1.2.3")).unwrap();
        assert!(out.contains("class SentrieAT1_2_3 < Formula"));
        assert!(!out.contains("#{bin}"));
    }

    #[test]
    fn test_formula_default_render() {
        let out = formula().render(&Channel::Default).unwrap();
        assert!(out.starts_with("class Sentrie < Formula\n"));
        assert!(!out.contains("=>"));
    }

    #[test]
    fn test_formula_class_with_loose_whitespace() {
        let source = FORMULA.replace("class Sentrie < Formula", "class  Sentrie\t<  Formula");
        let template = Template::new(TemplateKind::Formula, source, &TapConfig::default()).unwrap();
        let out = template.render(&full("1.0.0")).unwrap();
        assert!(out.contains("class SentrieAT1_0_0 < Formula"));
    }

    #[test]
    fn test_source_is_not_consumed() {
        let template = cask();
        let a = template.render(&full("1.2.3")).unwrap();
        let b = template.render(&Channel::Major("1".to_string())).unwrap();
        assert!(a.contains("sentrie@1_2_3"));
        assert!(b.contains("cask \"sentrie@1\" do"));
        assert!(!b.contains("1_2_3"));
    }

    fn shape_error(kind: TemplateKind, source: String) -> Error {
        Template::new(kind, source, &TapConfig::default())
            .unwrap()
            .render(&full("1.0.0"))
            .unwrap_err()
    }

    #[test]
    fn test_missing_cask_declaration() {
        let err = shape_error(TemplateKind::Cask, CASK.replace("cask \"sentrie\"", "cask \"other\""));
        assert!(matches!(err, Error::TemplateShape { ref token, .. } if token == "cask \"sentrie\" do"));
        assert!(err.to_string().contains("sentrie@1_0_0"));
    }

    #[test]
    fn test_missing_cask_binary() {
        let err = shape_error(TemplateKind::Cask, CASK.replace("  binary \"sentrie\"", ""));
        assert!(matches!(err, Error::TemplateShape { .. }));
        let err = shape_error(TemplateKind::Cask, CASK.replace("binary \"sentrie\"", "binary \"other\""));
        assert!(matches!(err, Error::TemplateShape { .. }));
    }

    #[test]
    fn test_cask_binary_requires_indentation() {
        let err = shape_error(
            TemplateKind::Cask,
            CASK.replace("  binary \"sentrie\"", "binary \"sentrie\""),
        );
        assert!(matches!(err, Error::TemplateShape { .. }));
    }

    #[test]
    fn test_token_in_comment_counts_as_missing() {
        let err = shape_error(
            TemplateKind::Cask,
            CASK.replace("  binary \"sentrie\"", "  # binary \"sentrie\""),
        );
        assert!(matches!(err, Error::TemplateShape { .. }));

        let err = shape_error(
            TemplateKind::Formula,
            FORMULA.replace(
                "class Sentrie < Formula",
                "# class Sentrie < Formula\nclass Other < Formula",
            ),
        );
        assert!(matches!(err, Error::TemplateShape { ref kind, .. } if kind == "formula"));
    }

    #[test]
    fn test_comment_before_declaration_is_skipped() {
        let source = format!("# cask \"sentrie\" do\n{CASK}");
        let template = Template::new(TemplateKind::Cask, source, &TapConfig::default()).unwrap();
        let out = template.render(&full("2.0.0")).unwrap();
        assert!(out.starts_with("cask \"sentrie@2_0_0\" do"));
    }

    #[test]
    fn test_missing_formula_class_or_install() {
        let err = shape_error(TemplateKind::Formula, FORMULA.replace("class Sentrie", "class Other"));
        assert!(matches!(err, Error::TemplateShape { .. }));
        let err = shape_error(
            TemplateKind::Formula,
            FORMULA.replace("bin.install \"sentrie\"", "bin.install \"other\""),
        );
        assert!(matches!(err, Error::TemplateShape { .. }));
    }

    #[test]
    fn test_first_occurrence_only_for_cask() {
        let source = CASK.replace(
            "  binary \"sentrie\"\n",
            "  binary \"sentrie\"\n  binary \"sentrie\"\n",
        );
        let template = Template::new(TemplateKind::Cask, source, &TapConfig::default()).unwrap();
        let out = template.render(&full("1.0.0")).unwrap();
        assert_eq!(out.matches("target:").count(), 1);
    }

    #[test]
    fn test_replacement_is_not_regex_expanded() {
        let rule = RewriteRule::literal(
            "cask \"sentrie\" do",
            Replacement::CaskDeclaration {
                package: "sentrie".to_string(),
            },
            Occurrence::First,
        )
        .unwrap();
        let out = rule.apply("cask \"sentrie\" do\n", "1_0_0", "1.0.0").unwrap();
        assert_eq!(out, "cask \"sentrie@1_0_0\" do\n");
        assert!(rule.apply("cask \"x\" do\n", "1", "1").is_none());
    }

    #[test]
    fn test_custom_package_rules() {
        let config = TapConfig::new("my-tool");
        let source = "class MyTool < Formula\n  def install\n    bin.install \"my-tool\"\n  end\nend\n";
        let template = Template::new(TemplateKind::Formula, source, &config).unwrap();
        let out = template.render(&full("3.1.4")).unwrap();
        assert!(out.contains("class MyToolAT3_1_4 < Formula"));
        assert!(out.contains("bin.install \"my-tool\" => \"my-tool@3.1.4\""));
    }

    #[test]
    fn test_kind_metadata() {
        let config = TapConfig::default();
        assert!(TemplateKind::Cask.is_required());
        assert!(!TemplateKind::Formula.is_required());
        assert_eq!(TemplateKind::Cask.dir(&config), Path::new("Casks"));
        assert_eq!(TemplateKind::Formula.to_string(), "formula");
    }
}
