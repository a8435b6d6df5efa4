//! Planning and writing channel artifacts.
//!
//! Publishing happens in two steps. [`Publisher::plan`] loads the templates
//! and renders every artifact in memory, so a template that fails to rewrite
//! stops the run before anything touches disk. [`PublishPlan::execute`] then
//! writes the artifacts and removes the consumed templates.

use crate::channel::{Channel, channels_for};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::template::{Template, TemplateKind};
use crate::version::ReleaseVersion;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A rendered artifact waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Template kind it was rendered from.
    pub kind: TemplateKind,
    /// Channel it publishes.
    pub channel: Channel,
    /// Destination path.
    pub path: PathBuf,
    /// File contents.
    pub content: String,
}

/// Everything a run will write and delete.
#[derive(Debug, Clone, Default)]
pub struct PublishPlan {
    /// Artifacts in write order.
    pub files: Vec<PlannedFile>,
    /// Templates consumed by this plan, deleted after their artifacts land.
    pub templates: Vec<(TemplateKind, PathBuf)>,
    /// Optional kinds skipped because their template was absent.
    pub skipped: Vec<TemplateKind>,
}

/// Outcome of an executed plan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    /// Files written, in order.
    pub written: Vec<PathBuf>,
    /// Templates deleted.
    pub removed: Vec<PathBuf>,
    /// Optional kinds that were skipped.
    pub skipped: Vec<TemplateKind>,
}

impl PublishPlan {
    /// Planned files of one kind.
    pub fn files_for(&self, kind: TemplateKind) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// Writes every planned file, then deletes each kind's template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a write or delete fails.
    pub fn execute(self) -> Result<PublishReport> {
        let mut report = PublishReport {
            skipped: self.skipped,
            ..PublishReport::default()
        };

        for (kind, template_path) in self.templates {
            for file in self.files.iter().filter(|f| f.kind == kind) {
                std::fs::write(&file.path, &file.content)
                    .map_err(|e| Error::io("write", &file.path, e))?;
                info!(kind = %kind, channel = %file.channel, path = %file.path.display(), "wrote");
                report.written.push(file.path.clone());
            }

            // A template named like its default artifact has already been overwritten.
            if report.written.contains(&template_path) {
                continue;
            }
            std::fs::remove_file(&template_path)
                .map_err(|e| Error::io("remove", &template_path, e))?;
            debug!(kind = %kind, path = %template_path.display(), "removed template");
            report.removed.push(template_path);
        }

        Ok(report)
    }
}

/// Renders and publishes channel artifacts for a tap checkout.
#[derive(Debug, Clone)]
pub struct Publisher {
    config: TapConfig,
    root: PathBuf,
}

impl Publisher {
    /// Creates a publisher rooted at `root` (the tap checkout).
    #[must_use]
    pub fn new(config: TapConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &TapConfig {
        &self.config
    }

    /// Template path for `kind`.
    #[must_use]
    pub fn template_path(&self, kind: TemplateKind) -> PathBuf {
        self.kind_dir(kind).join(self.config.template_file_name())
    }

    fn kind_dir(&self, kind: TemplateKind) -> PathBuf {
        self.root.join(kind.dir(&self.config))
    }

    /// Renders every artifact for `version` without touching disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] if the cask directory or template is
    /// absent, [`Error::TemplateShape`] if any template cannot be rewritten,
    /// and [`Error::Io`] if a template cannot be read.
    pub fn plan(&self, version: &ReleaseVersion) -> Result<PublishPlan> {
        let channels = channels_for(version);
        let mut plan = PublishPlan::default();

        for kind in TemplateKind::ALL {
            let Some(template_path) = self.locate_template(kind)? else {
                warn!(kind = %kind, "template not found, skipping");
                plan.skipped.push(kind);
                continue;
            };

            let source = std::fs::read_to_string(&template_path)
                .map_err(|e| Error::io("read", &template_path, e))?;
            let template = Template::new(kind, source, &self.config)?;
            let dir = self.kind_dir(kind);

            for channel in &channels {
                let content = template.render(channel)?;
                let path = dir.join(channel.file_name(&self.config.package));
                debug!(kind = %kind, channel = %channel, path = %path.display(), "rendered");
                plan.files.push(PlannedFile {
                    kind,
                    channel: channel.clone(),
                    path,
                    content,
                });
            }
            plan.templates.push((kind, template_path));
        }

        Ok(plan)
    }

    /// Plans and executes a run.
    ///
    /// # Errors
    ///
    /// See [`Publisher::plan`] and [`PublishPlan::execute`].
    pub fn run(&self, version: &ReleaseVersion) -> Result<PublishReport> {
        info!(
            version = %version,
            prerelease = version.is_prerelease(),
            root = %self.root.display(),
            "publishing channels"
        );
        self.plan(version)?.execute()
    }

    /// Finds the template for `kind`; `None` only for optional kinds.
    fn locate_template(&self, kind: TemplateKind) -> Result<Option<PathBuf>> {
        let dir = self.kind_dir(kind);
        let path = self.template_path(kind);

        if !dir.is_dir() {
            return missing(kind, format!("base dir not found: {}", dir.display()), &dir);
        }
        if !path.is_file() {
            return missing(
                kind,
                format!("{kind} template not found: {}", path.display()),
                &path,
            );
        }
        Ok(Some(path))
    }
}

fn missing(kind: TemplateKind, what: String, path: &Path) -> Result<Option<PathBuf>> {
    if kind.is_required() {
        Err(Error::missing_input(
            what,
            format!(
                "Generate {} before publishing; templates are deleted after each run",
                path.display()
            ),
        ))
    } else {
        Ok(None)
    }
}
