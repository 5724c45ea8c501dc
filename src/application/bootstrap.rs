//! Deployment bootstrapper.
//!
//! Brings a deployment root to a ready state in a fixed step sequence:
//! runtime check, directories, manifest check, image build, config file,
//! config block and model catalog. Each step is idempotent, so a rerun after
//! fixing a failure converges on the same end state. Steps never retry and
//! never roll back.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::domain::{Catalog, Layout, MarkerBlock, Stage};
use crate::error::{BootstrapError, BootstrapResult, Error, Result};
use crate::port::{ContainerRuntime, Filesystem};

/// Whether a step changed anything on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Unchanged,
    /// Left alone because the operator already set a conflicting value.
    Skipped,
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Result of ensuring one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOutcome {
    pub path: PathBuf,
    pub outcome: Outcome,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub directories: Vec<DirectoryOutcome>,
    pub config: Outcome,
    pub marker: Outcome,
    pub catalog: Outcome,
}

/// Prepares a deployment root for the containerized service.
pub struct Bootstrapper<R, F> {
    layout: Layout,
    marker: MarkerBlock,
    runtime: R,
    fs: F,
}

impl<R, F> Bootstrapper<R, F>
where
    R: ContainerRuntime,
    F: Filesystem,
{
    pub fn new(layout: Layout, marker: MarkerBlock, runtime: R, fs: F) -> Self {
        Self {
            layout,
            marker,
            runtime,
            fs,
        }
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn marker(&self) -> &MarkerBlock {
        &self.marker
    }

    #[must_use]
    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    /// Run every step in order.
    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Run every step in order, reporting each stage as it is entered.
    ///
    /// `on_stage` sees every working stage, then `Done` or `Failed`.
    pub fn run_with(&self, mut on_stage: impl FnMut(Stage)) -> Result<RunReport> {
        info!(root = %self.layout.root().display(), "Bootstrap starting");

        let mut stage = Stage::CheckingPrerequisite;
        let result = (|| -> BootstrapResult<RunReport> {
            enter(&mut stage, Stage::CheckingPrerequisite, &mut on_stage);
            self.check_prerequisite()?;

            enter(&mut stage, Stage::CreatingDirectories, &mut on_stage);
            let directories =
                self.ensure_directories(&self.layout.directories(), self.layout.dir_mode())?;

            enter(&mut stage, Stage::ValidatingManifest, &mut on_stage);
            self.ensure_build_manifest_present(&self.layout.manifest())?;

            enter(&mut stage, Stage::Building, &mut on_stage);
            self.build_image(self.layout.manifest_relative())?;

            enter(&mut stage, Stage::EnsuringConfig, &mut on_stage);
            let config = self.ensure_config_file(&self.layout.config(), &self.layout.template())?;
            let marker = self.ensure_config_marker(&self.layout.config(), &self.marker)?;
            let catalog = self.ensure_model_catalog(&self.layout.catalog())?;

            Ok(RunReport {
                directories,
                config,
                marker,
                catalog,
            })
        })();

        match result {
            Ok(report) => {
                on_stage(Stage::Done);
                info!("Bootstrap complete");
                Ok(report)
            }
            Err(source) => {
                error!(stage = %stage, error = %source, "Bootstrap stopped");
                on_stage(Stage::Failed);
                Err(Error::Stage { stage, source })
            }
        }
    }

    /// Check the runtime and the manifest without changing anything.
    pub fn preflight(&self) -> Result<()> {
        self.check_prerequisite().map_err(|source| Error::Stage {
            stage: Stage::CheckingPrerequisite,
            source,
        })?;
        self.ensure_build_manifest_present(&self.layout.manifest())
            .map_err(|source| Error::Stage {
                stage: Stage::ValidatingManifest,
                source,
            })
    }

    /// Verify the container runtime daemon is reachable.
    pub fn check_prerequisite(&self) -> BootstrapResult<()> {
        self.runtime.ping()?;
        info!(runtime = self.runtime.name(), "Container runtime reachable");
        Ok(())
    }

    /// Create each directory if absent, then set `mode` on it.
    ///
    /// Paths are handled in the given order, so parents must precede
    /// children. Anything other than a directory at a path is an error.
    pub fn ensure_directories(
        &self,
        paths: &[PathBuf],
        mode: u32,
    ) -> BootstrapResult<Vec<DirectoryOutcome>> {
        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            let outcome = if self.fs.is_dir(path) {
                Outcome::Unchanged
            } else if self.fs.exists(path) {
                return Err(BootstrapError::filesystem(
                    path,
                    io::Error::new(io::ErrorKind::AlreadyExists, "exists but is not a directory"),
                ));
            } else {
                self.fs
                    .create_dir(path)
                    .map_err(|e| BootstrapError::filesystem(path, e))?;
                Outcome::Applied
            };
            self.fs
                .set_mode(path, mode)
                .map_err(|e| BootstrapError::filesystem(path, e))?;
            debug!(path = %path.display(), mode = %format!("{mode:o}"), ?outcome, "Directory ensured");
            outcomes.push(DirectoryOutcome {
                path: path.clone(),
                outcome,
            });
        }
        Ok(outcomes)
    }

    /// Create the missing directories between the root and the parent of
    /// `path`, outermost first.
    pub fn ensure_parent_directories(&self, path: &Path) -> BootstrapResult<Vec<DirectoryOutcome>> {
        let root = self.layout.root();
        let Some(parent) = path.parent() else {
            return Ok(Vec::new());
        };
        let mut chain = parent
            .ancestors()
            .take_while(|dir| *dir != root && dir.starts_with(root))
            .map(Path::to_path_buf)
            .collect::<Vec<_>>();
        chain.reverse();
        self.ensure_directories(&chain, self.layout.dir_mode())
    }

    /// Fail unless the build manifest exists. Nothing here can repair it.
    pub fn ensure_build_manifest_present(&self, path: &Path) -> BootstrapResult<()> {
        if self.fs.exists(path) {
            Ok(())
        } else {
            Err(BootstrapError::MissingRequiredFile {
                path: path.to_path_buf(),
            })
        }
    }

    /// Build the container image from the manifest.
    pub fn build_image(&self, manifest: &Path) -> BootstrapResult<()> {
        info!(manifest = %manifest.display(), "Building image");
        self.runtime.build(manifest)
    }

    /// Seed `path` from `template` when it does not exist yet.
    ///
    /// An existing config is never touched. A missing template is an error;
    /// no empty config is ever created.
    pub fn ensure_config_file(&self, path: &Path, template: &Path) -> BootstrapResult<Outcome> {
        if self.fs.exists(path) {
            debug!(path = %path.display(), "Config file present");
            return Ok(Outcome::Unchanged);
        }
        if !self.fs.exists(template) {
            return Err(BootstrapError::MissingRequiredFile {
                path: template.to_path_buf(),
            });
        }
        self.fs
            .copy_new(template, path)
            .map_err(|e| BootstrapError::filesystem(path, e))?;
        info!(path = %path.display(), template = %template.display(), "Config file seeded");
        Ok(Outcome::Applied)
    }

    /// Append `block` to the config unless its marker line is already there.
    ///
    /// A config assigning `custom_model_id` a different value is skipped;
    /// a second assignment would not parse.
    pub fn ensure_config_marker(&self, path: &Path, block: &MarkerBlock) -> BootstrapResult<Outcome> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| BootstrapError::filesystem(path, e))?;

        if block.is_present_in(&content) {
            debug!(path = %path.display(), "Custom model block already present");
            return Ok(Outcome::Unchanged);
        }
        if let Some(existing) = block.existing_assignment(&content) {
            warn!(
                path = %path.display(),
                existing,
                wanted = block.model_id(),
                "Config already sets a custom model, block not appended"
            );
            return Ok(Outcome::Skipped);
        }

        self.fs
            .append(path, &block.append_text(&content))
            .map_err(|e| BootstrapError::filesystem(path, e))?;
        info!(path = %path.display(), model_id = block.model_id(), "Custom model block appended");
        Ok(Outcome::Applied)
    }

    /// Write the default model catalog when none exists.
    pub fn ensure_model_catalog(&self, path: &Path) -> BootstrapResult<Outcome> {
        if self.fs.exists(path) {
            debug!(path = %path.display(), "Model catalog present");
            return Ok(Outcome::Unchanged);
        }
        self.write_catalog(path, false)?;
        Ok(Outcome::Applied)
    }

    /// Write the default model catalog, replacing an existing one only when
    /// `overwrite` is set.
    pub fn write_catalog(&self, path: &Path, overwrite: bool) -> BootstrapResult<()> {
        let json = Catalog::default()
            .to_json()
            .map_err(|e| BootstrapError::filesystem(path, std::io::Error::other(e)))?;
        self.fs
            .write(path, &json, overwrite)
            .map_err(|e| BootstrapError::filesystem(path, e))?;
        info!(path = %path.display(), "Model catalog written");
        Ok(())
    }

    /// Start the deployment in the background.
    pub fn start_services(&self) -> BootstrapResult<()> {
        info!(manifest = %self.layout.manifest_relative().display(), "Starting services");
        self.runtime.start(self.layout.manifest_relative())
    }
}

fn enter(current: &mut Stage, next: Stage, on_stage: &mut impl FnMut(Stage)) {
    *current = next;
    info!(stage = %next, "Entering stage");
    on_stage(next);
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::adapter::outbound::LocalFs;
    use crate::testkit::runtime::{RuntimeCall, ScriptedRuntime};

    const TEMPLATE: &str = "[app]\nllm_provider = \"openai\"\n";

    fn seeded_root() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        crate::testkit::deployment::seed(dir.path(), TEMPLATE).expect("seed deployment");
        dir
    }

    fn bootstrapper(root: &Path, runtime: ScriptedRuntime) -> Bootstrapper<ScriptedRuntime, LocalFs> {
        Bootstrapper::new(Layout::new(root), MarkerBlock::default(), runtime, LocalFs)
    }

    #[test]
    fn run_reports_stages_in_order() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());

        let mut seen = Vec::new();
        boot.run_with(|stage| seen.push(stage)).expect("run");

        let mut expected = Stage::SEQUENCE.to_vec();
        expected.push(Stage::Done);
        assert_eq!(seen, expected);
    }

    #[test]
    fn failed_ping_stops_before_any_change() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::unreachable());

        let mut seen = Vec::new();
        let err = boot.run_with(|stage| seen.push(stage)).expect_err("should fail");

        assert!(matches!(
            err,
            Error::Stage {
                stage: Stage::CheckingPrerequisite,
                source: BootstrapError::PrerequisiteUnavailable { .. },
            }
        ));
        assert_eq!(seen, vec![Stage::CheckingPrerequisite, Stage::Failed]);
        assert!(!root.path().join("models").exists());
        assert!(!root.path().join("config.toml").exists());
    }

    #[test]
    fn build_failure_keeps_directories_and_skips_config() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::failing_build(3));

        let err = boot.run().expect_err("should fail");

        assert_eq!(err.exit_code(), 3);
        assert!(root.path().join("storage/tasks").is_dir());
        assert!(!root.path().join("config.toml").exists());
    }

    #[test]
    fn build_uses_manifest_relative_to_root() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        boot.run().expect("run");

        assert_eq!(
            boot.runtime().calls(),
            vec![
                RuntimeCall::Ping,
                RuntimeCall::Build(PathBuf::from("docker-compose.custom-models.yml")),
            ]
        );
    }

    #[test]
    fn second_run_changes_nothing() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());

        let first = boot.run().expect("first run");
        assert!(first.config.is_applied());
        assert!(first.marker.is_applied());
        assert!(first.catalog.is_applied());

        let second = boot.run().expect("second run");
        assert_eq!(second.config, Outcome::Unchanged);
        assert_eq!(second.marker, Outcome::Unchanged);
        assert_eq!(second.catalog, Outcome::Unchanged);
        assert!(second
            .directories
            .iter()
            .all(|dir| dir.outcome == Outcome::Unchanged));
    }

    #[test]
    fn config_file_is_template_copy() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let layout = boot.layout().clone();

        let outcome = boot
            .ensure_config_file(&layout.config(), &layout.template())
            .expect("seed config");

        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(fs::read_to_string(layout.config()).expect("read"), TEMPLATE);
    }

    #[test]
    fn missing_template_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir");
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let layout = boot.layout().clone();

        let err = boot
            .ensure_config_file(&layout.config(), &layout.template())
            .expect_err("should fail");

        assert!(matches!(err, BootstrapError::MissingRequiredFile { ref path } if *path == layout.template()));
        assert!(!layout.config().exists());
    }

    #[test]
    fn marker_append_is_exactly_once() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let config = root.path().join("config.toml");
        fs::write(&config, TEMPLATE).expect("write config");

        let block = MarkerBlock::default();
        assert_eq!(boot.ensure_config_marker(&config, &block).expect("append"), Outcome::Applied);
        assert_eq!(boot.ensure_config_marker(&config, &block).expect("noop"), Outcome::Unchanged);

        let content = fs::read_to_string(&config).expect("read");
        assert_eq!(content.matches(&block.marker_line()).count(), 1);
        assert!(content.starts_with(TEMPLATE));
    }

    #[test]
    fn conflicting_model_id_is_not_appended() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let config = root.path().join("config.toml");
        let edited = format!("{TEMPLATE}custom_model_id = \"microsoft/DialoGPT-small\"\n");
        fs::write(&config, &edited).expect("write config");

        let outcome = boot
            .ensure_config_marker(&config, &MarkerBlock::default())
            .expect("marker");

        assert_eq!(outcome, Outcome::Skipped);
        assert!(!outcome.is_applied());
        assert_eq!(fs::read_to_string(&config).expect("read"), edited);
    }

    #[test]
    fn file_in_place_of_directory_fails() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let models = root.path().join("models");
        fs::write(&models, "not a directory").expect("write file");

        let err = boot
            .ensure_directories(&[models.clone()], 0o755)
            .expect_err("should fail");

        assert!(matches!(err, BootstrapError::Filesystem { ref path, .. } if *path == models));
        assert!(models.is_file());
    }

    #[test]
    fn parent_directories_are_created_outermost_first() {
        let root = tempfile::tempdir().expect("temp dir");
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        fs::create_dir(root.path().join("data")).expect("data");

        let outcomes = boot
            .ensure_parent_directories(&root.path().join("data/cache/catalog.json"))
            .expect("parents");

        assert_eq!(
            outcomes,
            vec![
                DirectoryOutcome {
                    path: root.path().join("data"),
                    outcome: Outcome::Unchanged,
                },
                DirectoryOutcome {
                    path: root.path().join("data/cache"),
                    outcome: Outcome::Applied,
                },
            ]
        );
        assert!(root.path().join("data/cache").is_dir());
    }

    #[test]
    fn parent_of_file_at_root_needs_nothing() {
        let root = tempfile::tempdir().expect("temp dir");
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());

        let outcomes = boot
            .ensure_parent_directories(&root.path().join("catalog.json"))
            .expect("parents");

        assert!(outcomes.is_empty());
    }

    #[test]
    fn preflight_does_not_touch_disk() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());

        boot.preflight().expect("preflight");

        assert!(!root.path().join("models").exists());
        assert!(!root.path().join("config.toml").exists());
        assert_eq!(boot.runtime().calls(), vec![RuntimeCall::Ping]);
    }

    #[test]
    fn write_catalog_refuses_overwrite_by_default() {
        let root = seeded_root();
        let boot = bootstrapper(root.path(), ScriptedRuntime::healthy());
        let catalog = root.path().join("catalog.json");
        fs::write(&catalog, "{}").expect("write catalog");

        assert!(boot.write_catalog(&catalog, false).is_err());
        assert_eq!(fs::read_to_string(&catalog).expect("read"), "{}");

        boot.write_catalog(&catalog, true).expect("overwrite");
        assert!(fs::read_to_string(&catalog).expect("read").contains("DialoGPT"));
    }
}
