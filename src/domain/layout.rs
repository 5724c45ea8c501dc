//! Deployment directory layout.
//!
//! Every path is stored relative to the deployment root and resolved against
//! it on demand, so nothing depends on the process working directory.

use std::path::{Path, PathBuf};

pub const MODELS_DIR: &str = "models";
pub const STORAGE_DIR: &str = "storage";
pub const TASKS_DIR: &str = "storage/tasks";

/// Read/execute for everyone, write for the owner.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

pub const DEFAULT_MANIFEST: &str = "docker-compose.custom-models.yml";
pub const DEFAULT_CONFIG: &str = "config.toml";
pub const DEFAULT_TEMPLATE: &str = "config.example.toml";
pub const DEFAULT_CATALOG: &str = "models/model_configs.json";

/// Paths the bootstrapper creates, checks and edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    directories: Vec<PathBuf>,
    dir_mode: u32,
    manifest: PathBuf,
    config: PathBuf,
    template: PathBuf,
    catalog: PathBuf,
}

impl Layout {
    /// Default layout under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directories: [MODELS_DIR, STORAGE_DIR, TASKS_DIR]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            dir_mode: DEFAULT_DIR_MODE,
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            config: PathBuf::from(DEFAULT_CONFIG),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            catalog: PathBuf::from(DEFAULT_CATALOG),
        }
    }

    /// Replace the directory sequence. Order is kept as given.
    #[must_use]
    pub fn with_directories<I, P>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.directories = directories.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    #[must_use]
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: impl Into<PathBuf>) -> Self {
        self.config = config.into();
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = template.into();
        self
    }

    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<PathBuf>) -> Self {
        self.catalog = catalog.into();
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn dir_mode(&self) -> u32 {
        self.dir_mode
    }

    /// Directories in creation order, resolved against the root.
    #[must_use]
    pub fn directories(&self) -> Vec<PathBuf> {
        self.directories.iter().map(|dir| self.resolve(dir)).collect()
    }

    #[must_use]
    pub fn manifest(&self) -> PathBuf {
        self.resolve(&self.manifest)
    }

    /// Manifest path as written relative to the root, for commands run there.
    #[must_use]
    pub fn manifest_relative(&self) -> &Path {
        &self.manifest
    }

    #[must_use]
    pub fn config(&self) -> PathBuf {
        self.resolve(&self.config)
    }

    #[must_use]
    pub fn template(&self) -> PathBuf {
        self.resolve(&self.template)
    }

    #[must_use]
    pub fn catalog(&self) -> PathBuf {
        self.resolve(&self.catalog)
    }

    fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directories_are_parent_first() {
        let layout = Layout::new("/srv/app");
        assert_eq!(
            layout.directories(),
            vec![
                PathBuf::from("/srv/app/models"),
                PathBuf::from("/srv/app/storage"),
                PathBuf::from("/srv/app/storage/tasks"),
            ]
        );
        assert_eq!(layout.dir_mode(), 0o755);
    }

    #[test]
    fn files_resolve_under_root() {
        let layout = Layout::new("deploy").with_config("conf/app.toml");
        assert_eq!(layout.config(), PathBuf::from("deploy/conf/app.toml"));
        assert_eq!(layout.template(), PathBuf::from("deploy/config.example.toml"));
        assert_eq!(
            layout.manifest(),
            PathBuf::from("deploy/docker-compose.custom-models.yml")
        );
        assert_eq!(
            layout.manifest_relative(),
            Path::new("docker-compose.custom-models.yml")
        );
        assert_eq!(
            layout.catalog(),
            PathBuf::from("deploy/models/model_configs.json")
        );
    }
}
