//! Composition root for CLI handlers.
//!
//! Resolves settings for the chosen deployment root and wires the real
//! Docker and filesystem adapters into a [`Bootstrapper`].

use std::path::{Path, PathBuf};

use crate::adapter::outbound::{DockerCli, LocalFs};
use crate::application::Bootstrapper;
use crate::error::Result;
use crate::infrastructure::config::settings::Settings;

/// Bootstrapper wired to the host machine.
pub type HostBootstrapper = Bootstrapper<DockerCli, LocalFs>;

/// Deployment root plus its resolved settings.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub settings: Settings,
}

impl Context {
    /// Resolve settings for `root`.
    pub fn load(root: &Path, settings_path: Option<&Path>) -> Result<Self> {
        let settings = Settings::discover(root, settings_path)?;
        Ok(Self {
            root: root.to_path_buf(),
            settings,
        })
    }

    /// Build a bootstrapper that drives the real container runtime.
    #[must_use]
    pub fn bootstrapper(&self) -> HostBootstrapper {
        Bootstrapper::new(
            self.settings.layout(&self.root),
            self.settings.marker_block(),
            DockerCli::new(&self.settings.runtime.binary, &self.root),
            LocalFs,
        )
    }
}
