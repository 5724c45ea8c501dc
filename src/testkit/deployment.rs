//! Deployment root fixtures.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::layout::{DEFAULT_MANIFEST, DEFAULT_TEMPLATE};

/// Minimal compose manifest; only its presence matters.
pub const MANIFEST: &str = "services:\n  webui:\n    build: .\n";

/// Write the default manifest and a config template under `root`.
pub fn seed(root: &Path, template: &str) -> io::Result<()> {
    fs::write(root.join(DEFAULT_MANIFEST), MANIFEST)?;
    fs::write(root.join(DEFAULT_TEMPLATE), template)
}
