//! Filesystem port.

use std::io;
use std::path::Path;

/// File operations the bootstrapper performs on the deployment root.
///
/// Methods return plain [`io::Result`]; the caller attaches the path and
/// turns failures into `BootstrapError::Filesystem`.
pub trait Filesystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Create a single directory. An existing directory is not an error.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Set Unix permission bits on `path`.
    fn set_mode(&self, path: &Path, mode: u32) -> io::Result<()>;

    /// Copy `from` to `to` byte for byte. Fails if `to` already exists.
    fn copy_new(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Append `text` to an existing file.
    fn append(&self, path: &Path, text: &str) -> io::Result<()>;

    /// Write a new file, or replace it when `overwrite` is set.
    fn write(&self, path: &Path, contents: &str, overwrite: bool) -> io::Result<()>;
}
