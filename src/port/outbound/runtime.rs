//! Container runtime port.
//!
//! Covers the three things the bootstrapper needs from the container tooling:
//! a reachability check, an image build from a compose manifest, and an
//! optional detached startup.

use std::path::Path;

use crate::error::BootstrapResult;

/// Driver for the host container runtime.
///
/// Calls block until the underlying tool exits. The bootstrapper only looks
/// at success or failure; output handling is up to the implementation.
///
/// # Errors
///
/// [`ping`](Self::ping) returns `PrerequisiteUnavailable` when the daemon
/// cannot be reached. [`build`](Self::build) and [`start`](Self::start)
/// return `ExternalCommandFailed` carrying the tool's exit code.
pub trait ContainerRuntime {
    /// Runtime name for logs and operator messages.
    fn name(&self) -> &str;

    /// Verify the runtime daemon is reachable.
    fn ping(&self) -> BootstrapResult<()>;

    /// Build the images described by `manifest`.
    fn build(&self, manifest: &Path) -> BootstrapResult<()>;

    /// Start the services described by `manifest` in the background.
    fn start(&self, manifest: &Path) -> BootstrapResult<()>;
}
