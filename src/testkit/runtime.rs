//! Scripted [`ContainerRuntime`] for tests.
//!
//! Records every call and answers from a fixed script, so bootstrap runs can
//! be exercised without a container daemon.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{BootstrapError, BootstrapResult};
use crate::port::ContainerRuntime;

/// A call received by [`ScriptedRuntime`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeCall {
    Ping,
    Build(PathBuf),
    Start(PathBuf),
}

/// Runtime double with scripted failures.
#[derive(Debug, Default)]
pub struct ScriptedRuntime {
    reachable: bool,
    build_exit: Option<i32>,
    start_exit: Option<i32>,
    calls: RefCell<Vec<RuntimeCall>>,
}

impl ScriptedRuntime {
    /// Daemon reachable, every command succeeds.
    pub fn healthy() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    /// Daemon unreachable.
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Daemon reachable, builds exit with `code`.
    pub fn failing_build(code: i32) -> Self {
        Self {
            reachable: true,
            build_exit: Some(code),
            ..Self::default()
        }
    }

    /// Daemon reachable, startup exits with `code`.
    pub fn failing_start(code: i32) -> Self {
        Self {
            reachable: true,
            start_exit: Some(code),
            ..Self::default()
        }
    }

    /// Calls received so far, in order.
    pub fn calls(&self) -> Vec<RuntimeCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: RuntimeCall) {
        self.calls.borrow_mut().push(call);
    }
}

fn scripted_exit(command: &str, exit: Option<i32>) -> BootstrapResult<()> {
    match exit {
        None => Ok(()),
        Some(code) => Err(BootstrapError::ExternalCommandFailed {
            command: command.to_string(),
            code: Some(code),
            reason: format!("exited with code {code}"),
        }),
    }
}

impl ContainerRuntime for ScriptedRuntime {
    fn name(&self) -> &str {
        "scripted"
    }

    fn ping(&self) -> BootstrapResult<()> {
        self.record(RuntimeCall::Ping);
        if self.reachable {
            Ok(())
        } else {
            Err(BootstrapError::PrerequisiteUnavailable {
                runtime: self.name().to_string(),
                reason: "daemon is not reachable".to_string(),
            })
        }
    }

    fn build(&self, manifest: &Path) -> BootstrapResult<()> {
        self.record(RuntimeCall::Build(manifest.to_path_buf()));
        scripted_exit("compose build", self.build_exit)
    }

    fn start(&self, manifest: &Path) -> BootstrapResult<()> {
        self.record(RuntimeCall::Start(manifest.to_path_buf()));
        scripted_exit("compose up -d", self.start_exit)
    }
}
