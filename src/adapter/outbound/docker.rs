//! Docker CLI driver.
//!
//! Shells out to the `docker` binary with the deployment root as working
//! directory. Build and startup output is captured and forwarded to tracing;
//! on failure the tail of stderr goes into the error.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use tracing::{debug, info};

use crate::error::{BootstrapError, BootstrapResult};
use crate::port::ContainerRuntime;

pub const DEFAULT_BINARY: &str = "docker";

/// Lines of stderr kept in a failure message.
const STDERR_TAIL_LINES: usize = 10;

/// Container runtime backed by the Docker CLI and its compose plugin.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
    workdir: PathBuf,
}

impl DockerCli {
    pub fn new(binary: impl Into<PathBuf>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            workdir: workdir.into(),
        }
    }

    #[must_use]
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    fn command(&self, args: &[OsString]) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.args(args).current_dir(&self.workdir);
        cmd
    }

    fn display(&self, args: &[OsString]) -> String {
        let mut rendered = self.binary.display().to_string();
        for arg in args {
            rendered.push(' ');
            rendered.push_str(&arg.to_string_lossy());
        }
        rendered
    }

    fn compose_args(manifest: &Path, action: &[&str]) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["compose".into(), "-f".into(), manifest.into()];
        args.extend(action.iter().map(OsString::from));
        args
    }

    /// Run a command to completion, capturing output.
    fn run_captured(&self, args: &[OsString]) -> BootstrapResult<()> {
        let rendered = self.display(args);
        info!(command = %rendered, "Running container command");

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| BootstrapError::ExternalCommandFailed {
                command: rendered.clone(),
                code: None,
                reason: format!("failed to execute: {e}"),
            })?;

        log_output(&output);

        if output.status.success() {
            return Ok(());
        }

        let mut reason = describe_status(output.status);
        let tail = stderr_tail(&output.stderr);
        if !tail.is_empty() {
            reason.push('\n');
            reason.push_str(&tail);
        }

        Err(BootstrapError::ExternalCommandFailed {
            command: rendered,
            code: output.status.code(),
            reason,
        })
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY, ".")
    }
}

impl ContainerRuntime for DockerCli {
    fn name(&self) -> &str {
        "docker"
    }

    fn ping(&self) -> BootstrapResult<()> {
        let status = self
            .command(&["info".into()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| BootstrapError::PrerequisiteUnavailable {
                runtime: self.name().to_string(),
                reason: format!("failed to execute {}: {e}", self.binary.display()),
            })?;

        if status.success() {
            debug!("Container daemon reachable");
            Ok(())
        } else {
            Err(BootstrapError::PrerequisiteUnavailable {
                runtime: self.name().to_string(),
                reason: format!(
                    "daemon is not reachable (`{} info` {})",
                    self.binary.display(),
                    describe_status(status)
                ),
            })
        }
    }

    fn build(&self, manifest: &Path) -> BootstrapResult<()> {
        self.run_captured(&Self::compose_args(manifest, &["build"]))
    }

    fn start(&self, manifest: &Path) -> BootstrapResult<()> {
        self.run_captured(&Self::compose_args(manifest, &["up", "-d"]))
    }
}

fn describe_status(status: ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

fn log_output(output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        debug!(target: "modelstrap::docker", "{line}");
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        debug!(target: "modelstrap::docker", stream = "stderr", "{line}");
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_args_put_manifest_first() {
        let args = DockerCli::compose_args(Path::new("compose.yml"), &["up", "-d"]);
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(rendered, ["compose", "-f", "compose.yml", "up", "-d"]);
    }

    #[test]
    fn display_joins_binary_and_args() {
        let docker = DockerCli::new("/usr/bin/docker", ".");
        let args = DockerCli::compose_args(Path::new("compose.yml"), &["build"]);
        assert_eq!(docker.display(&args), "/usr/bin/docker compose -f compose.yml build");
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let stderr: String = (1..=15).map(|i| format!("line {i}\n\n")).collect();
        let tail = stderr_tail(stderr.as_bytes());
        assert!(tail.starts_with("line 6"));
        assert!(tail.ends_with("line 15"));
        assert_eq!(tail.lines().count(), STDERR_TAIL_LINES);
    }

    #[test]
    fn missing_binary_is_prerequisite_failure() {
        let docker = DockerCli::new("/nonexistent/modelstrap-docker", ".");
        match docker.ping() {
            Err(BootstrapError::PrerequisiteUnavailable { runtime, .. }) => {
                assert_eq!(runtime, "docker");
            }
            other => panic!("expected prerequisite failure, got {other:?}"),
        }
    }

    #[test]
    fn missing_binary_fails_build_without_exit_code() {
        let docker = DockerCli::new("/nonexistent/modelstrap-docker", ".");
        match docker.build(Path::new("compose.yml")) {
            Err(BootstrapError::ExternalCommandFailed { code, .. }) => assert!(code.is_none()),
            other => panic!("expected command failure, got {other:?}"),
        }
    }
}
