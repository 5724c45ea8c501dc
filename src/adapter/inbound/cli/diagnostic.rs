//! Miette-based error diagnostics for CLI error presentation.
//!
//! Turns crate errors into diagnostics carrying a stable code and a help line
//! telling the operator what to fix before rerunning.

use std::fmt::Display;

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::Stage;
use crate::error::{BootstrapError, Error};

/// Bootstrap failure rendered for the operator.
///
/// The code depends on the error kind, so [`Diagnostic`] is implemented by
/// hand instead of derived.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BootstrapDiagnostic {
    /// Human-readable error message.
    pub message: String,

    /// Stable diagnostic code.
    pub code: &'static str,

    /// Suggestion for fixing the error.
    pub help: Option<String>,
}

impl Diagnostic for BootstrapDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.help
            .as_ref()
            .map(|help| Box::new(help) as Box<dyn Display + 'a>)
    }
}

impl BootstrapDiagnostic {
    /// Build a diagnostic from a crate error.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let (code, help) = match err {
            Error::Config(_) => (
                "modelstrap::settings",
                Some("fix the settings file and rerun".to_string()),
            ),
            Error::Json(_) | Error::Io(_) => ("modelstrap::io", None),
            Error::Stage { stage, source } => classify(Some(*stage), source),
            Error::Bootstrap(source) => classify(None, source),
        };

        Self {
            message: err.to_string(),
            code,
            help,
        }
    }
}

fn classify(stage: Option<Stage>, err: &BootstrapError) -> (&'static str, Option<String>) {
    let rerun = "completed steps are safe to repeat";
    match err {
        BootstrapError::PrerequisiteUnavailable { .. } => (
            "modelstrap::prerequisite",
            Some(format!(
                "start the Docker daemon (for example `sudo systemctl start docker`) and rerun; {rerun}"
            )),
        ),
        BootstrapError::MissingRequiredFile { path } => {
            let hint = match stage {
                Some(Stage::ValidatingManifest) => {
                    "run from the deployment root or pass --root".to_string()
                }
                _ => format!("restore {} and rerun", path.display()),
            };
            ("modelstrap::missing_file", Some(format!("{hint}; {rerun}")))
        }
        BootstrapError::ExternalCommandFailed { .. } => (
            "modelstrap::command",
            Some(format!("fix the cause reported above and rerun; {rerun}")),
        ),
        BootstrapError::Filesystem { .. } => (
            "modelstrap::filesystem",
            Some(format!(
                "check ownership and permissions under the deployment root; {rerun}"
            )),
        ),
    }
}

/// Render an error to stderr the way the active output mode expects.
pub fn report(err: &Error) {
    if super::output::is_json() {
        super::output::error(&err.to_string());
        return;
    }
    let report = miette::Report::new(BootstrapDiagnostic::from_error(err));
    eprintln!("{report:?}");
}
