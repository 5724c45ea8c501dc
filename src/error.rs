use std::path::PathBuf;

use thiserror::Error;

use crate::domain::stage::Stage;

/// Settings-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read settings file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of an individual bootstrap step.
///
/// Every variant is fatal. The bootstrapper never retries and never rolls
/// back; a rerun after fixing the cause converges on the same end state.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("{runtime} is not available: {reason}")]
    PrerequisiteUnavailable { runtime: String, reason: String },

    #[error("required file is missing: {}", path.display())]
    MissingRequiredFile { path: PathBuf },

    #[error("`{command}` failed: {reason}")]
    ExternalCommandFailed {
        command: String,
        code: Option<i32>,
        reason: String,
    },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BootstrapError {
    /// Wrap an I/O error with the path it happened on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type BootstrapResult<T> = std::result::Result<T, BootstrapError>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: BootstrapError,
    },

    #[error(transparent)]
    Bootstrap(#[from] BootstrapError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The step error underneath, if any.
    pub fn bootstrap(&self) -> Option<&BootstrapError> {
        match self {
            Error::Stage { source, .. } => Some(source),
            Error::Bootstrap(err) => Some(err),
            _ => None,
        }
    }

    /// Process exit code for this error.
    ///
    /// A failed external command hands its own non-zero code through;
    /// everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self.bootstrap() {
            Some(BootstrapError::ExternalCommandFailed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
