//! Bootstrap settings loading and validation.
//!
//! Every field has a default, so a deployment root without a settings file
//! bootstraps with the stock layout. A `modelstrap.toml` in the root (or one
//! passed with `--settings`) overrides individual values:
//!
//! ```toml
//! [paths]
//! directories = ["models", "storage", "storage/tasks"]
//! dir_mode = 0o755
//! manifest = "docker-compose.custom-models.yml"
//!
//! [model]
//! id = "microsoft/DialoGPT-small"
//! device = "cpu"
//!
//! [runtime]
//! binary = "docker"
//! ```
//!
//! `MODELSTRAP_DOCKER` overrides `runtime.binary`.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use modelstrap::infrastructure::config::settings::Settings;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::discover(Path::new("."), None)?;
//!     let layout = settings.layout(Path::new("."));
//!     println!("{}", layout.config().display());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use super::logging::LoggingConfig;
use crate::adapter::outbound::docker::DEFAULT_BINARY;
use crate::domain::layout::{
    DEFAULT_CATALOG, DEFAULT_CONFIG, DEFAULT_DIR_MODE, DEFAULT_MANIFEST, DEFAULT_TEMPLATE,
    MODELS_DIR, STORAGE_DIR, TASKS_DIR,
};
use crate::domain::marker::{DEFAULT_DEVICE, DEFAULT_MODEL_ID};
use crate::domain::{Layout, MarkerBlock};
use crate::error::{ConfigError, Result};

/// Settings file looked up in the deployment root.
pub const SETTINGS_FILE: &str = "modelstrap.toml";

/// Environment variable overriding the container runtime binary.
pub const DOCKER_ENV: &str = "MODELSTRAP_DOCKER";

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub paths: PathsConfig,
    pub model: ModelConfig,
    pub runtime: RuntimeConfig,
    pub logging: LoggingConfig,
}

/// Deployment layout, relative to the root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub directories: Vec<String>,
    pub dir_mode: u32,
    pub manifest: String,
    pub config: String,
    pub template: String,
    pub catalog: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            directories: vec![MODELS_DIR.into(), STORAGE_DIR.into(), TASKS_DIR.into()],
            dir_mode: DEFAULT_DIR_MODE,
            manifest: DEFAULT_MANIFEST.into(),
            config: DEFAULT_CONFIG.into(),
            template: DEFAULT_TEMPLATE.into(),
            catalog: DEFAULT_CATALOG.into(),
        }
    }
}

/// Values written into the custom-model config block.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub id: String,
    pub device: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_MODEL_ID.into(),
            device: DEFAULT_DEVICE.into(),
        }
    }
}

/// Container runtime invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub binary: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary: DEFAULT_BINARY.into(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from TOML text.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Resolve the settings for a deployment root.
    ///
    /// An explicit path must exist. Otherwise `modelstrap.toml` under `root`
    /// is used when present, and defaults when not. Environment overrides
    /// are applied last.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut settings = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let candidate = root.join(SETTINGS_FILE);
                if candidate.is_file() {
                    Self::load(candidate)?
                } else {
                    Self::default()
                }
            }
        };
        settings.apply_env_overrides();
        settings.validate()?;
        Ok(settings)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(binary) = std::env::var(DOCKER_ENV) {
            if !binary.trim().is_empty() {
                self.runtime.binary = binary;
            }
        }
    }

    /// Layout rooted at `root`.
    #[must_use]
    pub fn layout(&self, root: &Path) -> Layout {
        let paths = &self.paths;
        Layout::new(root)
            .with_directories(paths.directories.iter().map(PathBuf::from))
            .with_dir_mode(paths.dir_mode)
            .with_manifest(&paths.manifest)
            .with_config(&paths.config)
            .with_template(&paths.template)
            .with_catalog(&paths.catalog)
    }

    #[must_use]
    pub fn marker_block(&self) -> MarkerBlock {
        MarkerBlock::new(&self.model.id, &self.model.device)
    }

    fn validate(&self) -> Result<()> {
        let paths = &self.paths;

        if paths.directories.is_empty() {
            return Err(invalid("directories", "must list at least one directory"));
        }
        for dir in &paths.directories {
            check_relative("directories", dir)?;
        }
        for (i, dir) in paths.directories.iter().enumerate() {
            let child = Path::new(dir);
            let parent_later = paths.directories[i + 1..]
                .iter()
                .any(|other| child != Path::new(other) && child.starts_with(other));
            if parent_later {
                return Err(invalid(
                    "directories",
                    format!("{dir} is listed before its parent directory"),
                ));
            }
        }
        if paths.dir_mode > 0o777 {
            return Err(invalid("dir_mode", "must be a permission mode no larger than 0o777"));
        }

        check_relative("manifest", &paths.manifest)?;
        check_relative("config", &paths.config)?;
        check_relative("template", &paths.template)?;
        check_relative("catalog", &paths.catalog)?;
        if paths.config == paths.template {
            return Err(invalid("template", "must differ from the config path"));
        }

        check_single_line("id", &self.model.id)?;
        check_single_line("device", &self.model.device)?;

        if self.runtime.binary.trim().is_empty() {
            return Err(invalid("binary", "must not be empty"));
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(invalid("format", format!("unknown log format `{other}`"))),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

/// Paths must stay inside the deployment root.
fn check_relative(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    let escapes = Path::new(value).components().any(|c| {
        matches!(
            c,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    });
    if escapes {
        return Err(invalid(
            field,
            format!("{value} must be a path relative to the deployment root"),
        ));
    }
    Ok(())
}

fn check_single_line(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, "must not be empty"));
    }
    if value.contains(['\n', '\r']) {
        return Err(invalid(field, "must be a single line"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn invalid_field(result: Result<Settings>) -> &'static str {
        match result {
            Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
            Err(other) => panic!("expected invalid value, got {other}"),
            Ok(_) => panic!("expected settings to be rejected"),
        }
    }

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::parse_toml("").expect("parse");
        assert_eq!(settings.paths.directories, ["models", "storage", "storage/tasks"]);
        assert_eq!(settings.paths.dir_mode, 0o755);
        assert_eq!(settings.model.id, "microsoft/DialoGPT-medium");
        assert_eq!(settings.runtime.binary, "docker");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::parse_toml(
            r#"
[model]
device = "cuda"

[paths]
dir_mode = 0o750
"#,
        )
        .expect("parse");
        assert_eq!(settings.model.id, "microsoft/DialoGPT-medium");
        assert_eq!(settings.model.device, "cuda");
        assert_eq!(settings.paths.dir_mode, 0o750);
        assert_eq!(settings.paths.config, "config.toml");
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = Settings::parse_toml("[model]\nname = \"gpt2\"\n");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn rejects_paths_outside_root() {
        assert_eq!(
            invalid_field(Settings::parse_toml("[paths]\nconfig = \"../config.toml\"\n")),
            "config"
        );
        assert_eq!(
            invalid_field(Settings::parse_toml("[paths]\nmanifest = \"/etc/compose.yml\"\n")),
            "manifest"
        );
    }

    #[test]
    fn rejects_child_before_parent() {
        let result =
            Settings::parse_toml("[paths]\ndirectories = [\"storage/tasks\", \"storage\"]\n");
        assert_eq!(invalid_field(result), "directories");
    }

    #[test]
    fn rejects_oversized_mode() {
        let result = Settings::parse_toml("[paths]\ndir_mode = 0o1755\n");
        assert_eq!(invalid_field(result), "dir_mode");
    }

    #[test]
    fn rejects_multiline_model_id() {
        let result = Settings::parse_toml("[model]\nid = \"gpt2\\ncustom_model_device = 1\"\n");
        assert_eq!(invalid_field(result), "id");
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Settings::parse_toml("[logging]\nformat = \"xml\"\n");
        assert_eq!(invalid_field(result), "format");
    }

    #[test]
    fn layout_and_marker_follow_settings() {
        let settings = Settings::parse_toml(
            r#"
[paths]
directories = ["data"]
config = "conf/app.toml"

[model]
id = "gpt2"
device = "cpu"
"#,
        )
        .expect("parse");

        let layout = settings.layout(Path::new("/srv"));
        assert_eq!(layout.directories(), vec![PathBuf::from("/srv/data")]);
        assert_eq!(layout.config(), PathBuf::from("/srv/conf/app.toml"));
        assert_eq!(settings.marker_block().marker_line(), "custom_model_id = \"gpt2\"");
    }

    #[test]
    fn discover_reads_settings_file_from_root() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join(SETTINGS_FILE), "[model]\nid = \"gpt2\"\n").expect("write");

        let settings = Settings::discover(dir.path(), None).expect("discover");
        assert_eq!(settings.model.id, "gpt2");
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = Settings::discover(dir.path(), None).expect("discover");
        assert_eq!(settings.paths.manifest, DEFAULT_MANIFEST);
    }

    #[test]
    fn discover_requires_explicit_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.toml");
        let result = Settings::discover(dir.path(), Some(&missing));
        assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
    }
}
