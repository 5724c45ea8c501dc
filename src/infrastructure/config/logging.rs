//! Logging configuration and initialization.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Filter directive for a given `-v` count.
    ///
    /// Each `-v` raises the configured level by one step.
    #[must_use]
    pub fn effective_level(&self, verbose: u8) -> String {
        const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
        let Some(base) = LEVELS.iter().position(|l| self.level.eq_ignore_ascii_case(l)) else {
            return self.level.clone();
        };
        let raised = (base + usize::from(verbose)).min(LEVELS.len() - 1);
        LEVELS[raised].to_string()
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr so stdout stays free for operator output. `RUST_LOG`
    /// takes precedence over the configured level.
    pub fn init(&self, verbose: u8) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.effective_level(verbose)));

        match self.format.as_str() {
            "json" => {
                fmt()
                    .json()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
            _ => {
                fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "pretty".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(config.effective_level(0), "warn");
        assert_eq!(config.effective_level(1), "info");
        assert_eq!(config.effective_level(2), "debug");
        assert_eq!(config.effective_level(9), "trace");
    }

    #[test]
    fn custom_directives_pass_through() {
        let config = LoggingConfig {
            level: "modelstrap=debug".into(),
            format: "pretty".into(),
        };
        assert_eq!(config.effective_level(2), "modelstrap=debug");
    }
}
