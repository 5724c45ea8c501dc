//! Command-line interface definitions.
//!
//! Running `modelstrap` with no subcommand performs the full bootstrap of the
//! deployment root, the same as `modelstrap setup`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Prepare a Docker deployment to run against local language models
#[derive(Parser, Debug)]
#[command(name = "modelstrap")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Deployment root (all layout paths resolve against it)
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file [default: <root>/modelstrap.toml when present]
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The subcommand to run; bare invocations mean `setup`.
    #[must_use]
    pub fn subcommand(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Setup(SetupArgs::default()))
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply the choice to all styled output.
    pub fn apply(self) {
        match self {
            ColorChoice::Auto => owo_colors::unset_override(),
            ColorChoice::Always => owo_colors::set_override(true),
            ColorChoice::Never => owo_colors::set_override(false),
        }
    }
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Bootstrap the deployment root (default)
    Setup(SetupArgs),

    /// Check the container runtime and build manifest without changing anything
    Check,

    /// Inspect or write the model catalog
    #[command(subcommand)]
    Models(ModelsCommand),

    /// Show next steps and the inference API endpoints
    Guidance,
}

/// Arguments for `modelstrap setup`.
#[derive(Args, Debug, Clone, Default)]
pub struct SetupArgs {
    /// Start the services with `docker compose up -d` after bootstrapping
    #[arg(long)]
    pub start: bool,
}

/// Subcommands for `modelstrap models`.
#[derive(Subcommand, Debug, Clone)]
pub enum ModelsCommand {
    /// List the models in the default catalog
    List,
    /// Write the default catalog file
    Catalog(CatalogArgs),
}

/// Arguments for `modelstrap models catalog`.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Overwrite an existing catalog file
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_means_setup() {
        let cli = Cli::parse_from(["modelstrap"]);
        assert!(cli.command.is_none());
        assert!(matches!(cli.subcommand(), Commands::Setup(SetupArgs { start: false })));
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.settings.is_none());
    }

    #[test]
    fn setup_accepts_start() {
        let cli = Cli::parse_from(["modelstrap", "setup", "--start"]);
        assert!(matches!(cli.subcommand(), Commands::Setup(SetupArgs { start: true })));
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["modelstrap", "check", "--json", "-C", "/srv/app", "-vv"]);
        assert!(matches!(cli.subcommand(), Commands::Check));
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("/srv/app"));
    }

    #[test]
    fn models_catalog_force() {
        let cli = Cli::parse_from(["modelstrap", "models", "catalog", "--force"]);
        assert!(matches!(
            cli.subcommand(),
            Commands::Models(ModelsCommand::Catalog(CatalogArgs { force: true }))
        ));
    }

    #[test]
    fn color_choice_parses() {
        let cli = Cli::parse_from(["modelstrap", "--color", "never", "guidance"]);
        assert!(matches!(cli.color, ColorChoice::Never));
        assert!(matches!(cli.subcommand(), Commands::Guidance));
    }
}
