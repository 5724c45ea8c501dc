//! CLI module graph.

pub mod check;
pub mod command;
pub mod diagnostic;
pub mod guidance;
pub mod models;
pub mod operator;
pub mod output;
pub mod setup;

use command::{Cli, Commands, ModelsCommand};
use operator::Context;

use crate::error::Result;

/// Dispatch a parsed command line.
///
/// Output mode and logging must already be configured.
pub fn execute(cli: &Cli, ctx: &Context) -> Result<()> {
    match cli.subcommand() {
        Commands::Setup(args) => setup::execute(ctx, &args),
        Commands::Check => check::execute(ctx),
        Commands::Models(ModelsCommand::List) => models::list(),
        Commands::Models(ModelsCommand::Catalog(args)) => models::write_catalog(ctx, &args),
        Commands::Guidance => guidance::execute(ctx),
    }
}
