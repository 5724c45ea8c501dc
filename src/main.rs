use clap::Parser;
use modelstrap::adapter::inbound::cli::command::Cli;
use modelstrap::adapter::inbound::cli::operator::Context;
use modelstrap::adapter::inbound::cli::output::{self, OutputConfig};
use modelstrap::adapter::inbound::cli::{diagnostic, execute};
use tracing::debug;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.color.apply();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    let ctx = match Context::load(&cli.root, cli.settings.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            diagnostic::report(&e);
            std::process::exit(e.exit_code());
        }
    };

    ctx.settings.logging.init(cli.verbose);
    debug!(root = %ctx.root.display(), "modelstrap starting");

    if let Err(e) = execute(&cli, &ctx) {
        diagnostic::report(&e);
        std::process::exit(e.exit_code());
    }
}
