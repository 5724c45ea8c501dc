//! Handler for `modelstrap check`.

use serde_json::json;

use crate::adapter::inbound::cli::operator::Context;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::setup::relative;
use crate::error::Result;

/// Verify the container runtime and the build manifest. Touches nothing.
pub fn execute(ctx: &Context) -> Result<()> {
    let boot = ctx.bootstrapper();
    let manifest = relative(&boot.layout().manifest(), &ctx.root);

    output::section("Preflight");
    boot.preflight()?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check",
            "status": "ok",
            "manifest": manifest,
        }));
        return Ok(());
    }

    output::success("Container runtime reachable");
    output::success(&format!("Found {manifest}"));
    output::hint("run `modelstrap setup` to bootstrap the deployment");
    Ok(())
}
