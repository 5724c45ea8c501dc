//! Handler for `modelstrap guidance` and the guidance printed after setup.

use serde_json::json;

use crate::adapter::inbound::cli::operator::Context;
use crate::adapter::inbound::cli::output;
use crate::application::Guidance;
use crate::error::Result;

/// Execute the guidance command.
pub fn execute(ctx: &Context) -> Result<()> {
    let layout = ctx.settings.layout(&ctx.root);
    let guidance = Guidance::for_deployment(&layout, &ctx.settings.marker_block());

    if output::is_json() {
        let endpoints = guidance
            .endpoints
            .iter()
            .map(|e| json!({ "method": e.method, "path": e.path, "summary": e.summary }))
            .collect::<Vec<_>>();
        output::json_output(json!({
            "command": "guidance",
            "next_steps": guidance.next_steps,
            "endpoints": endpoints,
            "tips": guidance.tips,
        }));
        return Ok(());
    }

    print(&guidance, false);
    Ok(())
}

/// Print next steps, endpoints and tips.
///
/// The startup step is dropped once the services are already running.
pub fn print(guidance: &Guidance, started: bool) {
    output::section("Next Steps");
    let steps = guidance.next_steps.iter().skip(usize::from(started));
    for (i, step) in steps.enumerate() {
        output::note(&format!("{}. {step}", i + 1));
    }

    output::section("Inference API");
    for endpoint in &guidance.endpoints {
        output::field(
            endpoint.method,
            format!("{:<36} {}", endpoint.path, endpoint.summary),
        );
    }

    output::section("Tips");
    for tip in &guidance.tips {
        output::hint(tip);
    }
}
