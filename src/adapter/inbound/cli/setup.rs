//! Handler for `modelstrap setup`, the default command.

use std::path::Path;

use indicatif::ProgressBar;
use serde_json::json;

use crate::adapter::inbound::cli::command::SetupArgs;
use crate::adapter::inbound::cli::operator::Context;
use crate::adapter::inbound::cli::{guidance, output};
use crate::application::{Guidance, Outcome, RunReport};
use crate::domain::Stage;
use crate::error::Result;

/// Execute the setup command.
pub fn execute(ctx: &Context, args: &SetupArgs) -> Result<()> {
    let boot = ctx.bootstrapper();
    let layout = boot.layout().clone();
    let manifest = layout.manifest_relative().display().to_string();
    let config = relative(&layout.config(), &ctx.root);

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Root", ctx.root.display());

    let mut building: Option<ProgressBar> = None;
    let report = boot.run_with(|stage| {
        if let Some(pb) = building.take() {
            if stage == Stage::Failed {
                output::spinner_fail(&pb, "Image build failed");
            } else {
                output::spinner_success(&pb, "Image built");
            }
        }
        match stage {
            Stage::CheckingPrerequisite => output::action("Checking", "container runtime"),
            Stage::CreatingDirectories => output::action("Creating", "directories"),
            Stage::ValidatingManifest => output::action("Validating", &manifest),
            Stage::Building => {
                building = Some(output::spinner(&format!("Building image from {manifest}")));
            }
            Stage::EnsuringConfig => output::action("Ensuring", &config),
            Stage::Done | Stage::Failed => {}
        }
    })?;

    let started = if args.start {
        let pb = output::spinner("Starting services");
        match boot.start_services() {
            Ok(()) => output::spinner_success(&pb, "Services started"),
            Err(e) => {
                output::spinner_fail(&pb, "Services failed to start");
                return Err(e.into());
            }
        }
        true
    } else {
        false
    };

    let guidance = Guidance::for_deployment(&layout, boot.marker());

    if output::is_json() {
        output::json_output(report_json(&report, &ctx.root, started, &guidance));
        return Ok(());
    }

    print_report(&report, &ctx.root, &config);
    if !output::is_quiet() {
        guidance::print(&guidance, started);
    }
    Ok(())
}

fn print_report(report: &RunReport, root: &Path, config: &str) {
    output::section("Deployment Ready");
    for dir in &report.directories {
        let path = relative(&dir.path, root);
        match dir.outcome {
            Outcome::Applied => output::success(&format!("Created {path}/")),
            Outcome::Unchanged | Outcome::Skipped => {
                output::note(&format!("{path}/ already exists"));
            }
        }
    }

    match report.config {
        Outcome::Applied => output::success(&format!("Seeded {config} from template")),
        Outcome::Unchanged | Outcome::Skipped => {
            output::note(&format!("{config} already exists, left as is"));
        }
    }
    match report.marker {
        Outcome::Applied => output::success("Added custom model settings"),
        Outcome::Unchanged => output::note("Custom model settings already present"),
        Outcome::Skipped => output::warning(&format!(
            "{config} already sets custom_model_id to another model, block not appended"
        )),
    }
    match report.catalog {
        Outcome::Applied => output::success("Wrote model catalog"),
        Outcome::Unchanged | Outcome::Skipped => output::note("Model catalog already present"),
    }
}

fn report_json(
    report: &RunReport,
    root: &Path,
    started: bool,
    guidance: &Guidance,
) -> serde_json::Value {
    let directories = report
        .directories
        .iter()
        .map(|dir| {
            json!({
                "path": relative(&dir.path, root),
                "created": dir.outcome.is_applied(),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "command": "setup",
        "status": "ok",
        "directories": directories,
        "config_seeded": report.config.is_applied(),
        "marker_appended": report.marker.is_applied(),
        "marker_skipped": report.marker == Outcome::Skipped,
        "catalog_written": report.catalog.is_applied(),
        "started": started,
        "next_steps": guidance.next_steps,
    })
}

/// Display `path` relative to the deployment root when it lives there.
pub(super) fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
