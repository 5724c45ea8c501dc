//! Handlers for `modelstrap models`.

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::CatalogArgs;
use crate::adapter::inbound::cli::operator::Context;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::cli::setup::relative;
use crate::domain::Catalog;
use crate::error::{ConfigError, Result};

#[derive(Tabled)]
struct ModelRow {
    #[tabled(rename = "Model")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Use")]
    use_case: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// List the default catalog.
pub fn list() -> Result<()> {
    let catalog = Catalog::default();

    if output::is_json() {
        output::json_output(json!({
            "command": "models.list",
            "recommended": Catalog::RECOMMENDED,
            "models": serde_json::to_value(&catalog)?,
        }));
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Available models");

    let rows = catalog
        .iter()
        .map(|(id, spec)| ModelRow {
            id: if id == Catalog::RECOMMENDED {
                format!("{id} *")
            } else {
                id.to_string()
            },
            name: spec.name.clone(),
            use_case: spec.use_case.clone(),
            size: spec.size.clone(),
        })
        .collect::<Vec<_>>();

    output::lines(&Table::new(rows).to_string());
    output::note("* recommended");
    Ok(())
}

/// Write the default catalog file.
pub fn write_catalog(ctx: &Context, args: &CatalogArgs) -> Result<()> {
    let boot = ctx.bootstrapper();
    let path = boot.layout().catalog();
    let display = relative(&path, &ctx.root);

    if path.exists() && !args.force {
        return Err(ConfigError::InvalidValue {
            field: "catalog",
            reason: format!("{display} already exists (use --force to overwrite)"),
        }
        .into());
    }

    boot.ensure_parent_directories(&path)?;
    boot.write_catalog(&path, args.force)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "models.catalog",
            "status": "ok",
            "path": display,
        }));
        return Ok(());
    }

    output::success(&format!("Wrote {display}"));
    Ok(())
}
