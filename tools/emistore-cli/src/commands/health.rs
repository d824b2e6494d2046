//! Catalog liveness probe.

use anyhow::Result;
use emistore_data::CatalogService;

use crate::context::Context;

/// Run the health command.
pub async fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Checking catalog...");
    let result = catalog.health().await;
    spinner.finish_and_clear();
    let body = result?;

    if ctx.output.is_json() {
        ctx.output.json(&body);
        return Ok(());
    }

    ctx.output.success("Catalog is reachable");
    ctx.output.kv("url", &ctx.config.catalog.base_url);
    for key in ["status", "message"] {
        if let Some(value) = body.get(key).and_then(|v| v.as_str()) {
            ctx.output.kv(key, value);
        }
    }

    Ok(())
}
