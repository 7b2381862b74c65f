//! print command - Render all collected assignments

use anyhow::{Context as _, Result};

use super::gather;
use crate::cli::args::DirectiveArgs;
use crate::cli::Context;
use crate::core::render::{render, Format};
use crate::ui::output;

/// Collect metadata and print it in the requested format.
///
/// The format flag wins over the configured format.
pub fn print(ctx: &Context, format: Option<Format>, args: &DirectiveArgs) -> Result<()> {
    let (map, config) = gather(ctx, args)?;
    let format = format.unwrap_or_else(|| config.format());

    output::debug(format!("rendering as {format}"), ctx.verbosity);

    let rendered = render(&map, format).context("failed to render assignments")?;
    output::print(rendered);

    Ok(())
}
