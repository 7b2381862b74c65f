//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads configuration for the target directory
//! 2. Builds the directive list (config first, then flags)
//! 3. Calls the assembler and prints the result

mod completion;
mod get;
mod print;

pub use completion::completion;
pub use get::get;
pub use print::print;

use std::path::Path;

use anyhow::{Context as _, Result};

use super::args::{Command, DirectiveArgs};
use super::Context;
use crate::core::assemble::collect;
use crate::core::config::Config;
use crate::core::types::{find_directive, AssignmentMap, DirectiveKey, SymbolPrefix};
use crate::ui::output;

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Print { format, directives } => print::print(ctx, format, &directives),
        Command::Get { field, directives } => get::get(ctx, field, &directives),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Load config, merge directives, and collect the assignment map.
fn gather(ctx: &Context, args: &DirectiveArgs) -> Result<(AssignmentMap, Config)> {
    let dir = ctx.dir()?;

    let config = Config::load(&dir).context("failed to load configuration")?;
    log_config_sources(&config, ctx);

    let mut directives = config.directives();
    directives.extend(args.to_directives()?);

    if let Some(prefix) = find_directive(&directives, DirectiveKey::Prefix) {
        if let Err(e) = SymbolPrefix::new(prefix) {
            output::warn(
                format!("{e}; using default prefix '{}'", SymbolPrefix::default()),
                ctx.verbosity,
            );
        }
    }

    output::debug(
        format!("collecting from {} with {} directive(s)", dir.display(), directives.len()),
        ctx.verbosity,
    );

    let map = collect(&dir, &directives)
        .with_context(|| format!("failed to collect build metadata for {}", dir.display()))?;

    output::debug(format!("collected {} assignment(s)", map.len()), ctx.verbosity);

    Ok((map, config))
}

fn log_config_sources(config: &Config, ctx: &Context) {
    let sources: [(&str, Option<&Path>); 2] = [
        ("global", config.global_config_loaded_from()),
        ("repo", config.repo_config_loaded_from()),
    ];

    for (scope, path) in sources {
        if let Some(path) = path {
            output::debug(
                format!("loaded {scope} config from {}", path.display()),
                ctx.verbosity,
            );
        }
    }
}
