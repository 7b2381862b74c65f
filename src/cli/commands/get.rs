//! get command - Print a single field's value

use anyhow::{bail, Result};

use super::gather;
use crate::cli::args::DirectiveArgs;
use crate::cli::Context;
use crate::core::types::Field;
use crate::ui::output;

/// Print the raw value of one field.
///
/// Fails when the field is absent, which only happens for `Version`.
pub fn get(ctx: &Context, field: Field, args: &DirectiveArgs) -> Result<()> {
    let (map, _) = gather(ctx, args)?;

    match map.field(field) {
        Some(value) => {
            output::print(value);
            Ok(())
        }
        None => bail!("{}.{} is not set", map.prefix(), field),
    }
}
