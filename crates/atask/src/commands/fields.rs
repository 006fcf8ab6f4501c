//! Fields command implementation.
//!
//! Lists every field a query can name, with its aliases, kind, operators
//! and special values.

use atask_query::FIELDS;

use super::{CommandContext, Result};
use crate::output::{format_fields_json, format_fields_table};

/// Executes the fields command.
pub fn execute(ctx: &CommandContext) -> Result<()> {
    if ctx.json_output {
        println!("{}", format_fields_json(FIELDS)?);
    } else if !ctx.quiet {
        print!("{}", format_fields_table(FIELDS, ctx.use_colors));
    }

    Ok(())
}
