//! Command implementations behind the CLI.
//!
//! Each command writes its JSON result to `out`. Conflicts and missing entities
//! are printed (when there is something to print) and then returned as errors so
//! the process exits non-zero.

mod create;
mod find;
mod list;

pub use create::{create_class, create_node, parse_parameter};
pub use find::find;
pub use list::list;

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
