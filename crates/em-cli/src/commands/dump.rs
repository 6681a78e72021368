//! Dump command: the registry's diagnostic listing.

use std::io::Write;

use anyhow::Result;
use em_core::EventTypeRegistry;

pub fn run<W: Write>(writer: &mut W, registry: &EventTypeRegistry) -> Result<()> {
    if registry.is_empty() {
        writeln!(writer, "No event types.")?;
        return Ok(());
    }
    write!(writer, "{registry}")?;
    Ok(())
}
