//! Snapshot command: the registry as pretty-printed JSON.

use std::io::Write;

use anyhow::Result;
use em_core::EventTypeRegistry;

pub fn run<W: Write>(writer: &mut W, registry: &EventTypeRegistry) -> Result<()> {
    let json = serde_json::to_string_pretty(registry)?;
    writeln!(writer, "{json}")?;
    Ok(())
}
