//! Labels command: event type labels in ordinal order.

use std::io::Write;

use anyhow::Result;
use em_core::{DisplayMode, EventTypeRegistry, OrderMode};

/// Ranks the registry under `order` and writes `ordinal<TAB>text` lines.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &mut EventTypeRegistry,
    order: OrderMode,
    display: DisplayMode,
) -> Result<()> {
    registry.set_ordinal(order);
    for label in registry.labels(display) {
        writeln!(writer, "{}\t{}", label.ordinal, label.text)?;
    }
    Ok(())
}
