//! Builds a registry from a token stream plus `--alias`/`--position` edits.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use em_core::EventTypeRegistry;

use crate::InputArgs;

/// Reads the input named by `args` (stdin if none) and builds the registry.
pub fn registry(args: &InputArgs) -> Result<EventTypeRegistry> {
    let text = read_input(args.input.as_deref())?;
    from_text(&text, args)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Counts every whitespace-separated token as one occurrence of its event
/// type, then applies aliases and positions.
pub fn from_text(text: &str, args: &InputArgs) -> Result<EventTypeRegistry> {
    let mut registry = EventTypeRegistry::new();
    for token in text.split_whitespace() {
        registry.observe(token)?;
    }
    tracing::debug!(
        types = registry.len(),
        sample_size = registry.sample_size(),
        "loaded event types"
    );

    for pair in &args.aliases {
        let Some((name, alias)) = pair.split_once('=') else {
            anyhow::bail!("invalid --alias {pair:?}, expected NAME=ALIAS");
        };
        registry
            .set_alias(name, alias.trim())
            .with_context(|| format!("invalid --alias {pair:?}"))?;
    }

    for request in &args.positions {
        registry
            .set_position(request)
            .with_context(|| format!("invalid --position {request:?}"))?;
    }

    Ok(registry)
}
