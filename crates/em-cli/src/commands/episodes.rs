//! Episodes command: candidate episodes as JSONL.

use std::io::Write;

use anyhow::{Context, Result};
use em_core::{Episode, EventTypeRegistry, GeneralizedEpisode, Interval};
use serde::Serialize;

#[derive(Serialize)]
struct UnaryLine<'a> {
    names: Vec<&'a str>,
    #[serde(flatten)]
    episode: &'a Episode,
}

#[derive(Serialize)]
struct GeneralizedLine<'a> {
    names: Vec<&'a str>,
    #[serde(flatten)]
    episode: &'a GeneralizedEpisode,
    windows: Vec<Interval>,
}

/// Writes one JSON line per candidate.
///
/// Without intervals the unary episode list is written; otherwise every type
/// is expanded over `dimension`-tuples of the intervals.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &EventTypeRegistry,
    intervals: &[Interval],
    dimension: usize,
) -> Result<()> {
    if intervals.is_empty() {
        for episode in registry.episode_list() {
            let line = UnaryLine {
                names: episode.names(registry).flatten().collect(),
                episode: &episode,
            };
            writeln!(writer, "{}", serde_json::to_string(&line)?)?;
        }
        return Ok(());
    }

    let episodes = registry
        .generalized_episode_list(intervals, dimension)
        .context("failed to generate episodes")?;
    for episode in &episodes {
        let line = GeneralizedLine {
            names: episode.episode().names(registry).flatten().collect(),
            episode,
            windows: episode.resolve_intervals(intervals).unwrap_or_default(),
        };
        writeln!(writer, "{}", serde_json::to_string(&line)?)?;
    }
    Ok(())
}
