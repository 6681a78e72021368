//! Episode candidates handed to the frequency-counting stage.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interval::Interval;
use crate::registry::EventTypeRegistry;
use crate::types::EventTypeId;

/// Errors raised when building an episode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EpisodeError {
    #[error("an episode needs at least one event type")]
    Empty,
}

/// One event-type slot of an episode, with its counting bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSlot {
    pub event_type: EventTypeId,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub sample_size: u64,
}

impl EpisodeSlot {
    pub const fn new(event_type: EventTypeId) -> Self {
        Self {
            event_type,
            votes: 0,
            sample_size: 0,
        }
    }
}

/// A candidate grouping of one or more event types.
///
/// Ids are local to the registry that produced the episode. Use
/// [`Episode::cmp_by_name`] to compare episodes from different registries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    slots: Vec<EpisodeSlot>,
}

impl Episode {
    pub fn new(slots: Vec<EpisodeSlot>) -> Result<Self, EpisodeError> {
        if slots.is_empty() {
            return Err(EpisodeError::Empty);
        }
        Ok(Self { slots })
    }

    /// A single-slot episode carrying the type's votes and the sample size.
    pub fn unary(event_type: EventTypeId, votes: u64, sample_size: u64) -> Self {
        Self {
            slots: vec![EpisodeSlot {
                event_type,
                votes,
                sample_size,
            }],
        }
    }

    /// Number of event-type slots; always at least 1.
    pub fn arity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[EpisodeSlot] {
        &self.slots
    }

    pub fn event_types(&self) -> impl Iterator<Item = EventTypeId> + '_ {
        self.slots.iter().map(|slot| slot.event_type)
    }

    pub fn event_type(&self, slot: usize) -> Option<EventTypeId> {
        self.slots.get(slot).map(|s| s.event_type)
    }

    pub fn votes(&self, slot: usize) -> Option<u64> {
        self.slots.get(slot).map(|s| s.votes)
    }

    pub fn sample_size(&self, slot: usize) -> Option<u64> {
        self.slots.get(slot).map(|s| s.sample_size)
    }

    /// Names of the bound event types as resolved by `registry`.
    pub fn names<'a>(
        &'a self,
        registry: &'a EventTypeRegistry,
    ) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.event_types().map(|id| registry.name_of(id))
    }

    /// Orders two episodes by the names of their event types, slot by slot.
    ///
    /// Each episode is resolved against its own registry. Ids missing from a
    /// registry sort before any name.
    pub fn cmp_by_name(
        &self,
        registry: &EventTypeRegistry,
        other: &Self,
        other_registry: &EventTypeRegistry,
    ) -> Ordering {
        self.names(registry).cmp(other.names(other_registry))
    }
}

/// An episode whose event types are bound to duration intervals.
///
/// `intervals` holds indices into the interval list the episode was generated
/// from, in the order the index generator produced them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralizedEpisode {
    episode: Episode,
    intervals: Vec<usize>,
}

impl GeneralizedEpisode {
    pub const fn new(episode: Episode, intervals: Vec<usize>) -> Self {
        Self { episode, intervals }
    }

    pub const fn episode(&self) -> &Episode {
        &self.episode
    }

    pub fn arity(&self) -> usize {
        self.episode.arity()
    }

    pub fn interval_indices(&self) -> &[usize] {
        &self.intervals
    }

    /// Looks the bound intervals up in `durations`.
    ///
    /// Returns `None` if any index is out of range, which means `durations` is
    /// not the list this episode was generated from.
    pub fn resolve_intervals(&self, durations: &[Interval]) -> Option<Vec<Interval>> {
        self.intervals
            .iter()
            .map(|&ix| durations.get(ix).copied())
            .collect()
    }

    /// Orders by event-type names first, then by interval indices.
    pub fn cmp_by_name(
        &self,
        registry: &EventTypeRegistry,
        other: &Self,
        other_registry: &EventTypeRegistry,
    ) -> Ordering {
        self.episode
            .cmp_by_name(registry, &other.episode, other_registry)
            .then_with(|| self.intervals.cmp(&other.intervals))
    }
}
