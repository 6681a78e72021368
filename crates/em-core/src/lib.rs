//! Core domain logic for the episode miner.
//!
//! This crate contains the fundamental types and logic for:
//! - Registry: binding event type names to ids, counting votes, ranking types
//! - Permutor: enumerating interval index tuples
//! - Episodes: candidate records handed to the frequency-counting stage

pub mod episode;
pub mod interval;
pub mod order;
pub mod permutor;
pub mod registry;
pub mod types;

pub use episode::{Episode, EpisodeError, EpisodeSlot, GeneralizedEpisode};
pub use interval::{Interval, IntervalError};
pub use order::{DisplayMode, OrderMode, OrderedLabel, UnknownDisplayMode};
pub use permutor::{Permutor, PermutorMode};
pub use registry::{EventType, EventTypeRegistry, PositionError};
pub use types::{EDGE_SCALE, EventTypeId, EventTypeName, Position, RegistryError, TypeKey};
