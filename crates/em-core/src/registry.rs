//! Event type registry.
//!
//! Event types have arbitrarily long names but are computed with by integer id.
//! The registry binds each name to an id exactly once and keeps three views of
//! the same records in step:
//!
//! - the insertion-ordered arena (`types`)
//! - a name index
//! - an id index
//!
//! Both indices point into the arena, and the only way a record enters the
//! arena is the private `insert` routine. There is no removal: ids and names
//! are bind-once. Aliases, votes, ordinals and positions may change, always
//! through registry methods keyed by id or name.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::episode::{Episode, GeneralizedEpisode};
use crate::interval::Interval;
use crate::order::{DisplayMode, OrderMode, OrderedLabel};
use crate::permutor::Permutor;
use crate::types::{EventTypeId, EventTypeName, Position, RegistryError, TypeKey};

/// Errors from a `"name x y"` position request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("could not parse position request {0:?}: expected \"NAME X Y\"")]
    Malformed(String),

    #[error("event type not found: {0}")]
    UnknownName(String),

    #[error("invalid coordinate {value:?}")]
    InvalidCoordinate {
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

/// A distinct category of event, owned by an [`EventTypeRegistry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventType {
    id: EventTypeId,
    name: EventTypeName,
    alias: String,
    #[serde(default)]
    votes: u64,
    ordinal: usize,
    position: Position,
}

impl EventType {
    fn new(id: EventTypeId, name: EventTypeName) -> Self {
        let position = Position::from_name(name.as_str());
        Self {
            id,
            alias: name.as_str().to_string(),
            name,
            votes: 0,
            ordinal: id.value(),
            position,
        }
    }

    pub const fn id(&self) -> EventTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// How many times this type was counted in the input.
    pub const fn votes(&self) -> u64 {
        self.votes
    }

    /// Rank under the registry's current order mode.
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether the position was set explicitly.
    pub const fn is_pinned(&self) -> bool {
        self.position.pinned
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The dictionary of event types observed in an event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "RegistrySnapshot", try_from = "RegistrySnapshot")]
pub struct EventTypeRegistry {
    types: Vec<EventType>,
    by_name: HashMap<String, usize>,
    by_id: HashMap<EventTypeId, usize>,
    order: OrderMode,
    /// Running total of votes across all types.
    sample_size: u64,
}

impl Default for EventTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EventTypeRegistry {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            by_name: HashMap::new(),
            by_id: HashMap::new(),
            order: OrderMode::OnsetTime,
            sample_size: 0,
        }
    }

    /// Builds a registry by [`put`](Self::put)ting each name in turn.
    pub fn from_names<I, S>(names: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.put(name.as_ref())?;
        }
        Ok(registry)
    }

    /// The single path by which records enter the registry.
    ///
    /// Callers must have checked that neither the id nor the name is bound.
    fn insert(&mut self, record: EventType) -> EventTypeId {
        let index = self.types.len();
        let id = record.id;
        tracing::debug!(%id, name = %record.name, "registered event type");
        self.by_id.insert(id, index);
        self.by_name.insert(record.name.as_str().to_string(), index);
        self.types.push(record);
        id
    }

    /// Registers `name` and returns its id.
    ///
    /// The name is trimmed. A name that is already registered keeps its id and
    /// its votes are left alone. A new name gets the next sequential id, which
    /// is the current number of types unless an explicit-id insert already took
    /// it, in which case the next free id above it.
    pub fn put(&mut self, name: &str) -> Result<EventTypeId, RegistryError> {
        let name = EventTypeName::new(name)?;
        Ok(self.put_name(name))
    }

    fn put_name(&mut self, name: EventTypeName) -> EventTypeId {
        if let Some(&index) = self.by_name.get(name.as_str()) {
            return self.types[index].id;
        }
        let mut next = self.types.len();
        while self.by_id.contains_key(&EventTypeId::new(next)) {
            next += 1;
        }
        self.insert(EventType::new(EventTypeId::new(next), name))
    }

    /// Registers `name` under an explicit id.
    ///
    /// Returns `false` if `id` is already bound. If `name` is already
    /// registered this returns `true` without checking that it is bound to
    /// `id`.
    #[must_use = "a duplicate id is reported only through the return value"]
    pub fn put_with_id(&mut self, id: EventTypeId, name: &str) -> Result<bool, RegistryError> {
        let name = EventTypeName::new(name)?;
        if self.by_id.contains_key(&id) {
            tracing::debug!(%id, %name, "event type id already bound");
            return Ok(false);
        }
        if self.by_name.contains_key(name.as_str()) {
            return Ok(true);
        }
        self.insert(EventType::new(id, name));
        Ok(true)
    }

    /// Registers `name` if needed and counts one occurrence of it.
    pub fn observe(&mut self, name: &str) -> Result<EventTypeId, RegistryError> {
        let id = self.put(name)?;
        self.increment_vote(id)?;
        Ok(id)
    }

    fn index_of(&self, key: &TypeKey) -> Option<usize> {
        match key {
            TypeKey::Id(id) => self.by_id.get(id).copied(),
            TypeKey::Name(name) => self.by_name.get(name.trim()).copied(),
        }
    }

    fn require(&self, key: TypeKey) -> Result<usize, RegistryError> {
        self.index_of(&key).ok_or(RegistryError::NotFound(key))
    }

    /// Counts one occurrence of the type bound to `id`.
    pub fn increment_vote(&mut self, id: EventTypeId) -> Result<(), RegistryError> {
        let index = self.require(id.into())?;
        self.types[index].votes += 1;
        self.sample_size += 1;
        Ok(())
    }

    /// Zeroes every type's votes. The sample size is tracked separately; see
    /// [`reset_sample_size`](Self::reset_sample_size).
    pub fn reset_votes(&mut self) {
        for record in &mut self.types {
            record.votes = 0;
        }
    }

    pub const fn reset_sample_size(&mut self) {
        self.sample_size = 0;
    }

    /// Total votes counted since creation or the last
    /// [`reset_sample_size`](Self::reset_sample_size).
    pub const fn sample_size(&self) -> u64 {
        self.sample_size
    }

    pub fn set_alias(
        &mut self,
        key: impl Into<TypeKey>,
        alias: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let index = self.require(key.into())?;
        self.types[index].alias = alias.into();
        Ok(())
    }

    /// Pins the position of an event type.
    pub fn pin_position(
        &mut self,
        key: impl Into<TypeKey>,
        x: f64,
        y: f64,
    ) -> Result<(), RegistryError> {
        let index = self.require(key.into())?;
        self.types[index].position = Position::pinned(x, y);
        Ok(())
    }

    /// Applies a `"NAME X Y"` request. Tokens past the third are ignored.
    pub fn set_position(&mut self, request: &str) -> Result<(), PositionError> {
        let mut tokens = request.split_whitespace();
        let (Some(name), Some(x), Some(y)) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(PositionError::Malformed(request.to_string()));
        };
        let coordinate = |value: &str| {
            value
                .parse::<f64>()
                .map_err(|source| PositionError::InvalidCoordinate {
                    value: value.to_string(),
                    source,
                })
        };
        let x = coordinate(x)?;
        let y = coordinate(y)?;
        self.pin_position(name, x, y).map_err(|_| {
            tracing::warn!(name, "position request for unknown event type");
            PositionError::UnknownName(name.to_string())
        })
    }

    pub fn id_of(&self, name: &str) -> Option<EventTypeId> {
        self.get_by_name(name).map(EventType::id)
    }

    pub fn name_of(&self, id: EventTypeId) -> Option<&str> {
        self.get(id).map(EventType::name)
    }

    pub fn get(&self, id: EventTypeId) -> Option<&EventType> {
        self.by_id.get(&id).map(|&index| &self.types[index])
    }

    pub fn get_by_name(&self, name: &str) -> Option<&EventType> {
        self.by_name.get(name.trim()).map(|&index| &self.types[index])
    }

    /// `type count - ordinal` for the type bound to `id`.
    pub fn reverse_rank(&self, id: EventTypeId) -> Option<i64> {
        let ordinal = self.get(id)?.ordinal;
        let count = i64::try_from(self.types.len()).unwrap_or(i64::MAX);
        let ordinal = i64::try_from(ordinal).unwrap_or(i64::MAX);
        Some(count.saturating_sub(ordinal))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Event types in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, EventType> {
        self.types.iter()
    }

    /// All names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.types.iter().map(EventType::name).collect()
    }

    /// Largest bound id, or `None` for an empty registry.
    pub fn max_id(&self) -> Option<EventTypeId> {
        self.types.iter().map(EventType::id).max()
    }

    /// Smallest bound id, or `None` for an empty registry.
    pub fn min_id(&self) -> Option<EventTypeId> {
        self.types.iter().map(EventType::id).min()
    }

    /// Registers every name of `other`, in its insertion order.
    ///
    /// Ids are assigned afresh, so gaps in `other` are closed up. Votes,
    /// aliases and positions are not carried over.
    pub fn add_all(&mut self, other: &Self) {
        for record in &other.types {
            self.put_name(record.name.clone());
        }
    }

    /// The order mode most recently applied.
    pub const fn order(&self) -> OrderMode {
        self.order
    }

    /// Re-ranks every type under `mode`.
    ///
    /// [`OrderMode::NameNumeric`] requires every name to parse as a 32-bit
    /// base-10 integer. If any name does not, the ordinals are left as they were and a
    /// warning is logged.
    pub fn set_ordinal(&mut self, mode: OrderMode) {
        self.order = mode;
        let mut ranked: Vec<usize> = (0..self.types.len()).collect();
        match mode {
            OrderMode::NameLexical => {
                ranked.sort_by(|&a, &b| self.types[a].name.cmp(&self.types[b].name));
            }
            OrderMode::NameNumeric => {
                let keys: Result<Vec<i32>, _> = self
                    .types
                    .iter()
                    .map(|record| record.name.as_str().parse::<i32>())
                    .collect();
                match keys {
                    Ok(keys) => ranked.sort_by_key(|&index| keys[index]),
                    Err(err) => {
                        tracing::warn!(%err, "could not parse event type names as numbers; ordinals unchanged");
                        return;
                    }
                }
            }
            OrderMode::VoteCount => {
                ranked.sort_by_key(|&index| self.types[index].votes);
            }
            OrderMode::OnsetTime => {
                for record in &mut self.types {
                    record.ordinal = record.id.value();
                }
                tracing::debug!(%mode, "re-ranked event types");
                return;
            }
        }
        for (ordinal, index) in ranked.into_iter().enumerate() {
            self.types[index].ordinal = ordinal;
        }
        tracing::debug!(%mode, "re-ranked event types");
    }

    /// Re-ranks by a case-insensitive mode key; unknown keys mean
    /// [`OrderMode::NameLexical`].
    pub fn set_ordinal_key(&mut self, key: &str) {
        self.set_ordinal(OrderMode::from_key(key));
    }

    /// Labels for every type, ascending by ordinal.
    pub fn labels(&self, display: DisplayMode) -> Vec<OrderedLabel> {
        let mut sorted: Vec<&EventType> = self.types.iter().collect();
        sorted.sort_by_key(|record| record.ordinal);
        sorted
            .into_iter()
            .map(|record| OrderedLabel {
                ordinal: record.ordinal,
                text: match display {
                    DisplayMode::Name => record.name.as_str().to_string(),
                    DisplayMode::Alias => record.alias.clone(),
                    DisplayMode::Ordinal => record.ordinal.to_string(),
                },
            })
            .collect()
    }

    /// Event types sorted by ascending id.
    fn by_ascending_id(&self) -> Vec<&EventType> {
        let mut sorted: Vec<&EventType> = self.types.iter().collect();
        sorted.sort_by_key(|record| record.id);
        sorted
    }

    /// One single-slot episode per event type, in id order.
    pub fn episode_list(&self) -> Vec<Episode> {
        self.by_ascending_id()
            .into_iter()
            .map(|record| Episode::unary(record.id, record.votes, self.sample_size))
            .collect()
    }

    /// Episodes binding each event type to combinations of `durations`.
    ///
    /// Types are visited in id order.
    /// For `dimension == 1` every type is paired with each interval once. For
    /// larger dimensions every type is paired with each `dimension`-tuple of
    /// interval indices, first index varying fastest. Votes are zero.
    pub fn generalized_episode_list(
        &self,
        durations: &[Interval],
        dimension: usize,
    ) -> Result<Vec<GeneralizedEpisode>, RegistryError> {
        if dimension == 0 {
            return Err(RegistryError::ZeroDimension);
        }
        let mut episodes = Vec::new();
        for record in self.by_ascending_id() {
            for tuple in Permutor::new(durations.len(), dimension) {
                episodes.push(GeneralizedEpisode::new(
                    Episode::unary(record.id, 0, 0),
                    tuple,
                ));
            }
        }
        tracing::debug!(
            types = self.types.len(),
            intervals = durations.len(),
            dimension,
            episodes = episodes.len(),
            "generated episode candidates"
        );
        Ok(episodes)
    }

    /// Compares an event type of this registry with one of `other` by name.
    ///
    /// Returns `None` if either id is unbound.
    pub fn compare_event(
        &self,
        id: EventTypeId,
        other: &Self,
        other_id: EventTypeId,
    ) -> Option<Ordering> {
        Some(self.name_of(id)?.cmp(other.name_of(other_id)?))
    }
}

impl<'a> IntoIterator for &'a EventTypeRegistry {
    type Item = &'a EventType;
    type IntoIter = std::slice::Iter<'a, EventType>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl fmt::Display for EventTypeRegistry {
    /// One `[index]name(alias):votes` line per type, in insertion order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, record) in self.types.iter().enumerate() {
            writeln!(
                f,
                "[{index}]{}({}):{}",
                record.name, record.alias, record.votes
            )?;
        }
        Ok(())
    }
}

impl FromStr for EventTypeRegistry {
    type Err = RegistryError;

    /// Builds a registry from whitespace-separated names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_names(s.split_whitespace())
    }
}

/// Serialized form of a registry.
///
/// Ids and names are checked for duplicates on load. Ordinals and the sample
/// size are restored as written: neither is a permutation or a vote total in
/// general, since explicit-id inserts take `ordinal = id` and
/// [`EventTypeRegistry::reset_sample_size`] leaves votes in place.
#[derive(Serialize, Deserialize)]
struct RegistrySnapshot {
    order: OrderMode,
    #[serde(default)]
    sample_size: u64,
    types: Vec<EventType>,
}

impl From<EventTypeRegistry> for RegistrySnapshot {
    fn from(registry: EventTypeRegistry) -> Self {
        Self {
            order: registry.order,
            sample_size: registry.sample_size,
            types: registry.types,
        }
    }
}

impl TryFrom<RegistrySnapshot> for EventTypeRegistry {
    type Error = RegistryError;

    fn try_from(snapshot: RegistrySnapshot) -> Result<Self, Self::Error> {
        let mut registry = Self::new();
        for record in snapshot.types {
            if registry.by_id.contains_key(&record.id) {
                return Err(RegistryError::DuplicateId(record.id));
            }
            if registry.by_name.contains_key(record.name.as_str()) {
                return Err(RegistryError::DuplicateName(record.name.into()));
            }
            registry.insert(record);
        }
        registry.order = snapshot.order;
        registry.sample_size = snapshot.sample_size;
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;

    fn id(n: usize) -> EventTypeId {
        EventTypeId::new(n)
    }

    fn ordinals(registry: &EventTypeRegistry) -> Vec<usize> {
        registry.iter().map(EventType::ordinal).collect()
    }

    fn registry_of(names: &[&str]) -> EventTypeRegistry {
        EventTypeRegistry::from_names(names).unwrap()
    }

    // ========== Insertion ==========

    #[test]
    fn put_is_idempotent() {
        let mut registry = EventTypeRegistry::new();
        let first = registry.put("login").unwrap();
        let second = registry.put("  login ").unwrap();
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn put_assigns_sequential_ids_in_call_order() {
        let mut registry = EventTypeRegistry::new();
        let ids: Vec<_> = ["c", "a", "b", "d"]
            .iter()
            .map(|name| registry.put(name).unwrap())
            .collect();
        assert_eq!(ids, vec![id(0), id(1), id(2), id(3)]);
    }

    #[test]
    fn put_does_not_vote() {
        let mut registry = EventTypeRegistry::new();
        let login = registry.put("login").unwrap();
        registry.put("login").unwrap();
        assert_eq!(registry.get(login).unwrap().votes(), 0);
        assert_eq!(registry.sample_size(), 0);
    }

    #[test]
    fn put_rejects_blank_names() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put("  "), Err(RegistryError::EmptyName));
        assert!(registry.is_empty());
    }

    #[test]
    fn put_with_id_rejects_bound_id() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put_with_id(id(4), "a"), Ok(true));
        assert_eq!(registry.put_with_id(id(4), "b"), Ok(false));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.name_of(id(4)), Some("a"));
        assert_eq!(registry.id_of("b"), None);
    }

    #[test]
    fn put_with_id_accepts_existing_name_under_other_id() {
        let mut registry = EventTypeRegistry::new();
        registry.put("a").unwrap();
        assert_eq!(registry.put_with_id(id(9), "a"), Ok(true));
        assert_eq!(registry.id_of("a"), Some(id(0)));
        assert!(registry.get(id(9)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn put_skips_ids_taken_by_explicit_inserts() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put_with_id(id(1), "one"), Ok(true));
        let next = registry.put("fresh").unwrap();
        assert_eq!(next, id(2));
        assert_eq!(registry.name_of(id(1)), Some("one"));
        assert_eq!(registry.name_of(id(2)), Some("fresh"));
    }

    #[test]
    fn registry_parses_from_whitespace_separated_names() {
        let registry: EventTypeRegistry = " b\ta \n b c ".parse().unwrap();
        assert_eq!(registry.names(), vec!["b", "a", "c"]);
    }

    // ========== Votes and metadata ==========

    #[test]
    fn increment_vote_updates_type_and_sample_size() {
        let mut registry = registry_of(&["a", "b"]);
        registry.increment_vote(id(1)).unwrap();
        registry.increment_vote(id(1)).unwrap();
        registry.increment_vote(id(0)).unwrap();
        assert_eq!(registry.get(id(1)).unwrap().votes(), 2);
        assert_eq!(registry.sample_size(), 3);
    }

    #[test]
    fn increment_vote_on_unknown_id_is_not_found() {
        let mut registry = registry_of(&["a"]);
        assert_eq!(
            registry.increment_vote(id(3)),
            Err(RegistryError::NotFound(TypeKey::Id(id(3))))
        );
        assert_eq!(registry.sample_size(), 0);
    }

    #[test]
    fn reset_votes_leaves_sample_size() {
        let mut registry = registry_of(&["a"]);
        registry.observe("a").unwrap();
        registry.reset_votes();
        assert_eq!(registry.get(id(0)).unwrap().votes(), 0);
        assert_eq!(registry.sample_size(), 1);
        registry.reset_sample_size();
        assert_eq!(registry.sample_size(), 0);
    }

    #[test]
    fn set_alias_by_id_and_name() {
        let mut registry = registry_of(&["a", "b"]);
        registry.set_alias(id(0), "Alpha").unwrap();
        registry.set_alias(" b ", "Beta").unwrap();
        assert_eq!(registry.get(id(0)).unwrap().alias(), "Alpha");
        assert_eq!(registry.get_by_name("b").unwrap().alias(), "Beta");
        assert_eq!(registry.get(id(0)).unwrap().name(), "a");
    }

    #[test]
    fn set_alias_on_unknown_key_is_not_found() {
        let mut registry = registry_of(&["a"]);
        assert_eq!(
            registry.set_alias("ghost", "x"),
            Err(RegistryError::NotFound(TypeKey::Name("ghost".to_string())))
        );
        assert!(registry.set_alias(id(5), "x").is_err());
    }

    // ========== Positions ==========

    #[test]
    #[expect(clippy::float_cmp, reason = "coordinates are parsed exactly")]
    fn set_position_pins_type() {
        let mut registry = registry_of(&["login"]);
        assert!(!registry.get(id(0)).unwrap().is_pinned());
        registry.set_position("login 1.5 -2").unwrap();
        let position = registry.get(id(0)).unwrap().position();
        assert_eq!(position.x, 1.5);
        assert_eq!(position.y, -2.0);
        assert!(position.pinned);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "coordinates are stored as given")]
    fn pin_position_by_id() {
        let mut registry = registry_of(&["a", "b"]);
        registry.pin_position(id(1), 10.0, 20.0).unwrap();
        let position = registry.get(id(1)).unwrap().position();
        assert_eq!(position.x, 10.0);
        assert_eq!(position.y, 20.0);
        assert!(position.pinned);
        assert!(!registry.get(id(0)).unwrap().is_pinned());
        assert!(registry.pin_position(id(2), 0.0, 0.0).is_err());
    }

    #[test]
    fn set_position_unknown_name_leaves_registry_unchanged() {
        let mut registry = registry_of(&["login"]);
        let before = registry.get(id(0)).unwrap().clone();
        assert_eq!(
            registry.set_position("ghost 1.0 2.0"),
            Err(PositionError::UnknownName("ghost".to_string()))
        );
        assert_eq!(registry.get(id(0)), Some(&before));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn set_position_rejects_bad_coordinates() {
        let mut registry = registry_of(&["login"]);
        assert!(matches!(
            registry.set_position("login 1.0 north"),
            Err(PositionError::InvalidCoordinate { value, .. }) if value == "north"
        ));
        assert_eq!(
            registry.set_position("login 1.0"),
            Err(PositionError::Malformed("login 1.0".to_string()))
        );
        assert!(!registry.get(id(0)).unwrap().is_pinned());
    }

    // ========== Lookups ==========

    #[test]
    fn lookups_report_absence() {
        let registry = registry_of(&["a"]);
        assert_eq!(registry.id_of(" a "), Some(id(0)));
        assert_eq!(registry.id_of("z"), None);
        assert_eq!(registry.name_of(id(1)), None);
        assert!(registry.get(id(1)).is_none());
        assert!(registry.get_by_name("z").is_none());
    }

    #[test]
    fn min_and_max_id() {
        let registry = registry_of(&["a", "b", "c"]);
        assert_eq!(registry.max_id(), Some(id(2)));
        assert_eq!(registry.min_id(), Some(id(0)));
    }

    #[test]
    fn min_and_max_id_of_empty_registry_are_absent() {
        let registry = EventTypeRegistry::new();
        assert_eq!(registry.max_id(), None);
        assert_eq!(registry.min_id(), None);
    }

    #[test]
    fn min_and_max_id_with_gaps() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put_with_id(id(7), "x"), Ok(true));
        assert_eq!(registry.put_with_id(id(3), "y"), Ok(true));
        assert_eq!(registry.max_id(), Some(id(7)));
        assert_eq!(registry.min_id(), Some(id(3)));
    }

    #[test]
    fn add_all_compacts_ids() {
        let mut source = EventTypeRegistry::new();
        assert_eq!(source.put_with_id(id(5), "b"), Ok(true));
        assert_eq!(source.put_with_id(id(9), "a"), Ok(true));
        source.increment_vote(id(5)).unwrap();
        source.set_alias(id(9), "Alpha").unwrap();

        let mut target = EventTypeRegistry::new();
        target.add_all(&source);

        assert_eq!(target.name_of(id(0)), Some("b"));
        assert_eq!(target.name_of(id(1)), Some("a"));
        assert_eq!(target.get(id(0)).unwrap().votes(), 0);
        assert_eq!(target.get(id(1)).unwrap().alias(), "a");
        assert_eq!(target.sample_size(), 0);
    }

    #[test]
    fn compare_event_across_registries() {
        let left = registry_of(&["x", "m"]);
        let right = registry_of(&["m"]);
        assert_eq!(
            left.compare_event(id(1), &right, id(0)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            left.compare_event(id(0), &right, id(0)),
            Some(Ordering::Greater)
        );
        assert_eq!(left.compare_event(id(0), &right, id(3)), None);
    }

    // ========== Ordering ==========

    #[test]
    fn new_types_start_in_onset_order() {
        let registry = registry_of(&["c", "a", "b"]);
        assert_eq!(registry.order(), OrderMode::OnsetTime);
        assert_eq!(ordinals(&registry), vec![0, 1, 2]);
    }

    #[test]
    fn lexical_ordering() {
        let mut registry = registry_of(&["c", "a", "b"]);
        registry.set_ordinal(OrderMode::NameLexical);
        assert_eq!(ordinals(&registry), vec![2, 0, 1]);
        assert_eq!(registry.reverse_rank(id(0)), Some(1));
        assert_eq!(registry.reverse_rank(id(1)), Some(3));
    }

    #[test]
    fn numeric_ordering() {
        let mut registry = registry_of(&["10", "9", "-3", "+100"]);
        registry.set_ordinal(OrderMode::NameNumeric);
        assert_eq!(ordinals(&registry), vec![2, 1, 0, 3]);
    }

    #[test]
    fn numeric_ordering_aborts_outside_32_bit_range() {
        let mut registry = registry_of(&["3000000000", "1", "2"]);
        registry.set_ordinal(OrderMode::NameNumeric);
        assert_eq!(ordinals(&registry), vec![0, 1, 2]);

        let mut registry = registry_of(&["2147483647", "-2147483648"]);
        registry.set_ordinal(OrderMode::NameNumeric);
        assert_eq!(ordinals(&registry), vec![1, 0]);
    }

    #[test]
    fn numeric_ordering_aborts_on_non_numeric_name() {
        let mut registry = registry_of(&["b", "10", "a", "9"]);
        registry.set_ordinal(OrderMode::NameLexical);
        let before = ordinals(&registry);
        registry.set_ordinal(OrderMode::NameNumeric);
        assert_eq!(ordinals(&registry), before);
        assert_eq!(registry.order(), OrderMode::NameNumeric);
    }

    #[test]
    fn vote_ordering_is_stable() {
        let mut registry = registry_of(&["a", "b", "c", "d"]);
        for name in ["c", "c", "a", "d"] {
            registry.observe(name).unwrap();
        }
        registry.set_ordinal(OrderMode::VoteCount);

        let mut by_ordinal: Vec<&EventType> = registry.iter().collect();
        by_ordinal.sort_by_key(|record| record.ordinal());
        let votes: Vec<u64> = by_ordinal.iter().map(|record| record.votes()).collect();
        let names: Vec<&str> = by_ordinal.iter().map(|record| record.name()).collect();
        assert_eq!(votes, vec![0, 1, 1, 2]);
        assert_eq!(names, vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn onset_ordering_restores_ids() {
        let mut registry = registry_of(&["c", "a", "b"]);
        registry.set_ordinal(OrderMode::NameLexical);
        registry.set_ordinal(OrderMode::OnsetTime);
        for record in &registry {
            assert_eq!(record.ordinal(), record.id().value());
        }
    }

    #[test]
    fn ordinal_key_falls_back_to_lexical() {
        let mut registry = registry_of(&["b", "a"]);
        registry.set_ordinal_key("shoeSize");
        assert_eq!(registry.order(), OrderMode::NameLexical);
        assert_eq!(ordinals(&registry), vec![1, 0]);

        registry.set_ordinal_key("ONSETTIME");
        assert_eq!(registry.order(), OrderMode::OnsetTime);
    }

    #[test]
    fn labels_follow_ordinals() {
        let mut registry = registry_of(&["c", "a", "b"]);
        registry.set_alias("a", "Alpha").unwrap();
        registry.set_ordinal(OrderMode::NameLexical);

        let texts = |display: DisplayMode| -> Vec<String> {
            registry
                .labels(display)
                .into_iter()
                .map(|label| label.text)
                .collect()
        };
        assert_eq!(texts(DisplayMode::Name), vec!["a", "b", "c"]);
        assert_eq!(texts(DisplayMode::Alias), vec!["Alpha", "b", "c"]);
        assert_eq!(texts(DisplayMode::Ordinal), vec!["0", "1", "2"]);
    }

    // ========== Episodes ==========

    #[test]
    fn episode_list_has_one_unary_episode_per_type() {
        let mut registry = registry_of(&["a", "b"]);
        registry.observe("b").unwrap();
        registry.observe("b").unwrap();

        let episodes = registry.episode_list();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[1].event_type(0), Some(id(1)));
        assert_eq!(episodes[1].votes(0), Some(2));
        assert_eq!(episodes[0].votes(0), Some(0));
        assert!(episodes.iter().all(|e| e.sample_size(0) == Some(2)));
    }

    #[test]
    fn generalized_single_pairs_each_type_with_each_interval() {
        let registry = registry_of(&["a", "b"]);
        let durations = [
            Interval::new(0.0, 1.0).unwrap(),
            Interval::new(1.0, 2.0).unwrap(),
            Interval::new(2.0, 4.0).unwrap(),
        ];
        let episodes = registry.generalized_episode_list(&durations, 1).unwrap();
        assert_eq!(episodes.len(), 6);

        let pairs: Vec<(EventTypeId, Vec<usize>)> = episodes
            .iter()
            .map(|e| (e.episode().event_type(0).unwrap(), e.interval_indices().to_vec()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (id(0), vec![0]),
                (id(0), vec![1]),
                (id(0), vec![2]),
                (id(1), vec![0]),
                (id(1), vec![1]),
                (id(1), vec![2]),
            ]
        );
        assert!(episodes.iter().all(|e| e.episode().votes(0) == Some(0)));
    }

    #[test]
    fn generalized_full_expands_cartesian_product() {
        let mut registry = registry_of(&["a"]);
        registry.observe("a").unwrap();
        let durations = [
            Interval::new(0.0, 1.0).unwrap(),
            Interval::new(1.0, 2.0).unwrap(),
        ];
        let episodes = registry.generalized_episode_list(&durations, 2).unwrap();
        let tuples: Vec<&[usize]> = episodes.iter().map(|e| e.interval_indices()).collect();
        assert_eq!(
            tuples,
            vec![&[0, 0][..], &[1, 0][..], &[0, 1][..], &[1, 1][..]]
        );
        assert!(episodes.iter().all(|e| e.episode().votes(0) == Some(0)));
    }

    #[test]
    fn episodes_follow_id_order_not_insertion_order() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put_with_id(id(7), "x"), Ok(true));
        assert_eq!(registry.put_with_id(id(3), "y"), Ok(true));

        let unary: Vec<EventTypeId> = registry
            .episode_list()
            .iter()
            .filter_map(|e| e.event_type(0))
            .collect();
        assert_eq!(unary, vec![id(3), id(7)]);

        let durations = [
            Interval::new(0.0, 1.0).unwrap(),
            Interval::new(1.0, 2.0).unwrap(),
        ];
        let generalized: Vec<(EventTypeId, Vec<usize>)> = registry
            .generalized_episode_list(&durations, 1)
            .unwrap()
            .iter()
            .map(|e| (e.episode().event_type(0).unwrap(), e.interval_indices().to_vec()))
            .collect();
        assert_eq!(
            generalized,
            vec![
                (id(3), vec![0]),
                (id(3), vec![1]),
                (id(7), vec![0]),
                (id(7), vec![1]),
            ]
        );
    }

    #[test]
    fn generalized_rejects_zero_dimension() {
        let registry = registry_of(&["a"]);
        assert_eq!(
            registry.generalized_episode_list(&[], 0),
            Err(RegistryError::ZeroDimension)
        );
    }

    #[test]
    fn generalized_without_intervals_is_empty() {
        let registry = registry_of(&["a", "b"]);
        assert!(registry.generalized_episode_list(&[], 1).unwrap().is_empty());
        assert!(registry.generalized_episode_list(&[], 3).unwrap().is_empty());
    }

    // ========== Textual forms ==========

    #[test]
    fn dump_lists_types_in_insertion_order() {
        let mut registry = registry_of(&["b", "a"]);
        registry.set_alias("a", "Alpha").unwrap();
        registry.observe("b").unwrap();
        assert_snapshot!(registry.to_string(), @r"
        [0]b(b):1
        [1]a(Alpha):0
        ");
    }

    #[test]
    fn snapshot_roundtrip_preserves_state() {
        let mut registry = registry_of(&["b", "a"]);
        registry.observe("a").unwrap();
        registry.set_alias("b", "Bee").unwrap();
        registry.set_position("a 3 4").unwrap();
        registry.set_ordinal(OrderMode::NameLexical);

        let json = serde_json::to_string(&registry).unwrap();
        let parsed: EventTypeRegistry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.order(), OrderMode::NameLexical);
        assert_eq!(parsed.sample_size(), 1);
        assert_eq!(parsed.to_string(), registry.to_string());
        assert_eq!(ordinals(&parsed), ordinals(&registry));
        assert_eq!(parsed.get(id(0)), registry.get(id(0)));
        assert_eq!(parsed.get(id(1)), registry.get(id(1)));
        assert_eq!(parsed.id_of("a"), Some(id(1)));
    }

    #[test]
    fn snapshot_restores_ordinals_and_sample_size_as_written() {
        let mut registry = EventTypeRegistry::new();
        assert_eq!(registry.put_with_id(id(4), "x"), Ok(true));
        registry.observe("x").unwrap();
        registry.reset_sample_size();

        let json = serde_json::to_string(&registry).unwrap();
        let parsed: EventTypeRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.get(id(4)).unwrap().ordinal(), 4);
        assert_eq!(parsed.get(id(4)).unwrap().votes(), 1);
        assert_eq!(parsed.sample_size(), 0);
    }

    #[test]
    fn snapshot_rejects_duplicate_names() {
        let registry = registry_of(&["a"]);
        let mut value = serde_json::to_value(&registry).unwrap();
        let mut clash = value["types"][0].clone();
        clash["id"] = serde_json::json!(1);
        value["types"].as_array_mut().unwrap().push(clash);

        let result: Result<EventTypeRegistry, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
