//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by registry lookups, mutations and candidate generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No event type is bound to the given id or name.
    #[error("event type not found: {0}")]
    NotFound(TypeKey),

    /// The provided name was empty after trimming.
    #[error("event type name cannot be empty")]
    EmptyName,

    /// Generalized episodes need at least one interval slot.
    #[error("episode dimension must be at least 1")]
    ZeroDimension,

    /// Two records in a snapshot claim the same id.
    #[error("duplicate event type id: {0}")]
    DuplicateId(EventTypeId),

    /// Two records in a snapshot claim the same name.
    #[error("duplicate event type name: {0}")]
    DuplicateName(String),
}

/// Numeric key of an event type, local to the registry that assigned it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventTypeId(usize);

impl EventTypeId {
    /// Wraps a raw id.
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub const fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for EventTypeId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated event type name.
///
/// Names are trimmed on construction and must not be empty. The name is the
/// identity key of an event type: two registries agree on a type when they agree
/// on its name, whatever ids they assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventTypeName(String);

impl EventTypeName {
    /// Trims and validates a name.
    pub fn new(name: &str) -> Result<Self, RegistryError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventTypeName {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<EventTypeName> for String {
    fn from(name: EventTypeName) -> Self {
        name.0
    }
}

impl fmt::Display for EventTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for EventTypeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Either key an event type can be addressed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKey {
    Id(EventTypeId),
    Name(String),
}

impl From<EventTypeId> for TypeKey {
    fn from(id: EventTypeId) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self::Name(name.trim().to_string())
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Name(name) => write!(f, "name {name:?}"),
        }
    }
}

/// Scale applied to character codes when deriving a default position.
pub const EDGE_SCALE: f64 = 50.0;

/// A 2-D layout coordinate for an event type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    /// Set once the position was assigned explicitly rather than derived.
    #[serde(default)]
    pub pinned: bool,
}

impl Position {
    /// Derives the default position from the first two characters of a name.
    ///
    /// Each coordinate is `(1 + c - '0') * EDGE_SCALE` for its character code `c`.
    /// A single-character name keeps `y = 1.0`.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars().map(|c| {
            (1.0 + f64::from(u32::from(c)) - f64::from(u32::from('0'))) * EDGE_SCALE
        });
        let x = chars.next().unwrap_or(0.0);
        let y = chars.next().unwrap_or(1.0);
        Self {
            x,
            y,
            pinned: false,
        }
    }

    /// Creates an explicitly assigned position.
    pub const fn pinned(x: f64, y: f64) -> Self {
        Self { x, y, pinned: true }
    }
}
