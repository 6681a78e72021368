//! Ordering and label display modes for event types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Total orderings the registry can rank its event types by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderMode {
    /// Ascending string comparison of names.
    NameLexical,
    /// Names parsed as base-10 integers, ascending.
    NameNumeric,
    /// Insertion order; the ordinal equals the id.
    OnsetTime,
    /// Ascending vote count, ties kept in insertion order.
    VoteCount,
}

impl OrderMode {
    pub const ALL: [Self; 4] = [
        Self::NameLexical,
        Self::NameNumeric,
        Self::OnsetTime,
        Self::VoteCount,
    ];

    /// The string key identifying this mode.
    pub const fn key(self) -> &'static str {
        match self {
            Self::NameLexical => "nameLexical",
            Self::NameNumeric => "nameNumeric",
            Self::OnsetTime => "onsetTime",
            Self::VoteCount => "voteCount",
        }
    }

    /// Resolves a key case-insensitively. Unknown keys fall back to
    /// [`OrderMode::NameLexical`].
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(key))
            .unwrap_or(Self::NameLexical)
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for OrderMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_key(s))
    }
}

impl Serialize for OrderMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for OrderMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_key(&s))
    }
}

/// Which text a label carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Name,
    Alias,
    Ordinal,
}

impl DisplayMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Alias => "alias",
            Self::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = UnknownDisplayMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "alias" => Ok(Self::Alias),
            "ordinal" => Ok(Self::Ordinal),
            _ => Err(UnknownDisplayMode(s.to_string())),
        }
    }
}

/// Error type for unknown display mode strings.
#[derive(Debug, Clone)]
pub struct UnknownDisplayMode(String);

impl fmt::Display for UnknownDisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown display mode: {} (expected name, alias or ordinal)",
            self.0
        )
    }
}

impl std::error::Error for UnknownDisplayMode {}

/// One label in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedLabel {
    pub ordinal: usize,
    pub text: String,
}
