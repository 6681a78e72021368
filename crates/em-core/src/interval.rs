//! Duration windows that episode candidates can be bound to.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building an [`Interval`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IntervalError {
    #[error("interval bounds must be finite, got [{low}, {high}]")]
    NonFinite { low: f64, high: f64 },

    #[error("interval lower bound {low} exceeds upper bound {high}")]
    Inverted { low: f64, high: f64 },

    #[error("interval must be written as LOW-HIGH, got {0:?}")]
    Malformed(String),

    #[error("invalid interval bound {0:?}")]
    InvalidBound(String),
}

/// An immutable duration window `[low, high]`.
///
/// Candidates refer to intervals by their position in the caller's list, so an
/// interval carries no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInterval", into = "RawInterval")]
pub struct Interval {
    low: f64,
    high: f64,
}

#[derive(Serialize, Deserialize)]
struct RawInterval {
    low: f64,
    high: f64,
}

impl Interval {
    /// Creates an interval, rejecting non-finite or inverted bounds.
    pub fn new(low: f64, high: f64) -> Result<Self, IntervalError> {
        if !low.is_finite() || !high.is_finite() {
            return Err(IntervalError::NonFinite { low, high });
        }
        if low > high {
            return Err(IntervalError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub const fn low(&self) -> f64 {
        self.low
    }

    pub const fn high(&self) -> f64 {
        self.high
    }

    /// Width of the window.
    pub fn span(&self) -> f64 {
        self.high - self.low
    }

    /// Whether `duration` falls inside the window, bounds included.
    pub fn contains(&self, duration: f64) -> bool {
        (self.low..=self.high).contains(&duration)
    }
}

impl TryFrom<RawInterval> for Interval {
    type Error = IntervalError;

    fn try_from(raw: RawInterval) -> Result<Self, Self::Error> {
        Self::new(raw.low, raw.high)
    }
}

impl From<Interval> for RawInterval {
    fn from(interval: Interval) -> Self {
        Self {
            low: interval.low,
            high: interval.high,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.low, self.high)
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    /// Parses `LOW-HIGH`, e.g. `0.5-2`, `-1-2` or `1e-3-2`.
    ///
    /// The separator is the first `-` that is neither a leading sign nor part
    /// of an exponent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let separator = text.char_indices().skip(1).find(|&(ix, c)| {
            c == '-' && !matches!(text[..ix].chars().next_back(), Some('e' | 'E'))
        });
        let Some((ix, _)) = separator else {
            return Err(IntervalError::Malformed(s.to_string()));
        };
        let (low, high) = (&text[..ix], &text[ix + 1..]);
        let parse = |bound: &str| {
            bound
                .trim()
                .parse::<f64>()
                .map_err(|_| IntervalError::InvalidBound(bound.trim().to_string()))
        };
        Self::new(parse(low)?, parse(high)?)
    }
}
