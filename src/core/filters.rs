use chrono::DateTime;
use thiserror::Error;

use crate::core::encoding::UnknownVariant;
use crate::core::range::{RangeError, RangePredicate};
use crate::models::{Match, MatchTimes, MatchType, Timestamp};

pub const NUM: &str = "num";
pub const ARENA: &str = "arena";
pub const TYPE: &str = "type";
pub const TEAM: &str = "team";
pub const GAME_START_TIME: &str = "game_start_time";
pub const GAME_END_TIME: &str = "game_end_time";
pub const SLOT_START_TIME: &str = "slot_start_time";
pub const SLOT_END_TIME: &str = "slot_end_time";

/// Every query key accepted as a match filter
pub const FILTER_KEYS: &[&str] = &[
    NUM,
    ARENA,
    TYPE,
    TEAM,
    GAME_START_TIME,
    GAME_END_TIME,
    SLOT_START_TIME,
    SLOT_END_TIME,
];

/// Errors raised while building a filter set from query parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("unknown match filter: {0}")]
    UnknownFilter(String),

    #[error("invalid value for {key}: {source}")]
    InvalidRange {
        key: String,
        #[source]
        source: RangeError,
    },

    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error(transparent)]
    UnknownMatchType(#[from] UnknownVariant),

    #[error("invalid limit {0:?}: expected a signed integer")]
    InvalidLimit(String),
}

/// Which of a match's times a timestamp filter looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    GameStart,
    GameEnd,
    SlotStart,
    SlotEnd,
}

impl TimeField {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            GAME_START_TIME => Some(Self::GameStart),
            GAME_END_TIME => Some(Self::GameEnd),
            SLOT_START_TIME => Some(Self::SlotStart),
            SLOT_END_TIME => Some(Self::SlotEnd),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::GameStart => GAME_START_TIME,
            Self::GameEnd => GAME_END_TIME,
            Self::SlotStart => SLOT_START_TIME,
            Self::SlotEnd => SLOT_END_TIME,
        }
    }

    #[inline]
    pub fn of(self, times: &MatchTimes) -> &Timestamp {
        match self {
            Self::GameStart => &times.game.start,
            Self::GameEnd => &times.game.end,
            Self::SlotStart => &times.slot.start,
            Self::SlotEnd => &times.slot.end,
        }
    }
}

/// Parse a strict RFC 3339 timestamp
///
/// A space in place of the `T` separator is rejected explicitly: it is what
/// an unescaped `+` in a query string decodes to. Timestamps without a UTC
/// offset fail to parse.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, String> {
    if value.contains(' ') {
        return Err(
            "timestamp must not contain spaces (was '+' sent unescaped instead of '%2B'?)"
                .to_string(),
        );
    }
    DateTime::parse_from_rfc3339(value).map_err(|e| e.to_string())
}

/// A single named condition on a match
#[derive(Debug, Clone, PartialEq)]
pub enum MatchFilter {
    Number(RangePredicate<i64>),
    Arena(String),
    Type(MatchType),
    Team(String),
    Time(TimeField, RangePredicate<Timestamp>),
}

impl MatchFilter {
    /// Build the filter named by `key` from its raw query value
    pub fn parse(key: &str, value: &str) -> Result<Self, FilterError> {
        let invalid_range = |source: RangeError| FilterError::InvalidRange {
            key: key.to_string(),
            source,
        };

        if let Some(field) = TimeField::from_key(key) {
            let range = RangePredicate::parse_with(value, parse_timestamp).map_err(invalid_range)?;
            return Ok(Self::Time(field, range));
        }

        if value.is_empty() {
            return Err(FilterError::InvalidValue {
                key: key.to_string(),
                reason: "value must not be empty".to_string(),
            });
        }

        match key {
            NUM => value.parse().map(Self::Number).map_err(invalid_range),
            ARENA => Ok(Self::Arena(value.to_string())),
            TYPE => Ok(Self::Type(value.parse()?)),
            TEAM => Ok(Self::Team(value.to_string())),
            other => Err(FilterError::UnknownFilter(other.to_string())),
        }
    }

    #[inline]
    pub fn matches(&self, m: &Match) -> bool {
        match self {
            Self::Number(range) => range.contains(&i64::from(m.num)),
            Self::Arena(arena) => m.arena == *arena,
            Self::Type(match_type) => m.match_type == *match_type,
            Self::Team(tla) => m.has_team(tla),
            Self::Time(field, range) => range.contains(field.of(&m.times)),
        }
    }
}

/// Conjunction of match filters
///
/// An empty set matches every match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchFilterSet {
    filters: Vec<MatchFilter>,
}

impl MatchFilterSet {
    /// Build a filter set from raw `(key, value)` query parameters
    ///
    /// Unknown keys are reported before any value is parsed, so an unknown
    /// key wins over a malformed value elsewhere in the query. When a key is
    /// repeated only its first value is used.
    pub fn build<'a, I>(params: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: Vec<(&str, &str)> = params.into_iter().collect();

        if let Some((key, _)) = params.iter().find(|(k, _)| !FILTER_KEYS.contains(k)) {
            return Err(FilterError::UnknownFilter(key.to_string()));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(params.len());
        let mut filters = Vec::with_capacity(params.len());

        for (key, value) in params {
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);
            filters.push(MatchFilter::parse(key, value)?);
        }

        Ok(Self { filters })
    }

    pub fn filters(&self) -> &[MatchFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[inline]
    pub fn matches(&self, m: &Match) -> bool {
        self.filters.iter().all(|f| f.matches(m))
    }
}
