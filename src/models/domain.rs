use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::core::encoding::{scalar_enum, OrderedMap};

pub type Timestamp = DateTime<FixedOffset>;

scalar_enum! {
    /// Kind of match within the competition
    pub enum MatchType {
        League => "league",
        Knockout => "knockout",
        Tiebreaker => "tiebreaker",
    }
}

scalar_enum! {
    /// Lifecycle state of a scheduled match
    pub enum MatchState {
        Released => "released",
        Unreleased => "unreleased",
    }
}

/// Arena in which matches are played
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub colour: Option<String>,
}

/// Starting corner within an arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corner {
    pub number: u8,
    pub colour: String,
}

/// Shepherding group responsible for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shepherds {
    pub name: String,
    pub colour: String,
}

/// Physical area of the venue where a set of teams is based
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub teams: Vec<String>,
    pub shepherds: Shepherds,
}

/// Accumulated points for a team
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    pub league: u32,
    pub game: u32,
}

/// Competing team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub tla: String,
    pub name: String,
    #[serde(default)]
    pub rookie: bool,
    pub location: String,
    pub league_pos: u32,
    #[serde(default)]
    pub scores: TeamScores,
    /// Image path relative to the compstate directory
    #[serde(default)]
    pub image: Option<String>,
}

/// Start and end of an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl Span {
    /// Half-open containment: `start <= at < end`
    pub fn contains(&self, at: &Timestamp) -> bool {
        self.start <= *at && *at < self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationsTimes {
    pub release_threshold: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingTimes {
    pub opens: Timestamp,
    pub closes: Timestamp,
    pub signal_teams: Timestamp,
    pub signal_shepherds: OrderedMap<Timestamp>,
}

/// All derived times of a match, delays already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTimes {
    pub slot: Span,
    pub game: Span,
    pub operations: OperationsTimes,
    pub staging: StagingTimes,
}

/// Per-team scores of a single match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScores {
    pub game: OrderedMap<u32>,
    pub league: OrderedMap<u32>,
    pub ranking: OrderedMap<u32>,
}

/// One match in one arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub num: u32,
    pub display_name: String,
    pub arena: String,
    #[serde(rename = "type")]
    pub match_type: MatchType,
    /// Ordered corner slots; `None` marks an empty corner
    pub teams: Vec<Option<String>>,
    /// Present once the match has been scored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<MatchScores>,
    pub state: MatchState,
    pub times: MatchTimes,
}

impl Match {
    pub fn has_team(&self, tla: &str) -> bool {
        self.teams.iter().flatten().any(|t| t == tla)
    }

    pub fn id(&self) -> MatchId {
        MatchId {
            arena: self.arena.clone(),
            num: self.num,
        }
    }
}

/// Reference to a match by arena and number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId {
    pub arena: String,
    pub num: u32,
}

/// Named block of the schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "type")]
    pub period_type: MatchType,
    pub description: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub max_end_time: Timestamp,
    pub first_num: Option<u32>,
    pub last_num: Option<u32>,
}

/// Schedule delay taking effect at `time`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Delay {
    pub time: Timestamp,
    /// Seconds
    pub delay: u32,
}

/// Lengths of the phases of a match slot, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSlotLengths {
    pub pre: u32,
    #[serde(rename = "match")]
    pub match_: u32,
    pub post: u32,
    pub total: u32,
}

/// Read-only snapshot of the whole competition
///
/// Produced by the competition-state tooling and never mutated here; a new
/// snapshot replaces the old one wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompState {
    /// Revision the snapshot was exported from
    pub state: String,
    /// Offset of the venue's local time from UTC, in seconds
    #[serde(default)]
    pub utc_offset_secs: i32,
    pub match_slots: MatchSlotLengths,
    pub arenas: Vec<Arena>,
    pub corners: Vec<Corner>,
    pub locations: Vec<Location>,
    pub teams: Vec<Team>,
    /// Ordered by ascending match number
    pub matches: Vec<Match>,
    #[serde(default)]
    pub last_scored: Option<u32>,
    #[serde(default)]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub delays: Vec<Delay>,
    #[serde(default)]
    pub knockout_rounds: Vec<Vec<MatchId>>,
    #[serde(default)]
    pub tiebreaker: Option<MatchId>,
}

impl CompState {
    pub fn arena(&self, name: &str) -> Option<&Arena> {
        self.arenas.iter().find(|a| a.name == name)
    }

    pub fn corner(&self, number: u8) -> Option<&Corner> {
        self.corners.iter().find(|c| c.number == number)
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| l.name == name)
    }

    pub fn team(&self, tla: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.tla == tla)
    }

    pub fn find_match(&self, id: &MatchId) -> Option<&Match> {
        self.matches
            .iter()
            .find(|m| m.num == id.num && m.arena == id.arena)
    }

    /// Venue offset, falling back to UTC when out of range
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}
