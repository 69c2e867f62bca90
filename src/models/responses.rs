use serde::Serialize;

use crate::core::encoding::OrderedMap;
use crate::core::schedule::CurrentState;
use crate::models::domain::{
    Arena, CompState, Corner, Location, Match, MatchSlotLengths, MatchType, Period, Shepherds, Team,
    TeamScores, Timestamp,
};

/// Build an absolute resource path, percent-encoding each segment
pub fn resource_url(segments: &[&str]) -> String {
    segments.iter().fold(String::new(), |mut url, segment| {
        url.push('/');
        url.push_str(&urlencoding::encode(segment));
        url
    })
}

/// Top-level collections and where to find them
pub fn root_index() -> OrderedMap<String> {
    [
        "config",
        "arenas",
        "teams",
        "corners",
        "locations",
        "matches",
        "periods",
        "state",
        "current",
        "knockout",
    ]
    .into_iter()
    .map(|name| (name, resource_url(&[name])))
    .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct StateResponse<'a> {
    pub state: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigInfo {
    pub match_slots: MatchSlotLengths,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub config: ConfigInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArenaInfo<'a> {
    pub get: String,
    pub name: &'a str,
    pub display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colour: Option<&'a str>,
}

impl<'a> From<&'a Arena> for ArenaInfo<'a> {
    fn from(arena: &'a Arena) -> Self {
        Self {
            get: resource_url(&["arenas", &arena.name]),
            name: &arena.name,
            display_name: &arena.display_name,
            colour: arena.colour.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ArenasResponse<'a> {
    pub arenas: OrderedMap<ArenaInfo<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CornerInfo<'a> {
    pub get: String,
    pub number: u8,
    pub colour: &'a str,
}

impl<'a> From<&'a Corner> for CornerInfo<'a> {
    fn from(corner: &'a Corner) -> Self {
        Self {
            get: resource_url(&["corners", &corner.number.to_string()]),
            number: corner.number,
            colour: &corner.colour,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CornersResponse<'a> {
    pub corners: OrderedMap<CornerInfo<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationInfo<'a> {
    pub get: String,
    pub display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    pub teams: &'a [String],
    pub shepherds: &'a Shepherds,
}

impl<'a> From<&'a Location> for LocationInfo<'a> {
    fn from(location: &'a Location) -> Self {
        Self {
            get: resource_url(&["locations", &location.name]),
            display_name: &location.display_name,
            description: location.description.as_deref(),
            teams: &location.teams,
            shepherds: &location.shepherds,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationsResponse<'a> {
    pub locations: OrderedMap<LocationInfo<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NameWithUrl<'a> {
    pub name: &'a str,
    pub get: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamInfo<'a> {
    pub tla: &'a str,
    pub name: &'a str,
    pub rookie: bool,
    pub league_pos: u32,
    pub location: NameWithUrl<'a>,
    pub scores: TeamScores,
    pub get: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl<'a> From<&'a Team> for TeamInfo<'a> {
    fn from(team: &'a Team) -> Self {
        Self {
            tla: &team.tla,
            name: &team.name,
            rookie: team.rookie,
            league_pos: team.league_pos,
            location: NameWithUrl {
                name: &team.location,
                get: resource_url(&["locations", &team.location]),
            },
            scores: team.scores,
            get: resource_url(&["teams", &team.tla]),
            image_url: team
                .image
                .as_ref()
                .map(|_| resource_url(&["teams", &team.tla, "image"])),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamsResponse<'a> {
    pub teams: OrderedMap<TeamInfo<'a>>,
}

/// Envelope of the match list resource
#[derive(Debug, Clone, Serialize)]
pub struct MatchListResponse<'a> {
    pub matches: Vec<&'a Match>,
    pub last_scored: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LastScoredResponse {
    pub last_scored: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodMatches {
    pub first_num: Option<u32>,
    pub last_num: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodInfo<'a> {
    #[serde(rename = "type")]
    pub period_type: MatchType,
    pub description: &'a str,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub max_end_time: Timestamp,
    pub matches: PeriodMatches,
}

impl<'a> From<&'a Period> for PeriodInfo<'a> {
    fn from(period: &'a Period) -> Self {
        Self {
            period_type: period.period_type,
            description: &period.description,
            start_time: period.start_time,
            end_time: period.end_time,
            max_end_time: period.max_end_time,
            matches: PeriodMatches {
                first_num: period.first_num,
                last_num: period.last_num,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodsResponse<'a> {
    pub periods: Vec<PeriodInfo<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CurrentResponse<'a> {
    pub time: Timestamp,
    pub delay: u32,
    pub matches: Vec<&'a Match>,
    pub staging_matches: Vec<&'a Match>,
    pub shepherding_matches: Vec<&'a Match>,
}

impl<'a> From<CurrentState<'a>> for CurrentResponse<'a> {
    fn from(current: CurrentState<'a>) -> Self {
        Self {
            time: current.time,
            delay: current.delay,
            matches: current.matches,
            staging_matches: current.staging_matches,
            shepherding_matches: current.shepherding_matches,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct KnockoutResponse<'a> {
    pub rounds: Vec<Vec<&'a Match>>,
}

#[derive(Debug, Serialize)]
pub struct TiebreakerResponse<'a> {
    pub tiebreaker: &'a Match,
}

impl<'a> ArenasResponse<'a> {
    pub fn from_state(state: &'a CompState) -> Self {
        Self {
            arenas: state
                .arenas
                .iter()
                .map(|a| (a.name.as_str(), ArenaInfo::from(a)))
                .collect(),
        }
    }
}

impl<'a> CornersResponse<'a> {
    pub fn from_state(state: &'a CompState) -> Self {
        Self {
            corners: state
                .corners
                .iter()
                .map(|c| (c.number.to_string(), CornerInfo::from(c)))
                .collect(),
        }
    }
}

impl<'a> LocationsResponse<'a> {
    pub fn from_state(state: &'a CompState) -> Self {
        Self {
            locations: state
                .locations
                .iter()
                .map(|l| (l.name.as_str(), LocationInfo::from(l)))
                .collect(),
        }
    }
}

impl<'a> TeamsResponse<'a> {
    pub fn from_state(state: &'a CompState) -> Self {
        Self {
            teams: state
                .teams
                .iter()
                .map(|t| (t.tla.as_str(), TeamInfo::from(t)))
                .collect(),
        }
    }
}
