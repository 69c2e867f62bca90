// Shared fixtures for the crate-level tests
#![allow(dead_code)]

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use compstate_http::core::OrderedMap;
use compstate_http::models::{
    Arena, CompState, Corner, Delay, Location, Match, MatchId, MatchScores, MatchSlotLengths,
    MatchState, MatchTimes, MatchType, OperationsTimes, Period, Shepherds, Span, StagingTimes,
    Team, TeamScores, Timestamp,
};
use compstate_http::services::{CompstateManager, FixedClock};
use compstate_http::AppState;

pub const LAST_LEAGUE: u32 = 110;
pub const LAST_SHARED_KNOCKOUT: u32 = 122;
pub const LAST_MATCH: u32 = 129;
pub const LAST_SCORED: u32 = 99;

pub fn venue() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

/// Start of the first slot: 2014-04-26T13:00:00+01:00
pub fn first_slot() -> Timestamp {
    venue().with_ymd_and_hms(2014, 4, 26, 13, 0, 0).unwrap()
}

pub fn slot_start(num: u32) -> Timestamp {
    first_slot() + Duration::minutes(5 * num as i64)
}

fn teams_for(num: u32, arena: &str) -> Vec<Option<String>> {
    let slots: [Option<&str>; 4] = match arena {
        "A" => [Some("CLY"), Some("TTN"), None, Some("GRS")],
        _ => [Some("QMC"), None, Some("TTN"), Some("CLY")],
    };
    let mut teams: Vec<Option<String>> = slots.iter().map(|t| t.map(str::to_string)).collect();
    teams.rotate_left((num % 4) as usize);
    teams
}

fn scores_for(teams: &[Option<String>]) -> MatchScores {
    let tlas = || teams.iter().flatten();
    MatchScores {
        game: tlas().map(|t| (t.as_str(), 3)).collect(),
        league: tlas().map(|t| (t.as_str(), 2)).collect(),
        ranking: tlas().enumerate().map(|(i, t)| (t.as_str(), i as u32 + 1)).collect(),
    }
}

pub fn create_match(num: u32, arena: &str, match_type: MatchType) -> Match {
    let start = slot_start(num);
    let teams = teams_for(num, arena);

    let mut signal_shepherds = OrderedMap::new();
    signal_shepherds.insert("Blue", start - Duration::seconds(240));
    signal_shepherds.insert("Green", start - Duration::seconds(180));

    Match {
        num,
        display_name: format!("Match {}", num),
        arena: arena.to_string(),
        match_type,
        scores: (num <= LAST_SCORED).then(|| scores_for(&teams)),
        teams,
        state: MatchState::Released,
        times: MatchTimes {
            slot: Span {
                start,
                end: start + Duration::minutes(5),
            },
            game: Span {
                start: start + Duration::seconds(90),
                end: start + Duration::seconds(270),
            },
            operations: OperationsTimes {
                release_threshold: start + Duration::seconds(90),
            },
            staging: StagingTimes {
                opens: start - Duration::seconds(210),
                closes: start - Duration::seconds(30),
                signal_teams: start - Duration::seconds(150),
                signal_shepherds,
            },
        },
    }
}

fn matches() -> Vec<Match> {
    let mut matches = Vec::new();
    for num in 0..=LAST_MATCH {
        let match_type = if num <= LAST_LEAGUE {
            MatchType::League
        } else {
            MatchType::Knockout
        };
        matches.push(create_match(num, "A", match_type));
        if num <= LAST_SHARED_KNOCKOUT {
            matches.push(create_match(num, "B", match_type));
        }
    }
    matches
}

fn team(tla: &str, location: &str, league_pos: u32, image: Option<&str>) -> Team {
    Team {
        tla: tla.to_string(),
        name: format!("Team {}", tla),
        rookie: tla == "QMC",
        location: location.to_string(),
        league_pos,
        scores: TeamScores {
            league: 40 - league_pos,
            game: 100 - league_pos,
        },
        image: image.map(str::to_string),
    }
}

fn id(arena: &str, num: u32) -> MatchId {
    MatchId {
        arena: arena.to_string(),
        num,
    }
}

/// Snapshot with two arenas, 130 match slots and four teams
pub fn fixture() -> CompState {
    CompState {
        state: "8a6d9b4".to_string(),
        utc_offset_secs: 3600,
        match_slots: MatchSlotLengths {
            pre: 90,
            match_: 180,
            post: 30,
            total: 300,
        },
        arenas: vec![
            Arena {
                name: "A".to_string(),
                display_name: "Arena A".to_string(),
                colour: Some("#ff0000".to_string()),
            },
            Arena {
                name: "B".to_string(),
                display_name: "Arena B".to_string(),
                colour: None,
            },
        ],
        corners: (0..4)
            .map(|number| Corner {
                number,
                colour: ["#00ff00", "#ff6600", "#ff00ff", "#ffff00"][number as usize].to_string(),
            })
            .collect(),
        locations: vec![
            Location {
                name: "a-group".to_string(),
                display_name: "Team Group A".to_string(),
                description: Some("A group of some sort, it contains a number of teams.".to_string()),
                teams: vec!["CLY".to_string(), "TTN".to_string()],
                shepherds: Shepherds {
                    name: "Blue".to_string(),
                    colour: "#A9A9F5".to_string(),
                },
            },
            Location {
                name: "b-group".to_string(),
                display_name: "Team Group B".to_string(),
                description: None,
                teams: vec!["GRS".to_string(), "QMC".to_string()],
                shepherds: Shepherds {
                    name: "Green".to_string(),
                    colour: "#A9F5A9".to_string(),
                },
            },
        ],
        teams: vec![
            team("CLY", "a-group", 1, None),
            team("TTN", "a-group", 2, None),
            team("GRS", "b-group", 3, None),
            team("QMC", "b-group", 4, Some("teams/QMC.png")),
        ],
        matches: matches(),
        last_scored: Some(LAST_SCORED),
        periods: vec![
            Period {
                period_type: MatchType::League,
                description: "Saturday, 26 April 2014, afternoon".to_string(),
                start_time: slot_start(0),
                end_time: slot_start(LAST_LEAGUE + 1),
                max_end_time: slot_start(LAST_LEAGUE + 1) + Duration::minutes(10),
                first_num: Some(0),
                last_num: Some(LAST_LEAGUE),
            },
            Period {
                period_type: MatchType::Knockout,
                description: "The Knockouts".to_string(),
                start_time: slot_start(LAST_LEAGUE + 1),
                end_time: slot_start(LAST_MATCH + 1),
                max_end_time: slot_start(LAST_MATCH + 1),
                first_num: Some(LAST_LEAGUE + 1),
                last_num: Some(LAST_MATCH),
            },
        ],
        delays: vec![Delay {
            time: first_slot() + Duration::minutes(1),
            delay: 60,
        }],
        knockout_rounds: vec![
            (123..=126).map(|n| id("A", n)).collect(),
            vec![id("A", 127), id("A", 128)],
            vec![id("A", LAST_MATCH)],
        ],
        tiebreaker: None,
    }
}

/// Directory with no snapshot, so the in-memory fixture is never replaced
pub const ABSENT_COMPSTATE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/absent");

/// Application state serving `state` at a fixed instant
pub fn app_state(state: CompState, now: DateTime<Utc>) -> AppState {
    AppState::new(
        CompstateManager::from_state(ABSENT_COMPSTATE, state),
        FixedClock(now),
    )
}

/// The fixture, read at the start of the first slot
pub fn default_app_state() -> AppState {
    app_state(fixture(), first_slot().with_timezone(&Utc))
}
