// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Arena, CompState, Corner, Delay, Location, Match, MatchId, MatchScores, MatchSlotLengths,
    MatchState, MatchTimes, MatchType, OperationsTimes, Period, Shepherds, Span, StagingTimes,
    Team, TeamScores, Timestamp,
};
pub use requests::MatchQuery;
pub use responses::{resource_url, root_index, MatchListResponse};
