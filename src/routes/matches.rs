use actix_web::{web, HttpResponse};

use crate::core::{current_state, select_matches};
use crate::error::{json_response, ApiError};
use crate::models::responses::{
    CurrentResponse, KnockoutResponse, LastScoredResponse, MatchListResponse, PeriodInfo,
    PeriodsResponse, TiebreakerResponse,
};
use crate::models::{Match, MatchQuery};
use crate::routes::AppState;

/// Configure all match and schedule routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/matches", web::get().to(list_matches))
        .route("/matches/last_scored", web::get().to(last_scored))
        .route("/periods", web::get().to(periods))
        .route("/current", web::get().to(current))
        .route("/knockout", web::get().to(knockout))
        .route("/tiebreaker", web::get().to(tiebreaker));
}

/// Filtered match list
///
/// GET /matches?arena=A&num=10..20&limit=-5
///
/// Every key other than `limit` must be a known match filter. Filters are
/// combined with AND; the limit is applied after filtering.
async fn list_matches(
    state: web::Data<AppState>,
    params: web::Query<Vec<(String, String)>>,
) -> Result<HttpResponse, ApiError> {
    let query = MatchQuery::from_params(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(|e| {
            tracing::debug!("Rejected match query {:?}: {}", params.0, e);
            ApiError::from(e)
        })?;

    let compstate = state.compstate.get().await;
    let selection = select_matches(&compstate, &query);

    json_response(&MatchListResponse {
        matches: selection.matches,
        last_scored: selection.last_scored,
    })
}

async fn last_scored(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&LastScoredResponse {
        last_scored: compstate.last_scored,
    })
}

async fn periods(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&PeriodsResponse {
        periods: compstate.periods.iter().map(PeriodInfo::from).collect(),
    })
}

/// What is happening right now
async fn current(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let now = state.clock.now();
    json_response(&CurrentResponse::from(current_state(&compstate, now)))
}

async fn knockout(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;

    let rounds = compstate
        .knockout_rounds
        .iter()
        .map(|round| {
            round
                .iter()
                .map(|id| {
                    compstate.find_match(id).ok_or_else(|| {
                        ApiError::Internal(format!(
                            "knockout match {} in arena {} is missing",
                            id.num, id.arena
                        ))
                    })
                })
                .collect::<Result<Vec<&Match>, ApiError>>()
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    json_response(&KnockoutResponse { rounds })
}

async fn tiebreaker(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;

    let tiebreaker = compstate
        .tiebreaker
        .as_ref()
        .and_then(|id| compstate.find_match(id))
        .ok_or_else(|| ApiError::NotFound("There is no tiebreaker".to_string()))?;

    json_response(&TiebreakerResponse { tiebreaker })
}
