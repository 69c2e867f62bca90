use actix_web::{web, HttpResponse};
use std::path::Path;

use crate::error::{json_response, ApiError};
use crate::models::responses::{
    ArenaInfo, ArenasResponse, ConfigInfo, ConfigResponse, CornerInfo, CornersResponse,
    LocationInfo, LocationsResponse, StateResponse, TeamInfo, TeamsResponse,
};
use crate::models::root_index;
use crate::routes::AppState;

/// Configure the competition resource routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/state", web::get().to(state_revision))
        .route("/config", web::get().to(config))
        .route("/arenas", web::get().to(arenas))
        .route("/arenas/{name}", web::get().to(arena))
        .route("/corners", web::get().to(corners))
        .route("/corners/{number}", web::get().to(corner))
        .route("/locations", web::get().to(locations))
        .route("/locations/{name}", web::get().to(location))
        .route("/teams", web::get().to(teams))
        .route("/teams/{tla}", web::get().to(team))
        .route("/teams/{tla}/image", web::get().to(team_image));
}

async fn index() -> Result<HttpResponse, ApiError> {
    json_response(&root_index())
}

async fn state_revision(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&StateResponse {
        state: &compstate.state,
    })
}

async fn config(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&ConfigResponse {
        config: ConfigInfo {
            match_slots: compstate.match_slots,
        },
    })
}

async fn arenas(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&ArenasResponse::from_state(&compstate))
}

async fn arena(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let arena = compstate
        .arena(&name)
        .ok_or_else(|| ApiError::not_found(format!("Arena '{}'", name)))?;
    json_response(&ArenaInfo::from(arena))
}

async fn corners(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&CornersResponse::from_state(&compstate))
}

async fn corner(
    state: web::Data<AppState>,
    number: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let corner = number
        .parse::<u8>()
        .ok()
        .and_then(|n| compstate.corner(n))
        .ok_or_else(|| ApiError::not_found(format!("Corner '{}'", number)))?;
    json_response(&CornerInfo::from(corner))
}

async fn locations(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&LocationsResponse::from_state(&compstate))
}

async fn location(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let location = compstate
        .location(&name)
        .ok_or_else(|| ApiError::not_found(format!("Location '{}'", name)))?;
    json_response(&LocationInfo::from(location))
}

async fn teams(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    json_response(&TeamsResponse::from_state(&compstate))
}

async fn team(
    state: web::Data<AppState>,
    tla: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let team = compstate
        .team(&tla)
        .ok_or_else(|| ApiError::not_found(format!("Team '{}'", tla)))?;
    json_response(&TeamInfo::from(team))
}

fn image_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Raw team image, read from the compstate directory
async fn team_image(
    state: web::Data<AppState>,
    tla: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let compstate = state.compstate.get().await;
    let image = compstate
        .team(&tla)
        .and_then(|t| t.image.as_deref())
        .ok_or_else(|| ApiError::not_found(format!("Image for team '{}'", tla)))?;

    let path = state.compstate.root().join(image);
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        tracing::warn!("Failed to read image {}: {}", path.display(), e);
        ApiError::not_found(format!("Image for team '{}'", tla))
    })?;

    Ok(HttpResponse::Ok()
        .content_type(image_content_type(&path))
        .body(bytes))
}
