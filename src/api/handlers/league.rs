use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::{
    BracketResponse, CommandRequest, LeaderboardParams, RecordScoresRequest, StartTournamentRequest,
};
use crate::domain::{MatchResult, PlayerId};
use super::{error_response, league_error_response, AppState};

pub async fn post_scores(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordScoresRequest>,
) -> Response {
    let scores: Vec<(PlayerId, u32)> = request
        .scores
        .into_iter()
        .map(|input| (input.player_id, input.score))
        .collect();

    let mut league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    match league.record_scores(&request.event, &scores) {
        Ok(report) => (StatusCode::CREATED, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_match(
    State(state): State<Arc<AppState>>,
    Json(result): Json<MatchResult>,
) -> Response {
    let mut league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    match league.report_match(result) {
        Ok(report) => Json(report).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn post_tournament(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartTournamentRequest>,
) -> Response {
    let mut league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    match league.start_tournament(request.players) {
        Ok(rounds) => (
            StatusCode::CREATED,
            Json(BracketResponse {
                rounds,
                champion: None,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_tournament(State(state): State<Arc<AppState>>) -> Response {
    let league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    let engine = league.engine();
    match engine.bracket_display() {
        Ok(rounds) => Json(BracketResponse {
            rounds,
            champion: engine.champion().map(|record| record.label().to_string()),
        })
        .into_response(),
        Err(e) => league_error_response(&e),
    }
}

pub async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> Response {
    let league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    match league.leaderboard(params.event.as_deref()) {
        Ok(board) => Json(board).into_response(),
        Err(e) => error_response(e),
    }
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    Json(league.player(&id)).into_response()
}

pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let command = match state.parser.parse(&request.text) {
        Ok(command) => command,
        Err(e) => return league_error_response(&e),
    };
    let mut league = match state.lock() {
        Ok(league) => league,
        Err(response) => return response,
    };
    match league.execute(command) {
        Ok(outcome) => Json(outcome).into_response(),
        Err(e) => error_response(e),
    }
}
