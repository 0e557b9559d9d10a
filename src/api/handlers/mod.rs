use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::{Mutex, MutexGuard};

use crate::api::models::ErrorResponse;
use crate::api::parsers::CommandParser;
use crate::errors::LeagueError;
use crate::services::league::LeagueService;

pub mod league;

/// All league state sits behind one lock so calls never interleave.
pub struct AppState {
    pub league: Mutex<LeagueService>,
    pub parser: CommandParser,
}

impl AppState {
    pub fn new(league: LeagueService, parser: CommandParser) -> Self {
        Self {
            league: Mutex::new(league),
            parser,
        }
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, LeagueService>, Response> {
        self.league.lock().map_err(|_| {
            log::error!("League state lock is poisoned");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "League state unavailable".to_string())
        })
    }
}

fn error_body(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

pub(crate) fn league_error_response(err: &LeagueError) -> Response {
    let status = match err {
        LeagueError::InvalidArgument(_) | LeagueError::DomainError(_) => StatusCode::BAD_REQUEST,
        LeagueError::NotFound(_) => StatusCode::NOT_FOUND,
    };
    log::warn!("Rejected request: {}", err);
    error_body(status, err.to_string())
}

/// Core rejections become 4xx; anything else (storage) is a 500.
pub(crate) fn error_response(err: anyhow::Error) -> Response {
    match err.downcast_ref::<LeagueError>() {
        Some(league) => league_error_response(league),
        None => {
            log::error!("Request failed: {:?}", err);
            error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("{err:#}"))
        }
    }
}
