use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{league::{get_leaderboard, get_player, get_tournament, post_command, post_match, post_scores, post_tournament}, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/scores", post(post_scores))
        .route("/api/matches", post(post_match))
        .route("/api/tournament", get(get_tournament).post(post_tournament))
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/players/:id", get(get_player))
        .route("/api/command", post(post_command))
        .with_state(state)
}
