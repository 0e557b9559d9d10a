use serde::{Deserialize, Serialize};

use crate::bracket::DisplayMatrix;
use crate::domain::{PlayerId, RosterEntry};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreInput {
    pub player_id: PlayerId,
    pub score: u32,
}

#[derive(Debug, Deserialize)]
pub struct RecordScoresRequest {
    pub event: String,
    pub scores: Vec<ScoreInput>,
}

#[derive(Debug, Deserialize)]
pub struct StartTournamentRequest {
    pub players: Vec<RosterEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub event: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketResponse {
    pub rounds: DisplayMatrix,
    pub champion: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
