use serde::{Deserialize, Serialize};

use super::models::PlayerId;
use crate::bracket::Bracket;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: PlayerId,
    pub name: String,
}

impl RosterEntry {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The active tournament: who entered and how far they got
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentState {
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    pub bracket: Bracket,
}
