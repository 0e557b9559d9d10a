pub mod models;
pub mod registry;
pub mod tournament;

pub use models::{BASE_RATING, Decision, EventKind, MatchResult, PlayerId, PlayerRecord, ScoreEntry};
pub use registry::PlayerRegistry;
pub use tournament::{RosterEntry, TournamentState};
