use anyhow::Result;
use log::info;
use rand::Rng;
use serde::Serialize;

use crate::api::parsers::TextCommand;
use crate::bracket::{self, Bracket, DisplayMatrix};
use crate::config::settings::{AppConfig, RatingSettings};
use crate::domain::{
    EventKind, MatchResult, PlayerId, PlayerRecord, PlayerRegistry, RosterEntry, TournamentState,
};
use crate::errors::{LeagueError, LeagueResult};
use crate::rating::{RatingModel, RatingUpdate};
use crate::storage::{PersistedState, StateStore};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub event: EventKind,
    pub accepted: Vec<(PlayerId, u32)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub result: MatchResult,
    pub update: RatingUpdate,
    pub bracket_advanced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub id: PlayerId,
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Leaderboard {
    Rating {
        rows: Vec<LeaderboardRow>,
    },
    Event {
        event: EventKind,
        best: Vec<LeaderboardRow>,
        average: Vec<LeaderboardRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "report", rename_all = "camelCase")]
pub enum CommandOutcome {
    Scores(ScoreReport),
    Match(MatchReport),
}

/// Ratings, score history and the active bracket, mutated one call at a time.
pub struct LeagueEngine {
    state: PersistedState,
    model: RatingModel,
}

impl LeagueEngine {
    pub fn new(mut state: PersistedState, settings: &RatingSettings) -> Self {
        state.players.set_base_rating(settings.base_rating);
        Self {
            state,
            model: RatingModel::from_settings(settings),
        }
    }

    pub fn state(&self) -> &PersistedState {
        &self.state
    }

    pub fn registry(&self) -> &PlayerRegistry {
        &self.state.players
    }

    pub fn tournament(&self) -> Option<&TournamentState> {
        self.state.tournament.as_ref()
    }

    pub fn record_scores(
        &mut self,
        event: &str,
        scores: &[(PlayerId, u32)],
    ) -> LeagueResult<ScoreReport> {
        let event: EventKind = event.parse()?;
        let accepted = self.state.players.record_event_scores(event, scores);
        info!("Recorded {} {} scores", accepted.len(), event);
        Ok(ScoreReport { event, accepted })
    }

    /// Rates the result, then advances the bracket if the pair is scheduled there.
    pub fn report_match(&mut self, result: MatchResult) -> LeagueResult<MatchReport> {
        let update = self.state.players.record_match(&self.model, &result)?;

        let bracket_advanced = match (self.state.tournament.as_mut(), result.decision()) {
            (Some(tournament), Some(decision)) => {
                bracket::record_tournament_result(&mut tournament.bracket, &decision)
            }
            _ => false,
        };

        info!(
            "Match {} {}-{} {}: delta {:.2}, bracket advanced: {}",
            result.player_a, result.score_a, result.score_b, result.player_b, update.delta, bracket_advanced
        );
        Ok(MatchReport {
            result,
            update,
            bracket_advanced,
        })
    }

    /// Replaces any running tournament with a freshly seeded one.
    pub fn start_tournament<R: Rng + ?Sized>(
        &mut self,
        roster: Vec<RosterEntry>,
        rng: &mut R,
    ) -> LeagueResult<&Bracket> {
        let ids: Vec<PlayerId> = roster.iter().map(|entry| entry.id.clone()).collect();
        let bracket = bracket::build_bracket(&ids, rng)?;

        for entry in &roster {
            self.state.players.set_display_name(&entry.id, &entry.name);
        }
        if self.state.tournament.is_some() {
            info!("Discarding previous tournament bracket");
        }

        let tournament = self
            .state
            .tournament
            .insert(TournamentState { roster, bracket });
        Ok(&tournament.bracket)
    }

    pub fn leaderboard(&self, event: Option<&str>) -> LeagueResult<Leaderboard> {
        let players = &self.state.players;
        let Some(event) = event else {
            return Ok(Leaderboard::Rating {
                rows: rank(players.leaderboard_by_rating(), |r| r.rating),
            });
        };

        let event: EventKind = event.parse()?;
        Ok(Leaderboard::Event {
            event,
            best: rank(players.leaderboard_by_best(event), |r| {
                r.best_for(event).map(f64::from).unwrap_or_default()
            }),
            average: rank(players.leaderboard_by_average(event), |r| {
                r.average_for(event).unwrap_or_default()
            }),
        })
    }

    /// Looks a player up, registering them if they were never seen.
    pub fn player(&mut self, id: &str) -> &PlayerRecord {
        self.state.players.get_or_create(id)
    }

    pub fn find_player(&self, id: &str) -> LeagueResult<&PlayerRecord> {
        self.state.players.find(id)
    }

    pub fn bracket_display(&self) -> LeagueResult<DisplayMatrix> {
        let tournament = self
            .tournament()
            .ok_or_else(|| LeagueError::not_found("no tournament has been started"))?;
        Ok(bracket::to_display_matrix(&tournament.bracket, &self.state.players))
    }

    pub fn champion(&self) -> Option<&PlayerRecord> {
        let id = self.tournament()?.bracket.champion()?;
        self.state.players.get(id)
    }
}

fn rank(records: Vec<&PlayerRecord>, value: impl Fn(&PlayerRecord) -> f64) -> Vec<LeaderboardRow> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| LeaderboardRow {
            rank: idx + 1,
            id: record.id.clone(),
            label: record.label().to_string(),
            value: value(record),
        })
        .collect()
}

/// Engine plus its state file; every successful mutation is saved before returning.
pub struct LeagueService {
    engine: LeagueEngine,
    store: StateStore,
}

impl LeagueService {
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = StateStore::new(&config.storage.state_path);
        let state = store.load()?;
        Ok(Self {
            engine: LeagueEngine::new(state, &config.rating),
            store,
        })
    }

    pub fn engine(&self) -> &LeagueEngine {
        &self.engine
    }

    pub fn record_scores(&mut self, event: &str, scores: &[(PlayerId, u32)]) -> Result<ScoreReport> {
        let report = self.engine.record_scores(event, scores)?;
        self.persist()?;
        Ok(report)
    }

    pub fn report_match(&mut self, result: MatchResult) -> Result<MatchReport> {
        let report = self.engine.report_match(result)?;
        self.persist()?;
        Ok(report)
    }

    pub fn start_tournament(&mut self, roster: Vec<RosterEntry>) -> Result<DisplayMatrix> {
        let players = roster.len();
        let bracket = self.engine.start_tournament(roster, &mut rand::thread_rng())?;
        info!(
            "Started tournament with {} players over {} rounds",
            players,
            bracket.round_count()
        );
        self.persist()?;
        Ok(self.engine.bracket_display()?)
    }

    pub fn execute(&mut self, command: TextCommand) -> Result<CommandOutcome> {
        match command {
            TextCommand::RecordScores { event, scores } => {
                Ok(CommandOutcome::Scores(self.record_scores(&event, &scores)?))
            }
            TextCommand::Duel(result) => Ok(CommandOutcome::Match(self.report_match(result)?)),
        }
    }

    pub fn leaderboard(&self, event: Option<&str>) -> Result<Leaderboard> {
        Ok(self.engine.leaderboard(event)?)
    }

    pub fn player(&mut self, id: &str) -> PlayerRecord {
        self.engine.player(id).clone()
    }

    pub fn bracket_display(&self) -> Result<DisplayMatrix> {
        Ok(self.engine.bracket_display()?)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(self.engine.state())
    }
}
