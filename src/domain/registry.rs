use chrono::{Local, NaiveDate};
use log::debug;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use super::models::{BASE_RATING, EventKind, MatchResult, PlayerId, PlayerRecord};
use crate::errors::{LeagueError, LeagueResult};
use crate::rating::{RatingModel, RatingUpdate, RatingValue};

/// Player records keyed by id, kept in first-seen order.
///
/// The order matters: leaderboards sort stably, so ties are listed in the
/// order players first appeared. It also survives a save/load cycle because
/// the registry is written as a JSON object in that order.
#[derive(Debug, Clone)]
pub struct PlayerRegistry {
    records: Vec<PlayerRecord>,
    index: HashMap<PlayerId, usize>,
    base_rating: RatingValue,
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::with_base_rating(BASE_RATING)
    }

    pub fn with_base_rating(base_rating: RatingValue) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            base_rating,
        }
    }

    pub fn set_base_rating(&mut self, base_rating: RatingValue) {
        self.base_rating = base_rating;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.records.iter()
    }

    pub fn get(&self, id: &str) -> Option<&PlayerRecord> {
        self.index.get(id).map(|&idx| &self.records[idx])
    }

    /// Lookup without creation
    pub fn find(&self, id: &str) -> LeagueResult<&PlayerRecord> {
        self.get(id)
            .ok_or_else(|| LeagueError::not_found(format!("player {id}")))
    }

    pub fn get_or_create(&mut self, id: &str) -> &mut PlayerRecord {
        let idx = match self.index.get(id) {
            Some(&idx) => idx,
            None => self.insert(PlayerRecord::new(id, self.base_rating)),
        };
        &mut self.records[idx]
    }

    fn insert(&mut self, record: PlayerRecord) -> usize {
        debug!("Registering player {}", record.id);
        let idx = self.records.len();
        self.index.insert(record.id.clone(), idx);
        self.records.push(record);
        idx
    }

    pub fn set_display_name(&mut self, id: &str, name: &str) {
        self.get_or_create(id).display_name = Some(name.to_string());
    }

    /// Appends today's scores for `event` and returns them in input order.
    pub fn record_event_scores(
        &mut self,
        event: EventKind,
        scores: &[(PlayerId, u32)],
    ) -> Vec<(PlayerId, u32)> {
        self.record_event_scores_on(Local::now().date_naive(), event, scores)
    }

    pub fn record_event_scores_on(
        &mut self,
        date: NaiveDate,
        event: EventKind,
        scores: &[(PlayerId, u32)],
    ) -> Vec<(PlayerId, u32)> {
        for (player, score) in scores {
            self.get_or_create(player).record_score(date, event, *score);
        }
        scores.to_vec()
    }

    /// Applies a two-player result to ratings and win/loss counts.
    ///
    /// The result is validated before either record is touched, so a
    /// rejected result leaves the registry unchanged.
    pub fn record_match(
        &mut self,
        model: &RatingModel,
        result: &MatchResult,
    ) -> LeagueResult<RatingUpdate> {
        result.validate()?;

        let rating_a = self.get_or_create(&result.player_a).rating;
        let rating_b = self.get_or_create(&result.player_b).rating;
        let update = model.update(rating_a, result.score_a, rating_b, result.score_b)?;

        self.get_or_create(&result.player_a).rating = update.new_rating_a;
        self.get_or_create(&result.player_b).rating = update.new_rating_b;

        if let Some(decision) = result.decision() {
            self.get_or_create(&decision.winner).wins += 1;
            self.get_or_create(&decision.loser).losses += 1;
        }

        Ok(update)
    }

    pub fn leaderboard_by_rating(&self) -> Vec<&PlayerRecord> {
        let mut board: Vec<&PlayerRecord> = self.records.iter().collect();
        board.sort_by(|a, b| descending(a.rating, b.rating));
        board
    }

    pub fn leaderboard_by_best(&self, event: EventKind) -> Vec<&PlayerRecord> {
        let mut board: Vec<&PlayerRecord> = self
            .records
            .iter()
            .filter(|r| r.best.contains_key(&event))
            .collect();
        board.sort_by(|a, b| b.best[&event].cmp(&a.best[&event]));
        board
    }

    pub fn leaderboard_by_average(&self, event: EventKind) -> Vec<&PlayerRecord> {
        let mut board: Vec<&PlayerRecord> = self
            .records
            .iter()
            .filter(|r| r.average.contains_key(&event))
            .collect();
        board.sort_by(|a, b| descending(a.average[&event], b.average[&event]));
        board
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

impl Serialize for PlayerRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PlayerRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = PlayerRegistry;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of player id to player record")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut registry = PlayerRegistry::new();
        while let Some((id, mut record)) = access.next_entry::<PlayerId, PlayerRecord>()? {
            // The key is authoritative for the id.
            record.id = id;
            match registry.index.get(&record.id) {
                Some(&idx) => registry.records[idx] = record,
                None => {
                    registry.insert(record);
                }
            }
        }
        Ok(registry)
    }
}
