use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::LeagueError;
use crate::rating::RatingValue;

pub type PlayerId = String;

/// Starting rating for a player seen for the first time
pub const BASE_RATING: RatingValue = 1500.0;

/// Shooting disciplines a score can be recorded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Air,
    Sport,
    Standard,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Air, EventKind::Sport, EventKind::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Air => "air",
            EventKind::Sport => "sport",
            EventKind::Standard => "standard",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = LeagueError;

    /// Case-insensitive, with an optional trailing "pistol" ("Air Pistol" is `Air`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let name = lower
            .strip_suffix("pistol")
            .map(str::trim_end)
            .unwrap_or(lower.as_str());

        match name {
            "air" => Ok(EventKind::Air),
            "sport" => Ok(EventKind::Sport),
            "standard" => Ok(EventKind::Standard),
            _ => Err(LeagueError::invalid(format!(
                "unknown event kind '{}', expected one of air, sport, standard",
                s.trim()
            ))),
        }
    }
}

/// One recorded score, kept forever in the player's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub date: NaiveDate,
    pub event: EventKind,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub id: PlayerId,
    /// Only set once the player has entered a tournament
    #[serde(default)]
    pub display_name: Option<String>,
    pub rating: RatingValue,
    #[serde(default)]
    pub scores: Vec<ScoreEntry>,
    #[serde(default)]
    pub best: BTreeMap<EventKind, u32>,
    #[serde(default)]
    pub average: BTreeMap<EventKind, f64>,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl PlayerRecord {
    pub fn new(id: impl Into<PlayerId>, rating: RatingValue) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            rating,
            scores: Vec::new(),
            best: BTreeMap::new(),
            average: BTreeMap::new(),
            wins: 0,
            losses: 0,
        }
    }

    pub fn record_score(&mut self, date: NaiveDate, event: EventKind, score: u32) {
        self.scores.push(ScoreEntry { date, event, score });
        self.recompute_event_stats(event);
    }

    /// Rebuilds best/average for `event` from the full history.
    pub fn recompute_event_stats(&mut self, event: EventKind) {
        let event_scores: Vec<u32> = self
            .scores
            .iter()
            .filter(|entry| entry.event == event)
            .map(|entry| entry.score)
            .collect();

        let Some(&best) = event_scores.iter().max() else {
            self.best.remove(&event);
            self.average.remove(&event);
            return;
        };

        let sum: u64 = event_scores.iter().map(|&s| u64::from(s)).sum();
        self.best.insert(event, best);
        self.average.insert(event, sum as f64 / event_scores.len() as f64);
    }

    pub fn best_for(&self, event: EventKind) -> Option<u32> {
        self.best.get(&event).copied()
    }

    pub fn average_for(&self, event: EventKind) -> Option<f64> {
        self.average.get(&event).copied()
    }

    /// Name shown in brackets, falling back to the raw id
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

/// A reported two-player result, in the order the players were reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub player_a: PlayerId,
    pub score_a: u32,
    pub player_b: PlayerId,
    pub score_b: u32,
}

/// Winner/loser view of a result that was not a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub winner: PlayerId,
    pub winner_score: u32,
    pub loser: PlayerId,
    pub loser_score: u32,
}

impl MatchResult {
    pub fn new(
        player_a: impl Into<PlayerId>,
        score_a: u32,
        player_b: impl Into<PlayerId>,
        score_b: u32,
    ) -> Self {
        Self {
            player_a: player_a.into(),
            score_a,
            player_b: player_b.into(),
            score_b,
        }
    }

    pub fn validate(&self) -> Result<(), LeagueError> {
        if self.player_a == self.player_b {
            return Err(LeagueError::invalid(format!(
                "player {} cannot play against themselves",
                self.player_a
            )));
        }
        if self.score_a == 0 && self.score_b == 0 {
            return Err(LeagueError::invalid("a 0-0 result cannot be rated"));
        }
        Ok(())
    }

    pub fn is_draw(&self) -> bool {
        self.score_a == self.score_b
    }

    pub fn decision(&self) -> Option<Decision> {
        if self.score_a > self.score_b {
            Some(Decision {
                winner: self.player_a.clone(),
                winner_score: self.score_a,
                loser: self.player_b.clone(),
                loser_score: self.score_b,
            })
        } else if self.score_b > self.score_a {
            Some(Decision {
                winner: self.player_b.clone(),
                winner_score: self.score_b,
                loser: self.player_a.clone(),
                loser_score: self.score_a,
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_event_kind_parsing() {
        assert_eq!("air".parse::<EventKind>().unwrap(), EventKind::Air);
        assert_eq!("Sport".parse::<EventKind>().unwrap(), EventKind::Sport);
        assert_eq!("STANDARD pistol".parse::<EventKind>().unwrap(), EventKind::Standard);
        assert_eq!(" Air Pistol ".parse::<EventKind>().unwrap(), EventKind::Air);
    }

    #[test]
    fn test_unknown_event_kind_is_rejected() {
        let err = "rifle".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, LeagueError::InvalidArgument(_)));
        assert!("pistol".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_event_stats_follow_history() {
        let mut record = PlayerRecord::new("P", BASE_RATING);
        record.record_score(day(1), EventKind::Air, 550);
        record.record_score(day(2), EventKind::Air, 560);
        record.record_score(day(2), EventKind::Sport, 530);

        assert_eq!(record.best_for(EventKind::Air), Some(560));
        assert_eq!(record.average_for(EventKind::Air), Some(555.0));
        assert_eq!(record.best_for(EventKind::Sport), Some(530));
        assert_eq!(record.best_for(EventKind::Standard), None);
    }

    #[test]
    fn test_recompute_does_not_drift() {
        let mut record = PlayerRecord::new("P", BASE_RATING);
        for (d, score) in [(1, 541), (2, 567), (3, 549)] {
            record.record_score(day(d), EventKind::Standard, score);
        }
        let best = record.best_for(EventKind::Standard);
        let average = record.average_for(EventKind::Standard);

        record.recompute_event_stats(EventKind::Standard);
        record.recompute_event_stats(EventKind::Standard);

        assert_eq!(record.best_for(EventKind::Standard), best);
        assert_eq!(record.average_for(EventKind::Standard), average);
    }

    #[test]
    fn test_decision_orders_winner_first() {
        let result = MatchResult::new("a", 3, "b", 7);
        let decision = result.decision().unwrap();
        assert_eq!(decision.winner, "b");
        assert_eq!(decision.winner_score, 7);
        assert_eq!(decision.loser, "a");
        assert_eq!(decision.loser_score, 3);

        assert!(MatchResult::new("a", 4, "b", 4).decision().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_pairs() {
        assert!(MatchResult::new("a", 0, "b", 0).validate().is_err());
        assert!(MatchResult::new("a", 5, "a", 3).validate().is_err());
        assert!(MatchResult::new("a", 0, "b", 1).validate().is_ok());
    }
}
