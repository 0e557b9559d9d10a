use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::errors::LeagueError;

/// A filled bracket position. `score` stays unset until the match this
/// slot feeds into has been played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub player_id: PlayerId,
    pub score: Option<u32>,
}

impl Slot {
    pub fn new(player_id: impl Into<PlayerId>) -> Self {
        Self {
            player_id: player_id.into(),
            score: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.score.is_none()
    }
}

/// Address of a slot: round 0 is the first round, the last round holds the champion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotPos {
    pub round: usize,
    pub index: usize,
}

impl SlotPos {
    pub fn new(round: usize, index: usize) -> Self {
        Self { round, index }
    }
}

type Rounds = Vec<Vec<Option<Slot>>>;

/// Single-elimination bracket stored round by round.
///
/// Slots `2m` and `2m + 1` of round `r` are opponents whose winner lands in
/// slot `m` of round `r + 1`. That convention lives only in [`Bracket::children`]
/// and [`Bracket::parent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Rounds", into = "Rounds")]
pub struct Bracket {
    rounds: Rounds,
}

impl Bracket {
    /// All rounds present and empty. `round_zero_size` must be a power of two.
    pub fn empty(round_zero_size: usize) -> Self {
        debug_assert!(round_zero_size.is_power_of_two());
        let mut rounds = Vec::new();
        let mut size = round_zero_size;
        loop {
            rounds.push(vec![None; size]);
            if size == 1 {
                break;
            }
            size /= 2;
        }
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Vec<Option<Slot>>] {
        &self.rounds
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn round_zero_size(&self) -> usize {
        self.rounds[0].len()
    }

    pub fn championship(&self) -> SlotPos {
        SlotPos::new(self.rounds.len() - 1, 0)
    }

    pub fn slot(&self, pos: SlotPos) -> Option<&Slot> {
        self.rounds.get(pos.round)?.get(pos.index)?.as_ref()
    }

    pub(crate) fn slot_mut(&mut self, pos: SlotPos) -> Option<&mut Slot> {
        self.rounds.get_mut(pos.round)?.get_mut(pos.index)?.as_mut()
    }

    pub(crate) fn place(&mut self, pos: SlotPos, slot: Slot) {
        self.rounds[pos.round][pos.index] = Some(slot);
    }

    /// The two slots whose match feeds `pos`; none for round 0.
    pub fn children(&self, pos: SlotPos) -> Option<(SlotPos, SlotPos)> {
        if pos.round == 0 || pos.round >= self.rounds.len() {
            return None;
        }
        let below = pos.round - 1;
        Some((
            SlotPos::new(below, 2 * pos.index),
            SlotPos::new(below, 2 * pos.index + 1),
        ))
    }

    pub fn parent(&self, pos: SlotPos) -> Option<SlotPos> {
        if pos.round + 1 >= self.rounds.len() {
            return None;
        }
        Some(SlotPos::new(pos.round + 1, pos.index / 2))
    }

    pub fn opponent(&self, pos: SlotPos) -> SlotPos {
        SlotPos::new(pos.round, pos.index ^ 1)
    }

    /// Positions where a player enters the bracket: filled slots with no
    /// match feeding them. Round 0 entries plus byes.
    pub fn entrants(&self) -> Vec<SlotPos> {
        self.positions()
            .filter(|&pos| self.slot(pos).is_some() && self.is_leaf(pos))
            .collect()
    }

    /// Entrants that skipped the first round.
    pub fn byes(&self) -> Vec<SlotPos> {
        self.entrants()
            .into_iter()
            .filter(|pos| pos.round > 0)
            .collect()
    }

    pub fn player_count(&self) -> usize {
        self.entrants().len()
    }

    /// Set once the final has been resolved (or when a single player entered).
    pub fn champion(&self) -> Option<&PlayerId> {
        self.slot(self.championship()).map(|slot| &slot.player_id)
    }

    fn is_leaf(&self, pos: SlotPos) -> bool {
        match self.children(pos) {
            None => true,
            Some((low, high)) => self.slot(low).is_none() && self.slot(high).is_none(),
        }
    }

    fn positions(&self) -> impl Iterator<Item = SlotPos> + '_ {
        self.rounds
            .iter()
            .enumerate()
            .flat_map(|(round, slots)| (0..slots.len()).map(move |index| SlotPos::new(round, index)))
    }
}

impl TryFrom<Rounds> for Bracket {
    type Error = LeagueError;

    fn try_from(rounds: Rounds) -> Result<Self, Self::Error> {
        let Some(first) = rounds.first() else {
            return Err(LeagueError::invalid("bracket has no rounds"));
        };
        if !first.len().is_power_of_two() {
            return Err(LeagueError::invalid(format!(
                "first round has {} slots, expected a power of two",
                first.len()
            )));
        }
        for (round, slots) in rounds.iter().enumerate() {
            if slots.len() != first.len() >> round {
                return Err(LeagueError::invalid(format!(
                    "round {} has {} slots, expected {}",
                    round,
                    slots.len(),
                    first.len() >> round
                )));
            }
        }
        if rounds.last().map(Vec::len) != Some(1) {
            return Err(LeagueError::invalid("bracket must end in a single championship slot"));
        }
        Ok(Self { rounds })
    }
}

impl From<Bracket> for Rounds {
    fn from(bracket: Bracket) -> Self {
        bracket.rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bracket_round_sizes() {
        let bracket = Bracket::empty(8);
        let sizes: Vec<usize> = bracket.rounds().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![8, 4, 2, 1]);
        assert_eq!(bracket.championship(), SlotPos::new(3, 0));
        assert!(bracket.entrants().is_empty());
    }

    #[test]
    fn test_parent_and_children_agree() {
        let bracket = Bracket::empty(8);
        let pos = SlotPos::new(1, 3);
        let (low, high) = bracket.children(pos).unwrap();

        assert_eq!(low, SlotPos::new(0, 6));
        assert_eq!(high, SlotPos::new(0, 7));
        assert_eq!(bracket.parent(low), Some(pos));
        assert_eq!(bracket.parent(high), Some(pos));
        assert_eq!(bracket.opponent(low), high);
        assert_eq!(bracket.children(SlotPos::new(0, 2)), None);
        assert_eq!(bracket.parent(bracket.championship()), None);
    }

    #[test]
    fn test_deserialize_rejects_malformed_rounds() {
        assert!(serde_json::from_str::<Bracket>("[]").is_err());
        assert!(serde_json::from_str::<Bracket>("[[null, null, null], [null]]").is_err());
        assert!(serde_json::from_str::<Bracket>("[[null, null], [null], [null]]").is_err());

        let ok: Bracket = serde_json::from_str("[[null, null], [null]]").unwrap();
        assert_eq!(ok.round_count(), 2);
    }

    #[test]
    fn test_slot_json_shape() {
        let mut bracket = Bracket::empty(2);
        bracket.place(SlotPos::new(0, 0), Slot::new("a"));

        let json = serde_json::to_value(&bracket).unwrap();
        assert_eq!(
            json,
            serde_json::json!([[{"playerId": "a", "score": null}, null], [null]])
        );
    }
}
