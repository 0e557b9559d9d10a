use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use super::types::{Bracket, Slot, SlotPos};
use crate::domain::PlayerId;
use crate::errors::{LeagueError, LeagueResult};

/// Builds a randomly seeded single-elimination bracket.
///
/// The first round is the smallest power of two that fits every player.
/// Players are split by repeated halving from the championship slot down:
/// the lower half of each subtree gets `floor(n / 2)` players and the upper
/// half the rest. A subtree left with one player takes it directly, so a bye
/// player sits in round 1 above two empty first-round slots.
pub fn build_bracket<R: Rng + ?Sized>(players: &[PlayerId], rng: &mut R) -> LeagueResult<Bracket> {
    if players.is_empty() {
        return Err(LeagueError::invalid("a tournament needs at least one player"));
    }
    check_unique(players)?;

    let mut seeded = players.to_vec();
    seeded.shuffle(rng);

    let mut bracket = Bracket::empty(players.len().next_power_of_two());
    let top = bracket.championship();
    seed(&mut bracket, top, &seeded);

    info!(
        "Built bracket for {} players: {} rounds, {} byes",
        players.len(),
        bracket.round_count(),
        bracket.byes().len()
    );
    Ok(bracket)
}

fn check_unique(players: &[PlayerId]) -> LeagueResult<()> {
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player) {
            return Err(LeagueError::invalid(format!("player {player} is listed twice")));
        }
    }
    Ok(())
}

fn seed(bracket: &mut Bracket, pos: SlotPos, players: &[PlayerId]) {
    if let [only] = players {
        bracket.place(pos, Slot::new(only.clone()));
        return;
    }

    // Two or more players always have a round below them.
    let Some((low, high)) = bracket.children(pos) else {
        return;
    };
    let (lower, upper) = players.split_at(players.len() / 2);
    seed(bracket, low, lower);
    seed(bracket, high, upper);
}
