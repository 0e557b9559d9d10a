use log::debug;
use std::collections::VecDeque;

use super::types::{Bracket, Slot, SlotPos};
use crate::domain::Decision;

/// Records a decided match in the bracket if the two players are paired there.
///
/// Searches breadth-first from the championship slot, so when the same pair
/// is pending in more than one place the match closest to the final wins.
/// Returns `false` when no pending pairing exists, which leaves the bracket
/// untouched. Resolved slots keep their scores, so a repeated report of the
/// same match is never counted twice.
pub fn record_tournament_result(bracket: &mut Bracket, decision: &Decision) -> bool {
    let Some(pos) = find_pending_match(bracket, &decision.winner, &decision.loser) else {
        debug!(
            "No pending bracket match between {} and {}",
            decision.winner, decision.loser
        );
        return false;
    };

    let Some((low, high)) = bracket.children(pos) else {
        return false;
    };
    for child in [low, high] {
        if let Some(slot) = bracket.slot_mut(child) {
            slot.score = Some(if slot.player_id == decision.winner {
                decision.winner_score
            } else {
                decision.loser_score
            });
        }
    }
    bracket.place(pos, Slot::new(decision.winner.clone()));

    debug!(
        "Promoted {} to round {} slot {}",
        decision.winner, pos.round, pos.index
    );
    true
}

/// Position of the unplayed match between `a` and `b`.
pub fn find_pending_match(bracket: &Bracket, a: &str, b: &str) -> Option<SlotPos> {
    let mut queue = VecDeque::from([bracket.championship()]);

    while let Some(pos) = queue.pop_front() {
        let Some((low, high)) = bracket.children(pos) else {
            continue;
        };
        queue.push_back(low);
        queue.push_back(high);

        let (Some(first), Some(second)) = (bracket.slot(low), bracket.slot(high)) else {
            continue;
        };
        if !first.is_pending() || !second.is_pending() {
            continue;
        }

        let ids = (first.player_id.as_str(), second.player_id.as_str());
        if ids == (a, b) || ids == (b, a) {
            return Some(pos);
        }
    }

    None
}
