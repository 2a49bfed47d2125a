//! Scoring rules applied when a round closes and when a match ends.
//!
//! - A round score is the sum of face-up, non-eliminated cards (see [`crate::hand::Hand::score`]).
//! - The seat that revealed its whole grid first has its round score doubled unless it is
//!   strictly lower than every other seat's score.
//! - The match ends once any total reaches [`MATCH_END_SCORE`]; the lowest total wins,
//!   ties going to the lowest seat.

use crate::action::SeatId;

pub const MATCH_END_SCORE: i32 = 100;

/// True when `seat` scored strictly less than every other seat.
pub fn is_strict_minimum(scores: &[i32], seat: SeatId) -> bool {
    let Some(&own) = scores.get(seat) else {
        return false;
    };
    scores
        .iter()
        .enumerate()
        .all(|(other, &score)| other == seat || own < score)
}

/// Round scores with the first-to-finish penalty applied.
pub fn apply_first_to_finish_penalty(scores: &[i32], first_to_finish: Option<SeatId>) -> Vec<i32> {
    let mut adjusted = scores.to_vec();
    if let Some(seat) = first_to_finish {
        if seat < adjusted.len() && !is_strict_minimum(scores, seat) {
            adjusted[seat] *= 2;
        }
    }
    adjusted
}

pub fn is_match_over(totals: &[i32]) -> bool {
    totals.iter().any(|&total| total >= MATCH_END_SCORE)
}

/// Seat with the lowest total; the first such seat on ties.
pub fn leader(totals: &[i32]) -> Option<SeatId> {
    totals
        .iter()
        .enumerate()
        .fold(None, |best: Option<(SeatId, i32)>, (seat, &total)| match best {
            Some((_, best_total)) if best_total <= total => best,
            _ => Some((seat, total)),
        })
        .map(|(seat, _)| seat)
}
