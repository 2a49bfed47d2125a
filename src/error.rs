use thiserror::Error;

use crate::action::{Action, SeatId};
use crate::state::Phase;

/// Errors that can occur when driving a round.
#[derive(Debug, Error)]
pub enum RoundError {
    #[error("seat index {0} is out of range")]
    InvalidSeat(SeatId),
    #[error("seat {seat} acted during seat {current}'s turn")]
    NotSeatsTurn { seat: SeatId, current: SeatId },
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("the deck is empty; take the discard or reveal a card instead")]
    DeckEmpty,
    #[error("{action:?} is not allowed during {phase:?}")]
    WrongPhase { phase: Phase, action: Action },
    #[error("round is already over")]
    RoundOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("card accounting broken: expected {expected} cards, found {found}")]
    CardAccounting { expected: usize, found: usize },
}

impl RoundError {
    /// True when the caller may simply pick another action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RoundError::InvalidAction(_) | RoundError::DeckEmpty)
    }

    /// True for actions submitted by the wrong seat, in the wrong phase or after the
    /// round ended.
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            RoundError::InvalidSeat(_)
                | RoundError::NotSeatsTurn { .. }
                | RoundError::WrongPhase { .. }
                | RoundError::RoundOver
        )
    }
}

/// Details of rejected player actions. Rejected actions never change the round.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("slot index {0} is out of range")]
    SlotIndex(usize),
    #[error("slot {0} is already face up")]
    AlreadyVisible(usize),
    #[error("slot {0} has been eliminated")]
    EliminatedSlot(usize),
    #[error("no face-down card left to reveal")]
    NoHiddenCards,
    #[error("the discard stack is empty")]
    DiscardEmpty,
    #[error("{0}")]
    OutOfSequence(&'static str),
}

/// Errors raised by the match controller.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid match configuration: {0}")]
    InvalidConfiguration(String),
    #[error("match is already over")]
    MatchOver,
    #[error("round produced {found} scores for {expected} seats")]
    ScoreCount { expected: usize, found: usize },
    #[error(transparent)]
    Round(#[from] RoundError),
}
