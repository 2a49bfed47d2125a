use serde::{Deserialize, Serialize};

use crate::card::HAND_SIZE;

/// Zero-based index of a seat within the round.
pub type SeatId = usize;

/// One step a seat can take. A turn is one to three steps:
/// reveal, or [draw,] take discard, swap.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Turn the top of the deck face up onto the discard stack.
    DrawFromDeck,
    /// Select the top of the discard stack for a swap.
    TakeDiscard,
    /// Put the selected discard card into a slot; the slot's card goes onto the discard.
    SwapIntoSlot(usize),
    /// Flip one of the seat's own face-down cards.
    RevealSlot(usize),
}

impl Action {
    /// Slot targeted by the action, if any.
    pub fn slot(&self) -> Option<usize> {
        match self {
            Action::SwapIntoSlot(slot) | Action::RevealSlot(slot) => Some(*slot),
            Action::DrawFromDeck | Action::TakeDiscard => None,
        }
    }

    pub fn slot_in_range(&self) -> bool {
        self.slot().map(|slot| slot < HAND_SIZE).unwrap_or(true)
    }

    /// Whether the action closes the acting seat's turn.
    pub fn ends_turn(&self) -> bool {
        matches!(self, Action::SwapIntoSlot(_) | Action::RevealSlot(_))
    }
}
