use serde::{Deserialize, Serialize};

use crate::action::SeatId;
use crate::card::{COLUMNS, Card, HAND_SIZE, MAX_PLAYERS, ROWS};
use crate::error::RoundError;

/// Fixed parameters of a running round.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSettings {
    pub num_players: usize,
    pub hand_size: usize,
    pub rows: usize,
    pub columns: usize,
    pub initial_reveals: usize,
}

impl RoundSettings {
    pub fn new(num_players: usize) -> Result<Self, RoundError> {
        if !(1..=MAX_PLAYERS).contains(&num_players) {
            return Err(RoundError::InvalidConfiguration(
                "players must be between 1 and 4",
            ));
        }
        Ok(Self {
            num_players,
            hand_size: HAND_SIZE,
            rows: ROWS,
            columns: COLUMNS,
            initial_reveals: 2,
        })
    }
}

/// Round phase. `Scoring` is terminal.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    InitialReveal,
    Turn,
    LastTurn,
    Scoring,
}

/// Progress inside the current seat's turn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnStep {
    /// Nothing done yet this turn.
    Start,
    /// The deck top was just turned onto the discard stack.
    Drawn,
    /// The discard top is selected and must be swapped into a slot.
    DiscardSelected,
}

/// What a seat (and its opponents) can see of a single slot.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlotView {
    Hidden,
    Visible(i8),
    Eliminated(i8),
}

impl SlotView {
    pub fn of(card: &Card) -> Self {
        if card.is_eliminated() {
            SlotView::Eliminated(card.value())
        } else if card.is_visible() {
            SlotView::Visible(card.value())
        } else {
            SlotView::Hidden
        }
    }

    /// Face-up value of a slot that still counts.
    pub fn live_value(&self) -> Option<i8> {
        match self {
            SlotView::Visible(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, SlotView::Hidden)
    }

    pub fn is_eliminated(&self) -> bool {
        matches!(self, SlotView::Eliminated(_))
    }
}

/// Public portion of a seat's grid.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub id: SeatId,
    pub slots: [SlotView; HAND_SIZE],
    pub visible_score: i32,
    pub is_current: bool,
    pub finished_first: bool,
}

impl SeatView {
    pub fn hidden_slots(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_hidden())
            .map(|(index, _)| index)
            .collect()
    }

    /// Face-up, non-eliminated `(slot, value)` pairs.
    pub fn live_slots(&self) -> Vec<(usize, i8)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.live_value().map(|value| (index, value)))
            .collect()
    }

    /// Number of face-up slots, eliminated ones included.
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_hidden()).count()
    }

    /// First live slot holding the highest face-up value.
    pub fn highest_live(&self) -> Option<(usize, i8)> {
        self.live_slots()
            .into_iter()
            .fold(None, |best, (slot, value)| match best {
                Some((_, best_value)) if best_value >= value => best,
                _ => Some((slot, value)),
            })
    }

    pub fn has_live_value(&self, value: i8) -> bool {
        self.slots.iter().any(|slot| slot.live_value() == Some(value))
    }

    /// Slots of `column`, top row first.
    pub fn column(&self, column: usize) -> [(usize, SlotView); ROWS] {
        std::array::from_fn(|row| {
            let slot = row * COLUMNS + column;
            (slot, self.slots[slot])
        })
    }
}

/// Round snapshot handed to bots and hosts. Hidden values are never included.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundView {
    pub settings: RoundSettings,
    pub phase: Phase,
    pub step: TurnStep,
    pub self_seat: SeatId,
    pub current_seat: SeatId,
    pub starting_seat: Option<SeatId>,
    pub deck_count: usize,
    pub discard_top: Option<i8>,
    pub discard_count: usize,
    pub first_to_finish: Option<SeatId>,
    pub last_turn_remaining: usize,
    pub seats: Vec<SeatView>,
}

impl RoundView {
    /// The viewing seat's own grid.
    pub fn me(&self) -> &SeatView {
        &self.seats[self.self_seat]
    }

    /// Seat that played right before the viewing seat.
    pub fn previous_seat(&self) -> &SeatView {
        let count = self.seats.len();
        &self.seats[(self.self_seat + count - 1) % count]
    }
}
