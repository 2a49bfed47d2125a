use serde::{Deserialize, Serialize};

/// A single Skyjo card. The value never changes once dealt; only its flags do.
///
/// Cards are deliberately neither `Clone` nor `Copy`: every card lives in exactly one
/// place (deck, discard stack or a hand slot) and moves between them.
#[derive(Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    value: i8,
    visible: bool,
    eliminated: bool,
}

pub const MIN_CARD_VALUE: i8 = -2;
pub const MAX_CARD_VALUE: i8 = 12;
pub const DECK_SIZE: usize = 150;
pub const HAND_SIZE: usize = 12;
pub const ROWS: usize = 3;
pub const COLUMNS: usize = 4;
pub const MAX_PLAYERS: usize = 4;

/// Number of copies of `value` in a standard deck.
pub fn copies_of(value: i8) -> usize {
    match value {
        -2 => 5,
        -1 => 10,
        0 => 15,
        1..=MAX_CARD_VALUE => 10,
        _ => 0,
    }
}

impl Card {
    /// Creates a face-down card. Rounds refuse decks holding values outside
    /// [`MIN_CARD_VALUE`]..=[`MAX_CARD_VALUE`].
    #[inline]
    pub fn new(value: i8) -> Self {
        Self {
            value,
            visible: false,
            eliminated: false,
        }
    }

    #[inline]
    pub fn value(&self) -> i8 {
        self.value
    }

    /// Whether the value is one a standard deck can hold.
    #[inline]
    pub fn has_valid_value(&self) -> bool {
        (MIN_CARD_VALUE..=MAX_CARD_VALUE).contains(&self.value)
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn is_eliminated(&self) -> bool {
        self.eliminated
    }

    /// Points this card adds to a round score.
    #[inline]
    pub fn score(&self) -> i32 {
        if self.visible && !self.eliminated {
            i32::from(self.value)
        } else {
            0
        }
    }

    pub(crate) fn reveal(&mut self) {
        self.visible = true;
    }

    pub(crate) fn eliminate(&mut self) {
        self.eliminated = true;
    }
}

/// Builds the 150-card deck in deterministic order (unshuffled, all face down).
pub fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for value in MIN_CARD_VALUE..=MAX_CARD_VALUE {
        deck.extend(std::iter::repeat_with(|| Card::new(value)).take(copies_of(value)));
    }
    deck
}
