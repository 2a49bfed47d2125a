use crate::card::{COLUMNS, Card, HAND_SIZE, ROWS};
use crate::error::InvalidAction;

/// A seat's 3×4 card grid. Slot `i` sits in row `i / 4`, column `i % 4`.
#[derive(Debug)]
pub struct Hand {
    slots: [Card; HAND_SIZE],
}

impl Hand {
    pub fn new(slots: [Card; HAND_SIZE]) -> Self {
        Self { slots }
    }

    /// Builds a hand from exactly twelve cards, slot 0 first.
    pub fn from_vec(cards: Vec<Card>) -> Option<Self> {
        let slots: [Card; HAND_SIZE] = cards.try_into().ok()?;
        Some(Self::new(slots))
    }

    #[inline]
    pub fn column_of(slot: usize) -> usize {
        slot % COLUMNS
    }

    #[inline]
    pub fn row_of(slot: usize) -> usize {
        slot / COLUMNS
    }

    /// Slots of one column, top row first.
    pub fn column_slots(column: usize) -> [usize; ROWS] {
        std::array::from_fn(|row| row * COLUMNS + column)
    }

    pub fn card(&self, slot: usize) -> Option<&Card> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> &[Card; HAND_SIZE] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter()
    }

    pub fn hidden_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, card)| !card.is_visible())
            .map(|(slot, _)| slot)
    }

    pub fn has_hidden(&self) -> bool {
        self.slots.iter().any(|card| !card.is_visible())
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|card| card.is_visible()).count()
    }

    /// Sum of the face-up values, eliminated or not.
    pub fn visible_sum(&self) -> i32 {
        self.slots
            .iter()
            .filter(|card| card.is_visible())
            .map(|card| i32::from(card.value()))
            .sum()
    }

    /// Every slot that still counts is face up.
    pub fn all_revealed(&self) -> bool {
        self.slots
            .iter()
            .all(|card| card.is_eliminated() || card.is_visible())
    }

    /// Round score: face-up, non-eliminated cards only.
    pub fn score(&self) -> i32 {
        self.slots.iter().map(Card::score).sum()
    }

    pub fn check_reveal(&self, slot: usize) -> Result<(), InvalidAction> {
        let card = self.card(slot).ok_or(InvalidAction::SlotIndex(slot))?;
        if card.is_eliminated() {
            return Err(InvalidAction::EliminatedSlot(slot));
        }
        if card.is_visible() {
            return Err(InvalidAction::AlreadyVisible(slot));
        }
        Ok(())
    }

    pub fn check_swap(&self, slot: usize) -> Result<(), InvalidAction> {
        let card = self.card(slot).ok_or(InvalidAction::SlotIndex(slot))?;
        if card.is_eliminated() {
            return Err(InvalidAction::EliminatedSlot(slot));
        }
        Ok(())
    }

    pub fn reveal(&mut self, slot: usize) -> Result<(), InvalidAction> {
        self.check_reveal(slot)?;
        self.slots[slot].reveal();
        Ok(())
    }

    /// Installs `card` face up in `slot` and hands back the previous card, also face up.
    pub(crate) fn swap(&mut self, slot: usize, mut card: Card) -> Result<Card, InvalidAction> {
        self.check_swap(slot)?;
        card.reveal();
        let mut previous = std::mem::replace(&mut self.slots[slot], card);
        previous.reveal();
        Ok(previous)
    }

    /// Marks every complete column of three equal face-up cards as eliminated.
    /// Returns the newly eliminated `(column, value)` pairs; a second call is a no-op.
    pub fn eliminate_columns(&mut self) -> Vec<(usize, i8)> {
        let mut eliminated = Vec::new();
        for column in 0..COLUMNS {
            let slots = Self::column_slots(column);
            let first = &self.slots[slots[0]];
            let value = first.value();
            let complete = slots.iter().all(|&slot| {
                let card = &self.slots[slot];
                card.is_visible() && !card.is_eliminated() && card.value() == value
            });
            if complete {
                for slot in slots {
                    self.slots[slot].eliminate();
                }
                eliminated.push((column, value));
            }
        }
        eliminated
    }

    pub(crate) fn reveal_all(&mut self) {
        for card in &mut self.slots {
            card.reveal();
        }
    }
}
