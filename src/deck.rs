use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, full_deck};

/// Face-down draw pile. The top of the pile is the end of the vector.
#[derive(Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Standard deck shuffled with the given RNG.
    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        cards.shuffle(rng);
        Self { cards }
    }

    /// Uses `cards` as-is; the last element is drawn first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

/// Face-up discard pile. Every card placed here is turned visible.
#[derive(Debug, Default)]
pub struct DiscardStack {
    cards: Vec<Card>,
}

impl DiscardStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    pub fn take(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn add(&mut self, mut card: Card) {
        card.reveal();
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
