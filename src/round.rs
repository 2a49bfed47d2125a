use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::action::{Action, SeatId};
use crate::card::{Card, HAND_SIZE};
use crate::deck::{Deck, DiscardStack};
use crate::error::{InvalidAction, RoundError};
use crate::hand::Hand;
use crate::state::{Phase, RoundSettings, RoundView, SeatView, SlotView, TurnStep};

const DEFAULT_SEED: u64 = 0x5EED_C0DE_5EED_C0DE;

/// Pause requested after the starting seat is announced.
pub const STARTING_SEAT_PAUSE: Duration = Duration::from_secs(5);
/// Pause requested once every card is turned at the end of a round.
pub const ROUND_END_PAUSE: Duration = Duration::from_secs(5);

/// Configuration required to bootstrap a round.
#[derive(Clone, Copy, Debug)]
pub struct RoundConfig {
    pub num_players: usize,
    pub seed: u64,
}

impl RoundConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, RoundError> {
        RoundSettings::new(num_players)?;
        Ok(Self { num_players, seed })
    }
}

/// Builder that allows deterministic deck injection for tests and simulations.
pub struct RoundBuilder {
    config: RoundConfig,
    deck: Option<Vec<Card>>,
}

impl RoundBuilder {
    pub fn new(num_players: usize) -> Result<Self, RoundError> {
        Ok(Self {
            config: RoundConfig::new(num_players, DEFAULT_SEED)?,
            deck: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Use `deck` instead of a shuffled standard deck. The last card is dealt first:
    /// seat 0 receives slots 0..12, then seat 1, and so on; the next card starts the
    /// discard stack.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn build(self) -> Result<RoundEngine, RoundError> {
        RoundEngine::from_builder(self)
    }
}

/// Scores of a finished round, before the first-to-finish penalty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEndSummary {
    pub round_scores: Vec<i32>,
    pub first_to_finish: Option<SeatId>,
}

/// Notifications for the host. The engine never blocks; pauses are only requested.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEvent {
    StartingSeat { seat: SeatId, revealed_sum: i32 },
    PauseForDisplay(Duration),
    ColumnEliminated { seat: SeatId, column: usize, value: i8 },
    LastTurnStarted { seat: SeatId },
    RoundEnded(RoundEndSummary),
}

/// Rules engine for a single round.
pub struct RoundEngine {
    settings: RoundSettings,
    phase: Phase,
    step: TurnStep,
    current: SeatId,
    hands: Vec<Hand>,
    deck: Deck,
    discard: DiscardStack,
    reveals: Vec<usize>,
    starting_seat: Option<SeatId>,
    first_to_finish: Option<SeatId>,
    last_turn_remaining: usize,
    total_cards: usize,
    summary: Option<RoundEndSummary>,
    fault: Option<usize>,
    events: Vec<RoundEvent>,
}

impl RoundEngine {
    pub fn builder(num_players: usize) -> Result<RoundBuilder, RoundError> {
        RoundBuilder::new(num_players)
    }

    pub fn new(config: RoundConfig) -> Result<Self, RoundError> {
        RoundBuilder { config, deck: None }.build()
    }

    pub fn settings(&self) -> RoundSettings {
        self.settings
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn step(&self) -> TurnStep {
        self.step
    }

    pub fn current_seat(&self) -> SeatId {
        self.current
    }

    pub fn starting_seat(&self) -> Option<SeatId> {
        self.starting_seat
    }

    pub fn first_to_finish(&self) -> Option<SeatId> {
        self.first_to_finish
    }

    pub fn last_turn_remaining(&self) -> usize {
        self.last_turn_remaining
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    pub fn discard_top(&self) -> Option<&Card> {
        self.discard.peek()
    }

    /// Full access to a seat's cards, hidden values included. Hosts should hand
    /// players a [`RoundView`] instead.
    pub fn hand(&self, seat: SeatId) -> Option<&Hand> {
        self.hands.get(seat)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Scoring)
    }

    pub fn summary(&self) -> Option<&RoundEndSummary> {
        self.summary.as_ref()
    }

    /// Cards currently held by the deck, the discard stack and every hand slot.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.discard.len() + self.hands.len() * HAND_SIZE
    }

    /// Drains the events emitted since the previous call.
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state_view(&self, perspective: SeatId) -> Result<RoundView, RoundError> {
        if perspective >= self.hands.len() {
            return Err(RoundError::InvalidSeat(perspective));
        }
        let seats = self
            .hands
            .iter()
            .enumerate()
            .map(|(id, hand)| SeatView {
                id,
                slots: hand.slots().each_ref().map(SlotView::of),
                visible_score: hand.score(),
                is_current: id == self.current,
                finished_first: self.first_to_finish == Some(id),
            })
            .collect();

        Ok(RoundView {
            settings: self.settings,
            phase: self.phase,
            step: self.step,
            self_seat: perspective,
            current_seat: self.current,
            starting_seat: self.starting_seat,
            deck_count: self.deck.len(),
            discard_top: self.discard.peek().map(Card::value),
            discard_count: self.discard.len(),
            first_to_finish: self.first_to_finish,
            last_turn_remaining: self.last_turn_remaining,
            seats,
        })
    }

    pub fn legal_actions(&self, seat: SeatId) -> Result<Vec<Action>, RoundError> {
        if self.is_finished() || self.fault.is_some() {
            return Ok(Vec::new());
        }
        self.check_seat(seat)?;
        let hand = &self.hands[seat];
        let mut actions = Vec::new();
        match (self.phase, self.step) {
            (Phase::InitialReveal, _) => {
                actions.extend(hand.hidden_slots().map(Action::RevealSlot));
            }
            (_, TurnStep::Start) => {
                if !self.deck.is_empty() {
                    actions.push(Action::DrawFromDeck);
                }
                if !self.discard.is_empty() {
                    actions.push(Action::TakeDiscard);
                }
                actions.extend(hand.hidden_slots().map(Action::RevealSlot));
            }
            (_, TurnStep::Drawn) => {
                if !self.discard.is_empty() {
                    actions.push(Action::TakeDiscard);
                }
                actions.extend(hand.hidden_slots().map(Action::RevealSlot));
            }
            (_, TurnStep::DiscardSelected) => {
                actions.extend(
                    (0..HAND_SIZE)
                        .filter(|&slot| hand.check_swap(slot).is_ok())
                        .map(Action::SwapIntoSlot),
                );
            }
        }
        Ok(actions)
    }

    /// Applies one step for `seat`. A rejected action leaves the round untouched.
    pub fn apply_action(&mut self, seat: SeatId, action: Action) -> Result<(), RoundError> {
        let result = self.try_apply(seat, action);
        match &result {
            Ok(()) => debug!(seat, ?action, phase = ?self.phase, "applied action"),
            Err(err @ RoundError::CardAccounting { .. }) => {
                error!(seat, ?action, error = %err, "aborting round")
            }
            Err(err) if err.is_misuse() => warn!(seat, ?action, error = %err, "rejected action"),
            Err(err) => debug!(seat, ?action, error = %err, "invalid action"),
        }
        result
    }

    fn try_apply(&mut self, seat: SeatId, action: Action) -> Result<(), RoundError> {
        if let Some(found) = self.fault {
            return Err(RoundError::CardAccounting {
                expected: self.total_cards,
                found,
            });
        }
        if self.is_finished() {
            return Err(RoundError::RoundOver);
        }
        self.check_seat(seat)?;
        if !action.slot_in_range() {
            if let Some(slot) = action.slot() {
                return Err(InvalidAction::SlotIndex(slot).into());
            }
        }

        match self.phase {
            Phase::InitialReveal => self.initial_reveal(action)?,
            Phase::Turn | Phase::LastTurn => self.play_step(action)?,
            Phase::Scoring => return Err(RoundError::RoundOver),
        }
        self.verify_accounting()
    }

    fn check_seat(&self, seat: SeatId) -> Result<(), RoundError> {
        if seat >= self.hands.len() {
            return Err(RoundError::InvalidSeat(seat));
        }
        if seat != self.current {
            return Err(RoundError::NotSeatsTurn {
                seat,
                current: self.current,
            });
        }
        Ok(())
    }

    fn from_builder(builder: RoundBuilder) -> Result<Self, RoundError> {
        let RoundBuilder { config, deck } = builder;
        let settings = RoundSettings::new(config.num_players)?;
        let mut deck = match deck {
            Some(cards) => {
                if !cards.iter().all(Card::has_valid_value) {
                    return Err(RoundError::InvalidConfiguration(
                        "deck holds a card value outside -2..=12",
                    ));
                }
                Deck::from_cards(cards)
            }
            None => {
                let mut rng = StdRng::seed_from_u64(config.seed);
                Deck::shuffled(&mut rng)
            }
        };
        let total_cards = deck.len();
        if total_cards < settings.num_players * HAND_SIZE + 1 {
            return Err(RoundError::InvalidConfiguration(
                "deck does not contain enough cards to deal",
            ));
        }

        let mut hands = Vec::with_capacity(settings.num_players);
        for _ in 0..settings.num_players {
            let cards = (0..HAND_SIZE)
                .map(|_| deck.draw())
                .collect::<Option<Vec<_>>>()
                .ok_or(RoundError::InvalidConfiguration(
                    "deck exhausted while dealing hands",
                ))?;
            let hand = Hand::from_vec(cards).ok_or(RoundError::InvalidConfiguration(
                "hands must hold twelve cards",
            ))?;
            hands.push(hand);
        }
        let mut discard = DiscardStack::new();
        discard.add(deck.draw().ok_or(RoundError::InvalidConfiguration(
            "deck exhausted before the first discard",
        ))?);

        debug!(
            players = settings.num_players,
            deck = deck.len(),
            "dealt round"
        );
        Ok(RoundEngine {
            settings,
            phase: Phase::InitialReveal,
            step: TurnStep::Start,
            current: 0,
            reveals: vec![0; settings.num_players],
            hands,
            deck,
            discard,
            starting_seat: None,
            first_to_finish: None,
            last_turn_remaining: 0,
            total_cards,
            summary: None,
            fault: None,
            events: Vec::new(),
        })
    }

    fn initial_reveal(&mut self, action: Action) -> Result<(), RoundError> {
        let Action::RevealSlot(slot) = action else {
            return Err(RoundError::WrongPhase {
                phase: self.phase,
                action,
            });
        };
        self.hands[self.current].reveal(slot)?;
        self.reveals[self.current] += 1;
        if self.reveals[self.current] >= self.settings.initial_reveals {
            let next = (self.current + 1) % self.settings.num_players;
            if next == 0 {
                self.begin_turns();
            } else {
                self.current = next;
            }
        }
        Ok(())
    }

    /// Highest two-card total starts; ties go to the lowest seat.
    fn begin_turns(&mut self) {
        let mut starter = 0;
        let mut best = i32::MIN;
        for (seat, hand) in self.hands.iter().enumerate() {
            let sum = hand.visible_sum();
            if sum > best {
                best = sum;
                starter = seat;
            }
        }
        info!(seat = starter, revealed_sum = best, "starting seat chosen");
        self.phase = Phase::Turn;
        self.step = TurnStep::Start;
        self.current = starter;
        self.starting_seat = Some(starter);
        self.events.push(RoundEvent::StartingSeat {
            seat: starter,
            revealed_sum: best,
        });
        self.events
            .push(RoundEvent::PauseForDisplay(STARTING_SEAT_PAUSE));
    }

    fn play_step(&mut self, action: Action) -> Result<(), RoundError> {
        let seat = self.current;
        match (self.step, action) {
            (TurnStep::Start, Action::DrawFromDeck) => {
                let card = self.deck.draw().ok_or(RoundError::DeckEmpty)?;
                self.discard.add(card);
                self.step = TurnStep::Drawn;
            }
            (TurnStep::Drawn, Action::DrawFromDeck) => {
                return Err(InvalidAction::OutOfSequence("only one card may be drawn per turn").into());
            }
            (TurnStep::Start | TurnStep::Drawn, Action::TakeDiscard) => {
                if self.discard.is_empty() {
                    return Err(InvalidAction::DiscardEmpty.into());
                }
                self.step = TurnStep::DiscardSelected;
            }
            (TurnStep::Start | TurnStep::Drawn, Action::RevealSlot(slot)) => {
                let hand = &mut self.hands[seat];
                if !hand.has_hidden() {
                    return Err(InvalidAction::NoHiddenCards.into());
                }
                hand.reveal(slot)?;
                self.finish_turn();
            }
            (TurnStep::DiscardSelected, Action::SwapIntoSlot(slot)) => {
                let hand = &mut self.hands[seat];
                hand.check_swap(slot)?;
                let taken = self.discard.take().ok_or(InvalidAction::DiscardEmpty)?;
                let replaced = hand.swap(slot, taken)?;
                self.discard.add(replaced);
                self.finish_turn();
            }
            (TurnStep::DiscardSelected, _) => {
                return Err(InvalidAction::OutOfSequence(
                    "the selected discard card must be swapped into a slot",
                )
                .into());
            }
            (_, Action::SwapIntoSlot(_)) => {
                return Err(InvalidAction::OutOfSequence(
                    "take the discard card before swapping",
                )
                .into());
            }
        }
        Ok(())
    }

    fn finish_turn(&mut self) {
        let seat = self.current;
        for (column, value) in self.hands[seat].eliminate_columns() {
            info!(seat, column, value, "column eliminated");
            self.events.push(RoundEvent::ColumnEliminated {
                seat,
                column,
                value,
            });
        }

        match self.phase {
            Phase::Turn => {
                if self.first_to_finish.is_none() && self.hands[seat].all_revealed() {
                    self.first_to_finish = Some(seat);
                    self.phase = Phase::LastTurn;
                    self.last_turn_remaining = self.settings.num_players - 1;
                    info!(seat, "all cards revealed, last turn begins");
                    self.events.push(RoundEvent::LastTurnStarted { seat });
                    if self.last_turn_remaining == 0 {
                        self.score_round();
                        return;
                    }
                }
            }
            Phase::LastTurn => {
                self.last_turn_remaining = self.last_turn_remaining.saturating_sub(1);
                if self.last_turn_remaining == 0 {
                    self.score_round();
                    return;
                }
            }
            Phase::InitialReveal | Phase::Scoring => {}
        }

        self.current = (seat + 1) % self.settings.num_players;
        self.step = TurnStep::Start;
    }

    fn score_round(&mut self) {
        for hand in &mut self.hands {
            hand.reveal_all();
        }
        let round_scores: Vec<i32> = self.hands.iter().map(Hand::score).collect();
        let summary = RoundEndSummary {
            round_scores,
            first_to_finish: self.first_to_finish,
        };
        info!(scores = ?summary.round_scores, first_to_finish = ?summary.first_to_finish, "round scored");
        self.phase = Phase::Scoring;
        self.step = TurnStep::Start;
        self.events.push(RoundEvent::PauseForDisplay(ROUND_END_PAUSE));
        self.events.push(RoundEvent::RoundEnded(summary.clone()));
        self.summary = Some(summary);
    }

    fn verify_accounting(&mut self) -> Result<(), RoundError> {
        let found = self.card_count();
        if found != self.total_cards {
            self.fault = Some(found);
            return Err(RoundError::CardAccounting {
                expected: self.total_cards,
                found,
            });
        }
        Ok(())
    }
}
