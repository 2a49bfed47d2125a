//! Multi-round match flow: seating, per-round seeds, penalty application and match end.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::action::SeatId;
use crate::bot::{Bot, Difficulty};
use crate::bots::{HumanBot, bot_for};
use crate::card::MAX_PLAYERS;
use crate::error::{MatchError, RoundError};
use crate::round::{RoundEndSummary, RoundEngine, RoundEvent};
use crate::score;

/// Startup parameters of a match. The first `player_count - bot_difficulties.len()`
/// seats are human, the rest are bots in the given order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchStartConfig {
    pub player_count: usize,
    pub player_names: Vec<String>,
    pub bot_difficulties: Vec<Difficulty>,
    pub seed: u64,
}

impl MatchStartConfig {
    /// All-bot match at one difficulty.
    pub fn bots_only(difficulty: Difficulty, player_count: usize, seed: u64) -> Self {
        Self {
            player_count,
            player_names: Vec::new(),
            bot_difficulties: vec![difficulty; player_count],
            seed,
        }
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(1..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(MatchError::InvalidConfiguration(format!(
                "player count must be between 1 and {MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.bot_difficulties.len() > self.player_count {
            return Err(MatchError::InvalidConfiguration(format!(
                "{} bots do not fit in {} seats",
                self.bot_difficulties.len(),
                self.player_count
            )));
        }
        if self.player_names.len() > self.player_count {
            return Err(MatchError::InvalidConfiguration(format!(
                "{} names given for {} seats",
                self.player_names.len(),
                self.player_count
            )));
        }
        Ok(())
    }

    pub fn human_count(&self) -> usize {
        self.player_count.saturating_sub(self.bot_difficulties.len())
    }

    pub fn controller(&self, seat: SeatId) -> Option<SeatController> {
        if seat >= self.player_count {
            return None;
        }
        let humans = self.human_count();
        Some(match seat.checked_sub(humans) {
            None => SeatController::Human,
            Some(bot) => SeatController::Bot(self.bot_difficulties[bot]),
        })
    }

    /// Display name of a seat; unnamed seats get a default from their controller.
    pub fn name_of(&self, seat: SeatId) -> String {
        if let Some(name) = self.player_names.get(seat).filter(|name| !name.trim().is_empty()) {
            return name.clone();
        }
        match self.controller(seat) {
            Some(SeatController::Bot(difficulty)) => format!("Bot {seat} ({difficulty})"),
            _ => format!("Player {seat}"),
        }
    }
}

/// Who decides the actions of a seat.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SeatController {
    Human,
    Bot(Difficulty),
}

/// Running score sheet of a match.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchState {
    pub player_count: usize,
    pub total_scores: Vec<i32>,
    /// Penalty-adjusted scores, one vector per closed round.
    pub round_scores: Vec<Vec<i32>>,
}

impl MatchState {
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            total_scores: vec![0; player_count],
            round_scores: Vec::new(),
        }
    }

    pub fn rounds_played(&self) -> usize {
        self.round_scores.len()
    }
}

/// Final result of a match.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchOutcome {
    pub winner: SeatId,
    pub total_scores: Vec<i32>,
}

/// One closed round as recorded on the score sheet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    pub round: usize,
    pub raw_scores: Vec<i32>,
    pub adjusted_scores: Vec<i32>,
    pub first_to_finish: Option<SeatId>,
    pub outcome: Option<MatchOutcome>,
}

pub struct MatchController {
    config: MatchStartConfig,
    state: MatchState,
    outcome: Option<MatchOutcome>,
}

impl MatchController {
    pub fn new(config: MatchStartConfig) -> Result<Self, MatchError> {
        config.validate()?;
        let state = MatchState::new(config.player_count);
        info!(
            players = config.player_count,
            humans = config.human_count(),
            seed = config.seed,
            "match started"
        );
        Ok(Self {
            config,
            state,
            outcome: None,
        })
    }

    pub fn config(&self) -> &MatchStartConfig {
        &self.config
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn totals(&self) -> &[i32] {
        &self.state.total_scores
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// One controller per seat: humans read stdin, bots get a per-seat seed.
    pub fn build_seats(&self) -> Vec<Box<dyn Bot>> {
        (0..self.config.player_count)
            .map(|seat| -> Box<dyn Bot> {
                match self.config.controller(seat) {
                    Some(SeatController::Bot(difficulty)) => {
                        bot_for(difficulty, mix_seed(self.config.seed, 0xB07, seat as u64))
                    }
                    _ => Box::new(HumanBot::new(self.config.name_of(seat))),
                }
            })
            .collect()
    }

    /// Deals the next round. Every round gets its own seed derived from the match seed.
    pub fn start_round(&self) -> Result<RoundEngine, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        let round = self.state.rounds_played();
        let seed = mix_seed(self.config.seed, round as u64, 0x5EED);
        debug!(round, seed, "dealing round");
        Ok(RoundEngine::builder(self.config.player_count)?
            .with_seed(seed)
            .build()?)
    }

    /// Applies the first-to-finish penalty, books the round and checks for match end.
    pub fn close_round(&mut self, summary: &RoundEndSummary) -> Result<RoundRecord, MatchError> {
        if self.is_over() {
            return Err(MatchError::MatchOver);
        }
        if summary.round_scores.len() != self.state.player_count {
            return Err(MatchError::ScoreCount {
                expected: self.state.player_count,
                found: summary.round_scores.len(),
            });
        }
        let adjusted =
            score::apply_first_to_finish_penalty(&summary.round_scores, summary.first_to_finish);
        for (total, points) in self.state.total_scores.iter_mut().zip(&adjusted) {
            *total += points;
        }
        self.state.round_scores.push(adjusted.clone());
        let round = self.state.rounds_played();
        info!(round, scores = ?adjusted, totals = ?self.state.total_scores, "round closed");

        if score::is_match_over(&self.state.total_scores) {
            if let Some(winner) = score::leader(&self.state.total_scores) {
                info!(winner, totals = ?self.state.total_scores, "match over");
                self.outcome = Some(MatchOutcome {
                    winner,
                    total_scores: self.state.total_scores.clone(),
                });
            }
        }
        Ok(RoundRecord {
            round,
            raw_scores: summary.round_scores.clone(),
            adjusted_scores: adjusted,
            first_to_finish: summary.first_to_finish,
            outcome: self.outcome.clone(),
        })
    }

    /// Plays rounds until the match ends, forwarding round events to `on_event`.
    pub fn play_match<B, F>(
        &mut self,
        seats: &mut [B],
        mut on_event: F,
    ) -> Result<MatchOutcome, MatchError>
    where
        B: Bot,
        F: FnMut(&RoundEvent),
    {
        loop {
            let mut round = self.start_round()?;
            let summary = play_round(&mut round, seats, &mut on_event)?;
            if let Some(outcome) = self.close_round(&summary)?.outcome {
                return Ok(outcome);
            }
        }
    }
}

/// Drives `round` to completion with one controller per seat.
pub fn play_round<B, F>(
    round: &mut RoundEngine,
    seats: &mut [B],
    mut on_event: F,
) -> Result<RoundEndSummary, RoundError>
where
    B: Bot,
    F: FnMut(&RoundEvent),
{
    if seats.len() != round.settings().num_players {
        return Err(RoundError::InvalidConfiguration(
            "one controller per seat is required",
        ));
    }
    loop {
        for event in round.take_events() {
            on_event(&event);
        }
        if let Some(summary) = round.summary() {
            return Ok(summary.clone());
        }
        let seat = round.current_seat();
        let view = round.state_view(seat)?;
        let legal = round.legal_actions(seat)?;
        if legal.is_empty() {
            return Err(RoundError::InvalidConfiguration(
                "no legal actions available",
            ));
        }
        let action = seats[seat].select_action(&view, &legal);
        round.apply_action(seat, action)?;
    }
}

/// Derives independent seeds from one base seed.
pub fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut z =
        base ^ (a.wrapping_mul(0x9E37_79B9_7F4A_7C15)) ^ (b.wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
