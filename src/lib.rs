//! Skyjo rules engine with tiered bots and a multi-round match controller.

pub mod action;
pub mod bot;
pub mod bots;
pub mod card;
pub mod deck;
pub mod error;
pub mod hand;
pub mod logging;
pub mod match_controller;
pub mod round;
pub mod score;
pub mod state;
pub mod visualize;

pub use crate::action::{Action, SeatId};
pub use crate::bot::{Bot, Difficulty};
pub use crate::bots::registry::{create_bot_from_spec, label_for_spec};
pub use crate::bots::{EasyBot, HardBot, HumanBot, MediumBot, RandomBot, bot_for};
pub use crate::card::{Card, DECK_SIZE, HAND_SIZE};
pub use crate::error::{InvalidAction, MatchError, RoundError};
pub use crate::hand::Hand;
pub use crate::logging::init_logging;
pub use crate::match_controller::{
    MatchController, MatchOutcome, MatchStartConfig, MatchState, RoundRecord, SeatController,
    mix_seed, play_round,
};
pub use crate::round::{RoundBuilder, RoundConfig, RoundEndSummary, RoundEngine, RoundEvent};
pub use crate::score::{MATCH_END_SCORE, apply_first_to_finish_penalty};
pub use crate::state::{Phase, RoundSettings, RoundView, SeatView, SlotView, TurnStep};
pub use crate::visualize::{DescribeOptions, VisualOptions, describe_action, render_state};
