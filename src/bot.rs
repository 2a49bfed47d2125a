use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::state::RoundView;

/// Interface for anything that picks actions for a seat: bots and interactive players alike.
pub trait Bot {
    /// Called once per engine step of the seat; must return one of `legal_actions`.
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action;

    /// Whether a person is behind this seat (hosts only honour display pauses for them).
    fn is_interactive(&self) -> bool {
        false
    }
}

impl<B: Bot + ?Sized> Bot for Box<B> {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        (**self).select_action(state, legal_actions)
    }

    fn is_interactive(&self) -> bool {
        (**self).is_interactive()
    }
}

/// Strength of an automated seat.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}
