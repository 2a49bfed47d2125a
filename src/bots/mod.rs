pub mod easy;
pub mod hard;
pub mod human;
pub mod medium;
pub(crate) mod policy;
pub mod random;
pub mod registry;

pub use easy::EasyBot;
pub use hard::HardBot;
pub use human::HumanBot;
pub use medium::MediumBot;
pub use policy::is_good;
pub use random::RandomBot;

use crate::bot::{Bot, Difficulty};

/// Bot for the given tier, seeded for reproducible play.
pub fn bot_for(difficulty: Difficulty, seed: u64) -> Box<dyn Bot> {
    match difficulty {
        Difficulty::Easy => Box::new(EasyBot::new(seed)),
        Difficulty::Medium => Box::new(MediumBot::new(seed)),
        Difficulty::Hard => Box::new(HardBot::new(seed)),
    }
}
