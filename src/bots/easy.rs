use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::policy::{self, TierPolicy};
use crate::state::RoundView;

const DEFAULT_SEED: u64 = 0xEA5E_0001;

/// Easy bot: takes any card from -2 to 4 and drops it on a random high card (5+),
/// or on a random face-down slot when no high card is showing. Otherwise draws once
/// and reveals a random card if the draw was bad as well.
pub struct EasyBot {
    rng: StdRng,
}

impl EasyBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for EasyBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl TierPolicy for EasyBot {
    fn name(&self) -> &'static str {
        "easy"
    }

    fn rng(&mut self) -> &mut dyn rand::RngCore {
        &mut self.rng
    }

    fn wants_discard(&mut self, _view: &RoundView, top: i8, _after_draw: bool) -> bool {
        policy::is_good(top)
    }

    fn swap_target(&mut self, view: &RoundView, top: i8) -> Option<usize> {
        let me = view.me();
        if !policy::is_good(top) {
            return policy::highest_live(me);
        }
        policy::random_high(me, &mut self.rng).or_else(|| policy::random_hidden(me, &mut self.rng))
    }
}

impl Bot for EasyBot {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        policy::decide(self, state, legal_actions)
    }
}
