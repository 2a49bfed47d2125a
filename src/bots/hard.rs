use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::policy::{self, TierPolicy};
use crate::state::RoundView;

const DEFAULT_SEED: u64 = 0x4A2D_0003;

/// Hard bot: greedy value minimisation. A good discard always replaces the single
/// highest face-up card; if that card is no higher than the discard, a face-down slot
/// takes it instead. Forced swaps go to the slot closest in value to the discard.
pub struct HardBot {
    rng: StdRng,
}

impl HardBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for HardBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl TierPolicy for HardBot {
    fn name(&self) -> &'static str {
        "hard"
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
            return policy::closest_live(me, top);
        }
        match me.highest_live() {
            Some((slot, value)) if value > top => Some(slot),
            highest => policy::random_hidden(me, &mut self.rng)
                .or(highest.map(|(slot, _)| slot)),
        }
    }
}

impl Bot for HardBot {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        policy::decide(self, state, legal_actions)
    }
}
