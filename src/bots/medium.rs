use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::action::Action;
use crate::bot::Bot;
use crate::bots::policy::{self, TierPolicy};
use crate::card::COLUMNS;
use crate::state::{RoundView, SeatView, SlotView};

const DEFAULT_SEED: u64 = 0x3ED1_0002;
/// Face-up slots (eliminated included) from which the bot stops revealing.
const ENDGAME_VISIBLE: usize = 11;

/// Medium bot: the Easy policy plus three refinements.
///
/// 1. A -1 or -2 on the discard is paired with a matching face-up card in the same
///    column. It never completes the triple, which would cancel the negative points.
/// 2. With 11 or more face-up slots it stops revealing and swaps its highest card after
///    a draw, whatever the discard shows. A card no lower than the discard goes into the
///    last face-down slot instead.
/// 3. While the deck still has cards, after a bad draw it looks at the previous seat:
///    if that seat shows the same value (and the bot holds it too but no negatives), the
///    bot takes the card off the stack and puts it on its closest-valued slot.
pub struct MediumBot {
    rng: StdRng,
}

impl MediumBot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn in_endgame(me: &SeatView) -> bool {
        me.visible_count() >= ENDGAME_VISIBLE
    }

    fn holds_negatives(me: &SeatView) -> bool {
        me.live_slots().iter().any(|&(_, value)| value < 0)
    }

    fn should_deny(view: &RoundView, top: i8) -> bool {
        let me = view.me();
        view.deck_count > 0
            && me.has_live_value(top)
            && !Self::holds_negatives(me)
            && view.previous_seat().id != me.id
            && view.previous_seat().has_live_value(top)
    }

    /// Slots where a negative `top` would sit next to exactly one matching card.
    /// Face-up replacements come first; face-down ones only when none are available.
    fn pairing_slots(me: &SeatView, top: i8) -> Vec<usize> {
        let mut shown = Vec::new();
        let mut hidden = Vec::new();
        for column in 0..COLUMNS {
            let cells = me.column(column);
            let matching = cells
                .iter()
                .filter(|(_, slot)| slot.live_value() == Some(top))
                .count();
            if matching != 1 {
                continue;
            }
            for (slot, cell) in cells {
                match cell {
                    SlotView::Visible(value) if value > top => shown.push(slot),
                    SlotView::Hidden => hidden.push(slot),
                    _ => {}
                }
            }
        }
        if shown.is_empty() { hidden } else { shown }
    }

    /// Slots where a negative `top` would complete a triple of itself.
    fn triple_slots(me: &SeatView, top: i8) -> Vec<usize> {
        (0..COLUMNS)
            .filter_map(|column| {
                let cells = me.column(column);
                let matching = cells
                    .iter()
                    .filter(|(_, slot)| slot.live_value() == Some(top))
                    .count();
                if matching != 2 {
                    return None;
                }
                cells
                    .iter()
                    .find(|(_, slot)| slot.live_value() != Some(top))
                    .map(|(slot, _)| *slot)
            })
            .collect()
    }

    fn good_card_target(&mut self, me: &SeatView, top: i8) -> Option<usize> {
        let avoid = if top < 0 {
            let pairing = Self::pairing_slots(me, top);
            if let Some(slot) = policy::pick(&pairing, &mut self.rng) {
                return Some(slot);
            }
            Self::triple_slots(me, top)
        } else {
            Vec::new()
        };
        let high: Vec<usize> = me
            .live_slots()
            .into_iter()
            .filter(|&(slot, value)| value >= policy::HIGH_CARD_MIN && !avoid.contains(&slot))
            .map(|(slot, _)| slot)
            .collect();
        if let Some(slot) = policy::pick(&high, &mut self.rng) {
            return Some(slot);
        }
        let hidden: Vec<usize> = me
            .hidden_slots()
            .into_iter()
            .filter(|slot| !avoid.contains(slot))
            .collect();
        policy::pick(&hidden, &mut self.rng).or_else(|| policy::random_hidden(me, &mut self.rng))
    }
}

impl Default for MediumBot {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl TierPolicy for MediumBot {
    fn name(&self) -> &'static str {
        "medium"
    }

    fn rng(&mut self) -> &mut dyn rand::RngCore {
        &mut self.rng
    }

    fn wants_discard(&mut self, view: &RoundView, top: i8, after_draw: bool) -> bool {
        if policy::is_good(top) {
            return true;
        }
        after_draw && (Self::in_endgame(view.me()) || Self::should_deny(view, top))
    }

    fn swap_target(&mut self, view: &RoundView, top: i8) -> Option<usize> {
        let me = view.me();
        if Self::in_endgame(me) {
            return match me.highest_live() {
                Some((slot, value)) if value > top => Some(slot),
                highest => policy::random_hidden(me, &mut self.rng)
                    .or(highest.map(|(slot, _)| slot)),
            };
        }
        if policy::is_good(top) {
            return self.good_card_target(me, top);
        }
        policy::closest_live(me, top)
    }
}

impl Bot for MediumBot {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        policy::decide(self, state, legal_actions)
    }
}
