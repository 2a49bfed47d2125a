//! Decision skeleton shared by the Easy, Medium and Hard bots.
//!
//! Every tier follows the same shape: a discard top between -2 and 4 is worth taking;
//! anything higher sends the bot to the deck, after which it looks at the new top once
//! more and either takes it or reveals a random face-down card. Tiers only differ in
//! when they accept a card and where they put it.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::action::Action;
use crate::state::{Phase, RoundView, SeatView, TurnStep};

pub const GOOD_CARD_MAX: i8 = 4;
pub const HIGH_CARD_MIN: i8 = 5;

/// A card the bots are happy to take from the discard stack.
#[inline]
pub fn is_good(value: i8) -> bool {
    value <= GOOD_CARD_MAX
}

pub(crate) trait TierPolicy {
    fn name(&self) -> &'static str;

    fn rng(&mut self) -> &mut dyn rand::RngCore;

    /// Take `top` rather than drawing (`after_draw == false`) or revealing (`true`).
    fn wants_discard(&mut self, view: &RoundView, top: i8, after_draw: bool) -> bool;

    /// Slot that receives the selected discard card. `None` falls back to the
    /// least harmful live slot.
    fn swap_target(&mut self, view: &RoundView, top: i8) -> Option<usize>;
}

pub(crate) fn decide<P: TierPolicy>(policy: &mut P, view: &RoundView, legal: &[Action]) -> Action {
    assert!(
        !legal.is_empty(),
        "{} bot requires at least one legal action",
        policy.name()
    );
    let me = view.me();
    let preferred = match (view.phase, view.step, view.discard_top) {
        (Phase::InitialReveal, _, _) => random_hidden(me, policy.rng()).map(Action::RevealSlot),
        (_, TurnStep::DiscardSelected, Some(top)) => {
            let slot = policy
                .swap_target(view, top)
                .or_else(|| highest_live(me))
                .or_else(|| first_open(me));
            slot.map(Action::SwapIntoSlot)
        }
        (_, TurnStep::Start, Some(top)) => {
            if policy.wants_discard(view, top, false) {
                Some(Action::TakeDiscard)
            } else if view.deck_count > 0 {
                Some(Action::DrawFromDeck)
            } else {
                Some(after_draw(policy, view, top))
            }
        }
        (_, TurnStep::Drawn, Some(top)) => Some(after_draw(policy, view, top)),
        _ => None,
    };
    let action = choose_legal(preferred, legal, policy.name());
    debug!(bot = policy.name(), seat = view.self_seat, ?action, "bot decision");
    action
}

/// Second look at the discard top: take it, or reveal a face-down card instead.
fn after_draw<P: TierPolicy>(policy: &mut P, view: &RoundView, top: i8) -> Action {
    let me = view.me();
    if policy.wants_discard(view, top, true) {
        return Action::TakeDiscard;
    }
    match random_hidden(me, policy.rng()) {
        Some(slot) => Action::RevealSlot(slot),
        // Nothing left to reveal: the card has to go somewhere.
        None => Action::TakeDiscard,
    }
}

fn choose_legal(preferred: Option<Action>, legal: &[Action], bot: &'static str) -> Action {
    match preferred {
        Some(action) if legal.contains(&action) => action,
        other => {
            warn!(bot, preferred = ?other, "preferred action unavailable, using first legal one");
            legal[0]
        }
    }
}

pub(crate) fn random_hidden(me: &SeatView, rng: &mut dyn rand::RngCore) -> Option<usize> {
    me.hidden_slots().choose(rng).copied()
}

/// Random live slot holding a card of at least [`HIGH_CARD_MIN`].
pub(crate) fn random_high(me: &SeatView, rng: &mut dyn rand::RngCore) -> Option<usize> {
    let high: Vec<usize> = me
        .live_slots()
        .into_iter()
        .filter(|&(_, value)| value >= HIGH_CARD_MIN)
        .map(|(slot, _)| slot)
        .collect();
    high.choose(rng).copied()
}

pub(crate) fn highest_live(me: &SeatView) -> Option<usize> {
    me.highest_live().map(|(slot, _)| slot)
}

/// Live slot whose value is closest to `top`; the first one on ties.
pub(crate) fn closest_live(me: &SeatView, top: i8) -> Option<usize> {
    me.live_slots()
        .into_iter()
        .min_by_key(|&(slot, value)| ((i16::from(value) - i16::from(top)).abs(), slot))
        .map(|(slot, _)| slot)
}

fn first_open(me: &SeatView) -> Option<usize> {
    me.slots.iter().position(|slot| !slot.is_eliminated())
}

/// Uniform pick used where a tier wants "any of these".
pub(crate) fn pick<R: Rng + ?Sized>(candidates: &[usize], rng: &mut R) -> Option<usize> {
    candidates.choose(rng).copied()
}
