#![allow(dead_code)]

use skyjo::action::Action;
use skyjo::state::{Phase, RoundSettings, RoundView, SeatView, SlotView, TurnStep};

/// Grid from twelve entries: `None` is face down, `Some(v)` face up.
pub fn grid(cells: [Option<i8>; 12]) -> [SlotView; 12] {
    cells.map(|cell| match cell {
        Some(value) => SlotView::Visible(value),
        None => SlotView::Hidden,
    })
}

/// All-visible grid.
pub fn shown(values: [i8; 12]) -> [SlotView; 12] {
    values.map(SlotView::Visible)
}

fn seat(id: usize, slots: [SlotView; 12], current: bool) -> SeatView {
    let visible_score = slots
        .iter()
        .filter_map(|slot| slot.live_value())
        .map(i32::from)
        .sum();
    SeatView {
        id,
        slots,
        visible_score,
        is_current: current,
        finished_first: false,
    }
}

/// Two-seat view from seat 0's perspective during its own turn.
pub fn view(
    me: [SlotView; 12],
    other: [SlotView; 12],
    phase: Phase,
    step: TurnStep,
    discard_top: Option<i8>,
    deck_count: usize,
) -> RoundView {
    RoundView {
        settings: RoundSettings::new(2).expect("two seats"),
        phase,
        step,
        self_seat: 0,
        current_seat: 0,
        starting_seat: Some(0),
        deck_count,
        discard_top,
        discard_count: usize::from(discard_top.is_some()),
        first_to_finish: None,
        last_turn_remaining: 0,
        seats: vec![seat(0, me, true), seat(1, other, false)],
    }
}

/// Turn-phase view with a bot-relevant discard top and a non-empty deck.
pub fn turn_view(me: [SlotView; 12], step: TurnStep, top: i8) -> RoundView {
    view(me, [SlotView::Hidden; 12], Phase::Turn, step, Some(top), 80)
}

/// The legal actions the engine offers for `view`.
pub fn legal_for(view: &RoundView) -> Vec<Action> {
    let me = view.me();
    let reveals = me.hidden_slots().into_iter().map(Action::RevealSlot);
    match (view.phase, view.step) {
        (Phase::InitialReveal, _) => reveals.collect(),
        (_, TurnStep::Start) => {
            let mut actions = Vec::new();
            if view.deck_count > 0 {
                actions.push(Action::DrawFromDeck);
            }
            if view.discard_top.is_some() {
                actions.push(Action::TakeDiscard);
            }
            actions.extend(reveals);
            actions
        }
        (_, TurnStep::Drawn) => {
            let mut actions = vec![Action::TakeDiscard];
            actions.extend(reveals);
            actions
        }
        (_, TurnStep::DiscardSelected) => (0..12)
            .filter(|&slot| !me.slots[slot].is_eliminated())
            .map(Action::SwapIntoSlot)
            .collect(),
    }
}
