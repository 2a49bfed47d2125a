mod common;

use common::{grid, legal_for, shown, turn_view, view};
use skyjo::action::Action;
use skyjo::bots::HardBot;
use skyjo::state::{Phase, RoundView, SlotView, TurnStep};
use skyjo::Bot;

fn choose(bot: &mut HardBot, view: &RoundView) -> Action {
    let legal = legal_for(view);
    let action = bot.select_action(view, &legal);
    assert!(legal.contains(&action), "{action:?} not in {legal:?}");
    action
}

#[test]
fn hard_replaces_single_highest_card() {
    // Two high cards showing; Hard always picks the 11, Easy could pick either.
    let me = grid([Some(3), Some(9), None, Some(11), None, None, None, None, None, None, Some(4), None]);
    for seed in 0..8 {
        let mut bot = HardBot::new(seed);
        assert_eq!(
            choose(&mut bot, &turn_view(me, TurnStep::DiscardSelected, 2)),
            Action::SwapIntoSlot(3)
        );
    }
}

#[test]
fn hard_prefers_hidden_slot_over_lower_card() {
    let me = grid([Some(1), Some(2), None, None, None, None, None, None, None, None, None, None]);
    let mut bot = HardBot::new(1);
    match choose(&mut bot, &turn_view(me, TurnStep::DiscardSelected, 3)) {
        Action::SwapIntoSlot(slot) => assert!(slot >= 2, "swapped into visible slot {slot}"),
        other => panic!("expected a swap, got {other:?}"),
    }
}

#[test]
fn hard_forced_swap_minimises_difference() {
    let me = shown([3, 12, 1, 0, 8, 2, 5, 5, 11, -1, 4, 6]);
    let mut bot = HardBot::new(2);
    assert_eq!(choose(&mut bot, &turn_view(me, TurnStep::Drawn, 10)), Action::TakeDiscard);
    // 11 is one away from 10; 12 and 8 are two away.
    assert_eq!(
        choose(&mut bot, &turn_view(me, TurnStep::DiscardSelected, 10)),
        Action::SwapIntoSlot(8)
    );
}

#[test]
fn hard_draws_once_then_decides() {
    let me = grid([Some(3), Some(9), None, None, None, None, None, None, None, None, None, None]);
    let mut bot = HardBot::new(3);
    assert_eq!(choose(&mut bot, &turn_view(me, TurnStep::Start, 6)), Action::DrawFromDeck);
    assert_eq!(choose(&mut bot, &turn_view(me, TurnStep::Drawn, -1)), Action::TakeDiscard);
    assert!(matches!(
        choose(&mut bot, &turn_view(me, TurnStep::Drawn, 6)),
        Action::RevealSlot(_)
    ));
}

#[test]
fn hard_skips_eliminated_slots() {
    let mut me = grid([Some(12), Some(3), None, None, Some(12), None, None, None, Some(12), None, None, None]);
    for slot in [0, 4, 8] {
        me[slot] = SlotView::Eliminated(12);
    }
    let v = view(me, [SlotView::Hidden; 12], Phase::Turn, TurnStep::DiscardSelected, Some(0), 30);
    assert_eq!(choose(&mut HardBot::new(4), &v), Action::SwapIntoSlot(1));
}
