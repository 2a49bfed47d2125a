use std::time::Duration;

use skyjo::action::Action;
use skyjo::card::{self, Card};
use skyjo::{InvalidAction, Phase, RoundBuilder, RoundEngine, RoundError, RoundEvent, SlotView, TurnStep};

/// Deck whose draw order is: every seat's twelve slots (seat 0 first), then the first
/// discard card, then `draws` in order.
fn build_deck(hands: &[[i8; 12]], discard: i8, draws: &[i8]) -> Vec<Card> {
    let mut order: Vec<i8> = hands.iter().flatten().copied().collect();
    order.push(discard);
    order.extend_from_slice(draws);
    order.into_iter().rev().map(Card::new).collect()
}

const STEPS: [i8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

fn round_with(hands: &[[i8; 12]], discard: i8, draws: &[i8]) -> Result<RoundEngine, RoundError> {
    RoundBuilder::new(hands.len())?
        .with_deck(build_deck(hands, discard, draws))
        .build()
}

/// Plays the initial reveal phase, seat by seat.
fn reveal_pairs(round: &mut RoundEngine, pairs: &[(usize, usize)]) -> Result<(), RoundError> {
    for (seat, &(a, b)) in pairs.iter().enumerate() {
        round.apply_action(seat, Action::RevealSlot(a))?;
        round.apply_action(seat, Action::RevealSlot(b))?;
    }
    Ok(())
}

#[test]
fn initial_setup_two_players() -> Result<(), RoundError> {
    let round = RoundBuilder::new(2)?.with_seed(11).build()?;
    assert_eq!(round.deck_len(), card::DECK_SIZE - 2 * 12 - 1);
    assert_eq!(round.discard_len(), 1);
    assert_eq!(round.card_count(), card::DECK_SIZE);
    assert_eq!(round.phase(), Phase::InitialReveal);
    assert_eq!(round.current_seat(), 0);

    let view = round.state_view(1)?;
    assert_eq!(view.seats.len(), 2);
    assert!(view.seats.iter().all(|seat| seat.hidden_slots().len() == 12));
    assert!(view.discard_top.is_some());
    assert_eq!(round.legal_actions(0)?, (0..12).map(Action::RevealSlot).collect::<Vec<_>>());
    Ok(())
}

#[test]
fn player_count_is_validated() {
    assert!(matches!(
        RoundBuilder::new(0),
        Err(RoundError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        RoundBuilder::new(5),
        Err(RoundError::InvalidConfiguration(_))
    ));
}

#[test]
fn injected_deck_with_out_of_range_value_is_rejected() {
    let mut hand = STEPS;
    hand[7] = 13;
    assert!(matches!(
        round_with(&[hand, STEPS], 0, &[]),
        Err(RoundError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        round_with(&[STEPS, STEPS], -3, &[]),
        Err(RoundError::InvalidConfiguration(_))
    ));
}

#[test]
fn injected_deck_is_dealt_in_slot_order() -> Result<(), RoundError> {
    let mut seat1 = [9; 12];
    seat1[0] = -2;
    let round = round_with(&[STEPS, seat1], 12, &[])?;
    let hand0 = round.hand(0).ok_or(RoundError::InvalidSeat(0))?;
    let values: Vec<i8> = hand0.iter().map(Card::value).collect();
    assert_eq!(values, STEPS.to_vec());
    assert_eq!(round.hand(1).map(|hand| hand.slots()[0].value()), Some(-2));
    assert_eq!(round.discard_top().map(Card::value), Some(12));
    assert_eq!(round.deck_len(), 0);
    Ok(())
}

#[test]
fn highest_revealed_pair_starts() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS, STEPS], 0, &[5, 5])?;
    // Seat 0 shows 1 + 2, seat 1 shows 11 + 10, seat 2 shows 0 + 3.
    reveal_pairs(&mut round, &[(1, 2), (11, 10), (0, 3)])?;
    assert_eq!(round.phase(), Phase::Turn);
    assert_eq!(round.starting_seat(), Some(1));
    assert_eq!(round.current_seat(), 1);
    assert_eq!(
        round.take_events(),
        vec![
            RoundEvent::StartingSeat {
                seat: 1,
                revealed_sum: 21
            },
            RoundEvent::PauseForDisplay(Duration::from_secs(5)),
        ]
    );
    assert!(round.take_events().is_empty());
    Ok(())
}

#[test]
fn starting_seat_tie_goes_to_lowest_seat() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], 0, &[])?;
    reveal_pairs(&mut round, &[(4, 5), (5, 4)])?;
    assert_eq!(round.starting_seat(), Some(0));
    Ok(())
}

#[test]
fn initial_reveal_only_accepts_reveals() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], 0, &[])?;
    let err = round.apply_action(0, Action::TakeDiscard).unwrap_err();
    assert!(matches!(
        err,
        RoundError::WrongPhase {
            phase: Phase::InitialReveal,
            action: Action::TakeDiscard
        }
    ));
    assert!(err.is_misuse());
    assert!(!err.is_recoverable());
    assert!(matches!(
        round.apply_action(0, Action::DrawFromDeck),
        Err(RoundError::WrongPhase { .. })
    ));
    assert_eq!(round.phase(), Phase::InitialReveal);
    round.apply_action(0, Action::RevealSlot(3))?;
    let err = round.apply_action(0, Action::RevealSlot(3)).unwrap_err();
    assert!(matches!(
        err,
        RoundError::InvalidAction(InvalidAction::AlreadyVisible(3))
    ));
    assert!(err.is_recoverable());
    // Still seat 0's second reveal.
    assert_eq!(round.current_seat(), 0);
    assert!(!round.legal_actions(0)?.contains(&Action::RevealSlot(3)));
    Ok(())
}

#[test]
fn out_of_turn_and_out_of_range_are_rejected() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], 0, &[])?;
    let err = round.apply_action(1, Action::RevealSlot(0)).unwrap_err();
    assert!(matches!(
        err,
        RoundError::NotSeatsTurn {
            seat: 1,
            current: 0
        }
    ));
    assert!(err.is_misuse());
    assert!(matches!(
        round.apply_action(7, Action::RevealSlot(0)),
        Err(RoundError::InvalidSeat(7))
    ));
    assert!(matches!(
        round.apply_action(0, Action::RevealSlot(12)),
        Err(RoundError::InvalidAction(InvalidAction::SlotIndex(12)))
    ));
    assert!(round.state_view(2).is_err());
    Ok(())
}

#[test]
fn views_hide_face_down_values() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], 0, &[])?;
    reveal_pairs(&mut round, &[(0, 5), (1, 2)])?;
    let view = round.state_view(1)?;
    let seat0 = &view.seats[0];
    assert_eq!(seat0.slots[0], SlotView::Visible(0));
    assert_eq!(seat0.slots[5], SlotView::Visible(5));
    assert_eq!(seat0.slots[6], SlotView::Hidden);
    assert_eq!(seat0.visible_score, 5);
    assert_eq!(view.me().visible_score, 3);
    Ok(())
}

#[test]
fn take_discard_and_swap() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], -2, &[])?;
    reveal_pairs(&mut round, &[(10, 11), (0, 1)])?;
    assert_eq!(round.current_seat(), 0);

    round.apply_action(0, Action::TakeDiscard)?;
    assert_eq!(round.step(), TurnStep::DiscardSelected);
    let legal = round.legal_actions(0)?;
    assert_eq!(legal, (0..12).map(Action::SwapIntoSlot).collect::<Vec<_>>());
    let err = round.apply_action(0, Action::RevealSlot(4)).unwrap_err();
    assert!(matches!(
        err,
        RoundError::InvalidAction(InvalidAction::OutOfSequence(_))
    ));

    round.apply_action(0, Action::SwapIntoSlot(7))?;
    let hand = round.hand(0).ok_or(RoundError::InvalidSeat(0))?;
    assert_eq!(hand.slots()[7].value(), -2);
    assert!(hand.slots()[7].is_visible());
    let top = round.discard_top().ok_or(RoundError::DeckEmpty)?;
    assert_eq!(top.value(), 7);
    assert!(top.is_visible());
    assert_eq!(round.discard_len(), 1);
    assert_eq!(round.current_seat(), 1);
    assert_eq!(round.step(), TurnStep::Start);
    Ok(())
}

#[test]
fn draw_then_take_or_reveal() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS], 12, &[3, 9])?;
    reveal_pairs(&mut round, &[(10, 11), (0, 1)])?;

    round.apply_action(0, Action::DrawFromDeck)?;
    assert_eq!(round.step(), TurnStep::Drawn);
    assert_eq!(round.discard_top().map(Card::value), Some(3));
    assert_eq!(round.discard_len(), 2);
    let legal = round.legal_actions(0)?;
    assert!(!legal.contains(&Action::DrawFromDeck));
    assert!(legal.contains(&Action::TakeDiscard));
    let err = round.apply_action(0, Action::DrawFromDeck).unwrap_err();
    assert!(matches!(
        err,
        RoundError::InvalidAction(InvalidAction::OutOfSequence(_))
    ));
    round.apply_action(0, Action::TakeDiscard)?;
    round.apply_action(0, Action::SwapIntoSlot(11))?;
    assert_eq!(round.discard_top().map(Card::value), Some(11));

    // Seat 1 draws the 9, keeps it off its grid and reveals instead.
    round.apply_action(1, Action::DrawFromDeck)?;
    round.apply_action(1, Action::RevealSlot(6))?;
    assert_eq!(round.discard_top().map(Card::value), Some(9));
    assert_eq!(round.deck_len(), 0);
    assert_eq!(round.current_seat(), 0);
    assert_eq!(round.card_count(), 2 * 12 + 3);
    Ok(())
}

#[test]
fn swap_requires_selected_discard() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS], 0, &[4])?;
    reveal_pairs(&mut round, &[(0, 1)])?;
    let err = round.apply_action(0, Action::SwapIntoSlot(2)).unwrap_err();
    assert!(matches!(
        err,
        RoundError::InvalidAction(InvalidAction::OutOfSequence(_))
    ));
    assert_eq!(round.step(), TurnStep::Start);
    Ok(())
}

#[test]
fn empty_deck_is_recoverable() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS], 6, &[])?;
    reveal_pairs(&mut round, &[(0, 1)])?;
    assert_eq!(round.deck_len(), 0);
    assert!(!round.legal_actions(0)?.contains(&Action::DrawFromDeck));
    let err = round.apply_action(0, Action::DrawFromDeck).unwrap_err();
    assert!(matches!(err, RoundError::DeckEmpty));
    assert!(err.is_recoverable());
    assert_eq!(round.step(), TurnStep::Start);
    round.apply_action(0, Action::RevealSlot(2))?;
    Ok(())
}

#[test]
fn completed_column_is_eliminated() -> Result<(), RoundError> {
    let mut triple = STEPS;
    triple[0] = 7;
    triple[4] = 7;
    triple[8] = 7;
    let mut round = round_with(&[triple, STEPS], 0, &[])?;
    reveal_pairs(&mut round, &[(0, 4), (1, 2)])?;
    round.take_events();
    assert_eq!(round.current_seat(), 0);

    round.apply_action(0, Action::RevealSlot(8))?;
    assert_eq!(
        round.take_events(),
        vec![RoundEvent::ColumnEliminated {
            seat: 0,
            column: 0,
            value: 7
        }]
    );
    let view = round.state_view(0)?;
    assert_eq!(view.me().slots[4], SlotView::Eliminated(7));
    assert_eq!(view.me().visible_score, 0);
    // Eliminated slots can no longer be swapped into.
    round.apply_action(1, Action::RevealSlot(3))?;
    round.apply_action(0, Action::TakeDiscard)?;
    let legal = round.legal_actions(0)?;
    assert!(!legal.contains(&Action::SwapIntoSlot(0)));
    assert!(matches!(
        round.apply_action(0, Action::SwapIntoSlot(8)),
        Err(RoundError::InvalidAction(InvalidAction::EliminatedSlot(8)))
    ));
    Ok(())
}

#[test]
fn everyone_else_gets_one_last_turn() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, STEPS, STEPS, STEPS], 4, &[])?;
    reveal_pairs(&mut round, &[(10, 11), (0, 1), (0, 1), (0, 1)])?;
    assert_eq!(round.current_seat(), 0);

    // Seat 0 reveals a card per turn; the others swap the discard into slot 0.
    for slot in 0..10 {
        round.apply_action(0, Action::RevealSlot(slot))?;
        if slot < 9 {
            assert_eq!(round.phase(), Phase::Turn);
            for seat in 1..4 {
                round.apply_action(seat, Action::TakeDiscard)?;
                round.apply_action(seat, Action::SwapIntoSlot(0))?;
            }
        }
    }
    assert_eq!(round.phase(), Phase::LastTurn);
    assert_eq!(round.first_to_finish(), Some(0));
    assert_eq!(round.last_turn_remaining(), 3);
    assert!(
        round
            .take_events()
            .contains(&RoundEvent::LastTurnStarted { seat: 0 })
    );

    for seat in 1..4 {
        assert!(!round.is_finished());
        assert_eq!(round.current_seat(), seat);
        round.apply_action(seat, Action::RevealSlot(5))?;
    }
    assert!(round.is_finished());
    assert_eq!(round.phase(), Phase::Scoring);
    let summary = round.summary().cloned().ok_or(RoundError::RoundOver)?;
    assert_eq!(summary.first_to_finish, Some(0));
    assert_eq!(summary.round_scores.len(), 4);
    assert_eq!(summary.round_scores[0], STEPS.iter().map(|&v| i32::from(v)).sum::<i32>());

    let events = round.take_events();
    assert_eq!(
        events.first(),
        Some(&RoundEvent::PauseForDisplay(Duration::from_secs(5)))
    );
    assert_eq!(events.last(), Some(&RoundEvent::RoundEnded(summary)));
    assert!(matches!(
        round.apply_action(0, Action::DrawFromDeck),
        Err(RoundError::RoundOver)
    ));
    assert!(round.legal_actions(0)?.is_empty());
    assert_eq!(round.card_count(), 4 * 12 + 1);
    Ok(())
}

#[test]
fn scoring_turns_every_card_face_up() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS, [1; 12]], 0, &[])?;
    reveal_pairs(&mut round, &[(10, 11), (0, 1)])?;
    for slot in 0..10 {
        round.apply_action(0, Action::RevealSlot(slot))?;
        if slot < 9 {
            round.apply_action(1, Action::TakeDiscard)?;
            round.apply_action(1, Action::SwapIntoSlot(2))?;
        }
    }
    // Seat 1 plays its last turn; its face-down cards still count at scoring.
    round.apply_action(1, Action::RevealSlot(3))?;
    let summary = round.summary().ok_or(RoundError::RoundOver)?;
    let hand1 = round.hand(1).ok_or(RoundError::InvalidSeat(1))?;
    assert!(hand1.iter().all(Card::is_visible));
    assert_eq!(summary.round_scores[1], hand1.score());
    Ok(())
}

#[test]
fn single_seat_round_ends_when_grid_is_revealed() -> Result<(), RoundError> {
    let mut round = round_with(&[STEPS], 0, &[])?;
    reveal_pairs(&mut round, &[(0, 1)])?;
    for slot in 2..12 {
        assert!(!round.is_finished());
        round.apply_action(0, Action::RevealSlot(slot))?;
    }
    assert!(round.is_finished());
    let summary = round.summary().ok_or(RoundError::RoundOver)?;
    assert_eq!(summary.round_scores, vec![66]);
    assert_eq!(summary.first_to_finish, Some(0));
    Ok(())
}
