use std::fmt::Write;

use crate::action::Action;
use crate::card::{COLUMNS, ROWS};
use crate::state::{Phase, RoundView, SeatView, SlotView, TurnStep};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_opponent_grids: bool,
    pub show_slot_indices: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_opponent_grids: true,
            show_slot_indices: true,
        }
    }
}

/// Fine tune textual action descriptions.
#[derive(Clone, Copy, Debug)]
pub struct DescribeOptions {
    pub include_card_details: bool,
}

impl Default for DescribeOptions {
    fn default() -> Self {
        Self {
            include_card_details: true,
        }
    }
}

pub fn render_state(state: &RoundView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &RoundView, options: VisualOptions) -> String {
    let mut out = String::new();
    let phase = match state.phase {
        Phase::InitialReveal => String::from("Initial reveal"),
        Phase::Turn => String::from("Turn"),
        Phase::LastTurn => format!("Last turn ({} left)", state.last_turn_remaining),
        Phase::Scoring => String::from("Scoring"),
    };
    let _ = writeln!(out, "Phase: {phase}");
    let _ = writeln!(
        out,
        "Current seat: {}{}",
        state.current_seat,
        if state.current_seat == state.self_seat {
            " (You)"
        } else {
            ""
        }
    );
    let discard = state
        .discard_top
        .map(format_value)
        .unwrap_or_else(|| String::from("--"));
    let _ = writeln!(
        out,
        "Deck: {}  |  Discard: {} ({} cards)",
        state.deck_count, discard, state.discard_count
    );
    if state.step == TurnStep::DiscardSelected {
        let _ = writeln!(out, "Discard card selected, choose a slot to swap.");
    }
    for seat in &state.seats {
        let is_self = seat.id == state.self_seat;
        if !is_self && !options.show_opponent_grids {
            continue;
        }
        let mut tags = String::new();
        if is_self {
            tags.push_str(" (You)");
        }
        if seat.is_current {
            tags.push_str(" <- current");
        }
        if seat.finished_first {
            tags.push_str(" [finished first]");
        }
        let _ = writeln!(
            out,
            "Seat {}{} - visible score {}",
            seat.id, tags, seat.visible_score
        );
        render_grid(&mut out, seat, options.show_slot_indices && is_self);
    }
    out
}

fn render_grid(out: &mut String, seat: &SeatView, indices: bool) {
    for row in 0..ROWS {
        let cells: Vec<String> = (0..COLUMNS)
            .map(|column| {
                let slot = row * COLUMNS + column;
                let cell = format_slot(seat.slots[slot]);
                if indices {
                    format!("{slot:>2}:{cell}")
                } else {
                    cell
                }
            })
            .collect();
        let _ = writeln!(out, "    {}", cells.join("  "));
    }
}

pub fn describe_action(state: &RoundView, action: &Action) -> String {
    describe_action_with_options(state, action, DescribeOptions::default())
}

pub fn describe_action_with_options(
    state: &RoundView,
    action: &Action,
    options: DescribeOptions,
) -> String {
    let slot_desc = |slot: usize| {
        let cell = state.me().slots.get(slot).copied();
        match cell {
            Some(cell) if options.include_card_details => {
                format!("slot {slot} ({})", format_slot(cell).trim())
            }
            _ => format!("slot {slot}"),
        }
    };
    let top = state
        .discard_top
        .map(format_value)
        .unwrap_or_else(|| String::from("--"));
    match action {
        Action::DrawFromDeck => String::from("Draw from the deck"),
        Action::TakeDiscard => {
            if options.include_card_details {
                format!("Take the discard card {}", top.trim())
            } else {
                String::from("Take the discard card")
            }
        }
        Action::SwapIntoSlot(slot) => {
            if options.include_card_details {
                format!("Swap {} into {}", top.trim(), slot_desc(*slot))
            } else {
                format!("Swap into {}", slot_desc(*slot))
            }
        }
        Action::RevealSlot(slot) => format!("Reveal {}", slot_desc(*slot)),
    }
}

fn format_slot(slot: SlotView) -> String {
    match slot {
        SlotView::Hidden => String::from("??"),
        SlotView::Visible(value) => format_value(value),
        SlotView::Eliminated(_) => String::from("xx"),
    }
}

fn format_value(value: i8) -> String {
    format!("{value:>2}")
}
