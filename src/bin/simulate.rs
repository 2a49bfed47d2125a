use std::error::Error;
use std::process;
use std::thread;

use clap::{ArgAction, Parser};

use skyjo::{
    Bot, Difficulty, MatchController, MatchStartConfig, RoundEngine, RoundError, RoundEvent,
    describe_action, init_logging, render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play a Skyjo match in the terminal.")]
struct Args {
    /// Number of human seats; they take the first seats
    #[arg(long = "humans", default_value_t = 1)]
    humans: usize,

    /// Bot difficulty for each remaining seat (repeatable: --bot easy --bot hard)
    #[arg(short = 'b', long = "bot", default_values_t = [Difficulty::Medium, Difficulty::Hard])]
    bots: Vec<Difficulty>,

    /// Seat names, in seat order
    #[arg(short = 'n', long = "name")]
    names: Vec<String>,

    /// Seed for shuffling and bot RNGs
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Show the round state and bot actions each step
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Honour display pauses when a human is seated
    #[arg(long = "pause", action = ArgAction::SetTrue)]
    pause: bool,

    /// Stop after this many rounds even if nobody reached the end score
    #[arg(long = "max-rounds")]
    max_rounds: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = MatchStartConfig {
        player_count: args.humans + args.bots.len(),
        player_names: args.names.clone(),
        bot_difficulties: args.bots.clone(),
        seed: args.seed,
    };
    let mut controller = MatchController::new(config)?;
    let mut seats = controller.build_seats();
    let honour_pauses = args.pause && seats.iter().any(|seat| seat.is_interactive());
    let names: Vec<String> = (0..controller.config().player_count)
        .map(|seat| controller.config().name_of(seat))
        .collect();

    println!(
        "Starting Skyjo match with {} seats: {}\n",
        names.len(),
        names.join(", ")
    );

    while !controller.is_over() {
        if let Some(limit) = args.max_rounds {
            if controller.state().rounds_played() >= limit {
                println!("Max round limit {limit} reached. Stopping match.");
                break;
            }
        }
        let round_number = controller.state().rounds_played() + 1;
        println!("--- Round {round_number} ---");
        let mut round = controller.start_round()?;
        play_visible_round(&mut round, &mut seats, &names, args.visualize, honour_pauses)?;
        let summary = round
            .summary()
            .cloned()
            .ok_or(RoundError::InvalidConfiguration("round ended without a summary"))?;
        let record = controller.close_round(&summary)?;
        for (seat, name) in names.iter().enumerate() {
            let penalty = if record.raw_scores[seat] != record.adjusted_scores[seat] {
                " (doubled)"
            } else {
                ""
            };
            println!(
                "  {name:<16} round {:>4}{penalty}  total {:>4}",
                record.adjusted_scores[seat],
                controller.totals()[seat]
            );
        }
        println!();
    }

    match controller.outcome() {
        Some(outcome) => println!(
            "Match finished. Winner: {} with {} points.",
            names[outcome.winner], outcome.total_scores[outcome.winner]
        ),
        None => println!("Match stopped before completion."),
    }
    Ok(())
}

/// Same loop as `play_round`, with per-step rendering for the terminal.
fn play_visible_round(
    round: &mut RoundEngine,
    seats: &mut [Box<dyn Bot>],
    names: &[String],
    visualize: bool,
    honour_pauses: bool,
) -> Result<(), RoundError> {
    loop {
        for event in round.take_events() {
            report_event(&event, names, honour_pauses);
        }
        if round.is_finished() {
            return Ok(());
        }
        let seat = round.current_seat();
        let state = round.state_view(seat)?;
        let legal_actions = round.legal_actions(seat)?;
        if legal_actions.is_empty() {
            return Err(RoundError::InvalidConfiguration(
                "no legal actions available for current seat",
            ));
        }
        let interactive = seats[seat].is_interactive();
        if visualize && !interactive {
            println!("{}", render_state(&state));
        }
        let action = seats[seat].select_action(&state, &legal_actions);
        if visualize && !interactive {
            println!("{}: {}\n", names[seat], describe_action(&state, &action));
        }
        round.apply_action(seat, action)?;
    }
}

fn report_event(event: &RoundEvent, names: &[String], honour_pauses: bool) {
    match event {
        RoundEvent::StartingSeat { seat, revealed_sum } => {
            println!("{} starts with {revealed_sum} showing.", names[*seat]);
        }
        RoundEvent::PauseForDisplay(duration) => {
            if honour_pauses {
                thread::sleep(*duration);
            }
        }
        RoundEvent::ColumnEliminated {
            seat,
            column,
            value,
        } => {
            println!(
                "{} clears column {column} (three {value}s).",
                names[*seat]
            );
        }
        RoundEvent::LastTurnStarted { seat } => {
            println!("{} revealed every card. Last turn for everyone else!", names[*seat]);
        }
        RoundEvent::RoundEnded(summary) => {
            println!("Round over. Scores before penalty: {:?}", summary.round_scores);
        }
    }
}
