use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::{ArgAction, Parser, ValueEnum};
use plotters::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use skyjo::{
    Action, Bot, MatchController, MatchStartConfig, RoundView, init_logging, mix_seed, play_round,
};
use skyjo::{create_bot_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

/// Output format for the generated chart. Currently only PNG is supported.
#[derive(Clone, Debug, ValueEnum)]
enum ChartFormat {
    Png,
}

impl ChartFormat {
    fn from_path(path: &PathBuf) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
        {
            Some(ext) if ext == "png" => Some(Self::Png),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run many bot-only matches and plot per-bot win rates."
)]
struct Args {
    /// Number of matches to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output chart file (png)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Explicit output format (inferred from --out when omitted)
    #[arg(long = "format", value_enum)]
    format: Option<ChartFormat>,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on rounds per match; longer matches are aborted (not counted as a win)
    #[arg(long = "max-rounds", default_value_t = 50)]
    max_rounds: usize,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Seat bot specs: e.g., easy medium hard random (1-4 total)
    bots: Vec<String>,
}

/// Per-label tallies across all matches.
#[derive(Default)]
struct LabelStats {
    seats: usize,
    wins: usize,
    rounds: usize,
    round_points: i64,
    decisions: usize,
    decision_time: Duration,
}

/// Wraps a seat's bot to account the time spent choosing actions.
struct TimedBot {
    inner: Box<dyn Bot>,
    decisions: usize,
    elapsed: Duration,
}

impl TimedBot {
    fn new(inner: Box<dyn Bot>) -> Self {
        Self {
            inner,
            decisions: 0,
            elapsed: Duration::ZERO,
        }
    }
}

impl Bot for TimedBot {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        let t0 = Instant::now();
        let action = self.inner.select_action(state, legal_actions);
        self.elapsed += t0.elapsed();
        self.decisions += 1;
        action
    }

    fn is_interactive(&self) -> bool {
        self.inner.is_interactive()
    }
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
    if args.bots.is_empty() || args.bots.len() > 4 {
        return Err(format!(
            "expected between 1 and 4 bot specs (e.g., easy hard), received {}",
            args.bots.len()
        )
        .into());
    }
    // Disallow human in batch sims; it would block waiting for input.
    if args
        .bots
        .iter()
        .any(|s| label_for_spec(s) == "human")
    {
        return Err("human players are not supported in winrate runs".into());
    }

    let base_seed = args.seed;
    let players_per_game = args.bots.len();
    let labels_for_spec: Vec<String> = args.bots.iter().map(|s| label_for_spec(s)).collect();
    let mut stats: HashMap<String, LabelStats> = HashMap::new();
    let mut aborted_games: usize = 0;

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        let mut seat_rng = StdRng::seed_from_u64(base_seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let mut seats: Vec<TimedBot> = Vec::with_capacity(players_per_game);
        let mut labels: Vec<String> = Vec::with_capacity(players_per_game);
        for (seat, src_idx) in indices.iter().enumerate() {
            let bot_seed = mix_seed(base_seed, game_idx as u64, seat as u64);
            seats.push(TimedBot::new(create_bot_from_spec(
                &args.bots[*src_idx],
                seat,
                bot_seed,
            )?));
            labels.push(labels_for_spec[*src_idx].clone());
        }

        let config = MatchStartConfig {
            player_count: players_per_game,
            player_names: labels.clone(),
            bot_difficulties: Vec::new(),
            seed: mix_seed(base_seed, game_idx as u64, 0x5EED_15),
        };
        let mut controller = MatchController::new(config)?;
        while !controller.is_over() && controller.state().rounds_played() < args.max_rounds {
            let mut round = controller.start_round()?;
            let summary = play_round(&mut round, &mut seats, |_| {})?;
            controller.close_round(&summary)?;
        }

        for (seat, label) in labels.iter().enumerate() {
            let entry = stats.entry(label.clone()).or_default();
            entry.seats += 1;
            for round in &controller.state().round_scores {
                entry.rounds += 1;
                entry.round_points += i64::from(round[seat]);
            }
        }
        match controller.outcome() {
            Some(outcome) => {
                stats.entry(labels[outcome.winner].clone()).or_default().wins += 1;
            }
            None => aborted_games += 1,
        }
        for (bot, label) in seats.iter().zip(&labels) {
            let entry = stats.entry(label.clone()).or_default();
            entry.decisions += bot.decisions;
            entry.decision_time += bot.elapsed;
        }
    }

    // Compute per-seat win probability per label.
    let mut results: Vec<(String, f64, usize, usize)> = stats
        .iter()
        .map(|(label, s)| {
            let rate = if s.seats > 0 {
                s.wins as f64 / s.seats as f64
            } else {
                0.0
            };
            (label.clone(), rate, s.wins, s.seats)
        })
        .collect();

    // Sort by rate desc, then by label.
    results.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    println!("Win rates (per-seat) with round scores:");
    for (label, rate, wins, seats) in &results {
        let Some(s) = stats.get(label) else {
            continue;
        };
        let avg_round = if s.rounds > 0 {
            s.round_points as f64 / s.rounds as f64
        } else {
            0.0
        };
        println!(
            "  {label:<12}  {wins}/{seats}  ({:.2}%)   avg round score: {:>6.2}",
            rate * 100.0,
            avg_round
        );
    }
    if aborted_games > 0 {
        println!("\nNote: {aborted_games} match(es) hit the round cap without a winner.");
    }

    if !args.no_chart {
        let format = args
            .format
            .or_else(|| ChartFormat::from_path(&args.out))
            .unwrap_or(ChartFormat::Png);
        if !matches!(format, ChartFormat::Png) {
            return Err("only PNG output is supported currently; use --out with .png".into());
        }
        render_bar_chart(&args.out, &results)?;
        println!("\nChart written to {}", args.out.display());
    }

    println!("\nDecision time (per bot label):");
    for (label, _rate, _wins, _seats) in &results {
        let Some(s) = stats.get(label) else {
            continue;
        };
        let total_ms = s.decision_time.as_secs_f64() * 1.0e3;
        let avg_ms = if s.decisions > 0 {
            total_ms / (s.decisions as f64)
        } else {
            0.0
        };
        println!(
            "  {label:<12}  decisions: {:<7}  total: {total_ms:.3} ms  avg: {avg_ms:.3} ms",
            s.decisions
        );
    }

    Ok(())
}

fn render_bar_chart(
    out: &PathBuf,
    data: &[(String, f64, usize, usize)],
) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|(l, _, _, _)| l.clone()).collect();
    let values: Vec<f64> = data.iter().map(|(_, r, _, _)| r * 100.0).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max).min(100.0);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Skyjo Bot Win Rates (per-seat)",
            ("sans-serif", 28).into_font(),
        )
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(0..labels.len(), 0.0f64..max_value.max(10.0))
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot type")
        .x_labels(labels.len())
        .x_label_formatter(&|idx| {
            if *idx < labels.len() {
                labels[*idx].clone()
            } else {
                idx.to_string()
            }
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    for (i, value) in values.iter().enumerate() {
        let rect = Rectangle::new([(i, 0.0), (i, *value)], BLUE.filled());
        chart
            .draw_series(std::iter::once(rect))
            .map_err(|e| format!("{e}"))?;
    }

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
