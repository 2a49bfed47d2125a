use std::io::{self, BufRead, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::state::RoundView;
use crate::visualize::{describe_action, render_state};

/// Interactive seat that queries a person via standard input.
pub struct HumanBot {
    name: String,
}

/// Outcome of one prompt.
#[derive(Debug, PartialEq, Eq)]
enum Reply {
    Chosen(Action),
    Quit,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Asks on `output` until `input` names a legal action. Closed input quits.
    fn prompt<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
        state: &RoundView,
        legal_actions: &[Action],
    ) -> io::Result<Reply> {
        loop {
            writeln!(output, "\n=== {}'s turn (seat {}) ===", self.name, state.self_seat)?;
            writeln!(output, "{}", render_state(state))?;
            writeln!(output, "Available actions:")?;
            for (index, action) in legal_actions.iter().enumerate() {
                writeln!(output, "  [{index}] {}", describe_action(state, action))?;
            }
            writeln!(output, "Type the action index, 'help' or 'q' to quit.")?;
            write!(output, "Selection: ")?;
            output.flush()?;

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(output, "\nInput closed. Exiting match.")?;
                    return Ok(Reply::Quit);
                }
                Ok(_) => {}
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
                writeln!(output, "Exiting match at user's request.")?;
                return Ok(Reply::Quit);
            }
            if trimmed.eq_ignore_ascii_case("help") {
                writeln!(output, "Enter the number listed next to the action to play.")?;
                writeln!(
                    output,
                    "Slots are numbered row by row: 0-3 on top, 4-7 in the middle, 8-11 below."
                )?;
                writeln!(output, "'??' is face down, 'xx' is an eliminated column.")?;
                continue;
            }
            let Ok(choice) = trimmed.parse::<usize>() else {
                writeln!(output, "Invalid input: '{trimmed}'. Please enter a number.")?;
                continue;
            };
            match legal_actions.get(choice).copied() {
                Some(action) => {
                    writeln!(output, "You selected: {}", describe_action(state, &action))?;
                    return Ok(Reply::Chosen(action));
                }
                None => writeln!(output, "Index out of range. Please choose a valid option.")?,
            }
        }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

impl Bot for HumanBot {
    fn select_action(&mut self, state: &RoundView, legal_actions: &[Action]) -> Action {
        assert!(
            !legal_actions.is_empty(),
            "at least one legal action must exist"
        );
        let stdin = io::stdin();
        let stdout = io::stdout();
        match self.prompt(&mut stdin.lock(), &mut stdout.lock(), state, legal_actions) {
            Ok(Reply::Chosen(action)) => action,
            Ok(Reply::Quit) => std::process::exit(0),
            Err(err) => {
                eprintln!("terminal unavailable: {err}");
                std::process::exit(1);
            }
        }
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
