use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bot::{Bot, Difficulty};
use crate::bots::{HumanBot, RandomBot, bot_for};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Seed used for seat `index` when the spec does not carry its own.
fn seat_seed(seed: u64, index: usize) -> u64 {
    seed ^ ((index as u64 + 1) * 0x9E37_79B9)
}

fn spec_seed(spec: &str, seed: u64, index: usize) -> u64 {
    spec.split_once(':')
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
        .unwrap_or_else(|| seat_seed(seed, index))
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - easy[:seed]
/// - medium[:seed]
/// - hard[:seed]
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let label = label_for_spec(spec);
    match label.as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => Ok(Box::new(RandomBot::new(StdRng::seed_from_u64(spec_seed(
            spec, seed, index,
        ))))),
        other => {
            let difficulty: Difficulty = other
                .parse()
                .map_err(|_| format!("unrecognized bot spec: {spec}"))?;
            Ok(bot_for(difficulty, spec_seed(spec, seed, index)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_drop_the_argument() {
        assert_eq!(label_for_spec("Medium:42"), "medium");
        assert_eq!(label_for_spec(" human:Ada"), "human");
    }

    #[test]
    fn known_specs_build_and_unknown_fail() {
        for spec in ["easy", "medium:7", "hard", "random:3"] {
            let bot = create_bot_from_spec(spec, 0, 1).expect("known spec");
            assert!(!bot.is_interactive());
        }
        assert!(create_bot_from_spec("human:Ada", 0, 1)
            .expect("human spec")
            .is_interactive());
        assert!(create_bot_from_spec("expert", 0, 1).is_err());
    }
}
