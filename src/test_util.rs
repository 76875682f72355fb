// Test utilities shared by unit tests and the integration tests in the "tests" folder.

use rand::{Rng, SeedableRng};

use crate::error::DartsError;
use crate::game::X01Game;
use crate::match_play::Match;
use crate::once_cell_regex;
use crate::turn::Outcome;


// Random tests verify properties that should always hold, but let's fix the seed to avoid
// sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

pub fn sample_player_names() -> Vec<String> {
    vec!["Alice".to_owned(), "Bob".to_owned()]
}

// Throws darts from a whitespace-separated log, e.g. "T20 T20 D20". Stops at the first
// invalid token.
pub fn replay_throws(game: &mut X01Game, log: &str) -> Result<Vec<Outcome>, DartsError> {
    log.split_whitespace().map(|token| game.throw(token, None)).collect()
}

// Like `replay_throws`, but for a whole match. A log word may be prefixed with the player
// number, e.g. "1:T20 1:T20 1:T20 2:S1", in which case it is checked that the dart is thrown
// by that player (one-based).
pub fn replay_match_throws(game: &mut Match, log: &str) -> Result<Vec<Outcome>, DartsError> {
    let word_re = once_cell_regex!(r"^(?:([0-9]+):)?(.+)$");
    let mut outcomes = Vec::new();
    for word in log.split_whitespace() {
        let caps = word_re.captures(word).unwrap();
        if let Some(player) = caps.get(1) {
            let player: usize = player.as_str().parse().unwrap();
            assert_eq!(game.current_player_index() + 1, player, "unexpected thrower for {}", word);
        }
        outcomes.push(game.throw(caps.get(2).unwrap().as_str(), None)?);
    }
    Ok(outcomes)
}
