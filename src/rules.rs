use serde::{Deserialize, Serialize};

use crate::error::DartsError;


pub const DEFAULT_START_SCORE: u32 = 501;
pub const DEFAULT_PRACTICE_DARTS: usize = 99;


// In config files: `{ type: x01, start_score: 301 }` or `{ type: practice }`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameMode {
    X01 {
        #[serde(default = "default_start_score")]
        start_score: u32,
    },
    Practice {
        #[serde(default = "default_practice_darts")]
        max_darts: usize,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MatchRules {
    #[serde(default)]
    pub game_mode: GameMode,
    #[serde(default = "default_best_of")]
    pub best_of: u32,
}

fn default_start_score() -> u32 { DEFAULT_START_SCORE }
fn default_practice_darts() -> usize { DEFAULT_PRACTICE_DARTS }
fn default_best_of() -> u32 { 1 }

impl Default for GameMode {
    fn default() -> Self { GameMode::X01 { start_score: DEFAULT_START_SCORE } }
}

impl Default for MatchRules {
    fn default() -> Self {
        MatchRules { game_mode: GameMode::default(), best_of: default_best_of() }
    }
}

impl MatchRules {
    pub fn x01(start_score: u32) -> Self {
        MatchRules { game_mode: GameMode::X01 { start_score }, ..MatchRules::default() }
    }

    pub fn practice(max_darts: usize) -> Self {
        MatchRules { game_mode: GameMode::Practice { max_darts }, ..MatchRules::default() }
    }

    // Legs needed to take the match.
    pub fn legs_to_win(&self) -> u32 { self.best_of / 2 + 1 }

    pub fn verify(&self) -> Result<(), DartsError> {
        match self.game_mode {
            GameMode::X01 { start_score } if start_score < 2 => {
                return Err(DartsError::InvalidMatch(format!(
                    "cannot finish from start score {}",
                    start_score
                )));
            }
            GameMode::Practice { max_darts: 0 } => {
                return Err(DartsError::InvalidMatch("practice needs at least one dart".to_owned()));
            }
            _ => {}
        }
        if self.best_of == 0 {
            return Err(DartsError::InvalidMatch("best_of must be positive".to_owned()));
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legs_to_win() {
        assert_eq!(MatchRules { best_of: 1, ..MatchRules::default() }.legs_to_win(), 1);
        assert_eq!(MatchRules { best_of: 3, ..MatchRules::default() }.legs_to_win(), 2);
        assert_eq!(MatchRules { best_of: 4, ..MatchRules::default() }.legs_to_win(), 3);
        assert_eq!(MatchRules { best_of: 5, ..MatchRules::default() }.legs_to_win(), 3);
    }

    #[test]
    fn verify() {
        assert!(MatchRules::default().verify().is_ok());
        assert!(MatchRules::x01(1).verify().is_err());
        assert!(MatchRules::practice(0).verify().is_err());
        assert!(MatchRules { best_of: 0, ..MatchRules::x01(301) }.verify().is_err());
    }
}
