// Session snapshots: the only data that leaves the scorer. Field names are part of the
// exported format and must stay stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};


#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TurnDartSnapshot {
    pub input: String,
    pub score: u32,
    pub is_double: bool,
}

impl TurnDartSnapshot {
    pub fn placeholder(input: &str) -> Self {
        TurnDartSnapshot { input: input.to_owned(), score: 0, is_double: false }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct X01Snapshot {
    pub player: String,
    pub start_score: u32,
    pub turns: Vec<Vec<TurnDartSnapshot>>,
    pub checkout_attempts: u32,
    pub checkouts_hit: u32,
    pub average: f64,
    pub highest_score: u32,
    pub total_darts_thrown: usize,
    pub is_winner: bool,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PracticeSnapshot {
    pub player: String,
    pub game_type: String,
    pub score: u32,
    pub stats: BTreeMap<String, u32>,
    pub stats_percentages: BTreeMap<String, f64>,
    pub total_darts_thrown: usize,
    pub average: f64,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionSnapshot {
    X01(X01Snapshot),
    Practice(PracticeSnapshot),
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub players: Vec<SessionSnapshot>,
    pub current_player_index: usize,
    pub best_of: u32,
    pub starting_player_index: usize,
}

impl MatchSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> { serde_json::to_string_pretty(self) }
}
