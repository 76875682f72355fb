use std::mem;

use enum_map::{Enum, EnumMap};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::board::Target;
use crate::coord::Point;
use crate::dart::{DartThrow, Multiplier, parse_dart};
use crate::error::DartsError;
use crate::export::PracticeSnapshot;
use crate::game::MAX_TURN_SCORE;
use crate::turn::{Outcome, Turn, TurnEntry};
use crate::util::{percentage, three_dart_average};


pub const PRACTICE_GAME_TYPE: &str = "practice_20";
pub const PRACTICE_SEGMENT: u8 = 20;


// Where practice darts land: the target (single and treble 20) and its neighbourhood.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Enum, EnumIter, Serialize, Deserialize)]
pub enum PracticeStat {
    Single20,
    Treble20,
    Five,
    One,
    Twelve,
    Eighteen,
}

impl PracticeStat {
    pub fn label(self) -> &'static str {
        match self {
            PracticeStat::Single20 => "20",
            PracticeStat::Treble20 => "T20",
            PracticeStat::Five => "5",
            PracticeStat::One => "1",
            PracticeStat::Twelve => "12",
            PracticeStat::Eighteen => "18",
        }
    }

    // Neighbouring segments are counted with any multiplier; double 20 is not tracked.
    pub fn for_dart(dart: &DartThrow) -> Option<Self> {
        let Target::Segment(multiplier, segment) = Target::from_token(&dart.raw_token)? else {
            return None;
        };
        match (multiplier, segment) {
            (Multiplier::Single, 20) => Some(PracticeStat::Single20),
            (Multiplier::Treble, 20) => Some(PracticeStat::Treble20),
            (_, 5) => Some(PracticeStat::Five),
            (_, 1) => Some(PracticeStat::One),
            (_, 12) => Some(PracticeStat::Twelve),
            (_, 18) => Some(PracticeStat::Eighteen),
            _ => None,
        }
    }
}

// Practice darts score only when they hit the 20 segment.
fn practice_points(dart: &DartThrow) -> u32 {
    match Target::from_token(&dart.raw_token) {
        Some(Target::Segment(_, PRACTICE_SEGMENT)) => dart.value,
        _ => 0,
    }
}


// Aim-at-20 drill: the score counts up and the session ends after a fixed number of darts.
#[derive(Clone, Debug)]
pub struct PracticeGame {
    name: String,
    max_darts: usize,
    score: u32,
    turns: Vec<Turn>,
    current_turn: Turn,
    stats: EnumMap<PracticeStat, u32>,
    legs_won: u32,
}

impl PracticeGame {
    pub fn new(name: impl Into<String>, max_darts: usize) -> Self {
        PracticeGame {
            name: name.into(),
            max_darts,
            score: 0,
            turns: Vec::new(),
            current_turn: Turn::new(),
            stats: EnumMap::default(),
            legs_won: 0,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn max_darts(&self) -> usize { self.max_darts }
    pub fn score(&self) -> u32 { self.score }
    pub fn turns(&self) -> &[Turn] { &self.turns }
    pub fn current_turn(&self) -> &Turn { &self.current_turn }
    pub fn stats(&self) -> &EnumMap<PracticeStat, u32> { &self.stats }
    pub fn legs_won(&self) -> u32 { self.legs_won }
    pub fn is_finished(&self) -> bool { self.total_darts_thrown() >= self.max_darts }

    pub fn credit_leg(&mut self) { self.legs_won += 1; }
    pub fn revoke_leg(&mut self) { self.legs_won = self.legs_won.saturating_sub(1); }

    pub fn throw(&mut self, token: &str, coords: Option<Point>) -> Result<Outcome, DartsError> {
        if self.is_finished() {
            return Err(DartsError::LegFinished);
        }
        let dart = parse_dart(token)?;
        debug!("{} practice: {}", self.name, dart);
        self.score += practice_points(&dart);
        if let Some(stat) = PracticeStat::for_dart(&dart) {
            self.stats[stat] += 1;
        }
        self.current_turn.push(TurnEntry::Dart { dart, coords, checkout_attempt: false });

        if self.is_finished() {
            info!("{} finished practice with {} points", self.name, self.score);
            self.close_turn();
            return Ok(Outcome::Win);
        }
        if self.current_turn.is_full() {
            let is_180 = self.current_turn.total() == MAX_TURN_SCORE;
            self.close_turn();
            return Ok(Outcome::TurnOver { is_180 });
        }
        Ok(Outcome::Ok)
    }

    fn close_turn(&mut self) {
        self.turns.push(mem::take(&mut self.current_turn));
    }

    pub fn end_turn(&mut self) {
        if !self.current_turn.is_empty() {
            self.close_turn();
        }
    }

    fn revert_entry(&mut self, entry: &TurnEntry) {
        let Some(dart) = entry.dart() else {
            return;
        };
        self.score -= practice_points(dart);
        if let Some(stat) = PracticeStat::for_dart(dart) {
            self.stats[stat] -= 1;
        }
    }

    pub fn undo_last_dart(&mut self) {
        if let Some(entry) = self.current_turn.pop() {
            self.revert_entry(&entry);
            return;
        }
        let Some(mut turn) = self.turns.pop() else {
            return;
        };
        if let Some(entry) = turn.pop() {
            self.revert_entry(&entry);
        }
        self.current_turn = turn;
    }

    pub fn undo_last_turn(&mut self) {
        let Some(mut turn) = self.turns.pop() else {
            return;
        };
        while let Some(entry) = turn.pop() {
            self.revert_entry(&entry);
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.turns.clear();
        self.current_turn = Turn::new();
        self.stats = EnumMap::default();
    }

    pub fn turn_score(&self) -> u32 { self.current_turn.darts().map(practice_points).sum() }

    pub fn total_darts_thrown(&self) -> usize {
        self.turns.iter().map(Turn::len).sum::<usize>() + self.current_turn.len()
    }

    pub fn average(&self) -> f64 { three_dart_average(self.score, self.total_darts_thrown()) }

    pub fn stat_percentage(&self, stat: PracticeStat) -> f64 {
        percentage(self.stats[stat], self.total_darts_thrown() as u32)
    }

    pub fn export_session(&self) -> PracticeSnapshot {
        PracticeSnapshot {
            player: self.name.clone(),
            game_type: PRACTICE_GAME_TYPE.to_owned(),
            score: self.score,
            stats: PracticeStat::iter().map(|s| (s.label().to_owned(), self.stats[s])).collect(),
            stats_percentages: PracticeStat::iter()
                .map(|s| (s.label().to_owned(), self.stat_percentage(s)))
                .collect(),
            total_darts_thrown: self.total_darts_thrown(),
            average: self.average(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn stat_of(token: &str) -> Option<PracticeStat> {
        PracticeStat::for_dart(&parse_dart(token).unwrap())
    }

    #[test]
    fn stat_classification() {
        assert_eq!(stat_of("20"), Some(PracticeStat::Single20));
        assert_eq!(stat_of("S20"), Some(PracticeStat::Single20));
        assert_eq!(stat_of("T20"), Some(PracticeStat::Treble20));
        assert_eq!(stat_of("D20"), None);
        assert_eq!(stat_of("D5"), Some(PracticeStat::Five));
        assert_eq!(stat_of("15"), None);
        assert_eq!(stat_of("25"), None);
        assert_eq!(stat_of("T1"), Some(PracticeStat::One));
        assert_eq!(stat_of("12"), Some(PracticeStat::Twelve));
        assert_eq!(stat_of("t18"), Some(PracticeStat::Eighteen));
        assert_eq!(stat_of("MISS"), None);
    }

    #[test]
    fn only_twenties_score() {
        let mut game = PracticeGame::new("Bob", 99);
        assert_eq!(game.throw("T20", None), Ok(Outcome::Ok));
        assert_eq!(game.throw("5", None), Ok(Outcome::Ok));
        assert_eq!(game.throw("D20", None), Ok(Outcome::TurnOver { is_180: false }));
        assert_eq!(game.score(), 100);
        assert_eq!(game.stats()[PracticeStat::Treble20], 1);
        assert_eq!(game.stats()[PracticeStat::Five], 1);
        assert!((game.average() - 100.0).abs() < 1e-9);
        assert!((game.stat_percentage(PracticeStat::Five) - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn session_ends_after_max_darts() {
        let mut game = PracticeGame::new("Bob", 2);
        assert_eq!(game.throw("1", None), Ok(Outcome::Ok));
        assert_eq!(game.throw("20", None), Ok(Outcome::Win));
        assert_eq!(game.throw("20", None), Err(DartsError::LegFinished));
        game.undo_last_dart();
        assert_eq!(game.score(), 0);
        assert_eq!(game.current_turn().len(), 1);
        assert_eq!(game.throw("T20", None), Ok(Outcome::Win));
        assert_eq!(game.score(), 60);
    }

    #[test]
    fn undo_restores_stats() {
        let mut game = PracticeGame::new("Bob", 99);
        for token in ["T20", "T20", "T20", "12"] {
            game.throw(token, None).unwrap();
        }
        game.undo_last_turn();
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats()[PracticeStat::Treble20], 0);
        assert_eq!(game.stats()[PracticeStat::Twelve], 1);
        game.undo_last_dart();
        assert_eq!(game.stats()[PracticeStat::Twelve], 0);
        assert_eq!(game.total_darts_thrown(), 0);
    }

    #[test]
    fn export_lists_every_stat() {
        let mut game = PracticeGame::new("Bob", 99);
        game.throw("18", None).unwrap();
        let snapshot = game.export_session();
        assert_eq!(snapshot.game_type, "practice_20");
        assert_eq!(snapshot.stats.len(), 6);
        assert_eq!(snapshot.stats["18"], 1);
        assert_eq!(snapshot.stats_percentages["18"], 100.0);
        assert_eq!(snapshot.stats_percentages["T20"], 0.0);
    }
}
