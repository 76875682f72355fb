use std::mem;

use log::{debug, info};

use crate::checkout::checkout_for;
use crate::coord::Point;
use crate::dart::{INNER_BULL_VALUE, parse_dart};
use crate::error::DartsError;
use crate::export::X01Snapshot;
use crate::turn::{DARTS_PER_TURN, Outcome, Turn, TurnEntry};
use crate::util::{percentage, three_dart_average};


pub const MAX_TURN_SCORE: u32 = 180;

// A dart thrown from this score could finish the leg: a double (even score up to 40) or the
// inner bull.
pub fn is_checkout_position(score: u32) -> bool {
    score == INNER_BULL_VALUE || (score > 0 && score <= 40 && score % 2 == 0)
}


// One player's leg of an x01 game (301, 501, ...): count down to exactly zero, finishing on
// a double or the inner bull.
//
// Invariant: `score == start_score - (sum of closed turns) - (sum of current turn)`. A bust
// reverts the whole turn, so right after a bust `score == turn_start_score`.
#[derive(Clone, Debug)]
pub struct X01Game {
    name: String,
    start_score: u32,
    score: u32,
    turns: Vec<Turn>,
    current_turn: Turn,
    turn_start_score: u32,
    checkout_attempts: u32,
    checkouts_hit: u32,
    legs_won: u32,
}

impl X01Game {
    pub fn new(name: impl Into<String>, start_score: u32) -> Self {
        X01Game {
            name: name.into(),
            start_score,
            score: start_score,
            turns: Vec::new(),
            current_turn: Turn::new(),
            turn_start_score: start_score,
            checkout_attempts: 0,
            checkouts_hit: 0,
            legs_won: 0,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn start_score(&self) -> u32 { self.start_score }
    pub fn score(&self) -> u32 { self.score }
    pub fn turns(&self) -> &[Turn] { &self.turns }
    pub fn current_turn(&self) -> &Turn { &self.current_turn }
    pub fn turn_start_score(&self) -> u32 { self.turn_start_score }
    pub fn checkout_attempts(&self) -> u32 { self.checkout_attempts }
    pub fn checkouts_hit(&self) -> u32 { self.checkouts_hit }
    pub fn legs_won(&self) -> u32 { self.legs_won }
    pub fn is_winner(&self) -> bool { self.score == 0 }

    pub fn credit_leg(&mut self) { self.legs_won += 1; }
    pub fn revoke_leg(&mut self) { self.legs_won = self.legs_won.saturating_sub(1); }

    // Either fully applies the dart or, on a bust, fully reverts the turn. Invalid notation
    // leaves the game untouched.
    pub fn throw(&mut self, token: &str, coords: Option<Point>) -> Result<Outcome, DartsError> {
        if self.is_winner() {
            return Err(DartsError::LegFinished);
        }
        let dart = parse_dart(token)?;
        debug!("{} at {}: {}", self.name, self.score, dart);

        let new_score = match self.score.checked_sub(dart.value) {
            None | Some(1) => {
                info!("{}: bust on {} from {}", self.name, dart, self.score);
                self.bust();
                return Ok(Outcome::Bust);
            }
            Some(0) if !dart.is_double => {
                info!("{}: no double, {} from {}", self.name, dart, self.score);
                self.bust();
                return Ok(Outcome::NoDouble);
            }
            Some(new_score) => new_score,
        };

        let checkout_attempt = is_checkout_position(self.score);
        if checkout_attempt {
            self.checkout_attempts += 1;
        }
        self.score = new_score;
        self.current_turn.push(TurnEntry::Dart { dart, coords, checkout_attempt });

        if self.score == 0 {
            self.checkouts_hit += 1;
            info!("{}: game shot", self.name);
            self.close_turn();
            return Ok(Outcome::Win);
        }
        if self.current_turn.len() >= DARTS_PER_TURN {
            let turn_total = self.current_turn.total();
            let is_180 = turn_total == MAX_TURN_SCORE && self.turn_start_score >= MAX_TURN_SCORE;
            if is_180 {
                info!("{}: one hundred and eighty!", self.name);
            }
            self.close_turn();
            return Ok(Outcome::TurnOver { is_180 });
        }
        Ok(Outcome::Ok)
    }

    // Forfeits the rest of the turn. Darts thrown earlier in the turn are replaced by the bust
    // placeholder, so the turn contributes nothing to the score.
    fn bust(&mut self) {
        self.score = self.turn_start_score;
        self.current_turn = Turn::new();
        self.turns.push(Turn::bust());
    }

    fn close_turn(&mut self) {
        self.turns.push(mem::take(&mut self.current_turn));
        self.turn_start_score = self.score;
    }

    // Ends the turn before all three darts were thrown.
    pub fn end_turn(&mut self) {
        if !self.current_turn.is_empty() {
            self.close_turn();
        }
    }

    // Puts the dart's points back and rolls back the statistics it contributed to.
    fn revert_entry(&mut self, entry: &TurnEntry) {
        let TurnEntry::Dart { dart, checkout_attempt, .. } = entry else {
            return;
        };
        if self.score == 0 {
            self.checkouts_hit = self.checkouts_hit.saturating_sub(1);
        }
        if *checkout_attempt {
            self.checkout_attempts = self.checkout_attempts.saturating_sub(1);
        }
        self.score += dart.value;
    }

    pub fn undo_last_dart(&mut self) {
        if let Some(entry) = self.current_turn.pop() {
            self.revert_entry(&entry);
            return;
        }
        let Some(mut turn) = self.turns.pop() else {
            return;
        };
        if turn.is_bust() {
            // The bust already restored the score to where the turn started.
            debug!("{}: dropping bust turn", self.name);
            return;
        }
        if let Some(entry) = turn.pop() {
            self.revert_entry(&entry);
        }
        self.turn_start_score = self.score + turn.total();
        self.current_turn = turn;
    }

    // Coarser than `undo_last_dart`: removes the last closed turn as a whole. Bust turns hold
    // no points, so they are simply dropped.
    pub fn undo_last_turn(&mut self) {
        let Some(mut turn) = self.turns.pop() else {
            return;
        };
        let total = turn.total();
        let score_before = self.score;
        while let Some(entry) = turn.pop() {
            self.revert_entry(&entry);
        }
        debug_assert_eq!(self.score, score_before + total);
        self.turn_start_score += total;
    }

    // Back to the starting score. Legs won are kept: they belong to the match.
    pub fn reset(&mut self) {
        self.score = self.start_score;
        self.turns.clear();
        self.current_turn = Turn::new();
        self.turn_start_score = self.start_score;
        self.checkout_attempts = 0;
        self.checkouts_hit = 0;
    }

    // Recommended finish for the darts left in this turn.
    pub fn checkout_suggestion(&self) -> Option<&'static [&'static str]> {
        let suggestion = checkout_for(self.score)?;
        let thrown = self.current_turn.len();
        if thrown >= DARTS_PER_TURN {
            return None;
        }
        let remaining = DARTS_PER_TURN - thrown;
        Some(&suggestion[suggestion.len().saturating_sub(remaining)..])
    }

    pub fn turn_score(&self) -> u32 { self.current_turn.total() }

    // Busted turns count as three darts.
    pub fn total_darts_thrown(&self) -> usize {
        self.turns.iter().map(Turn::len).sum::<usize>() + self.current_turn.len()
    }

    pub fn average(&self) -> f64 {
        three_dart_average(self.start_score - self.score, self.total_darts_thrown())
    }

    pub fn highest_score(&self) -> u32 { self.turns.iter().map(Turn::total).max().unwrap_or(0) }

    pub fn checkout_percentage(&self) -> f64 {
        percentage(self.checkouts_hit, self.checkout_attempts)
    }

    // The in-progress turn is exported as the last turn, if any darts were thrown in it.
    pub fn export_session(&self) -> X01Snapshot {
        let turns = self
            .turns
            .iter()
            .chain((!self.current_turn.is_empty()).then_some(&self.current_turn))
            .map(Turn::to_snapshot)
            .collect();
        X01Snapshot {
            player: self.name.clone(),
            start_score: self.start_score,
            turns,
            checkout_attempts: self.checkout_attempts,
            checkouts_hit: self.checkouts_hit,
            average: self.average(),
            highest_score: self.highest_score(),
            total_darts_thrown: self.total_darts_thrown(),
            is_winner: self.is_winner(),
        }
    }
}
