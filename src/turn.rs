use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::coord::Point;
use crate::dart::DartThrow;
use crate::export::TurnDartSnapshot;


pub const DARTS_PER_TURN: usize = 3;

pub const BUST_INPUT: &str = "BUST";
pub const EMPTY_INPUT: &str = "-";


#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Outcome {
    Ok,
    // Score went below zero or to one. The turn is forfeited and the score reverted.
    Bust,
    // Score went to zero on a dart that is not a double. Handled exactly like a bust.
    NoDouble,
    Win,
    // Third dart of the turn was thrown. `is_180` marks a maximum.
    TurnOver { is_180: bool },
}

impl Outcome {
    // Whether the player's turn is over after this dart.
    pub fn closes_turn(self) -> bool {
        matches!(self, Outcome::Bust | Outcome::NoDouble | Outcome::TurnOver { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ok => f.write_str("OK"),
            Outcome::Bust => f.write_str("BUST"),
            Outcome::NoDouble => f.write_str("NO_DOUBLE"),
            Outcome::Win => f.write_str("WIN"),
            Outcome::TurnOver { is_180: false } => f.write_str("TURN_OVER"),
            Outcome::TurnOver { is_180: true } => f.write_str("TURN_OVER (180)"),
        }
    }
}


#[derive(Clone, PartialEq, Debug)]
pub enum TurnEntry {
    Dart {
        dart: DartThrow,
        coords: Option<Point>,
        // Whether the dart was thrown from a finishable score. Needed to undo statistics.
        checkout_attempt: bool,
    },
    // First entry of a busted turn. The remaining darts of that turn are `Empty`.
    BustMarker,
    Empty,
}

impl TurnEntry {
    pub fn dart(&self) -> Option<&DartThrow> {
        match self {
            TurnEntry::Dart { dart, .. } => Some(dart),
            TurnEntry::BustMarker | TurnEntry::Empty => None,
        }
    }

    pub fn value(&self) -> u32 { self.dart().map_or(0, |d| d.value) }

    pub fn to_snapshot(&self) -> TurnDartSnapshot {
        match self {
            TurnEntry::Dart { dart, .. } => TurnDartSnapshot {
                input: dart.raw_token.clone(),
                score: dart.value,
                is_double: dart.is_double,
            },
            TurnEntry::BustMarker => TurnDartSnapshot::placeholder(BUST_INPUT),
            TurnEntry::Empty => TurnDartSnapshot::placeholder(EMPTY_INPUT),
        }
    }
}


// Up to three darts thrown by one player in a row. A busted turn is stored as a regular turn
// holding `[BustMarker, Empty, Empty]`, so that it still counts as three darts thrown.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Turn {
    entries: Vec<TurnEntry>,
}

impl Turn {
    pub fn new() -> Self { Turn { entries: Vec::new() } }

    pub fn bust() -> Self {
        let mut entries = vec![TurnEntry::BustMarker];
        entries.resize(DARTS_PER_TURN, TurnEntry::Empty);
        Turn { entries }
    }

    pub fn entries(&self) -> &[TurnEntry] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn is_full(&self) -> bool { self.entries.len() >= DARTS_PER_TURN }
    pub fn is_bust(&self) -> bool { self.entries.first() == Some(&TurnEntry::BustMarker) }

    pub fn darts(&self) -> impl Iterator<Item = &DartThrow> + '_ {
        self.entries.iter().filter_map(TurnEntry::dart)
    }

    pub fn total(&self) -> u32 { self.entries.iter().map(TurnEntry::value).sum() }

    // Landing points of the darts that have one.
    pub fn dart_coords(&self) -> impl Iterator<Item = Point> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TurnEntry::Dart { coords, .. } => *coords,
            TurnEntry::BustMarker | TurnEntry::Empty => None,
        })
    }

    pub fn push(&mut self, entry: TurnEntry) {
        assert!(!self.is_full(), "{}", crate::internal_error_message!("turn overflow"));
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<TurnEntry> { self.entries.pop() }

    pub fn to_snapshot(&self) -> Vec<TurnDartSnapshot> {
        self.entries.iter().map(TurnEntry::to_snapshot).collect()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bust() {
            return f.write_str(BUST_INPUT);
        }
        write!(f, "{}", self.darts().join(" "))
    }
}
