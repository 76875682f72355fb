use std::fmt;

use derive_new::new;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use strum::EnumIter;

use crate::error::DartsError;
use crate::once_cell_regex;


pub const NUM_SEGMENTS: usize = 20;
pub const MAX_SEGMENT: u8 = 20;
pub const OUTER_BULL_VALUE: u32 = 25;
pub const INNER_BULL_VALUE: u32 = 50;
pub const MISS_TOKEN: &str = "MISS";

// Standard dartboard segments starting from the top (12 o'clock) and going clockwise.
pub const SEGMENTS: [u8; NUM_SEGMENTS] =
    [20, 1, 18, 4, 13, 6, 10, 15, 2, 17, 3, 19, 7, 16, 8, 11, 14, 9, 12, 5];

const_assert_eq!(SEGMENTS.len(), MAX_SEGMENT as usize);

// Position of the segment in `SEGMENTS`, i.e. the number of 18° sectors clockwise from the top.
pub fn segment_index(segment: u8) -> Option<usize> {
    SEGMENTS.iter().position(|&s| s == segment)
}


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter, Serialize, Deserialize)]
pub enum Multiplier {
    Single,
    Double,
    Treble,
}

impl Multiplier {
    pub fn factor(self) -> u32 {
        match self {
            Multiplier::Single => 1,
            Multiplier::Double => 2,
            Multiplier::Treble => 3,
        }
    }

    pub fn to_letter(self) -> char {
        match self {
            Multiplier::Single => 'S',
            Multiplier::Double => 'D',
            Multiplier::Treble => 'T',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'S' => Some(Multiplier::Single),
            'D' => Some(Multiplier::Double),
            'T' => Some(Multiplier::Treble),
            _ => None,
        }
    }
}


// A single dart as entered by the player. Produced by `parse_dart` and never modified.
#[derive(Clone, PartialEq, Eq, Debug, new, Serialize, Deserialize)]
pub struct DartThrow {
    // Trimmed and upper-cased input, e.g. "T20" or "MISS".
    pub raw_token: String,
    pub value: u32,
    // Whether the dart may finish a leg. True for doubles and for the inner bull.
    pub is_double: bool,
}

impl fmt::Display for DartThrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.raw_token) }
}


// Parses dart notation: "MISS", "0", "25", "50", or an optional S/D/T multiplier followed by
// a segment number from 0 to 20. Case-insensitive, surrounding whitespace is ignored.
pub fn parse_dart(token: &str) -> Result<DartThrow, DartsError> {
    let normalized = token.trim().to_ascii_uppercase();
    match normalized.as_str() {
        MISS_TOKEN | "0" => return Ok(DartThrow::new(normalized, 0, false)),
        "50" => return Ok(DartThrow::new(normalized, INNER_BULL_VALUE, true)),
        "25" => return Ok(DartThrow::new(normalized, OUTER_BULL_VALUE, false)),
        _ => {}
    }
    let segment_re = once_cell_regex!(r"^([SDT])?([0-9]+)$");
    let invalid = || DartsError::InvalidToken(token.to_owned());
    let cap = segment_re.captures(&normalized).ok_or_else(invalid)?;
    let multiplier = match cap.get(1) {
        None => Multiplier::Single,
        Some(m) => m.as_str().chars().next().and_then(Multiplier::from_letter).ok_or_else(invalid)?,
    };
    // Overly long digit strings fail here rather than wrapping around.
    let segment: u32 = cap[2].parse().map_err(|_| invalid())?;
    if segment > MAX_SEGMENT as u32 {
        return Err(invalid());
    }
    let value = segment * multiplier.factor();
    Ok(DartThrow::new(normalized, value, multiplier == Multiplier::Double))
}
