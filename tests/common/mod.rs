// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use darts_scoring::board::{BoardGeometry, RingFractions};
use darts_scoring::coord::Point;
use darts_scoring::dart::{MAX_SEGMENT, Multiplier};
use darts_scoring::game::X01Game;
use itertools::Itertools;
use strum::IntoEnumIterator;


// Notation for every spot on the board, e.g. "S7", "D20", "T1", plus both bulls.
#[allow(dead_code)]
pub fn all_board_tokens() -> Vec<String> {
    Multiplier::iter()
        .cartesian_product(1..=MAX_SEGMENT)
        .map(|(multiplier, segment)| format!("{}{}", multiplier.to_letter(), segment))
        .chain(["25".to_owned(), "50".to_owned()])
        .collect()
}

// A few camera views, from head-on to strongly skewed, with non-standard ring layouts.
#[allow(dead_code)]
pub fn sample_calibrations() -> Vec<BoardGeometry> {
    let tight_rings = RingFractions {
        inner_bull: 0.02,
        outer_bull: 0.05,
        treble_center: 0.4,
        inner_double: 0.8,
        outer_double: 0.85,
    };
    let standard = RingFractions::standard();
    [
        (Point::new(320.0, 240.0), 200.0, 1.0, 0.0, 0.0, standard),
        (Point::new(640.0, 360.0), 310.0, 0.7, 9.0, 25.0, standard),
        (Point::new(-50.0, 1000.0), 45.5, 0.35, -171.0, -80.0, tight_rings),
    ]
    .into_iter()
    .map(|(center, radius, squash, rotation, tilt, rings)| {
        BoardGeometry::new(center, radius, squash, rotation, tilt, rings).unwrap()
    })
    .chain([BoardGeometry::unit()])
    .collect()
}

// Game in the middle of a turn: 501 -> 441 -> 384.
#[allow(dead_code)]
pub fn game_mid_turn() -> X01Game {
    let mut game = X01Game::new("Alice", 501);
    game.throw("T20", None).unwrap();
    game.throw("T19", None).unwrap();
    game
}
