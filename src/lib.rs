#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod board;
pub mod calibration;
pub mod checkout;
pub mod coord;
pub mod dart;
pub mod error;
pub mod export;
pub mod game;
pub mod match_play;
pub mod player;
pub mod practice;
pub mod rules;
pub mod test_util;
pub mod turn;
pub mod util;
