use std::fmt;


// Errors are reserved for input that cannot be applied at all. Busts and missed doubles are
// regular game outcomes and are reported via `game::Outcome`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DartsError {
    // Malformed or out-of-range dart notation. Contains the offending input.
    InvalidToken(String),
    // Board calibration that violates the ring ordering or has degenerate dimensions.
    InvalidCalibration(String),
    // A dart was thrown after the leg had already been won.
    LegFinished,
    InvalidMatch(String),
}

impl fmt::Display for DartsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DartsError::InvalidToken(token) => write!(f, "invalid dart notation: '{}'", token),
            DartsError::InvalidCalibration(reason) => write!(f, "invalid calibration: {}", reason),
            DartsError::LegFinished => write!(f, "the leg is already finished"),
            DartsError::InvalidMatch(reason) => write!(f, "invalid match setup: {}", reason),
        }
    }
}

impl std::error::Error for DartsError {}

#[macro_export]
macro_rules! internal_error_message {
    () => {
        format!("Internal error at {}:{}.", file!(), line!())
    };
    ($($arg:tt)+) => {
        format!("Internal error at {}:{}: {}.", file!(), line!(), format!($($arg)*))
    };
}
