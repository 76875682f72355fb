use crate::coord::Point;
use crate::error::DartsError;
use crate::export::SessionSnapshot;
use crate::game::X01Game;
use crate::practice::PracticeGame;
use crate::rules::GameMode;
use crate::turn::{Outcome, Turn};


// A participant of a match together with their leg in progress.
#[derive(Clone, Debug)]
pub enum PlayerGame {
    X01(X01Game),
    Practice(PracticeGame),
}

macro_rules! delegate {
    ($self:expr, $game:ident => $body:expr) => {
        match $self {
            PlayerGame::X01($game) => $body,
            PlayerGame::Practice($game) => $body,
        }
    };
}

impl PlayerGame {
    pub fn new(name: impl Into<String>, mode: &GameMode) -> Self {
        match *mode {
            GameMode::X01 { start_score } => PlayerGame::X01(X01Game::new(name, start_score)),
            GameMode::Practice { max_darts } => {
                PlayerGame::Practice(PracticeGame::new(name, max_darts))
            }
        }
    }

    pub fn name(&self) -> &str { delegate!(self, g => g.name()) }
    pub fn score(&self) -> u32 { delegate!(self, g => g.score()) }
    pub fn turns(&self) -> &[Turn] { delegate!(self, g => g.turns()) }
    pub fn current_turn(&self) -> &Turn { delegate!(self, g => g.current_turn()) }
    pub fn legs_won(&self) -> u32 { delegate!(self, g => g.legs_won()) }
    pub fn turn_score(&self) -> u32 { delegate!(self, g => g.turn_score()) }
    pub fn total_darts_thrown(&self) -> usize { delegate!(self, g => g.total_darts_thrown()) }
    pub fn average(&self) -> f64 { delegate!(self, g => g.average()) }

    // For practice: whether the session has used up all of its darts.
    pub fn is_winner(&self) -> bool {
        match self {
            PlayerGame::X01(g) => g.is_winner(),
            PlayerGame::Practice(g) => g.is_finished(),
        }
    }

    // Practice has no double-out, hence no checkouts.
    pub fn checkout_percentage(&self) -> Option<f64> {
        match self {
            PlayerGame::X01(g) => Some(g.checkout_percentage()),
            PlayerGame::Practice(_) => None,
        }
    }

    pub fn checkout_suggestion(&self) -> Option<&'static [&'static str]> {
        match self {
            PlayerGame::X01(g) => g.checkout_suggestion(),
            PlayerGame::Practice(_) => None,
        }
    }

    // Size of the practice session. X01 legs last until someone checks out.
    pub fn max_darts(&self) -> Option<usize> {
        match self {
            PlayerGame::X01(_) => None,
            PlayerGame::Practice(g) => Some(g.max_darts()),
        }
    }

    pub fn has_history(&self) -> bool {
        !self.turns().is_empty() || !self.current_turn().is_empty()
    }

    pub fn throw(&mut self, token: &str, coords: Option<Point>) -> Result<Outcome, DartsError> {
        delegate!(self, g => g.throw(token, coords))
    }

    pub fn end_turn(&mut self) { delegate!(self, g => g.end_turn()) }
    pub fn undo_last_dart(&mut self) { delegate!(self, g => g.undo_last_dart()) }
    pub fn undo_last_turn(&mut self) { delegate!(self, g => g.undo_last_turn()) }
    pub fn reset(&mut self) { delegate!(self, g => g.reset()) }
    pub fn credit_leg(&mut self) { delegate!(self, g => g.credit_leg()) }
    pub fn revoke_leg(&mut self) { delegate!(self, g => g.revoke_leg()) }

    pub fn export_session(&self) -> SessionSnapshot {
        match self {
            PlayerGame::X01(g) => SessionSnapshot::X01(g.export_session()),
            PlayerGame::Practice(g) => SessionSnapshot::Practice(g.export_session()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_by_mode() {
        let mut x01 = PlayerGame::new("Alice", &GameMode::X01 { start_score: 301 });
        let mut practice = PlayerGame::new("Bob", &GameMode::Practice { max_darts: 9 });
        x01.throw("T20", None).unwrap();
        practice.throw("T20", None).unwrap();
        assert_eq!(x01.score(), 241);
        assert_eq!(practice.score(), 60);
        assert_eq!(x01.checkout_percentage(), Some(0.0));
        assert_eq!(practice.checkout_percentage(), None);
        assert_eq!(x01.max_darts(), None);
        assert_eq!(practice.max_darts(), Some(9));
        assert!(matches!(practice.export_session(), SessionSnapshot::Practice(_)));
        assert!(x01.has_history());
        x01.undo_last_dart();
        assert!(!x01.has_history());
    }
}
