use log::{debug, info};

use crate::coord::Point;
use crate::error::DartsError;
use crate::export::MatchSnapshot;
use crate::player::PlayerGame;
use crate::rules::MatchRules;
use crate::turn::Outcome;


// Several players taking turns at the board over one or more legs.
//
// Only the game at `current_player_index` is ever mutated, so the games never need to know
// about each other.
#[derive(Clone, Debug)]
pub struct Match {
    games: Vec<PlayerGame>,
    current_player_index: usize,
    starting_player_index: usize,
    best_of: u32,
}

impl Match {
    pub fn new(games: Vec<PlayerGame>, best_of: u32) -> Result<Self, DartsError> {
        if games.is_empty() {
            return Err(DartsError::InvalidMatch("no players".to_owned()));
        }
        if best_of == 0 {
            return Err(DartsError::InvalidMatch("best_of must be positive".to_owned()));
        }
        Ok(Match {
            games,
            current_player_index: 0,
            starting_player_index: 0,
            best_of,
        })
    }

    pub fn from_rules(names: &[String], rules: &MatchRules) -> Result<Self, DartsError> {
        rules.verify()?;
        let games =
            names.iter().map(|name| PlayerGame::new(name.clone(), &rules.game_mode)).collect();
        Match::new(games, rules.best_of)
    }

    pub fn games(&self) -> &[PlayerGame] { &self.games }
    pub fn current_player_index(&self) -> usize { self.current_player_index }
    pub fn starting_player_index(&self) -> usize { self.starting_player_index }
    pub fn best_of(&self) -> u32 { self.best_of }
    pub fn current_game(&self) -> &PlayerGame { &self.games[self.current_player_index] }
    pub fn current_game_mut(&mut self) -> &mut PlayerGame {
        &mut self.games[self.current_player_index]
    }

    pub fn legs_to_win(&self) -> u32 { self.best_of / 2 + 1 }

    // The player who won the current leg, if it is over.
    pub fn leg_winner(&self) -> Option<&PlayerGame> { self.games.iter().find(|g| g.is_winner()) }

    pub fn winner(&self) -> Option<&PlayerGame> {
        let legs_to_win = self.legs_to_win();
        self.games.iter().find(|g| g.legs_won() >= legs_to_win)
    }

    pub fn is_over(&self) -> bool { self.winner().is_some() }

    fn previous_player_index(&self) -> usize {
        (self.current_player_index + self.games.len() - 1) % self.games.len()
    }

    pub fn next_player(&mut self) {
        self.current_player_index = (self.current_player_index + 1) % self.games.len();
        debug!("{} to throw", self.current_game().name());
    }

    // Starts a new leg. The player who threw first in the previous leg passes the throw on.
    pub fn next_leg(&mut self) {
        self.starting_player_index = (self.starting_player_index + 1) % self.games.len();
        self.current_player_index = self.starting_player_index;
        for game in self.games.iter_mut() {
            game.reset();
        }
        info!("New leg, {} throws first", self.current_game().name());
    }

    pub fn throw(&mut self, token: &str, coords: Option<Point>) -> Result<Outcome, DartsError> {
        if self.is_over() {
            return Err(DartsError::LegFinished);
        }
        let game = self.current_game_mut();
        let outcome = game.throw(token, coords)?;
        if outcome == Outcome::Win {
            game.credit_leg();
            info!("{} wins the leg ({} legs)", game.name(), game.legs_won());
            if let Some(winner) = self.winner() {
                info!("{} wins the match", winner.name());
            }
        } else if outcome.closes_turn() {
            self.next_player();
        }
        Ok(outcome)
    }

    pub fn end_turn(&mut self) {
        if self.leg_winner().is_some() {
            return;
        }
        self.current_game_mut().end_turn();
        self.next_player();
    }

    // Moves back to the previous player if the current one has not thrown yet this turn, so
    // that undo acts on the darts that were thrown last. Returns false if there is nothing
    // to undo.
    fn step_back_to_last_thrower(&mut self) -> bool {
        let game = self.current_game();
        if !game.current_turn().is_empty() || game.is_winner() {
            return true;
        }
        let previous = self.previous_player_index();
        if !self.games[previous].has_history() {
            return false;
        }
        self.current_player_index = previous;
        true
    }

    // Undoes the last dart of the match, which may belong to the previous player.
    pub fn undo_last_dart(&mut self) {
        if !self.step_back_to_last_thrower() {
            return;
        }
        let game = self.current_game_mut();
        let was_winner = game.is_winner();
        game.undo_last_dart();
        if was_winner && !game.is_winner() {
            game.revoke_leg();
            debug!("{}: leg revoked", game.name());
        }
    }

    // Undoes the last closed turn of the match. A turn in progress is dropped dart by dart.
    pub fn undo_last_turn(&mut self) {
        if !self.step_back_to_last_thrower() {
            return;
        }
        let game = self.current_game_mut();
        let was_winner = game.is_winner();
        if game.current_turn().is_empty() {
            game.undo_last_turn();
        } else {
            while !game.current_turn().is_empty() {
                game.undo_last_dart();
            }
        }
        if was_winner && !game.is_winner() {
            game.revoke_leg();
            debug!("{}: leg revoked", game.name());
        }
    }

    pub fn export_session(&self) -> MatchSnapshot {
        MatchSnapshot {
            players: self.games.iter().map(PlayerGame::export_session).collect(),
            current_player_index: self.current_player_index,
            best_of: self.best_of,
            starting_player_index: self.starting_player_index,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{replay_match_throws, sample_player_names};

    fn try_x01_match(start_score: u32, best_of: u32) -> Result<Match, DartsError> {
        let rules = MatchRules { best_of, ..MatchRules::x01(start_score) };
        Match::from_rules(&sample_player_names(), &rules)
    }

    fn x01_match(start_score: u32, best_of: u32) -> Match {
        try_x01_match(start_score, best_of).unwrap()
    }

    #[test]
    fn rejects_degenerate_setups() {
        assert!(Match::new(Vec::new(), 1).is_err());
        assert!(try_x01_match(501, 0).is_err());
        assert!(try_x01_match(1, 1).is_err());
    }

    #[test]
    fn turn_passes_after_three_darts_or_bust() {
        let mut m = x01_match(101, 1);
        replay_match_throws(&mut m, "1:T20 1:1 1:1").unwrap();
        assert_eq!(m.current_player_index(), 1);
        let outcomes = replay_match_throws(&mut m, "2:T20 2:T20").unwrap();
        assert_eq!(outcomes, [Outcome::Ok, Outcome::Bust]);
        assert_eq!(m.current_player_index(), 0);
        m.end_turn();
        assert_eq!(m.current_player_index(), 1);
    }

    #[test]
    fn leg_and_match_win() {
        let mut m = x01_match(40, 3);
        assert_eq!(m.legs_to_win(), 2);
        assert_eq!(m.throw("D20", None), Ok(Outcome::Win));
        assert_eq!(m.games()[0].legs_won(), 1);
        assert_eq!(m.leg_winner().map(PlayerGame::name), Some("Alice"));
        assert!(!m.is_over());
        // Ending the turn after the leg is won does not pass the throw on.
        m.end_turn();
        assert_eq!(m.current_player_index(), 0);

        m.next_leg();
        assert_eq!(m.current_player_index(), 1);
        assert_eq!(m.games()[0].score(), 40);
        assert_eq!(m.games()[0].legs_won(), 1);
        replay_match_throws(&mut m, "2:MISS 2:MISS 2:MISS 1:D20").unwrap();
        assert!(m.is_over());
        assert_eq!(m.winner().map(PlayerGame::name), Some("Alice"));
        assert_eq!(m.throw("D1", None), Err(DartsError::LegFinished));
    }

    #[test]
    fn undo_steps_back_to_previous_player() {
        let mut m = x01_match(501, 1);
        replay_match_throws(&mut m, "1:T20 1:T20 1:T20").unwrap();
        assert_eq!(m.current_player_index(), 1);
        m.undo_last_dart();
        assert_eq!(m.current_player_index(), 0);
        assert_eq!(m.current_game().score(), 381);
        assert_eq!(m.current_game().current_turn().len(), 2);
    }

    #[test]
    fn undo_at_start_is_noop() {
        let mut m = x01_match(501, 1);
        m.undo_last_dart();
        m.undo_last_turn();
        assert_eq!(m.current_player_index(), 0);
        assert_eq!(m.current_game().score(), 501);
    }

    #[test]
    fn undoing_winning_dart_revokes_leg() {
        let mut m = x01_match(32, 1);
        m.throw("D16", None).unwrap();
        assert!(m.is_over());
        m.undo_last_dart();
        assert!(!m.is_over());
        assert_eq!(m.current_player_index(), 0);
        assert_eq!(m.current_game().legs_won(), 0);
        assert_eq!(m.current_game().score(), 32);
    }

    #[test]
    fn export_carries_match_state() {
        let mut m = x01_match(501, 5);
        m.throw("T20", None).unwrap();
        m.end_turn();
        let snapshot = m.export_session();
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.current_player_index, 1);
        assert_eq!(snapshot.best_of, 5);
        assert_eq!(snapshot.starting_player_index, 0);
    }
}
