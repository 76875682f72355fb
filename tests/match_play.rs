use darts_scoring::error::DartsError;
use darts_scoring::match_play::Match;
use darts_scoring::player::PlayerGame;
use darts_scoring::rules::{GameMode, MatchRules};
use darts_scoring::test_util::{replay_match_throws, sample_player_names};
use darts_scoring::turn::Outcome;
use pretty_assertions::assert_eq;


fn three_players(rules: &MatchRules) -> Match {
    let names = ["Alice", "Bob", "Charlie"].map(str::to_owned);
    Match::from_rules(&names, rules).unwrap()
}

fn scores(m: &Match) -> Vec<u32> { m.games().iter().map(PlayerGame::score).collect() }

#[test]
fn players_rotate_within_a_leg() {
    let mut m = three_players(&MatchRules::x01(301));
    replay_match_throws(&mut m, "1:T20 1:T20 1:T20 2:20 2:20 2:20 3:1").unwrap();
    assert_eq!(scores(&m), [121, 241, 300]);
    m.end_turn();
    assert_eq!(m.current_player_index(), 0);
    // Busts pass the throw on immediately.
    let outcomes = replay_match_throws(&mut m, "1:T20 1:T20 2:5").unwrap();
    assert_eq!(outcomes, [Outcome::Ok, Outcome::Bust, Outcome::Ok]);
    assert_eq!(scores(&m), [121, 236, 300]);
}

#[test]
fn starting_player_rotates_every_leg() {
    let rules = MatchRules { best_of: 5, ..MatchRules::x01(40) };
    let mut m = three_players(&rules);
    assert_eq!(m.legs_to_win(), 3);
    replay_match_throws(&mut m, "1:D20").unwrap();
    m.next_leg();
    assert_eq!(m.starting_player_index(), 1);
    replay_match_throws(&mut m, "2:D20").unwrap();
    m.next_leg();
    assert_eq!(m.starting_player_index(), 2);
    replay_match_throws(&mut m, "3:MISS 3:MISS 3:MISS 1:D20").unwrap();
    m.next_leg();
    assert_eq!(m.starting_player_index(), 0);
    assert_eq!(m.current_player_index(), 0);
    assert!(!m.is_over());
    replay_match_throws(&mut m, "1:D10 1:D10").unwrap();
    assert!(m.is_over());
    assert_eq!(m.winner().map(PlayerGame::name), Some("Alice"));
    let legs: Vec<_> = m.games().iter().map(PlayerGame::legs_won).collect();
    assert_eq!(legs, [3, 1, 0]);
    assert_eq!(m.throw("T20", None), Err(DartsError::LegFinished));
}

#[test]
fn undo_walks_back_across_players() {
    let mut m = three_players(&MatchRules::x01(501));
    replay_match_throws(&mut m, "1:T20 1:T20 1:T20 2:T19 2:T19 2:T19").unwrap();
    assert_eq!(m.current_player_index(), 2);
    for _ in 0..4 {
        m.undo_last_dart();
    }
    assert_eq!(m.current_player_index(), 0);
    assert_eq!(scores(&m), [381, 501, 501]);
    assert_eq!(m.current_game().current_turn().len(), 2);
    // The rest of the history can be undone as well, but not more.
    for _ in 0..5 {
        m.undo_last_dart();
    }
    assert_eq!(scores(&m), [501, 501, 501]);
    assert_eq!(m.current_player_index(), 0);
}

#[test]
fn undo_turn_removes_the_turn_thrown_last() {
    let mut m = Match::from_rules(&sample_player_names(), &MatchRules::x01(501)).unwrap();
    replay_match_throws(&mut m, "1:T20 1:T20 1:T20 2:1 2:1 2:1 1:T19 1:T19 1:T19").unwrap();
    assert_eq!(scores(&m), [264, 498]);
    assert_eq!(m.current_player_index(), 1);

    m.undo_last_turn();
    assert_eq!(scores(&m), [321, 498]);
    assert_eq!(m.current_player_index(), 0);
    assert_eq!(m.games()[0].turns().len(), 1);
    m.undo_last_turn();
    assert_eq!(scores(&m), [321, 501]);
    assert_eq!(m.current_player_index(), 1);
    m.undo_last_turn();
    assert_eq!(scores(&m), [501, 501]);
    assert_eq!(m.current_player_index(), 0);
    m.undo_last_turn();
    assert_eq!(scores(&m), [501, 501]);
    assert_eq!(m.current_player_index(), 0);
}

#[test]
fn undo_turn_drops_a_turn_in_progress() {
    let mut m = Match::from_rules(&sample_player_names(), &MatchRules::x01(501)).unwrap();
    replay_match_throws(&mut m, "1:T20 1:T20 1:T20 2:T20 2:5").unwrap();
    m.undo_last_turn();
    assert_eq!(scores(&m), [321, 501]);
    assert_eq!(m.current_player_index(), 1);
    assert!(m.current_game().current_turn().is_empty());
    assert!(m.games()[0].has_history());
}

#[test]
fn practice_match() {
    let mut m = Match::from_rules(&["Alice".to_owned()], &MatchRules::practice(6)).unwrap();
    assert_eq!(m.current_game().checkout_suggestion(), None);
    let outcomes = replay_match_throws(&mut m, "T20 T20 T20 20 MISS 5").unwrap();
    assert_eq!(outcomes[2], Outcome::TurnOver { is_180: true });
    assert_eq!(outcomes[5], Outcome::Win);
    assert!(m.is_over());
    assert_eq!(m.current_game().score(), 200);
    assert!((m.current_game().average() - 100.0).abs() < 1e-9);
    assert_eq!(m.current_game().checkout_percentage(), None);
    m.undo_last_dart();
    assert!(!m.is_over());
    assert_eq!(m.current_game().legs_won(), 0);
}

#[test]
fn rules_decide_the_game_variant() {
    let m = three_players(&MatchRules::practice(12));
    assert!(m.games().iter().all(|g| matches!(g, PlayerGame::Practice(_))));
    let rules = MatchRules { game_mode: GameMode::X01 { start_score: 701 }, best_of: 1 };
    let m = three_players(&rules);
    assert_eq!(scores(&m), [701, 701, 701]);
}
