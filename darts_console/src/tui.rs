// Improvement potential. Redraw in place instead of printing the scoreboard after every input.

use console::Style;
use itertools::Itertools;

use darts_scoring::match_play::Match;
use darts_scoring::player::PlayerGame;
use darts_scoring::turn::{Outcome, Turn};


const NAME_WIDTH: usize = 12;

fn render_turn(turn: &Turn) -> String {
    if turn.is_bust() {
        Style::new().red().apply_to(turn.to_string()).to_string()
    } else {
        turn.to_string()
    }
}

fn render_player(game: &PlayerGame, is_active: bool) -> String {
    let marker = if is_active { '▶' } else { ' ' };
    let name = format!("{:<1$}", game.name(), NAME_WIDTH);
    let name = if game.is_winner() {
        Style::new().green().bold().apply_to(name).to_string()
    } else if is_active {
        Style::new().reverse().apply_to(name).to_string()
    } else {
        name
    };
    let mut line = format!(
        "{} {} {:>4}  legs {}  avg {:>6.2}",
        marker,
        name,
        game.score(),
        game.legs_won(),
        game.average()
    );
    if let Some(checkout) = game.checkout_percentage() {
        line += &format!("  co {:>5.1}%", checkout);
    }
    if let Some(max_darts) = game.max_darts() {
        line += &format!("  darts {}/{}", game.total_darts_thrown(), max_darts);
    }
    let last_turn = if game.current_turn().is_empty() {
        game.turns().last()
    } else {
        Some(game.current_turn())
    };
    if let Some(turn) = last_turn {
        line += &format!("  [{}]", render_turn(turn));
    }
    line
}

pub fn render_match(m: &Match) -> String {
    let mut lines = m
        .games()
        .iter()
        .enumerate()
        .map(|(idx, game)| render_player(game, idx == m.current_player_index()))
        .collect_vec();
    let landed = m
        .current_game()
        .current_turn()
        .dart_coords()
        .map(|p| format!("({:.2}, {:.2})", p.x, p.y))
        .join(" ");
    if !landed.is_empty() {
        lines.push(format!("  landed: {}", landed));
    }
    if let Some(suggestion) = m.current_game().checkout_suggestion() {
        let suggestion = suggestion.iter().join(" ");
        lines.push(format!("  checkout: {}", Style::new().cyan().apply_to(suggestion)));
    }
    if let Some(winner) = m.winner() {
        let message = format!("{} wins the match!", winner.name());
        lines.push(Style::new().magenta().apply_to(message).to_string());
    } else if let Some(leg_winner) = m.leg_winner() {
        lines.push(format!("{} wins the leg. Type 'leg' to continue.", leg_winner.name()));
    }
    lines.join("\n")
}

pub fn render_outcome(outcome: Outcome) -> String {
    let style = match outcome {
        Outcome::Ok => return String::new(),
        Outcome::Bust | Outcome::NoDouble => Style::new().red(),
        Outcome::Win => Style::new().green(),
        Outcome::TurnOver { is_180: true } => Style::new().yellow().bold(),
        Outcome::TurnOver { is_180: false } => Style::new().dim(),
    };
    style.apply_to(outcome).to_string()
}
