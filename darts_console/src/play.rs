use std::io::{self, BufRead};

use anyhow::Context;
use console::Style;
use log::{debug, info};
use rand::Rng;

use darts_scoring::board::{BoardGeometry, Target, point_from_score};
use darts_scoring::coord::Point;
use darts_scoring::match_play::Match;
use darts_scoring::turn::Outcome;

use crate::match_config::MatchConfig;
use crate::tui;


const HELP: &str = "\
Enter darts (T20, D16, 25, 50, MISS, ...) or a command:
  at <x> <y>   score a pixel position on the calibrated board
  next         end the turn early
  undo         undo the last dart
  undo-turn    undo the last complete turn
  leg          start the next leg
  export       write the session
  quit         leave";

#[derive(Clone, PartialEq, Debug)]
enum ConsoleCommand {
    Throw(String),
    ThrowAt(Point),
    EndTurn,
    Undo,
    UndoTurn,
    NextLeg,
    Export,
    Help,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<Option<ConsoleCommand>> {
    let words: Vec<_> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        [] => return Ok(None),
        ["next"] => ConsoleCommand::EndTurn,
        ["undo"] => ConsoleCommand::Undo,
        ["undo-turn"] => ConsoleCommand::UndoTurn,
        ["leg"] => ConsoleCommand::NextLeg,
        ["export"] => ConsoleCommand::Export,
        ["help"] => ConsoleCommand::Help,
        ["quit"] | ["exit"] => ConsoleCommand::Quit,
        ["at", x, y] => {
            let x = x.parse::<f64>().with_context(|| format!("Bad x coordinate: '{x}'"))?;
            let y = y.parse::<f64>().with_context(|| format!("Bad y coordinate: '{y}'"))?;
            if !(x.is_finite() && y.is_finite()) {
                anyhow::bail!("Coordinates must be finite numbers");
            }
            ConsoleCommand::ThrowAt(Point::new(x, y))
        }
        [token] => ConsoleCommand::Throw((*token).to_owned()),
        _ => anyhow::bail!("Unrecognized input: '{}'. Type 'help' for the command list.", line),
    };
    Ok(Some(command))
}

// Darts typed in by hand get a synthesized landing point: in pixels when the board is
// calibrated, in normalized board coordinates otherwise.
struct PlaySession<R: Rng> {
    game: Match,
    calibration: Option<BoardGeometry>,
    export_path: Option<String>,
    rng: R,
}

impl<R: Rng> PlaySession<R> {
    fn new(config: MatchConfig, rng: R) -> anyhow::Result<Self> {
        Ok(PlaySession {
            game: Match::from_rules(&config.players, &config.rules)?,
            calibration: config.calibration,
            export_path: config.export_path,
            rng,
        })
    }

    fn landing_point(&mut self, token: &str) -> Option<Point> {
        let point = match &self.calibration {
            Some(geometry) => geometry.sample_point(Target::from_token(token)?, &mut self.rng),
            None => point_from_score(token, &mut self.rng),
        };
        debug!("{} synthesized at {:?}", token, point);
        point
    }

    // Returns the exported JSON when there is no file to write it to.
    fn export(&self) -> anyhow::Result<String> {
        let json = self.game.export_session().to_json()?;
        match &self.export_path {
            Some(path) => {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write export file '{path}'."))?;
                info!("Session exported to {}", path);
                Ok(format!("Session exported to {}", path))
            }
            None => Ok(json),
        }
    }

    fn throw(&mut self, token: &str, coords: Option<Point>) -> anyhow::Result<Option<String>> {
        let outcome = self.game.throw(token, coords)?;
        if outcome == Outcome::Win && self.game.is_over() && self.export_path.is_some() {
            return self.export().map(Some);
        }
        let rendered = tui::render_outcome(outcome);
        Ok((!rendered.is_empty()).then_some(rendered))
    }

    // Returns a message for the user, if any.
    fn apply(&mut self, command: ConsoleCommand) -> anyhow::Result<Option<String>> {
        match command {
            ConsoleCommand::Throw(token) => {
                let coords = self.landing_point(&token);
                self.throw(&token, coords)
            }
            ConsoleCommand::ThrowAt(pixel) => {
                let geometry =
                    self.calibration.as_ref().context("No calibration in the match config")?;
                let target = geometry.score_from_point(pixel);
                let message = self.throw(&target.to_string(), Some(pixel))?;
                Ok(Some(match message {
                    Some(message) => format!("{}: {}", target, message),
                    None => target.to_string(),
                }))
            }
            ConsoleCommand::EndTurn => {
                self.game.end_turn();
                Ok(None)
            }
            ConsoleCommand::Undo => {
                self.game.undo_last_dart();
                Ok(None)
            }
            ConsoleCommand::UndoTurn => {
                self.game.undo_last_turn();
                Ok(None)
            }
            ConsoleCommand::NextLeg => {
                if self.game.is_over() {
                    anyhow::bail!("The match is over");
                }
                if self.game.leg_winner().is_none() {
                    anyhow::bail!("The leg is still in progress");
                }
                self.game.next_leg();
                Ok(None)
            }
            ConsoleCommand::Export => self.export().map(Some),
            ConsoleCommand::Help => Ok(Some(HELP.to_owned())),
            ConsoleCommand::Quit => Ok(None),
        }
    }
}

pub fn run(config: MatchConfig) -> anyhow::Result<()> {
    let mut session = PlaySession::new(config, rand::rng())?;
    println!("{}\n\n{}", HELP, tui::render_match(&session.game));
    let error_style = Style::new().red();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                eprintln!("{}", error_style.apply_to(err));
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }
        match session.apply(command) {
            Ok(Some(message)) => println!("{}", message),
            Ok(None) => {}
            Err(err) => eprintln!("{}", error_style.apply_to(err)),
        }
        println!("{}", tui::render_match(&session.game));
    }
    if session.export_path.is_some() {
        println!("{}", session.export()?);
    }
    Ok(())
}
