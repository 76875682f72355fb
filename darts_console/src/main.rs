// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod board_tools;
mod match_config;
mod play;
mod tui;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Darts")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Darts scoring console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("play")
                .about("Score a match interactively, reading darts from stdin")
                .arg(arg!(<config_file> "Path to the match file: yaml-serialized MatchConfig.")),
        )
        .subcommand(
            Command::new("score")
                .about("Score a pixel position on a calibrated board")
                .allow_negative_numbers(true)
                .arg(arg!(<calibration_file> "Path to yaml-serialized BoardGeometry."))
                .arg(arg!(<x> "Pixel x").value_parser(clap::value_parser!(f64)))
                .arg(arg!(<y> "Pixel y").value_parser(clap::value_parser!(f64))),
        )
        .subcommand(
            Command::new("sample")
                .about("Print plausible normalized landing points for dart notation")
                .arg(arg!(<tokens> ... "Darts, e.g. T20 D16 25"))
                .arg(
                    arg!(-'n' --"count" <n> "Points per dart")
                        .value_parser(clap::value_parser!(u32).range(1..=1000))
                        .default_value("1"),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("play", sub_matches)) => {
            let config_file = sub_matches.get_one::<String>("config_file").unwrap();
            play::run(match_config::read_config_file(config_file)?)
        }
        Some(("score", sub_matches)) => board_tools::run_score(board_tools::ScoreConfig {
            calibration_file: sub_matches.get_one::<String>("calibration_file").unwrap().clone(),
            x: *sub_matches.get_one::<f64>("x").unwrap(),
            y: *sub_matches.get_one::<f64>("y").unwrap(),
        }),
        Some(("sample", sub_matches)) => board_tools::run_sample(board_tools::SampleConfig {
            tokens: sub_matches.get_many::<String>("tokens").unwrap().cloned().collect(),
            count: *sub_matches.get_one::<u32>("count").unwrap(),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
