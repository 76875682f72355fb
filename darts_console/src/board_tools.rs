use anyhow::Context;
use rand::Rng;

use darts_scoring::board::{BoardGeometry, Target, point_from_score};
use darts_scoring::coord::Point;


pub struct ScoreConfig {
    pub calibration_file: String,
    pub x: f64,
    pub y: f64,
}

pub struct SampleConfig {
    pub tokens: Vec<String>,
    pub count: u32,
}

fn read_calibration_file(filename: &str) -> anyhow::Result<BoardGeometry> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read calibration file '{filename}'."))?;
    let geometry: BoardGeometry =
        serde_yaml::from_str(&contents).context("Parsing calibration file")?;
    geometry.validate()?;
    Ok(geometry)
}

fn describe_score(geometry: &BoardGeometry, pixel: Point) -> String {
    format!(
        "{} (distance {:.3})",
        geometry.score_from_point(pixel),
        geometry.normalized_distance(pixel)
    )
}

fn sample_lines(tokens: &[String], count: u32, rng: &mut impl Rng) -> anyhow::Result<Vec<String>> {
    let mut lines = Vec::new();
    for token in tokens {
        let target = Target::from_token(token)
            .with_context(|| format!("'{token}' is not a spot on the board"))?;
        for _ in 0..count {
            match point_from_score(token, rng) {
                Some(p) => lines.push(format!("{}: {:.4} {:.4}", target, p.x, p.y)),
                None => lines.push(format!("{}: off the board", target)),
            }
        }
    }
    Ok(lines)
}

pub fn run_score(config: ScoreConfig) -> anyhow::Result<()> {
    let geometry = read_calibration_file(&config.calibration_file)?;
    println!("{}", describe_score(&geometry, Point::new(config.x, config.y)));
    Ok(())
}

pub fn run_sample(config: SampleConfig) -> anyhow::Result<()> {
    for line in sample_lines(&config.tokens, config.count, &mut rand::rng())? {
        println!("{}", line);
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use darts_scoring::test_util::deterministic_rng;

    use super::*;

    #[test]
    fn describes_score() {
        let geometry = BoardGeometry::unit();
        assert_eq!(describe_score(&geometry, Point::new(0.0, -0.5)), "20 (distance 0.500)");
        assert_eq!(describe_score(&geometry, Point::new(0.0, 2.0)), "MISS (distance 2.000)");
    }

    #[test]
    fn samples_round_trip() {
        let mut rng = deterministic_rng();
        let tokens = ["t20".to_owned(), "MISS".to_owned()];
        let lines = sample_lines(&tokens, 3, &mut rng).unwrap();
        assert_eq!(lines.len(), 6);
        assert!(lines[..3].iter().all(|l| l.starts_with("T20: ")));
        assert_eq!(lines[3], "MISS: off the board");
        assert!(sample_lines(&["T21".to_owned()], 1, &mut rng).is_err());
    }
}
