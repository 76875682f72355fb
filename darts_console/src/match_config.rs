use anyhow::Context;
use serde::{Deserialize, Serialize};

use darts_scoring::board::BoardGeometry;
use darts_scoring::rules::MatchRules;


#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    pub players: Vec<String>,
    #[serde(default)]
    pub rules: MatchRules,
    // Enables `at <x> <y>` input: darts are scored from pixel positions.
    #[serde(default)]
    pub calibration: Option<BoardGeometry>,
    // Where `export` writes the session. Printed to stdout when missing.
    #[serde(default)]
    pub export_path: Option<String>,
}

impl MatchConfig {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: MatchConfig = serde_yaml::from_str(contents).context("Parsing config file")?;
        if config.players.is_empty() {
            anyhow::bail!("Config lists no players");
        }
        config.rules.verify()?;
        if let Some(calibration) = &config.calibration {
            calibration.validate()?;
        }
        Ok(config)
    }
}

pub fn read_config_file(filename: &str) -> anyhow::Result<MatchConfig> {
    let contents = std::fs::read_to_string(filename)
        .with_context(|| format!("Failed to read config file '{filename}'."))?;
    MatchConfig::parse(&contents)
}
