//! Loading of the game tuning from disk and the command line.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use last_stand_core::GameConfig;

/// Builds the game configuration from an optional TOML file and seed override.
pub(crate) fn load(path: Option<&Path>, seed: Option<u64>) -> Result<GameConfig> {
    let text = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?,
        None => String::new(),
    };

    from_text(&text, seed).with_context(|| match path {
        Some(path) => format!("failed to load config file {}", path.display()),
        None => "failed to build default config".to_owned(),
    })
}

/// Parses `text` as a partial configuration, applies `seed`, and validates the result.
fn from_text(text: &str, seed: Option<u64>) -> Result<GameConfig> {
    let mut config: GameConfig = toml::from_str(text).context("malformed TOML")?;
    if let Some(seed) = seed {
        config.simulation.rng_seed = seed;
    }
    config.validate()?;
    Ok(config)
}
