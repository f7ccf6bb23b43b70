//! Loading of the optional TOML game configuration.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use snake_core::GameConfig;
use tracing::debug;

/// Reads and validates the configuration, falling back to defaults without a path.
pub(crate) fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config = parse_config(&contents)
        .with_context(|| format!("invalid config file at {}", path.display()))?;
    debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

fn parse_config(contents: &str) -> Result<GameConfig> {
    let config: GameConfig =
        toml::from_str(contents).context("failed to parse config toml contents")?;
    let _ = config.validate()?;
    Ok(config)
}
