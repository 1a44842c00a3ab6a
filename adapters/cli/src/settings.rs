use std::{fs, path::Path};

use anyhow::{Context, Result};
use galton_board_core::BoardSettings;

/// Loads board settings from a TOML file, or the defaults when no file is given.
pub(crate) fn load_settings(path: Option<&Path>) -> Result<BoardSettings> {
    let Some(path) = path else {
        return Ok(BoardSettings::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read board settings at {}", path.display()))?;
    parse_settings(&contents)
        .with_context(|| format!("invalid board settings in {}", path.display()))
}

fn parse_settings(contents: &str) -> Result<BoardSettings> {
    toml::from_str(contents).context("failed to parse board settings toml contents")
}
