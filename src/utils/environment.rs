use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable overriding the goldfish home directory
pub const GOLDFISH_HOME_ENV: &str = "GOLDFISH_HOME";

/// Get the Claude directory path (~/.claude)
pub fn get_claude_dir() -> Result<PathBuf> {
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".claude"))
}

/// Get the goldfish home: `$GOLDFISH_HOME`, else `~/Goldfish`
pub fn get_goldfish_home() -> Result<PathBuf> {
    if let Ok(dir) = env::var(GOLDFISH_HOME_ENV)
        && !dir.is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join("Goldfish"))
}

/// Final component of the user's home directory, lowercased
pub fn home_user_name() -> Option<String> {
    dirs::home_dir()
        .and_then(|home| home.file_name().map(|name| name.to_string_lossy().to_lowercase()))
        .filter(|name| !name.is_empty())
}
