//! Config file location and loading.

use crate::schema::HairscopeConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Default config file name.
const CONFIG_FILE_NAME: &str = "hairscope.yaml";

/// Resolve the config file path.
/// Priority: `HAIRSCOPE_CONFIG` env > `<config_dir>/hairscope/hairscope.yaml` > `./hairscope.yaml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("HAIRSCOPE_CONFIG") {
        return PathBuf::from(path);
    }
    match dirs::config_dir() {
        Some(dir) => dir.join("hairscope").join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

/// Load and parse the config from disk.
///
/// Returns `Ok(Default::default())` if the file doesn't exist (first run).
/// Runs before the logger is installed, so it does not log.
pub async fn load_config(path: &Path) -> Result<HairscopeConfig> {
    if !path.exists() {
        return Ok(HairscopeConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))
}

/// Parse YAML text; an empty document is the default config.
pub fn parse_config(raw: &str) -> Result<HairscopeConfig> {
    if raw.trim().is_empty() {
        return Ok(HairscopeConfig::default());
    }
    Ok(serde_yaml::from_str(raw)?)
}
