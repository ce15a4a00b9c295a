//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default name of the exported CSV file.
pub const DEFAULT_EXPORT_FILENAME: &str = "facebook_game_results.csv";

/// Top-level dissect configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DissectConfig {
    /// Seed for section picking; OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Directory exports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name of the CSV export.
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
    /// Print a hint after a wrong guess.
    #[serde(default = "default_true")]
    pub show_hints: bool,
    /// Ask the bonus question after each guess.
    #[serde(default = "default_true")]
    pub offer_bonus: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_export_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for DissectConfig {
    fn default() -> Self {
        Self {
            seed: None,
            output_dir: default_output_dir(),
            export_filename: default_export_filename(),
            show_hints: true,
            offer_bonus: true,
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `dissect.toml` in the current directory
/// 2. `~/.config/dissect/config.toml`
///
/// Environment variable override: `DISSECT_SEED`.
pub fn load_config() -> Result<DissectConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<DissectConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("dissect.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => parse_config_file(path)?,
        None => DissectConfig::default(),
    };

    if let Ok(raw) = std::env::var("DISSECT_SEED") {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("DISSECT_SEED is not a valid seed: '{raw}'"))?;
        config.seed = Some(seed);
    }

    tracing::debug!(path = ?config_path, ?config, "configuration loaded");
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<DissectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let config = toml::from_str::<DissectConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;
    anyhow::ensure!(
        !config.export_filename.trim().is_empty(),
        "export_filename must not be empty in {}",
        path.display()
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("dissect"))
}
