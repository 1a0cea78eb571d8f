//! verbi configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::format::{LegacyConvention, DEFAULT_IRREGULAR_MARKER};
use crate::migrate::MigrationPolicy;

/// Top-level verbi configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbiConfig {
    /// Path of the verb database.
    #[serde(default = "default_database")]
    pub database: PathBuf,
    /// Name of the legacy group whose verbs are irregular in every tense.
    #[serde(default = "default_marker")]
    pub irregular_marker: String,
    /// Policy used by `migrate` when none is given on the command line.
    #[serde(default)]
    pub migration_policy: MigrationPolicy,
    /// Group filters a quiz draws from by default.
    #[serde(default = "default_quiz_groups")]
    pub quiz_groups: Vec<String>,
    /// Tenses a quiz draws from by default.
    #[serde(default = "default_quiz_tenses")]
    pub quiz_tenses: Vec<String>,
}

fn default_database() -> PathBuf {
    PathBuf::from("verbs.json")
}
fn default_marker() -> String {
    DEFAULT_IRREGULAR_MARKER.to_string()
}
fn default_quiz_groups() -> Vec<String> {
    vec!["ARE".to_string(), DEFAULT_IRREGULAR_MARKER.to_string()]
}
fn default_quiz_tenses() -> Vec<String> {
    vec!["presente".to_string()]
}

impl Default for VerbiConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            irregular_marker: default_marker(),
            migration_policy: MigrationPolicy::default(),
            quiz_groups: default_quiz_groups(),
            quiz_tenses: default_quiz_tenses(),
        }
    }
}

impl VerbiConfig {
    pub fn convention(&self) -> LegacyConvention {
        LegacyConvention::new(self.irregular_marker.clone())
    }
}

/// Load config from an explicit path, or search the default locations:
/// 1. `verbi.toml` in the current directory
/// 2. `~/.config/verbi/config.toml`
///
/// Environment variable overrides: `VERBI_DATABASE`, `VERBI_IRREGULAR_MARKER`.
pub fn load_config_from(path: Option<&Path>) -> Result<VerbiConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("verbi.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => VerbiConfig::default(),
    };

    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<VerbiConfig> {
    let config: VerbiConfig = toml::from_str(content)?;
    anyhow::ensure!(
        !config.irregular_marker.trim().is_empty(),
        "irregular_marker must not be empty"
    );
    Ok(config)
}

fn apply_env_overrides(config: &mut VerbiConfig) {
    if let Ok(db) = std::env::var("VERBI_DATABASE") {
        if !db.is_empty() {
            config.database = PathBuf::from(db);
        }
    }
    if let Ok(marker) = std::env::var("VERBI_IRREGULAR_MARKER") {
        if !marker.is_empty() {
            config.irregular_marker = marker;
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("verbi"))
}
