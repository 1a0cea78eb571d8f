//! Subcommand implementations and the state they share.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use verbi_core::config::{load_config_from, VerbiConfig};
use verbi_core::format::{Document, LegacyConvention, VerbDocument};
use verbi_core::store;

pub mod add;
pub mod analyze;
pub mod groups;
pub mod import;
pub mod info;
pub mod init;
pub mod list;
pub mod mark;
pub mod migrate;
pub mod quiz;
pub mod remove;
pub mod tenses;
pub mod validate;

/// Resolved configuration plus the database path commands operate on.
pub struct Session {
    pub config: VerbiConfig,
    pub database: PathBuf,
}

impl Session {
    pub fn open(config_path: Option<&Path>, database: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let database = database.unwrap_or_else(|| config.database.clone());
        tracing::debug!(database = %database.display(), "session opened");
        Ok(Self { config, database })
    }

    pub fn convention(&self) -> LegacyConvention {
        self.config.convention()
    }

    /// Load the database in whatever format it is in.
    pub fn load(&self) -> Result<Document> {
        store::load(&self.database, &self.convention())
    }

    /// Load the database for editing. Legacy databases cannot hold
    /// per-tense flags, so they are refused.
    pub fn load_editable(&self) -> Result<VerbDocument> {
        match self.load()? {
            Document::Normalized(doc) => Ok(doc),
            Document::Legacy(_) => bail!(
                "{} is in the legacy grouped format; run `verbi migrate --in-place` first",
                self.database.display()
            ),
        }
    }

    /// Save `doc` back to the database if it has unsaved changes.
    pub fn save(&self, doc: &mut VerbDocument) -> Result<()> {
        if doc.is_dirty() {
            store::save(&self.database, doc)?;
        }
        Ok(())
    }
}

/// Comma-separated tense names, or a placeholder for none.
pub fn join_tenses<T: std::fmt::Display>(tenses: &[T]) -> String {
    if tenses.is_empty() {
        "-".to_string()
    } else {
        tenses
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
