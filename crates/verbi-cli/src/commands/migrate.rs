//! The `verbi migrate` command.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use verbi_core::format::Document;
use verbi_core::migrate::{migrate, MigrationPolicy};
use verbi_core::store;

use super::Session;

pub fn execute(
    session: &Session,
    policy: Option<&str>,
    output: Option<PathBuf>,
    in_place: bool,
) -> Result<()> {
    let policy = match policy {
        Some(name) => name.parse::<MigrationPolicy>().map_err(|e| anyhow!(e))?,
        None => session.config.migration_policy,
    };

    let doc = session.load()?;
    if let Document::Normalized(_) = doc {
        println!(
            "{} is already in the tense-annotated format; nothing to migrate.",
            session.database.display()
        );
        return Ok(());
    }

    let mut outcome = migrate(&doc, policy)?;
    let target = if in_place {
        session.database.clone()
    } else {
        output.unwrap_or_else(|| default_output(&session.database))
    };

    store::save(&target, &mut outcome.document)?;

    println!(
        "Migrated {} verbs ({policy}) to {}",
        outcome.document.len(),
        target.display()
    );
    if !outcome.warnings.is_empty() {
        println!("{} warning(s):", outcome.warnings.len());
        for warning in &outcome.warnings {
            println!("  {warning}");
        }
    }
    Ok(())
}

/// `verbs.json` → `verbs.migrated.json`, next to the input.
fn default_output(database: &Path) -> PathBuf {
    database.with_extension("migrated.json")
}
