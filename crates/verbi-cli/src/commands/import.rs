//! The `verbi import` command.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use verbi_core::importer::import_dir;
use verbi_core::store;

use super::Session;

pub fn execute(session: &Session, dir: &Path, output: Option<PathBuf>, force: bool) -> Result<()> {
    let target = output.unwrap_or_else(|| session.database.clone());
    if target.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite it",
            target.display()
        );
    }

    let outcome = import_dir(dir, &session.convention())?;
    store::write_atomic(&target, &outcome.document.to_json_pretty()?)?;

    println!(
        "Imported {} verbs from {} file(s) into {}",
        outcome.document.records().len(),
        outcome.files.len(),
        target.display()
    );
    for group in outcome.document.groups() {
        println!("  {}: {}", group.name, group.verbs.len());
    }
    if !outcome.skipped.is_empty() {
        println!("Skipped {} unreadable file(s).", outcome.skipped.len());
    }
    Ok(())
}
