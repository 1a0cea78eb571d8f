//! The `verbi validate` command.

use anyhow::Result;

use verbi_core::format::{Document, TenseLayout};
use verbi_core::migrate::preview;
use verbi_core::query::VerbSource;

use super::Session;

pub fn execute(session: &Session) -> Result<()> {
    let doc = session.load()?;

    println!("Database: {}", session.database.display());
    println!("Format:   {}", doc.format());
    println!("Verbs:    {}", doc.records().len());

    match &doc {
        Document::Legacy(legacy) => {
            println!("Groups:   {}", legacy.groups().len());
            let warnings = preview(legacy);
            if warnings.is_empty() {
                println!("\nReady to migrate.");
            } else {
                println!();
                for warning in &warnings {
                    println!("  WARNING: {warning}");
                }
                println!("\n{} warning(s) found.", warnings.len());
            }
        }
        Document::Normalized(normalized) => {
            let layout = match normalized.layout() {
                TenseLayout::Simplified => "simplified",
                TenseLayout::Full => "full",
            };
            println!("Layout:   {layout}");
            println!("\nAll verbs valid.");
        }
    }

    Ok(())
}
