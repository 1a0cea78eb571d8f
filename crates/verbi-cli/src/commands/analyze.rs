//! The `verbi analyze` command.

use std::path::PathBuf;

use anyhow::{bail, Result};
use comfy_table::{Cell, Table};

use verbi_core::analysis::{analyze, Analysis, ConjugationTable};
use verbi_core::editor;
use verbi_core::model::Tense;

use super::{join_tenses, Session};

pub fn execute(session: &Session, files: &[PathBuf], apply: bool, json: bool) -> Result<()> {
    let mut analyses = Vec::new();
    for path in files {
        match ConjugationTable::load(path) {
            Ok(table) => analyses.push(analyze(&table)),
            Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
        }
    }
    if analyses.is_empty() {
        bail!("none of the {} conjugation file(s) could be read", files.len());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&analyses)?);
    } else {
        print_summary(&analyses);
    }

    if apply {
        apply_suggestions(session, &analyses)?;
    }
    Ok(())
}

fn print_summary(analyses: &[Analysis]) {
    let mut table = Table::new();
    table.set_header(vec!["Verb", "Group", "Suggested irregular tenses"]);
    for analysis in analyses {
        table.add_row(vec![
            Cell::new(&analysis.infinitive),
            Cell::new(analysis.group),
            Cell::new(join_tenses(&analysis.irregular_tenses())),
        ]);
    }
    println!("{table}");

    for analysis in analyses {
        for finding in &analysis.findings {
            println!(
                "{} / {}: {} of 6 forms differ (expected {}, found {})",
                analysis.infinitive,
                finding.tense,
                finding.mismatches,
                finding.expected.join(" "),
                finding.actual.join(" ")
            );
        }
    }
}

fn apply_suggestions(session: &Session, analyses: &[Analysis]) -> Result<()> {
    let mut doc = session.load_editable()?;

    for analysis in analyses.iter().filter(|a| !a.is_regular()) {
        if doc.get(&analysis.infinitive).is_none() {
            tracing::warn!(verb = %analysis.infinitive, "not in the database, skipping");
            continue;
        }
        let tenses: Vec<&str> = analysis
            .irregular_tenses()
            .iter()
            .map(Tense::as_str)
            .collect();
        let outcome = editor::mark_irregular(&mut doc, &analysis.infinitive, &tenses)?;
        if !outcome.is_noop() {
            println!(
                "Marked {} irregular in: {}",
                outcome.infinitive,
                join_tenses(&outcome.changed)
            );
        }
    }

    if doc.is_dirty() {
        session.save(&mut doc)?;
    } else {
        println!("Database already up to date.");
    }
    Ok(())
}
