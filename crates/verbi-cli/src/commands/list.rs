//! The `verbi list` command.

use anyhow::Result;

use verbi_core::query::{filter_by_group_and_tense, GroupFilter};

use super::Session;

pub fn execute(session: &Session, group: Option<&str>, tense: Option<&str>) -> Result<()> {
    let doc = session.load()?;
    let filter = group
        .map(|g| GroupFilter::parse(g, &session.convention()))
        .unwrap_or(GroupFilter::All);

    let verbs = filter_by_group_and_tense(&doc, &filter, tense)?;
    if verbs.is_empty() {
        eprintln!("No verbs match group {filter}.");
    }
    for verb in &verbs {
        println!("{verb}");
    }
    Ok(())
}
